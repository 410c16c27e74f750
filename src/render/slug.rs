/// Convert a title to a URL-safe slug.
///
/// Lowercases, keeps letters and digits of any script, and collapses every
/// other run of characters into a single `-`.
///
/// ```text
/// "Hello World"      -> "hello-world"
/// "Tuple to Union"   -> "tuple-to-union"
/// "元组转换为对象"     -> "元组转换为对象"
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Prepare a challenge title for [`slugify`]: literal dots are dropped and
/// tag-like `<...>` wrappers lose their angle brackets, so `Promise.all`
/// slugs to `promiseall` and `Pick<T>` to `pickt`.
pub fn strip_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        out.push_str(&rest[open + 1..open + close]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out.replace('.', "")
}
