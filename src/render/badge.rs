use chrono::{DateTime, Utc};

const SHIELDS: &str = "https://img.shields.io";

/// shields.io escapes `-` and `_` by doubling them inside badge path segments.
fn escape_segment(text: &str) -> String {
    urlencoding::encode(&text.replace('-', "--").replace('_', "__")).into_owned()
}

/// Static badge image URL. `query` is appended verbatim and should start with `?`.
pub fn image_url(label: &str, message: &str, color: &str, query: &str) -> String {
    format!(
        "{SHIELDS}/badge/{}-{}-{}{}",
        escape_segment(label),
        escape_segment(message),
        color,
        query
    )
}

/// A badge with no left-hand label that links to `href`.
pub fn link(href: &str, label: &str, color: &str, query: &str) -> String {
    format!(
        r#"<a href="{href}" target="_blank"><img src="{}" alt="{label}"/></a>"#,
        image_url("", label, color, query)
    )
}

/// Relative-time badge for `now`; rendering it shows how long ago the bot last
/// touched the issue.
pub fn timestamp(now: DateTime<Utc>) -> String {
    format!(
        "![{}]({SHIELDS}/date/{}?color=green&label=)",
        now.to_rfc3339(),
        now.timestamp()
    )
}
