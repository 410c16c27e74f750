use regex::Regex;

/// One named extraction rule over an issue body.
///
/// Every rule takes the first, shortest match and yields `None` when the body
/// does not contain it. Extracted text is trimmed, and a match that is blank
/// after trimming counts as absent.
#[derive(Debug)]
pub enum Rule<'a> {
    /// The first fenced block tagged with one of `langs` after a heading whose
    /// text starts with `heading`.
    FencedBlock {
        heading: &'a str,
        langs: &'a [&'a str],
    },
    /// Text between `<!--{tag}-start-->` and `<!--{tag}-end-->`.
    CommentRange { tag: &'a str },
}

pub const YAML_LANGS: &[&str] = &["yaml", "yml"];
pub const CODE_LANGS: &[&str] = &["typescript", "ts"];

impl Rule<'_> {
    fn pattern(&self) -> String {
        match self {
            Rule::FencedBlock { heading, langs } => {
                let langs = langs
                    .iter()
                    .map(|l| regex::escape(l))
                    .collect::<Vec<_>>()
                    .join("|");
                format!(
                    r"(?s)#{{1,6}}[ \t]*{}.*?```(?:{})[ \t]*\r?\n(.*?)```",
                    regex::escape(heading),
                    langs
                )
            }
            Rule::CommentRange { tag } => {
                let tag = regex::escape(tag);
                format!(r"(?s)<!--\s*{tag}-start\s*-->(.*?)<!--\s*{tag}-end\s*-->")
            }
        }
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        // Patterns are built from escaped literals, so compilation cannot fail
        // on user input; treat a failure as "no match" all the same.
        let re = Regex::new(&self.pattern()).ok()?;
        let captures = re.captures(text)?;
        let found = captures.get(1)?.as_str().trim();
        if found.is_empty() {
            return None;
        }
        Some(found.to_string())
    }
}

/// Code inside the first `ts` block after `heading`.
pub fn code_block(text: &str, heading: &str) -> Option<String> {
    Rule::FencedBlock {
        heading,
        langs: CODE_LANGS,
    }
    .extract(text)
}

/// Raw yaml inside the first `yaml` block after `heading`.
pub fn yaml_block(text: &str, heading: &str) -> Option<String> {
    Rule::FencedBlock {
        heading,
        langs: YAML_LANGS,
    }
    .extract(text)
}

pub fn comment_range(text: &str, tag: &str) -> Option<String> {
    Rule::CommentRange { tag }.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"
## Template

Some words.

```ts
type MyPick<T, K> = any
```

## Test Cases

```ts
import type { Equal, Expect } from '@type-challenges/utils'

type cases = [Expect<Equal<1, 1>>]
```

## Another

```ts
type Unrelated = 1
```
"#;

    #[test]
    fn test_code_block_after_heading() {
        assert_eq!(
            code_block(BODY, "Template").as_deref(),
            Some("type MyPick<T, K> = any")
        );
        let tests = code_block(BODY, "Test Cases").unwrap();
        assert!(tests.starts_with("import type"));
        assert!(tests.ends_with("type cases = [Expect<Equal<1, 1>>]"));
    }

    #[test]
    fn test_code_block_missing_heading() {
        assert_eq!(code_block(BODY, "Solution"), None);
        assert_eq!(code_block("", "Template"), None);
    }

    #[test]
    fn test_code_block_skips_non_ts_languages() {
        let body = "## Template\n```js\nvar a\n```\n```ts\nlet b: number\n```\n";
        assert_eq!(code_block(body, "Template").as_deref(), Some("let b: number"));
        let tsx = "## Template\n```tsx\n<div/>\n```\n";
        assert_eq!(code_block(tsx, "Template"), None);
    }

    #[test]
    fn test_blank_sections_are_absent() {
        let body = "## Template\n\n```ts\n```\n\n## Test Cases\n```ts\n   \n\n```\n";
        assert_eq!(code_block(body, "Template"), None);
        assert_eq!(code_block(body, "Test Cases"), None);
        assert_eq!(yaml_block("## Info\n```yaml\n\n```\n", "Info"), None);
        let question = "<!--question-start-->\n  \n<!--question-end-->";
        assert_eq!(comment_range(question, "question"), None);
    }

    #[test]
    fn test_code_block_extraction_is_idempotent() {
        let first = code_block(BODY, "Test Cases").unwrap();
        let rewrapped = format!("## Test Cases\n```ts\n{first}\n```");
        assert_eq!(code_block(&rewrapped, "Test Cases").unwrap(), first);
    }

    #[test]
    fn test_yaml_block() {
        let body = "## Info\n\n```yaml\ndifficulty: easy\ntitle: Pick\n```\n";
        assert_eq!(
            yaml_block(body, "Info").as_deref(),
            Some("difficulty: easy\ntitle: Pick")
        );
        assert_eq!(yaml_block(body, "Template"), None);
    }

    #[test]
    fn test_comment_range() {
        let body = "<!--info-header-start-->x<!--info-header-end-->\n\
                    <!--question-start-->\n  Implement `Pick`.  \n<!--question-end-->\n\
                    <!--question-start-->second<!--question-end-->";
        assert_eq!(
            comment_range(body, "question").as_deref(),
            Some("Implement `Pick`.")
        );
        assert_eq!(comment_range(body, "footer"), None);
    }

    #[test]
    fn test_comment_range_unterminated() {
        assert_eq!(comment_range("<!--question-start-->dangling", "question"), None);
    }
}
