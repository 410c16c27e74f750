use crate::issue::Submission;

/// Render a submission as a single file a challenger can open in the playground:
/// a header comment with the question, then the template, then the test cases.
pub fn format_code(submission: &Submission) -> String {
    let info = &submission.info;
    let mut header = format!("{} #{}", info.title, info.difficulty);
    if let Some(author) = &info.author {
        if let Some(by) = author.name.as_deref().or(author.github.as_deref()) {
            header.push_str(&format!("\nby {by}"));
        }
    }

    // a stray `*/` in the question would end the header comment early
    let question = submission.question.replace("*/", "*\\/");

    let comment = format!("{header}\n\n### Question\n\n{question}")
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "/*\n{comment}\n*/\n\n\
         /* _____________ Your Code Here _____________ */\n\n\
         {}\n\n\
         /* _____________ Test Cases _____________ */\n\
         {}\n",
        submission.template, submission.tests
    )
}

/// Shareable playground link carrying `code` URI-encoded in the `#src=` fragment.
pub fn url(base: &str, code: &str) -> String {
    format!("{}#src={}", base, urlencoding::encode(code))
}
