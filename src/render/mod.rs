pub mod badge;
pub mod playground;
pub mod slug;

use chrono::{DateTime, Utc};

use crate::issue::Difficulty;
use crate::locale::Locale;

/// Colour of the preview badge (TypeScript blue).
const PREVIEW_COLOR: &str = "3178c6";

/// Branch that carries the generated files for an issue.
pub fn branch_name(issue_number: u64) -> String {
    format!("pulls/{issue_number}")
}

/// `{root}/{no}-{difficulty}-{slug}`, a pure function of its inputs.
pub fn question_dir(root: &str, issue_number: u64, difficulty: Difficulty, title: &str) -> String {
    let slug = slug::slugify(&slug::strip_title(title));
    format!("{root}/{issue_number}-{difficulty}-{slug}")
}

/// Title prefix that ties an automation PR to its issue.
pub fn pr_title_prefix(issue_number: u64) -> String {
    format!("#{issue_number} ")
}

pub fn pr_title(issue_number: u64, title: &str) -> String {
    format!("#{issue_number} - {title}")
}

pub fn pr_body(issue_number: u64) -> String {
    format!(
        "This is an auto-generated PR that reflects the changes in #{issue_number}, \
         please go to #{issue_number} for discussion or making changes.\n\n\
         Closes #{issue_number}"
    )
}

pub fn commit_message(issue_number: u64, title: &str) -> String {
    format!("feat(question): add #{issue_number} - {title}")
}

/// Comment posted after a successful publish: the status line, then the
/// timestamp and preview badges.
pub fn status_comment(
    status: &str,
    locale: Locale,
    preview_url: &str,
    now: DateTime<Utc>,
) -> String {
    let preview = badge::link(
        preview_url,
        locale.messages().preview_badge,
        PREVIEW_COLOR,
        "?logo=typescript",
    );
    format!("{status}\n\n{} {preview}", badge::timestamp(now))
}
