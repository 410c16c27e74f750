use tracing::{info, instrument};

use super::WorkflowError;
use crate::config::BotConfig;
use crate::github::{CommitAuthor, CommitRequest, FileChange, GitHub};
use crate::issue::Submission;
use crate::locale::Locale;
use crate::render;

fn with_trailing_newline(text: &str) -> String {
    format!("{}\n", text.trim_end_matches('\n'))
}

/// The four files a submission becomes, under `dir`.
pub fn generated_files(
    dir: &str,
    locale: Locale,
    submission: &Submission,
) -> Result<Vec<FileChange>, serde_yaml::Error> {
    let info = serde_yaml::to_string(&submission.info)?;
    let file = |name: String, content: &str| FileChange {
        path: format!("{dir}/{name}"),
        content: with_trailing_newline(content),
    };
    Ok(vec![
        file(locale.localized_file("info", "yml"), &info),
        file(locale.localized_file("README", "md"), &submission.question),
        file("template.ts".to_string(), &submission.template),
        file("test-cases.ts".to_string(), &submission.tests),
    ])
}

/// Build the commit for an issue's submission.
///
/// `fresh` restarts `pulls/<no>` from the base branch; it is set when no
/// automation PR exists yet for the issue.
pub fn build_commit(
    bot: &BotConfig,
    issue_number: u64,
    locale: Locale,
    submission: &Submission,
    author: CommitAuthor,
    fresh: bool,
) -> Result<CommitRequest, WorkflowError> {
    let info = &submission.info;
    let dir = render::question_dir(&bot.questions_dir, issue_number, info.difficulty, &info.title);
    Ok(CommitRequest {
        base: bot.base_branch.clone(),
        head: render::branch_name(issue_number),
        files: generated_files(&dir, locale, submission)?,
        message: render::commit_message(issue_number, &info.title),
        author,
        fresh,
    })
}

#[instrument(skip(gh, commit), fields(head = %commit.head, fresh = commit.fresh))]
pub async fn publish(gh: &dyn GitHub, commit: &CommitRequest) -> Result<String, WorkflowError> {
    let sha = gh.push_commit(commit).await?;
    info!(sha = %sha, files = commit.files.len(), "published submission");
    Ok(sha)
}
