pub mod author;
pub mod notify;
pub mod publish;
pub mod reconcile;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, info_span, Instrument};

use crate::config::Config;
use crate::github::{GitHub, GitHubError};
use crate::issue::{self, Issue, ParsedSubmission, Submission};
use crate::render::{self, playground};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Failed to serialize challenge metadata: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Result of looking for an artifact the bot owns. At most one is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(found) => Lookup::Found(found),
            None => Lookup::NotFound,
        }
    }
}

/// What one run did, matching the comment the issue ends up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Issue lacks the trigger label; nothing was touched
    Skipped,
    /// Issue body did not parse; only the comment was written
    Invalid,
    Created { pr: u64 },
    Updated { pr: u64 },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Invalid => write!(f, "invalid"),
            Outcome::Created { pr } => write!(f, "created #{pr}"),
            Outcome::Updated { pr } => write!(f, "updated #{pr}"),
        }
    }
}

/// Validity gate: a submission passes only with all four sections present and
/// the metadata matching its schema.
pub fn validate(parsed: ParsedSubmission) -> Option<Submission> {
    parsed.into_submission()
}

/// Run the whole issue → PR sequence for one trigger.
///
/// parse → validate → resolve author → reconcile PR → publish → notify, each
/// step awaited in turn. `now` stamps the status comment's timestamp badge.
pub async fn run(
    gh: &dyn GitHub,
    config: &Config,
    issue: &Issue,
    now: DateTime<Utc>,
) -> Result<Outcome, WorkflowError> {
    let span = info_span!("issue", number = issue.number, author = %issue.author);
    run_inner(gh, config, issue, now).instrument(span).await
}

async fn run_inner(
    gh: &dyn GitHub,
    config: &Config,
    issue: &Issue,
    now: DateTime<Utc>,
) -> Result<Outcome, WorkflowError> {
    let bot = &config.bot;
    if !issue.has_label(&bot.trigger_label) {
        info!(label = %bot.trigger_label, "issue is not labelled for the bot, skipping");
        return Ok(Outcome::Skipped);
    }

    let locale = issue.locale();
    let messages = locale.messages();

    let parsed = issue::parse(&issue.body, locale);
    let missing = parsed.missing_sections();
    let Some(mut submission) = validate(parsed) else {
        info!(?missing, "issue body is invalid");
        notify::upsert_comment(gh, &bot.login, issue.number, messages.invalid_issue).await?;
        return Ok(Outcome::Invalid);
    };

    let commit_author = author::resolve(
        gh,
        &issue.author,
        &mut submission.info,
        &config.github.noreply_host,
    )
    .await?;

    let existing = reconcile::find_automation_pr(gh, &bot.login, issue.number).await?;
    let fresh = matches!(existing, Lookup::NotFound);

    let commit = publish::build_commit(
        bot,
        issue.number,
        locale,
        &submission,
        commit_author,
        fresh,
    )?;
    publish::publish(gh, &commit).await?;

    let (outcome, status) = match existing {
        Lookup::Found(pr) => (
            Outcome::Updated { pr: pr.number },
            messages.pr_updated(issue.number),
        ),
        Lookup::NotFound => {
            let pr =
                reconcile::open_pull_request(gh, bot, issue.number, &submission.info.title).await?;
            (
                Outcome::Created { pr: pr.number },
                messages.pr_created(issue.number),
            )
        }
    };

    let preview = playground::url(
        &config.playground.url,
        &playground::format_code(&submission),
    );
    let body = render::status_comment(&status, locale, &preview, now);
    notify::upsert_comment(gh, &bot.login, issue.number, &body).await?;

    info!(%outcome, "done");
    Ok(outcome)
}
