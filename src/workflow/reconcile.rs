use tracing::{debug, info, instrument, warn};

use super::Lookup;
use crate::config::BotConfig;
use crate::github::{GitHub, GitHubError, NewPullRequest, PullRequest};
use crate::render;

/// Find the open PR the bot opened for `issue_number`: authored by the bot and
/// titled `#<no> ...`.
#[instrument(skip(gh))]
pub async fn find_automation_pr(
    gh: &dyn GitHub,
    bot_login: &str,
    issue_number: u64,
) -> Result<Lookup<PullRequest>, GitHubError> {
    let prefix = render::pr_title_prefix(issue_number);
    let mut matches: Vec<PullRequest> = gh
        .list_pull_requests("open")
        .await?
        .into_iter()
        .filter(|pr| pr.author() == Some(bot_login) && pr.title.starts_with(&prefix))
        .collect();

    if matches.len() > 1 {
        warn!(
            count = matches.len(),
            "more than one automation PR for this issue, using the oldest"
        );
        matches.sort_by_key(|pr| pr.number);
    }
    let found = matches.into_iter().next();
    debug!(found = ?found.as_ref().map(|pr| pr.number), "looked up automation PR");
    Ok(found.into())
}

/// Open the PR for a freshly published branch and label it.
#[instrument(skip(gh, bot, title))]
pub async fn open_pull_request(
    gh: &dyn GitHub,
    bot: &BotConfig,
    issue_number: u64,
    title: &str,
) -> Result<PullRequest, GitHubError> {
    let pr = gh
        .create_pull_request(&NewPullRequest {
            title: render::pr_title(issue_number, title),
            body: render::pr_body(issue_number),
            head: render::branch_name(issue_number),
            base: bot.base_branch.clone(),
        })
        .await?;
    gh.add_labels(pr.number, std::slice::from_ref(&bot.pr_label))
        .await?;
    info!(pr = pr.number, "opened pull request");
    Ok(pr)
}
