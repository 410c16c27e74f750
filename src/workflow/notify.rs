use tracing::{debug, instrument, warn};

use super::Lookup;
use crate::github::{Comment, GitHub, GitHubError};

/// The bot's own comment on an issue, if it has left one.
pub async fn find_bot_comment(
    gh: &dyn GitHub,
    bot_login: &str,
    issue_number: u64,
) -> Result<Lookup<Comment>, GitHubError> {
    let mut own = gh
        .list_comments(issue_number)
        .await?
        .into_iter()
        .filter(|c| c.author() == Some(bot_login));
    let first = own.next();
    if own.next().is_some() {
        warn!("issue has more than one bot comment, updating the first");
    }
    Ok(first.into())
}

/// Create or edit the single bot comment on an issue so it reads `body`.
#[instrument(skip(gh, body))]
pub async fn upsert_comment(
    gh: &dyn GitHub,
    bot_login: &str,
    issue_number: u64,
    body: &str,
) -> Result<Comment, GitHubError> {
    match find_bot_comment(gh, bot_login, issue_number).await? {
        Lookup::Found(existing) => {
            debug!(comment = existing.id, "updating bot comment");
            gh.update_comment(existing.id, body).await
        }
        Lookup::NotFound => {
            debug!("creating bot comment");
            gh.create_comment(issue_number, body).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::mock::MockGitHub;

    const BOT: &str = "github-actions[bot]";

    #[tokio::test]
    async fn test_creates_when_missing() {
        let gh = MockGitHub::new(BOT);
        gh.add_comment(42, "alice", "please review");

        upsert_comment(&gh, BOT, 42, "hello").await.unwrap();

        let comments = gh.comments_on(42);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].author(), Some(BOT));
        assert_eq!(comments[1].body.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_updates_in_place() {
        let gh = MockGitHub::new(BOT);
        gh.add_comment(42, "alice", "please review");
        gh.add_comment(42, BOT, "old status");

        let updated = upsert_comment(&gh, BOT, 42, "new status").await.unwrap();

        let comments = gh.comments_on(42);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].id, updated.id);
        assert_eq!(comments[1].body.as_deref(), Some("new status"));
        // the human comment is untouched
        assert_eq!(comments[0].body.as_deref(), Some("please review"));
    }

    #[tokio::test]
    async fn test_repeated_upserts_converge() {
        let gh = MockGitHub::new(BOT);
        for body in ["one", "two", "three"] {
            upsert_comment(&gh, BOT, 7, body).await.unwrap();
        }
        let comments = gh.comments_on(7);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body.as_deref(), Some("three"));
    }

    #[tokio::test]
    async fn test_find_ignores_other_issues() {
        let gh = MockGitHub::new(BOT);
        gh.add_comment(1, BOT, "status for #1");
        assert!(matches!(
            find_bot_comment(&gh, BOT, 2).await.unwrap(),
            Lookup::NotFound
        ));
    }
}
