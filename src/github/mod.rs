pub mod client;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::RestClient;
pub use types::{
    Comment, CommitAuthor, CommitRequest, FileChange, NewPullRequest, PullRequest, RepoRef, User,
};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {method} {path}: {body}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("Branch not found: {0}")]
    MissingBranch(String),

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

/// The repository-hosting operations the bot needs, scoped to one repository.
///
/// Calls are awaited one at a time; nothing here retries.
#[async_trait]
pub trait GitHub: Send + Sync {
    /// `GET /repos/{owner}/{repo}/pulls?state={state}`, all pages.
    async fn list_pull_requests(&self, state: &str) -> Result<Vec<PullRequest>, GitHubError>;

    async fn create_pull_request(&self, pr: &NewPullRequest) -> Result<PullRequest, GitHubError>;

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<(), GitHubError>;

    /// All comments on an issue, oldest first.
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, GitHubError>;

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<Comment, GitHubError>;

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubError>;

    /// Public profile for `login`, `None` if the account does not exist.
    async fn get_user(&self, login: &str) -> Result<Option<User>, GitHubError>;

    /// Apply a [`CommitRequest`] and return the new commit's sha.
    async fn push_commit(&self, commit: &CommitRequest) -> Result<String, GitHubError>;
}
