use serde::{Deserialize, Serialize};

/// Owner and name of the repository the bot works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse an `owner/repo` string as found in GITHUB_REPOSITORY.
    pub fn parse(full_name: &str) -> Option<RepoRef> {
        let (owner, repo) = full_name.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The `user` object embedded in pull requests and comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Public profile from `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    /// Display name; unset on many profiles
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Null for PRs opened by deleted accounts
    pub user: Option<Account>,
    pub head: BranchRef,
    #[serde(default)]
    pub html_url: String,
}

impl PullRequest {
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub user: Option<Account>,
}

impl Comment {
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

/// A file written by a commit, path relative to the repository root.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    pub path: String,
    pub content: String,
}

/// One atomic multi-file commit onto `head`.
///
/// With `fresh` the commit is parented on `base` and `head` is force-moved to
/// it, discarding earlier branch history. Otherwise the commit goes on top of
/// the current `head` (or `base` if `head` does not exist yet) and files not
/// named in `files` are left as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub base: String,
    pub head: String,
    pub files: Vec<FileChange>,
    pub message: String,
    pub author: CommitAuthor,
    pub fresh: bool,
}
