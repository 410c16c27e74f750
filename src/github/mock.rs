use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{
    Account, BranchRef, Comment, CommitRequest, NewPullRequest, PullRequest, User,
};
use super::{GitHub, GitHubError};

/// In-memory repository for tests.
///
/// Keeps pull requests, issue comments and branch file trees so repeated
/// workflow runs observe what earlier runs wrote. Every mutating call is also
/// recorded for assertions.
pub struct MockGitHub {
    /// Login that authors everything created through this mock
    bot_login: String,
    pub pulls: Mutex<Vec<PullRequest>>,
    /// issue number → comments
    pub comments: Mutex<HashMap<u64, Vec<Comment>>>,
    /// branch → path → content
    pub branches: Mutex<HashMap<String, BTreeMap<String, String>>>,
    pub users: Mutex<HashMap<String, User>>,
    pub commits: Mutex<Vec<CommitRequest>>,
    pub created_pulls: Mutex<Vec<NewPullRequest>>,
    pub added_labels: Mutex<Vec<(u64, Vec<String>)>>,
    pub comment_updates: Mutex<Vec<(u64, String)>>,
    next_id: Mutex<u64>,
}

impl MockGitHub {
    pub fn new(bot_login: &str) -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_string(), BTreeMap::new());
        Self {
            bot_login: bot_login.to_string(),
            pulls: Mutex::new(Vec::new()),
            comments: Mutex::new(HashMap::new()),
            branches: Mutex::new(branches),
            users: Mutex::new(HashMap::new()),
            commits: Mutex::new(Vec::new()),
            created_pulls: Mutex::new(Vec::new()),
            added_labels: Mutex::new(Vec::new()),
            comment_updates: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    pub fn add_user(&self, id: u64, login: &str, name: Option<&str>) {
        self.users.lock().unwrap().insert(
            login.to_string(),
            User {
                id,
                login: login.to_string(),
                name: name.map(str::to_string),
            },
        );
    }

    /// Seed a PR as if someone other than the test had opened it.
    pub fn add_pull(&self, number: u64, title: &str, author: &str, head: &str) {
        self.pulls.lock().unwrap().push(PullRequest {
            number,
            title: title.to_string(),
            user: Some(Account {
                login: author.to_string(),
            }),
            head: BranchRef {
                name: head.to_string(),
            },
            html_url: String::new(),
        });
    }

    pub fn add_comment(&self, issue_number: u64, author: &str, body: &str) {
        let comment = Comment {
            id: self.next_id(),
            body: Some(body.to_string()),
            user: Some(Account {
                login: author.to_string(),
            }),
        };
        self.comments
            .lock()
            .unwrap()
            .entry(issue_number)
            .or_default()
            .push(comment);
    }

    pub fn comments_on(&self, issue_number: u64) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap()
            .get(&issue_number)
            .cloned()
            .unwrap_or_default()
    }

    pub fn branch_files(&self, branch: &str) -> BTreeMap<String, String> {
        self.branches
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl GitHub for MockGitHub {
    async fn list_pull_requests(&self, _state: &str) -> Result<Vec<PullRequest>, GitHubError> {
        Ok(self.pulls.lock().unwrap().clone())
    }

    async fn create_pull_request(&self, pr: &NewPullRequest) -> Result<PullRequest, GitHubError> {
        self.created_pulls.lock().unwrap().push(pr.clone());
        let created = PullRequest {
            number: self.next_id(),
            title: pr.title.clone(),
            user: Some(Account {
                login: self.bot_login.clone(),
            }),
            head: BranchRef {
                name: pr.head.clone(),
            },
            html_url: String::new(),
        };
        self.pulls.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<(), GitHubError> {
        self.added_labels
            .lock()
            .unwrap()
            .push((issue_number, labels.to_vec()));
        Ok(())
    }

    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, GitHubError> {
        Ok(self.comments_on(issue_number))
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<Comment, GitHubError> {
        let comment = Comment {
            id: self.next_id(),
            body: Some(body.to_string()),
            user: Some(Account {
                login: self.bot_login.clone(),
            }),
        };
        self.comments
            .lock()
            .unwrap()
            .entry(issue_number)
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubError> {
        self.comment_updates
            .lock()
            .unwrap()
            .push((comment_id, body.to_string()));
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .values_mut()
            .flatten()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| GitHubError::Status {
                method: "PATCH".to_string(),
                path: format!("/issues/comments/{comment_id}"),
                status: 404,
                body: "Not Found".to_string(),
            })?;
        comment.body = Some(body.to_string());
        Ok(comment.clone())
    }

    async fn get_user(&self, login: &str) -> Result<Option<User>, GitHubError> {
        Ok(self.users.lock().unwrap().get(login).cloned())
    }

    async fn push_commit(&self, commit: &CommitRequest) -> Result<String, GitHubError> {
        self.commits.lock().unwrap().push(commit.clone());
        let mut branches = self.branches.lock().unwrap();
        let base = branches
            .get(&commit.base)
            .cloned()
            .ok_or_else(|| GitHubError::MissingBranch(commit.base.clone()))?;
        let mut tree = match branches.get(&commit.head) {
            Some(existing) if !commit.fresh => existing.clone(),
            _ => base,
        };
        for file in &commit.files {
            tree.insert(file.path.clone(), file.content.clone());
        }
        branches.insert(commit.head.clone(), tree);
        Ok(format!("sha{}", self.commits.lock().unwrap().len()))
    }
}
