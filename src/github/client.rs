use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use super::types::{Comment, CommitRequest, NewPullRequest, PullRequest, RepoRef, User};
use super::{GitHub, GitHubError};
use crate::config::Config;

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("challenge-bot/", env!("CARGO_PKG_VERSION"));

/// [`GitHub`] over the REST API with a bearer token.
pub struct RestClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    repo: RepoRef,
}

#[derive(Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Deserialize)]
struct GitCommit {
    tree: GitObject,
}

#[derive(Serialize)]
struct TreeEntry<'a> {
    path: &'a str,
    mode: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
}

impl RestClient {
    pub fn new(config: &Config, repo: RepoRef) -> Result<RestClient, GitHubError> {
        let token = config.github_token().ok_or(GitHubError::MissingToken)?;
        Ok(RestClient {
            http: reqwest::Client::new(),
            api_url: config.api_url().to_string(),
            token,
            repo,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_url, path))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("/repos/{}/{}{}", self.repo.owner, self.repo.repo, rest)
    }

    /// Send and decode, turning any non-success status into [`GitHubError::Status`]
    /// with the response body kept for the CI log.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, GitHubError> {
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Like [`RestClient::send`] for a GET, but a 404 is `None`.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, GitHubError> {
        match self.send(Method::GET, path, None).await {
            Ok(value) => Ok(Some(value)),
            Err(GitHubError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// GET every page of a list endpoint. `path` must already carry a query string.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();
        for page in 1.. {
            let batch: Vec<T> = self
                .send(
                    Method::GET,
                    &format!("{path}&per_page={PER_PAGE}&page={page}"),
                    None,
                )
                .await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
        }
        Ok(items)
    }

    async fn branch_head(&self, branch: &str) -> Result<Option<String>, GitHubError> {
        let git_ref: Option<GitRef> = self
            .get_optional(&self.repo_path(&format!("/git/ref/heads/{branch}")))
            .await?;
        Ok(git_ref.map(|r| r.object.sha))
    }
}

#[async_trait]
impl GitHub for RestClient {
    #[instrument(skip(self))]
    async fn list_pull_requests(&self, state: &str) -> Result<Vec<PullRequest>, GitHubError> {
        let pulls: Vec<PullRequest> = self
            .get_all(&self.repo_path(&format!("/pulls?state={state}")))
            .await?;
        debug!(count = pulls.len(), "listed pull requests");
        Ok(pulls)
    }

    #[instrument(skip(self, pr), fields(head = %pr.head))]
    async fn create_pull_request(&self, pr: &NewPullRequest) -> Result<PullRequest, GitHubError> {
        let body = json!(pr);
        let created: PullRequest = self
            .send(Method::POST, &self.repo_path("/pulls"), Some(&body))
            .await?;
        debug!(number = created.number, url = %created.html_url, "created pull request");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<(), GitHubError> {
        let body = json!({ "labels": labels });
        let _: serde_json::Value = self
            .send(
                Method::POST,
                &self.repo_path(&format!("/issues/{issue_number}/labels")),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_comments(&self, issue_number: u64) -> Result<Vec<Comment>, GitHubError> {
        self.get_all(&self.repo_path(&format!("/issues/{issue_number}/comments?sort=created")))
            .await
    }

    #[instrument(skip(self, body))]
    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<Comment, GitHubError> {
        let body = json!({ "body": body });
        self.send(
            Method::POST,
            &self.repo_path(&format!("/issues/{issue_number}/comments")),
            Some(&body),
        )
        .await
    }

    #[instrument(skip(self, body))]
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment, GitHubError> {
        let body = json!({ "body": body });
        self.send(
            Method::PATCH,
            &self.repo_path(&format!("/issues/comments/{comment_id}")),
            Some(&body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, login: &str) -> Result<Option<User>, GitHubError> {
        self.get_optional(&format!("/users/{login}")).await
    }

    #[instrument(
        skip(self, commit),
        fields(head = %commit.head, files = commit.files.len(), fresh = commit.fresh)
    )]
    async fn push_commit(&self, commit: &CommitRequest) -> Result<String, GitHubError> {
        let base_sha = self
            .branch_head(&commit.base)
            .await?
            .ok_or_else(|| GitHubError::MissingBranch(commit.base.clone()))?;
        let head_sha = self.branch_head(&commit.head).await?;

        let parent = match (&head_sha, commit.fresh) {
            (Some(sha), false) => sha.clone(),
            _ => base_sha,
        };
        debug!(parent = %parent, head_exists = head_sha.is_some(), "resolved commit parent");

        let parent_commit: GitCommit = self
            .send(
                Method::GET,
                &self.repo_path(&format!("/git/commits/{parent}")),
                None,
            )
            .await?;

        let entries: Vec<TreeEntry<'_>> = commit
            .files
            .iter()
            .map(|f| TreeEntry {
                path: &f.path,
                mode: "100644",
                kind: "blob",
                content: &f.content,
            })
            .collect();
        let tree_body = json!({ "base_tree": parent_commit.tree.sha, "tree": entries });
        let tree: GitObject = self
            .send(Method::POST, &self.repo_path("/git/trees"), Some(&tree_body))
            .await?;

        let commit_body = json!({
            "message": commit.message,
            "tree": tree.sha,
            "parents": [parent],
            "author": commit.author,
        });
        let created: GitObject = self
            .send(Method::POST, &self.repo_path("/git/commits"), Some(&commit_body))
            .await?;

        if head_sha.is_some() {
            let body = json!({ "sha": created.sha, "force": commit.fresh });
            let _: serde_json::Value = self
                .send(
                    Method::PATCH,
                    &self.repo_path(&format!("/git/refs/heads/{}", commit.head)),
                    Some(&body),
                )
                .await?;
        } else {
            let body = json!({
                "ref": format!("refs/heads/{}", commit.head),
                "sha": created.sha,
            });
            let _: serde_json::Value = self
                .send(Method::POST, &self.repo_path("/git/refs"), Some(&body))
                .await?;
        }

        debug!(sha = %created.sha, "branch updated");
        Ok(created.sha)
    }
}
