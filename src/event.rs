use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::github::RepoRef;
use crate::issue::Issue;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Failed to read event payload: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Event payload has no issue")]
    MissingIssue,

    #[error("Event payload has no repository and none was given")]
    MissingRepository,
}

/// The parts of an `issues` / `issue_comment` webhook payload the bot reads.
#[derive(Debug, Deserialize)]
struct Payload {
    issue: Option<IssuePayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct IssuePayload {
    number: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelPayload>,
    user: LoginPayload,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: LoginPayload,
}

/// What a trigger hands to the workflow.
#[derive(Debug, Clone)]
pub struct Event {
    pub issue: Issue,
    pub repo: RepoRef,
}

/// Read the payload GitHub Actions writes to GITHUB_EVENT_PATH.
///
/// `repo_override` wins over the payload's repository.
pub fn load(path: &Path, repo_override: Option<RepoRef>) -> Result<Event, EventError> {
    let contents = fs::read_to_string(path)?;
    parse(&contents, repo_override)
}

pub fn parse(json: &str, repo_override: Option<RepoRef>) -> Result<Event, EventError> {
    let payload: Payload = serde_json::from_str(json)?;
    let issue = payload.issue.ok_or(EventError::MissingIssue)?;

    let repo = match repo_override {
        Some(repo) => repo,
        None => {
            let repository = payload.repository.ok_or(EventError::MissingRepository)?;
            RepoRef {
                owner: repository.owner.login,
                repo: repository.name,
            }
        }
    };

    Ok(Event {
        issue: Issue {
            number: issue.number,
            body: issue.body.unwrap_or_default(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            author: issue.user.login,
        },
        repo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r###"{
        "action": "labeled",
        "issue": {
            "number": 42,
            "title": "Pick",
            "body": "## Info\n...",
            "labels": [{"id": 1, "name": "new-challenge"}, {"id": 2, "name": "zh-CN"}],
            "user": {"login": "alice", "id": 7}
        },
        "repository": {"name": "challenges", "owner": {"login": "org"}}
    }"###;

    #[test]
    fn test_parse_payload() {
        let event = parse(PAYLOAD, None).unwrap();
        assert_eq!(event.issue.number, 42);
        assert_eq!(event.issue.author, "alice");
        assert_eq!(event.issue.labels, vec!["new-challenge", "zh-CN"]);
        assert_eq!(event.issue.body, "## Info\n...");
        assert_eq!(event.repo.to_string(), "org/challenges");
    }

    #[test]
    fn test_parse_null_body_and_override() {
        let json = r#"{"issue": {"number": 1, "body": null, "user": {"login": "bob"}}}"#;
        assert!(matches!(parse(json, None), Err(EventError::MissingRepository)));

        let repo = RepoRef::parse("o/r");
        let event = parse(json, repo).unwrap();
        assert_eq!(event.issue.body, "");
        assert!(event.issue.labels.is_empty());
        assert_eq!(event.repo.repo, "r");
    }

    #[test]
    fn test_parse_without_issue() {
        let json = r#"{"repository": {"name": "r", "owner": {"login": "o"}}}"#;
        assert!(matches!(parse(json, None), Err(EventError::MissingIssue)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();
        let event = load(file.path(), None).unwrap();
        assert_eq!(event.issue.number, 42);
    }
}
