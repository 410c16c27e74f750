use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::locale::Locale;

/// The issue that triggered the run, as read from the event payload.
#[derive(Debug, Clone)]
pub struct Issue {
    pub number: u64,
    pub body: String,
    pub labels: Vec<String>,
    /// Login of the issue author
    pub author: String,
}

impl Issue {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn locale(&self) -> Locale {
        Locale::from_labels(&self.labels)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Warm,
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Warm => "warm",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        };
        f.write_str(s)
    }
}

/// Author block of `info.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Challenge metadata from the issue's yaml block.
///
/// `title` and `difficulty` are required; anything the schema does not name
/// (tags, related challenges, ...) is carried through to `info.yml` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// The four sections pulled out of an issue body. A section that could not be
/// found or parsed is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSubmission {
    pub info: Option<Info>,
    pub template: Option<String>,
    pub tests: Option<String>,
    pub question: Option<String>,
}

impl ParsedSubmission {
    /// Names of the sections that are missing, in body order.
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.info.is_none() {
            missing.push("info");
        }
        if self.template.is_none() {
            missing.push("template");
        }
        if self.tests.is_none() {
            missing.push("tests");
        }
        if self.question.is_none() {
            missing.push("question");
        }
        missing
    }

    /// Validity gate: `Some` only when every section is present.
    pub fn into_submission(self) -> Option<Submission> {
        Some(Submission {
            info: self.info?,
            template: self.template?,
            tests: self.tests?,
            question: self.question?,
        })
    }
}

/// A submission that passed the validity gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub info: Info,
    pub template: String,
    pub tests: String,
    pub question: String,
}
