use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command_guard::{label_found, IssueState};

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Label entry as delivered in GitHub issue payloads.
pub struct GithubIssueLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Milestone entry as delivered in GitHub issue payloads.
pub struct GithubMilestone {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Subset of the GitHub issue payload the interpreter reads.
pub struct GithubIssue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: Vec<GithubIssueLabel>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub milestone: Option<GithubMilestone>,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Read-only view of the issue state the guards evaluate against.
pub struct IssueSnapshot {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub state: IssueState,
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub is_pull_request: bool,
}

impl IssueSnapshot {
    pub fn has_label(&self, label: &str) -> bool {
        label_found(self.labels.iter().map(String::as_str), label)
    }

    pub fn milestone_title(&self) -> Option<&str> {
        self.milestone.as_deref()
    }
}

impl From<GithubIssue> for IssueSnapshot {
    fn from(issue: GithubIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            locked: issue.locked,
            state: IssueState::from_github_state(&issue.state),
            milestone: issue
                .milestone
                .map(|milestone| milestone.title)
                .filter(|title| !title.is_empty()),
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}
