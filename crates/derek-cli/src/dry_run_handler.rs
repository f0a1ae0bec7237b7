use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use derek_commands::{IssueCommandHandler, IssueState};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One mutation the dry run would have performed.
pub(crate) struct PlannedCall {
    pub(crate) method: &'static str,
    pub(crate) argument: Option<String>,
}

/// Collaborator that records calls instead of mutating a repository.
#[derive(Debug, Default)]
pub(crate) struct DryRunHandler {
    calls: Mutex<Vec<PlannedCall>>,
}

impl DryRunHandler {
    fn record(&self, method: &'static str, argument: Option<String>) -> Result<()> {
        info!(
            method,
            argument = argument.as_deref().unwrap_or_default(),
            "dry-run mutation"
        );
        self.calls
            .lock()
            .map_err(|_| anyhow!("dry-run call log poisoned"))?
            .push(PlannedCall { method, argument });
        Ok(())
    }

    pub(crate) fn into_calls(self) -> Vec<PlannedCall> {
        self.calls
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IssueCommandHandler for DryRunHandler {
    async fn add_labels(&self, labels: &[String]) -> Result<()> {
        self.record("add_labels", Some(labels.join(", ")))
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        self.record("remove_label", Some(label.to_string()))
    }

    async fn add_assignee(&self, login: &str) -> Result<()> {
        self.record("add_assignee", Some(login.to_string()))
    }

    async fn remove_assignee(&self, login: &str) -> Result<()> {
        self.record("remove_assignee", Some(login.to_string()))
    }

    async fn set_state(&self, state: IssueState) -> Result<()> {
        self.record("set_state", Some(state.as_str().to_string()))
    }

    async fn set_title(&self, title: &str) -> Result<()> {
        self.record("set_title", Some(title.to_string()))
    }

    async fn lock(&self) -> Result<()> {
        self.record("lock", None)
    }

    async fn unlock(&self) -> Result<()> {
        self.record("unlock", None)
    }

    async fn set_milestone(&self, title: &str) -> Result<()> {
        self.record("set_milestone", Some(title.to_string()))
    }

    async fn remove_milestone(&self) -> Result<()> {
        self.record("remove_milestone", None)
    }

    async fn request_reviewer(&self, login: &str) -> Result<()> {
        self.record("request_reviewer", Some(login.to_string()))
    }

    async fn remove_reviewer(&self, login: &str) -> Result<()> {
        self.record("remove_reviewer", Some(login.to_string()))
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        self.record("post_comment", Some(body.to_string()))
    }
}
