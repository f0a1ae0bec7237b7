use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use derek_commands::{GithubIssue, IssueSnapshot, RepoCommandPolicy};

/// Resolves the comment body from the flag, a file, or stdin, in that order.
pub(crate) fn read_comment_body(
    comment: Option<&str>,
    comment_file: Option<&Path>,
    stdin: &mut dyn Read,
) -> Result<String> {
    if let Some(comment) = comment {
        return Ok(comment.to_string());
    }
    if let Some(path) = comment_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read comment file {}", path.display()));
    }
    let mut body = String::new();
    stdin
        .read_to_string(&mut body)
        .context("failed to read comment body from stdin")?;
    Ok(body)
}

/// Loads a GitHub issue payload, or an empty open issue when `path` is `None`.
pub(crate) fn load_issue_snapshot(path: Option<&Path>) -> Result<IssueSnapshot> {
    let Some(path) = path else {
        return Ok(IssueSnapshot::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read issue snapshot {}", path.display()))?;
    let issue: GithubIssue = serde_json::from_str(&raw)
        .with_context(|| format!("invalid issue snapshot {}", path.display()))?;
    Ok(IssueSnapshot::from(issue))
}

pub(crate) fn load_repo_policy(path: Option<&Path>) -> Result<Option<RepoCommandPolicy>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read repository policy {}", path.display()))?;
    let policy = serde_json::from_str(&raw)
        .with_context(|| format!("invalid repository policy {}", path.display()))?;
    Ok(Some(policy))
}
