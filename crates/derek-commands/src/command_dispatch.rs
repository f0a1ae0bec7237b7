use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::command_config::{CommandConfig, CommandConfigError};
use crate::command_grammar::{ActionKind, CommandAction};
use crate::command_guard::{
    check_transition, lock_action_necessary, milestone_change_needed, title_change_needed,
    IssueState,
};
use crate::command_trigger::TriggerRegistry;
use crate::issue_snapshot::IssueSnapshot;
use crate::label_classifier::{apply_label_limit, classify_labels};
use crate::repo_policy::{RepoCommandPolicy, COMMENTS_FEATURE};

/// Assignment value that resolves to the commenting user.
pub const SELF_ASSIGN_ALIAS: &str = "me";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Who issued the command.
pub struct CommandContext {
    pub commenter_login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Why a recognized command results in no mutation.
pub enum NoOpReason {
    AlreadyApplied,
    InvalidTransition,
    TitleUnchanged,
    MilestoneUnchanged,
    MissingArgument,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Label request after classification, cap and protection checks.
pub struct LabelPlan {
    pub action: ActionKind,
    pub requested: String,
    /// Labels handed to the collaborator.
    pub apply: Vec<String>,
    pub unnecessary: Vec<String>,
    pub over_limit: Vec<String>,
    pub protected: Vec<String>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
/// Pure description of the collaborator call a command maps to.
pub enum DispatchPlan {
    Unrecognized,
    NotPermitted { action: ActionKind, login: String },
    Labels(LabelPlan),
    Assignment { action: ActionKind, login: String },
    State { action: ActionKind, target: IssueState },
    Title { title: String },
    Locking { action: ActionKind },
    SetMilestone { title: String },
    RemoveMilestone { title: String },
    Reviewer { action: ActionKind, login: String },
    Message { name: String, body: String },
    UnknownMessage { name: String },
    NotPullRequest { action: ActionKind },
    NoOp { action: ActionKind, reason: NoOpReason },
}

impl DispatchPlan {
    pub fn action(&self) -> ActionKind {
        match self {
            Self::Unrecognized => ActionKind::Unset,
            Self::NotPermitted { action, .. }
            | Self::Assignment { action, .. }
            | Self::State { action, .. }
            | Self::Locking { action }
            | Self::Reviewer { action, .. }
            | Self::NotPullRequest { action }
            | Self::NoOp { action, .. } => *action,
            Self::Labels(plan) => plan.action,
            Self::Title { .. } => ActionKind::SetTitle,
            Self::SetMilestone { .. } => ActionKind::SetMilestone,
            Self::RemoveMilestone { .. } => ActionKind::RemoveMilestone,
            Self::Message { .. } | Self::UnknownMessage { .. } => ActionKind::Message,
        }
    }

    /// True when dispatching this plan calls into the collaborator.
    pub fn invokes_collaborator(&self) -> bool {
        match self {
            Self::Labels(plan) => !plan.apply.is_empty(),
            Self::Assignment { .. }
            | Self::State { .. }
            | Self::Title { .. }
            | Self::Locking { .. }
            | Self::SetMilestone { .. }
            | Self::RemoveMilestone { .. }
            | Self::Reviewer { .. }
            | Self::Message { .. } => true,
            Self::Unrecognized
            | Self::NotPermitted { .. }
            | Self::UnknownMessage { .. }
            | Self::NotPullRequest { .. }
            | Self::NoOp { .. } => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Applied,
    Skipped,
}

/// Repository mutations performed on behalf of a comment command.
///
/// Implemented outside this crate on top of the hosting API client. Each call
/// targets the issue the command was posted on.
#[async_trait]
pub trait IssueCommandHandler: Send + Sync {
    async fn add_labels(&self, labels: &[String]) -> Result<()>;
    async fn remove_label(&self, label: &str) -> Result<()>;
    async fn add_assignee(&self, login: &str) -> Result<()>;
    async fn remove_assignee(&self, login: &str) -> Result<()>;
    async fn set_state(&self, state: IssueState) -> Result<()>;
    async fn set_title(&self, title: &str) -> Result<()>;
    async fn lock(&self) -> Result<()>;
    async fn unlock(&self) -> Result<()>;
    async fn set_milestone(&self, title: &str) -> Result<()>;
    async fn remove_milestone(&self) -> Result<()>;
    async fn request_reviewer(&self, login: &str) -> Result<()>;
    async fn remove_reviewer(&self, login: &str) -> Result<()>;
    async fn post_comment(&self, body: &str) -> Result<()>;
}

fn no_op(action: ActionKind, reason: NoOpReason) -> DispatchPlan {
    DispatchPlan::NoOp { action, reason }
}

fn plan_labels(
    action: &CommandAction,
    snapshot: &IssueSnapshot,
    config: &CommandConfig,
) -> DispatchPlan {
    let classification = classify_labels(&snapshot.labels, action.kind, &action.value);
    let split = apply_label_limit(classification.actionable, config.multilabel_limit);
    let (protected, apply): (Vec<String>, Vec<String>) = if action.kind == ActionKind::RemoveLabel
    {
        split
            .kept
            .into_iter()
            .partition(|label| config.is_protected_label(label))
    } else {
        (Vec::new(), split.kept)
    };
    if !protected.is_empty() {
        warn!(
            issue = snapshot.number,
            labels = protected.join(", ").as_str(),
            "refusing to remove protected labels"
        );
    }
    DispatchPlan::Labels(LabelPlan {
        action: action.kind,
        requested: action.value.clone(),
        apply,
        unnecessary: classification.unactionable,
        over_limit: split.dropped,
        protected,
        limit: config.multilabel_limit,
    })
}

fn resolve_login(value: &str, context: &CommandContext) -> String {
    if value == SELF_ASSIGN_ALIAS {
        context.commenter_login.clone()
    } else {
        value.to_string()
    }
}

/// Maps a parsed command onto the collaborator call it requires.
///
/// Guards and label classification run here, so every argument in the
/// returned plan is already normalized. When `policy` is supplied the
/// commenter must be a maintainer and the `comments` feature must be enabled.
pub fn plan_command(
    action: &CommandAction,
    snapshot: &IssueSnapshot,
    context: &CommandContext,
    config: &CommandConfig,
    policy: Option<&RepoCommandPolicy>,
) -> DispatchPlan {
    let kind = action.kind;
    if !kind.is_set() {
        return DispatchPlan::Unrecognized;
    }
    if let Some(policy) = policy {
        if !policy.permits_user(COMMENTS_FEATURE, &context.commenter_login) {
            return DispatchPlan::NotPermitted {
                action: kind,
                login: context.commenter_login.clone(),
            };
        }
    }

    match kind {
        ActionKind::Unset => DispatchPlan::Unrecognized,
        ActionKind::AddLabel | ActionKind::RemoveLabel => plan_labels(action, snapshot, config),
        ActionKind::Assign | ActionKind::Unassign => {
            let login = resolve_login(&action.value, context);
            if login.is_empty() {
                return no_op(kind, NoOpReason::MissingArgument);
            }
            DispatchPlan::Assignment {
                action: kind,
                login,
            }
        }
        ActionKind::Close | ActionKind::Reopen => match check_transition(kind, snapshot.state) {
            Some(target) => DispatchPlan::State {
                action: kind,
                target,
            },
            None => no_op(kind, NoOpReason::InvalidTransition),
        },
        ActionKind::SetTitle => {
            if title_change_needed(&snapshot.title, &action.value) {
                DispatchPlan::Title {
                    title: action.value.clone(),
                }
            } else {
                no_op(kind, NoOpReason::TitleUnchanged)
            }
        }
        ActionKind::Lock | ActionKind::Unlock => {
            if lock_action_necessary(snapshot.locked, kind) {
                DispatchPlan::Locking { action: kind }
            } else {
                no_op(kind, NoOpReason::AlreadyApplied)
            }
        }
        ActionKind::SetMilestone => {
            if action.value.is_empty() {
                return no_op(kind, NoOpReason::MissingArgument);
            }
            if milestone_change_needed(snapshot.milestone_title(), &action.value) {
                DispatchPlan::SetMilestone {
                    title: action.value.clone(),
                }
            } else {
                no_op(kind, NoOpReason::MilestoneUnchanged)
            }
        }
        ActionKind::RemoveMilestone => match snapshot.milestone_title() {
            Some(title) => DispatchPlan::RemoveMilestone {
                title: title.to_string(),
            },
            None => no_op(kind, NoOpReason::AlreadyApplied),
        },
        ActionKind::AssignReviewer | ActionKind::UnassignReviewer => {
            if !snapshot.is_pull_request {
                return DispatchPlan::NotPullRequest { action: kind };
            }
            let login = resolve_login(&action.value, context);
            if login.is_empty() {
                return no_op(kind, NoOpReason::MissingArgument);
            }
            DispatchPlan::Reviewer {
                action: kind,
                login,
            }
        }
        ActionKind::Message => {
            if action.value.is_empty() {
                return no_op(kind, NoOpReason::MissingArgument);
            }
            match policy.and_then(|policy| policy.message_body(&action.value)) {
                Some(body) => DispatchPlan::Message {
                    name: action.value.clone(),
                    body: body.to_string(),
                },
                None => DispatchPlan::UnknownMessage {
                    name: action.value.clone(),
                },
            }
        }
    }
}

/// Invokes the collaborator method named by `plan`.
///
/// Plans that need no mutation return `Skipped` without touching `handler`.
pub async fn dispatch_plan(
    plan: &DispatchPlan,
    handler: &dyn IssueCommandHandler,
) -> Result<DispatchOutcome> {
    if !plan.invokes_collaborator() {
        return Ok(DispatchOutcome::Skipped);
    }
    info!(action = plan.action().as_str(), "dispatching comment command");
    match plan {
        DispatchPlan::Labels(labels) => {
            if labels.action == ActionKind::AddLabel {
                let joined = labels.apply.join(", ");
                handler
                    .add_labels(&labels.apply)
                    .await
                    .with_context(|| format!("failed to add labels '{joined}'"))?;
            } else {
                for label in &labels.apply {
                    handler
                        .remove_label(label)
                        .await
                        .with_context(|| format!("failed to remove label '{label}'"))?;
                }
            }
        }
        DispatchPlan::Assignment { action, login } => {
            if *action == ActionKind::Unassign {
                handler
                    .remove_assignee(login)
                    .await
                    .with_context(|| format!("failed to unassign '{login}'"))?;
            } else {
                handler
                    .add_assignee(login)
                    .await
                    .with_context(|| format!("failed to assign '{login}'"))?;
            }
        }
        DispatchPlan::State { target, .. } => handler
            .set_state(*target)
            .await
            .with_context(|| format!("failed to set issue state to {}", target.as_str()))?,
        DispatchPlan::Title { title } => handler
            .set_title(title)
            .await
            .context("failed to set issue title")?,
        DispatchPlan::Locking { action } => {
            if *action == ActionKind::Lock {
                handler.lock().await.context("failed to lock issue")?;
            } else {
                handler.unlock().await.context("failed to unlock issue")?;
            }
        }
        DispatchPlan::SetMilestone { title } => handler
            .set_milestone(title)
            .await
            .with_context(|| format!("failed to set milestone '{title}'"))?,
        DispatchPlan::RemoveMilestone { .. } => handler
            .remove_milestone()
            .await
            .context("failed to remove milestone")?,
        DispatchPlan::Reviewer { action, login } => {
            if *action == ActionKind::UnassignReviewer {
                handler
                    .remove_reviewer(login)
                    .await
                    .with_context(|| format!("failed to clear reviewer '{login}'"))?;
            } else {
                handler
                    .request_reviewer(login)
                    .await
                    .with_context(|| format!("failed to request review from '{login}'"))?;
            }
        }
        DispatchPlan::Message { name, body } => handler
            .post_comment(body)
            .await
            .with_context(|| format!("failed to post message '{name}'"))?,
        DispatchPlan::Unrecognized
        | DispatchPlan::NotPermitted { .. }
        | DispatchPlan::UnknownMessage { .. }
        | DispatchPlan::NotPullRequest { .. }
        | DispatchPlan::NoOp { .. } => return Ok(DispatchOutcome::Skipped),
    }
    Ok(DispatchOutcome::Applied)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Parsed command together with its dispatch plan.
pub struct InterpretedCommand {
    pub action: CommandAction,
    pub plan: DispatchPlan,
}

#[derive(Debug, Clone)]
/// Immutable interpreter built once from `CommandConfig`.
pub struct CommandDispatcher {
    registry: TriggerRegistry,
    config: CommandConfig,
}

impl CommandDispatcher {
    pub fn new(config: CommandConfig) -> Result<Self, CommandConfigError> {
        config.validate()?;
        let registry = config.trigger_registry()?;
        Ok(Self { registry, config })
    }

    pub fn interpret(
        &self,
        body: &str,
        snapshot: &IssueSnapshot,
        context: &CommandContext,
        policy: Option<&RepoCommandPolicy>,
    ) -> InterpretedCommand {
        let action = self.registry.parse(body);
        let plan = plan_command(&action, snapshot, context, &self.config, policy);
        InterpretedCommand { action, plan }
    }

    pub async fn execute(
        &self,
        command: &InterpretedCommand,
        handler: &dyn IssueCommandHandler,
    ) -> Result<DispatchOutcome> {
        dispatch_plan(&command.plan, handler).await
    }
}
