use crate::command_dispatch::{CommandContext, DispatchPlan, LabelPlan, NoOpReason};
use crate::command_grammar::ActionKind;
use crate::issue_snapshot::IssueSnapshot;

fn render_label_feedback(plan: &LabelPlan, issue: u64, user: &str, lines: &mut Vec<String>) {
    let verb = plan.action.verb();
    lines.push(format!(
        "{user} wants to {verb} label(s) of '{}' on issue #{issue}.",
        plan.requested
    ));
    if !plan.unnecessary.is_empty() {
        lines.push(format!(
            "Request to {verb} label(s) of '{}' on issue #{issue} was unnecessary.",
            plan.unnecessary.join(", ")
        ));
    }
    if !plan.over_limit.is_empty() {
        lines.push(format!(
            "Label(s) '{}' on issue #{issue} were ignored as they fall outside of the configured limit of {}.",
            plan.over_limit.join(", "),
            plan.limit
        ));
    }
    for label in &plan.protected {
        lines.push(format!(
            "The request to remove `{label}` by {user} was not allowed - label can be removed by owner or by signing off the commit."
        ));
    }
    if plan.apply.is_empty() {
        lines.push(format!(
            "No further valid labels found - no action taken on issue #{issue}."
        ));
    } else {
        lines.push(format!(
            "Request to {verb} label(s) of '{}' on issue #{issue} was successfully completed.",
            plan.apply.join(", ")
        ));
    }
}

fn render_no_op(action: ActionKind, reason: NoOpReason, issue: u64, user: &str) -> String {
    match reason {
        NoOpReason::AlreadyApplied => match action {
            ActionKind::RemoveMilestone => {
                format!("Issue #{issue} has no milestone to remove.")
            }
            _ => format!("Issue #{issue} is already {}ed.", action.verb()),
        },
        NoOpReason::InvalidTransition => format!(
            "Request to {} issue #{issue} by {user} was invalid.",
            action.verb()
        ),
        NoOpReason::TitleUnchanged => format!(
            "Setting the title of #{issue} by {user} was unsuccessful as the new title was empty or unchanged."
        ),
        NoOpReason::MilestoneUnchanged => {
            format!("Setting the milestone of #{issue} by {user} was unnecessary.")
        }
        NoOpReason::MissingArgument => format!(
            "Request to {} on issue #{issue} by {user} is missing a value.",
            action.verb()
        ),
    }
}

/// Renders the user-facing summary for a planned command.
///
/// Describes what will be (or was not) done; it does not report collaborator
/// failures, which surface as errors from `dispatch_plan`.
pub fn render_command_feedback(
    body: &str,
    plan: &DispatchPlan,
    snapshot: &IssueSnapshot,
    context: &CommandContext,
) -> String {
    let issue = snapshot.number;
    let user = context.commenter_login.as_str();
    let mut lines = Vec::new();
    match plan {
        DispatchPlan::Unrecognized => {
            lines.push(format!("Unable to work with comment: {body}"));
        }
        DispatchPlan::NotPermitted { action, login } => lines.push(format!(
            "{login} is not permitted to {} on issue #{issue}.",
            action.verb()
        )),
        DispatchPlan::Labels(labels) => render_label_feedback(labels, issue, user, &mut lines),
        DispatchPlan::Assignment { action, login } => {
            let verb = action.verb();
            lines.push(format!(
                "{user} wants to {verb} user '{login}' on issue #{issue}."
            ));
            lines.push(format!("{login} {verb}ed successfully or already {verb}ed."));
        }
        DispatchPlan::State { action, .. } | DispatchPlan::Locking { action } => {
            let verb = action.verb();
            lines.push(format!("{user} wants to {verb} issue #{issue}."));
            lines.push(format!(
                "Request to {verb} issue #{issue} by {user} was successful."
            ));
        }
        DispatchPlan::Title { .. } => {
            lines.push(format!("{user} wants to set the title of issue #{issue}."));
            lines.push(format!(
                "Request to set the title of issue #{issue} by {user} was successful."
            ));
        }
        DispatchPlan::SetMilestone { title } => lines.push(format!(
            "Request to set milestone of '{title}' on issue #{issue} was successfully completed."
        )),
        DispatchPlan::RemoveMilestone { title } => lines.push(format!(
            "Request to remove milestone of '{title}' on issue #{issue} was successfully completed."
        )),
        DispatchPlan::Reviewer { action, login } => lines.push(format!(
            "{user} wants to {} '{login}' on pull request #{issue}.",
            action.verb()
        )),
        DispatchPlan::Message { name, .. } => {
            lines.push(format!(
                "{user} wants to add message of type '{name}' on issue #{issue}."
            ));
            lines.push(format!("Message '{name}' found."));
        }
        DispatchPlan::UnknownMessage { name } => {
            lines.push(format!("Message: `{name}` is not configured."));
        }
        DispatchPlan::NotPullRequest { action } => lines.push(format!(
            "Request to {} on #{issue} was ignored as it is not a pull request.",
            action.verb()
        )),
        DispatchPlan::NoOp { action, reason } => {
            lines.push(render_no_op(*action, *reason, issue, user));
        }
    }
    lines.join("\n")
}
