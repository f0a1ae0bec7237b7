use serde::{Deserialize, Serialize};

use crate::command_grammar::ActionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Open/closed state of an issue or pull request.
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Maps a GitHub `state` field. Anything other than `closed` is open.
    pub fn from_github_state(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("closed") {
            Self::Closed
        } else {
            Self::Open
        }
    }
}

/// Toggle guard: true when `requested` moves the resource out of its current
/// condition.
pub fn is_action_necessary(
    current_state: bool,
    requested: ActionKind,
    start: ActionKind,
    stop: ActionKind,
) -> bool {
    (!current_state && requested == start) || (current_state && requested == stop)
}

/// Returns the target state for a close/reopen request, or `None` when the
/// request is a self-transition or not a state command at all.
pub fn check_transition(requested: ActionKind, current: IssueState) -> Option<IssueState> {
    match (requested, current) {
        (ActionKind::Close, IssueState::Open) => Some(IssueState::Closed),
        (ActionKind::Reopen, IssueState::Closed) => Some(IssueState::Open),
        _ => None,
    }
}

/// Case-insensitive label lookup.
pub fn label_found<'a>(current_labels: impl IntoIterator<Item = &'a str>, label: &str) -> bool {
    let wanted = label.to_lowercase();
    current_labels
        .into_iter()
        .any(|current| current.to_lowercase() == wanted)
}

pub fn label_action_necessary(found: bool, requested: ActionKind) -> bool {
    is_action_necessary(found, requested, ActionKind::AddLabel, ActionKind::RemoveLabel)
}

pub fn lock_action_necessary(locked: bool, requested: ActionKind) -> bool {
    is_action_necessary(locked, requested, ActionKind::Lock, ActionKind::Unlock)
}

/// Milestone titles compare case-sensitively; no milestone compares as "".
pub fn milestone_change_needed(current: Option<&str>, requested: &str) -> bool {
    current.unwrap_or_default() != requested
}

pub fn title_change_needed(current: &str, requested: &str) -> bool {
    !requested.is_empty() && requested != current
}

#[cfg(test)]
mod tests {
    use super::{
        check_transition, is_action_necessary, label_action_necessary, label_found,
        lock_action_necessary, milestone_change_needed, title_change_needed, IssueState,
    };
    use crate::command_grammar::ActionKind;

    #[test]
    fn unit_is_action_necessary_for_lock_toggle() {
        assert!(is_action_necessary(
            false,
            ActionKind::Lock,
            ActionKind::Lock,
            ActionKind::Unlock
        ));
        assert!(!is_action_necessary(
            true,
            ActionKind::Lock,
            ActionKind::Lock,
            ActionKind::Unlock
        ));
        assert!(lock_action_necessary(true, ActionKind::Unlock));
        assert!(!lock_action_necessary(false, ActionKind::Unlock));
    }

    #[test]
    fn unit_is_action_necessary_rejects_unrelated_kinds() {
        assert!(!lock_action_necessary(false, ActionKind::Close));
        assert!(!lock_action_necessary(true, ActionKind::Close));
    }

    #[test]
    fn functional_check_transition_refuses_self_transitions() {
        assert_eq!(check_transition(ActionKind::Close, IssueState::Closed), None);
        assert_eq!(
            check_transition(ActionKind::Close, IssueState::Open),
            Some(IssueState::Closed)
        );
        assert_eq!(check_transition(ActionKind::Reopen, IssueState::Open), None);
        assert_eq!(
            check_transition(ActionKind::Reopen, IssueState::Closed),
            Some(IssueState::Open)
        );
        assert_eq!(check_transition(ActionKind::Lock, IssueState::Open), None);
    }

    #[test]
    fn functional_label_guard_is_case_insensitive() {
        let labels = ["Bug", "help wanted"];
        assert!(label_found(labels, "bug"));
        assert!(label_found(labels, "HELP WANTED"));
        assert!(!label_found(labels, "enhancement"));
        assert!(!label_action_necessary(true, ActionKind::AddLabel));
        assert!(label_action_necessary(false, ActionKind::AddLabel));
        assert!(label_action_necessary(true, ActionKind::RemoveLabel));
        assert!(!label_action_necessary(false, ActionKind::RemoveLabel));
    }

    #[test]
    fn integration_milestone_and_title_guards() {
        assert!(milestone_change_needed(Some("v1"), "v2"));
        assert!(milestone_change_needed(Some("v1"), "V1"));
        assert!(!milestone_change_needed(Some("v1"), "v1"));
        assert!(milestone_change_needed(None, "v1"));
        assert!(!milestone_change_needed(None, ""));

        assert!(title_change_needed("Old", "New"));
        assert!(!title_change_needed("Same", "Same"));
        assert!(!title_change_needed("Old", ""));
    }

    #[test]
    fn regression_issue_state_from_github_state_defaults_to_open() {
        assert_eq!(IssueState::from_github_state("closed"), IssueState::Closed);
        assert_eq!(IssueState::from_github_state(" CLOSED "), IssueState::Closed);
        assert_eq!(IssueState::from_github_state("open"), IssueState::Open);
        assert_eq!(IssueState::from_github_state(""), IssueState::Open);
    }
}
