use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command_value::extract_command_value;

/// Keyword suffix that requires an argument to follow.
pub const ARGUMENT_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Enumerates every command kind the interpreter can recognize.
pub enum ActionKind {
    #[default]
    Unset,
    AddLabel,
    RemoveLabel,
    Assign,
    Unassign,
    Close,
    Reopen,
    SetTitle,
    Lock,
    Unlock,
    SetMilestone,
    RemoveMilestone,
    AssignReviewer,
    UnassignReviewer,
    Message,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "Unset",
            Self::AddLabel => "AddLabel",
            Self::RemoveLabel => "RemoveLabel",
            Self::Assign => "Assign",
            Self::Unassign => "Unassign",
            Self::Close => "Close",
            Self::Reopen => "Reopen",
            Self::SetTitle => "SetTitle",
            Self::Lock => "Lock",
            Self::Unlock => "Unlock",
            Self::SetMilestone => "SetMilestone",
            Self::RemoveMilestone => "RemoveMilestone",
            Self::AssignReviewer => "AssignReviewer",
            Self::UnassignReviewer => "UnassignReviewer",
            Self::Message => "Message",
        }
    }

    /// Lowercase verb used in user-facing feedback ("add", "unlock", ...).
    pub fn verb(self) -> &'static str {
        match self {
            Self::Unset => "run",
            Self::AddLabel => "add",
            Self::RemoveLabel => "remove",
            Self::Assign => "assign",
            Self::Unassign => "unassign",
            Self::Close => "close",
            Self::Reopen => "reopen",
            Self::SetTitle => "set title",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::SetMilestone => "set",
            Self::RemoveMilestone => "remove",
            Self::AssignReviewer => "request review from",
            Self::UnassignReviewer => "clear review request for",
            Self::Message => "post message",
        }
    }

    pub fn is_set(self) -> bool {
        self != Self::Unset
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One keyword row of the grammar table.
pub struct GrammarEntry {
    pub keyword: &'static str,
    pub kind: ActionKind,
}

impl GrammarEntry {
    const fn new(keyword: &'static str, kind: ActionKind) -> Self {
        Self { keyword, kind }
    }
}

/// Keyword table, tested in this order for every trigger.
pub const COMMAND_GRAMMAR: &[GrammarEntry] = &[
    GrammarEntry::new("add label: ", ActionKind::AddLabel),
    GrammarEntry::new("add labels: ", ActionKind::AddLabel),
    GrammarEntry::new("remove label: ", ActionKind::RemoveLabel),
    GrammarEntry::new("remove labels: ", ActionKind::RemoveLabel),
    GrammarEntry::new("assign: ", ActionKind::Assign),
    GrammarEntry::new("unassign: ", ActionKind::Unassign),
    GrammarEntry::new("close", ActionKind::Close),
    GrammarEntry::new("reopen", ActionKind::Reopen),
    GrammarEntry::new("set title: ", ActionKind::SetTitle),
    GrammarEntry::new("edit title: ", ActionKind::SetTitle),
    GrammarEntry::new("lock", ActionKind::Lock),
    GrammarEntry::new("unlock", ActionKind::Unlock),
    GrammarEntry::new("set milestone: ", ActionKind::SetMilestone),
    GrammarEntry::new("remove milestone: ", ActionKind::RemoveMilestone),
    GrammarEntry::new("set reviewer: ", ActionKind::AssignReviewer),
    GrammarEntry::new("clear reviewer: ", ActionKind::UnassignReviewer),
    GrammarEntry::new("message: ", ActionKind::Message),
    GrammarEntry::new("msg: ", ActionKind::Message),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Parsed command kind and its normalized argument.
pub struct CommandAction {
    pub kind: ActionKind,
    pub value: String,
}

impl CommandAction {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.kind.is_set()
    }
}

/// Returns true when `body` invokes the full `command` (trigger + keyword).
///
/// A longer body must start with the command byte-for-byte. An exact match is
/// only accepted for bare keywords, so `"Derek set title: "` with nothing after
/// the separator is rejected rather than producing an empty title.
pub fn is_valid_command(body: &str, command: &str) -> bool {
    (body.len() > command.len() && body.starts_with(command))
        || (body == command && !command.ends_with(ARGUMENT_SEPARATOR))
}

/// Parses a comment body against each trigger and the grammar table.
///
/// Triggers are tried in registry order and keywords in `COMMAND_GRAMMAR`
/// order; the first match wins. Returns `ActionKind::Unset` when nothing
/// matches.
pub fn parse_comment_command<S: AsRef<str>>(body: &str, triggers: &[S]) -> CommandAction {
    let mut command = String::new();
    for trigger in triggers {
        let trigger = trigger.as_ref();
        for entry in COMMAND_GRAMMAR {
            command.clear();
            command.push_str(trigger);
            command.push_str(entry.keyword);
            if is_valid_command(body, &command) {
                let value = extract_command_value(body, command.len());
                debug!(
                    trigger,
                    keyword = entry.keyword,
                    kind = entry.kind.as_str(),
                    "comment command matched"
                );
                return CommandAction {
                    kind: entry.kind,
                    value,
                };
            }
        }
    }
    CommandAction::unset()
}
