use crate::command_config::CommandConfigError;
use crate::command_grammar::{parse_comment_command, CommandAction};

/// Comment prefixes recognized when no configuration overrides them.
pub const DEFAULT_COMMAND_TRIGGERS: [&str; 2] = ["Derek ", "/"];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered, validated set of comment prefixes.
///
/// Built once at startup and shared read-only; earlier triggers win when more
/// than one could match the same body.
pub struct TriggerRegistry {
    triggers: Vec<String>,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self {
            triggers: DEFAULT_COMMAND_TRIGGERS
                .iter()
                .map(|trigger| trigger.to_string())
                .collect(),
        }
    }
}

impl TriggerRegistry {
    /// Rejects empty registries, blank triggers and duplicates.
    pub fn new<I, S>(triggers: I) -> Result<Self, CommandConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut validated: Vec<String> = Vec::new();
        for (index, trigger) in triggers.into_iter().enumerate() {
            let trigger = trigger.into();
            if trigger.trim().is_empty() {
                return Err(CommandConfigError::BlankTrigger { index });
            }
            if validated.contains(&trigger) {
                return Err(CommandConfigError::DuplicateTrigger { trigger });
            }
            validated.push(trigger);
        }
        if validated.is_empty() {
            return Err(CommandConfigError::EmptyTriggers);
        }
        Ok(Self {
            triggers: validated,
        })
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn parse(&self, body: &str) -> CommandAction {
        parse_comment_command(body, &self.triggers)
    }
}
