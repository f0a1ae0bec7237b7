use serde::{Deserialize, Serialize};

use crate::command_grammar::ActionKind;
use crate::command_guard::{label_action_necessary, label_found};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Requested labels partitioned by whether the request would change anything.
pub struct ClassificationResult {
    pub actionable: Vec<String>,
    pub unactionable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Actionable labels split at the configured limit.
pub struct LabelLimitSplit {
    pub kept: Vec<String>,
    pub dropped: Vec<String>,
}

/// Splits a comma-separated label argument, dropping blank items.
pub fn split_requested_labels(raw_value: &str) -> Vec<&str> {
    raw_value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Classifies each requested label against the current labels.
///
/// Order of appearance in `raw_value` is preserved in both lists. Any kind
/// other than `AddLabel`/`RemoveLabel` classifies everything as unactionable.
pub fn classify_labels<S: AsRef<str>>(
    current_labels: &[S],
    action: ActionKind,
    raw_value: &str,
) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    for requested in split_requested_labels(raw_value) {
        let found = label_found(current_labels.iter().map(|label| label.as_ref()), requested);
        if label_action_necessary(found, action) {
            result.actionable.push(requested.to_string());
        } else {
            result.unactionable.push(requested.to_string());
        }
    }
    result
}

/// Keeps the first `limit` actionable labels and reports the rest.
pub fn apply_label_limit(actionable: Vec<String>, limit: usize) -> LabelLimitSplit {
    let mut kept = actionable;
    let dropped = if kept.len() > limit {
        kept.split_off(limit)
    } else {
        Vec::new()
    };
    LabelLimitSplit { kept, dropped }
}
