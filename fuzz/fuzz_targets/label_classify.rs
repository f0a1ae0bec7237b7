#![no_main]

use derek_commands::{apply_label_limit, classify_labels, split_requested_labels, ActionKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let current = ["bug", "Docs", "no-dco"];
    for action in [ActionKind::AddLabel, ActionKind::RemoveLabel] {
        let result = classify_labels(&current, action, &raw);
        let requested = split_requested_labels(&raw);
        assert_eq!(
            result.actionable.len() + result.unactionable.len(),
            requested.len()
        );
        assert!(result.actionable.iter().all(|label| !label.is_empty()));

        let split = apply_label_limit(result.actionable.clone(), 5);
        assert!(split.kept.len() <= 5);
        assert_eq!(split.kept.len() + split.dropped.len(), result.actionable.len());
    }
});
