#![no_main]

use derek_commands::{
    extract_command_value, parse_comment_command, ActionKind, COMMAND_GRAMMAR,
    DEFAULT_COMMAND_TRIGGERS,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = String::from_utf8_lossy(data);
    let action = parse_comment_command(&body, &DEFAULT_COMMAND_TRIGGERS);

    if action.kind == ActionKind::Unset {
        assert!(action.value.is_empty());
        return;
    }
    assert!(!action.value.contains('\n'));
    assert_eq!(extract_command_value(&action.value, 0), action.value);
    assert!(DEFAULT_COMMAND_TRIGGERS.iter().any(|trigger| {
        COMMAND_GRAMMAR.iter().any(|entry| {
            entry.kind == action.kind && body.starts_with(&format!("{trigger}{}", entry.keyword))
        })
    }));
});
