/// Characters stripped from both ends of a command argument.
pub const COMMAND_VALUE_TRIM_CHARS: &[char] = &[' ', '\t', '.', ',', '\r', '\n'];

/// Returns the normalized argument that follows a matched command prefix.
///
/// Only the first line after the prefix is kept; arguments cannot span lines.
/// A `prefix_len` past the end of the body or inside a multi-byte character
/// yields an empty value.
pub fn extract_command_value(body: &str, prefix_len: usize) -> String {
    let remainder = body.get(prefix_len..).unwrap_or_default();
    let first_line = remainder.split('\n').next().unwrap_or_default();
    first_line.trim_matches(COMMAND_VALUE_TRIM_CHARS).to_string()
}
