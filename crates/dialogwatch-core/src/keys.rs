//! Keystroke escaping for native input queues.

/// Characters with a special meaning to native send-keys input.
pub const SEND_KEYS_SPECIAL_CHARACTERS: [char; 10] =
    ['~', '%', '^', '+', '{', '}', '[', ']', '(', ')'];

/// Wrap every special character in braces so it is typed literally.
///
/// `"a~b"` becomes `"a{~}b"`; all other characters pass through unchanged.
pub fn escape_send_keys(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SEND_KEYS_SPECIAL_CHARACTERS.contains(&c) {
            escaped.push('{');
            escaped.push(c);
            escaped.push('}');
        } else {
            escaped.push(c);
        }
    }
    escaped
}
