#![allow(dead_code)]

/// Builds a text large enough to produce a tree several levels deep,
/// mixing ascii, multi-byte chars, supplementary-plane chars, and all
/// three line break forms.
pub fn medium_text() -> String {
    let mut text = String::new();
    for i in 0..1000 {
        text.push_str("Hello there!  How're you doing?\r\n");
        text.push_str("It's a fine day, isn't it?\n");
        text.push_str("Aren't you glad we're alive?\r");
        text.push_str("こんにちは、みんなさん！🌍\n");
        text.push_str(&format!("paragraph {}\n", i));
    }
    text
}

/// A prefix of `text` of at most `max_bytes` bytes, trimmed back to a
/// char boundary.
pub fn byte_prefix(text: &str, mut max_bytes: usize) -> &str {
    if max_bytes >= text.len() {
        return text;
    }
    while !text.is_char_boundary(max_bytes) {
        max_bytes -= 1;
    }
    &text[..max_bytes]
}

/// Char-indexed equivalents of `String` editing, used as the model
/// implementation the rope is checked against.
pub fn string_insert(text: &mut String, char_idx: usize, ins: &str) {
    let byte_idx = plait::str_utils::char_to_byte_idx(text, char_idx);
    text.insert_str(byte_idx, ins);
}

pub fn string_remove(text: &mut String, char_start: usize, char_end: usize) {
    let byte_start = plait::str_utils::char_to_byte_idx(text, char_start);
    let byte_end = plait::str_utils::char_to_byte_idx(text, char_end);
    text.replace_range(byte_start..byte_end, "");
}

pub fn string_slice(text: &str, char_start: usize, char_end: usize) -> String {
    let byte_start = plait::str_utils::char_to_byte_idx(text, char_start);
    let byte_end = plait::str_utils::char_to_byte_idx(text, char_end);
    text[byte_start..byte_end].to_string()
}
