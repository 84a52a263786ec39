mod common;

use plait::str_utils;
use plait::Rope;

#[test]
fn from_str_roundtrip() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    assert_eq!(r, text.as_str());
    assert_eq!(r.to_string(), text);
    r.assert_invariants();
}

#[test]
fn from_str_metrics() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    assert_eq!(r.len_chars(), str_utils::count_chars(&text));
    assert_eq!(r.len_utf16(), str_utils::count_utf16(&text));
    assert_eq!(r.len_lines(), str_utils::count_line_breaks(&text) + 1);
    assert_eq!(r.len_utf16(), text.encode_utf16().count());
}

#[test]
fn from_str_empty() {
    let r = Rope::from_str("");
    assert_eq!(r, "");
    assert_eq!(r.len_chars(), 0);
    assert_eq!(r.len_lines(), 1);
    assert!(r.is_empty());
    r.assert_invariants();
}

#[test]
fn from_str_small() {
    // Hello-world scale: a single-leaf rope.
    let r = Rope::from_str("Hello, World!");
    assert_eq!(r.len_chars(), 13);
    assert_eq!(r.to_string(), "Hello, World!");
    r.assert_invariants();
}

#[test]
fn from_str_multibyte() {
    let r = Rope::from_str("Hello, 世界!");
    assert_eq!(r.len_chars(), 10);
    assert_eq!(r.len_utf16(), 10);
    assert_eq!(r.char_at(7), '世');
    assert_eq!(char::from_u32(0x4E16), Some('世'));
}

#[test]
fn from_conversions() {
    let text = "Short bit of text.";
    assert_eq!(Rope::from(text), text);
    assert_eq!(Rope::from(String::from(text)), text);
    assert_eq!(String::from(&Rope::from_str(text)), text);
}
