mod common;

use plait::str_utils;
use plait::Rope;

#[test]
fn char_at_matches_chars() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    let step = 997; // probe a spread of positions
    for (char_idx, ch) in text.chars().enumerate().step_by(step) {
        assert_eq!(r.char_at(char_idx), ch);
    }
    assert!(r.try_char_at(r.len_chars()).is_err());
}

#[test]
fn char_utf16_round_trip() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    for char_idx in (0..=r.len_chars()).step_by(1013) {
        let utf16_idx = r.char_to_utf16(char_idx);
        assert_eq!(utf16_idx, str_utils::char_to_utf16_idx(&text, char_idx));
        assert_eq!(r.utf16_to_char(utf16_idx), char_idx);
    }
    assert_eq!(r.char_to_utf16(r.len_chars()), r.len_utf16());
    assert_eq!(r.utf16_to_char(r.len_utf16()), r.len_chars());
}

#[test]
fn char_line_round_trip() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    for line_idx in (0..r.len_lines()).step_by(131) {
        let char_idx = r.line_to_char(line_idx);
        assert_eq!(char_idx, str_utils::line_to_char_idx(&text, line_idx));
        assert_eq!(r.char_to_line(char_idx), line_idx);
    }

    for char_idx in (0..=r.len_chars()).step_by(1013) {
        assert_eq!(
            r.char_to_line(char_idx),
            str_utils::char_to_line_idx(&text, char_idx)
        );
    }

    assert_eq!(r.line_to_char(0), 0);
    assert_eq!(r.line_to_char(r.len_lines()), r.len_chars());
}

#[test]
fn line_contents() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    let mut lines = text.split_inclusive(['\n']).flat_map(|piece| {
        // `split_inclusive` only understands LF; re-split the pieces on
        // lone CRs so the expectation covers all three break forms.
        let mut out = Vec::new();
        let mut rest = piece;
        while let Some(cr_idx) = rest.find('\r') {
            if rest[cr_idx + 1..].starts_with('\n') {
                out.push(&rest[..cr_idx + 2]);
                rest = &rest[cr_idx + 2..];
                debug_assert!(rest.is_empty());
                return out.into_iter();
            } else {
                out.push(&rest[..cr_idx + 1]);
                rest = &rest[cr_idx + 1..];
            }
        }
        out.push(rest);
        out.into_iter()
    });

    for line_idx in 0..r.len_lines() {
        let expected = lines.next().unwrap_or("");
        assert_eq!(r.line(line_idx), expected, "line {}", line_idx);
    }
}

#[test]
fn line_scenario() {
    let r = Rope::from_str("Hello\nWorld\n!");
    assert_eq!(r.len_lines(), 3);
    assert_eq!(r.line(1), "World\n");
    assert_eq!(r.line(2), "!");
}

#[test]
fn slice_scenario() {
    let r = Rope::from_str("Hello, 世界! 🌍");
    assert_eq!(r.slice(7, 9), "世界");
    assert_eq!(r.char_at(11), '🌍');
    assert_eq!(r.char_to_utf16(11), 11);
    assert_eq!(r.char_to_utf16(12), 13);
}

#[test]
fn slice_matches_string() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    let probes = [
        (0, 0),
        (0, 1),
        (0, r.len_chars()),
        (1000, 1000),
        (1000, 35_000),
        (r.len_chars() - 1, r.len_chars()),
    ];
    for (start, end) in probes {
        let s = r.slice(start, end);
        assert_eq!(s.to_string(), common::string_slice(&text, start, end));
        s.assert_invariants();
    }
}

#[test]
fn lines_iterator_matches_line() {
    let text = common::medium_text();
    let r = Rope::from_str(&text);

    let mut joined = String::new();
    let mut count = 0;
    for line in r.lines() {
        joined.push_str(&line.to_string());
        count += 1;
    }
    assert_eq!(count, r.len_lines());
    assert_eq!(joined, text);
}
