//! Utility functions for utf8 string slices.
//!
//! These operate on plain `&str` in ways that agree exactly with the
//! equivalent rope-level operations, and may be useful when building
//! additional functionality on top of the rope.

pub use str_indices::chars::count as count_chars;
pub use str_indices::chars::from_byte_idx as byte_to_char_idx;
pub use str_indices::chars::to_byte_idx as char_to_byte_idx;
pub use str_indices::utf16::count as count_utf16;

// Determine which line implementation to use.
#[cfg(feature = "unicode_lines")]
use str_indices::lines;
#[cfg(not(feature = "unicode_lines"))]
use str_indices::lines_crlf as lines;

pub use self::lines::count_breaks as count_line_breaks;
pub(crate) use self::lines::from_byte_idx as byte_to_line_idx;
pub(crate) use self::lines::to_byte_idx as line_to_byte_idx;

/// Converts from char-index to utf16-code-unit-index in a string slice.
///
/// Any past-the-end index will return the utf16 length of the string.
///
/// Runs in O(N) time.
#[inline]
pub fn char_to_utf16_idx(text: &str, char_idx: usize) -> usize {
    str_indices::utf16::from_byte_idx(text, char_to_byte_idx(text, char_idx))
}

/// Converts from utf16-code-unit-index to char-index in a string slice.
///
/// An index that lands between the two code units of a surrogate pair
/// is snapped to the char containing it.  Any past-the-end index will
/// return the char length of the string.
///
/// Runs in O(N) time.
#[inline]
pub fn utf16_to_char_idx(text: &str, utf16_idx: usize) -> usize {
    byte_to_char_idx(text, str_indices::utf16::to_byte_idx(text, utf16_idx))
}

/// Converts from char-index to line-index in a string slice.
///
/// This is equivalent to counting the line breaks that end before the
/// given char.  Any past-the-end index will return the last line index.
///
/// Runs in O(N) time.
#[inline]
pub fn char_to_line_idx(text: &str, char_idx: usize) -> usize {
    byte_to_line_idx(text, char_to_byte_idx(text, char_idx))
}

/// Converts from line-index to char-index in a string slice.
///
/// More specifically, this returns the index of the first char of the
/// given line.  Any past-the-end index will return the one-past-the-end
/// char index.
///
/// Runs in O(N) time.
#[inline]
pub fn line_to_char_idx(text: &str, line_idx: usize) -> usize {
    byte_to_char_idx(text, line_to_byte_idx(text, line_idx))
}

//-------------------------------------------------------------

#[inline(always)]
pub(crate) fn starts_with_lf(text: &str) -> bool {
    text.as_bytes().first() == Some(&0x0A)
}

#[inline(always)]
pub(crate) fn ends_with_cr(text: &str) -> bool {
    text.as_bytes().last() == Some(&0x0D)
}

/// Returns the closest char boundary less than or equal to `byte_idx`.
///
/// For convenience, if `byte_idx > text.len()` this returns
/// `text.len()`.
#[inline]
pub(crate) fn floor_char_boundary(text: &str, mut byte_idx: usize) -> usize {
    if byte_idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(byte_idx) {
        byte_idx -= 1;
    }
    byte_idx
}

/// Returns the closest char boundary greater than or equal to
/// `byte_idx`, capped at `text.len()`.
#[inline]
pub(crate) fn ceil_char_boundary(text: &str, mut byte_idx: usize) -> usize {
    if byte_idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(byte_idx) {
        byte_idx += 1;
    }
    byte_idx
}

/// Whether a split of `text` at `byte_idx` would separate a CR from an
/// immediately following LF.
#[inline]
pub(crate) fn splits_crlf(text: &str, byte_idx: usize) -> bool {
    byte_idx > 0
        && byte_idx < text.len()
        && text.as_bytes()[byte_idx - 1] == 0x0D
        && text.as_bytes()[byte_idx] == 0x0A
}

/// Chooses a chunk boundary at or just after `target`: the boundary is
/// snapped forward to a char boundary, and then past the LF when it
/// would land inside a CRLF pair.
#[inline]
pub(crate) fn chunk_break_idx(text: &str, target: usize) -> usize {
    let mut idx = ceil_char_boundary(text, target);
    if splits_crlf(text, idx) {
        idx += 1;
    }
    idx
}

//======================================================================
