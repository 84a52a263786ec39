use crate::str_utils;

/// Summary of a span of text: all of the cached metrics the tree needs
/// to translate between coordinate systems.
///
/// `TextInfo` is combined with `concat()`, which behaves as if the two
/// summarized spans were concatenated.  The `starts_with_lf` /
/// `ends_with_cr` flags exist so that a CRLF pair falling across the
/// boundary of two spans is counted as a single line break.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct TextInfo {
    pub bytes: usize,
    pub chars: usize,
    pub utf16: usize,
    pub line_breaks: usize,
    pub starts_with_lf: bool,
    pub ends_with_cr: bool,
}

impl TextInfo {
    #[inline]
    pub fn new() -> TextInfo {
        TextInfo {
            bytes: 0,
            chars: 0,
            utf16: 0,
            line_breaks: 0,
            starts_with_lf: false,
            ends_with_cr: false,
        }
    }

    #[inline]
    pub fn from_str(text: &str) -> TextInfo {
        TextInfo {
            bytes: text.len(),
            chars: str_utils::count_chars(text),
            utf16: str_utils::count_utf16(text),
            line_breaks: str_utils::count_line_breaks(text),
            starts_with_lf: str_utils::starts_with_lf(text),
            ends_with_cr: str_utils::ends_with_cr(text),
        }
    }

    /// Combines two summaries as if their spans were concatenated.
    ///
    /// This is a monoid operation with `TextInfo::new()` as identity.
    /// The only non-pointwise part is the line-break count: a CR at the
    /// end of the left span and an LF at the start of the right span
    /// form a single CRLF break that the pointwise sum counts twice.
    #[inline]
    pub fn concat(self, rhs: TextInfo) -> TextInfo {
        let mut line_breaks = self.line_breaks + rhs.line_breaks;
        if self.ends_with_cr && rhs.starts_with_lf {
            line_breaks -= 1;
        }

        TextInfo {
            bytes: self.bytes + rhs.bytes,
            chars: self.chars + rhs.chars,
            utf16: self.utf16 + rhs.utf16,
            line_breaks,
            starts_with_lf: if self.bytes == 0 {
                rhs.starts_with_lf
            } else {
                self.starts_with_lf
            },
            ends_with_cr: if rhs.bytes == 0 {
                self.ends_with_cr
            } else {
                rhs.ends_with_cr
            },
        }
    }
}

//=============================================================
