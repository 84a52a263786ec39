//! Plait: a persistent text rope for efficient editing of large
//! Unicode texts.
//!
//! A [`Rope`] is an immutable value: every edit returns a new rope and
//! leaves the old one untouched, with the two sharing all unmodified
//! parts of their trees.  Cloning is O(1), and clones can be sent
//! freely across threads.
//!
//! All public indices are char indices (Unicode scalar values), and
//! every operation runs in worst-case O(log N) in the length of the
//! text plus the size of the edit.  Ropes also maintain utf16 and line
//! metrics, so conversions between char, utf16 code unit, and line
//! coordinates are O(log N) as well.
//!
//! ```
//! use plait::Rope;
//!
//! let r1 = Rope::from_str("Hello world!");
//! let r2 = r1.insert(5, ", wonderful");
//!
//! assert_eq!(r1, "Hello world!");
//! assert_eq!(r2, "Hello, wonderful world!");
//! ```
//!
//! Line breaks are LF, CR, or CRLF, with a CRLF pair always counting
//! as a single break no matter how the rope was assembled.  The
//! `unicode_lines` cargo feature widens the recognized set to all
//! Unicode line breaks (VT, FF, NEL, LS, PS).

#![allow(clippy::needless_return)]
#![allow(clippy::redundant_field_names)]

mod rope;
mod rope_builder;
mod tree;

pub mod iter;
pub mod str_utils;

pub use crate::rope::Rope;
pub use crate::rope_builder::RopeBuilder;

//=============================================================

/// Plait's error type: an index outside the addressable range of the
/// coordinate system it was used in.
///
/// Each variant carries the offending index and the applicable upper
/// bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A char index greater than the rope's length in chars.
    /// Contains the index and the length.
    CharIndexOutOfBounds(usize, usize),

    /// A utf16 code unit index greater than the rope's length in utf16
    /// code units.  Contains the index and the length.
    Utf16IndexOutOfBounds(usize, usize),

    /// A line index outside the rope's line count.  Contains the index
    /// and the bound it was checked against.
    LineIndexOutOfBounds(usize, usize),

    /// A char range whose start is greater than its end.  Contains the
    /// start and end.
    InvalidRange(usize, usize),
}

/// Short alias for rope results.
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::CharIndexOutOfBounds(idx, len) => write!(
                f,
                "char index {} is out of bounds (char length: {})",
                idx, len
            ),
            Error::Utf16IndexOutOfBounds(idx, len) => write!(
                f,
                "utf16 code unit index {} is out of bounds (utf16 length: {})",
                idx, len
            ),
            Error::LineIndexOutOfBounds(idx, len) => {
                write!(f, "line index {} is out of bounds (bound: {})", idx, len)
            }
            Error::InvalidRange(start, end) => write!(
                f,
                "invalid char range: start {} is greater than end {}",
                start, end
            ),
        }
    }
}

impl std::error::Error for Error {}
