use std::sync::Arc;

use crate::iter::{Chars, Chunks, Lines};
use crate::rope_builder::RopeBuilder;
use crate::str_utils;
use crate::tree::{Children, Node, TextInfo, MAX_INSERT_CHUNK, MAX_LEAF_BYTES};
use crate::{Error, Result};

/// A persistent text rope.
///
/// `Rope` is an immutable value type: editing operations take `&self`
/// and return a new `Rope`, leaving the receiver unchanged.  The old
/// and new ropes share all untouched subtrees, so edits allocate only
/// the O(log N) path from the root to the edit site, and `clone()` is
/// O(1).
///
/// All indices in the public API are char indices.  Indexing past the
/// end is an error; the open end (`index == len_chars()`) is valid for
/// `insert()` and `split_at()` and for the coordinate conversions, but
/// not for `char_at()`.
///
/// Every operation comes in two flavors: a "direct" method that panics
/// on an invalid index, and a `try_` method returning [`Result`] for
/// callers that want to handle the failure themselves.
#[derive(Clone)]
pub struct Rope {
    pub(crate) root: Arc<Node>,
    pub(crate) root_info: TextInfo,
}

impl Rope {
    //-----------------------------------------------------------------
    // Constructors.

    /// Creates an empty `Rope`.
    #[inline]
    pub fn new() -> Rope {
        Rope {
            root: Arc::new(Node::new()),
            root_info: TextInfo::new(),
        }
    }

    /// Creates a `Rope` from a string slice.
    ///
    /// Runs in O(N) time, producing a perfectly balanced tree.
    pub fn from_str(text: &str) -> Rope {
        let mut builder = RopeBuilder::new();
        builder.append(text);
        builder.finish()
    }

    /// Wraps a finished tree, collapsing any singular root chain left
    /// behind by splits and joins.
    pub(crate) fn from_root(mut root: Arc<Node>) -> Rope {
        loop {
            let child = match *root {
                Node::Internal(ref children) if children.len() == 1 => {
                    Arc::clone(&children.nodes()[0])
                }
                _ => break,
            };
            root = child;
        }

        let root_info = root.text_info();
        Rope { root, root_info }
    }

    //-----------------------------------------------------------------
    // Queries.

    /// Whether the rope contains no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root_info.chars == 0
    }

    /// Length of the rope in chars.
    ///
    /// Runs in O(1) time.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.root_info.chars
    }

    /// Total number of utf16 code units that would be in the text if
    /// it were encoded as utf16.
    ///
    /// Runs in O(1) time.
    #[inline]
    pub fn len_utf16(&self) -> usize {
        self.root_info.utf16
    }

    /// Number of lines in the rope.
    ///
    /// The final line has no terminating break, so this is always at
    /// least 1, even for the empty rope.
    ///
    /// Runs in O(1) time.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.root_info.line_breaks + 1
    }

    #[inline(always)]
    pub(crate) fn len_bytes(&self) -> usize {
        self.root_info.bytes
    }

    /// Returns the char at `char_idx`.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx >= len_chars()`.
    #[track_caller]
    #[inline]
    pub fn char_at(&self, char_idx: usize) -> char {
        match self.try_char_at(char_idx) {
            Ok(ch) => ch,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`char_at()`](Rope::char_at).
    pub fn try_char_at(&self, char_idx: usize) -> Result<char> {
        if char_idx >= self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(char_idx, self.len_chars()));
        }

        let (leaf, left_info) = self.root.leaf_at_char(char_idx);
        let byte_idx = str_utils::char_to_byte_idx(leaf, char_idx - left_info.chars);
        Ok(leaf[byte_idx..].chars().next().unwrap())
    }

    //-----------------------------------------------------------------
    // Index conversion.

    /// Returns the utf16 code unit index of the given char.
    ///
    /// `char_idx == len_chars()` is valid, and converts to
    /// `len_utf16()`.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn char_to_utf16(&self, char_idx: usize) -> usize {
        match self.try_char_to_utf16(char_idx) {
            Ok(idx) => idx,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`char_to_utf16()`](Rope::char_to_utf16).
    pub fn try_char_to_utf16(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(char_idx, self.len_chars()));
        }

        let (leaf, left_info) = self.root.leaf_at_char(char_idx);
        Ok(left_info.utf16 + str_utils::char_to_utf16_idx(leaf, char_idx - left_info.chars))
    }

    /// Returns the char index of the given utf16 code unit.
    ///
    /// An index that lands between the two code units of a surrogate
    /// pair is snapped to the char containing it.  `utf16_idx ==
    /// len_utf16()` is valid, and converts to `len_chars()`.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `utf16_idx > len_utf16()`.
    #[track_caller]
    #[inline]
    pub fn utf16_to_char(&self, utf16_idx: usize) -> usize {
        match self.try_utf16_to_char(utf16_idx) {
            Ok(idx) => idx,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`utf16_to_char()`](Rope::utf16_to_char).
    pub fn try_utf16_to_char(&self, utf16_idx: usize) -> Result<usize> {
        if utf16_idx > self.len_utf16() {
            return Err(Error::Utf16IndexOutOfBounds(utf16_idx, self.len_utf16()));
        }

        let (leaf, left_info) = self.root.leaf_at_utf16(utf16_idx);
        Ok(left_info.chars + str_utils::utf16_to_char_idx(leaf, utf16_idx - left_info.utf16))
    }

    /// Returns the index of the line containing the given char.
    ///
    /// `char_idx == len_chars()` is valid, and returns the last line's
    /// index.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        match self.try_char_to_line(char_idx) {
            Ok(idx) => idx,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`char_to_line()`](Rope::char_to_line).
    pub fn try_char_to_line(&self, char_idx: usize) -> Result<usize> {
        if char_idx > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(char_idx, self.len_chars()));
        }

        let (leaf, left_info) = self.root.leaf_at_char(char_idx);
        Ok(left_info.line_breaks + str_utils::char_to_line_idx(leaf, char_idx - left_info.chars))
    }

    /// Returns the char index of the start of the given line.
    ///
    /// `line_idx == len_lines()` is valid, and returns `len_chars()`.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `line_idx > len_lines()`.
    #[track_caller]
    #[inline]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        match self.try_line_to_char(line_idx) {
            Ok(idx) => idx,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`line_to_char()`](Rope::line_to_char).
    pub fn try_line_to_char(&self, line_idx: usize) -> Result<usize> {
        if line_idx > self.len_lines() {
            return Err(Error::LineIndexOutOfBounds(line_idx, self.len_lines()));
        }

        let (leaf, left_info) = self.root.leaf_at_line_break(line_idx);
        Ok(left_info.chars + str_utils::line_to_char_idx(leaf, line_idx - left_info.line_breaks))
    }

    //-----------------------------------------------------------------
    // Edits.

    /// Returns a new rope with `text` inserted at char index
    /// `char_idx`.
    ///
    /// Runs in O(log N + M / MAX_LEAF) time, where M is the length of
    /// the inserted text.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn insert(&self, char_idx: usize, text: &str) -> Rope {
        match self.try_insert(char_idx, text) {
            Ok(rope) => rope,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`insert()`](Rope::insert).
    pub fn try_insert(&self, char_idx: usize, text: &str) -> Result<Rope> {
        if char_idx > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(char_idx, self.len_chars()));
        }

        if text.is_empty() {
            return Ok(self.clone());
        }

        // Large insertions build a rope and splice it in, so the work
        // stays linear in the text size.
        if text.len() > MAX_LEAF_BYTES {
            let (left, right) = self.try_split_at(char_idx)?;
            return Ok(left.append(&Rope::from_str(text)).append(&right));
        }

        // Everything else is fed to the tree in chunks small enough
        // that an overflowing leaf can always re-split within bounds.
        let mut root = Arc::clone(&self.root);
        let mut char_idx = char_idx;
        let mut text = text;
        while !text.is_empty() {
            let split_idx = str_utils::chunk_break_idx(text, MAX_INSERT_CHUNK.min(text.len()));
            let chunk = &text[..split_idx];
            text = &text[split_idx..];

            let residual = Arc::make_mut(&mut root).insert_at_char(char_idx, chunk);
            if let Some(r_node) = residual {
                let mut children = Children::new();
                let l_info = root.text_info();
                children.push((l_info, root));
                children.push((r_node.text_info(), Arc::new(r_node)));
                root = Arc::new(Node::Internal(children));
            }

            char_idx += str_utils::count_chars(chunk);
        }

        Ok(Rope::from_root(root))
    }

    /// Returns a new rope with the char range `start..end` removed.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn remove(&self, start: usize, end: usize) -> Rope {
        match self.try_remove(start, end) {
            Ok(rope) => rope,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`remove()`](Rope::remove).
    pub fn try_remove(&self, start: usize, end: usize) -> Result<Rope> {
        if start > end {
            return Err(Error::InvalidRange(start, end));
        }
        if end > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(end, self.len_chars()));
        }

        if start == end {
            return Ok(self.clone());
        }

        let (left, rest) = self.try_split_at(start)?;
        let (_, right) = rest.try_split_at(end - start)?;
        Ok(left.append(&right))
    }

    /// Returns a new rope containing exactly the char range
    /// `start..end` of this one.
    ///
    /// The result is a full rope supporting all operations, and may
    /// share subtrees with the original.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> Rope {
        match self.try_slice(start, end) {
            Ok(rope) => rope,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`slice()`](Rope::slice).
    pub fn try_slice(&self, start: usize, end: usize) -> Result<Rope> {
        if start > end {
            return Err(Error::InvalidRange(start, end));
        }
        if end > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(end, self.len_chars()));
        }

        let (front, _) = self.try_split_at(end)?;
        let (_, middle) = front.try_split_at(start)?;
        Ok(middle)
    }

    /// Splits the rope at `char_idx`, returning the two sides.
    ///
    /// The concatenation of the two sides equals the original.  Both
    /// ends of the range are valid split points, yielding an empty
    /// rope on that side.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `char_idx > len_chars()`.
    #[track_caller]
    #[inline]
    pub fn split_at(&self, char_idx: usize) -> (Rope, Rope) {
        match self.try_split_at(char_idx) {
            Ok(parts) => parts,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`split_at()`](Rope::split_at).
    pub fn try_split_at(&self, char_idx: usize) -> Result<(Rope, Rope)> {
        if char_idx > self.len_chars() {
            return Err(Error::CharIndexOutOfBounds(char_idx, self.len_chars()));
        }

        if char_idx == 0 {
            return Ok((Rope::new(), self.clone()));
        }
        if char_idx == self.len_chars() {
            return Ok((self.clone(), Rope::new()));
        }

        let mut l_root = Arc::clone(&self.root);
        let r_node = Arc::make_mut(&mut l_root).split_at_char(char_idx);
        let mut r_root = Arc::new(r_node);

        // Both split spines can be left with under-full nodes.
        Arc::make_mut(&mut l_root).fix_edge_right();
        Arc::make_mut(&mut r_root).fix_edge_left();

        Ok((Rope::from_root(l_root), Rope::from_root(r_root)))
    }

    /// Returns the concatenation of `self` and `other`.
    ///
    /// If either rope is empty the other is returned unchanged.  A CR
    /// at the seam followed by an LF still counts as a single line
    /// break in the result.
    ///
    /// Runs in O(log N) time.
    pub fn append(&self, other: &Rope) -> Rope {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        // Keep CRLF pairs within a single leaf: move the leading LF of
        // the right side over to the left before joining.
        if self.root_info.ends_with_cr && other.root_info.starts_with_lf {
            let left = self.insert(self.len_chars(), "\n");
            let (_, rest) = other.split_at(1);
            if rest.is_empty() {
                return left;
            }
            return left.append_trees(&rest);
        }

        self.append_trees(other)
    }

    /// Joins two non-empty ropes, height-matched, with no CRLF pair
    /// crossing the seam.
    fn append_trees(&self, other: &Rope) -> Rope {
        let seam_byte_idx = self.root_info.bytes;
        let l_depth = self.root.depth();
        let r_depth = other.root.depth();

        let mut root = if l_depth >= r_depth {
            let mut root = Arc::clone(&self.root);
            let residual =
                Arc::make_mut(&mut root).append_at_depth((*other.root).clone(), l_depth - r_depth);
            if let Some(r_node) = residual {
                let mut children = Children::new();
                let l_info = root.text_info();
                children.push((l_info, root));
                children.push((r_node.text_info(), Arc::new(r_node)));
                root = Arc::new(Node::Internal(children));
            }
            root
        } else {
            let mut root = Arc::clone(&other.root);
            let residual =
                Arc::make_mut(&mut root).prepend_at_depth((*self.root).clone(), r_depth - l_depth);
            if let Some(l_node) = residual {
                let mut children = Children::new();
                children.push((l_node.text_info(), Arc::new(l_node)));
                let r_info = root.text_info();
                children.push((r_info, root));
                root = Arc::new(Node::Internal(children));
            }
            root
        };

        // Only nodes along the seam can be under-full.
        Arc::make_mut(&mut root).fix_seam(seam_byte_idx);

        Rope::from_root(root)
    }

    //-----------------------------------------------------------------
    // Line-addressed access.

    /// Returns the given line as a new rope, including its terminating
    /// line break.  The final line has no terminator.
    ///
    /// Runs in O(log N) time.
    ///
    /// # Panics
    ///
    /// Panics if `line_idx >= len_lines()`.
    #[track_caller]
    #[inline]
    pub fn line(&self, line_idx: usize) -> Rope {
        match self.try_line(line_idx) {
            Ok(rope) => rope,
            Err(e) => panic!("{}", e),
        }
    }

    /// Non-panicking version of [`line()`](Rope::line).
    pub fn try_line(&self, line_idx: usize) -> Result<Rope> {
        if line_idx >= self.len_lines() {
            return Err(Error::LineIndexOutOfBounds(line_idx, self.len_lines()));
        }

        let start = self.try_line_to_char(line_idx)?;
        let end = self.try_line_to_char(line_idx + 1)?;
        self.try_slice(start, end)
    }

    //-----------------------------------------------------------------
    // Iterators.

    /// Iterator over the rope's text chunks, in order.
    #[inline]
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.root)
    }

    /// Iterator over the rope's chars, in order.
    #[inline]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.root)
    }

    /// Iterator over the rope's lines, each yielded as a rope.
    #[inline]
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(self)
    }

    //-----------------------------------------------------------------
    // Debugging/testing helpers.

    /// Checks that all cached metadata is consistent with the text.
    #[doc(hidden)]
    pub fn assert_integrity(&self) {
        assert_eq!(self.root_info, self.root.assert_accurate_text_info());
    }

    /// Checks all of the tree invariants:
    ///
    /// - All leaves are at the same depth.
    /// - All cached info matches the text.
    /// - Node sizes are within bounds (the root is exempt from the
    ///   minimums).
    /// - No CRLF pair is split across a leaf boundary.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        self.root.assert_equal_leaf_depth();
        self.assert_integrity();
        self.root.assert_node_sizes(true);

        let mut prev_ends_with_cr = false;
        for chunk in self.chunks() {
            assert!(
                !(prev_ends_with_cr && str_utils::starts_with_lf(chunk)),
                "CRLF pair split across a leaf boundary"
            );
            prev_ends_with_cr = str_utils::ends_with_cr(chunk);
        }
    }
}

//=============================================================
// Trait impls.

impl Default for Rope {
    #[inline]
    fn default() -> Rope {
        Rope::new()
    }
}

impl std::fmt::Debug for Rope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.chunks()).finish()
    }
}

impl std::fmt::Display for Rope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for chunk in self.chunks() {
            write!(f, "{}", chunk)?;
        }
        Ok(())
    }
}

impl<'a> From<&'a str> for Rope {
    #[inline]
    fn from(text: &'a str) -> Rope {
        Rope::from_str(text)
    }
}

impl From<String> for Rope {
    #[inline]
    fn from(text: String) -> Rope {
        Rope::from_str(&text)
    }
}

impl From<&Rope> for String {
    #[inline]
    fn from(rope: &Rope) -> String {
        rope.to_string()
    }
}

impl std::cmp::PartialEq<Rope> for Rope {
    fn eq(&self, other: &Rope) -> bool {
        if self.len_bytes() != other.len_bytes() {
            return false;
        }

        let mut chunks1 = self.chunks();
        let mut chunks2 = other.chunks();
        let mut buf1: &str = "";
        let mut buf2: &str = "";

        loop {
            if buf1.is_empty() {
                buf1 = match chunks1.next() {
                    Some(chunk) => chunk,
                    None => break,
                };
            }
            if buf2.is_empty() {
                buf2 = match chunks2.next() {
                    Some(chunk) => chunk,
                    None => break,
                };
            }

            let n = buf1.len().min(buf2.len());
            if buf1.as_bytes()[..n] != buf2.as_bytes()[..n] {
                return false;
            }
            buf1 = &buf1[n..];
            buf2 = &buf2[n..];
        }

        true
    }
}

impl std::cmp::Eq for Rope {}

impl std::cmp::PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        if self.len_bytes() != other.len() {
            return false;
        }

        let mut idx = 0;
        for chunk in self.chunks() {
            if chunk.as_bytes() != &other.as_bytes()[idx..(idx + chunk.len())] {
                return false;
            }
            idx += chunk.len();
        }

        true
    }
}

impl std::cmp::PartialEq<Rope> for str {
    #[inline]
    fn eq(&self, other: &Rope) -> bool {
        other == self
    }
}

impl<'a> std::cmp::PartialEq<&'a str> for Rope {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self == *other
    }
}

impl<'a> std::cmp::PartialEq<Rope> for &'a str {
    #[inline]
    fn eq(&self, other: &Rope) -> bool {
        other == *self
    }
}

impl std::cmp::PartialEq<String> for Rope {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl std::cmp::PartialEq<Rope> for String {
    #[inline]
    fn eq(&self, other: &Rope) -> bool {
        other == self.as_str()
    }
}

//=============================================================
