use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::tree::{MAX_CHILDREN, MAX_LEAF_BYTES, Node, TextInfo};

/// The children of an internal node: an ordered array of child links,
/// each paired with the cached `TextInfo` of that child's subtree.
#[derive(Debug, Clone)]
pub(crate) struct Children {
    info: ArrayVec<TextInfo, MAX_CHILDREN>,
    nodes: ArrayVec<Arc<Node>, MAX_CHILDREN>,
}

impl Children {
    #[inline(always)]
    pub fn new() -> Children {
        Children {
            info: ArrayVec::new(),
            nodes: ArrayVec::new(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.nodes.is_full()
    }

    #[inline(always)]
    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    #[inline(always)]
    pub fn nodes_mut(&mut self) -> &mut [Arc<Node>] {
        &mut self.nodes
    }

    #[inline(always)]
    pub fn info(&self) -> &[TextInfo] {
        &self.info
    }

    /// Recomputes the cached info of the child at `idx`.
    #[inline]
    pub fn update_child_info(&mut self, idx: usize) {
        self.info[idx] = self.nodes[idx].text_info();
    }

    /// Pushes an item onto the end of the array.
    ///
    /// Panics if the array is already full.
    #[inline]
    pub fn push(&mut self, item: (TextInfo, Arc<Node>)) {
        self.info.push(item.0);
        self.nodes.push(item.1);
    }

    /// Pops an item off the end of the array and returns it.
    ///
    /// Panics if the array is empty.
    #[inline]
    pub fn pop(&mut self) -> (TextInfo, Arc<Node>) {
        (self.info.pop().unwrap(), self.nodes.pop().unwrap())
    }

    /// Inserts an item at `idx`, preserving the ordering of the other
    /// items.
    ///
    /// Panics if the array is already full.
    #[inline]
    pub fn insert(&mut self, idx: usize, item: (TextInfo, Arc<Node>)) {
        self.info.insert(idx, item.0);
        self.nodes.insert(idx, item.1);
    }

    /// Removes the item at `idx` and returns it, preserving the
    /// ordering of the other items.
    #[inline]
    pub fn remove(&mut self, idx: usize) -> (TextInfo, Arc<Node>) {
        (self.info.remove(idx), self.nodes.remove(idx))
    }

    /// Splits the array in two at `idx`, returning the right part.
    pub fn split_off(&mut self, idx: usize) -> Children {
        assert!(idx <= self.len());

        Children {
            info: self.info.drain(idx..).collect(),
            nodes: self.nodes.drain(idx..).collect(),
        }
    }

    /// Pushes an element onto the end of the array, and then splits it
    /// in half, returning the right half.
    ///
    /// This works even when the array is full.
    pub fn push_split(&mut self, new_child: (TextInfo, Arc<Node>)) -> Children {
        let l_count = (self.len() + 1) - ((self.len() + 1) / 2);

        let mut right = self.split_off(l_count);
        right.push(new_child);
        right
    }

    /// Inserts an element at `idx`, and then splits the array in half,
    /// returning the right half.
    ///
    /// This works even when the array is full.
    pub fn insert_split(&mut self, idx: usize, item: (TextInfo, Arc<Node>)) -> Children {
        assert!(self.len() > 0);
        assert!(idx <= self.len());

        let extra = if idx < self.len() {
            let extra = self.pop();
            self.insert(idx, item);
            extra
        } else {
            item
        };

        self.push_split(extra)
    }

    /// Equi-distributes the children between `self` and `other`,
    /// preserving ordering.  `self` is assumed to precede `other`.
    pub fn distribute_with(&mut self, other: &mut Children) {
        let r_target_len = (self.len() + other.len()) / 2;
        while other.len() < r_target_len {
            other.insert(0, self.pop());
        }
        while other.len() > r_target_len {
            self.push(other.remove(0));
        }
    }

    /// Merges the two adjacent children `idx1` and `idx2` if their
    /// combined contents fit in one node, and otherwise equalizes the
    /// contents between them.
    ///
    /// Returns whether a merge happened.
    pub fn merge_distribute(&mut self, idx1: usize, idx2: usize) -> bool {
        debug_assert_eq!(idx1 + 1, idx2);
        debug_assert!(idx2 < self.len());

        let merged = {
            let ((_, node1), (_, node2)) = self.get_two_mut(idx1, idx2);
            let node1 = Arc::make_mut(node1);
            let node2 = Arc::make_mut(node2);
            match (node1, node2) {
                (Node::Leaf(text1), Node::Leaf(text2)) => {
                    if text1.len() + text2.len() <= MAX_LEAF_BYTES {
                        text1.push_str(text2);
                        true
                    } else {
                        text1.distribute(text2);
                        false
                    }
                }

                (Node::Internal(children1), Node::Internal(children2)) => {
                    if children1.len() + children2.len() <= MAX_CHILDREN {
                        while children2.len() > 0 {
                            children1.push(children2.remove(0));
                        }
                        true
                    } else {
                        children1.distribute_with(children2);
                        false
                    }
                }

                _ => panic!("Siblings have different node types"),
            }
        };

        if merged {
            self.remove(idx2);
            self.update_child_info(idx1);
        } else {
            self.update_child_info(idx1);
            self.update_child_info(idx2);
        }
        merged
    }

    /// Fetches two children simultaneously, returning mutable
    /// references to their info and nodes.
    ///
    /// `idx1` must be less than `idx2`.
    pub fn get_two_mut(
        &mut self,
        idx1: usize,
        idx2: usize,
    ) -> (
        (&mut TextInfo, &mut Arc<Node>),
        (&mut TextInfo, &mut Arc<Node>),
    ) {
        assert!(idx1 < idx2);
        assert!(idx2 < self.len());

        let split_idx = idx1 + 1;
        let (info1, info2) = self.info.split_at_mut(split_idx);
        let (nodes1, nodes2) = self.nodes.split_at_mut(split_idx);

        (
            (&mut info1[idx1], &mut nodes1[idx1]),
            (&mut info2[idx2 - split_idx], &mut nodes2[idx2 - split_idx]),
        )
    }

    /// The combined info of all children, as if their texts were
    /// concatenated.
    #[inline]
    pub fn combined_info(&self) -> TextInfo {
        self.info
            .iter()
            .fold(TextInfo::new(), |acc, &next| acc.concat(next))
    }

    /// Returns the index of the first child for which `pred` returns
    /// true on the accumulated info up to and including that child,
    /// along with the accumulated info of all the children before it.
    ///
    /// If no child matches, the last child is returned.  Accumulation
    /// uses `TextInfo::concat()`, so the CRLF line-break correction is
    /// applied along the way.
    #[inline(always)]
    fn search_by<F>(&self, pred: F) -> (usize, TextInfo)
    where
        F: Fn(TextInfo) -> bool,
    {
        debug_assert!(self.len() > 0);

        let mut accum = TextInfo::new();
        let mut idx = 0;
        while idx < (self.len() - 1) {
            let next_accum = accum.concat(self.info[idx]);
            if pred(next_accum) {
                break;
            }
            accum = next_accum;
            idx += 1;
        }

        (idx, accum)
    }

    /// Returns the child containing the given byte, and the accumulated
    /// info of the children before it.
    ///
    /// With `bias_left`, a byte index on a child boundary resolves to
    /// the left of the two children; otherwise to the right.
    /// One-past-the-end is valid and returns the last child.
    pub fn search_byte_idx(&self, byte_idx: usize, bias_left: bool) -> (usize, TextInfo) {
        let (idx, accum) = if bias_left {
            self.search_by(|end| byte_idx <= end.bytes)
        } else {
            self.search_by(|end| byte_idx < end.bytes)
        };

        debug_assert!(
            byte_idx <= accum.bytes + self.info[idx].bytes,
            "Index out of bounds."
        );

        (idx, accum)
    }

    /// Returns the child containing the given char, and the accumulated
    /// info of the children before it.
    ///
    /// With `bias_left`, a char index on a child boundary resolves to
    /// the left of the two children; otherwise to the right.
    /// One-past-the-end is valid and returns the last child.
    pub fn search_char_idx(&self, char_idx: usize, bias_left: bool) -> (usize, TextInfo) {
        let (idx, accum) = if bias_left {
            self.search_by(|end| char_idx <= end.chars)
        } else {
            self.search_by(|end| char_idx < end.chars)
        };

        debug_assert!(
            char_idx <= accum.chars + self.info[idx].chars,
            "Index out of bounds."
        );

        (idx, accum)
    }

    /// Returns the child containing the given utf16 code unit offset,
    /// and the accumulated info of the children before it.
    ///
    /// One-past-the-end is valid and returns the last child.
    pub fn search_utf16_idx(&self, utf16_idx: usize) -> (usize, TextInfo) {
        let (idx, accum) = self.search_by(|end| utf16_idx < end.utf16);

        debug_assert!(
            utf16_idx <= accum.utf16 + self.info[idx].utf16,
            "Index out of bounds."
        );

        (idx, accum)
    }

    /// Returns the child containing the start of the given line (the
    /// char just after the line's preceding break), and the accumulated
    /// info of the children before it.
    ///
    /// One-past-the-end is valid and returns the last child.
    pub fn search_line_break_idx(&self, line_break_idx: usize) -> (usize, TextInfo) {
        self.search_by(|end| line_break_idx <= end.line_breaks)
    }
}

//=============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::LeafText;

    fn make_children(texts: &[&str]) -> Children {
        let mut children = Children::new();
        for text in texts {
            let node = Node::Leaf(LeafText::from_str(text));
            children.push((node.text_info(), Arc::new(node)));
        }
        children
    }

    #[test]
    fn search_char_idx_01() {
        let children = make_children(&["Hello ", "there ", "world!"]);

        assert_eq!(0, children.search_char_idx(0, false).0);
        assert_eq!(0, children.search_char_idx(5, false).0);
        assert_eq!(1, children.search_char_idx(6, false).0);
        assert_eq!(6, children.search_char_idx(6, false).1.chars);
        assert_eq!(1, children.search_char_idx(11, false).0);
        assert_eq!(2, children.search_char_idx(12, false).0);
        assert_eq!(2, children.search_char_idx(18, false).0);
        assert_eq!(12, children.search_char_idx(18, false).1.chars);
    }

    #[test]
    fn search_char_idx_02() {
        // Bias-left resolves boundaries to the left child.
        let children = make_children(&["Hello ", "there ", "world!"]);

        assert_eq!(0, children.search_char_idx(6, true).0);
        assert_eq!(1, children.search_char_idx(7, true).0);
        assert_eq!(1, children.search_char_idx(12, true).0);
        assert_eq!(2, children.search_char_idx(18, true).0);
    }

    #[test]
    #[should_panic]
    fn search_char_idx_03() {
        let children = make_children(&["Hello ", "there ", "world!"]);
        children.search_char_idx(19, false);
    }

    #[test]
    fn search_line_break_idx_01() {
        // A CRLF pair split across two children counts once.
        let children = make_children(&["one\r", "\ntwo\n", "three"]);

        assert_eq!(0, children.search_line_break_idx(0).0);
        assert_eq!(0, children.search_line_break_idx(1).0);
        let (idx, accum) = children.search_line_break_idx(2);
        assert_eq!(1, idx);
        assert_eq!(1, accum.line_breaks);
        assert_eq!(2, children.combined_info().line_breaks);
    }

    #[test]
    fn push_split_01() {
        let mut children = make_children(&["a", "bb", "ccc", "dddd", "eeeee"]);
        let node = Node::Leaf(LeafText::from_str("ffffff"));
        let right = children.push_split((node.text_info(), Arc::new(node)));

        assert_eq!(children.len(), 3);
        assert_eq!(right.len(), 3);
        assert_eq!(children.combined_info().bytes, 6);
        assert_eq!(right.combined_info().bytes, 15);
    }

    #[test]
    fn insert_split_01() {
        let mut children = make_children(&["a", "bb", "ccc", "dddd", "eeeee"]);
        let node = Node::Leaf(LeafText::from_str("XX"));
        let right = children.insert_split(1, (node.text_info(), Arc::new(node)));

        assert_eq!(children.len() + right.len(), 6);
        let mut all = String::new();
        for node in children.nodes().iter().chain(right.nodes().iter()) {
            all.push_str(node.leaf_text());
        }
        assert_eq!(all, "aXXbbcccddddeeeee");
    }

    #[test]
    fn merge_distribute_01() {
        let mut children = make_children(&["aa", "bb", "cc"]);
        assert!(children.merge_distribute(0, 1));
        assert_eq!(children.len(), 2);
        assert_eq!(&children.nodes()[0].leaf_text()[..], "aabb");
    }

    #[test]
    fn merge_distribute_02() {
        // Too much data to merge: equalizes instead.
        let mut children = make_children(&["aa", "bbbbbbbbbbbbbb"]);
        assert!(!children.merge_distribute(0, 1));
        assert_eq!(children.len(), 2);
        assert_eq!(children.combined_info().bytes, 16);
        assert!(children.nodes()[0].leaf_text().len() >= 7);
        assert!(children.nodes()[1].leaf_text().len() >= 7);
    }
}
