use std::sync::Arc;

use crate::str_utils;
use crate::tree::{
    Children, LeafText, TextInfo, MAX_CHILDREN, MAX_INSERT_CHUNK, MAX_LEAF_BYTES, MIN_CHILDREN,
    MIN_LEAF_BYTES,
};

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Leaf(LeafText),
    Internal(Children),
}

impl Node {
    /// Creates the empty-rope node: a single empty leaf.
    #[inline]
    pub fn new() -> Node {
        Node::Leaf(LeafText::new())
    }

    #[inline(always)]
    pub fn children(&self) -> &Children {
        match *self {
            Node::Internal(ref children) => children,
            _ => panic!("Not an internal node."),
        }
    }

    #[inline(always)]
    pub fn children_mut(&mut self) -> &mut Children {
        match *self {
            Node::Internal(ref mut children) => children,
            _ => panic!("Not an internal node."),
        }
    }

    #[inline(always)]
    pub fn leaf_text(&self) -> &LeafText {
        match *self {
            Node::Leaf(ref text) => text,
            _ => panic!("Not a leaf node."),
        }
    }

    #[inline(always)]
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Number of levels of internal nodes above the leaves.
    pub fn depth(&self) -> usize {
        match *self {
            Node::Leaf(_) => 0,
            Node::Internal(ref children) => 1 + children.nodes()[0].depth(),
        }
    }

    /// Shallowly computes the text info of this node.
    ///
    /// Assumes the cached info of any children is up to date.
    pub fn text_info(&self) -> TextInfo {
        match *self {
            Node::Leaf(ref text) => text.text_info(),
            Node::Internal(ref children) => children.combined_info(),
        }
    }

    /// Whether this node is below its minimum size: too few children
    /// for an internal node, too little text for a leaf.  The root is
    /// exempt from these minimums.
    #[inline]
    pub fn is_underfull(&self) -> bool {
        match *self {
            Node::Leaf(ref text) => text.len() < MIN_LEAF_BYTES,
            Node::Internal(ref children) => children.len() < MIN_CHILDREN,
        }
    }

    //---------------------------------------------------------
    // Edits.

    /// Inserts `text` at char index `char_idx`.
    ///
    /// Returns the right-side residual node when the insertion
    /// overflowed this node, to be spliced in by the parent (or grown
    /// into a new root).
    ///
    /// `text` must be no larger than an insert chunk, so that an
    /// overflowing leaf can always be re-split within bounds.
    pub fn insert_at_char(&mut self, char_idx: usize, text: &str) -> Option<Node> {
        debug_assert!(text.len() <= MAX_INSERT_CHUNK + 4);

        match *self {
            Node::Leaf(ref mut leaf) => {
                let byte_idx = str_utils::char_to_byte_idx(leaf, char_idx);
                leaf.insert_str(byte_idx, text);

                if leaf.len() <= MAX_LEAF_BYTES {
                    None
                } else {
                    Some(Node::Leaf(leaf.split_balanced()))
                }
            }

            Node::Internal(ref mut children) => {
                // Bias-left so an insertion on a child boundary goes
                // into the left child.
                let (child_i, acc_info) = children.search_char_idx(char_idx, true);
                let residual = Arc::make_mut(&mut children.nodes_mut()[child_i])
                    .insert_at_char(char_idx - acc_info.chars, text);
                children.update_child_info(child_i);

                match residual {
                    Some(node) if children.is_full() => {
                        let item = (node.text_info(), Arc::new(node));
                        Some(Node::Internal(children.insert_split(child_i + 1, item)))
                    }
                    Some(node) => {
                        children.insert(child_i + 1, (node.text_info(), Arc::new(node)));
                        None
                    }
                    None => None,
                }
            }
        }
    }

    /// Splits the node at char index `char_idx`.  `self` becomes the
    /// left side and the right side is returned.
    ///
    /// The split spines of both sides may be left with under-full
    /// nodes; the caller repairs them with `fix_edge_right()` /
    /// `fix_edge_left()`.
    ///
    /// `char_idx` must be strictly inside the node's contents.
    pub fn split_at_char(&mut self, char_idx: usize) -> Node {
        debug_assert!(char_idx > 0);

        match *self {
            Node::Leaf(ref mut text) => {
                let byte_idx = str_utils::char_to_byte_idx(text, char_idx);
                Node::Leaf(text.split_off(byte_idx))
            }

            Node::Internal(ref mut children) => {
                let (child_i, acc_info) = children.search_char_idx(char_idx, true);
                let local_idx = char_idx - acc_info.chars;

                if local_idx == children.info()[child_i].chars {
                    // The split falls exactly between two children.
                    Node::Internal(children.split_off(child_i + 1))
                } else {
                    let mut right = children.split_off(child_i + 1);
                    let r_child = Arc::make_mut(&mut children.nodes_mut()[child_i])
                        .split_at_char(local_idx);
                    children.update_child_info(child_i);
                    right.insert(0, (r_child.text_info(), Arc::new(r_child)));
                    Node::Internal(right)
                }
            }
        }
    }

    /// Appends `other` (a whole tree `depth` levels shorter than
    /// `self`) at this node's right edge.
    ///
    /// Returns a residual right-side sibling of `self` when the splice
    /// overflowed, to be grown into a new root by the caller.
    pub fn append_at_depth(&mut self, other: Node, depth: usize) -> Option<Node> {
        if depth == 0 {
            return match (&mut *self, other) {
                (Node::Leaf(l_text), Node::Leaf(mut r_text)) => {
                    if l_text.len() + r_text.len() <= MAX_LEAF_BYTES {
                        l_text.push_str(&r_text);
                        None
                    } else if l_text.len() < MIN_LEAF_BYTES || r_text.len() < MIN_LEAF_BYTES {
                        l_text.distribute(&mut r_text);
                        Some(Node::Leaf(r_text))
                    } else {
                        Some(Node::Leaf(r_text))
                    }
                }

                (Node::Internal(l_children), Node::Internal(mut r_children)) => {
                    if l_children.len() + r_children.len() <= MAX_CHILDREN {
                        while r_children.len() > 0 {
                            l_children.push(r_children.remove(0));
                        }
                        None
                    } else {
                        l_children.distribute_with(&mut r_children);
                        Some(Node::Internal(r_children))
                    }
                }

                _ => unreachable!("append joined nodes of mismatched height"),
            };
        }

        let children = self.children_mut();
        let last_i = children.len() - 1;
        let residual =
            Arc::make_mut(&mut children.nodes_mut()[last_i]).append_at_depth(other, depth - 1);
        children.update_child_info(last_i);

        match residual {
            Some(node) if children.is_full() => {
                let item = (node.text_info(), Arc::new(node));
                Some(Node::Internal(children.push_split(item)))
            }
            Some(node) => {
                children.push((node.text_info(), Arc::new(node)));
                None
            }
            None => None,
        }
    }

    /// Mirror of `append_at_depth()`: splices `other` (a whole tree
    /// `depth` levels shorter than `self`) at this node's left edge.
    ///
    /// Returns a residual *left*-side sibling of `self` on overflow.
    pub fn prepend_at_depth(&mut self, other: Node, depth: usize) -> Option<Node> {
        if depth == 0 {
            return match (&mut *self, other) {
                (Node::Leaf(r_text), Node::Leaf(mut l_text)) => {
                    if l_text.len() + r_text.len() <= MAX_LEAF_BYTES {
                        r_text.insert_str(0, &l_text);
                        None
                    } else if l_text.len() < MIN_LEAF_BYTES || r_text.len() < MIN_LEAF_BYTES {
                        l_text.distribute(r_text);
                        Some(Node::Leaf(l_text))
                    } else {
                        Some(Node::Leaf(l_text))
                    }
                }

                (Node::Internal(r_children), Node::Internal(mut l_children)) => {
                    if l_children.len() + r_children.len() <= MAX_CHILDREN {
                        while l_children.len() > 0 {
                            r_children.insert(0, l_children.pop());
                        }
                        None
                    } else {
                        l_children.distribute_with(r_children);
                        Some(Node::Internal(l_children))
                    }
                }

                _ => unreachable!("append joined nodes of mismatched height"),
            };
        }

        let children = self.children_mut();
        let residual = Arc::make_mut(&mut children.nodes_mut()[0]).prepend_at_depth(other, depth - 1);
        children.update_child_info(0);

        match residual {
            Some(node) if children.is_full() => {
                let item = (node.text_info(), Arc::new(node));
                let r_children = children.insert_split(0, item);
                let l_children = std::mem::replace(children, r_children);
                Some(Node::Internal(l_children))
            }
            Some(node) => {
                children.insert(0, (node.text_info(), Arc::new(node)));
                None
            }
            None => None,
        }
    }

    //---------------------------------------------------------
    // Rebalancing.

    /// Repairs under-full nodes along the right edge of the tree, from
    /// this node down.  Used after splits, whose right spine fragments
    /// may be arbitrarily small.
    pub fn fix_edge_right(&mut self) {
        if let Node::Internal(ref mut children) = *self {
            if children.len() > 1 {
                let last_i = children.len() - 1;
                if children.nodes()[last_i].is_underfull() {
                    children.merge_distribute(last_i - 1, last_i);
                }
            }

            let last_i = children.len() - 1;
            Arc::make_mut(&mut children.nodes_mut()[last_i]).fix_edge_right();
            children.update_child_info(last_i);

            // The recursion may have merged grandchildren, leaving the
            // last child under-full again.
            if children.len() > 1 {
                let last_i = children.len() - 1;
                if children.nodes()[last_i].is_underfull() {
                    children.merge_distribute(last_i - 1, last_i);
                }
            }
        }
    }

    /// Mirror of `fix_edge_right()` for the left edge.
    pub fn fix_edge_left(&mut self) {
        if let Node::Internal(ref mut children) = *self {
            if children.len() > 1 && children.nodes()[0].is_underfull() {
                children.merge_distribute(0, 1);
            }

            Arc::make_mut(&mut children.nodes_mut()[0]).fix_edge_left();
            children.update_child_info(0);

            if children.len() > 1 && children.nodes()[0].is_underfull() {
                children.merge_distribute(0, 1);
            }
        }
    }

    /// Repairs under-full nodes along the path of an internal seam,
    /// given as a byte position.  Used after two trees are joined:
    /// only nodes flanking the join can be under-full.
    pub fn fix_seam(&mut self, byte_idx: usize) {
        if let Node::Internal(ref mut children) = *self {
            // Bias-left so a seam on a child boundary resolves to the
            // left of the two flanking children.
            let (child_i, acc_info) = children.search_byte_idx(byte_idx, true);
            let local_idx = byte_idx - acc_info.bytes;
            let on_boundary =
                local_idx == children.info()[child_i].bytes && child_i + 1 < children.len();

            if on_boundary {
                Arc::make_mut(&mut children.nodes_mut()[child_i + 1]).fix_seam(0);
                children.update_child_info(child_i + 1);
            }
            Arc::make_mut(&mut children.nodes_mut()[child_i]).fix_seam(local_idx);
            children.update_child_info(child_i);

            // Repair the flanking children, right one first so the left
            // index stays valid.
            if on_boundary && children.nodes()[child_i + 1].is_underfull() {
                children.merge_distribute(child_i, child_i + 1);
            }
            if children.len() > 1 && children.nodes()[child_i].is_underfull() {
                if child_i == 0 {
                    children.merge_distribute(0, 1);
                } else {
                    children.merge_distribute(child_i - 1, child_i);
                }
            }
        }
    }

    //---------------------------------------------------------
    // Metric descent.

    /// Returns the leaf text containing the given index of the chosen
    /// metric, along with the combined info of all text to its left.
    ///
    /// - `scanner` picks the child containing a local metric index.
    /// - `subtract` re-frames a metric index into the chosen child's
    ///   local coordinates.
    #[inline(always)]
    fn leaf_at_metric<F1, F2>(&self, metric_idx: usize, scanner: F1, subtract: F2) -> (&LeafText, TextInfo)
    where
        F1: Fn(&Children, usize) -> (usize, TextInfo),
        F2: Fn(usize, &TextInfo) -> usize,
    {
        let mut node = self;
        let mut idx = metric_idx;
        let mut left_info = TextInfo::new();

        loop {
            match *node {
                Node::Leaf(ref text) => return (text, left_info),
                Node::Internal(ref children) => {
                    let (child_i, acc_info) = scanner(children, idx);
                    idx = subtract(idx, &acc_info);
                    left_info = left_info.concat(acc_info);
                    node = &children.nodes()[child_i];
                }
            }
        }
    }

    /// Returns the leaf containing the given char, and the combined
    /// info of everything before that leaf.
    pub fn leaf_at_char(&self, char_idx: usize) -> (&LeafText, TextInfo) {
        self.leaf_at_metric(
            char_idx,
            |children, idx| children.search_char_idx(idx, false),
            |idx, acc| idx - acc.chars,
        )
    }

    /// Returns the leaf containing the given utf16 code unit offset,
    /// and the combined info of everything before that leaf.
    pub fn leaf_at_utf16(&self, utf16_idx: usize) -> (&LeafText, TextInfo) {
        self.leaf_at_metric(
            utf16_idx,
            |children, idx| children.search_utf16_idx(idx),
            |idx, acc| idx - acc.utf16,
        )
    }

    /// Returns the leaf containing the start of the line following the
    /// given break, and the combined info of everything before that
    /// leaf.
    pub fn leaf_at_line_break(&self, line_break_idx: usize) -> (&LeafText, TextInfo) {
        self.leaf_at_metric(
            line_break_idx,
            |children, idx| children.search_line_break_idx(idx),
            |idx, acc| idx - acc.line_breaks,
        )
    }

    //---------------------------------------------------------
    // Debugging/testing helpers.

    /// Checks that all leaves are at the same depth, and returns that
    /// depth.
    pub fn assert_equal_leaf_depth(&self) -> usize {
        match *self {
            Node::Leaf(_) => 1,
            Node::Internal(ref children) => {
                let first_depth = children.nodes()[0].assert_equal_leaf_depth();
                for node in &children.nodes()[1..] {
                    assert_eq!(node.assert_equal_leaf_depth(), first_depth);
                }
                first_depth + 1
            }
        }
    }

    /// Checks that all cached TextInfo in the tree matches the text,
    /// and returns the node's freshly computed info.
    pub fn assert_accurate_text_info(&self) -> TextInfo {
        match *self {
            Node::Leaf(ref text) => TextInfo::from_str(text),
            Node::Internal(ref children) => {
                let mut acc_info = TextInfo::new();
                for (node, &info) in children.nodes().iter().zip(children.info().iter()) {
                    assert_eq!(info, node.assert_accurate_text_info());
                    acc_info = acc_info.concat(info);
                }
                acc_info
            }
        }
    }

    /// Checks the node-size invariants: internal fanout within bounds
    /// (the root is allowed fewer children), leaves within the byte
    /// maximum and non-empty (except a root leaf).
    pub fn assert_node_sizes(&self, is_root: bool) {
        match *self {
            Node::Leaf(ref text) => {
                assert!(text.len() <= MAX_LEAF_BYTES);
                if !is_root {
                    assert!(!text.is_empty());
                }
            }
            Node::Internal(ref children) => {
                assert!(children.len() <= MAX_CHILDREN);
                if is_root {
                    assert!(children.len() >= 2);
                } else {
                    assert!(children.len() >= MIN_CHILDREN);
                }
                for node in children.nodes() {
                    node.assert_node_sizes(false);
                }
            }
        }
    }
}

//=============================================================
