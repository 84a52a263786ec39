//! Iterators over a rope's content.

use std::sync::Arc;

use crate::rope::Rope;
use crate::tree::Node;

/// Iterator over a rope's text chunks (the contents of its leaves, in
/// order).
///
/// Yields non-empty `&str` chunks whose concatenation is exactly the
/// rope's text.  Runs in amortized O(1) per chunk.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    // (node, index of the child to descend into next)
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Arc<Node>) -> Chunks<'a> {
        let mut chunks = Chunks { stack: Vec::new() };
        chunks.descend(root);
        chunks
    }

    // Pushes the path to the leftmost leaf under `node`.
    fn descend(&mut self, mut node: &'a Node) {
        loop {
            match *node {
                Node::Leaf(_) => {
                    self.stack.push((node, 0));
                    return;
                }
                Node::Internal(ref children) => {
                    self.stack.push((node, 0));
                    node = &children.nodes()[0];
                }
            }
        }
    }

    // Moves the stack to the next leaf, if any.
    fn advance(&mut self) {
        // Pop the current leaf.
        self.stack.pop();

        while !self.stack.is_empty() {
            let (node, child_i) = {
                let last = self.stack.last_mut().unwrap();
                last.1 += 1;
                (last.0, last.1)
            };

            if child_i < node.child_count() {
                let next: &'a Node = &node.children().nodes()[child_i];
                self.descend(next);
                return;
            } else {
                self.stack.pop();
            }
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let (node, _) = *self.stack.last()?;
            let text: &'a str = node.leaf_text();
            self.advance();

            // Only the root of an empty rope has an empty leaf, but
            // skipping keeps the "chunks are non-empty" contract
            // independent of that detail.
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
}

/// Iterator over a rope's chars, in order.
#[derive(Debug, Clone)]
pub struct Chars<'a> {
    chunks: Chunks<'a>,
    current: std::str::Chars<'a>,
}

impl<'a> Chars<'a> {
    pub(crate) fn new(root: &'a Arc<Node>) -> Chars<'a> {
        Chars {
            chunks: Chunks::new(root),
            current: "".chars(),
        }
    }
}

impl<'a> Iterator for Chars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(ch) = self.current.next() {
                return Some(ch);
            }
            self.current = self.chunks.next()?.chars();
        }
    }
}

/// Iterator over a rope's lines.
///
/// Each line is yielded as a [`Rope`] and includes its terminating
/// line break; the final line has none.  Lines are extracted by index,
/// so each step runs in O(log N).
#[derive(Clone)]
pub struct Lines<'a> {
    rope: &'a Rope,
    line_idx: usize,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(rope: &'a Rope) -> Lines<'a> {
        Lines { rope, line_idx: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Rope;

    fn next(&mut self) -> Option<Rope> {
        if self.line_idx >= self.rope.len_lines() {
            return None;
        }

        let line = self.rope.line(self.line_idx);
        self.line_idx += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rope.len_lines() - self.line_idx.min(self.rope.len_lines());
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Lines<'a> {}

//=============================================================
