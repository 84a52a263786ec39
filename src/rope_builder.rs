use std::sync::Arc;

use smallvec::SmallVec;

use crate::rope::Rope;
use crate::str_utils;
use crate::tree::{Children, LeafText, Node, BUILD_CHUNK, MAX_CHILDREN};

/// An efficient incremental `Rope` builder.
///
/// This builds a rope from a sequence of text chunks in time linear to
/// the total amount of text, producing a balanced tree directly.  It
/// is much faster than repeatedly calling [`Rope::insert()`] at the
/// end of a rope.
///
/// [`Rope::from_str()`] uses this internally.
///
/// # Example
/// ```
/// # use plait::RopeBuilder;
/// #
/// let mut builder = RopeBuilder::new();
///
/// builder.append("Hello ");
/// builder.append("world!\n");
/// builder.append("How's ");
/// builder.append("it goin");
/// builder.append("g?");
///
/// let rope = builder.finish();
///
/// assert_eq!(rope, "Hello world!\nHow's it going?");
/// ```
#[derive(Debug, Clone)]
pub struct RopeBuilder {
    // The right-most spine of the tree under construction, highest
    // node first.
    stack: SmallVec<[Arc<Node>; 8]>,
    buffer: String,
}

impl RopeBuilder {
    /// Creates a new RopeBuilder, ready for input.
    pub fn new() -> Self {
        RopeBuilder {
            stack: {
                let mut stack = SmallVec::new();
                stack.push(Arc::new(Node::new()));
                stack
            },
            buffer: String::new(),
        }
    }

    /// Appends `chunk` to the end of the in-progress rope.
    ///
    /// The passed chunk can be as large or small as desired; leaf
    /// boundaries are chosen internally, on char boundaries and never
    /// inside a CRLF pair.
    pub fn append(&mut self, chunk: &str) {
        let mut chunk = chunk;

        while self.buffer.len() + chunk.len() > BUILD_CHUNK {
            let needed = BUILD_CHUNK.saturating_sub(self.buffer.len());
            let mut split_idx = str_utils::chunk_break_idx(chunk, needed);
            if split_idx == 0
                && str_utils::ends_with_cr(&self.buffer)
                && str_utils::starts_with_lf(chunk)
            {
                // Don't strand the CR at the end of this leaf.
                split_idx = 1;
            }
            self.buffer.push_str(&chunk[..split_idx]);
            chunk = &chunk[split_idx..];

            // Hold a trailing CR back for the next leaf, so that a
            // following LF can't get stranded across the boundary.
            let hold_cr = str_utils::ends_with_cr(&self.buffer) && self.buffer.len() > 1;
            if hold_cr {
                self.buffer.pop();
            }

            let leaf = Node::Leaf(LeafText::from_str(&self.buffer));
            self.append_leaf_node(Arc::new(leaf));
            self.buffer.clear();
            if hold_cr {
                self.buffer.push('\r');
            }
        }

        self.buffer.push_str(chunk);
    }

    /// Finishes the build and returns the `Rope`.
    pub fn finish(mut self) -> Rope {
        // Emit the final partial leaf, if any.
        if !self.buffer.is_empty() {
            let leaf = Node::Leaf(LeafText::from_str(&self.buffer));
            self.append_leaf_node(Arc::new(leaf));
            self.buffer.clear();
        }

        // Zip up the remaining right-edge spine.
        while self.stack.len() > 1 {
            let node = self.stack.pop().unwrap();
            let info = node.text_info();
            let parent_i = self.stack.len() - 1;
            Arc::make_mut(&mut self.stack[parent_i])
                .children_mut()
                .push((info, node));
        }

        // The right edge may end in under-sized nodes.
        let mut root = self.stack.pop().unwrap();
        Arc::make_mut(&mut root).fix_edge_right();

        Rope::from_root(root)
    }

    fn append_leaf_node(&mut self, leaf: Arc<Node>) {
        let last = self.stack.pop().unwrap();
        match *last {
            Node::Leaf(_) => {
                if last.leaf_text().is_empty() {
                    self.stack.push(leaf);
                } else {
                    let mut children = Children::new();
                    let l_info = last.text_info();
                    children.push((l_info, last));
                    let r_info = leaf.text_info();
                    children.push((r_info, leaf));
                    self.stack.push(Arc::new(Node::Internal(children)));
                }
            }

            Node::Internal(_) => {
                self.stack.push(last);
                let mut left = leaf;
                let mut stack_idx = (self.stack.len() - 1) as isize;
                loop {
                    if stack_idx < 0 {
                        // Above the root: grow a new root level.
                        let mut children = Children::new();
                        let info = left.text_info();
                        children.push((info, left));
                        self.stack.insert(0, Arc::new(Node::Internal(children)));
                        break;
                    } else if self.stack[stack_idx as usize].child_count() < (MAX_CHILDREN - 1) {
                        // Room to add a child.  The last slot is kept
                        // free so the final zip-up can always push.
                        let info = left.text_info();
                        Arc::make_mut(&mut self.stack[stack_idx as usize])
                            .children_mut()
                            .push((info, left));
                        break;
                    } else {
                        // No room: split, leave the right half on the
                        // spine, and carry the left half up.
                        let info = left.text_info();
                        let r_children = Arc::make_mut(&mut self.stack[stack_idx as usize])
                            .children_mut()
                            .push_split((info, left));
                        left = Arc::new(Node::Internal(r_children));
                        std::mem::swap(&mut left, &mut self.stack[stack_idx as usize]);
                        stack_idx -= 1;
                    }
                }
            }
        }
    }
}

impl Default for RopeBuilder {
    fn default() -> Self {
        RopeBuilder::new()
    }
}

//=============================================================
