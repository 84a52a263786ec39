mod children;
mod leaf_text;
mod node;
mod text_info;

pub(crate) use self::children::Children;
pub(crate) use self::leaf_text::LeafText;
pub(crate) use self::node::Node;
pub(crate) use self::text_info::TextInfo;

// Real constants used in release builds.
#[cfg(not(test))]
mod constants {
    // Fan-out of internal nodes.
    pub(crate) const MAX_CHILDREN: usize = 16;
    pub(crate) const MIN_CHILDREN: usize = MAX_CHILDREN / 2;

    // Soft minimum / hard maximum number of bytes of text in a leaf
    // node.  MIN is a little smaller than half of MAX so that repeated
    // splitting/merging doesn't happen on alternating small insertions
    // and removals.
    pub(crate) const MAX_LEAF_BYTES: usize = 512;
    pub(crate) const MIN_LEAF_BYTES: usize = (MAX_LEAF_BYTES / 2) - (MAX_LEAF_BYTES / 32);
}


pub(crate) use self::constants::{MAX_CHILDREN, MAX_LEAF_BYTES, MIN_CHILDREN, MIN_LEAF_BYTES};

// Largest chunk of text fed to the tree in a single insertion step.
// Kept well under MAX_LEAF_BYTES so that an overflowing leaf can always
// be split back into two leaves within bounds.
pub(crate) const MAX_INSERT_CHUNK: usize = MAX_LEAF_BYTES / 4;

// Target leaf size when building ropes bottom-up, leaving headroom for
// later insertions before leaves start splitting.
pub(crate) const BUILD_CHUNK: usize = MAX_LEAF_BYTES / 2;
