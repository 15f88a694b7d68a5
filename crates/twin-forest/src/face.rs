//! The linkage-face trait.
//!
//! A node that lives in two trees carries two sets of links. A *face* is one
//! such set: parent / left / right indices plus the cached height of the
//! subtree hanging off it, and the key that tree orders by. The trait is
//! implemented by a tag type rather than by the node itself, so a single
//! node type can expose several faces and the tree code stays generic over
//! which one it manipulates.

/// One linkage face of an arena node.
///
/// All links are `Option<u32>` indices into the arena that owns the nodes.
/// `h` caches the height of the subtree rooted at the node on this face;
/// a freshly created leaf starts at 1.
pub trait Face<N> {
    /// Key type this face orders by.
    type Key;

    fn p(node: &N) -> Option<u32>;
    fn l(node: &N) -> Option<u32>;
    fn r(node: &N) -> Option<u32>;
    fn h(node: &N) -> u32;
    fn set_p(node: &mut N, v: Option<u32>);
    fn set_l(node: &mut N, v: Option<u32>);
    fn set_r(node: &mut N, v: Option<u32>);
    fn set_h(node: &mut N, v: u32);

    /// Key of the node on this face. Head slots hold no key; the tree code
    /// never asks them for one.
    fn key(node: &N) -> &Self::Key;
}
