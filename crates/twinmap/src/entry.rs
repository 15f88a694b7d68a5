//! The arena slot shared by both trees.
//!
//! One `Entry` holds one pair plus two complete sets of tree links. The
//! left tree threads through `p`/`l`/`r`/`h`, the right tree through
//! `p2`/`l2`/`r2`/`h2`, so a slot index is simultaneously a position in
//! both orders.

use twin_forest::Face;

/// Slot index of the left tree's head.
pub(crate) const HEAD_LEFT: u32 = 0;
/// Slot index of the right tree's head.
pub(crate) const HEAD_RIGHT: u32 = 1;

#[derive(Clone, Debug)]
pub(crate) struct Entry<L, R> {
    pub(crate) p: Option<u32>,
    pub(crate) l: Option<u32>,
    pub(crate) r: Option<u32>,
    pub(crate) h: u32,
    pub(crate) p2: Option<u32>,
    pub(crate) l2: Option<u32>,
    pub(crate) r2: Option<u32>,
    pub(crate) h2: u32,
    pub(crate) left: Option<L>,
    pub(crate) right: Option<R>,
}

impl<L, R> Entry<L, R> {
    pub(crate) fn new(left: L, right: R) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            h: 1,
            p2: None,
            l2: None,
            r2: None,
            h2: 1,
            left: Some(left),
            right: Some(right),
        }
    }

    /// A slot with no pair: a head, or a vacant slot on the free list.
    pub(crate) fn bare() -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            h: 1,
            p2: None,
            l2: None,
            r2: None,
            h2: 1,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.left.is_some()
    }
}

/// Projects the left-key ordering out of an [`Entry`].
pub(crate) enum LeftFace {}

impl<L, R> Face<Entry<L, R>> for LeftFace {
    type Key = L;

    fn p(node: &Entry<L, R>) -> Option<u32> {
        node.p
    }
    fn l(node: &Entry<L, R>) -> Option<u32> {
        node.l
    }
    fn r(node: &Entry<L, R>) -> Option<u32> {
        node.r
    }
    fn h(node: &Entry<L, R>) -> u32 {
        node.h
    }
    fn set_p(node: &mut Entry<L, R>, v: Option<u32>) {
        node.p = v;
    }
    fn set_l(node: &mut Entry<L, R>, v: Option<u32>) {
        node.l = v;
    }
    fn set_r(node: &mut Entry<L, R>, v: Option<u32>) {
        node.r = v;
    }
    fn set_h(node: &mut Entry<L, R>, v: u32) {
        node.h = v;
    }
    fn key(node: &Entry<L, R>) -> &L {
        node.left.as_ref().expect("left value exists")
    }
}

/// Projects the right-key ordering out of an [`Entry`].
pub(crate) enum RightFace {}

impl<L, R> Face<Entry<L, R>> for RightFace {
    type Key = R;

    fn p(node: &Entry<L, R>) -> Option<u32> {
        node.p2
    }
    fn l(node: &Entry<L, R>) -> Option<u32> {
        node.l2
    }
    fn r(node: &Entry<L, R>) -> Option<u32> {
        node.r2
    }
    fn h(node: &Entry<L, R>) -> u32 {
        node.h2
    }
    fn set_p(node: &mut Entry<L, R>, v: Option<u32>) {
        node.p2 = v;
    }
    fn set_l(node: &mut Entry<L, R>, v: Option<u32>) {
        node.l2 = v;
    }
    fn set_r(node: &mut Entry<L, R>, v: Option<u32>) {
        node.r2 = v;
    }
    fn set_h(node: &mut Entry<L, R>, v: u32) {
        node.h2 = v;
    }
    fn key(node: &Entry<L, R>) -> &R {
        node.right.as_ref().expect("right value exists")
    }
}
