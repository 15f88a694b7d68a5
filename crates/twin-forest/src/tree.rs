use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::balance::{
    detach_min, height, rebalance, reparent_children, reparent_left, subtree_max, subtree_min,
};
use crate::face::Face;

#[inline]
fn get_p<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::p(&arena[idx as usize])
}
#[inline]
fn get_l<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::l(&arena[idx as usize])
}
#[inline]
fn get_r<N, F: Face<N>>(arena: &[N], idx: u32) -> Option<u32> {
    F::r(&arena[idx as usize])
}
#[inline]
fn set_p<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_p(&mut arena[idx as usize], v);
}
#[inline]
fn set_l<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_l(&mut arena[idx as usize], v);
}
#[inline]
fn set_r<N, F: Face<N>>(arena: &mut [N], idx: u32, v: Option<u32>) {
    F::set_r(&mut arena[idx as usize], v);
}

/// Cross-link two tree heads through their right links, so that the end
/// position of either tree resolves to the end position of the other.
///
/// Head right links are otherwise unused: a head's only child is its left
/// link, which holds the root.
pub fn connect<N, FA, FB>(arena: &mut [N], a: u32, b: u32)
where
    FA: Face<N>,
    FB: Face<N>,
{
    FA::set_r(&mut arena[a as usize], Some(b));
    FB::set_r(&mut arena[b as usize], Some(a));
}

/// An AVL tree over one face of a caller-owned arena.
///
/// The tree owns no nodes. It keeps the index of its head slot and the
/// comparator; every operation borrows the arena. The head stores no key:
/// its left link is the root and it serves as the end position, so `p ==
/// None` identifies the head (and detached nodes) everywhere.
pub struct Tree<N, F, C>
where
    F: Face<N>,
    C: Fn(&F::Key, &F::Key) -> Ordering,
{
    head: u32,
    comparator: C,
    _face: PhantomData<fn(N, F)>,
}

impl<N, F, C> Clone for Tree<N, F, C>
where
    F: Face<N>,
    C: Fn(&F::Key, &F::Key) -> Ordering + Clone,
{
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            comparator: self.comparator.clone(),
            _face: PhantomData,
        }
    }
}

impl<N, F, C> Tree<N, F, C>
where
    F: Face<N>,
    C: Fn(&F::Key, &F::Key) -> Ordering,
{
    /// Anchor a tree at a preallocated head slot.
    pub fn new(head: u32, comparator: C) -> Self {
        Self {
            head,
            comparator,
            _face: PhantomData,
        }
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    fn compare(&self, a: &F::Key, b: &F::Key) -> Ordering {
        (self.comparator)(a, b)
    }

    #[inline]
    pub fn root(&self, arena: &[N]) -> Option<u32> {
        get_l::<N, F>(arena, self.head)
    }

    /// The minimum node, or the head when the tree is empty.
    pub fn begin(&self, arena: &[N]) -> u32 {
        subtree_min::<N, F>(arena, self.head)
    }

    /// The head. Equal to [`Tree::begin`] exactly when the tree is empty.
    #[inline]
    pub fn end(&self) -> u32 {
        self.head
    }

    /// The other head this tree was [`connect`]ed to.
    pub fn connected_end(&self, arena: &[N]) -> Option<u32> {
        get_r::<N, F>(arena, self.head)
    }

    pub fn find(&self, arena: &[N], key: &F::Key) -> Option<u32> {
        let mut curr = self.root(arena);
        while let Some(i) = curr {
            curr = match self.compare(key, F::key(&arena[i as usize])) {
                Ordering::Less => get_l::<N, F>(arena, i),
                Ordering::Greater => get_r::<N, F>(arena, i),
                Ordering::Equal => return Some(i),
            };
        }
        None
    }

    /// Link `node` into the tree.
    ///
    /// The caller guarantees the node's key is absent: the descent has no
    /// equal branch, so a duplicate would be dropped on the floor.
    pub fn insert(&self, arena: &mut [N], node: u32) {
        let root = self.insert_at(arena, self.root(arena), node);
        set_l::<N, F>(arena, self.head, Some(root));
        reparent_left::<N, F>(arena, self.head);
    }

    fn insert_at(&self, arena: &mut [N], point: Option<u32>, node: u32) -> u32 {
        let Some(point) = point else {
            return node;
        };
        let ord = self.compare(F::key(&arena[node as usize]), F::key(&arena[point as usize]));
        match ord {
            Ordering::Less => {
                let l = self.insert_at(arena, get_l::<N, F>(arena, point), node);
                set_l::<N, F>(arena, point, Some(l));
                reparent_children::<N, F>(arena, point);
                rebalance::<N, F>(arena, point)
            }
            Ordering::Greater => {
                let r = self.insert_at(arena, get_r::<N, F>(arena, point), node);
                set_r::<N, F>(arena, point, Some(r));
                reparent_children::<N, F>(arena, point);
                rebalance::<N, F>(arena, point)
            }
            Ordering::Equal => rebalance::<N, F>(arena, point),
        }
    }

    /// Unlink `node`, returning its in-order successor.
    ///
    /// Removing the maximum returns the head. The removed node comes back
    /// fully detached: links cleared, height reset to a leaf's.
    pub fn remove(&self, arena: &mut [N], node: u32) -> u32 {
        let successor = self.next(arena, node).expect("removed node is linked");
        let root = self.remove_at(arena, self.root(arena), node);
        set_l::<N, F>(arena, self.head, root);
        reparent_left::<N, F>(arena, self.head);
        set_p::<N, F>(arena, node, None);
        set_l::<N, F>(arena, node, None);
        set_r::<N, F>(arena, node, None);
        F::set_h(&mut arena[node as usize], 1);
        debug_assert_eq!(
            self.lower_bound(arena, F::key(&arena[node as usize])),
            successor
        );
        successor
    }

    fn remove_at(&self, arena: &mut [N], point: Option<u32>, node: u32) -> Option<u32> {
        let point = point?;
        let ord = self.compare(F::key(&arena[node as usize]), F::key(&arena[point as usize]));
        match ord {
            Ordering::Less => {
                let l = self.remove_at(arena, get_l::<N, F>(arena, point), node);
                set_l::<N, F>(arena, point, l);
                reparent_children::<N, F>(arena, point);
                Some(rebalance::<N, F>(arena, point))
            }
            Ordering::Greater => {
                let r = self.remove_at(arena, get_r::<N, F>(arena, point), node);
                set_r::<N, F>(arena, point, r);
                reparent_children::<N, F>(arena, point);
                Some(rebalance::<N, F>(arena, point))
            }
            Ordering::Equal => {
                let l = get_l::<N, F>(arena, point);
                let Some(r) = get_r::<N, F>(arena, point) else {
                    // The left child (possibly absent) takes the spot; the
                    // caller restores its parent link.
                    return l;
                };
                let minimal = subtree_min::<N, F>(arena, r);
                let rest = detach_min::<N, F>(arena, r);
                set_r::<N, F>(arena, minimal, rest);
                set_l::<N, F>(arena, minimal, l);
                set_p::<N, F>(arena, minimal, get_p::<N, F>(arena, point));
                reparent_children::<N, F>(arena, minimal);
                Some(rebalance::<N, F>(arena, minimal))
            }
        }
    }

    /// In-order successor. `None` for the head and for detached nodes; the
    /// successor of the maximum is the head.
    pub fn next(&self, arena: &[N], node: u32) -> Option<u32> {
        if get_p::<N, F>(arena, node).is_none() {
            return None;
        }
        if let Some(r) = get_r::<N, F>(arena, node) {
            return Some(subtree_min::<N, F>(arena, r));
        }
        let mut curr = node;
        let mut p = get_p::<N, F>(arena, node);
        while let Some(pi) = p {
            if get_r::<N, F>(arena, pi) == Some(curr) {
                curr = pi;
                p = get_p::<N, F>(arena, pi);
            } else {
                return Some(pi);
            }
        }
        None
    }

    /// In-order predecessor. The predecessor of the head is the maximum;
    /// `None` at the minimum and on an empty tree.
    pub fn prev(&self, arena: &[N], node: u32) -> Option<u32> {
        if let Some(l) = get_l::<N, F>(arena, node) {
            return Some(subtree_max::<N, F>(arena, l));
        }
        let mut curr = node;
        let mut p = get_p::<N, F>(arena, node);
        while let Some(pi) = p {
            if get_l::<N, F>(arena, pi) == Some(curr) {
                curr = pi;
                p = get_p::<N, F>(arena, pi);
            } else {
                return Some(pi);
            }
        }
        None
    }

    /// First node whose key is not less than `key`; the head when none is.
    pub fn lower_bound(&self, arena: &[N], key: &F::Key) -> u32 {
        let mut result = self.head;
        let mut curr = self.root(arena);
        while let Some(i) = curr {
            if self.compare(F::key(&arena[i as usize]), key) != Ordering::Less {
                result = i;
                curr = get_l::<N, F>(arena, i);
            } else {
                curr = get_r::<N, F>(arena, i);
            }
        }
        result
    }

    /// First node whose key is strictly greater than `key`; the head when
    /// none is.
    pub fn upper_bound(&self, arena: &[N], key: &F::Key) -> u32 {
        let point = self.lower_bound(arena, key);
        if point != self.head && self.compare(key, F::key(&arena[point as usize])) != Ordering::Less
        {
            self.next(arena, point).expect("bounded node is linked")
        } else {
            point
        }
    }

    /// Validate parent links, strict key ordering, cached heights and the
    /// AVL balance bound. Returns the number of linked nodes.
    pub fn check(&self, arena: &[N]) -> Result<usize, String> {
        if get_p::<N, F>(arena, self.head).is_some() {
            return Err("Head has a parent".to_string());
        }
        let Some(root) = self.root(arena) else {
            return Ok(0);
        };
        if get_p::<N, F>(arena, root) != Some(self.head) {
            return Err("Root is not parented to the head".to_string());
        }
        let (count, _) = self.check_node(arena, root)?;

        // Parent-child comparisons above are local; the walk proves global
        // strict ascent.
        let mut walked = 0usize;
        let mut last: Option<u32> = None;
        let mut curr = self.begin(arena);
        while curr != self.head {
            if let Some(last) = last {
                if self.compare(F::key(&arena[last as usize]), F::key(&arena[curr as usize]))
                    != Ordering::Less
                {
                    return Err("Node order violated".to_string());
                }
            }
            walked += 1;
            last = Some(curr);
            curr = match self.next(arena, curr) {
                Some(next) => next,
                None => return Err("Successor chain broken".to_string()),
            };
        }
        if walked != count {
            return Err(format!("Walk count mismatch: expected {count}, got {walked}"));
        }
        Ok(count)
    }

    fn check_node(&self, arena: &[N], node: u32) -> Result<(usize, u32), String> {
        let l = get_l::<N, F>(arena, node);
        let r = get_r::<N, F>(arena, node);
        let mut count = 1usize;
        let mut lh = 0u32;
        let mut rh = 0u32;

        if let Some(l) = l {
            if get_p::<N, F>(arena, l) != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
            if self.compare(F::key(&arena[l as usize]), F::key(&arena[node as usize]))
                != Ordering::Less
            {
                return Err("Node order violated on the left".to_string());
            }
            let (c, h) = self.check_node(arena, l)?;
            count += c;
            lh = h;
        }
        if let Some(r) = r {
            if get_p::<N, F>(arena, r) != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
            if self.compare(F::key(&arena[node as usize]), F::key(&arena[r as usize]))
                != Ordering::Less
            {
                return Err("Node order violated on the right".to_string());
            }
            let (c, h) = self.check_node(arena, r)?;
            count += c;
            rh = h;
        }

        let expected = lh.max(rh) + 1;
        let actual = height::<N, F>(arena, Some(node));
        if actual != expected {
            return Err(format!("Height mismatch: expected {expected}, got {actual}"));
        }
        let bf = rh as i32 - lh as i32;
        if !(-1..=1).contains(&bf) {
            return Err("AVL balance violated".to_string());
        }
        Ok((count, expected))
    }
}
