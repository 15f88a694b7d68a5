//! Positions and ordered iterators.
//!
//! A position is a plain slot index wrapped per side. It stays valid until
//! its entry is erased; mutations elsewhere in the map never move entries
//! between slots. Dead positions are harmless: accessors return `None` and
//! navigation returns them unchanged.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::map::Bimap;

/// A position in the left order of a [`Bimap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeftPos(pub(crate) u32);

/// A position in the right order of a [`Bimap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RightPos(pub(crate) u32);

/// Iterator over pairs in ascending left-key order, yielding
/// `(&left, &right)`.
pub struct LeftIter<'a, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    pub(crate) map: &'a Bimap<L, R, CL, CR>,
    pub(crate) front: u32,
    pub(crate) back: u32,
    pub(crate) remaining: usize,
}

impl<'a, L, R, CL, CR> Iterator for LeftIter<'a, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.map.slots[self.front as usize];
        let item = (
            slot.left.as_ref().expect("live entry holds both values"),
            slot.right.as_ref().expect("live entry holds both values"),
        );
        self.front = self
            .map
            .left_tree
            .next(&self.map.slots, self.front)
            .expect("live entry is linked");
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> DoubleEndedIterator for LeftIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self
            .map
            .left_tree
            .prev(&self.map.slots, self.back)
            .expect("a preceding entry remains");
        let slot = &self.map.slots[self.back as usize];
        self.remaining -= 1;
        Some((
            slot.left.as_ref().expect("live entry holds both values"),
            slot.right.as_ref().expect("live entry holds both values"),
        ))
    }
}

impl<L, R, CL, CR> ExactSizeIterator for LeftIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
}

impl<L, R, CL, CR> FusedIterator for LeftIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
}

/// Iterator over pairs in ascending right-key order, yielding
/// `(&right, &left)`.
pub struct RightIter<'a, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    pub(crate) map: &'a Bimap<L, R, CL, CR>,
    pub(crate) front: u32,
    pub(crate) back: u32,
    pub(crate) remaining: usize,
}

impl<'a, L, R, CL, CR> Iterator for RightIter<'a, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    type Item = (&'a R, &'a L);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.map.slots[self.front as usize];
        let item = (
            slot.right.as_ref().expect("live entry holds both values"),
            slot.left.as_ref().expect("live entry holds both values"),
        );
        self.front = self
            .map
            .right_tree
            .next(&self.map.slots, self.front)
            .expect("live entry is linked");
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<L, R, CL, CR> DoubleEndedIterator for RightIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self
            .map
            .right_tree
            .prev(&self.map.slots, self.back)
            .expect("a preceding entry remains");
        let slot = &self.map.slots[self.back as usize];
        self.remaining -= 1;
        Some((
            slot.right.as_ref().expect("live entry holds both values"),
            slot.left.as_ref().expect("live entry holds both values"),
        ))
    }
}

impl<L, R, CL, CR> ExactSizeIterator for RightIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
}

impl<L, R, CL, CR> FusedIterator for RightIter<'_, L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
}
