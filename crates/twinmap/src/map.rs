use std::cmp::Ordering;
use std::fmt;

use twin_forest::{connect, Tree};

use crate::entry::{Entry, LeftFace, RightFace, HEAD_LEFT, HEAD_RIGHT};
use crate::error::KeyNotFound;
use crate::iter::{LeftIter, LeftPos, RightIter, RightPos};

fn default_comparator<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// A bidirectional ordered map.
///
/// Every pair `(L, R)` is stored once, in a slot that carries two sets of
/// tree links. The left tree orders slots by `L`, the right tree by `R`,
/// so lookups, range scans and ordered iteration are available from both
/// sides in `O(log n)` without duplicating the data. Both keys are unique:
/// inserting a pair whose left key or right key is already present leaves
/// the map unchanged.
///
/// Positions ([`LeftPos`], [`RightPos`]) name slots directly, which makes
/// switching sides on a position a constant-time reinterpretation; see
/// [`Bimap::flip_left`] and [`Bimap::flip_right`].
///
/// # Examples
///
/// ```
/// use twinmap::Bimap;
///
/// let mut map = Bimap::new();
/// map.insert("alice", 3);
/// map.insert("bob", 7);
///
/// assert_eq!(map.at_left(&"alice"), Ok(&3));
/// assert_eq!(map.at_right(&7), Ok(&"bob"));
///
/// let pos = map.find_left(&"alice");
/// let flipped = map.flip_left(pos);
/// assert_eq!(map.right_value(flipped), Some(&3));
/// ```
pub struct Bimap<L, R, CL = fn(&L, &L) -> Ordering, CR = fn(&R, &R) -> Ordering>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    pub(crate) slots: Vec<Entry<L, R>>,
    free: Vec<u32>,
    pub(crate) left_tree: Tree<Entry<L, R>, LeftFace, CL>,
    pub(crate) right_tree: Tree<Entry<L, R>, RightFace, CR>,
    len: usize,
}

impl<L, R> Bimap<L, R, fn(&L, &L) -> Ordering, fn(&R, &R) -> Ordering>
where
    L: Ord,
    R: Ord,
{
    pub fn new() -> Self {
        Self::with_comparators(default_comparator::<L>, default_comparator::<R>)
    }
}

impl<L, R> Default for Bimap<L, R, fn(&L, &L) -> Ordering, fn(&R, &R) -> Ordering>
where
    L: Ord,
    R: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    /// Build a map whose sides are ordered by the given comparators.
    pub fn with_comparators(left: CL, right: CR) -> Self {
        let mut slots = vec![Entry::bare(), Entry::bare()];
        connect::<_, LeftFace, RightFace>(&mut slots, HEAD_LEFT, HEAD_RIGHT);
        Self {
            slots,
            free: Vec::new(),
            left_tree: Tree::new(HEAD_LEFT, left),
            right_tree: Tree::new(HEAD_RIGHT, right),
            len: 0,
        }
    }

    fn alloc(&mut self, entry: Entry<L, R>) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = entry;
                idx
            }
            None => {
                self.slots.push(entry);
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Unlink a live slot from both trees and put it on the free list.
    fn remove_entry(&mut self, node: u32) -> (u32, u32) {
        let left_succ = self.left_tree.remove(&mut self.slots, node);
        let right_succ = self.right_tree.remove(&mut self.slots, node);
        self.slots[node as usize] = Entry::bare();
        self.free.push(node);
        self.len -= 1;
        (left_succ, right_succ)
    }

    fn live_index(&self, idx: u32) -> Option<u32> {
        match self.slots.get(idx as usize) {
            Some(slot) if slot.is_live() => Some(idx),
            _ => None,
        }
    }

    /// Insert a pair. Returns the new entry's left position, or
    /// [`Bimap::end_left`] without touching the map when either key is
    /// already present.
    pub fn insert(&mut self, left: L, right: R) -> LeftPos {
        if self.left_tree.find(&self.slots, &left).is_some()
            || self.right_tree.find(&self.slots, &right).is_some()
        {
            return self.end_left();
        }
        let node = self.alloc(Entry::new(left, right));
        self.right_tree.insert(&mut self.slots, node);
        self.left_tree.insert(&mut self.slots, node);
        self.len += 1;
        LeftPos(node)
    }

    /// Erase the entry at `pos`, returning the next left position. A dead
    /// position is returned unchanged.
    pub fn erase_left_at(&mut self, pos: LeftPos) -> LeftPos {
        let Some(node) = self.live_index(pos.0) else {
            return pos;
        };
        let (left_succ, _) = self.remove_entry(node);
        LeftPos(left_succ)
    }

    /// Erase the entry at `pos`, returning the next right position. A dead
    /// position is returned unchanged.
    pub fn erase_right_at(&mut self, pos: RightPos) -> RightPos {
        let Some(node) = self.live_index(pos.0) else {
            return pos;
        };
        let (_, right_succ) = self.remove_entry(node);
        RightPos(right_succ)
    }

    /// Erase by left key. Returns whether an entry was removed.
    pub fn erase_left(&mut self, key: &L) -> bool {
        let Some(node) = self.left_tree.find(&self.slots, key) else {
            return false;
        };
        self.remove_entry(node);
        true
    }

    /// Erase by right key. Returns whether an entry was removed.
    pub fn erase_right(&mut self, key: &R) -> bool {
        let Some(node) = self.right_tree.find(&self.slots, key) else {
            return false;
        };
        self.remove_entry(node);
        true
    }

    /// Erase every entry in `[first, last)` of the left order.
    pub fn erase_left_range(&mut self, first: LeftPos, last: LeftPos) -> LeftPos {
        let mut curr = first;
        while curr != last && curr != self.end_left() {
            let next = self.erase_left_at(curr);
            if next == curr {
                break;
            }
            curr = next;
        }
        last
    }

    /// Erase every entry in `[first, last)` of the right order.
    pub fn erase_right_range(&mut self, first: RightPos, last: RightPos) -> RightPos {
        let mut curr = first;
        while curr != last && curr != self.end_right() {
            let next = self.erase_right_at(curr);
            if next == curr {
                break;
            }
            curr = next;
        }
        last
    }

    /// Position of the entry with this left key, or [`Bimap::end_left`].
    pub fn find_left(&self, key: &L) -> LeftPos {
        match self.left_tree.find(&self.slots, key) {
            Some(node) => LeftPos(node),
            None => self.end_left(),
        }
    }

    /// Position of the entry with this right key, or [`Bimap::end_right`].
    pub fn find_right(&self, key: &R) -> RightPos {
        match self.right_tree.find(&self.slots, key) {
            Some(node) => RightPos(node),
            None => self.end_right(),
        }
    }

    /// The right key paired with this left key.
    pub fn at_left(&self, key: &L) -> Result<&R, KeyNotFound> {
        let node = self.left_tree.find(&self.slots, key).ok_or(KeyNotFound)?;
        Ok(self.slots[node as usize]
            .right
            .as_ref()
            .expect("live entry holds both values"))
    }

    /// The left key paired with this right key.
    pub fn at_right(&self, key: &R) -> Result<&L, KeyNotFound> {
        let node = self.right_tree.find(&self.slots, key).ok_or(KeyNotFound)?;
        Ok(self.slots[node as usize]
            .left
            .as_ref()
            .expect("live entry holds both values"))
    }

    /// The right key paired with `key`, inserting `(key, R::default())`
    /// when absent. An existing entry already using `R::default()` as its
    /// right key is evicted to keep the right side unique.
    pub fn at_left_or_default(&mut self, key: L) -> &R
    where
        R: Default,
    {
        if let Some(node) = self.left_tree.find(&self.slots, &key) {
            return self.slots[node as usize]
                .right
                .as_ref()
                .expect("live entry holds both values");
        }
        let right = R::default();
        if let Some(existing) = self.right_tree.find(&self.slots, &right) {
            self.remove_entry(existing);
        }
        let node = self.alloc(Entry::new(key, right));
        self.right_tree.insert(&mut self.slots, node);
        self.left_tree.insert(&mut self.slots, node);
        self.len += 1;
        self.slots[node as usize]
            .right
            .as_ref()
            .expect("live entry holds both values")
    }

    /// The left key paired with `key`, inserting `(L::default(), key)`
    /// when absent. An existing entry already using `L::default()` as its
    /// left key is evicted to keep the left side unique.
    pub fn at_right_or_default(&mut self, key: R) -> &L
    where
        L: Default,
    {
        if let Some(node) = self.right_tree.find(&self.slots, &key) {
            return self.slots[node as usize]
                .left
                .as_ref()
                .expect("live entry holds both values");
        }
        let left = L::default();
        if let Some(existing) = self.left_tree.find(&self.slots, &left) {
            self.remove_entry(existing);
        }
        let node = self.alloc(Entry::new(left, key));
        self.right_tree.insert(&mut self.slots, node);
        self.left_tree.insert(&mut self.slots, node);
        self.len += 1;
        self.slots[node as usize]
            .left
            .as_ref()
            .expect("live entry holds both values")
    }

    pub fn get_left(&self, key: &L) -> Option<&R> {
        let node = self.left_tree.find(&self.slots, key)?;
        self.slots[node as usize].right.as_ref()
    }

    pub fn get_right(&self, key: &R) -> Option<&L> {
        let node = self.right_tree.find(&self.slots, key)?;
        self.slots[node as usize].left.as_ref()
    }

    pub fn contains_left(&self, key: &L) -> bool {
        self.left_tree.find(&self.slots, key).is_some()
    }

    pub fn contains_right(&self, key: &R) -> bool {
        self.right_tree.find(&self.slots, key).is_some()
    }

    /// First left position whose key is not less than `key`.
    pub fn lower_bound_left(&self, key: &L) -> LeftPos {
        LeftPos(self.left_tree.lower_bound(&self.slots, key))
    }

    /// First left position whose key is strictly greater than `key`.
    pub fn upper_bound_left(&self, key: &L) -> LeftPos {
        LeftPos(self.left_tree.upper_bound(&self.slots, key))
    }

    /// First right position whose key is not less than `key`.
    pub fn lower_bound_right(&self, key: &R) -> RightPos {
        RightPos(self.right_tree.lower_bound(&self.slots, key))
    }

    /// First right position whose key is strictly greater than `key`.
    pub fn upper_bound_right(&self, key: &R) -> RightPos {
        RightPos(self.right_tree.upper_bound(&self.slots, key))
    }

    /// Smallest left position. Equals [`Bimap::end_left`] when empty.
    pub fn begin_left(&self) -> LeftPos {
        LeftPos(self.left_tree.begin(&self.slots))
    }

    /// Past-the-end left position.
    pub fn end_left(&self) -> LeftPos {
        LeftPos(self.left_tree.end())
    }

    /// Smallest right position. Equals [`Bimap::end_right`] when empty.
    pub fn begin_right(&self) -> RightPos {
        RightPos(self.right_tree.begin(&self.slots))
    }

    /// Past-the-end right position.
    pub fn end_right(&self) -> RightPos {
        RightPos(self.right_tree.end())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The left key at a position. `None` at the end or on a dead position.
    pub fn left_value(&self, pos: LeftPos) -> Option<&L> {
        self.slots.get(pos.0 as usize).and_then(|slot| slot.left.as_ref())
    }

    /// The right key at a position. `None` at the end or on a dead position.
    pub fn right_value(&self, pos: RightPos) -> Option<&R> {
        self.slots.get(pos.0 as usize).and_then(|slot| slot.right.as_ref())
    }

    /// Both keys at a left position, left key first.
    pub fn pair_left(&self, pos: LeftPos) -> Option<(&L, &R)> {
        let slot = self.slots.get(pos.0 as usize)?;
        Some((slot.left.as_ref()?, slot.right.as_ref()?))
    }

    /// Both keys at a right position, right key first.
    pub fn pair_right(&self, pos: RightPos) -> Option<(&R, &L)> {
        let slot = self.slots.get(pos.0 as usize)?;
        Some((slot.right.as_ref()?, slot.left.as_ref()?))
    }

    /// Step forward in the left order. Saturates at the end.
    pub fn next_left(&self, pos: LeftPos) -> LeftPos {
        match self.live_index(pos.0) {
            Some(node) => LeftPos(
                self.left_tree
                    .next(&self.slots, node)
                    .expect("live entry is linked"),
            ),
            None => pos,
        }
    }

    /// Step forward in the right order. Saturates at the end.
    pub fn next_right(&self, pos: RightPos) -> RightPos {
        match self.live_index(pos.0) {
            Some(node) => RightPos(
                self.right_tree
                    .next(&self.slots, node)
                    .expect("live entry is linked"),
            ),
            None => pos,
        }
    }

    /// Step backward in the left order. The end position steps to the
    /// largest entry; the first entry saturates.
    pub fn prev_left(&self, pos: LeftPos) -> LeftPos {
        if pos == self.end_left() {
            return match self.left_tree.prev(&self.slots, pos.0) {
                Some(node) => LeftPos(node),
                None => pos,
            };
        }
        match self.live_index(pos.0) {
            Some(node) => self.left_tree.prev(&self.slots, node).map_or(pos, LeftPos),
            None => pos,
        }
    }

    /// Step backward in the right order. The end position steps to the
    /// largest entry; the first entry saturates.
    pub fn prev_right(&self, pos: RightPos) -> RightPos {
        if pos == self.end_right() {
            return match self.right_tree.prev(&self.slots, pos.0) {
                Some(node) => RightPos(node),
                None => pos,
            };
        }
        match self.live_index(pos.0) {
            Some(node) => self
                .right_tree
                .prev(&self.slots, node)
                .map_or(pos, RightPos),
            None => pos,
        }
    }

    /// Reinterpret a left position as a right position on the same entry.
    /// The left end maps to the right end. Constant time.
    pub fn flip_left(&self, pos: LeftPos) -> RightPos {
        if pos == self.end_left() {
            return RightPos(
                self.left_tree
                    .connected_end(&self.slots)
                    .expect("heads are connected"),
            );
        }
        RightPos(pos.0)
    }

    /// Reinterpret a right position as a left position on the same entry.
    /// The right end maps to the left end. Constant time.
    pub fn flip_right(&self, pos: RightPos) -> LeftPos {
        if pos == self.end_right() {
            return LeftPos(
                self.right_tree
                    .connected_end(&self.slots)
                    .expect("heads are connected"),
            );
        }
        LeftPos(pos.0)
    }

    /// Exchange the contents of two maps. Positions follow their entries.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Drop every entry and release the slot storage.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.slots.push(Entry::bare());
        self.slots.push(Entry::bare());
        connect::<_, LeftFace, RightFace>(&mut self.slots, HEAD_LEFT, HEAD_RIGHT);
        self.free.clear();
        self.len = 0;
    }

    /// Iterate pairs in ascending left-key order.
    pub fn iter_left(&self) -> LeftIter<'_, L, R, CL, CR> {
        LeftIter {
            map: self,
            front: self.left_tree.begin(&self.slots),
            back: self.left_tree.end(),
            remaining: self.len,
        }
    }

    /// Iterate pairs in ascending right-key order.
    pub fn iter_right(&self) -> RightIter<'_, L, R, CL, CR> {
        RightIter {
            map: self,
            front: self.right_tree.begin(&self.slots),
            back: self.right_tree.end(),
            remaining: self.len,
        }
    }

    /// Validate both trees, the head cross links, slot payload pairing and
    /// the free list.
    pub fn check_invariants(&self) -> Result<(), String> {
        let left_count = self.left_tree.check(&self.slots)?;
        if left_count != self.len {
            return Err(format!(
                "Left tree holds {left_count} entries, len is {}",
                self.len
            ));
        }
        let right_count = self.right_tree.check(&self.slots)?;
        if right_count != self.len {
            return Err(format!(
                "Right tree holds {right_count} entries, len is {}",
                self.len
            ));
        }
        if self.left_tree.connected_end(&self.slots) != Some(HEAD_RIGHT)
            || self.right_tree.connected_end(&self.slots) != Some(HEAD_LEFT)
        {
            return Err("Head cross links are broken".to_string());
        }

        let mut live = 0usize;
        for (i, slot) in self.slots.iter().enumerate().skip(2) {
            match (&slot.left, &slot.right) {
                (Some(_), Some(_)) => live += 1,
                (None, None) => {}
                _ => return Err(format!("Slot {i} holds only one value")),
            }
        }
        if live != self.len {
            return Err(format!("Live slot count {live}, len is {}", self.len));
        }

        for &idx in &self.free {
            let Some(slot) = self.slots.get(idx as usize) else {
                return Err(format!("Free list entry {idx} is out of range"));
            };
            if idx == HEAD_LEFT || idx == HEAD_RIGHT {
                return Err(format!("Free list entry {idx} is a head"));
            }
            if slot.is_live() {
                return Err(format!("Free list entry {idx} is live"));
            }
        }
        if self.free.len() != self.slots.len() - 2 - self.len {
            return Err(format!(
                "Free list holds {} slots, expected {}",
                self.free.len(),
                self.slots.len() - 2 - self.len
            ));
        }
        Ok(())
    }
}

impl<L, R, CL, CR> PartialEq for Bimap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    /// Equality under this map's comparators: same length and pairwise
    /// equivalent entries in left order.
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut a = self.begin_left();
        let mut b = other.begin_left();
        while a != self.end_left() && b != other.end_left() {
            let (al, ar) = self.pair_left(a).expect("live entry");
            let (bl, br) = other.pair_left(b).expect("live entry");
            if (self.left_tree.comparator())(al, bl) != Ordering::Equal
                || (self.right_tree.comparator())(ar, br) != Ordering::Equal
            {
                return false;
            }
            a = self.next_left(a);
            b = other.next_left(b);
        }
        true
    }
}

impl<L, R, CL, CR> Clone for Bimap<L, R, CL, CR>
where
    L: Clone,
    R: Clone,
    CL: Fn(&L, &L) -> Ordering + Clone,
    CR: Fn(&R, &R) -> Ordering + Clone,
{
    /// Deep copy: entries are re-inserted into a fresh map, so slot
    /// assignment, and therefore positions, may differ from the source.
    fn clone(&self) -> Self {
        let mut map = Self::with_comparators(
            self.left_tree.comparator().clone(),
            self.right_tree.comparator().clone(),
        );
        for (l, r) in self.iter_left() {
            map.insert(l.clone(), r.clone());
        }
        map
    }
}

impl<L, R, CL, CR> fmt::Debug for Bimap<L, R, CL, CR>
where
    L: fmt::Debug,
    R: fmt::Debug,
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L, R> FromIterator<(L, R)> for Bimap<L, R, fn(&L, &L) -> Ordering, fn(&R, &R) -> Ordering>
where
    L: Ord,
    R: Ord,
{
    /// Collect pairs, first occurrence of a key winning.
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<L, R, CL, CR> Extend<(L, R)> for Bimap<L, R, CL, CR>
where
    CL: Fn(&L, &L) -> Ordering,
    CR: Fn(&R, &R) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_map_is_empty_and_valid() {
        let map: Bimap<i32, i32> = Bimap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.begin_left(), map.end_left());
        assert_eq!(map.begin_right(), map.end_right());
        map.check_invariants().unwrap();
    }

    #[test]
    fn erased_slot_is_recycled() {
        let mut map = Bimap::new();
        map.insert(1, 10);
        let pos = map.insert(2, 20);
        map.insert(3, 30);

        map.erase_left_at(pos);
        map.check_invariants().unwrap();

        let reused = map.insert(4, 40);
        assert_eq!(reused, pos);
        map.check_invariants().unwrap();
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn clear_resets_heads_and_cross_links() {
        let mut map = Bimap::new();
        for i in 0..10 {
            map.insert(i, i * 2);
        }
        map.clear();
        assert!(map.is_empty());
        map.check_invariants().unwrap();
        assert_eq!(map.flip_left(map.end_left()), map.end_right());

        map.insert(5, 50);
        assert_eq!(map.at_left(&5), Ok(&50));
        map.check_invariants().unwrap();
    }
}
