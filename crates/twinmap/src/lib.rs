//! Bidirectional ordered map.
//!
//! [`Bimap`] stores each `(left, right)` pair once and threads the slot
//! into two AVL trees, one ordered by the left key and one by the right
//! key. Both sides support `O(log n)` lookup, insertion, removal and
//! range queries, and a position on one side converts to the other side
//! in `O(1)` because both orders share the slot index.
//!
//! Keys are unique per side. An insert that would duplicate either key
//! leaves the map unchanged.

mod entry;

pub mod error;
pub mod iter;
pub mod map;

pub use error::KeyNotFound;
pub use iter::{LeftIter, LeftPos, RightIter, RightPos};
pub use map::Bimap;
