//! Arena-based AVL tree utilities for dual-tree containers.
//!
//! A container that keeps every entry in two independent orderings stores
//! both link sets on a single node. Each link set is a *face*: parent, left
//! and right links plus a cached subtree height, addressed through the
//! [`Face`] trait so that one node type can sit in two trees at once.
//! Instead of raw pointers, all links are `Option<u32>` indices into a
//! caller-owned `Vec<N>` arena, so sharing a node between trees never
//! aliases memory.
//!
//! Every tree hangs off a *head* slot reserved in the arena. The head stores
//! no value; its left link holds the root and it doubles as the canonical
//! end position. Two heads can be cross-linked with [`connect`] so that the
//! end position of one tree resolves to the end position of the other.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`face`] | the [`Face`] linkage trait |
//! [`balance`] | height bookkeeping, rotations, `rebalance`, `detach_min` |
//! [`tree`] | the head-anchored ordered [`Tree`] |
//! [`print`] | [`dump`], a debug renderer for one face of an arena |

pub mod balance;
pub mod face;
pub mod print;
pub mod tree;

pub use balance::{height, subtree_max, subtree_min};
pub use face::Face;
pub use print::dump;
pub use tree::{connect, Tree};
