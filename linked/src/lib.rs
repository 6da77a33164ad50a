//! Positional doubly-linked list of byte payloads.
//!
//! Elements are opaque byte buffers addressed by zero-based position. The
//! list supports insertion after any position, removal, replacement, bulk
//! shrinking from the tail, and forward traversal.
//!
//! # Design
//!
//! Nodes are not linked by pointer. They live in a slab-like arena and
//! refer to their neighbors by key:
//!
//! ```text
//! Storage (VecStorage, slab::Slab) - owns nodes, issues stable keys
//! List                             - head/tail keys, length, positional ops
//! Cursor / Iter                    - borrow the list, walk next keys
//! ```
//!
//! A freed node's key reads back as `None` from storage, so a stale link is a
//! reported error ([`ListError::NotFound`]), never a dangling read. Cursors
//! and iterators borrow the list, so mutating a list while traversing it is
//! a compile error.
//!
//! An empty list holds zero nodes and has length 0.
//!
//! # Quick Start
//!
//! ```
//! use linked::List;
//!
//! let mut list: List = List::new();
//! for i in 0i32..100 {
//!     list.append(&i.to_le_bytes()).unwrap();
//! }
//!
//! list.shorten(25).unwrap();
//! list.truncate(56).unwrap();
//! assert_eq!(list.len(), 56);
//!
//! for pos in 0..list.len() {
//!     list.set(pos, &42i32.to_le_bytes()).unwrap();
//! }
//! assert!(list.iter().all(|p| p == 42i32.to_le_bytes()));
//! ```
//!
//! # Storage Options
//!
//! | Storage | Key | Use Case |
//! |---------|-----|----------|
//! | [`NodeStorage<K>`] | `u16`, `u32` (default), `usize` | Default choice |
//! | `slab::Slab` | `usize` | Feature `slab`, see `SlabList` |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab` and the `SlabList` alias
//! - `demo` - Build the `linked-demo` driver binary

#![warn(missing_docs)]

pub mod error;
pub mod iter;
pub mod key;
pub mod list;
pub mod node;
pub mod storage;

pub use error::ListError;
pub use iter::{Advance, Cursor, CursorState, Iter};
pub use key::Key;
pub use list::{List, NodeStorage};
pub use node::Node;
pub use storage::{Full, Storage, VecStorage};

#[cfg(feature = "slab")]
pub use list::SlabList;
