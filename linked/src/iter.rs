//! Forward traversal over a [`List`].
//!
//! [`Cursor`] exposes an explicit advance/read protocol: it is positioned on
//! the first element as soon as it is created, and reports
//! [`Advance::Stop`] once it runs past the tail. [`Iter`] is the plain
//! [`Iterator`] form.
//!
//! Both borrow the list, so the list cannot be mutated while either is alive.
//!
//! # Example
//!
//! ```
//! use linked::{Advance, List};
//!
//! let mut list: List = List::new();
//! list.append(b"a").unwrap();
//! list.append(b"b").unwrap();
//!
//! let mut seen = Vec::new();
//! let mut cursor = list.cursor();
//! loop {
//!     if let Some(payload) = cursor.current() {
//!         seen.push(payload.to_vec());
//!     }
//!     if cursor.advance() == Advance::Stop {
//!         break;
//!     }
//! }
//! assert_eq!(seen, vec![b"a".to_vec(), b"b".to_vec()]);
//! ```

use core::iter::FusedIterator;

use crate::{Key, List, Node, Storage};

/// Where a [`Cursor`] is in its traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Not yet advanced. Only observable inside [`Cursor::new`].
    NotStarted,
    /// On a node; [`Cursor::current`] returns its payload.
    Positioned,
    /// Past the tail; [`Cursor::current`] returns `None`.
    Exhausted,
}

/// Outcome of [`Cursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved onto a node.
    Continue,
    /// There was no node to move to; the cursor is exhausted.
    Stop,
}

/// A read-only cursor over a list's payloads, front to back.
pub struct Cursor<'a, K: Key, S>
where
    S: Storage<Node<K>, Key = K>,
{
    list: &'a List<K, S>,
    current: K,
    state: CursorState,
}

impl<'a, K: Key, S> Cursor<'a, K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    /// Creates a cursor and advances it once, onto the first element.
    ///
    /// On an empty list the cursor is immediately exhausted.
    pub fn new(list: &'a List<K, S>) -> Self {
        let mut cursor = Self {
            list,
            current: K::NONE,
            state: CursorState::NotStarted,
        };
        cursor.advance();
        cursor
    }

    /// Moves to the next element.
    ///
    /// Returns [`Advance::Stop`] when there is none; further calls keep
    /// returning `Stop`.
    pub fn advance(&mut self) -> Advance {
        self.current = match self.state {
            CursorState::NotStarted => self.list.head_key(),
            CursorState::Positioned => self
                .list
                .storage()
                .get(self.current)
                .map_or(K::NONE, |node| node.next),
            CursorState::Exhausted => return Advance::Stop,
        };

        if self.list.storage().get(self.current).is_none() {
            self.current = K::NONE;
            self.state = CursorState::Exhausted;
            return Advance::Stop;
        }

        self.state = CursorState::Positioned;
        Advance::Continue
    }

    /// Returns the payload under the cursor without advancing.
    #[inline]
    pub fn current(&self) -> Option<&'a [u8]> {
        if self.state != CursorState::Positioned {
            return None;
        }
        self.list.storage().get(self.current).map(Node::payload)
    }

    /// Returns the traversal state.
    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Returns `true` once the cursor has run past the tail.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }
}

/// Iterator over payloads, front to back.
pub struct Iter<'a, K: Key, S>
where
    S: Storage<Node<K>, Key = K>,
{
    storage: &'a S,
    next: K,
    remaining: usize,
}

impl<'a, K: Key, S> Iter<'a, K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    #[inline]
    pub(crate) fn new(list: &'a List<K, S>) -> Self {
        Self {
            storage: list.storage(),
            next: list.head_key(),
            remaining: list.len(),
        }
    }
}

impl<'a, K: Key + 'a, S> Iterator for Iter<'a, K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let Some(node) = self.storage.get(self.next) else {
            self.remaining = 0;
            return None;
        };
        self.next = node.next;
        self.remaining -= 1;
        Some(node.payload())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: Key + 'a, S> ExactSizeIterator for Iter<'a, K, S> where S: Storage<Node<K>, Key = K> {}

impl<'a, K: Key + 'a, S> FusedIterator for Iter<'a, K, S> where S: Storage<Node<K>, Key = K> {}
