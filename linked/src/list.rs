//! Positional doubly-linked list over keyed node storage.
//!
//! Nodes live in a [`Storage`] arena owned by the list and are linked by
//! key. Every operation addresses elements by zero-based position, walking
//! the chain from whichever end is closer.
//!
//! An empty list holds no nodes and has length 0.
//!
//! # Example
//!
//! ```
//! use linked::List;
//!
//! let mut list: List = List::new();
//!
//! list.append(b"one").unwrap();
//! list.append(b"three").unwrap();
//! list.insert(0, b"two").unwrap(); // after position 0
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.get(1).unwrap(), b"two");
//!
//! // pop hands the payload over to the caller
//! let popped = list.pop(0).unwrap();
//! assert_eq!(popped, b"one");
//! assert_eq!(list.front(), Some(&b"two"[..]));
//! ```
//!
//! # Shrinking
//!
//! ```
//! use linked::List;
//!
//! let mut list: List = List::new();
//! for i in 0u8..10 {
//!     list.append(&[i]).unwrap();
//! }
//!
//! list.shorten(3).unwrap(); // drop 3 from the tail
//! assert_eq!(list.len(), 7);
//!
//! list.truncate(4).unwrap(); // keep the first 4
//! let values: Vec<u8> = list.iter().map(|p| p[0]).collect();
//! assert_eq!(values, vec![0, 1, 2, 3]);
//! ```

use core::fmt;

use log::{debug, trace};

use crate::{Cursor, Iter, Key, ListError, Node, Storage, VecStorage};

/// Default node storage for a list keyed by `K`.
pub type NodeStorage<K = u32> = VecStorage<Node<K>, K>;

/// List backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabList = List<usize, slab::Slab<Node<usize>>>;

/// A doubly-linked list of byte payloads.
///
/// The list owns its storage and tracks head, tail, and length.
///
/// # Type Parameters
///
/// - `K`: Key type (default `u32`)
/// - `S`: Storage type (default [`NodeStorage<K>`])
pub struct List<K: Key = u32, S = NodeStorage<K>>
where
    S: Storage<Node<K>, Key = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
}

impl<K: Key, S> Default for List<K, S>
where
    S: Storage<Node<K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, S> List<K, S>
where
    S: Storage<Node<K>, Key = K> + Default,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self::with_storage(S::default())
    }
}

impl<K: Key, S> List<K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    /// Creates an empty list over the given storage.
    ///
    /// Any values already in `storage` are dropped.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the payload at `pos` without copying it.
    ///
    /// # Errors
    ///
    /// [`ListError::Index`] if `pos >= len`.
    pub fn get(&self, pos: usize) -> Result<&[u8], ListError> {
        let key = self.key_at(pos)?;
        Ok(self.node(key)?.payload())
    }

    /// Returns the payload at `pos` for in-place modification.
    ///
    /// The payload length is fixed; use [`set`](Self::set) to resize.
    ///
    /// # Errors
    ///
    /// [`ListError::Index`] if `pos >= len`.
    pub fn get_mut(&mut self, pos: usize) -> Result<&mut [u8], ListError> {
        let key = self.key_at(pos)?;
        Ok(&mut self.node_mut(key)?.payload)
    }

    /// Replaces the payload at `pos` with a copy of `content`.
    ///
    /// # Errors
    ///
    /// - [`ListError::Index`] if `pos >= len`
    /// - [`ListError::InvalidArgument`] if `content` is empty
    pub fn set(&mut self, pos: usize, content: &[u8]) -> Result<(), ListError> {
        let key = self.key_at(pos)?;
        check_content(content)?;

        self.node_mut(key)?.replace_payload(content);
        trace!("set pos={} bytes={}", pos, content.len());
        Ok(())
    }

    /// Returns the first payload, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&[u8]> {
        self.storage.get(self.head).map(Node::payload)
    }

    /// Returns the last payload, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&[u8]> {
        self.storage.get(self.tail).map(Node::payload)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts a copy of `content` immediately after the element at `pos`.
    ///
    /// The new element ends up at `pos + 1`. Only links are rewired.
    ///
    /// # Errors
    ///
    /// - [`ListError::Index`] if `pos >= len` (always, on an empty list)
    /// - [`ListError::InvalidArgument`] if `content` is empty
    /// - [`ListError::Full`] if storage cannot issue another key
    pub fn insert(&mut self, pos: usize, content: &[u8]) -> Result<(), ListError> {
        let after = self.key_at(pos)?;
        check_content(content)?;

        let key = self.alloc(content)?;
        if let Err(err) = self.link_after(after, key) {
            self.storage.remove(key);
            return Err(err);
        }

        trace!("insert after pos={} len={}", pos, self.len);
        Ok(())
    }

    /// Appends a copy of `content` at the tail.
    ///
    /// Equivalent to `insert(len - 1, content)` on a non-empty list.
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if `content` is empty
    /// - [`ListError::Full`] if storage cannot issue another key
    pub fn append(&mut self, content: &[u8]) -> Result<(), ListError> {
        match self.len.checked_sub(1) {
            Some(last) => self.insert(last, content),
            None => self.prepend(content),
        }
    }

    /// Inserts a copy of `content` before the head.
    ///
    /// # Errors
    ///
    /// - [`ListError::InvalidArgument`] if `content` is empty
    /// - [`ListError::Full`] if storage cannot issue another key
    pub fn prepend(&mut self, content: &[u8]) -> Result<(), ListError> {
        check_content(content)?;

        let key = self.alloc(content)?;
        if let Err(err) = self.link_front(key) {
            self.storage.remove(key);
            return Err(err);
        }

        trace!("prepend len={}", self.len);
        Ok(())
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and frees the element at `pos`, joining its neighbors.
    ///
    /// # Errors
    ///
    /// [`ListError::Index`] if `pos >= len`.
    pub fn remove(&mut self, pos: usize) -> Result<(), ListError> {
        self.take(pos).map(drop)
    }

    /// Removes the element at `pos` and returns its payload.
    ///
    /// The returned buffer is owned by the caller and shares nothing with
    /// the list or with other `pop` results.
    ///
    /// # Errors
    ///
    /// [`ListError::Index`] if `pos >= len`.
    pub fn pop(&mut self, pos: usize) -> Result<Vec<u8>, ListError> {
        self.take(pos).map(Node::into_payload)
    }

    /// Keeps the first `pos` elements and frees the rest.
    ///
    /// `truncate(0)` empties the list.
    ///
    /// # Errors
    ///
    /// [`ListError::Index`] if `pos >= len`.
    pub fn truncate(&mut self, pos: usize) -> Result<(), ListError> {
        if pos >= self.len {
            return Err(self.index_error(pos));
        }

        let expected = self.len - pos;
        let dropped = self.split_tail(pos)?;
        debug!("truncate to {}: dropped {} nodes", pos, dropped);

        if dropped != expected {
            return Err(ListError::NotFound);
        }
        Ok(())
    }

    /// Frees exactly `count` elements from the tail.
    ///
    /// At least one element always remains; empty the list with
    /// [`clear`](Self::clear) or `truncate(0)` instead.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidArgument`] if `count >= len`.
    pub fn shorten(&mut self, count: usize) -> Result<(), ListError> {
        if count >= self.len {
            trace!("shorten rejected: count={} len={}", count, self.len);
            return Err(ListError::InvalidArgument(
                "shorten count must be less than list length",
            ));
        }
        if count == 0 {
            return Ok(());
        }

        let keep = self.len - count;
        let dropped = self.split_tail(keep)?;
        debug!("shorten by {}: dropped {} nodes", count, dropped);

        if dropped != count {
            return Err(ListError::NotFound);
        }
        Ok(())
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} nodes", self.len);
        self.storage.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a cursor already positioned on the first element.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, K, S> {
        Cursor::new(self)
    }

    /// Returns an iterator over payloads, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, S> {
        Iter::new(self)
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Walks the chain and checks the structural invariants.
    ///
    /// Returns `true` when exactly `len` nodes are reachable from the head,
    /// every adjacent pair links both ways, and the walk ends at the tail.
    pub fn is_consistent(&self) -> bool {
        let mut prev = K::NONE;
        let mut key = self.head;
        let mut count = 0;

        while key.is_some() {
            let Some(node) = self.storage.get(key) else {
                return false;
            };
            if node.prev != prev || count == self.len {
                return false;
            }
            prev = key;
            key = node.next;
            count += 1;
        }

        count == self.len && prev == self.tail
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    pub(crate) fn head_key(&self) -> K {
        self.head
    }

    #[inline]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    #[inline]
    fn node(&self, key: K) -> Result<&Node<K>, ListError> {
        if key.is_none() {
            return Err(ListError::NotFound);
        }
        self.storage.get(key).ok_or(ListError::NotFound)
    }

    #[inline]
    fn node_mut(&mut self, key: K) -> Result<&mut Node<K>, ListError> {
        if key.is_none() {
            return Err(ListError::NotFound);
        }
        self.storage.get_mut(key).ok_or(ListError::NotFound)
    }

    fn index_error(&self, pos: usize) -> ListError {
        trace!("position {} rejected, len={}", pos, self.len);
        ListError::Index { pos, len: self.len }
    }

    /// Resolves a position to a key, walking from the nearer end.
    fn key_at(&self, pos: usize) -> Result<K, ListError> {
        if pos >= self.len {
            return Err(self.index_error(pos));
        }

        let mut key;
        if pos <= self.len / 2 {
            key = self.head;
            for _ in 0..pos {
                key = self.node(key)?.next;
            }
        } else {
            key = self.tail;
            for _ in pos + 1..self.len {
                key = self.node(key)?.prev;
            }
        }

        if key.is_none() {
            return Err(ListError::NotFound);
        }
        Ok(key)
    }

    fn alloc(&mut self, content: &[u8]) -> Result<K, ListError> {
        self.storage
            .try_insert(Node::new(content))
            .map_err(|_| ListError::Full)
    }

    fn link_after(&mut self, after: K, key: K) -> Result<(), ListError> {
        let next = self.node(after)?.next;
        if next.is_some() {
            self.node_mut(next)?.prev = key;
        } else {
            self.tail = key;
        }

        let node = self.node_mut(key)?;
        node.prev = after;
        node.next = next;
        self.node_mut(after)?.next = key;

        self.len += 1;
        Ok(())
    }

    fn link_front(&mut self, key: K) -> Result<(), ListError> {
        let head = self.head;
        if head.is_some() {
            self.node_mut(head)?.prev = key;
        } else {
            self.tail = key;
        }

        let node = self.node_mut(key)?;
        node.prev = K::NONE;
        node.next = head;

        self.head = key;
        self.len += 1;
        Ok(())
    }

    fn unlink(&mut self, key: K) -> Result<(), ListError> {
        let node = self.node(key)?;
        let prev = node.prev;
        let next = node.next;

        if prev.is_some() {
            self.node_mut(prev)?.next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.node_mut(next)?.prev = prev;
        } else {
            self.tail = prev;
        }

        self.len -= 1;
        Ok(())
    }

    fn take(&mut self, pos: usize) -> Result<Node<K>, ListError> {
        let key = self.key_at(pos)?;
        self.unlink(key)?;

        let node = self.storage.remove(key).ok_or(ListError::NotFound)?;
        trace!("removed pos={} len={}", pos, self.len);
        Ok(node)
    }

    /// Cuts the chain after the first `keep` elements, then frees the
    /// detached suffix. Returns the number of nodes freed.
    ///
    /// The chain is terminated before anything is freed, so the list is
    /// consistent even if the suffix turns out to be shorter than expected.
    fn split_tail(&mut self, keep: usize) -> Result<usize, ListError> {
        let mut key = if keep == 0 {
            let first = self.head;
            self.head = K::NONE;
            self.tail = K::NONE;
            first
        } else {
            let new_tail = self.key_at(keep - 1)?;
            let node = self.node_mut(new_tail)?;
            let first = node.next;
            node.next = K::NONE;
            self.tail = new_tail;
            first
        };
        self.len = keep;

        let mut dropped = 0;
        while key.is_some() {
            let Some(node) = self.storage.remove(key) else {
                break;
            };
            key = node.next;
            dropped += 1;
        }
        Ok(dropped)
    }
}

impl<K: Key, S> fmt::Debug for List<K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K: Key, S> IntoIterator for &'a List<K, S>
where
    S: Storage<Node<K>, Key = K>,
{
    type Item = &'a [u8];
    type IntoIter = Iter<'a, K, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn check_content(content: &[u8]) -> Result<(), ListError> {
    if content.is_empty() {
        trace!("empty payload rejected");
        return Err(ListError::InvalidArgument("payload must not be empty"));
    }
    Ok(())
}


#[cfg(all(test, feature = "slab"))]
mod tests_slab {
    use super::*;

    #[test]
    fn slab_list_basic_operations() {
        let mut list: SlabList = List::new();
        for i in 0u8..5 {
            list.append(&[i]).unwrap();
        }

        list.insert(1, &[10]).unwrap();
        list.remove(0).unwrap();
        let popped = list.pop(0).unwrap();

        assert_eq!(popped, vec![1]);
        let values: Vec<u8> = list.iter().map(|p| p[0]).collect();
        assert_eq!(values, vec![10, 2, 3, 4]);
        assert!(list.is_consistent());
    }

    #[test]
    fn slab_list_shrinks() {
        let mut list: SlabList = List::with_storage(slab::Slab::new());
        for i in 0u8..10 {
            list.append(&[i]).unwrap();
        }

        list.shorten(4).unwrap();
        list.truncate(3).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.storage().len(), 3);
        assert!(list.is_consistent());
    }
}

#[cfg(test)]
mod bench_list {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            static START: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
            START.get_or_init(std::time::Instant::now).elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;
    const PAYLOAD: &[u8] = &[0xab; 16];

    #[test]
    #[ignore]
    fn bench_list_append() {
        let mut list: List = List::new();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..WARMUP {
            let _ = list.append(PAYLOAD);
            let _ = list.pop(list.len() - 1);
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            let _ = list.append(PAYLOAD);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.pop(list.len() - 1);
        }

        print_histogram("append", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_get_middle() {
        let mut list: List = List::new();
        for _ in 0..64 {
            list.append(PAYLOAD).unwrap();
        }
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..WARMUP {
            std::hint::black_box(list.get(32).unwrap());
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            std::hint::black_box(list.get(32).unwrap());
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("get (len 64, pos 32)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_insert_remove_head() {
        let mut list: List = List::new();
        list.append(PAYLOAD).unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..WARMUP {
            let _ = list.insert(0, PAYLOAD);
            let _ = list.remove(1);
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            let _ = list.insert(0, PAYLOAD);
            let _ = list.remove(1);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("insert+remove @0", &hist);
    }
}
