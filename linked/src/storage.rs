//! Storage trait for slab-like containers with stable keys.
//!
//! Storage provides insert/remove/get operations where keys remain valid
//! until explicitly removed. The list stores its nodes here and links them
//! by key, so a freed node can never be reached again: its key reads back
//! as `None`.

use std::mem;

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable keys**: a key remains valid until explicitly removed
/// - **Vacancy detection**: `get` on a removed or never-issued key is `None`
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - [`VecStorage<T>`] - growable, safe, in this crate
/// - `slab::Slab<T>` - growable (feature `slab`)
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if no further key can be issued.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every value.
    fn clear(&mut self);
}

/// Error returned when storage cannot issue another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// VecStorage - growable, one slot per value, intrusive free list
// =============================================================================

#[derive(Debug, Clone)]
enum Entry<T, K> {
    Occupied(T),
    /// Holds the next vacant key, or `K::NONE` at the end of the free list.
    Vacant(K),
}

/// Growable storage backed by a `Vec` of slots.
///
/// Vacant slots form a free list threaded through the slots themselves,
/// so a removed key is reissued by the next insert. The key space is bounded
/// by `K`: inserting past `K::MAX - 1` slots fails with [`Full`].
///
/// # Example
///
/// ```
/// use linked::{Storage, VecStorage};
///
/// let mut storage: VecStorage<u64> = VecStorage::new();
///
/// let key = storage.try_insert(42).unwrap();
/// assert_eq!(storage.get(key), Some(&42));
/// assert_eq!(storage.remove(key), Some(42));
/// assert_eq!(storage.get(key), None);
/// ```
#[derive(Debug, Clone)]
pub struct VecStorage<T, K: Key = u32> {
    entries: Vec<Entry<T, K>>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> VecStorage<T, K> {
    /// Creates empty storage. Does not allocate.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: K::NONE,
            len: 0,
        }
    }
}

impl<T, K: Key> Default for VecStorage<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Key> Storage<T> for VecStorage<T, K> {
    type Key = K;

    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        // Reuse the most recently freed slot first
        if let Some(entry) = self.entries.get_mut(self.free_head.as_usize()) {
            if let Entry::Vacant(next_free) = *entry {
                let key = self.free_head;
                *entry = Entry::Occupied(value);
                self.free_head = next_free;
                self.len += 1;
                return Ok(key);
            }
        }

        let index = self.entries.len();
        let key = K::from_usize(index);
        if key.is_none() || key.as_usize() != index {
            return Err(Full(value));
        }

        self.entries.push(Entry::Occupied(value));
        self.len += 1;
        Ok(key)
    }

    fn remove(&mut self, key: K) -> Option<T> {
        let entry = self.entries.get_mut(key.as_usize())?;
        if matches!(entry, Entry::Vacant(_)) {
            return None;
        }

        match mem::replace(entry, Entry::Vacant(self.free_head)) {
            Entry::Occupied(value) => {
                self.free_head = key;
                self.len -= 1;
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.entries.get(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.entries.get_mut(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.free_head = K::NONE;
        self.len = 0;
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(slab::Slab::insert(self, value))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    fn clear(&mut self) {
        slab::Slab::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let a = storage.try_insert(1).unwrap();
        let b = storage.try_insert(2).unwrap();

        assert_ne!(a, b);
        assert_eq!(storage.get(a), Some(&1));
        assert_eq!(storage.get(b), Some(&2));
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn removed_key_reads_as_none() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let key = storage.try_insert(7).unwrap();
        assert_eq!(storage.remove(key), Some(7));

        assert_eq!(storage.get(key), None);
        assert_eq!(storage.get_mut(key), None);
        assert_eq!(storage.remove(key), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn none_key_is_never_occupied() {
        let mut storage: VecStorage<u64> = VecStorage::new();
        storage.try_insert(1).unwrap();

        assert_eq!(storage.get(u32::NONE), None);
        assert_eq!(storage.remove(u32::NONE), None);
    }

    #[test]
    fn slot_reuse_after_remove() {
        let mut storage: VecStorage<u64> = VecStorage::new();

        let a = storage.try_insert(1).unwrap();
        let b = storage.try_insert(2).unwrap();
        storage.remove(a);
        storage.remove(b);

        // Free list is LIFO
        assert_eq!(storage.try_insert(3).unwrap(), b);
        assert_eq!(storage.try_insert(4).unwrap(), a);
        assert_eq!(storage.entries.len(), 2);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn full_when_key_space_exhausted() {
        let mut storage: VecStorage<u8, u16> = VecStorage::new();

        // u16::MAX is the sentinel, so u16::MAX slots can be issued
        for i in 0..u16::MAX as usize {
            assert_eq!(storage.try_insert(0).unwrap().as_usize(), i);
        }

        let err = storage.try_insert(9).unwrap_err();
        assert_eq!(err.0, 9);
        assert_eq!(storage.len(), u16::MAX as usize);
    }

    #[test]
    fn clear_resets_everything() {
        let mut storage: VecStorage<u64> = VecStorage::new();
        let a = storage.try_insert(1).unwrap();
        storage.try_insert(2).unwrap();
        storage.remove(a);

        storage.clear();

        assert!(storage.is_empty());
        assert!(storage.entries.is_empty());
        assert_eq!(storage.try_insert(5).unwrap(), 0);
    }
}

#[cfg(all(test, feature = "slab"))]
mod tests_slab {
    use super::*;

    #[test]
    fn slab_removed_key_reads_as_none() {
        let mut storage: slab::Slab<u64> = slab::Slab::new();

        let key = Storage::try_insert(&mut storage, 3).unwrap();
        assert_eq!(Storage::get(&storage, key), Some(&3));
        assert_eq!(Storage::remove(&mut storage, key), Some(3));
        assert_eq!(Storage::get(&storage, key), None);
        assert_eq!(Storage::get(&storage, usize::NONE), None);
    }
}
