//! Key trait for node handles.
//!
//! A [`Key`] addresses one node slot in a [`Storage`](crate::Storage).
//! Links between nodes are keys, and the `NONE` sentinel stands in for an
//! absent neighbor.

/// Trait for key types used to address nodes in storage.
///
/// Provides a sentinel value (`NONE`) and conversion to/from `usize`.
/// Implemented for the unsigned integer types wide enough to address a
/// useful number of nodes.
///
/// # Example
///
/// ```
/// use linked::Key;
///
/// // u32 is a Key with NONE = u32::MAX
/// let key: u32 = 42;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no node".
    ///
    /// For integer types, this is `MAX` (e.g., `u32::MAX`).
    const NONE: Self;

    /// Creates a key from a slot index.
    ///
    /// Values that do not fit are truncated; callers compare
    /// [`as_usize`](Key::as_usize) against the input to detect that.
    fn from_usize(val: usize) -> Self;

    /// Returns the key as a slot index.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

// =============================================================================
// Implementations for integer types
// =============================================================================

impl Key for u16 {
    const NONE: Self = u16::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val as u16
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Key for u32 {
    const NONE: Self = u32::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val as u32
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}

impl Key for usize {
    const NONE: Self = usize::MAX;

    #[inline]
    fn from_usize(val: usize) -> Self {
        val
    }

    #[inline]
    fn as_usize(&self) -> usize {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_key_basics() {
        let key: u32 = 42;
        assert!(!key.is_none());
        assert!(key.is_some());
        assert_eq!(key.as_usize(), 42);

        assert!(u32::NONE.is_none());
        assert!(!u32::NONE.is_some());
    }

    #[test]
    fn from_usize_truncation_is_detectable() {
        let wide = u16::MAX as usize + 5;
        let key = u16::from_usize(wide);
        assert_ne!(key.as_usize(), wide);
    }

    #[test]
    fn none_values() {
        assert_eq!(u16::NONE, u16::MAX);
        assert_eq!(u32::NONE, u32::MAX);
        assert_eq!(usize::NONE, usize::MAX);
    }
}
