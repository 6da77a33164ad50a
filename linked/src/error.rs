//! Error type for list operations.

use thiserror::Error;

/// Failure reported by a [`List`](crate::List) operation.
///
/// Every operation validates its arguments before touching the list, so an
/// `Err` leaves the list exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// Position outside the valid `[0, len)` range.
    #[error("position {pos} out of range for list of length {len}")]
    Index {
        /// The rejected position.
        pos: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// Empty payload where content is required, or a shrink count the list
    /// cannot satisfy.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A node the chain links to is missing from storage.
    ///
    /// Only reachable when the storage was modified behind the list's back.
    #[error("no node found at a linked position")]
    NotFound,

    /// Storage cannot issue another node key.
    #[error("node storage is full")]
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ListError::Index { pos: 5, len: 3 }.to_string(),
            "position 5 out of range for list of length 3"
        );
        assert_eq!(
            ListError::InvalidArgument("empty payload").to_string(),
            "invalid argument: empty payload"
        );
        assert_eq!(ListError::Full.to_string(), "node storage is full");
    }
}
