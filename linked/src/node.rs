//! A single link of the list.

use crate::Key;

/// A node in the linked list.
///
/// Holds an owned, exact-length copy of the payload plus `prev`/`next` keys.
/// The links carry no ownership: the list's storage owns every node, and a
/// link is just the key of the neighbor (`K::NONE` when there is none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K: Key = u32> {
    pub(crate) payload: Box<[u8]>,
    pub(crate) prev: K,
    pub(crate) next: K,
}

impl<K: Key> Node<K> {
    /// Creates an unlinked node holding a copy of `content`.
    #[inline]
    pub(crate) fn new(content: &[u8]) -> Self {
        Self {
            payload: content.into(),
            prev: K::NONE,
            next: K::NONE,
        }
    }

    /// Returns the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the payload with a copy of `content`, keeping the links.
    #[inline]
    pub(crate) fn replace_payload(&mut self, content: &[u8]) {
        self.payload = content.into();
    }

    #[inline]
    pub(crate) fn into_payload(self) -> Vec<u8> {
        self.payload.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unlinked_copy() {
        let source = vec![1u8, 2, 3];
        let node: Node = Node::new(&source);
        drop(source);

        assert_eq!(node.payload(), &[1, 2, 3]);
        assert!(node.prev.is_none());
        assert!(node.next.is_none());
    }

    #[test]
    fn replace_payload_keeps_links() {
        let mut node: Node = Node::new(b"abc");
        node.prev = 4;
        node.next = 9;

        node.replace_payload(b"wxyz");

        assert_eq!(node.payload(), b"wxyz");
        assert_eq!(node.prev, 4);
        assert_eq!(node.next, 9);
    }

    #[test]
    fn into_payload_transfers_ownership() {
        let node: Node = Node::new(&[0xde, 0xad]);
        let bytes = node.into_payload();
        assert_eq!(bytes, vec![0xde, 0xad]);
    }
}
