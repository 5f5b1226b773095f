//! Doubly linked list recording insertion order.
//!
//! The list owns every node through its [`Arena`]; `head`, `tail` and the
//! per-node `prev`/`next` links are plain handles into that arena.

use tracing::trace;

use crate::Ptr;
use crate::arena::Arena;
use crate::arena::Node;

#[derive(Debug, Clone)]
pub(crate) struct OrderList<K> {
    nodes: Arena<K>,
    head: Option<Ptr>,
    tail: Option<Ptr>,
}

impl<K> OrderList<K> {
    pub(crate) const fn new() -> Self {
        OrderList {
            nodes: Arena::new(),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        OrderList {
            nodes: Arena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn head(&self) -> Option<Ptr> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<Ptr> {
        self.tail
    }

    pub(crate) fn next(&self, ptr: Ptr) -> Option<Ptr> {
        self.nodes[ptr].next
    }

    pub(crate) fn prev(&self, ptr: Ptr) -> Option<Ptr> {
        self.nodes[ptr].prev
    }

    pub(crate) fn node(&self, ptr: Ptr) -> &Node<K> {
        &self.nodes[ptr]
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, ptr: Ptr) -> bool {
        self.nodes.is_occupied(ptr)
    }

    /// Allocates a node for `key` and links it as the new tail.
    pub(crate) fn push_tail(&mut self, key: K, hash: u64) -> Ptr {
        let ptr = self.nodes.alloc(key, hash, self.tail, None);
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(ptr),
            None => self.head = Some(ptr),
        }
        self.tail = Some(ptr);

        trace!(?ptr, len = self.nodes.len(), "linked node at tail");
        ptr
    }

    /// Detaches `ptr` from the chain, frees its slot and returns the node.
    ///
    /// `ptr` must be a member of this list. Only a freed slot is detected
    /// (and panics); a handle from another list is not.
    pub(crate) fn unlink(&mut self, ptr: Ptr) -> Node<K> {
        let node = self.nodes.free(ptr);

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        trace!(?ptr, len = self.nodes.len(), "unlinked node");
        node
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn forward<K: Copy>(list: &OrderList<K>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut cursor = list.head();
        while let Some(ptr) = cursor {
            keys.push(list.node(ptr).key);
            cursor = list.next(ptr);
        }
        keys
    }

    fn backward<K: Copy>(list: &OrderList<K>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut cursor = list.tail();
        while let Some(ptr) = cursor {
            keys.push(list.node(ptr).key);
            cursor = list.prev(ptr);
        }
        keys
    }

    fn assert_chain(list: &OrderList<u32>, expected: &[u32]) {
        assert_eq!(forward(list), expected);
        let mut reversed = backward(list);
        reversed.reverse();
        assert_eq!(reversed, expected);
        assert_eq!(list.len(), expected.len());
        if let Some(head) = list.head() {
            assert_eq!(list.prev(head), None);
        }
        if let Some(tail) = list.tail() {
            assert_eq!(list.next(tail), None);
        }
    }

    #[test]
    fn test_push_into_empty() {
        let mut list = OrderList::new();
        let ptr = list.push_tail(1, 0);

        assert_eq!(list.head(), Some(ptr));
        assert_eq!(list.tail(), Some(ptr));
        assert_chain(&list, &[1]);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut list = OrderList::new();
        for key in [4, 2, 9, 1] {
            list.push_tail(key, 0);
        }
        assert_chain(&list, &[4, 2, 9, 1]);
    }

    #[test]
    fn test_unlink_middle() {
        let mut list = OrderList::new();
        let _a = list.push_tail(1, 0);
        let b = list.push_tail(2, 0);
        let _c = list.push_tail(3, 0);

        let node = list.unlink(b);
        assert_eq!(node.key, 2);
        assert!(!list.contains(b));
        assert_chain(&list, &[1, 3]);
    }

    #[test]
    fn test_unlink_head_and_tail() {
        let mut list = OrderList::new();
        let a = list.push_tail(1, 0);
        let _b = list.push_tail(2, 0);
        let c = list.push_tail(3, 0);

        list.unlink(a);
        assert_chain(&list, &[2, 3]);

        list.unlink(c);
        assert_chain(&list, &[2]);
        assert_eq!(list.head(), list.tail());
    }

    #[test]
    fn test_unlink_only_node() {
        let mut list = OrderList::new();
        let a = list.push_tail(1, 0);

        list.unlink(a);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert_chain(&list, &[]);
    }

    #[test]
    fn test_push_after_unlink_reuses_slot() {
        let mut list = OrderList::new();
        let a = list.push_tail(1, 0);
        list.push_tail(2, 0);
        list.unlink(a);

        let d = list.push_tail(4, 0);
        assert_eq!(d, a);
        assert_chain(&list, &[2, 4]);
    }

    #[test]
    fn test_clear() {
        let mut list = OrderList::new();
        list.push_tail(1, 0);
        list.push_tail(2, 0);
        list.clear();

        assert_chain(&list, &[]);
        list.push_tail(3, 0);
        assert_chain(&list, &[3]);
    }

    #[test]
    #[should_panic(expected = "Attempted to access data of free slot")]
    fn test_unlink_twice_panics() {
        let mut list = OrderList::new();
        let a = list.push_tail(1, 0);
        list.unlink(a);
        list.unlink(a);
    }
}
