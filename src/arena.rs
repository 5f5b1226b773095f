use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn assert_free() -> ! {
    panic!("Attempted to access data of free slot");
}

#[cold]
#[inline(never)]
fn assert_capacity() -> ! {
    panic!("Arena is at maximum capacity ({} slots)", Ptr::MAX_INDEX + 1);
}

/// One position in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) hash: u64,
    pub(crate) prev: Option<Ptr>,
    pub(crate) next: Option<Ptr>,
}

#[derive(Debug, Clone, Copy)]
enum Slot<K> {
    Free { next_free: Option<Ptr> },
    Occupied(Node<K>),
}

/// Slab of list nodes. Freed slots are chained through `next_free` and
/// handed out again before the backing vector grows.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free_head: Option<Ptr>,
    len: usize,
}

impl<K> Arena<K> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let free = self.slots.len() - self.len;
        self.slots.reserve(additional.saturating_sub(free));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Slots can't be compacted: live handles are stored in the index.
        // Only trailing capacity is released.
        self.slots.shrink_to_fit();
    }

    pub(crate) fn alloc(&mut self, key: K, hash: u64, prev: Option<Ptr>, next: Option<Ptr>) -> Ptr {
        let node = Slot::Occupied(Node {
            key,
            hash,
            prev,
            next,
        });

        let ptr = if let Some(ptr) = self.free_head {
            let old = core::mem::replace(&mut self.slots[ptr.unchecked_get()], node);
            self.free_head = match old {
                Slot::Free { next_free } => next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            };
            ptr
        } else {
            if self.slots.len() > Ptr::MAX_INDEX {
                assert_capacity();
            }
            let ptr = Ptr::unchecked_from(self.slots.len());
            self.slots.push(node);
            ptr
        };

        self.len += 1;
        ptr
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(
            self.slots.get(ptr.unchecked_get()),
            Some(Slot::Occupied(_))
        )
    }

    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K> {
        if !self.is_occupied(ptr) {
            assert_free();
        }

        let old = core::mem::replace(
            &mut self.slots[ptr.unchecked_get()],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(ptr);
        self.len -= 1;

        match old {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_free(),
        }
    }
}

impl<K> Index<Ptr> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, index: Ptr) -> &Self::Output {
        match &self.slots[index.unchecked_get()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_free(),
        }
    }
}

impl<K> IndexMut<Ptr> for Arena<K> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        match &mut self.slots[index.unchecked_get()] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_free(),
        }
    }
}
