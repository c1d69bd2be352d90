use alloc::vec::Vec;
use core::mem;

use super::handle::Handle;

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    // Link to the next vacant slot.
    Vacant(Option<Handle>),
}

/// Slot storage for tree nodes.
///
/// Vacated slots form an intrusive free list and are handed out again before the
/// backing vector grows.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        let handle = if let Some(handle) = self.free_head {
            let slot = &mut self.slots[handle.to_index()];
            let Slot::Vacant(next) = mem::replace(slot, Slot::Occupied(element)) else {
                panic!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            self.free_head = next;
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot::Occupied(element));
            Handle::from_index(self.slots.len() - 1)
        };
        self.len += 1;
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is invalid!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.to_index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is invalid!"),
        }
    }

    /// Moves the element out and pushes its slot onto the free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        if matches!(slot, Slot::Vacant(_)) {
            panic!("`Arena::take()` - `handle` is invalid!");
        }
        let Slot::Occupied(element) = mem::replace(slot, Slot::Vacant(self.free_head)) else {
            unreachable!();
        };
        self.free_head = Some(handle);
        self.len -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;
    use proptest::prelude::*;

    #[test]
    fn capacity_is_reserved_up_front() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    #[test]
    fn vacated_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let c = arena.alloc('c');

        assert_eq!(arena.take(a), 'a');
        assert_eq!(arena.take(c), 'c');
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.alloc('d'), c);
        assert_eq!(arena.alloc('e'), a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut arena = Arena::new();
        let handle = arena.alloc(String::from("left"));
        arena.get_mut(handle).push_str("-heavy");
        assert_eq!(arena.get(handle), "left-heavy");
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(1u8);
        arena.take(handle);
        let _ = arena.get(handle);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `handle` is invalid!")]
    fn double_take_panics() {
        let mut arena = Arena::new();
        let handle = arena.alloc(1u8);
        arena.take(handle);
        arena.take(handle);
    }

    #[test]
    fn clear_forgets_free_list() {
        let mut arena = Arena::new();
        let first = arena.alloc(1u8);
        arena.alloc(2u8);
        arena.take(first);
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.alloc(3u8), Handle::from_index(0));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Alloc(u32),
        Set(usize, u32),
        Take(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u32>().prop_map(Op::Alloc),
            1 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Op::Set(which, value)),
            2 => any::<usize>().prop_map(Op::Take),
        ]
    }

    proptest! {
        #[test]
        fn live_handles_keep_their_values(ops in prop::collection::vec(op_strategy(), 0..256)) {
            let mut live: alloc::vec::Vec<(Handle, u32)> = alloc::vec::Vec::new();
            let mut arena = Arena::new();

            for op in ops {
                match op {
                    Op::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(live.iter().all(|&(h, _)| h != handle));
                        live.push((handle, value));
                    }
                    Op::Set(which, value) if !live.is_empty() => {
                        let index = which % live.len();
                        *arena.get_mut(live[index].0) = value;
                        live[index].1 = value;
                    }
                    Op::Take(which) if !live.is_empty() => {
                        let (handle, expected) = live.swap_remove(which % live.len());
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Op::Set(..) | Op::Take(_) => {}
                }

                prop_assert_eq!(arena.len(), live.len());
                for &(handle, value) in &live {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
