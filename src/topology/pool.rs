//! Generational slot arena.
//!
//! Each element class of a model is stored in its own [`Pool`]. Slots are
//! reused through a free list, with a per-slot generation counter bumped on
//! reuse so stale handles are detected rather than aliased. Iteration is in
//! slot order, which is the encounter order compaction and the model stream
//! writer rely on.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::model_error::ModelError;
use crate::topology::handle::Handle;

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied { generation: u32, elem: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Arena of `T` addressed by generational handles of type `H`.
#[derive(Clone, Debug)]
pub struct Pool<T, H: Handle> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    live: usize,
    _handle: PhantomData<H>,
}

impl<T, H: Handle> Default for Pool<T, H> {
    fn default() -> Self {
        Self { slots: Vec::new(), free_head: None, live: 0, _handle: PhantomData }
    }
}

impl<T, H: Handle> Pool<T, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots, live or vacant. Upper bound for `H::slot()` values.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores `elem`, reusing a vacant slot if one exists.
    pub fn insert(&mut self, elem: T) -> H {
        self.live += 1;
        if let Some(idx) = self.free_head {
            let slot = &mut self.slots[idx as usize];
            let generation = match *slot {
                Slot::Vacant { generation, next_free } => {
                    self.free_head = next_free;
                    generation.wrapping_add(1).max(1)
                }
                // free list only holds vacant slots
                Slot::Occupied { .. } => unreachable!("free list entry is occupied"),
            };
            *slot = Slot::Occupied { generation, elem };
            H::compose(idx, generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot::Occupied { generation: 1, elem });
            H::compose(idx, 1)
        }
    }

    /// Frees the element named by `h` and returns it.
    pub fn remove(&mut self, h: H) -> Result<T, ModelError> {
        let idx = h.slot() as usize;
        match self.slots.get_mut(idx) {
            Some(slot) => match slot {
                Slot::Occupied { generation, .. } if *generation == h.generation() => {
                    let generation = *generation;
                    let vacant = Slot::Vacant { generation, next_free: self.free_head };
                    let prev = std::mem::replace(slot, vacant);
                    self.free_head = Some(h.slot());
                    self.live -= 1;
                    match prev {
                        Slot::Occupied { elem, .. } => Ok(elem),
                        Slot::Vacant { .. } => unreachable!("slot matched occupied"),
                    }
                }
                _ => Err(stale(h)),
            },
            None => Err(stale(h)),
        }
    }

    /// True when `h` names a live element.
    pub fn contains(&self, h: H) -> bool {
        matches!(
            self.slots.get(h.slot() as usize),
            Some(Slot::Occupied { generation, .. }) if *generation == h.generation()
        )
    }

    pub fn get(&self, h: H) -> Result<&T, ModelError> {
        match self.slots.get(h.slot() as usize) {
            Some(Slot::Occupied { generation, elem }) if *generation == h.generation() => Ok(elem),
            _ => Err(stale(h)),
        }
    }

    pub fn get_mut(&mut self, h: H) -> Result<&mut T, ModelError> {
        match self.slots.get_mut(h.slot() as usize) {
            Some(Slot::Occupied { generation, elem }) if *generation == h.generation() => Ok(elem),
            _ => Err(stale(h)),
        }
    }

    /// Live elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| match slot {
            Slot::Occupied { generation, elem } => {
                Some((H::compose(idx as u32, *generation), elem))
            }
            Slot::Vacant { .. } => None,
        })
    }

    /// Live handles in slot order.
    pub fn handles(&self) -> impl Iterator<Item = H> + '_ {
        self.iter().map(|(h, _)| h)
    }
}

fn stale<H: Handle>(h: H) -> ModelError {
    ModelError::StaleHandle { kind: H::KIND, raw: h.raw() }
}

/// Kernel-internal access. The construction and deletion walks only hold
/// handles of live elements, so staleness here is a kernel bug.
impl<T, H: Handle> Index<H> for Pool<T, H> {
    type Output = T;

    fn index(&self, h: H) -> &T {
        match self.get(h) {
            Ok(elem) => elem,
            Err(_) => panic!("access through stale handle {h:?}"),
        }
    }
}

impl<T, H: Handle> IndexMut<H> for Pool<T, H> {
    fn index_mut(&mut self, h: H) -> &mut T {
        match self.get_mut(h) {
            Ok(elem) => elem,
            Err(_) => panic!("access through stale handle {h:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::handle::VertexUseId;

    #[test]
    fn insert_get_remove() {
        let mut pool: Pool<i32, VertexUseId> = Pool::new();
        let a = pool.insert(10);
        let b = pool.insert(20);
        assert_eq!(pool.len(), 2);
        assert_eq!(*pool.get(a).unwrap(), 10);
        assert_eq!(pool.remove(a).unwrap(), 10);
        assert_eq!(pool.len(), 1);
        assert!(!pool.contains(a));
        assert!(pool.contains(b));
    }

    #[test]
    fn reuse_bumps_generation() {
        let mut pool: Pool<i32, VertexUseId> = Pool::new();
        let a = pool.insert(1);
        pool.remove(a).unwrap();
        let b = pool.insert(2);
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a.generation(), b.generation());
        assert!(pool.get(a).is_err());
        assert_eq!(*pool.get(b).unwrap(), 2);
    }

    #[test]
    fn iter_is_slot_ordered_and_skips_vacant() {
        let mut pool: Pool<i32, VertexUseId> = Pool::new();
        let a = pool.insert(1);
        let b = pool.insert(2);
        let c = pool.insert(3);
        pool.remove(b).unwrap();
        let got: Vec<_> = pool.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(got, vec![(a, 1), (c, 3)]);
    }

    #[test]
    #[should_panic(expected = "stale handle")]
    fn index_panics_on_stale() {
        let mut pool: Pool<i32, VertexUseId> = Pool::new();
        let a = pool.insert(1);
        pool.remove(a).unwrap();
        let _ = pool[a];
    }
}
