//! Shared turn records for the snake body.
//!
//! A pivot is referenced by every segment that has not yet passed it and by
//! the `next` link of the pivot before it. Each slot keeps a reference count;
//! the slot is freed, and its own `next` link released, when the count drops
//! to zero.

use super::action::Direction;
use super::geometry::Vec2;

/// Index of a live pivot slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PivotId(usize);

/// A single turn event at a fixed world location
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub position: Vec2,
    pub direction: Direction,
    pub next: Option<PivotId>,
}

#[derive(Debug, Clone)]
struct Slot {
    pivot: Pivot,
    refs: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PivotArena {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
}

impl PivotArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new pivot. The caller holds the one initial reference.
    pub fn insert(&mut self, position: Vec2, direction: Direction) -> PivotId {
        let slot = Slot {
            pivot: Pivot {
                position,
                direction,
                next: None,
            },
            refs: 1,
        };

        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                PivotId(index)
            }
            None => {
                self.slots.push(Some(slot));
                PivotId(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, id: PivotId) -> Option<&Pivot> {
        self.slot(id).map(|slot| &slot.pivot)
    }

    pub fn retain(&mut self, id: PivotId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.refs += 1;
        }
    }

    /// Drop one reference. Frees the slot on the last one and walks down the
    /// `next` chain releasing links as it goes.
    pub fn release(&mut self, id: PivotId) {
        let mut current = Some(id);

        while let Some(id) = current.take() {
            let Some(slot) = self.slot_mut(id) else {
                return;
            };

            slot.refs -= 1;
            if slot.refs > 0 {
                return;
            }

            current = slot.pivot.next;
            self.slots[id.0] = None;
            self.free.push(id.0);
        }
    }

    /// Link `new` after the last pivot of the chain starting at `start`.
    /// The link holds its own reference to `new`.
    pub fn append(&mut self, start: PivotId, new: PivotId) {
        let mut last = start;
        while let Some(next) = self.get(last).and_then(|pivot| pivot.next) {
            last = next;
        }

        if let Some(slot) = self.slot_mut(last) {
            slot.pivot.next = Some(new);
            self.retain(new);
        }
    }

    /// Number of pivots still referenced
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn slot(&self, id: PivotId) -> Option<&Slot> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: PivotId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_release() {
        let mut arena = PivotArena::new();
        let id = arena.insert(Vec2::new(1.0, 2.0), Direction::Left);

        assert_eq!(arena.live(), 1);
        assert_eq!(arena.get(id).unwrap().direction, Direction::Left);

        arena.release(id);
        assert_eq!(arena.live(), 0);
        assert!(arena.get(id).is_none());
    }

    #[test]
    fn test_shared_pivot_survives_until_last_release() {
        let mut arena = PivotArena::new();
        let id = arena.insert(Vec2::default(), Direction::Right);
        arena.retain(id);
        arena.retain(id);

        arena.release(id);
        arena.release(id);
        assert_eq!(arena.live(), 1);

        arena.release(id);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_release_cascades_down_the_chain() {
        let mut arena = PivotArena::new();
        let first = arena.insert(Vec2::new(0.0, 0.0), Direction::Right);
        let second = arena.insert(Vec2::new(20.0, 0.0), Direction::Down);
        let third = arena.insert(Vec2::new(20.0, 20.0), Direction::Left);

        arena.append(first, second);
        arena.append(first, third);
        // drop the creators' references; only the links keep them alive
        arena.release(second);
        arena.release(third);

        assert_eq!(arena.get(first).unwrap().next, Some(second));
        assert_eq!(arena.get(second).unwrap().next, Some(third));
        assert_eq!(arena.live(), 3);

        arena.release(first);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_chain_stops_at_shared_link() {
        let mut arena = PivotArena::new();
        let first = arena.insert(Vec2::default(), Direction::Right);
        let second = arena.insert(Vec2::default(), Direction::Down);
        arena.append(first, second);

        // a segment still waits on `second` directly
        arena.release(first);
        assert!(arena.get(first).is_none());
        assert!(arena.get(second).is_some());

        arena.release(second);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut arena = PivotArena::new();
        let a = arena.insert(Vec2::default(), Direction::Up);
        arena.release(a);

        let b = arena.insert(Vec2::default(), Direction::Down);
        assert_eq!(a, b);
        assert_eq!(arena.get(b).unwrap().direction, Direction::Down);
    }
}
