//! Tri-state slots and an identity-hashed open-addressing set.
//!
//! Open-addressing containers need to tell "never used" apart from
//! "used, then removed" without a separate occupancy array. [`Slot`] makes
//! the two sentinel states explicit instead of reserving bit patterns
//! inside the handle.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// One slot of an open-addressing table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Slot<T> {
    /// Never occupied; terminates a probe sequence.
    #[default]
    Empty,
    /// Previously occupied; probing continues past it.
    Tombstone,
    /// Occupied by a live value.
    Valid(T),
}

impl<T> Slot<T> {
    /// Check if the slot holds a live value.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Slot::Valid(_))
    }

    /// Check if the slot was never occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Check if the slot held a value that was removed.
    #[inline]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Borrow the live value, if any.
    #[inline]
    pub const fn as_valid(&self) -> Option<&T> {
        match self {
            Slot::Valid(value) => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

/// Minimum number of slots once the set allocates.
const MIN_CAPACITY: usize = 8;

/// Open-addressing hash set for `Copy` identity values such as handles.
///
/// Linear probing over a power-of-two slot array. Removal leaves a
/// [`Slot::Tombstone`]; tombstones are reused by later inserts and dropped
/// on resize.
#[derive(Clone, Debug)]
pub struct HandleSet<T> {
    slots: Vec<Slot<T>>,
    len: usize,
    tombstones: usize,
}

impl<T: Copy + Eq + Hash> HandleSet<T> {
    /// Create an empty set. Does not allocate.
    pub fn new() -> Self {
        HandleSet {
            slots: Vec::new(),
            len: 0,
            tombstones: 0,
        }
    }

    /// Create a set that can hold `capacity` values without resizing.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::new();
        if capacity > 0 {
            set.slots = vec![Slot::Empty; Self::slots_for(capacity)];
        }
        set
    }

    /// Slot count keeping `count` entries under a 3/4 load factor.
    fn slots_for(count: usize) -> usize {
        (count * 4 / 3 + 1).next_power_of_two().max(MIN_CAPACITY)
    }

    #[inline]
    fn home(&self, value: T) -> usize {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits select a slot"
        )]
        let hash = hasher.finish() as usize;
        hash & (self.slots.len() - 1)
    }

    /// Index of the slot holding `value`, if present.
    fn find(&self, value: T) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        let mask = self.slots.len() - 1;
        let mut pos = self.home(value);
        loop {
            match self.slots[pos] {
                Slot::Empty => return None,
                Slot::Valid(existing) if existing == value => return Some(pos),
                Slot::Valid(_) | Slot::Tombstone => pos = (pos + 1) & mask,
            }
        }
    }

    fn reserve_one(&mut self) {
        let used = self.len + self.tombstones + 1;
        if self.slots.is_empty() || used * 4 > self.slots.len() * 3 {
            self.resize(Self::slots_for(self.len + 1));
        }
    }

    fn resize(&mut self, new_slots: usize) {
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; new_slots]);
        self.tombstones = 0;
        let mask = new_slots - 1;
        for value in old.into_iter().filter_map(|slot| match slot {
            Slot::Valid(value) => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }) {
            let mut pos = self.home(value);
            while self.slots[pos].is_valid() {
                pos = (pos + 1) & mask;
            }
            self.slots[pos] = Slot::Valid(value);
        }
    }

    /// Insert `value`. Returns `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(value) {
            return false;
        }
        self.reserve_one();

        let mask = self.slots.len() - 1;
        let mut pos = self.home(value);
        while self.slots[pos].is_valid() {
            pos = (pos + 1) & mask;
        }
        if self.slots[pos].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[pos] = Slot::Valid(value);
        self.len += 1;
        true
    }

    /// Check whether `value` is present.
    pub fn contains(&self, value: T) -> bool {
        self.find(value).is_some()
    }

    /// Remove `value`. Returns `false` if it was not present.
    pub fn remove(&mut self, value: T) -> bool {
        match self.find(value) {
            Some(pos) => {
                self.slots[pos] = Slot::Tombstone;
                self.len -= 1;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the set holds no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Remove every value, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Iterate live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_valid().copied())
    }

    /// Raw slot view, for inspection in tests and debugging.
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }
}

impl<T: Copy + Eq + Hash> Default for HandleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> FromIterator<T> for HandleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}
