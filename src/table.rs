//! Open-addressing hash table keyed by heap strings
//!
//! A building block for later stages of the language (string interning,
//! variable bindings). Nothing in the compile-and-execute pipeline uses
//! it yet; it exists alongside the precomputed string hash it consumes.
//!
//! Keys are handles to string objects and compare by content, so two
//! distinct heap strings with the same characters address the same entry.

use crate::object::{Handle, Heap};
use crate::value::Value;

const TABLE_MAX_LOAD: f64 = 0.75;
const INITIAL_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Slot {
    Empty,
    /// A deleted entry; probe sequences continue through it
    Tombstone,
    Occupied { key: Handle, value: Value },
}

/// Hash table from string handles to values
pub struct Table {
    slots: Vec<Slot>,
    /// Occupied slots plus tombstones
    count: usize,
    /// Occupied slots only
    live: usize,
}

impl Table {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
            live: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Look up the value stored under `key`'s contents
    pub fn get(&self, heap: &Heap, key: Handle) -> Option<Value> {
        if self.live == 0 {
            return None;
        }
        match self.slots[self.find_slot(heap, key)] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Insert or update. Returns true when the key was not present before.
    pub fn set(&mut self, heap: &Heap, key: Handle, value: Value) -> bool {
        if (self.count + 1) as f64 > self.slots.len() as f64 * TABLE_MAX_LOAD {
            self.grow(heap);
        }

        let idx = self.find_slot(heap, key);
        match self.slots[idx] {
            Slot::Occupied { .. } => {
                self.slots[idx] = Slot::Occupied { key, value };
                false
            }
            slot => {
                // A tombstone was already counted when it was created
                if matches!(slot, Slot::Empty) {
                    self.count += 1;
                }
                self.live += 1;
                self.slots[idx] = Slot::Occupied { key, value };
                true
            }
        }
    }

    /// Remove the entry for `key`, leaving a tombstone in its slot.
    /// Returns true when an entry was removed.
    pub fn delete(&mut self, heap: &Heap, key: Handle) -> bool {
        if self.live == 0 {
            return false;
        }
        let idx = self.find_slot(heap, key);
        match self.slots[idx] {
            Slot::Occupied { .. } => {
                self.slots[idx] = Slot::Tombstone;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Probe for the slot holding `key`, or the slot where it would be
    /// inserted (the first tombstone on the probe path, else the first
    /// empty slot).
    fn find_slot(&self, heap: &Heap, key: Handle) -> usize {
        let wanted = heap.get_string(key);
        let hash = wanted.map(|s| s.hash).unwrap_or(0);
        let mut index = hash as usize % self.slots.len();
        let mut tombstone: Option<usize> = None;

        loop {
            match self.slots[index] {
                Slot::Empty => return tombstone.unwrap_or(index),
                Slot::Tombstone => {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                }
                Slot::Occupied { key: existing, .. } => {
                    let found = match (wanted, heap.get_string(existing)) {
                        (Some(a), Some(b)) => a.hash == b.hash && a.chars == b.chars,
                        _ => false,
                    };
                    if found {
                        return index;
                    }
                }
            }
            index = (index + 1) % self.slots.len();
        }
    }

    fn grow(&mut self, heap: &Heap) {
        let capacity = if self.slots.is_empty() {
            INITIAL_CAPACITY
        } else {
            self.slots.len() * 2
        };

        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        self.count = 0;
        self.live = 0;

        // Tombstones are dropped on the way over
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.set(heap, key, value);
            }
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
