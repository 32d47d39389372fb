use super::{exceeds_load, grown_capacity, hash_string, Entry, KeyedTable};
use crate::config::{Strategy, DEFAULT_CAPACITY};
use crate::error::{TableError, TableResult};
use std::marker::PhantomData;

/// Offset sequence used by an open-addressing table.
pub trait ProbeSequence {
    const STRATEGY: Strategy;

    /// Slot visited at `step` (0-based) for a key whose home slot is `home`.
    fn slot(home: usize, step: usize, capacity: usize) -> usize;
}

/// `home, home + 1, home + 2, ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

/// `home, home + 1², home + 2², ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

impl ProbeSequence for Linear {
    const STRATEGY: Strategy = Strategy::LinearProbing;

    fn slot(home: usize, step: usize, capacity: usize) -> usize {
        (home + step) % capacity
    }
}

impl ProbeSequence for Quadratic {
    const STRATEGY: Strategy = Strategy::QuadraticProbing;

    fn slot(home: usize, step: usize, capacity: usize) -> usize {
        let step = step % capacity;
        (home + step * step % capacity) % capacity
    }
}

#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    /// Left behind by `remove` so probe chains running through it stay intact.
    Tombstone,
    Occupied(Entry<V>),
}

enum Lookup {
    Found(usize),
    Vacant(usize),
    /// Every probed slot is live and none matches.
    Exhausted,
}

/// Open addressing over a flat slot array; the probe order comes from `P`.
#[derive(Debug, Clone)]
pub struct ProbeTable<V, P> {
    slots: Vec<Slot<V>>,
    count: usize,
    tombstones: usize,
    collisions: usize,
    probe: PhantomData<P>,
}

pub type LinearProbeTable<V> = ProbeTable<V, Linear>;

pub type QuadraticProbeTable<V> = ProbeTable<V, Quadratic>;

impl<V, P: ProbeSequence> Default for ProbeTable<V, P> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V, P: ProbeSequence> ProbeTable<V, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { slots: empty_slots(capacity), count: 0, tombstones: 0, collisions: 0, probe: PhantomData }
    }

    /// Walks the probe sequence for `key`. Stops at a matching key or an empty
    /// slot; the first tombstone passed is reported as the vacancy so
    /// insertions reuse it.
    fn lookup(&self, key: &str) -> Lookup {
        let capacity = self.slots.len();
        let home = hash_string(key, capacity);
        let mut vacancy = None;
        for step in 0..capacity {
            let idx = P::slot(home, step, capacity);
            match &self.slots[idx] {
                Slot::Empty => return Lookup::Vacant(vacancy.unwrap_or(idx)),
                Slot::Tombstone => {
                    vacancy.get_or_insert(idx);
                }
                Slot::Occupied(e) if e.key() == key => return Lookup::Found(idx),
                Slot::Occupied(_) => {}
            }
        }
        vacancy.map_or(Lookup::Exhausted, Lookup::Vacant)
    }

    fn find(&self, key: &str) -> Option<usize> {
        match self.lookup(key) {
            Lookup::Found(idx) => Some(idx),
            _ => None,
        }
    }

    /// Stores an entry whose key is known to be absent. Returns whether it
    /// landed away from its home slot.
    fn place(&mut self, entry: Entry<V>) -> bool {
        loop {
            let idx = match self.lookup(entry.key()) {
                Lookup::Vacant(idx) | Lookup::Found(idx) => idx,
                Lookup::Exhausted => {
                    self.grow();
                    continue;
                }
            };
            let home = hash_string(entry.key(), self.slots.len());
            if matches!(self.slots[idx], Slot::Tombstone) {
                self.tombstones -= 1;
            }
            self.slots[idx] = Slot::Occupied(entry);
            return idx != home;
        }
    }

    fn grow(&mut self) {
        self.rehash(grown_capacity(self.slots.len()));
    }

    /// Re-places every live entry into `capacity` fresh slots, dropping tombstones.
    fn rehash(&mut self, capacity: usize) {
        let old_capacity = self.slots.len();
        let strategy = P::STRATEGY;
        tracing::debug!(%strategy, old_capacity, new_capacity = capacity, entries = self.count, "rehashing table");
        let old = std::mem::replace(&mut self.slots, empty_slots(capacity));
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                self.place(entry);
            }
        }
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

impl<V, P: ProbeSequence> KeyedTable<V> for ProbeTable<V, P> {
    fn put(&mut self, key: String, value: V) {
        if let Some(idx) = self.find(&key) {
            if let Slot::Occupied(e) = &mut self.slots[idx] {
                *e.value_mut() = value;
            }
            return;
        }
        // Tombstones still lengthen probe chains, so they count towards the resize trigger.
        // When live entries alone fit, the slots are rebuilt in place instead of grown.
        let max_load = P::STRATEGY.max_load_factor();
        if exceeds_load(self.count + self.tombstones + 1, self.slots.len(), max_load) {
            if exceeds_load(self.count + 1, self.slots.len(), max_load) {
                while exceeds_load(self.count + 1, self.slots.len(), max_load) {
                    self.grow();
                }
            } else {
                self.rehash(self.slots.len());
            }
        }
        if self.place(Entry::new(key, value)) {
            self.collisions += 1;
        }
        self.count += 1;
    }

    fn get(&self, key: &str) -> TableResult<&V> {
        match self.find(key).map(|idx| &self.slots[idx]) {
            Some(Slot::Occupied(e)) => Ok(e.value()),
            _ => Err(TableError::KeyNotFound(key.to_owned())),
        }
    }

    fn get_mut(&mut self, key: &str) -> TableResult<&mut V> {
        match self.find(key) {
            Some(idx) => match &mut self.slots[idx] {
                Slot::Occupied(e) => Ok(e.value_mut()),
                _ => Err(TableError::KeyNotFound(key.to_owned())),
            },
            None => Err(TableError::KeyNotFound(key.to_owned())),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    fn remove(&mut self, key: &str) -> TableResult<(String, V)> {
        let idx = self.find(key).ok_or_else(|| TableError::KeyNotFound(key.to_owned()))?;
        match std::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count -= 1;
                self.tombstones += 1;
                Ok(entry.into_parts())
            }
            other => {
                self.slots[idx] = other;
                Err(TableError::KeyNotFound(key.to_owned()))
            }
        }
    }

    fn size(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn collision_count(&self) -> usize {
        self.collisions
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        Box::new(self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(e) => Some((e.key(), e.value())),
            _ => None,
        }))
    }
}
