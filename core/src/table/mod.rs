//! String-keyed hash tables with interchangeable collision resolution.
//!
//! All variants hash keys with the same polynomial string hash, computed
//! against the table's *current* capacity, and grow to `2 * capacity + 1`
//! slots once an insertion would push them past their strategy's maximum
//! load factor. [`Table`] wraps the three variants so callers pick a
//! strategy at construction time and program against [`KeyedTable`].

mod chaining;
mod probing;

pub use chaining::ChainingTable;
pub use probing::{LinearProbeTable, QuadraticProbeTable};

use crate::config::{Strategy, DEFAULT_CAPACITY};
use crate::error::TableResult;
use serde::{Deserialize, Serialize};

/// A key/value pair owned by exactly one slot (or chain position) of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// Operations shared by every table variant.
pub trait KeyedTable<V> {
    /// Inserts `value` under `key`, overwriting any existing binding.
    fn put(&mut self, key: String, value: V);

    fn get(&self, key: &str) -> TableResult<&V>;

    fn get_mut(&mut self, key: &str) -> TableResult<&mut V>;

    fn contains(&self, key: &str) -> bool;

    /// Deletes the binding for `key` and hands back the removed pair.
    fn remove(&mut self, key: &str) -> TableResult<(String, V)>;

    /// Number of live entries.
    fn size(&self) -> usize;

    /// Number of slots in the backing store.
    fn capacity(&self) -> usize;

    fn collision_count(&self) -> usize;

    /// Live entries in slot order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_>;

    fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn keys<'a>(&'a self) -> Box<dyn Iterator<Item = &'a str> + 'a>
    where
        V: 'a,
    {
        Box::new(self.iter().map(|(k, _)| k))
    }
}

/// Polynomial string hash reduced modulo `capacity` at every step:
/// `h = (h * 31 + codepoint) mod capacity`.
pub(crate) fn hash_string(key: &str, capacity: usize) -> usize {
    let cap = capacity.max(1) as u64;
    key.chars().fold(0u64, |h, c| (h * 31 + c as u64) % cap) as usize
}

/// Capacity a table grows to from `capacity`. Always odd and strictly larger.
pub fn grown_capacity(capacity: usize) -> usize {
    capacity * 2 + 1
}

pub(crate) fn exceeds_load(entries: usize, capacity: usize, max_load: f64) -> bool {
    entries as f64 / capacity as f64 > max_load
}

/// Point-in-time view of a table's bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    pub strategy: Strategy,
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f64,
    pub collisions: usize,
}

/// A keyed table whose collision strategy is chosen at construction time.
#[derive(Debug, Clone)]
pub enum Table<V> {
    Chaining(ChainingTable<V>),
    Quadratic(QuadraticProbeTable<V>),
    Linear(LinearProbeTable<V>),
}

macro_rules! dispatch {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            Table::Chaining($t) => $body,
            Table::Quadratic($t) => $body,
            Table::Linear($t) => $body,
        }
    };
}

impl<V> Table<V> {
    pub fn new(strategy: Strategy) -> Self {
        Self::with_capacity(strategy, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(strategy: Strategy, capacity: usize) -> Self {
        match strategy {
            Strategy::Chaining => Table::Chaining(ChainingTable::with_capacity(capacity)),
            Strategy::QuadraticProbing => Table::Quadratic(QuadraticProbeTable::with_capacity(capacity)),
            Strategy::LinearProbing => Table::Linear(LinearProbeTable::with_capacity(capacity)),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Table::Chaining(_) => Strategy::Chaining,
            Table::Quadratic(_) => Strategy::QuadraticProbing,
            Table::Linear(_) => Strategy::LinearProbing,
        }
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            strategy: self.strategy(),
            size: self.size(),
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            collisions: self.collision_count(),
        }
    }
}

impl<V> KeyedTable<V> for Table<V> {
    fn put(&mut self, key: String, value: V) {
        dispatch!(self, t => t.put(key, value))
    }

    fn get(&self, key: &str) -> TableResult<&V> {
        dispatch!(self, t => t.get(key))
    }

    fn get_mut(&mut self, key: &str) -> TableResult<&mut V> {
        dispatch!(self, t => t.get_mut(key))
    }

    fn contains(&self, key: &str) -> bool {
        dispatch!(self, t => t.contains(key))
    }

    fn remove(&mut self, key: &str) -> TableResult<(String, V)> {
        dispatch!(self, t => t.remove(key))
    }

    fn size(&self) -> usize {
        dispatch!(self, t => t.size())
    }

    fn capacity(&self) -> usize {
        dispatch!(self, t => t.capacity())
    }

    fn collision_count(&self) -> usize {
        dispatch!(self, t => t.collision_count())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        dispatch!(self, t => t.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_polynomial_definition() {
        // "ab" with capacity 11: ((0*31 + 97) % 11) = 9; (9*31 + 98) % 11 = 377 % 11 = 3
        assert_eq!(hash_string("ab", 11), 3);
        assert_eq!(hash_string("", 11), 0);
        assert!(hash_string("anything at all", 7) < 7);
    }

    #[test]
    fn hash_depends_on_capacity() {
        assert_ne!(hash_string("ab", 11), hash_string("ab", 23));
    }

    #[test]
    fn grown_capacity_is_odd_and_larger() {
        for cap in [1usize, 2, 11, 23, 100] {
            let next = grown_capacity(cap);
            assert!(next > cap);
            assert_eq!(next % 2, 1);
        }
    }

    #[test]
    fn table_reports_its_strategy() {
        for s in Strategy::ALL {
            let t: Table<u32> = Table::new(s);
            assert_eq!(t.strategy(), s);
            assert_eq!(t.capacity(), DEFAULT_CAPACITY);
            assert!(t.is_empty());
        }
    }

    #[test]
    fn stats_snapshot() {
        let mut t: Table<u32> = Table::with_capacity(Strategy::LinearProbing, 8);
        t.put("a".into(), 1);
        t.put("b".into(), 2);
        let stats = t.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 8);
        assert!((stats.load_factor - 0.25).abs() < f64::EPSILON);
    }
}
