use super::{exceeds_load, grown_capacity, hash_string, Entry, KeyedTable};
use crate::config::{Strategy, DEFAULT_CAPACITY};
use crate::error::{TableError, TableResult};

/// Separate chaining: each slot owns an insertion-ordered bucket of entries.
#[derive(Debug, Clone)]
pub struct ChainingTable<V> {
    buckets: Vec<Vec<Entry<V>>>,
    count: usize,
    collisions: usize,
}

impl<V> Default for ChainingTable<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<V> ChainingTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { buckets: empty_buckets(capacity), count: 0, collisions: 0 }
    }

    fn bucket_of(&self, key: &str) -> usize {
        hash_string(key, self.buckets.len())
    }

    fn position(&self, bucket: usize, key: &str) -> Option<usize> {
        self.buckets[bucket].iter().position(|e| e.key() == key)
    }

    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = grown_capacity(old_capacity);
        tracing::debug!(strategy = "chaining", old_capacity, new_capacity, entries = self.count, "resizing table");
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let b = self.bucket_of(entry.key());
            self.buckets[b].push(entry);
        }
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Vec<Entry<V>>> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}

impl<V> KeyedTable<V> for ChainingTable<V> {
    fn put(&mut self, key: String, value: V) {
        let b = self.bucket_of(&key);
        if let Some(pos) = self.position(b, &key) {
            *self.buckets[b][pos].value_mut() = value;
            return;
        }
        if exceeds_load(self.count + 1, self.buckets.len(), Strategy::Chaining.max_load_factor()) {
            self.grow();
        }
        let b = self.bucket_of(&key);
        if !self.buckets[b].is_empty() {
            self.collisions += 1;
        }
        self.buckets[b].push(Entry::new(key, value));
        self.count += 1;
    }

    fn get(&self, key: &str) -> TableResult<&V> {
        let b = self.bucket_of(key);
        self.buckets[b]
            .iter()
            .find(|e| e.key() == key)
            .map(Entry::value)
            .ok_or_else(|| TableError::KeyNotFound(key.to_owned()))
    }

    fn get_mut(&mut self, key: &str) -> TableResult<&mut V> {
        let b = self.bucket_of(key);
        self.buckets[b]
            .iter_mut()
            .find(|e| e.key() == key)
            .map(Entry::value_mut)
            .ok_or_else(|| TableError::KeyNotFound(key.to_owned()))
    }

    fn contains(&self, key: &str) -> bool {
        let b = self.bucket_of(key);
        self.position(b, key).is_some()
    }

    fn remove(&mut self, key: &str) -> TableResult<(String, V)> {
        let b = self.bucket_of(key);
        let pos = self.position(b, key).ok_or_else(|| TableError::KeyNotFound(key.to_owned()))?;
        self.count -= 1;
        Ok(self.buckets[b].remove(pos).into_parts())
    }

    fn size(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn collision_count(&self) -> usize {
        self.collisions
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &V)> + '_> {
        Box::new(self.buckets.iter().flatten().map(|e| (e.key(), e.value())))
    }
}
