//! Backing store for a registry handler.
//!
//! A thin ordered map from slot key to bucket. The container carries no policy
//! of its own; `RegistryHandler` decides when buckets are created, replaced, or
//! dropped so that a present key never maps to an empty bucket.

use indexmap::IndexMap;

/// Parsed form of the config file: key -> items, in file order.
pub type RegistryConfig<T> = IndexMap<String, Vec<T>>;

#[derive(Clone, Debug, PartialEq)]
/// Ordered key -> bucket mapping; iteration follows insertion order.
pub struct RegistryContainer<T> {
    buckets: IndexMap<String, Vec<T>>,
}

impl<T> Default for RegistryContainer<T> {
    fn default() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }
}

impl<T> RegistryContainer<T> {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container from a parsed config, appending per key.
    ///
    /// Keys with an empty item list are skipped so the result never holds an
    /// empty bucket.
    pub fn from_config(config: RegistryConfig<T>) -> Self {
        let mut container = Self::new();
        for (key, items) in config {
            if items.is_empty() {
                continue;
            }
            container.bucket_mut(key).extend(items);
        }
        container
    }

    /// Bucket stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Vec<T>> {
        self.buckets.get(key)
    }

    /// Mutable bucket stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<T>> {
        self.buckets.get_mut(key)
    }

    /// Bucket for `key`, created empty when absent. Callers must not leave it empty.
    pub(crate) fn bucket_mut(&mut self, key: String) -> &mut Vec<T> {
        self.buckets.entry(key).or_default()
    }

    /// Store `bucket` under `key`, returning the bucket it replaced.
    pub fn insert(&mut self, key: String, bucket: Vec<T>) -> Option<Vec<T>> {
        self.buckets.insert(key, bucket)
    }

    /// Remove a key while keeping the relative order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Vec<T>> {
        self.buckets.shift_remove(key)
    }

    /// Whether `key` has a bucket.
    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.buckets.keys()
    }

    /// Key and bucket pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<T>)> {
        self.buckets.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
