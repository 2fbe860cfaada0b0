//! Mutation and query policy over a `RegistryContainer`.
//!
//! The handler is the only writer of its container and keeps one invariant:
//! a present key always maps to a non-empty bucket. Every operation except
//! [`RegistryHandler::require_key`] is total; absent keys surface as `None` or
//! as a silent no-op.

use crate::error::RegistryKeyNotFound;
use crate::registry::container::{RegistryConfig, RegistryContainer};

#[derive(Clone, Debug, PartialEq)]
/// Owns one container for its whole lifetime.
pub struct RegistryHandler<T> {
    container: RegistryContainer<T>,
}

impl<T> Default for RegistryHandler<T> {
    fn default() -> Self {
        Self {
            container: RegistryContainer::new(),
        }
    }
}

impl<T> RegistryHandler<T> {
    /// A handler over an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing container.
    ///
    /// Empty buckets in the supplied container are dropped on the way in.
    pub fn from_container(mut container: RegistryContainer<T>) -> Self {
        let empty: Vec<String> = container
            .iter()
            .filter(|(_, bucket)| bucket.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        for key in empty {
            container.remove(&key);
        }
        Self { container }
    }

    /// Seed a handler from a parsed config file.
    pub fn from_config(config: RegistryConfig<T>) -> Self {
        Self {
            container: RegistryContainer::from_config(config),
        }
    }

    /// Append every item in order. Duplicates are kept.
    ///
    /// An empty `items` never creates the key.
    pub fn register_many<I>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return;
        }
        self.container.bucket_mut(key.to_string()).extend(items);
    }

    /// Bucket for `key`, or `None` when nothing is registered.
    pub fn load_by_key(&self, key: &str) -> Option<&[T]> {
        self.container.get(key).map(Vec::as_slice)
    }

    /// Bucket for `key`, or [`RegistryKeyNotFound`].
    pub fn require_key(&self, key: &str) -> Result<&[T], RegistryKeyNotFound> {
        self.load_by_key(key).ok_or_else(|| RegistryKeyNotFound::new(key))
    }

    /// First item registered under `key`.
    pub fn get_one(&self, key: &str) -> Option<&T> {
        self.container.get(key).and_then(|bucket| bucket.first())
    }

    /// Remove items under `key`.
    ///
    /// Without a predicate the whole key goes. With one, items for which
    /// `predicate(item, index)` holds are dropped; `index` is the position in
    /// the bucket before filtering. A bucket left empty removes the key.
    pub fn unregister<P>(&mut self, key: &str, predicate: Option<P>)
    where
        P: FnMut(&T, usize) -> bool,
    {
        let Some(mut predicate) = predicate else {
            self.container.remove(key);
            return;
        };
        let Some(bucket) = self.container.get_mut(key) else {
            return;
        };

        let mut index = 0usize;
        bucket.retain(|item| {
            let drop = predicate(item, index);
            index += 1;
            !drop
        });

        if bucket.is_empty() {
            self.container.remove(key);
        }
    }

    /// `unregister` without a predicate.
    pub fn unregister_all(&mut self, key: &str) {
        self.container.remove(key);
    }

    /// Drop one key, or every key when `key` is `None`.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.container.remove(key);
            }
            None => self.container.clear(),
        }
    }

    /// Whether anything is registered under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.container.contains_key(key)
    }

    /// Snapshot of present keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.container.keys().cloned().collect()
    }

    /// Number of distinct keys, not items.
    pub fn size(&self) -> usize {
        self.container.len()
    }

    /// Read-only view of the backing container.
    pub fn container(&self) -> &RegistryContainer<T> {
        &self.container
    }

    /// Give up the handler and keep its container.
    pub fn into_container(self) -> RegistryContainer<T> {
        self.container
    }
}

impl<T: PartialEq> RegistryHandler<T> {
    /// Append `item` under `key` unless an equal item is already there.
    ///
    /// Re-registering under an existing key appends; it never replaces the
    /// bucket.
    pub fn register(&mut self, key: &str, item: T) {
        if let Some(bucket) = self.container.get_mut(key) {
            if !bucket.contains(&item) {
                bucket.push(item);
            }
            return;
        }
        self.container.insert(key.to_string(), vec![item]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums() -> RegistryHandler<i32> {
        let mut handler = RegistryHandler::new();
        handler.register_many("nums", [1, 2, 3, 4]);
        handler
    }

    #[test]
    fn registers_and_retrieves_items() {
        let mut handler = RegistryHandler::new();
        handler.register("foo", "bar");

        assert_eq!(handler.get_one("foo"), Some(&"bar"));
        assert_eq!(handler.require_key("foo").unwrap(), ["bar"]);
    }

    #[test]
    fn register_appends_to_existing_key() {
        let mut handler = RegistryHandler::new();
        handler.register("a", "x");
        assert_eq!(handler.require_key("a").unwrap(), ["x"]);

        handler.register("a", "y");
        assert_eq!(handler.require_key("a").unwrap(), ["x", "y"]);
    }

    #[test]
    fn register_suppresses_duplicates() {
        let mut handler = RegistryHandler::new();
        handler.register("a", "x");
        handler.register("a", "y");
        handler.register("a", "x");
        assert_eq!(handler.require_key("a").unwrap(), ["x", "y"]);
    }

    #[test]
    fn register_many_appends_in_order_with_duplicates() {
        let mut handler = RegistryHandler::new();
        handler.register_many("k", ['a', 'b']);
        handler.register_many("k", ['c', 'a']);
        assert_eq!(handler.require_key("k").unwrap(), ['a', 'b', 'c', 'a']);
    }

    #[test]
    fn register_many_with_no_items_keeps_key_absent() {
        let mut handler: RegistryHandler<i32> = RegistryHandler::new();
        handler.register_many("k", Vec::new());
        assert!(!handler.has("k"));
        assert_eq!(handler.size(), 0);

        handler.register_many("k", [7]);
        handler.register_many("k", Vec::new());
        assert_eq!(handler.require_key("k").unwrap(), [7]);
    }

    #[test]
    fn unregister_filters_by_predicate() {
        let mut handler = nums();
        handler.unregister("nums", Some(|x: &i32, _: usize| x % 2 == 0));
        assert_eq!(handler.require_key("nums").unwrap(), [1, 3]);

        handler.unregister("nums", Some(|_: &i32, _: usize| true));
        assert!(!handler.has("nums"));
    }

    #[test]
    fn unregister_predicate_sees_original_indices() {
        let mut handler = RegistryHandler::new();
        handler.register_many("k", [10, 11, 12, 13, 14]);
        let mut seen = Vec::new();
        handler.unregister(
            "k",
            Some(|_: &i32, idx: usize| {
                seen.push(idx);
                idx == 1 || idx == 3
            }),
        );
        assert_eq!(seen, [0, 1, 2, 3, 4]);
        assert_eq!(handler.require_key("k").unwrap(), [10, 12, 14]);
    }

    #[test]
    fn unregister_without_predicate_drops_key() {
        let mut handler = nums();
        handler.register("other", 9);
        handler.unregister_all("nums");
        assert!(!handler.has("nums"));
        assert_eq!(handler.keys(), ["other"]);
    }

    #[test]
    fn unregister_and_clear_on_absent_key_are_no_ops() {
        let mut handler = nums();
        let before = handler.clone();
        handler.unregister_all("nope");
        handler.unregister("nope", Some(|_: &i32, _: usize| true));
        assert_eq!(handler, before);
        handler.clear(Some("nope"));
        assert_eq!(handler, before);
    }

    #[test]
    fn clears_keys() {
        let mut handler = RegistryHandler::new();
        handler.register("a", "alpha");
        handler.register("b", "beta");

        handler.clear(Some("a"));
        assert_eq!(handler.get_one("a"), None);
        assert_eq!(handler.get_one("b"), Some(&"beta"));

        handler.clear(None);
        assert_eq!(handler.size(), 0);
        assert!(handler.keys().is_empty());
    }

    #[test]
    fn missing_key_contract() {
        let handler: RegistryHandler<String> = RegistryHandler::new();
        assert_eq!(handler.load_by_key("nope"), None);
        assert_eq!(handler.get_one("nope"), None);
        let err = handler.require_key("nope").expect_err("key is absent");
        assert_eq!(err.key, "nope");
    }

    #[test]
    fn keys_follow_insertion_order_and_size_counts_keys() {
        let mut handler = RegistryHandler::new();
        handler.register_many("zeta", [1, 2, 3]);
        handler.register("alpha", 4);
        handler.register("mid", 5);
        assert_eq!(handler.keys(), ["zeta", "alpha", "mid"]);
        assert_eq!(handler.size(), 3);
    }

    #[test]
    fn present_keys_always_have_items() {
        let mut handler = nums();
        handler.register("solo", 1);
        handler.unregister("nums", Some(|x: &i32, _: usize| *x > 2));
        handler.unregister("solo", Some(|_: &i32, _: usize| true));
        for key in handler.keys() {
            let bucket = handler.load_by_key(&key).expect("present key");
            assert!(!bucket.is_empty(), "{key} has an empty bucket");
        }
        assert_eq!(handler.keys(), ["nums"]);
    }

    #[test]
    fn from_container_drops_empty_buckets() {
        let mut container = RegistryContainer::new();
        container.insert("full".into(), vec![1]);
        container.insert("empty".into(), Vec::new());
        let handler = RegistryHandler::from_container(container);
        assert_eq!(handler.keys(), ["full"]);
    }
}
