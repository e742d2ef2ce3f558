//! Insertion-ordered multimap used by the configuration tables.

/// Ordered key -> ordered values.
///
/// Keys keep their first-insertion order and each key's values keep
/// registration order, so execution order never depends on hashing.
/// Lookups are linear; machine tables are small.
pub(crate) struct Registry<K, V> {
    entries: Vec<(K, Vec<V>)>,
}

impl<K: PartialEq, V> Registry<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: K, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Values for `key`, empty when the key was never registered.
    pub(crate) fn get(&self, key: &K) -> &[V] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }
}

impl<K: PartialEq, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
