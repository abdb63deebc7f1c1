//! Change-notifying sorted map.

use std::collections::BTreeMap;
use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A `BTreeMap`-backed map that emits one [`ChangeEvent`] per mutation.
///
/// The linear ordering is key order, so every event index is the entry's
/// rank among the keys. Unlike [`ObservableMap`](super::ObservableMap),
/// ranks are cheap to compute here, so `Replace` events always carry
/// `Some(index)`.
pub struct ObservableSortedMap<K, V> {
    items: RwLock<BTreeMap<K, V>>,
    changed: Signal<ChangeEvent<(K, V)>>,
}

impl<K, V> Default for ObservableSortedMap<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ObservableSortedMap<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            changed: Signal::new(),
        }
    }

    /// The change-notification stream.
    pub fn changed(&self) -> &Signal<ChangeEvent<(K, V)>> {
        &self.changed
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a clone of the value stored for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.items.read().get(key).cloned()
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.items.read().contains_key(key)
    }

    /// Access the entries through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BTreeMap<K, V>) -> R,
    {
        f(&self.items.read())
    }

    /// Inserts or updates an entry, returning the previous value if the
    /// key was already present.
    ///
    /// A new key emits [`ChangeEvent::Add`] at the key's rank; an update
    /// emits [`ChangeEvent::Replace`] with `index: Some(rank)`.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let (previous, event) = {
            let mut items = self.items.write();
            let previous = items.insert(key.clone(), value.clone());
            let rank = items.range(..&key).count();
            let event = match &previous {
                Some(old) => ChangeEvent::Replace {
                    new_item: (key.clone(), value),
                    old_item: (key, old.clone()),
                    index: Some(rank),
                },
                None => ChangeEvent::Add {
                    item: (key, value),
                    index: rank,
                },
            };
            (previous, event)
        };
        self.changed.emit(event);
        previous
    }

    /// Removes an entry, returning its value if the key was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        let (value, event) = {
            let mut items = self.items.write();
            if !items.contains_key(key) {
                return None;
            }
            let rank = items.range(..key).count();
            let (key, value) = items.remove_entry(key)?;
            let event = ChangeEvent::Remove {
                item: (key, value.clone()),
                index: rank,
            };
            (value, event)
        };
        self.changed.emit(event);
        Some(value)
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.items.write().clear();
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Inserts all entries of `iter` (bulk union).
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        self.items.write().extend(iter);
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Keeps only the entries matching the predicate (bulk except).
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.items.write().retain(keep);
        self.changed.emit(ChangeEvent::Reset);
    }
}

impl<K, V> CollectionSource<(K, V)> for ObservableSortedMap<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn slice(&self, range: Range<usize>) -> Vec<(K, V)> {
        let items = self.items.read();
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        items
            .iter()
            .skip(start)
            .take(end - start)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn changed(&self) -> &Signal<ChangeEvent<(K, V)>> {
        &self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capture(
        map: &ObservableSortedMap<&'static str, i32>,
    ) -> Arc<Mutex<Vec<ChangeEvent<(&'static str, i32)>>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        map.changed().connect(move |event| {
            sink.lock().push(event.clone());
        });
        events
    }

    #[test]
    fn test_insert_reports_rank_in_key_order() {
        let map = ObservableSortedMap::new();
        let events = capture(&map);

        map.insert("m", 1);
        map.insert("a", 2); // sorts before "m"
        map.insert("z", 3); // sorts after both

        let events = events.lock();
        assert_eq!(events[0], ChangeEvent::Add { item: ("m", 1), index: 0 });
        assert_eq!(events[1], ChangeEvent::Add { item: ("a", 2), index: 0 });
        assert_eq!(events[2], ChangeEvent::Add { item: ("z", 3), index: 2 });
    }

    #[test]
    fn test_update_emits_replace_with_rank() {
        let map = ObservableSortedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let events = capture(&map);

        assert_eq!(map.insert("b", 20), Some(2));

        assert_eq!(
            events.lock()[0],
            ChangeEvent::Replace {
                new_item: ("b", 20),
                old_item: ("b", 2),
                index: Some(1)
            }
        );
    }

    #[test]
    fn test_remove_reports_rank() {
        let map = ObservableSortedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        let events = capture(&map);

        assert_eq!(map.remove(&"b"), Some(2));
        assert_eq!(map.remove(&"missing"), None);

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            ChangeEvent::Remove {
                item: ("b", 2),
                index: 1
            }
        );
    }

    #[test]
    fn test_slice_in_key_order() {
        let map = ObservableSortedMap::new();
        map.insert("c", 3);
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(
            CollectionSource::slice(&map, 0..2),
            vec![("a", 1), ("b", 2)]
        );
    }

    #[test]
    fn test_bulk_operations_emit_reset() {
        let map = ObservableSortedMap::new();
        let events = capture(&map);
        map.extend(vec![("a", 1), ("b", 2)]);
        map.retain(|_, v| *v > 1);
        map.clear();
        assert!(events.lock().iter().all(|e| *e == ChangeEvent::Reset));
        assert_eq!(events.lock().len(), 3);
    }
}
