//! Change-notifying hash map.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A hash map that emits one [`ChangeEvent`] per mutation.
///
/// The linear ordering paged and reported in event indices is the map's
/// iteration order: arbitrary, but stable between mutations. Updating an
/// existing key emits a [`ChangeEvent::Replace`] with `index: None`, since
/// a hash map cannot supply the position cheaply; consumers fall back to
/// identifying the entry by equality.
pub struct ObservableMap<K, V> {
    items: RwLock<HashMap<K, V>>,
    changed: Signal<ChangeEvent<(K, V)>>,
}

impl<K, V> Default for ObservableMap<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
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
        F: FnOnce(&HashMap<K, V>) -> R,
    {
        f(&self.items.read())
    }

    /// Inserts or updates an entry, returning the previous value if the
    /// key was already present.
    ///
    /// A new key emits [`ChangeEvent::Add`] with the entry's position in
    /// iteration order; an update emits [`ChangeEvent::Replace`] with
    /// `index: None`.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let (previous, event) = {
            let mut items = self.items.write();
            let previous = items.insert(key.clone(), value.clone());
            let event = match &previous {
                Some(old) => ChangeEvent::Replace {
                    new_item: (key.clone(), value),
                    old_item: (key, old.clone()),
                    index: None,
                },
                None => {
                    let index = items
                        .keys()
                        .position(|k| *k == key)
                        .expect("inserted key is present");
                    ChangeEvent::Add {
                        item: (key, value),
                        index,
                    }
                }
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
            let index = items.keys().position(|k| k == key)?;
            let (key, value) = items.remove_entry(key)?;
            let event = ChangeEvent::Remove {
                item: (key, value.clone()),
                index,
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

impl<K, V> CollectionSource<(K, V)> for ObservableMap<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
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

    fn capture(map: &ObservableMap<&'static str, i32>) -> Arc<Mutex<Vec<ChangeEvent<(&'static str, i32)>>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        map.changed().connect(move |event| {
            sink.lock().push(event.clone());
        });
        events
    }

    #[test]
    fn test_insert_new_key_emits_add() {
        let map = ObservableMap::new();
        let events = capture(&map);

        assert_eq!(map.insert("a", 1), None);

        let events = events.lock();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ChangeEvent::Add { item, index } => {
                assert_eq!(*item, ("a", 1));
                assert_eq!(*index, 0);
            }
            other => panic!("expected Add, got {}", other.kind()),
        }
    }

    #[test]
    fn test_insert_existing_key_emits_replace_without_index() {
        let map = ObservableMap::new();
        map.insert("a", 1);
        let events = capture(&map);

        assert_eq!(map.insert("a", 2), Some(1));

        assert_eq!(
            events.lock()[0],
            ChangeEvent::Replace {
                new_item: ("a", 2),
                old_item: ("a", 1),
                index: None
            }
        );
        assert_eq!(map.get(&"a"), Some(2));
    }

    #[test]
    fn test_remove_emits_remove_with_prior_index() {
        let map = ObservableMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let events = capture(&map);

        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.remove(&"missing"), None);

        let events = events.lock();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ChangeEvent::Remove { item, index } => {
                assert_eq!(*item, ("a", 1));
                assert!(*index < 2);
            }
            other => panic!("expected Remove, got {}", other.kind()),
        }
    }

    #[test]
    fn test_bulk_operations_emit_reset() {
        let map = ObservableMap::new();
        let events = capture(&map);

        map.extend(vec![("a", 1), ("b", 2), ("c", 3)]);
        map.retain(|_, v| *v > 1);
        map.clear();

        let events = events.lock();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| *e == ChangeEvent::Reset));
        assert!(map.is_empty());
    }

    #[test]
    fn test_slice_follows_iteration_order() {
        let map = ObservableMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        let all = CollectionSource::slice(&map, 0..10);
        assert_eq!(all.len(), 3);
        let first_two = CollectionSource::slice(&map, 0..2);
        assert_eq!(&all[0..2], first_two.as_slice());
    }
}
