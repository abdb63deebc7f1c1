//! Change-notifying hash set.

use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A hash set that emits one [`ChangeEvent`] per effective mutation.
///
/// Inserting an element that is already present (or removing one that is
/// absent) performs no structural change and emits nothing, mirroring the
/// `bool` contract of `HashSet::insert`/`remove`. Event indices follow the
/// set's iteration order: arbitrary, but stable between mutations.
pub struct ObservableSet<T> {
    items: RwLock<HashSet<T>>,
    changed: Signal<ChangeEvent<T>>,
}

impl<T: Clone + Eq + Hash + Send + Sync + 'static> Default for ObservableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + Send + Sync + 'static> ObservableSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashSet::new()),
            changed: Signal::new(),
        }
    }

    /// The change-notification stream.
    pub fn changed(&self) -> &Signal<ChangeEvent<T>> {
        &self.changed
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns `true` if the set contains `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.read().contains(item)
    }

    /// Access the elements through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashSet<T>) -> R,
    {
        f(&self.items.read())
    }

    /// Inserts an element, returning `true` if it was not already present.
    pub fn insert(&self, item: T) -> bool {
        let event = {
            let mut items = self.items.write();
            if !items.insert(item.clone()) {
                return false;
            }
            let index = items
                .iter()
                .position(|e| *e == item)
                .expect("inserted element is present");
            ChangeEvent::Add { item, index }
        };
        self.changed.emit(event);
        true
    }

    /// Removes an element, returning `true` if it was present.
    pub fn remove(&self, item: &T) -> bool {
        let event = {
            let mut items = self.items.write();
            let Some(index) = items.iter().position(|e| e == item) else {
                return false;
            };
            items.remove(item);
            ChangeEvent::Remove {
                item: item.clone(),
                index,
            }
        };
        self.changed.emit(event);
        true
    }

    /// Removes all elements.
    pub fn clear(&self) {
        self.items.write().clear();
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Inserts all elements of `iter` (bulk union).
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        self.items.write().extend(iter);
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Keeps only the elements matching the predicate (bulk except).
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.write().retain(keep);
        self.changed.emit(ChangeEvent::Reset);
    }
}

impl<T: Clone + Eq + Hash + Send + Sync + 'static> CollectionSource<T> for ObservableSet<T> {
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn slice(&self, range: Range<usize>) -> Vec<T> {
        let items = self.items.read();
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        items.iter().skip(start).take(end - start).cloned().collect()
    }

    fn changed(&self) -> &Signal<ChangeEvent<T>> {
        &self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capture(set: &ObservableSet<i32>) -> Arc<Mutex<Vec<ChangeEvent<i32>>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        set.changed().connect(move |event| {
            sink.lock().push(event.clone());
        });
        events
    }

    #[test]
    fn test_insert_and_duplicate() {
        let set = ObservableSet::new();
        let events = capture(&set);

        assert!(set.insert(1));
        assert!(!set.insert(1)); // no structural change, no event

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ChangeEvent::Add { item: 1, index: 0 });
    }

    #[test]
    fn test_remove_present_and_absent() {
        let set = ObservableSet::new();
        set.insert(1);
        set.insert(2);
        let events = capture(&set);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));

        let events = events.lock();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ChangeEvent::Remove { item, index } => {
                assert_eq!(*item, 1);
                assert!(*index < 2);
            }
            other => panic!("expected Remove, got {}", other.kind()),
        }
    }

    #[test]
    fn test_bulk_operations_emit_reset() {
        let set = ObservableSet::new();
        let events = capture(&set);

        set.extend(vec![1, 2, 3]);
        set.retain(|&n| n > 1);
        set.clear();

        let events = events.lock();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| *e == ChangeEvent::Reset));
    }

    #[test]
    fn test_slice_stable_between_mutations() {
        let set = ObservableSet::new();
        set.extend(vec![1, 2, 3, 4]);

        let all = CollectionSource::slice(&set, 0..4);
        let again = CollectionSource::slice(&set, 0..4);
        assert_eq!(all, again);
        assert_eq!(CollectionSource::slice(&set, 1..3), all[1..3].to_vec());
    }
}
