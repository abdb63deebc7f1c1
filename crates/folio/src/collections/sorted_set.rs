//! Change-notifying sorted set.

use std::collections::BTreeSet;
use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A `BTreeSet`-backed set that emits one [`ChangeEvent`] per effective
/// mutation.
///
/// The linear ordering is sort order; event indices are element ranks.
/// Like [`ObservableSet`](super::ObservableSet), inserting a present
/// element or removing an absent one emits nothing.
pub struct ObservableSortedSet<T> {
    items: RwLock<BTreeSet<T>>,
    changed: Signal<ChangeEvent<T>>,
}

impl<T: Clone + Ord + Send + Sync + 'static> Default for ObservableSortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord + Send + Sync + 'static> ObservableSortedSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeSet::new()),
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

    /// Returns the elements in sort order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().iter().cloned().collect()
    }

    /// Inserts an element, returning `true` if it was not already present.
    ///
    /// Emits [`ChangeEvent::Add`] at the element's rank in sort order.
    pub fn insert(&self, item: T) -> bool {
        let event = {
            let mut items = self.items.write();
            if !items.insert(item.clone()) {
                return false;
            }
            let rank = items.range(..&item).count();
            ChangeEvent::Add { item, index: rank }
        };
        self.changed.emit(event);
        true
    }

    /// Removes an element, returning `true` if it was present.
    pub fn remove(&self, item: &T) -> bool {
        let event = {
            let mut items = self.items.write();
            if !items.remove(item) {
                return false;
            }
            let rank = items.range(..item).count();
            ChangeEvent::Remove {
                item: item.clone(),
                index: rank,
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

impl<T: Clone + Ord + Send + Sync + 'static> CollectionSource<T> for ObservableSortedSet<T> {
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

    fn capture(set: &ObservableSortedSet<i32>) -> Arc<Mutex<Vec<ChangeEvent<i32>>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        set.changed().connect(move |event| {
            sink.lock().push(event.clone());
        });
        events
    }

    #[test]
    fn test_insert_reports_rank() {
        let set = ObservableSortedSet::new();
        let events = capture(&set);

        set.insert(20);
        set.insert(10); // rank 0
        set.insert(30); // rank 2
        assert!(!set.insert(10));

        let events = events.lock();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], ChangeEvent::Add { item: 20, index: 0 });
        assert_eq!(events[1], ChangeEvent::Add { item: 10, index: 0 });
        assert_eq!(events[2], ChangeEvent::Add { item: 30, index: 2 });
    }

    #[test]
    fn test_remove_reports_rank() {
        let set = ObservableSortedSet::new();
        set.extend(vec![10, 20, 30]);
        let events = capture(&set);

        assert!(set.remove(&20));
        assert!(!set.remove(&20));

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], ChangeEvent::Remove { item: 20, index: 1 });
    }

    #[test]
    fn test_slice_in_sort_order() {
        let set = ObservableSortedSet::new();
        set.extend(vec![3, 1, 2]);
        assert_eq!(CollectionSource::slice(&set, 0..2), vec![1, 2]);
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_bulk_operations_emit_reset() {
        let set = ObservableSortedSet::new();
        let events = capture(&set);
        set.extend(vec![1, 2]);
        set.clear();
        assert_eq!(
            *events.lock(),
            vec![ChangeEvent::Reset, ChangeEvent::Reset]
        );
    }
}
