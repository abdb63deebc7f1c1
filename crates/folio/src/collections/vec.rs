//! Change-notifying vector.

use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A growable sequence that emits one [`ChangeEvent`] per mutation.
///
/// `ObservableVec<T>` wraps a `Vec<T>` and exposes the instrumented subset
/// of its operations. `push`/`pop` double as stack operations; batch
/// mutations (`clear`, `extend`, `set_items`, `sort_by`, `retain`) emit a
/// single [`ChangeEvent::Reset`].
///
/// # Example
///
/// ```
/// use folio::{ChangeEvent, ObservableVec};
///
/// let items = ObservableVec::new();
/// items.changed().connect(|event: &ChangeEvent<i32>| {
///     println!("mutation: {}", event.kind());
/// });
/// items.push(1);
/// items.push(2);
/// assert_eq!(items.to_vec(), vec![1, 2]);
/// ```
pub struct ObservableVec<T> {
    items: RwLock<Vec<T>>,
    changed: Signal<ChangeEvent<T>>,
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> ObservableVec<T> {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Creates a vector seeded with `items` (no event is emitted).
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
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

    /// Returns `true` if the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a clone of the element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a clone of all elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Access the elements through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        f(&self.items.read())
    }

    /// Appends an element to the end.
    pub fn push(&self, item: T) {
        let event = {
            let mut items = self.items.write();
            items.push(item.clone());
            ChangeEvent::Add {
                item,
                index: items.len() - 1,
            }
        };
        self.changed.emit(event);
    }

    /// Removes and returns the last element (stack discipline).
    pub fn pop(&self) -> Option<T> {
        let (item, event) = {
            let mut items = self.items.write();
            let item = items.pop()?;
            let event = ChangeEvent::Remove {
                item: item.clone(),
                index: items.len(),
            };
            (item, event)
        };
        self.changed.emit(event);
        Some(item)
    }

    /// Inserts an element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, item: T) {
        let event = {
            let mut items = self.items.write();
            items.insert(index, item.clone());
            ChangeEvent::Add { item, index }
        };
        self.changed.emit(event);
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&self, index: usize) -> T {
        let (item, event) = {
            let mut items = self.items.write();
            let item = items.remove(index);
            let event = ChangeEvent::Remove {
                item: item.clone(),
                index,
            };
            (item, event)
        };
        self.changed.emit(event);
        item
    }

    /// Replaces the element at `index`, returning the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&self, index: usize, item: T) -> T {
        let (old, event) = {
            let mut items = self.items.write();
            let old = std::mem::replace(&mut items[index], item.clone());
            let event = ChangeEvent::Replace {
                new_item: item,
                old_item: old.clone(),
                index: Some(index),
            };
            (old, event)
        };
        self.changed.emit(event);
        old
    }

    /// Edits the element at `index` in place via a closure.
    ///
    /// Emits a [`ChangeEvent::Replace`] carrying the value before and after
    /// the edit. Returns `None` without emitting if `index` is out of
    /// bounds.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, event) = {
            let mut items = self.items.write();
            let slot = items.get_mut(index)?;
            let old = slot.clone();
            let result = f(slot);
            let event = ChangeEvent::Replace {
                new_item: slot.clone(),
                old_item: old,
                index: Some(index),
            };
            (result, event)
        };
        self.changed.emit(event);
        Some(result)
    }

    /// Removes all elements.
    pub fn clear(&self) {
        self.items.write().clear();
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Replaces all elements.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.write() = items;
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Appends all elements from `iter` (range insert).
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        self.items.write().extend(iter);
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Sorts the elements with the given comparator.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.write().sort_by(compare);
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Keeps only the elements matching the predicate (range remove).
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.write().retain(keep);
        self.changed.emit(ChangeEvent::Reset);
    }
}

impl<T: Clone + Send + Sync + 'static> CollectionSource<T> for ObservableVec<T> {
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn slice(&self, range: Range<usize>) -> Vec<T> {
        let items = self.items.read();
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        items[start..end].to_vec()
    }

    fn changed(&self) -> &Signal<ChangeEvent<T>> {
        &self.changed
    }
}
