//! Change-notifying double-ended queue.

use std::collections::VecDeque;
use std::ops::Range;

use parking_lot::RwLock;

use folio_core::Signal;

use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// A double-ended queue that emits one [`ChangeEvent`] per mutation.
///
/// Front-to-back order is the linear ordering: `push_front` emits an `Add`
/// at index 0, `push_back` at the last index. Use
/// `push_back`/`pop_front` for FIFO queue discipline.
pub struct ObservableDeque<T> {
    items: RwLock<VecDeque<T>>,
    changed: Signal<ChangeEvent<T>>,
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> ObservableDeque<T> {
    /// Creates an empty deque.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(VecDeque::new()),
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

    /// Returns `true` if the deque is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a clone of the front element, if any.
    pub fn front(&self) -> Option<T> {
        self.items.read().front().cloned()
    }

    /// Returns a clone of the back element, if any.
    pub fn back(&self) -> Option<T> {
        self.items.read().back().cloned()
    }

    /// Returns the elements front-to-back.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().iter().cloned().collect()
    }

    /// Appends an element at the back.
    pub fn push_back(&self, item: T) {
        let event = {
            let mut items = self.items.write();
            items.push_back(item.clone());
            ChangeEvent::Add {
                item,
                index: items.len() - 1,
            }
        };
        self.changed.emit(event);
    }

    /// Prepends an element at the front.
    pub fn push_front(&self, item: T) {
        {
            let mut items = self.items.write();
            items.push_front(item.clone());
        }
        self.changed.emit(ChangeEvent::Add { item, index: 0 });
    }

    /// Removes and returns the front element.
    pub fn pop_front(&self) -> Option<T> {
        let item = self.items.write().pop_front()?;
        self.changed.emit(ChangeEvent::Remove {
            item: item.clone(),
            index: 0,
        });
        Some(item)
    }

    /// Removes and returns the back element.
    pub fn pop_back(&self) -> Option<T> {
        let (item, index) = {
            let mut items = self.items.write();
            let item = items.pop_back()?;
            (item, items.len())
        };
        self.changed.emit(ChangeEvent::Remove {
            item: item.clone(),
            index,
        });
        Some(item)
    }

    /// Removes all elements.
    pub fn clear(&self) {
        self.items.write().clear();
        self.changed.emit(ChangeEvent::Reset);
    }

    /// Appends all elements of `iter` at the back.
    pub fn extend_back<I: IntoIterator<Item = T>>(&self, iter: I) {
        self.items.write().extend(iter);
        self.changed.emit(ChangeEvent::Reset);
    }
}

impl<T: Clone + Send + Sync + 'static> CollectionSource<T> for ObservableDeque<T> {
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
