//! The pagination controller.
//!
//! [`Pager<T>`] wraps a reference to a [`CollectionSource`] and derives a
//! bounded page of its elements, keeping page count, current page, and the
//! cached page view consistent with the container's contents while
//! recomputing as little as possible. It does not own or mutate the
//! container; it only observes its change-notification stream.
//!
//! # Invalidation
//!
//! Each [`ChangeEvent`] from the bound container is classified:
//!
//! - `Reset` carries no positional information, so after the page-number
//!   refresh the view is always rebuilt.
//! - `Add` / `Remove` change the count. If the page-number refresh did not
//!   already rebuild the view, the view is rebuilt only when the affected
//!   index falls on or before the current page: a structural change at or
//!   before the displayed slice shifts which elements occupy it, while a
//!   change strictly after it cannot.
//! - `Replace` cannot change the count. The view is rebuilt only when the
//!   replaced position is visible: by index when the event carries one,
//!   otherwise by an equality scan of the cached view for the old or new
//!   item (O(page size), bounded).
//!
//! # Notifications
//!
//! Within any one operation the applicable subset of signals fires in a
//! fixed order: page size, page count, current page, page view. The value
//! signals fire only when the value actually changed; `page_view_changed`
//! fires whenever the view is rebuilt, carrying the fresh snapshot.
//!
//! # Example
//!
//! ```
//! use folio::PagedVec;
//!
//! let paged = PagedVec::from_items(2, vec!['a', 'b', 'c', 'd', 'e']).unwrap();
//! let pager = paged.pager();
//!
//! assert_eq!(pager.page_count(), 3);
//! pager.change_page(2).unwrap();
//! assert_eq!(pager.page_view(), vec!['c', 'd']);
//!
//! // Removing an element before the current page shifts the visible slice.
//! paged.collection().remove(0);
//! assert_eq!(pager.page_view(), vec!['d', 'e']);
//! ```

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::{Mutex, RwLock};

use folio_core::{ConnectionId, Property, Signal};

use crate::error::{Error, Result};
use crate::event::ChangeEvent;
use crate::source::CollectionSource;

/// Signals republished by a [`Pager`].
///
/// Each signal carries the fresh value so observers can react without
/// re-reading, though the corresponding accessor always agrees with the
/// last emission.
pub struct PagerSignals<T> {
    /// Emitted when the page size changes.
    pub page_size_changed: Signal<usize>,
    /// Emitted when the number of pages changes.
    pub page_count_changed: Signal<usize>,
    /// Emitted when the current page changes.
    pub current_page_changed: Signal<usize>,
    /// Emitted whenever the page view is rebuilt, with the new snapshot.
    pub page_view_changed: Signal<Vec<T>>,
}

impl<T: Clone + Send + 'static> PagerSignals<T> {
    fn new() -> Self {
        Self {
            page_size_changed: Signal::new(),
            page_count_changed: Signal::new(),
            current_page_changed: Signal::new(),
            page_view_changed: Signal::new(),
        }
    }
}

/// The pagination controller.
///
/// State invariants, maintained across every mutation of the bound
/// container:
///
/// - `page_size >= 1`
/// - `page_count == ceil(len / page_size)`, `0` iff the container is empty
/// - `current_page` is in `[1, page_count]` when `page_count > 0`, and
///   exactly `0` otherwise
/// - `page_view` equals the container's elements in
///   `[(current_page - 1) * page_size, current_page * page_size)` as of the
///   last rebuild (it is a snapshot, not a live view)
///
/// A pager is bound to exactly one container for its lifetime; the binding
/// is performed once by the owning [`Paged`](crate::Paged) collection. On
/// drop the pager unsubscribes from the container's change stream.
pub struct Pager<T> {
    inner: Arc<PagerInner<T>>,
}

struct PagerInner<T> {
    page_size: Property<usize>,
    current_page: Property<usize>,
    page_count: Property<usize>,
    page_view: RwLock<Vec<T>>,
    signals: PagerSignals<T>,
    source: OnceLock<Arc<dyn CollectionSource<T>>>,
    connection: Mutex<Option<ConnectionId>>,
}

impl<T> Pager<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an unbound pager with the given page size.
    ///
    /// Returns [`Error::InvalidPageSize`] if `page_size` is zero. The pager
    /// must be bound to a container (by the owning collection type) before
    /// any pagination operation is meaningful.
    pub(crate) fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        Ok(Self {
            inner: Arc::new(PagerInner {
                page_size: Property::new(page_size),
                current_page: Property::new(0),
                page_count: Property::new(0),
                page_view: RwLock::new(Vec::new()),
                signals: PagerSignals::new(),
                source: OnceLock::new(),
                connection: Mutex::new(None),
            }),
        })
    }

    /// Binds this pager to its container and performs the initial sync.
    ///
    /// Callable once; binding twice is a programming error inside this
    /// crate and panics.
    pub(crate) fn bind(&self, source: Arc<dyn CollectionSource<T>>) {
        assert!(
            self.inner.source.set(source.clone()).is_ok(),
            "pager is already bound to a collection"
        );

        // Weak back-reference: the container's signal must not keep the
        // pager alive.
        let weak: Weak<PagerInner<T>> = Arc::downgrade(&self.inner);
        let id = source.changed().connect(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_event(event);
            }
        });
        *self.inner.connection.lock() = Some(id);

        self.inner.refresh_page_numbers();
    }

    /// The capacity of one page.
    pub fn page_size(&self) -> usize {
        self.inner.page_size.get()
    }

    /// The 1-based current page; `0` iff the container is empty.
    pub fn current_page(&self) -> usize {
        self.inner.current_page.get()
    }

    /// The number of pages; `0` iff the container is empty.
    pub fn page_count(&self) -> usize {
        self.inner.page_count.get()
    }

    /// Snapshot of the elements on the current page.
    pub fn page_view(&self) -> Vec<T> {
        self.inner.page_view.read().clone()
    }

    /// Access the page view through a closure without cloning.
    pub fn with_page_view<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        f(&self.inner.page_view.read())
    }

    /// The pager's notification signals.
    pub fn signals(&self) -> &PagerSignals<T> {
        &self.inner.signals
    }

    /// Changes the page size.
    ///
    /// Returns [`Error::InvalidPageSize`] if `page_size` is zero. Setting
    /// the current size again is a no-op and emits nothing. Otherwise the
    /// page count and current page are re-derived and the view is rebuilt.
    pub fn set_page_size(&self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize);
        }
        if !self.inner.page_size.set(page_size) {
            return Ok(());
        }
        tracing::debug!(target: "folio::pager", page_size, "page size changed");
        self.inner.signals.page_size_changed.emit(page_size);
        if !self.inner.refresh_page_numbers() {
            self.inner.rebuild_view();
        }
        Ok(())
    }

    /// Navigates to the given 1-based page, rebuilding the view.
    ///
    /// Navigating to the page already shown is a no-op and emits nothing.
    /// Returns [`Error::PageOutOfRange`] for page zero and
    /// [`Error::PageExceedsCount`] when `page` is beyond the last page
    /// (which includes any page while the container is empty).
    pub fn change_page(&self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(Error::PageOutOfRange);
        }
        let count = self.inner.page_count.get();
        if page > count {
            return Err(Error::PageExceedsCount { page, count });
        }
        if self.inner.current_page.set(page) {
            self.inner.signals.current_page_changed.emit(page);
            self.inner.rebuild_view();
        }
        Ok(())
    }

    /// Translates a 0-based index into the current page to an absolute
    /// index into the underlying container.
    ///
    /// Pure query; no side effects. Returns [`Error::IndexOutOfRange`] when
    /// the container is empty or the resolved index is beyond its bounds.
    pub fn absolute_index(&self, relative_index: usize) -> Result<usize> {
        let current = self.inner.current_page.get();
        if current == 0 {
            return Err(Error::IndexOutOfRange {
                index: relative_index,
                len: 0,
            });
        }
        let len = self.inner.source().len();
        let absolute = (current - 1) * self.inner.page_size.get() + relative_index;
        if absolute >= len {
            return Err(Error::IndexOutOfRange {
                index: absolute,
                len,
            });
        }
        Ok(absolute)
    }
}

impl<T> PagerInner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn source(&self) -> &Arc<dyn CollectionSource<T>> {
        self.source
            .get()
            .expect("pager is not bound to a collection")
    }

    /// Classifies one change event from the bound container and rebuilds
    /// only what the event can have invalidated.
    fn handle_event(&self, event: &ChangeEvent<T>) {
        tracing::trace!(
            target: "folio::pager",
            kind = event.kind(),
            "handling container change"
        );
        match event {
            ChangeEvent::Reset => {
                // No positional information: the view is always stale.
                if !self.refresh_page_numbers() {
                    self.rebuild_view();
                }
            }
            ChangeEvent::Add { index, .. } | ChangeEvent::Remove { index, .. } => {
                if !self.refresh_page_numbers() {
                    let affected = page_of(*index, self.page_size.get());
                    if affected <= self.current_page.get() {
                        self.rebuild_view();
                    }
                }
            }
            ChangeEvent::Replace {
                new_item,
                old_item,
                index,
            } => {
                // Count is unchanged, so the page numbers cannot move.
                let visible = match index {
                    Some(index) => page_of(*index, self.page_size.get()) == self.current_page.get(),
                    None => {
                        let view = self.page_view.read();
                        view.iter().any(|item| item == old_item || item == new_item)
                    }
                };
                if visible {
                    self.rebuild_view();
                }
            }
        }
    }

    /// Re-derives `page_count` and `current_page` from the container size.
    ///
    /// Returns `true` when the current page moved (including the empty and
    /// clamped cases), in which case the view has already been rebuilt;
    /// `false` when neither changed and the caller must decide on its own
    /// whether the view needs rebuilding.
    fn refresh_page_numbers(&self) -> bool {
        let len = self.source().len();
        if len == 0 {
            if self.page_count.set(0) {
                self.signals.page_count_changed.emit(0);
            }
            if self.current_page.set(0) {
                self.signals.current_page_changed.emit(0);
            }
            self.rebuild_view();
            return true;
        }

        let pages = len.div_ceil(self.page_size.get());
        if self.page_count.set(pages) {
            self.signals.page_count_changed.emit(pages);
        }

        let current = self.current_page.get();
        let target = if current == 0 {
            // Transition from empty to non-empty.
            1
        } else if current > pages {
            // Shrinkage past the current page.
            pages
        } else {
            current
        };
        if target != current {
            tracing::debug!(
                target: "folio::pager",
                from = current,
                to = target,
                pages,
                "current page adjusted"
            );
            self.current_page.set_silent(target);
            self.signals.current_page_changed.emit(target);
            self.rebuild_view();
            return true;
        }
        false
    }

    /// Snapshots the current page's slice of the container and emits the
    /// view notification.
    fn rebuild_view(&self) {
        let current = self.current_page.get();
        let view = if current == 0 {
            Vec::new()
        } else {
            let size = self.page_size.get();
            let start = (current - 1) * size;
            self.source().slice(start..start + size)
        };
        *self.page_view.write() = view.clone();
        self.signals.page_view_changed.emit(view);
    }
}

impl<T> Drop for PagerInner<T> {
    fn drop(&mut self) {
        if let (Some(source), Some(id)) = (self.source.get(), self.connection.lock().take()) {
            source.changed().disconnect(id);
        }
    }
}

/// 1-based page on which the given absolute index falls:
/// `ceil((index + 1) / page_size)`.
fn page_of(index: usize, page_size: usize) -> usize {
    index / page_size + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::ObservableVec;
    use crate::paged::Paged;
    use std::sync::Arc;

    fn paged_vec(page_size: usize, items: Vec<i32>) -> Paged<i32, ObservableVec<i32>> {
        Paged::new(page_size, ObservableVec::from_vec(items)).unwrap()
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(matches!(
            Paged::new(0, ObservableVec::<i32>::new()),
            Err(Error::InvalidPageSize)
        ));
    }

    #[test]
    fn test_initial_sync_non_empty() {
        let paged = paged_vec(3, vec![1, 2, 3, 4]);
        let pager = paged.pager();
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_view(), vec![1, 2, 3]);
    }

    #[test]
    fn test_initial_sync_empty() {
        let paged = paged_vec(3, vec![]);
        let pager = paged.pager();
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.current_page(), 0);
        assert!(pager.page_view().is_empty());
    }

    #[test]
    fn test_exact_multiple_page_count() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        assert_eq!(paged.pager().page_count(), 2);
    }

    #[test]
    fn test_change_page_validation() {
        let paged = paged_vec(2, vec![1, 2, 3]);
        let pager = paged.pager();
        assert_eq!(pager.change_page(0).unwrap_err(), Error::PageOutOfRange);
        assert_eq!(
            pager.change_page(3).unwrap_err(),
            Error::PageExceedsCount { page: 3, count: 2 }
        );
        pager.change_page(2).unwrap();
        assert_eq!(pager.page_view(), vec![3]);
    }

    #[test]
    fn test_change_page_idempotent() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();
        pager.change_page(2).unwrap();
        let before = pager.page_view();
        let count_before = pager.page_count();
        pager.change_page(2).unwrap();
        assert_eq!(pager.page_count(), count_before);
        assert_eq!(pager.page_view(), before);
    }

    #[test]
    fn test_set_page_size_reshapes_pages() {
        let paged = paged_vec(2, vec![1, 2, 3, 4, 5]);
        let pager = paged.pager();
        assert_eq!(pager.page_count(), 3);
        pager.set_page_size(5).unwrap();
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_view(), vec![1, 2, 3, 4, 5]);
        assert_eq!(pager.set_page_size(0).unwrap_err(), Error::InvalidPageSize);
    }

    #[test]
    fn test_set_page_size_same_value_emits_nothing() {
        let paged = paged_vec(2, vec![1, 2, 3]);
        let pager = paged.pager();
        let hits = Arc::new(Mutex::new(0usize));
        for_every_signal(pager, &hits);
        pager.set_page_size(2).unwrap();
        assert_eq!(*hits.lock(), 0);
    }

    fn for_every_signal(pager: &Pager<i32>, hits: &Arc<Mutex<usize>>) {
        let h = hits.clone();
        pager.signals().page_size_changed.connect(move |_| {
            *h.lock() += 1;
        });
        let h = hits.clone();
        pager.signals().page_count_changed.connect(move |_| {
            *h.lock() += 1;
        });
        let h = hits.clone();
        pager.signals().current_page_changed.connect(move |_| {
            *h.lock() += 1;
        });
        let h = hits.clone();
        pager.signals().page_view_changed.connect(move |_| {
            *h.lock() += 1;
        });
    }

    #[test]
    fn test_absolute_index() {
        let paged = paged_vec(2, vec![10, 20, 30, 40, 50]);
        let pager = paged.pager();
        pager.change_page(2).unwrap();
        assert_eq!(pager.absolute_index(0).unwrap(), 2);
        assert_eq!(pager.absolute_index(1).unwrap(), 3);
        assert_eq!(
            pager.absolute_index(5).unwrap_err(),
            Error::IndexOutOfRange { index: 7, len: 5 }
        );
    }

    #[test]
    fn test_absolute_index_empty_container() {
        let paged = paged_vec(2, vec![]);
        assert_eq!(
            paged.pager().absolute_index(0).unwrap_err(),
            Error::IndexOutOfRange { index: 0, len: 0 }
        );
    }

    #[test]
    fn test_add_after_current_page_skips_rebuild() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();

        let views = Arc::new(Mutex::new(Vec::new()));
        let v = views.clone();
        pager.signals().page_view_changed.connect(move |view| {
            v.lock().push(view.clone());
        });

        // Index 4 lands on page 3, after the current page 1: page count
        // grows but the visible slice is untouched.
        paged.collection().push(5);
        assert_eq!(pager.page_count(), 3);
        assert!(views.lock().is_empty());
        assert_eq!(pager.page_view(), vec![1, 2]);
    }

    #[test]
    fn test_add_before_current_page_rebuilds() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();
        pager.change_page(2).unwrap();

        paged.collection().insert(0, 0);
        // [0,1,2,3,4], page 2 of size 2 -> [2,3]
        assert_eq!(pager.page_view(), vec![2, 3]);
    }

    #[test]
    fn test_remove_shrinks_and_clamps_current_page() {
        let paged = paged_vec(2, vec![1, 2, 3, 4, 5]);
        let pager = paged.pager();
        pager.change_page(3).unwrap();
        assert_eq!(pager.page_view(), vec![5]);

        paged.collection().remove(4);
        // 4 elements left -> 2 pages; current page clamped from 3 to 2.
        assert_eq!(pager.page_count(), 2);
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.page_view(), vec![3, 4]);
    }

    #[test]
    fn test_empty_transition_resets_to_zero() {
        let paged = paged_vec(2, vec![7]);
        let pager = paged.pager();
        assert_eq!(pager.current_page(), 1);

        paged.collection().remove(0);
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.current_page(), 0);
        assert!(pager.page_view().is_empty());

        paged.collection().push(9);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_view(), vec![9]);
    }

    #[test]
    fn test_replace_with_index_on_current_page() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();

        paged.collection().set(1, 20);
        assert_eq!(pager.page_view(), vec![1, 20]);
    }

    #[test]
    fn test_replace_with_index_off_current_page() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();

        let rebuilt = Arc::new(Mutex::new(0usize));
        let r = rebuilt.clone();
        pager.signals().page_view_changed.connect(move |_| {
            *r.lock() += 1;
        });

        paged.collection().set(3, 40);
        assert_eq!(*rebuilt.lock(), 0);
        assert_eq!(pager.page_view(), vec![1, 2]);
    }

    #[test]
    fn test_replace_without_index_uses_equality_scan() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();

        let rebuilt = Arc::new(Mutex::new(0usize));
        let r = rebuilt.clone();
        pager.signals().page_view_changed.connect(move |_| {
            *r.lock() += 1;
        });

        // Old item 2 is on the visible page: rebuild.
        paged.collection().changed().emit(ChangeEvent::Replace {
            new_item: 2,
            old_item: 2,
            index: None,
        });
        assert_eq!(*rebuilt.lock(), 1);

        // Neither item is visible: no rebuild.
        paged.collection().changed().emit(ChangeEvent::Replace {
            new_item: 30,
            old_item: 3,
            index: None,
        });
        assert_eq!(*rebuilt.lock(), 1);
    }

    #[test]
    fn test_reset_always_rebuilds_view() {
        let paged = paged_vec(2, vec![1, 2, 3, 4]);
        let pager = paged.pager();

        let rebuilt = Arc::new(Mutex::new(0usize));
        let r = rebuilt.clone();
        pager.signals().page_view_changed.connect(move |_| {
            *r.lock() += 1;
        });

        // Same count, same pages: the refresh reports nothing, but a reset
        // still invalidates the view.
        paged.collection().set_items(vec![5, 6, 7, 8]);
        assert_eq!(*rebuilt.lock(), 1);
        assert_eq!(pager.page_view(), vec![5, 6]);
    }

    #[test]
    fn test_notification_order() {
        let paged = paged_vec(5, vec![]);
        let pager = paged.pager();

        let order = Arc::new(Mutex::new(Vec::new()));
        let o = order.clone();
        pager.signals().page_count_changed.connect(move |_| {
            o.lock().push("count");
        });
        let o = order.clone();
        pager.signals().current_page_changed.connect(move |_| {
            o.lock().push("current");
        });
        let o = order.clone();
        pager.signals().page_view_changed.connect(move |_| {
            o.lock().push("view");
        });

        paged.collection().push(1);
        assert_eq!(*order.lock(), vec!["count", "current", "view"]);
    }

    #[test]
    fn test_drop_unsubscribes_from_source() {
        let collection = Arc::new(ObservableVec::from_vec(vec![1, 2, 3]));
        {
            let pager = Pager::<i32>::new(2).unwrap();
            pager.bind(collection.clone());
            assert_eq!(collection.changed().connection_count(), 1);
        }
        assert_eq!(collection.changed().connection_count(), 0);
    }

    #[test]
    fn test_page_of() {
        assert_eq!(page_of(0, 2), 1);
        assert_eq!(page_of(1, 2), 1);
        assert_eq!(page_of(2, 2), 2);
        assert_eq!(page_of(4, 2), 3);
        assert_eq!(page_of(0, 1), 1);
    }
}
