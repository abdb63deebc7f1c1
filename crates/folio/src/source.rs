//! The boundary between containers and the pagination controller.

use std::ops::Range;

use folio_core::Signal;

use crate::event::ChangeEvent;

/// A container the pagination controller can be bound to.
///
/// The controller never mutates the container; it only reads the element
/// count, snapshots slices of the linear ordering, and subscribes to the
/// change-notification stream. Any container that invokes [`changed`]
/// exactly once per mutating operation (with `Reset` for batch mutations)
/// satisfies the contract.
///
/// The trait is object-safe: the controller holds the container as
/// `Arc<dyn CollectionSource<T>>`.
///
/// [`changed`]: CollectionSource::changed
pub trait CollectionSource<T>: Send + Sync {
    /// Number of elements currently in the container.
    fn len(&self) -> usize;

    /// Whether the container is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clones the elements in `range` of the container's linear ordering.
    ///
    /// The range is clamped to the container bounds; an out-of-bounds range
    /// yields the in-bounds prefix (possibly empty), never a panic.
    fn slice(&self, range: Range<usize>) -> Vec<T>;

    /// The change-notification stream for this container.
    fn changed(&self) -> &Signal<ChangeEvent<T>>;
}
