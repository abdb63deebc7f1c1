//! Change-notification events emitted by observable containers.

/// A structural change to an observable container.
///
/// Every externally invoked mutating operation on a container emits exactly
/// one `ChangeEvent` on the container's [`changed`] signal, after the
/// mutation has been applied. Batch operations (clear, extend, sort, bulk
/// set operations) emit a single [`ChangeEvent::Reset`] rather than one
/// event per element, trading precision for O(1) event cost.
///
/// Indices refer to the container's linear ordering: insertion order for
/// sequences, sort order for the BTree-backed containers, and
/// arbitrary-but-stable iteration order for the hash-backed ones.
///
/// [`changed`]: crate::CollectionSource::changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent<T> {
    /// Bulk change with no item or index information; consumers must
    /// assume everything may have changed.
    Reset,

    /// One item was inserted at the given absolute index.
    Add {
        /// The inserted item.
        item: T,
        /// Absolute index of the item after insertion.
        index: usize,
    },

    /// One item was removed from the given absolute index.
    Remove {
        /// The removed item.
        item: T,
        /// Absolute index the item occupied before removal.
        index: usize,
    },

    /// One item's value changed in place.
    Replace {
        /// The value now stored at the position.
        new_item: T,
        /// The value previously stored at the position.
        old_item: T,
        /// Absolute index of the position, when the emitting container can
        /// compute it cheaply. Hash-backed containers emit `None`;
        /// consumers then fall back to identifying the item by equality.
        index: Option<usize>,
    },
}

impl<T> ChangeEvent<T> {
    /// Short name of the event case, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
        }
    }
}
