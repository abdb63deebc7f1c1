//! Convenience base for elements that broadcast their own changes.

use folio_core::Signal;

/// An element type that notifies observers when one of its properties
/// changes.
///
/// The granularity is the property name; observers re-read whatever value
/// they care about. Each item owns its own listener set, so there is no
/// process-wide registry to leak through.
pub trait Observable {
    /// The item's property-change notification stream, carrying the name
    /// of the property that changed.
    fn property_changed(&self) -> &Signal<&'static str>;
}

/// Embeddable base providing the [`Observable`] plumbing.
///
/// # Example
///
/// ```
/// use folio::{ItemBase, Observable};
/// use folio_core::Property;
///
/// struct Track {
///     base: ItemBase,
///     title: Property<String>,
/// }
///
/// impl Track {
///     fn set_title(&self, title: String) {
///         if self.title.set(title) {
///             self.base.notify("title");
///         }
///     }
/// }
///
/// impl Observable for Track {
///     fn property_changed(&self) -> &folio_core::Signal<&'static str> {
///         self.base.property_changed()
///     }
/// }
/// ```
pub struct ItemBase {
    property_changed: Signal<&'static str>,
}

impl Default for ItemBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemBase {
    /// Creates a base with no listeners.
    pub fn new() -> Self {
        Self {
            property_changed: Signal::new(),
        }
    }

    /// Broadcasts that the named property changed.
    pub fn notify(&self, property: &'static str) {
        self.property_changed.emit(property);
    }
}

impl Observable for ItemBase {
    fn property_changed(&self) -> &Signal<&'static str> {
        &self.property_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_notify_reaches_listeners() {
        let base = ItemBase::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        base.property_changed().connect(move |name| {
            sink.lock().push(*name);
        });

        base.notify("title");
        base.notify("artist");

        assert_eq!(*seen.lock(), vec!["title", "artist"]);
    }

    #[test]
    fn test_each_item_owns_its_listeners() {
        let a = ItemBase::new();
        let b = ItemBase::new();

        a.property_changed().connect(|_| {});
        assert_eq!(a.property_changed().connection_count(), 1);
        assert_eq!(b.property_changed().connection_count(), 0);
    }
}
