//! Observable collections with an incrementally synchronized paginated
//! view.
//!
//! folio provides a family of mutable containers that emit structured
//! change notifications on every mutation, and a pagination controller
//! that consumes those notifications to keep a bounded page of elements
//! synchronized with its container without recomputing on every change.
//!
//! # Core Types
//!
//! - [`ChangeEvent`]: the tagged event every container emits, exactly once
//!   per mutating operation
//! - [`CollectionSource`]: the interface a container exposes to the
//!   pagination layer
//! - [`Pager`]: the pagination controller: page size, current page, page
//!   count, and a cached page view, invalidated incrementally
//! - [`Paged`] / [`PagedVec`]: a container coupled with a pager bound to
//!   it for life
//! - [`ObservableVec`], [`ObservableDeque`], [`ObservableMap`],
//!   [`ObservableSortedMap`], [`ObservableSet`], [`ObservableSortedSet`]:
//!   the container family
//! - [`ItemBase`] / [`Observable`]: convenience base for element types
//!   that broadcast their own property changes
//!
//! # Example
//!
//! ```
//! use folio::PagedVec;
//!
//! let paged = PagedVec::from_items(3, vec![1, 2, 3, 4]).unwrap();
//! let pager = paged.pager();
//!
//! assert_eq!(pager.page_count(), 2);
//! assert_eq!(pager.page_view(), vec![1, 2, 3]);
//!
//! // React to the view being rebuilt.
//! pager.signals().page_view_changed.connect(|view| {
//!     println!("page now shows {} element(s)", view.len());
//! });
//!
//! // A mutation before the current page invalidates the visible slice;
//! // the pager rebuilds it before `insert` returns.
//! paged.collection().insert(0, 0);
//! assert_eq!(pager.page_view(), vec![0, 1, 2]);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────┐  ChangeEvent   ┌──────────────┐  PagerSignals  ┌──────────┐
//! │    Container     │───────────────>│    Pager     │───────────────>│ Consumer │
//! │ (ObservableVec,  │                │ (page count, │                │          │
//! │  ObservableMap,  │<───────────────│  page view)  │                │          │
//! │  ...)            │  len / slice   └──────────────┘                └──────────┘
//! └──────────────────┘
//! ```
//!
//! Everything is synchronous: by the time a mutating call on a container
//! returns, the pager's state is settled and all of its notifications have
//! been emitted, in a fixed order: page size, page count, current page,
//! page view (whichever subset applies).

pub mod collections;
pub mod error;
pub mod event;
pub mod item;
pub mod paged;
pub mod pager;
pub mod source;

pub use collections::{
    ObservableDeque, ObservableMap, ObservableSet, ObservableSortedMap, ObservableSortedSet,
    ObservableVec,
};
pub use error::{Error, Result};
pub use event::ChangeEvent;
pub use item::{ItemBase, Observable};
pub use paged::{Paged, PagedVec};
pub use pager::{Pager, PagerSignals};
pub use source::CollectionSource;
