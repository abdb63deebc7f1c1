//! Change-notifying containers.
//!
//! Each type here wraps a standard container by composition and exposes
//! only the mutating operations that are instrumented with change
//! notification: after every externally invoked mutation, exactly one
//! [`ChangeEvent`](crate::ChangeEvent) is emitted on the container's
//! `changed` signal, with batch operations collapsed to a single `Reset`.
//!
//! All mutators take `&self` (interior mutability), so a container can be
//! shared behind an `Arc` between the code that mutates it and a
//! [`Pager`](crate::Pager) that observes it. The internal lock is always
//! released before the event is emitted, so observers may freely read the
//! container from inside a slot.
//!
//! Indices in emitted events follow each container's linear ordering:
//! insertion order for [`ObservableVec`] and [`ObservableDeque`], key/sort
//! order for [`ObservableSortedMap`] and [`ObservableSortedSet`], and
//! iteration order for the hash-backed [`ObservableMap`] and
//! [`ObservableSet`].

mod deque;
mod map;
mod set;
mod sorted_map;
mod sorted_set;
mod vec;

pub use deque::ObservableDeque;
pub use map::ObservableMap;
pub use set::ObservableSet;
pub use sorted_map::ObservableSortedMap;
pub use sorted_set::ObservableSortedSet;
pub use vec::ObservableVec;
