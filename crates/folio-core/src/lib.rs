//! Observation primitives for folio.
//!
//! This crate provides the two building blocks the collection layer is
//! built from:
//!
//! - **Signal/slot system**: type-safe broadcast notification with
//!   per-connection ids and RAII guards
//! - **Property system**: change-detecting value cells that pair with
//!   signals for change notification
//!
//! Dispatch is synchronous and happens in the emitting thread: by the time
//! [`Signal::emit`] returns, every connected slot has run. There is no
//! event loop and no deferred delivery anywhere in this crate.
//!
//! # Signal/Slot Example
//!
//! ```
//! use folio_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//!
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use folio_core::{Property, Signal};
//!
//! // A reactive counter with change notification
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn set_value(&self, new_value: i32) {
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//! ```

pub mod property;
pub mod signal;

pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
