//! # tracked-kit
//!
//! Composable dirty tracking for in-memory application state.
//!
//! A tracked value remembers its last-committed baseline, reports
//! whether it has been modified ("dirty") since, can be reverted to the
//! baseline, and can describe exactly what changed as a structural
//! diff. Trackers compose: a record is tracked field by field, so
//! dirtiness and diffs are computed per field and aggregated, with
//! nested records tracked recursively.
//!
//! This is a pure in-memory primitive meant to be embedded in larger
//! applications, such as form state managers. There is no persistence,
//! no CLI, and no internal locking; each tracker owns its own state
//! exclusively.
//!
//! ## `no_std` Support
//!
//! This crate supports `no_std` environments with the `alloc` crate.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tracked-kit = { version = "0.1", default-features = false }
//! ```
//!
//! The `std` feature only adds the `std::error::Error` impl for
//! [`TrackError`].
//!
//! ## Quick Start
//!
//! ```
//! use tracked_kit::prelude::*;
//!
//! let mut form = Tracked::new(Value::record([
//!     ("name", Value::from("ada")),
//!     ("age", Value::from(36)),
//! ]));
//! assert!(form.pristine());
//!
//! // Patches touch only the fields they name.
//! form.set(Value::record([("age", Value::from(37))]))?;
//! assert!(form.dirty());
//! assert_eq!(form.value().get("name"), Some(&Value::from("ada")));
//!
//! // The diff contains exactly the dirty fields.
//! let diff = form.diff().unwrap();
//! assert!(diff.get("age").is_some());
//! assert!(diff.get("name").is_none());
//!
//! // Revert discards the change; commit would keep it.
//! form.revert();
//! assert!(form.pristine());
//! # Ok::<(), tracked_kit::TrackError>(())
//! ```
//!
//! ## Available Trackers
//!
//! - [`Tracked`] - The façade: classifies a [`Value`] once as scalar or
//!   record and forwards everything to the matching tracker
//! - [`ValueTracker`] - Tracks a single opaque value of any type
//! - [`RecordTracker`] - Tracks a fixed set of named fields, each with
//!   its own tracker
//! - [`Tracker`] - The tagged union the façade and record fields hold
//!
//! ## The `Track` Trait
//!
//! All types implement the [`Track`] trait: snapshot the value, assign
//! a new one, check [`Track::pristine`]/[`Track::dirty`], checkpoint
//! with [`Track::commit`]/[`Track::revert`], and inspect changes with
//! [`Track::diff`]. Diffs are always relative to the last committed
//! baseline and `None` is the canonical "no changes" signal at every
//! level.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod diff;
mod error;
mod record_tracker;
mod track;
mod tracked;
mod value;
mod value_tracker;
#[cfg(feature = "wasm")]
mod wasm;

pub mod prelude;

pub use diff::{Diff, ValueDiff};
pub use error::TrackError;
pub use record_tracker::RecordTracker;
pub use track::Track;
pub use tracked::{Tracked, Tracker};
pub use value::{Shape, Value, ValueKind};
pub use value_tracker::ValueTracker;
