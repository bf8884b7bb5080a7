//! Convenient re-exports for common usage.
//!
//! ```
//! use tracked_kit::prelude::*;
//! ```

pub use crate::Diff;
pub use crate::RecordTracker;
pub use crate::Shape;
pub use crate::Track;
pub use crate::TrackError;
pub use crate::Tracked;
pub use crate::Tracker;
pub use crate::Value;
pub use crate::ValueDiff;
pub use crate::ValueKind;
pub use crate::ValueTracker;
