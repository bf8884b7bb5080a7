use crate::diff::Diff;
use crate::record_tracker::RecordTracker;
use crate::value::{Shape, Value};
use crate::value_tracker::ValueTracker;
use crate::{Track, TrackError};

/// A tracker classified once, at construction, as scalar or record.
///
/// This is the node type of the tracking tree: the façade holds one,
/// and every field of a [`RecordTracker`] is one. The variant is chosen
/// from the initial value's shape and never changes afterward;
/// assignments of the wrong shape are rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tracker {
    /// Tracks an opaque scalar value as a single unit.
    Scalar(ValueTracker<Value>),
    /// Tracks a fixed set of named fields, each with its own tracker.
    Record(RecordTracker),
}

impl Tracker {
    /// Classify `value` by shape and build the matching tracker.
    /// Records become [`Tracker::Record`] with one child per field,
    /// recursively; anything else becomes [`Tracker::Scalar`].
    pub fn new(value: Value) -> Self {
        match value {
            Value::Record(fields) => Tracker::Record(RecordTracker::new(fields)),
            scalar => Tracker::Scalar(ValueTracker::new(scalar)),
        }
    }

    /// The classification made at construction.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Tracker::Scalar(_) => Shape::Scalar,
            Tracker::Record(_) => Shape::Record,
        }
    }

    /// A fresh snapshot of the current value.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Tracker::Scalar(tracker) => tracker.value().clone(),
            Tracker::Record(tracker) => tracker.value(),
        }
    }

    /// Assign a new value: a full replacement for a scalar tracker, a
    /// patch for a record tracker.
    ///
    /// # Errors
    ///
    /// [`TrackError::TypeMismatch`] if the value's shape disagrees with
    /// this tracker's classification, [`TrackError::UnknownField`] if a
    /// patch names a field outside a record's fixed shape. On error the
    /// tracker is unchanged.
    pub fn set(&mut self, value: Value) -> Result<(), TrackError> {
        self.check(&value)?;
        self.apply(value);
        Ok(())
    }

    pub(crate) fn check(&self, value: &Value) -> Result<(), TrackError> {
        match self {
            Tracker::Scalar(_) => match value {
                Value::Record(_) => Err(TrackError::TypeMismatch {
                    expected: Shape::Scalar,
                    found: Shape::Record,
                }),
                _ => Ok(()),
            },
            Tracker::Record(tracker) => match value {
                Value::Record(entries) => tracker.check_entries(entries),
                _ => Err(TrackError::TypeMismatch {
                    expected: Shape::Record,
                    found: value.shape(),
                }),
            },
        }
    }

    // Callers must have checked the value first.
    pub(crate) fn apply(&mut self, value: Value) {
        match self {
            Tracker::Scalar(tracker) => tracker.set(value),
            Tracker::Record(tracker) => {
                if let Value::Record(entries) = value {
                    tracker.apply_entries(entries);
                }
            }
        }
    }

    /// `true` iff no uncommitted change exists in this subtree.
    #[must_use]
    pub fn pristine(&self) -> bool {
        match self {
            Tracker::Scalar(tracker) => tracker.pristine(),
            Tracker::Record(tracker) => tracker.pristine(),
        }
    }

    /// The negation of [`Tracker::pristine`].
    #[must_use]
    pub fn dirty(&self) -> bool {
        !self.pristine()
    }

    /// Make the current value the new baseline.
    pub fn commit(&mut self) {
        match self {
            Tracker::Scalar(tracker) => tracker.commit(),
            Tracker::Record(tracker) => tracker.commit(),
        }
    }

    /// Restore the committed baseline.
    pub fn revert(&mut self) {
        match self {
            Tracker::Scalar(tracker) => tracker.revert(),
            Tracker::Record(tracker) => tracker.revert(),
        }
    }

    /// The changes since the last commit, or `None` when pristine.
    #[must_use]
    pub fn diff(&self) -> Option<Diff> {
        match self {
            Tracker::Scalar(tracker) => tracker.diff().map(Diff::Value),
            Tracker::Record(tracker) => tracker.diff(),
        }
    }
}

impl Track for Tracker {
    type Value = Value;
    type Diff = Diff;

    fn value(&self) -> Value {
        Tracker::value(self)
    }

    fn set(&mut self, value: Value) -> Result<(), TrackError> {
        Tracker::set(self, value)
    }

    fn pristine(&self) -> bool {
        Tracker::pristine(self)
    }

    fn commit(&mut self) {
        Tracker::commit(self);
    }

    fn revert(&mut self) {
        Tracker::revert(self);
    }

    fn diff(&self) -> Option<Diff> {
        Tracker::diff(self)
    }
}

/// The single entry point for tracking a value of either shape.
///
/// `Tracked` inspects the initial value once, builds the matching
/// [`Tracker`] variant, and forwards every operation to it verbatim for
/// the rest of its lifetime. Client code never needs to know whether it
/// is holding a scalar or a record; the recursive composition inside
/// [`RecordTracker`] already produces the right tracker per field, so
/// only this outermost entry point dispatches on shape.
///
/// # Example
///
/// ```
/// use tracked_kit::prelude::*;
///
/// let mut t = Tracked::new(42);
/// assert!(t.pristine());
///
/// t.set(Value::Int(52))?;
/// assert!(t.dirty());
///
/// t.commit();
/// assert!(t.pristine());
/// assert_eq!(t.value(), Value::Int(52));
/// # Ok::<(), tracked_kit::TrackError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tracked {
    inner: Tracker,
}

impl Tracked {
    /// Track `value`, classifying it once by shape.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            inner: Tracker::new(value.into()),
        }
    }

    /// The classification made at construction. Permanent.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.inner.shape()
    }

    /// A fresh snapshot of the current value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.inner.value()
    }

    /// Assign a new value: a full replacement for a scalar, a patch for
    /// a record.
    ///
    /// # Errors
    ///
    /// See [`Tracker::set`]. On error the tracked state is unchanged.
    pub fn set(&mut self, value: Value) -> Result<(), TrackError> {
        self.inner.set(value)
    }

    /// `true` iff no uncommitted change exists.
    #[must_use]
    pub fn pristine(&self) -> bool {
        self.inner.pristine()
    }

    /// The negation of [`Tracked::pristine`].
    #[must_use]
    pub fn dirty(&self) -> bool {
        self.inner.dirty()
    }

    /// Make the current value the new baseline.
    pub fn commit(&mut self) {
        self.inner.commit();
    }

    /// Restore the committed baseline.
    pub fn revert(&mut self) {
        self.inner.revert();
    }

    /// The changes since the last commit, or `None` when pristine.
    #[must_use]
    pub fn diff(&self) -> Option<Diff> {
        self.inner.diff()
    }
}

impl Track for Tracked {
    type Value = Value;
    type Diff = Diff;

    fn value(&self) -> Value {
        Tracked::value(self)
    }

    fn set(&mut self, value: Value) -> Result<(), TrackError> {
        Tracked::set(self, value)
    }

    fn pristine(&self) -> bool {
        Tracked::pristine(self)
    }

    fn commit(&mut self) {
        Tracked::commit(self);
    }

    fn revert(&mut self) {
        Tracked::revert(self);
    }

    fn diff(&self) -> Option<Diff> {
        Tracked::diff(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ValueDiff;

    #[test]
    fn scalar_value_classifies_as_scalar() {
        let t = Tracked::new(42);
        assert_eq!(t.shape(), Shape::Scalar);
        assert_eq!(t.value(), Value::Int(42));
    }

    #[test]
    fn record_value_classifies_as_record() {
        let t = Tracked::new(Value::record([("a", Value::Int(1))]));
        assert_eq!(t.shape(), Shape::Record);
    }

    #[test]
    fn empty_record_still_classifies_as_record() {
        let t = Tracked::new(Value::record(core::iter::empty::<(&str, Value)>()));
        assert_eq!(t.shape(), Shape::Record);
        assert!(t.pristine());
        assert!(t.diff().is_none());
    }

    #[test]
    fn scalar_lifecycle() {
        let mut t = Tracked::new(42);
        assert!(t.pristine());

        t.set(Value::Int(52)).unwrap();
        assert!(t.dirty());
        assert_eq!(
            t.diff(),
            Some(Diff::Value(ValueDiff {
                previous: Value::Int(42),
                current: Value::Int(52),
            }))
        );

        t.commit();
        assert!(t.pristine());
        assert!(t.diff().is_none());
        assert_eq!(t.value(), Value::Int(52));
    }

    #[test]
    fn scalar_rejects_record_assignment() {
        let mut t = Tracked::new(42);
        let err = t.set(Value::record([("a", Value::Int(1))])).unwrap_err();
        assert_eq!(
            err,
            TrackError::TypeMismatch {
                expected: Shape::Scalar,
                found: Shape::Record,
            }
        );
        // The rejected call left everything as it was.
        assert!(t.pristine());
        assert_eq!(t.value(), Value::Int(42));
    }

    #[test]
    fn record_rejects_scalar_assignment() {
        let mut t = Tracked::new(Value::record([("a", Value::Int(1))]));
        let err = t.set(Value::Int(5)).unwrap_err();
        assert_eq!(
            err,
            TrackError::TypeMismatch {
                expected: Shape::Record,
                found: Shape::Scalar,
            }
        );
        assert!(t.pristine());
    }

    #[test]
    fn scalar_may_change_scalar_kind() {
        // The scalar side is opaque; only the scalar/record boundary is
        // enforced.
        let mut t = Tracked::new(42);
        t.set(Value::from("now a string")).unwrap();
        assert!(t.dirty());
        t.revert();
        assert_eq!(t.value(), Value::Int(42));
    }

    #[test]
    fn record_patch_and_revert() {
        let mut t = Tracked::new(Value::record([
            ("a", Value::Int(1)),
            ("b", Value::from("x")),
        ]));

        t.set(Value::record([("a", Value::Int(2))])).unwrap();
        assert_eq!(t.value().get("a"), Some(&Value::Int(2)));
        assert_eq!(t.value().get("b"), Some(&Value::from("x")));

        let diff = t.diff().unwrap();
        assert_eq!(
            diff.get("a"),
            Some(&Diff::Value(ValueDiff {
                previous: Value::Int(1),
                current: Value::Int(2),
            }))
        );
        assert!(diff.get("b").is_none());

        t.revert();
        assert_eq!(t.value().get("a"), Some(&Value::Int(1)));
        assert!(t.diff().is_none());
    }

    #[test]
    fn nested_record_round_trip() {
        let mut t = Tracked::new(Value::record([
            ("inner", Value::record([("x", Value::Int(1))])),
            ("y", Value::Int(2)),
        ]));

        t.set(Value::record([(
            "inner",
            Value::record([("x", Value::Int(9))]),
        )]))
        .unwrap();

        assert!(t.dirty());
        let diff = t.diff().unwrap();
        assert_eq!(
            diff.get("inner").and_then(|d| d.get("x")),
            Some(&Diff::Value(ValueDiff {
                previous: Value::Int(1),
                current: Value::Int(9),
            }))
        );
        assert!(diff.get("y").is_none());

        t.revert();
        assert_eq!(
            t.value().get("inner").and_then(|v| v.get("x")),
            Some(&Value::Int(1))
        );
    }

    #[test]
    fn tracker_exposes_uniform_trait_api() {
        fn exercise<T: Track<Value = Value, Diff = Diff>>(tracker: &mut T) {
            assert!(tracker.pristine());
            let snapshot = tracker.value();
            tracker.set(snapshot).unwrap();
            assert!(tracker.pristine());
        }

        let mut scalar = Tracker::new(Value::Int(1));
        let mut record = Tracker::new(Value::record([("a", Value::Int(1))]));
        exercise(&mut scalar);
        exercise(&mut record);
    }
}
