use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::diff::Diff;
use crate::tracked::Tracker;
use crate::value::{Shape, Value};
use crate::{Track, TrackError};

/// A tracker for a fixed set of named fields.
///
/// Each field is tracked independently by its own child tracker, scalar
/// or record depending on the field's initial shape. The field set is
/// fixed at construction; fields cannot be added or removed later.
///
/// Assignments are patches: only the fields named in the patch are
/// written, everything else is left untouched. A patch is validated in
/// full before any field is written, so a rejected patch changes
/// nothing.
///
/// Aggregate state is derived from the children on every read. The
/// tracker is pristine exactly when every field is pristine, and its
/// diff holds an entry for each dirty field and nothing else.
///
/// # Example
///
/// ```
/// use tracked_kit::prelude::*;
///
/// let mut t = RecordTracker::new([
///     ("a", Value::Int(1)),
///     ("b", Value::from("x")),
/// ]);
///
/// t.set(Value::record([("a", Value::Int(2))])).unwrap();
/// assert!(t.dirty());
/// assert_eq!(t.value().get("b"), Some(&Value::from("x")));
///
/// t.revert();
/// assert!(t.pristine());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordTracker {
    fields: BTreeMap<String, Tracker>,
}

impl RecordTracker {
    /// Create a tracker from `(name, initial value)` pairs. Each field
    /// gets its own child tracker, classified by the field's shape;
    /// nested records become nested record trackers.
    pub fn new<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), Tracker::new(value)))
                .collect(),
        }
    }

    /// Build a fresh snapshot of the current value.
    ///
    /// Each call produces a new [`Value::Record`]; callers get value
    /// stability while nothing changes, not identity stability.
    #[must_use]
    pub fn value(&self) -> Value {
        Value::Record(
            self.fields
                .iter()
                .map(|(name, tracker)| (name.clone(), tracker.value()))
                .collect(),
        )
    }

    /// Apply a patch.
    ///
    /// The patch must be a [`Value::Record`]; every field present in it
    /// is forwarded to that field's child tracker, fields absent from it
    /// are untouched. The whole patch is checked before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// [`TrackError::UnknownField`] if the patch names a field outside
    /// the fixed shape, [`TrackError::TypeMismatch`] if the patch is not
    /// a record or a patched value's shape disagrees with its field's
    /// classification. On error the tracker is unchanged.
    pub fn set(&mut self, patch: Value) -> Result<(), TrackError> {
        let found = patch.shape();
        let Value::Record(entries) = patch else {
            return Err(TrackError::TypeMismatch {
                expected: Shape::Record,
                found,
            });
        };
        self.check_entries(&entries)?;
        self.apply_entries(entries);
        Ok(())
    }

    /// Assign a single field, leaving every other field untouched.
    ///
    /// # Errors
    ///
    /// Same as [`RecordTracker::set`] for one field.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), TrackError> {
        let tracker = self
            .fields
            .get_mut(name)
            .ok_or_else(|| TrackError::UnknownField(name.to_string()))?;
        tracker.set(value)
    }

    pub(crate) fn check_entries(
        &self,
        entries: &BTreeMap<String, Value>,
    ) -> Result<(), TrackError> {
        for (name, value) in entries {
            let tracker = self
                .fields
                .get(name)
                .ok_or_else(|| TrackError::UnknownField(name.clone()))?;
            tracker.check(value)?;
        }
        Ok(())
    }

    // Callers must have checked the entries first.
    pub(crate) fn apply_entries(&mut self, entries: BTreeMap<String, Value>) {
        for (name, value) in entries {
            if let Some(tracker) = self.fields.get_mut(&name) {
                tracker.apply(value);
            }
        }
    }

    /// `true` iff every field tracker is pristine. Recomputed on each
    /// read.
    #[must_use]
    pub fn pristine(&self) -> bool {
        self.fields.values().all(Tracker::pristine)
    }

    /// `true` iff at least one field tracker is dirty.
    #[must_use]
    pub fn dirty(&self) -> bool {
        !self.pristine()
    }

    /// Commit every field. Idempotent; the tracker is pristine
    /// afterward.
    pub fn commit(&mut self) {
        for tracker in self.fields.values_mut() {
            tracker.commit();
        }
    }

    /// Revert every field to its committed baseline. Idempotent; the
    /// tracker is pristine afterward.
    pub fn revert(&mut self) {
        for tracker in self.fields.values_mut() {
            tracker.revert();
        }
    }

    /// The changes since the last commit, keyed by field name and
    /// containing only the dirty fields, or `None` when every field is
    /// pristine.
    #[must_use]
    pub fn diff(&self) -> Option<Diff> {
        let entries: BTreeMap<String, Diff> = self
            .fields
            .iter()
            .filter_map(|(name, tracker)| tracker.diff().map(|diff| (name.clone(), diff)))
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(Diff::Record(entries))
        }
    }

    /// The number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` if the tracker has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `true` if `name` is part of the fixed shape.
    #[must_use]
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The field names, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Track for RecordTracker {
    type Value = Value;
    type Diff = Diff;

    fn value(&self) -> Value {
        RecordTracker::value(self)
    }

    fn set(&mut self, value: Value) -> Result<(), TrackError> {
        RecordTracker::set(self, value)
    }

    fn pristine(&self) -> bool {
        RecordTracker::pristine(self)
    }

    fn commit(&mut self) {
        RecordTracker::commit(self);
    }

    fn revert(&mut self) {
        RecordTracker::revert(self);
    }

    fn diff(&self) -> Option<Diff> {
        RecordTracker::diff(self)
    }
}
