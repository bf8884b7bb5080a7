use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::Value;

/// The change recorded by a scalar tracker: the last committed baseline
/// and the current value.
///
/// Diffs are plain owned snapshots. Mutating the tracker after taking a
/// diff does not change a diff already returned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueDiff<T> {
    /// The value as of the last commit, revert, or construction.
    pub previous: T,
    /// The current uncommitted value.
    pub current: T,
}

/// A structural description of what changed since the last commit.
///
/// The diff mirrors the shape of the tracked value but contains only
/// the changed parts: a scalar change is a [`ValueDiff`] pair, a record
/// change is a map holding entries for the dirty fields only. Pristine
/// fields are omitted entirely, and a tracker with no changes returns
/// `None` rather than an empty diff.
///
/// # Example
///
/// ```
/// use tracked_kit::prelude::*;
///
/// let mut t = Tracked::new(Value::record([("a", Value::Int(1))]));
/// t.set(Value::record([("a", Value::Int(2))])).unwrap();
///
/// let diff = t.diff().unwrap();
/// let a = diff.get("a").and_then(Diff::as_value).unwrap();
/// assert_eq!(a.previous, Value::Int(1));
/// assert_eq!(a.current, Value::Int(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diff {
    /// A scalar change.
    Value(ValueDiff<Value>),
    /// Changes to a record, keyed by field name. Never empty.
    Record(BTreeMap<String, Diff>),
}

impl Diff {
    /// The scalar change, if this diff is a scalar diff.
    #[must_use]
    pub fn as_value(&self) -> Option<&ValueDiff<Value>> {
        match self {
            Diff::Value(diff) => Some(diff),
            Diff::Record(_) => None,
        }
    }

    /// The per-field changes, if this diff is a record diff.
    #[must_use]
    pub fn as_record(&self) -> Option<&BTreeMap<String, Diff>> {
        match self {
            Diff::Value(_) => None,
            Diff::Record(fields) => Some(fields),
        }
    }

    /// Look up a field's change in a record diff. Returns `None` for
    /// scalar diffs and for fields that did not change.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Diff> {
        self.as_record().and_then(|fields| fields.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_diff() -> Diff {
        Diff::Value(ValueDiff {
            previous: Value::Int(1),
            current: Value::Int(2),
        })
    }

    #[test]
    fn as_value_on_scalar_diff() {
        let diff = scalar_diff();
        assert!(diff.as_value().is_some());
        assert!(diff.as_record().is_none());
        assert!(diff.get("a").is_none());
    }

    #[test]
    fn get_on_record_diff() {
        let mut fields = BTreeMap::new();
        fields.insert("a".into(), scalar_diff());
        let diff = Diff::Record(fields);

        assert!(diff.as_value().is_none());
        assert_eq!(diff.get("a"), Some(&scalar_diff()));
        assert!(diff.get("b").is_none());
    }
}
