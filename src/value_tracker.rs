use crate::diff::ValueDiff;
use crate::{Track, TrackError};

/// A tracker for a single scalar value.
///
/// Holds the current value alongside the value as of the last commit.
/// Dirtiness is decided by comparing the two with `PartialEq`; no deep
/// structural comparison is performed beyond what `T`'s own equality
/// does. Only one level of history is kept: the committed baseline and
/// the working value.
///
/// Setting a value never moves the baseline. Diffs and reverts always
/// refer to the last commit, so setting twice before committing still
/// diffs against the committed value, and setting a value equal to the
/// baseline makes the tracker pristine again.
///
/// # Example
///
/// ```
/// use tracked_kit::ValueTracker;
///
/// let mut t = ValueTracker::new(42);
/// assert!(t.pristine());
///
/// t.set(52);
/// assert!(t.dirty());
///
/// let diff = t.diff().unwrap();
/// assert_eq!(diff.previous, 42);
/// assert_eq!(diff.current, 52);
///
/// t.revert();
/// assert_eq!(*t.value(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTracker<T> {
    previous: T,
    current: T,
}

impl<T: Clone + PartialEq> ValueTracker<T> {
    /// Create a new tracker. The initial value becomes both the current
    /// value and the committed baseline.
    pub fn new(value: T) -> Self {
        Self {
            previous: value.clone(),
            current: value,
        }
    }

    /// Get the current value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.current
    }

    /// Get the committed baseline.
    #[must_use]
    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Assign a new value. The baseline is untouched; any value is
    /// accepted at this layer, shape routing happens in [`crate::Tracked`].
    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    /// `true` iff the current value equals the committed baseline.
    #[must_use]
    pub fn pristine(&self) -> bool {
        self.previous == self.current
    }

    /// The negation of [`ValueTracker::pristine`].
    #[must_use]
    pub fn dirty(&self) -> bool {
        !self.pristine()
    }

    /// Make the current value the new baseline. Idempotent; the tracker
    /// is pristine afterward.
    pub fn commit(&mut self) {
        self.previous.clone_from(&self.current);
    }

    /// Restore the committed baseline. Idempotent; the tracker is
    /// pristine afterward.
    pub fn revert(&mut self) {
        self.current.clone_from(&self.previous);
    }

    /// The change relative to the committed baseline, or `None` when
    /// pristine.
    #[must_use]
    pub fn diff(&self) -> Option<ValueDiff<T>> {
        if self.dirty() {
            Some(ValueDiff {
                previous: self.previous.clone(),
                current: self.current.clone(),
            })
        } else {
            None
        }
    }
}

impl<T: Clone + PartialEq> Track for ValueTracker<T> {
    type Value = T;
    type Diff = ValueDiff<T>;

    fn value(&self) -> T {
        self.current.clone()
    }

    fn set(&mut self, value: T) -> Result<(), TrackError> {
        ValueTracker::set(self, value);
        Ok(())
    }

    fn pristine(&self) -> bool {
        ValueTracker::pristine(self)
    }

    fn commit(&mut self) {
        ValueTracker::commit(self);
    }

    fn revert(&mut self) {
        ValueTracker::revert(self);
    }

    fn diff(&self) -> Option<ValueDiff<T>> {
        ValueTracker::diff(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn new_tracker_is_pristine() {
        let t = ValueTracker::new(42);
        assert_eq!(*t.value(), 42);
        assert!(t.pristine());
        assert!(!t.dirty());
        assert!(t.diff().is_none());
    }

    #[test]
    fn set_updates_value_and_dirties() {
        let mut t = ValueTracker::new(42);
        t.set(52);
        assert_eq!(*t.value(), 52);
        assert!(t.dirty());
        assert!(!t.pristine());
    }

    #[test]
    fn diff_pairs_baseline_with_current() {
        let mut t = ValueTracker::new("test");
        t.set("hello");
        let diff = t.diff().unwrap();
        assert_eq!(diff.previous, "test");
        assert_eq!(diff.current, "hello");
    }

    #[test]
    fn commit_keeps_current_and_clears_dirty() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        t.commit();
        assert_eq!(*t.value(), 2);
        assert_eq!(*t.previous(), 2);
        assert!(t.pristine());
        assert!(t.diff().is_none());
    }

    #[test]
    fn revert_restores_baseline() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        t.revert();
        assert_eq!(*t.value(), 1);
        assert!(t.pristine());
        assert!(t.diff().is_none());
    }

    #[test]
    fn commit_is_idempotent() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        t.commit();
        let snapshot = t.clone();
        t.commit();
        assert_eq!(t, snapshot);
    }

    #[test]
    fn revert_is_idempotent() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        t.revert();
        let snapshot = t.clone();
        t.revert();
        assert_eq!(t, snapshot);
    }

    #[test]
    fn setting_the_baseline_value_is_pristine() {
        let mut t = ValueTracker::new(5);
        t.set(9);
        assert!(t.dirty());

        // Writing the committed value back counts as no change.
        t.set(5);
        assert!(t.pristine());
        assert!(t.diff().is_none());
    }

    #[test]
    fn diff_is_against_last_commit_not_last_set() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        t.set(3);

        let diff = t.diff().unwrap();
        assert_eq!(diff.previous, 1);
        assert_eq!(diff.current, 3);

        // Revert returns to the commit, not the intermediate set.
        t.revert();
        assert_eq!(*t.value(), 1);
    }

    #[test]
    fn diff_is_a_snapshot() {
        let mut t = ValueTracker::new(1);
        t.set(2);
        let diff = t.diff().unwrap();
        t.set(3);
        t.commit();
        assert_eq!(diff.previous, 1);
        assert_eq!(diff.current, 2);
    }

    #[test]
    fn tracks_owned_strings() {
        let mut t = ValueTracker::new(String::from("a"));
        t.set(String::from("b"));
        assert!(t.dirty());
        t.commit();
        assert_eq!(t.value(), "b");
        assert!(t.pristine());
    }

    #[test]
    fn dirtiness_follows_partial_eq() {
        let mut t = ValueTracker::new(String::from("same"));
        t.set(String::from("same"));
        assert!(t.pristine());
    }
}
