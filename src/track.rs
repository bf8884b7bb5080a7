use crate::TrackError;

/// Core trait implemented by every tracker.
///
/// A tracker wraps a piece of mutable state and remembers the value it
/// held at the last commit (or construction). It can report whether the
/// state has changed since, discard the change, or describe it.
///
/// # Contract
///
/// All implementations must satisfy:
/// - `pristine()` is true immediately after construction, [`commit`],
///   or [`revert`], and `dirty()` is always its negation.
/// - `commit` and `revert` are idempotent.
/// - `diff()` returns `Some` exactly when the tracker is dirty, and the
///   change it describes is always relative to the last committed
///   baseline, never to an intermediate `set`.
///
/// [`commit`]: Track::commit
/// [`revert`]: Track::revert
pub trait Track {
    /// The value type held by this tracker.
    type Value;
    /// The change description produced by [`Track::diff`].
    type Diff;

    /// A fresh snapshot of the current value.
    fn value(&self) -> Self::Value;

    /// Assign a new value.
    ///
    /// Scalar trackers accept any value of their type. Record trackers
    /// treat the input as a patch and may reject it; a rejected call
    /// leaves the tracker untouched.
    fn set(&mut self, value: Self::Value) -> Result<(), TrackError>;

    /// `true` iff no uncommitted change exists anywhere in this
    /// tracker's subtree.
    fn pristine(&self) -> bool;

    /// The negation of [`Track::pristine`].
    fn dirty(&self) -> bool {
        !self.pristine()
    }

    /// Make the current value the new baseline, clearing dirty state.
    fn commit(&mut self);

    /// Discard uncommitted changes, restoring the last committed
    /// baseline.
    fn revert(&mut self);

    /// Describe what changed since the last commit, or `None` when
    /// pristine.
    fn diff(&self) -> Option<Self::Diff>;
}
