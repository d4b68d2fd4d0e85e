//! Visualization snapshot and the partial updates algorithms emit.
//!
//! A [`Snapshot`] is everything a renderer needs to draw one frame: the
//! values and three index sets (compared, swapped/written, finalized).
//! Algorithms never send whole snapshots; they send a [`SnapshotPatch`]
//! carrying only the fields that changed, and the engine folds it in with
//! [`Snapshot::apply`].

use std::collections::BTreeSet;

/// Ordered set of sequence indices.
pub type IndexSet = BTreeSet<usize>;

/// The visualization-relevant state of the sequence being sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Current values, in display order.
    pub values: Vec<u32>,
    /// Indices currently being compared.
    pub comparing: IndexSet,
    /// Indices currently being swapped or overwritten.
    pub swapping: IndexSet,
    /// Indices known to be in their final position.
    pub sorted: IndexSet,
}

impl Snapshot {
    /// Snapshot of an unsorted sequence with all index sets empty.
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Clear the compare, swap and sorted sets, keeping the values.
    pub fn clear_marks(&mut self) {
        self.comparing.clear();
        self.swapping.clear();
        self.sorted.clear();
    }

    /// Merge a patch: fields present in `patch` replace the current ones,
    /// absent fields are left untouched.
    pub fn apply(&mut self, patch: SnapshotPatch) {
        let SnapshotPatch {
            values,
            comparing,
            swapping,
            sorted,
        } = patch;
        if let Some(values) = values {
            self.values = values;
        }
        if let Some(comparing) = comparing {
            self.comparing = comparing;
        }
        if let Some(swapping) = swapping {
            self.swapping = swapping;
        }
        if let Some(sorted) = sorted {
            self.sorted = sorted;
        }
    }

    /// Pure form of [`apply`](Self::apply).
    #[must_use]
    pub fn merged(mut self, patch: SnapshotPatch) -> Self {
        self.apply(patch);
        self
    }

    /// Whether every index in every set lies inside `0..len`.
    pub fn indices_in_bounds(&self) -> bool {
        let len = self.values.len();
        [&self.comparing, &self.swapping, &self.sorted]
            .iter()
            .all(|set| set.last().is_none_or(|&i| i < len))
    }

    /// Whether the run this snapshot belongs to has marked every index as
    /// finalized with no compare/swap highlight left over.
    pub fn is_finished(&self) -> bool {
        self.comparing.is_empty()
            && self.swapping.is_empty()
            && self.sorted.len() == self.values.len()
    }
}

/// Partial snapshot update. `None` means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotPatch {
    /// Replacement values.
    pub values: Option<Vec<u32>>,
    /// Replacement compare set.
    pub comparing: Option<IndexSet>,
    /// Replacement swap set.
    pub swapping: Option<IndexSet>,
    /// Replacement sorted set.
    pub sorted: Option<IndexSet>,
}

impl SnapshotPatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values.
    #[must_use]
    pub fn values(mut self, values: &[u32]) -> Self {
        self.values = Some(values.to_vec());
        self
    }

    /// Set the compare set.
    #[must_use]
    pub fn comparing<I: IntoIterator<Item = usize>>(mut self, idx: I) -> Self {
        self.comparing = Some(idx.into_iter().collect());
        self
    }

    /// Set the swap set.
    #[must_use]
    pub fn swapping<I: IntoIterator<Item = usize>>(mut self, idx: I) -> Self {
        self.swapping = Some(idx.into_iter().collect());
        self
    }

    /// Set the sorted set.
    #[must_use]
    pub fn sorted<I: IntoIterator<Item = usize>>(mut self, idx: I) -> Self {
        self.sorted = Some(idx.into_iter().collect());
        self
    }

    /// The closing patch every algorithm emits: final values, everything
    /// sorted, no highlights.
    pub fn finished(values: &[u32]) -> Self {
        Self::new()
            .values(values)
            .sorted(0..values.len())
            .comparing([])
            .swapping([])
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_none()
            && self.comparing.is_none()
            && self.swapping.is_none()
            && self.sorted.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_present_fields() {
        let mut snap = Snapshot::new(vec![4, 2, 9]);
        snap.apply(SnapshotPatch::new().comparing([0, 1]));
        snap.apply(SnapshotPatch::new().swapping([1]));

        assert_eq!(snap.values, vec![4, 2, 9]);
        assert_eq!(snap.comparing, IndexSet::from([0, 1]));
        assert_eq!(snap.swapping, IndexSet::from([1]));
        assert!(snap.sorted.is_empty());
    }

    #[test]
    fn latest_write_wins() {
        let snap = Snapshot::new(vec![1, 2])
            .merged(SnapshotPatch::new().comparing([0, 1]))
            .merged(SnapshotPatch::new().comparing([1]));
        assert_eq!(snap.comparing, IndexSet::from([1]));
    }

    #[test]
    fn empty_patch_is_identity() {
        let snap = Snapshot::new(vec![3, 1]).merged(
            SnapshotPatch::new().sorted([0]).swapping([0, 1]),
        );
        assert!(SnapshotPatch::new().is_empty());
        assert_eq!(snap.clone().merged(SnapshotPatch::new()), snap);
    }

    #[test]
    fn finished_patch_marks_everything() {
        let snap = Snapshot::new(vec![9, 8, 7])
            .merged(SnapshotPatch::new().comparing([0, 2]).swapping([2]))
            .merged(SnapshotPatch::finished(&[7, 8, 9]));
        assert!(snap.is_finished());
        assert_eq!(snap.values, vec![7, 8, 9]);
        assert_eq!(snap.sorted, IndexSet::from([0, 1, 2]));
    }

    #[test]
    fn bounds_check() {
        let mut snap = Snapshot::new(vec![1, 2, 3]);
        snap.apply(SnapshotPatch::new().comparing([1, 2]));
        assert!(snap.indices_in_bounds());
        snap.apply(SnapshotPatch::new().sorted([3]));
        assert!(!snap.indices_in_bounds());
    }

    #[test]
    fn clear_marks_keeps_values() {
        let mut snap = Snapshot::new(vec![2, 1])
            .merged(SnapshotPatch::finished(&[1, 2]));
        snap.clear_marks();
        assert_eq!(snap, Snapshot::new(vec![1, 2]));
    }
}
