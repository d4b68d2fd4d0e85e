//! Instrumented sorting algorithms.
//!
//! Each implementation copies its input into a working vector, sorts it in
//! place and reports every comparison and write through a
//! [`StepEmitter`]. The caller's slice is never mutated; the sorted vector
//! is returned on completion and also carried by the closing
//! [`SnapshotPatch::finished`](crate::snapshot::SnapshotPatch::finished)
//! emit.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emitter::{Cancelled, StepEmitter};
use crate::error::SortlabError;

/// The six animated sorting algorithms.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Adjacent exchange, O(n²).
    #[default]
    Bubble,
    /// Minimum selection, O(n²).
    Selection,
    /// Shift-based insertion, O(n²).
    Insertion,
    /// Top-down merge sort, O(n log n).
    Merge,
    /// Quicksort with Lomuto partition, O(n log n) expected.
    Quick,
    /// Binary max-heap sort, O(n log n).
    Heap,
}

impl Algorithm {
    /// Every algorithm, in control-surface order.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
    ];

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
        }
    }

    /// Bilingual label shown in the control surface and sent to the
    /// explanation service.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bubble => "冒泡排序 (Bubble Sort)",
            Self::Selection => "选择排序 (Selection Sort)",
            Self::Insertion => "插入排序 (Insertion Sort)",
            Self::Merge => "归并排序 (Merge Sort)",
            Self::Quick => "快速排序 (Quick Sort)",
            Self::Heap => "堆排序 (Heap Sort)",
        }
    }

    /// Sort a copy of `input`, reporting progress through `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] from the first checkpoint that observes
    /// cancellation; no further events are emitted after that.
    pub fn sort(
        self,
        input: &[u32],
        out: &mut dyn StepEmitter,
    ) -> Result<Vec<u32>, Cancelled> {
        match self {
            Self::Bubble => bubble::sort(input, out),
            Self::Selection => selection::sort(input, out),
            Self::Insertion => insertion::sort(input, out),
            Self::Merge => merge::sort(input, out),
            Self::Quick => quick::sort(input, out),
            Self::Heap => heap::sort(input, out),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortlabError;

    /// Accepts `quick`, `quick_sort`, `quick-sort`, `Quick Sort`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect();
        let key = key.strip_suffix("sort").unwrap_or(&key);
        match key {
            "bubble" => Ok(Self::Bubble),
            "selection" => Ok(Self::Selection),
            "insertion" => Ok(Self::Insertion),
            "merge" => Ok(Self::Merge),
            "quick" => Ok(Self::Quick),
            "heap" => Ok(Self::Heap),
            _ => Err(SortlabError::InvalidAlgorithm(s.to_owned())),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::emitter::{Recorder, TraceEvent};
    use crate::snapshot::{Snapshot, SnapshotPatch};

    use super::Algorithm;

    /// Run `algo` over `input` with a recorder and fold every emitted
    /// patch into a snapshot, the way the engine does.
    pub(crate) fn replay(algo: Algorithm, input: &[u32]) -> (Snapshot, Recorder) {
        let mut rec = Recorder::new();
        let sorted = algo.sort(input, &mut rec).unwrap();
        let mut snap = Snapshot::new(input.to_vec());
        for patch in rec.patches() {
            snap.apply(patch.clone());
        }
        assert_eq!(snap.values, sorted);
        (snap, rec)
    }

    /// Every compare set emitted, in order.
    pub(crate) fn comparisons(rec: &Recorder) -> Vec<Vec<usize>> {
        rec.patches()
            .filter_map(|p| p.comparing.as_ref())
            .filter(|c| !c.is_empty())
            .map(|c| c.iter().copied().collect())
            .collect()
    }

    /// Every value vector emitted, in order (excluding the closing patch).
    pub(crate) fn writes(rec: &Recorder) -> Vec<Vec<u32>> {
        let patches: Vec<&SnapshotPatch> = rec.patches().collect();
        let body = &patches[..patches.len().saturating_sub(1)];
        body.iter().filter_map(|p| p.values.clone()).collect()
    }

    /// Whether any non-final emit touches the sorted set with a non-empty
    /// value.
    pub(crate) fn marks_sorted_early(rec: &Recorder) -> bool {
        let events = rec.events();
        events[..events.len() - 1].iter().any(|e| {
            matches!(e, TraceEvent::Emit(p) if p.sorted.as_ref().is_some_and(|s| !s.is_empty()))
        })
    }
}
