use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Minimum-selection sort. Positions before the outer index are final and
/// re-marked on every comparison; at most one swap per outer iteration.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    let n = arr.len();

    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            out.emit(
                SnapshotPatch::new()
                    .comparing([min, j])
                    .swapping([])
                    .sorted(0..i),
            )?;
            out.step()?;

            if arr[j] < arr[min] {
                min = j;
            }
        }

        if min != i {
            out.emit(SnapshotPatch::new().swapping([i, min]))?;
            arr.swap(i, min);
            out.emit(SnapshotPatch::new().values(&arr))?;
            out.step()?;
        }
    }

    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{replay, writes};
    use super::super::Algorithm;

    #[test]
    fn skips_swap_when_minimum_in_place() {
        let (_, rec) = replay(Algorithm::Selection, &[1, 2, 3, 4]);
        assert!(writes(&rec).is_empty());
        // 3 + 2 + 1 comparisons, one step each.
        assert_eq!(rec.step_count(), 6);
    }

    #[test]
    fn one_swap_per_outer_iteration() {
        let (_, rec) = replay(Algorithm::Selection, &[3, 1, 2]);
        assert_eq!(writes(&rec), vec![vec![1, 3, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn prefix_marked_sorted_on_comparisons() {
        let (_, rec) = replay(Algorithm::Selection, &[4, 3, 2, 1]);
        let prefixes: Vec<usize> = rec
            .patches()
            .filter(|p| p.comparing.is_some() && p.sorted.is_some())
            .filter_map(|p| p.sorted.as_ref().map(std::collections::BTreeSet::len))
            .collect();
        // Outer index 0 compares 3 times, 1 twice, 2 once; the closing
        // patch marks all four.
        assert_eq!(prefixes, vec![0, 0, 0, 1, 1, 2, 4]);
    }
}
