use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Adjacent-exchange sort. After pass `i` the trailing `i + 1` positions
/// are final and marked sorted.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    let n = arr.len();

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            out.emit(SnapshotPatch::new().comparing([j, j + 1]).swapping([]))?;
            out.step()?;

            if arr[j] > arr[j + 1] {
                out.emit(
                    SnapshotPatch::new()
                        .comparing([j, j + 1])
                        .swapping([j, j + 1]),
                )?;
                arr.swap(j, j + 1);
                out.emit(SnapshotPatch::new().values(&arr))?;
                out.step()?;
            }
        }
        out.emit(SnapshotPatch::new().sorted(n - 1 - i..n))?;
    }

    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{comparisons, replay, writes};
    use super::super::Algorithm;
    use crate::snapshot::IndexSet;

    #[test]
    fn four_element_walkthrough() {
        let (snap, rec) = replay(Algorithm::Bubble, &[5, 3, 8, 1]);

        assert_eq!(
            comparisons(&rec),
            vec![
                // pass 1
                vec![0, 1],
                vec![0, 1],
                vec![1, 2],
                vec![2, 3],
                vec![2, 3],
                // pass 2
                vec![0, 1],
                vec![1, 2],
                vec![1, 2],
                // pass 3
                vec![0, 1],
                vec![0, 1],
            ]
        );
        assert_eq!(
            writes(&rec),
            vec![
                vec![3, 5, 8, 1],
                vec![3, 5, 1, 8],
                vec![3, 1, 5, 8],
                vec![1, 3, 5, 8],
            ]
        );
        assert_eq!(snap.values, vec![1, 3, 5, 8]);
        assert_eq!(snap.sorted, IndexSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn trailing_positions_marked_after_each_pass() {
        let (_, rec) = replay(Algorithm::Bubble, &[4, 3, 2, 1]);
        let sorted: Vec<Vec<usize>> = rec
            .patches()
            .filter_map(|p| p.sorted.as_ref())
            .map(|s| s.iter().copied().collect())
            .collect();
        assert_eq!(
            sorted,
            vec![vec![3], vec![2, 3], vec![1, 2, 3], vec![0, 1, 2, 3]]
        );
    }

    #[test]
    fn equal_neighbours_are_not_swapped() {
        let (_, rec) = replay(Algorithm::Bubble, &[2, 2, 2]);
        assert!(writes(&rec).is_empty());
    }
}
