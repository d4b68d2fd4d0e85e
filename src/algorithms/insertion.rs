use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Shift-based insertion sort. The sorted set is cleared as each new key
/// starts; only the closing emit marks positions final.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    let n = arr.len();

    for i in 1..n {
        let key = arr[i];
        // Slot the key will land in; its predecessor is `hole - 1`.
        let mut hole = i;

        out.emit(SnapshotPatch::new().comparing([i, i - 1]).sorted([]))?;
        out.step()?;

        while hole > 0 && arr[hole - 1] > key {
            out.emit(
                SnapshotPatch::new()
                    .comparing([hole - 1, hole])
                    .swapping([hole]),
            )?;
            arr[hole] = arr[hole - 1];
            out.emit(SnapshotPatch::new().values(&arr))?;
            out.step()?;
            hole -= 1;
        }

        arr[hole] = key;
        out.emit(SnapshotPatch::new().values(&arr).swapping([hole]))?;
        out.step()?;
    }

    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}
