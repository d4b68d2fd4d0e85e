use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Top-down merge sort. Ties take from the left run, so the sort is stable.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    let len = arr.len();
    sort_range(&mut arr, 0, len, out)?;
    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}

/// Sort `arr[lo..hi]`. The left half takes the extra element of an odd
/// range.
fn sort_range(
    arr: &mut [u32],
    lo: usize,
    hi: usize,
    out: &mut dyn StepEmitter,
) -> Result<(), Cancelled> {
    if hi - lo < 2 {
        return Ok(());
    }
    let mid = lo + (hi - lo).div_ceil(2);
    sort_range(arr, lo, mid, out)?;
    sort_range(arr, mid, hi, out)?;
    merge(arr, lo, mid, hi, out)
}

/// Merge the sorted runs `arr[lo..mid]` and `arr[mid..hi]`.
fn merge(
    arr: &mut [u32],
    lo: usize,
    mid: usize,
    hi: usize,
    out: &mut dyn StepEmitter,
) -> Result<(), Cancelled> {
    let left = arr[lo..mid].to_vec();
    let right = arr[mid..hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);

    while i < left.len() && j < right.len() {
        out.emit(
            SnapshotPatch::new()
                .comparing([lo + i, mid + j])
                .swapping([k]),
        )?;
        out.step()?;

        if left[i] <= right[j] {
            arr[k] = left[i];
            i += 1;
        } else {
            arr[k] = right[j];
            j += 1;
        }
        out.emit(SnapshotPatch::new().values(arr))?;
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        out.emit(SnapshotPatch::new().swapping([k]))?;
        out.step()?;
        arr[k] = value;
        out.emit(SnapshotPatch::new().values(arr))?;
        k += 1;
    }

    Ok(())
}
