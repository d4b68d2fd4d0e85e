use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Quicksort with Lomuto partitioning around the last element of each
/// range.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    if arr.len() > 1 {
        let high = arr.len() - 1;
        sort_range(&mut arr, 0, high, out)?;
    }
    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}

/// Sort the inclusive range `arr[low..=high]`.
fn sort_range(
    arr: &mut [u32],
    low: usize,
    high: usize,
    out: &mut dyn StepEmitter,
) -> Result<(), Cancelled> {
    if low >= high {
        return Ok(());
    }
    let pivot = partition(arr, low, high, out)?;
    if pivot > low {
        sort_range(arr, low, pivot - 1, out)?;
    }
    sort_range(arr, pivot + 1, high, out)
}

/// Lomuto partition; returns the pivot's final index.
fn partition(
    arr: &mut [u32],
    low: usize,
    high: usize,
    out: &mut dyn StepEmitter,
) -> Result<usize, Cancelled> {
    let pivot = arr[high];
    // Next slot for an element smaller than the pivot.
    let mut store = low;

    for j in low..high {
        out.emit(SnapshotPatch::new().comparing([j, high]).swapping([]))?;
        out.step()?;

        if arr[j] < pivot {
            out.emit(SnapshotPatch::new().swapping([store, j]))?;
            arr.swap(store, j);
            out.emit(SnapshotPatch::new().values(arr))?;
            out.step()?;
            store += 1;
        }
    }

    out.emit(SnapshotPatch::new().swapping([store, high]))?;
    arr.swap(store, high);
    out.emit(SnapshotPatch::new().values(arr))?;
    out.step()?;
    Ok(store)
}
