use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::SnapshotPatch;

/// Binary max-heap sort: build the heap bottom-up, then repeatedly move
/// the root behind the shrinking heap and sift the new root down.
pub(super) fn sort(
    input: &[u32],
    out: &mut dyn StepEmitter,
) -> Result<Vec<u32>, Cancelled> {
    let mut arr = input.to_vec();
    let n = arr.len();

    for i in (0..n / 2).rev() {
        sift_down(&mut arr, n, i, out)?;
    }

    for end in (1..n).rev() {
        out.emit(SnapshotPatch::new().swapping([0, end]))?;
        arr.swap(0, end);
        out.emit(SnapshotPatch::new().values(&arr))?;
        out.step()?;
        sift_down(&mut arr, end, 0, out)?;
    }

    out.emit(SnapshotPatch::finished(&arr))?;
    Ok(arr)
}

/// Restore the heap property for the subtree rooted at `i` within
/// `arr[..heap_len]`.
fn sift_down(
    arr: &mut [u32],
    heap_len: usize,
    i: usize,
    out: &mut dyn StepEmitter,
) -> Result<(), Cancelled> {
    let mut largest = i;
    let left = 2 * i + 1;
    let right = 2 * i + 2;

    for child in [left, right] {
        if child < heap_len {
            out.emit(SnapshotPatch::new().comparing([child, largest]))?;
            out.step()?;
            if arr[child] > arr[largest] {
                largest = child;
            }
        }
    }

    if largest != i {
        out.emit(SnapshotPatch::new().swapping([i, largest]))?;
        arr.swap(i, largest);
        out.emit(SnapshotPatch::new().values(arr))?;
        out.step()?;
        sift_down(arr, heap_len, largest, out)?;
    }
    Ok(())
}
