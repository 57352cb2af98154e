use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Essentially np.bincount(data, minlength=buckets) in parallel.
///
/// Every value in `data` must be smaller than `buckets`.
pub fn par_bincount<T>(data: &[T], buckets: usize) -> Vec<usize>
where
    T: Copy + Into<usize> + Sync,
{
    // Create a vector of atomic counters
    let counts: Vec<AtomicUsize> = (0..buckets).map(|_| AtomicUsize::new(0)).collect();

    // Increment the counters in parallel
    data.par_iter().for_each(|&x| {
        counts[x.into()].fetch_add(1, Ordering::Relaxed);
    });
    counts.into_iter().map(AtomicUsize::into_inner).collect()
}

/// Turns per-bucket counts into the exclusive end offset of each bucket.
///
/// After this, bucket `b` occupies `counts[b - 1]..counts[b]` of the sorted
/// output (starting at 0 for the first bucket).
#[inline]
pub fn prefix_sums(counts: &mut [usize]) {
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
}
