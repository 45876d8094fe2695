//! Spectrum bucketing and the per-bucket envelope
//!
//! Buckets are equal-width, contiguous and non-overlapping. Bucket `i`
//! covers bins `[i * size, (i + 1) * size)`, so together they span
//! `[0, count * size)` and any bins past that are ignored.

use std::ops::Range;

/// Bins per bucket: `usable_samples / bucket_count`, rounded down
pub fn bucket_average_size(usable_samples: usize, bucket_count: usize) -> usize {
    if bucket_count == 0 {
        return 0;
    }
    usable_samples / bucket_count
}

/// Bin range of every bucket, left to right
pub fn bucket_ranges(bucket_count: usize, average_size: usize) -> Vec<Range<usize>> {
    (0..bucket_count)
        .map(|i| i * average_size..(i + 1) * average_size)
        .collect()
}

/// Write each bucket's scaled mean magnitude into `targets`
///
/// A zero `average_size` yields zero targets. The caller guarantees that
/// `spectrum` holds at least `targets.len() * average_size` bins.
pub fn fill_bucket_targets(
    spectrum: &[f32],
    average_size: usize,
    modifier: f32,
    targets: &mut [f32],
) {
    if average_size == 0 {
        targets.fill(0.0);
        return;
    }

    for (target, bins) in targets.iter_mut().zip(spectrum.chunks_exact(average_size)) {
        let sum: f32 = bins
            .iter()
            .map(|&m| if m.is_finite() { m } else { 0.0 })
            .sum();
        *target = sum / average_size as f32 * modifier;
    }
}

/// Decay `current` by `decay_step`, snap up to `target`, cap at `max`
///
/// No lower bound is applied; negative targets produce negative intensities.
pub fn apply_envelope(current: f32, target: f32, decay_step: f32, max: f32) -> f32 {
    let mut value = current - decay_step;
    if value < target {
        value = target;
    }
    if value > max {
        value = max;
    }
    value
}
