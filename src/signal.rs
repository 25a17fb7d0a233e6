//! 1-D numeric primitives used by lane segmentation and band detection.
//!
//! Purpose
//! - Everything the pipeline measures is a 1-D intensity profile (column
//!   means for lanes, row means for bands). This module provides the
//!   smoothing, peak-finding and percentile operations those stages need.
//!
//! Design
//! - The operations sit behind the [`SignalOps`] capability trait so the
//!   detection algorithms stay independent of the numeric backend;
//!   [`GaussianSignal`] is the default implementation.
//! - `smooth_1d` is a truncated Gaussian (radius `4σ`, reflected border), so
//!   a constant signal passes through unchanged.
//! - `find_peaks` mirrors the usual DSP contract: plateau-aware local maxima,
//!   a minimum-height gate, distance pruning that keeps the taller of two
//!   close peaks, and an optional minimum width evaluated at half prominence
//!   with sub-sample interpolation.
//! - `percentile` uses linear interpolation between order statistics.
//!
//! Notes
//! - Peak indices are returned in ascending order regardless of pruning
//!   order, which keeps downstream band ids deterministic.

/// Constraints applied when searching for peaks in a profile.
#[derive(Clone, Copy, Debug)]
pub struct PeakCriteria {
    /// Minimum sample value for a local maximum to count.
    pub min_height: f32,
    /// Minimum index distance between two surviving peaks (>=1).
    pub min_distance: usize,
    /// Minimum peak width at half prominence, in samples.
    pub min_width: Option<f32>,
}

/// Numeric backend for the profile operations the pipeline relies on.
pub trait SignalOps {
    /// Gaussian-smooth `data` with standard deviation `sigma`.
    fn smooth_1d(&self, data: &[f32], sigma: f32) -> Vec<f32>;

    /// Indices of local maxima satisfying `criteria`, in ascending order.
    fn find_peaks(&self, data: &[f32], criteria: &PeakCriteria) -> Vec<usize>;

    /// The `q`-th percentile of `data` (`0 <= q <= 100`), 0 when empty.
    fn percentile(&self, data: &[f32], q: f32) -> f32;
}

/// Default pure-Rust backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianSignal;

impl SignalOps for GaussianSignal {
    fn smooth_1d(&self, data: &[f32], sigma: f32) -> Vec<f32> {
        if data.is_empty() || sigma <= 0.0 {
            return data.to_vec();
        }
        let radius = (4.0 * sigma + 0.5) as usize;
        if radius == 0 {
            return data.to_vec();
        }
        let mut kernel = Vec::with_capacity(2 * radius + 1);
        let inv_two_sigma2 = 0.5 / (sigma * sigma);
        for k in -(radius as isize)..=(radius as isize) {
            let d = k as f32;
            kernel.push((-d * d * inv_two_sigma2).exp());
        }
        let norm: f32 = kernel.iter().sum();
        for w in &mut kernel {
            *w /= norm;
        }

        let n = data.len();
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let mut acc = 0.0f32;
            for (ki, w) in kernel.iter().enumerate() {
                let offset = ki as isize - radius as isize;
                acc += w * data[reflect_index(i as isize + offset, n)];
            }
            out.push(acc);
        }
        out
    }

    fn find_peaks(&self, data: &[f32], criteria: &PeakCriteria) -> Vec<usize> {
        let mut peaks = local_maxima(data);
        peaks.retain(|&p| data[p] >= criteria.min_height);

        if criteria.min_distance > 1 && peaks.len() > 1 {
            peaks = prune_by_distance(data, peaks, criteria.min_distance);
        }

        if let Some(min_width) = criteria.min_width {
            if min_width > 0.0 {
                peaks.retain(|&p| peak_width_at_half_prominence(data, p) >= min_width);
            }
        }
        peaks
    }

    fn percentile(&self, data: &[f32], q: f32) -> f32 {
        if data.is_empty() {
            return 0.0;
        }
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let q = q.clamp(0.0, 100.0);
        let rank = q / 100.0 * (sorted.len() - 1) as f32;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        if lo == hi {
            sorted[lo]
        } else {
            let frac = rank - lo as f32;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Reflect an out-of-range index back into `[0, n)` (border mode `dcba|abcd|dcba`).
fn reflect_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    let mut i = i;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Strict local maxima; flat plateaus report their midpoint.
fn local_maxima(data: &[f32]) -> Vec<usize> {
    let n = data.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }
    let mut i = 1usize;
    let i_max = n - 1;
    while i < i_max {
        if data[i - 1] < data[i] {
            // Scan past a possible plateau of equal samples.
            let mut i_ahead = i + 1;
            while i_ahead < i_max && data[i_ahead] == data[i] {
                i_ahead += 1;
            }
            if data[i_ahead] < data[i] {
                let left_edge = i;
                let right_edge = i_ahead - 1;
                peaks.push((left_edge + right_edge) / 2);
                i = i_ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Keep the tallest peaks, removing any neighbour closer than `min_distance`.
fn prune_by_distance(data: &[f32], peaks: Vec<usize>, min_distance: usize) -> Vec<usize> {
    let mut keep = vec![true; peaks.len()];
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| {
        data[peaks[a]]
            .partial_cmp(&data[peaks[b]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    // Highest priority first; each survivor shadows its close neighbours.
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 {
            k -= 1;
            if peaks[j] - peaks[k] >= min_distance {
                break;
            }
            keep[k] = false;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < min_distance {
            keep[k] = false;
            k += 1;
        }
    }
    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

/// Width of the peak at half its prominence, with sub-sample interpolation.
fn peak_width_at_half_prominence(data: &[f32], peak: usize) -> f32 {
    let n = data.len();
    let peak_value = data[peak];

    // Prominence bases: walk each side until a sample exceeds the peak or the
    // border is hit; the minimum along the walk is the base on that side.
    let mut left_min = peak_value;
    let mut i = peak as isize - 1;
    while i >= 0 && data[i as usize] <= peak_value {
        left_min = left_min.min(data[i as usize]);
        i -= 1;
    }
    let left_stop = (i + 1) as usize;

    let mut right_min = peak_value;
    let mut i = peak + 1;
    while i < n && data[i] <= peak_value {
        right_min = right_min.min(data[i]);
        i += 1;
    }
    let right_stop = i.saturating_sub(1);

    let prominence = peak_value - left_min.max(right_min);
    let eval_height = peak_value - prominence * 0.5;

    // Left intersection with the evaluation height.
    let mut i = peak;
    while i > left_stop && data[i] > eval_height {
        i -= 1;
    }
    let mut left_ip = i as f32;
    if data[i] < eval_height && i + 1 < n {
        left_ip += (eval_height - data[i]) / (data[i + 1] - data[i]);
    }

    // Right intersection.
    let mut i = peak;
    while i < right_stop && data[i] > eval_height {
        i += 1;
    }
    let mut right_ip = i as f32;
    if data[i] < eval_height && i > 0 {
        right_ip -= (eval_height - data[i]) / (data[i - 1] - data[i]);
    }

    right_ip - left_ip
}
