//! Lane segmenter: column lane boundaries from the vertical profile.
//!
//! The gaps between lanes are dark background, so after inverting the
//! column-mean profile (`max − value`) they show up as peaks. Peaks must
//! clear the profile mean and sit at least `width / 20` columns apart, which
//! keeps noise from over-segmenting the image. When no usable gaps exist the
//! width is split into equal bins instead, so segmentation never fails
//! outright on a featureless image.

use crate::grid::IntensityGrid;
use crate::params::LaneParams;
use crate::signal::{PeakCriteria, SignalOps};
use crate::types::Lane;
use log::debug;

/// Split the grid into left-to-right lanes covering `[0, width)` exactly.
///
/// `params.manual_lanes` bypasses detection entirely; the caller's lanes are
/// returned verbatim as ground truth.
pub fn segment_lanes<S: SignalOps>(
    grid: &IntensityGrid,
    ops: &S,
    params: &LaneParams,
) -> Vec<Lane> {
    if let Some(manual) = &params.manual_lanes {
        debug!("segment_lanes: using {} manual lanes", manual.len());
        return manual.clone();
    }

    let width = grid.width();
    let height = grid.height();

    let profile = ops.smooth_1d(&grid.column_means(), params.profile_sigma);
    let max = profile.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let inverted: Vec<f32> = profile.iter().map(|&v| max - v).collect();
    let mean = inverted.iter().sum::<f32>() / inverted.len() as f32;

    let criteria = PeakCriteria {
        min_height: mean,
        min_distance: (width / params.min_separation_divisor).max(1),
        min_width: None,
    };
    let gap_peaks = ops.find_peaks(&inverted, &criteria);

    let num_lanes = params
        .num_lanes
        .unwrap_or(if gap_peaks.is_empty() {
            params.default_lane_count
        } else {
            gap_peaks.len() + 1
        })
        .max(1);

    let boundaries: Vec<usize> = if gap_peaks.is_empty() {
        // Equal division when no clear gaps were found.
        (0..=num_lanes).map(|i| i * width / num_lanes).collect()
    } else {
        let mut b = Vec::with_capacity(gap_peaks.len() + 2);
        b.push(0);
        b.extend_from_slice(&gap_peaks);
        b.push(width);
        b
    };

    debug!(
        "segment_lanes: gaps={} lanes={}",
        gap_peaks.len(),
        boundaries.len().saturating_sub(1)
    );

    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Lane {
            id: i as u32,
            x1: pair[0],
            x2: pair[1],
            y1: 0,
            y2: height,
            width: pair[1] - pair[0],
        })
        .collect()
}
