//! Band measurer: optional molecular-size calibration against a ladder lane.
//!
//! The model is deliberately simple: the ladder lane's observed row span is
//! mapped linearly onto a monotonically decreasing reference size table, and
//! each band's row position is interpolated inside that span. This is a
//! calibration convenience, not a physical diffusion model. Estimates are
//! floored at 100 bp; a missing ladder, or one with fewer than two bands,
//! quietly yields `None`.

use crate::params::MeasureParams;
use crate::types::{Band, Measurement};
use std::collections::BTreeMap;

/// Attach measurements (and, when a ladder is usable, size estimates) to
/// every detected band, keyed by lane id.
pub fn measure_bands(
    bands_by_lane: &BTreeMap<u32, Vec<Band>>,
    ladder_lane_id: Option<u32>,
    params: &MeasureParams,
) -> BTreeMap<u32, Vec<Measurement>> {
    let ladder = ladder_lane_id.and_then(|id| bands_by_lane.get(&id).map(Vec::as_slice));

    bands_by_lane
        .iter()
        .map(|(&lane_id, bands)| {
            let measurements = bands
                .iter()
                .map(|band| Measurement {
                    band_id: band.id,
                    position_pixels: band.position,
                    intensity: band.intensity,
                    width_pixels: band.width,
                    estimated_size_bp: ladder
                        .and_then(|l| estimate_size_bp(band.position, l, &params.ladder_sizes_bp)),
                })
                .collect();
            (lane_id, measurements)
        })
        .collect()
}

/// Linear interpolation of a row position over the ladder's observed span.
///
/// Uses as many table entries as there are ladder bands, clamped to the
/// table length. A degenerate span (all ladder bands on one row) maps to
/// relative position 0, i.e. the largest size in the subset.
pub fn estimate_size_bp(position: usize, ladder: &[Band], sizes_bp: &[u32]) -> Option<u32> {
    if ladder.len() < 2 || sizes_bp.is_empty() {
        return None;
    }
    let subset = &sizes_bp[..ladder.len().min(sizes_bp.len())];
    let max_size = *subset.iter().max()? as f64;
    let min_size = *subset.iter().min()? as f64;

    let min_pos = ladder.iter().map(|b| b.position).min()? as f64;
    let max_pos = ladder.iter().map(|b| b.position).max()? as f64;
    let span = max_pos - min_pos;

    let relative = if span > 0.0 {
        (position as f64 - min_pos) / span
    } else {
        0.0
    };
    let estimated = max_size - relative * (max_size - min_size);
    Some((estimated as i64).max(100) as u32)
}
