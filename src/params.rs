//! Parameter types configuring the analysis stages.
//!
//! Defaults reproduce the reference behaviour of the pipeline: a σ=2 vertical
//! profile for lane gaps, a σ=1 horizontal profile with a 75th-percentile
//! threshold for bands, and a 13-entry DNA ladder table for size estimation.

use crate::types::Lane;

/// Standard DNA ladder fragment sizes in base pairs, largest first.
pub const STANDARD_LADDER_BP: [u32; 13] = [
    10000, 8000, 6000, 5000, 4000, 3000, 2500, 2000, 1500, 1000, 750, 500, 250,
];

/// Knobs for the lane segmenter.
#[derive(Clone, Debug)]
pub struct LaneParams {
    /// Expected lane count. `None` estimates it from the detected gap peaks
    /// (falling back to `default_lane_count` on a featureless image).
    pub num_lanes: Option<usize>,
    /// Caller-provided lane rectangles; returned verbatim, bypassing
    /// detection.
    pub manual_lanes: Option<Vec<Lane>>,
    /// Gaussian sigma applied to the vertical profile.
    pub profile_sigma: f32,
    /// Minimum gap-peak separation as a fraction of width (`width / divisor`).
    pub min_separation_divisor: usize,
    /// Lane count assumed when no gaps are found and none was requested.
    pub default_lane_count: usize,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self {
            num_lanes: None,
            manual_lanes: None,
            profile_sigma: 2.0,
            min_separation_divisor: 20,
            default_lane_count: 6,
        }
    }
}

/// Knobs for the per-lane band detector.
#[derive(Clone, Debug)]
pub struct BandParams {
    /// Gaussian sigma applied to the horizontal profile.
    pub profile_sigma: f32,
    /// Percentile of the inverted profile used as the detection threshold.
    pub threshold_percentile: f32,
    /// Minimum distance between band peaks, in rows.
    pub min_distance: usize,
    /// Minimum band width at half prominence, in rows.
    pub min_width: f32,
    /// Fraction of the threshold used when walking a band's edges outward.
    pub edge_fraction: f32,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            profile_sigma: 1.0,
            threshold_percentile: 75.0,
            min_distance: 10,
            min_width: 3.0,
            edge_fraction: 0.5,
        }
    }
}

/// Knobs for the band measurer's ladder calibration.
#[derive(Clone, Debug)]
pub struct MeasureParams {
    /// Reference ladder sizes, monotonically decreasing. The subset actually
    /// used is clamped to `min(ladder_band_count, table_len)`.
    pub ladder_sizes_bp: Vec<u32>,
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            ladder_sizes_bp: STANDARD_LADDER_BP.to_vec(),
        }
    }
}

/// Analysis-wide parameters threaded through a session.
#[derive(Clone, Debug, Default)]
pub struct AnalyzerParams {
    pub lane: LaneParams,
    pub band: BandParams,
    pub measure: MeasureParams,
}
