use serde::Serialize;

/// One vertical sample lane: a `[x1, x2)` column range spanning the full
/// image height. Lanes are emitted left-to-right, non-overlapping, and cover
/// `[0, image_width)` exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Lane {
    /// 0-based index in left-to-right order.
    pub id: u32,
    /// First column (inclusive).
    pub x1: usize,
    /// Last column (exclusive).
    pub x2: usize,
    /// First row (inclusive).
    pub y1: usize,
    /// Last row (exclusive).
    pub y2: usize,
    /// Column span, `x2 - x1`.
    pub width: usize,
}

/// One horizontal band inside a lane, in global row coordinates.
///
/// Invariant: `lane.y1 <= top <= position <= bottom <= lane.y2`. Bands within
/// a lane are ordered by increasing `position`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Band {
    /// 0-based index in discovery order along the lane's row axis.
    pub id: u32,
    /// Peak row of the inverted intensity profile (global coordinate).
    pub position: usize,
    /// Peak value of the inverted smoothed profile (non-negative).
    pub intensity: f32,
    /// Row extent, `bottom - top`.
    pub width: usize,
    /// Upper edge of the band (global row).
    pub top: usize,
    /// Lower edge of the band (global row).
    pub bottom: usize,
    /// Id of the lane this band belongs to (lookup key, not a reference).
    pub lane_id: u32,
}

/// Per-band measurement; `estimated_size_bp` is present only when a usable
/// reference ladder was supplied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub band_id: u32,
    pub position_pixels: usize,
    pub intensity: f32,
    pub width_pixels: usize,
    /// Estimated fragment size in base pairs, floored at 100.
    pub estimated_size_bp: Option<u32>,
}

/// A matched pair of bands from the two compared lanes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BandMatch {
    pub band1: Band,
    pub band2: Band,
    /// Absolute row distance between the two peak positions.
    pub distance: usize,
}

/// Outcome of comparing two lanes' band sets.
///
/// Every band of lane 1 appears in exactly one of `matches` or
/// `unique_lane1`; likewise for lane 2. `matched_bands == matches.len()`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub lane1_id: u32,
    pub lane2_id: u32,
    /// `2·|matches| / (|bands1| + |bands2|) · 100`, rounded to 2 decimals;
    /// defined as 0 when both lanes are empty.
    pub similarity_score: f64,
    pub matches: Vec<BandMatch>,
    pub unique_lane1: Vec<Band>,
    pub unique_lane2: Vec<Band>,
    pub total_bands_lane1: usize,
    pub total_bands_lane2: usize,
    pub matched_bands: usize,
}
