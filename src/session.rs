//! Analysis session: the immutable value tying the pipeline together.
//!
//! A session is produced in one step from an [`IntensityGrid`]: segmentation
//! runs, then band detection runs over the resulting lanes, and the outputs
//! are frozen. Measurement and comparison are plain `&self` queries on the
//! frozen state, so there is no way to compare lanes before detection has
//! happened or to observe a half-updated analyzer.

use crate::bands::detect_all_bands;
use crate::compare::compare_lanes;
use crate::error::AnalysisError;
use crate::grid::IntensityGrid;
use crate::lanes::segment_lanes;
use crate::measure::measure_bands;
use crate::params::AnalyzerParams;
use crate::signal::{GaussianSignal, SignalOps};
use crate::types::{Band, ComparisonResult, Lane, Measurement};
use log::debug;
use std::collections::BTreeMap;

/// One analyzed gel image: the grid plus its derived lanes and bands.
#[derive(Clone, Debug)]
pub struct AnalysisSession {
    grid: IntensityGrid,
    params: AnalyzerParams,
    lanes: Vec<Lane>,
    bands_by_lane: BTreeMap<u32, Vec<Band>>,
}

impl AnalysisSession {
    /// Run segmentation and band detection with the default numeric backend.
    pub fn analyze(grid: IntensityGrid, params: &AnalyzerParams) -> Self {
        Self::analyze_with(grid, params, &GaussianSignal)
    }

    /// Run segmentation and band detection with a caller-supplied backend.
    pub fn analyze_with<S: SignalOps + Sync>(
        grid: IntensityGrid,
        params: &AnalyzerParams,
        ops: &S,
    ) -> Self {
        debug!(
            "AnalysisSession::analyze start w={} h={}",
            grid.width(),
            grid.height()
        );
        let lanes = segment_lanes(&grid, ops, &params.lane);
        let bands_by_lane = detect_all_bands(&grid, &lanes, ops, &params.band);
        debug!(
            "AnalysisSession::analyze done lanes={} bands={}",
            lanes.len(),
            bands_by_lane.values().map(Vec::len).sum::<usize>()
        );
        Self {
            grid,
            params: params.clone(),
            lanes,
            bands_by_lane,
        }
    }

    pub fn grid(&self) -> &IntensityGrid {
        &self.grid
    }

    /// Lanes in left-to-right order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Detected bands keyed by lane id, in ascending id order.
    pub fn bands_by_lane(&self) -> &BTreeMap<u32, Vec<Band>> {
        &self.bands_by_lane
    }

    /// Bands of one lane, or `None` when the id is unknown.
    pub fn bands_in_lane(&self, lane_id: u32) -> Option<&[Band]> {
        self.bands_by_lane.get(&lane_id).map(Vec::as_slice)
    }

    /// Total number of detected bands across all lanes.
    pub fn total_bands(&self) -> usize {
        self.bands_by_lane.values().map(Vec::len).sum()
    }

    /// Per-lane measurements, with size estimates when `ladder_lane_id`
    /// names a lane holding at least two bands.
    pub fn measure(&self, ladder_lane_id: Option<u32>) -> BTreeMap<u32, Vec<Measurement>> {
        measure_bands(&self.bands_by_lane, ladder_lane_id, &self.params.measure)
    }

    /// Compare two lanes' band sets within `tolerance_pixels`.
    pub fn compare(
        &self,
        lane1_id: u32,
        lane2_id: u32,
        tolerance_pixels: usize,
    ) -> Result<ComparisonResult, AnalysisError> {
        compare_lanes(&self.bands_by_lane, lane1_id, lane2_id, tolerance_pixels)
    }
}
