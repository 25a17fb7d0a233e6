//! Report assembler: plain serializable aggregates for the outer layers.
//!
//! Everything here is data — integers, reals, nested sequences and maps —
//! suitable for direct JSON encoding by whatever presentation layer consumes
//! the analysis (web handler, PDF renderer, archive).

use crate::session::AnalysisSession;
use crate::types::{Band, ComparisonResult, Lane, Measurement};
use serde::Serialize;
use std::collections::BTreeMap;

/// Basic facts about the analyzed grid.
#[derive(Clone, Debug, Serialize)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub total_lanes: usize,
    pub total_bands: usize,
}

/// Complete analysis output for one gel image.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub image: ImageInfo,
    pub lanes: Vec<Lane>,
    pub bands_by_lane: BTreeMap<u32, Vec<Band>>,
    pub measurements: BTreeMap<u32, Vec<Measurement>>,
    pub comparison: Option<ComparisonResult>,
}

impl AnalysisReport {
    /// Package a session's results, measuring against the optional ladder
    /// lane and attaching an optional comparison.
    pub fn from_session(
        session: &AnalysisSession,
        ladder_lane_id: Option<u32>,
        comparison: Option<ComparisonResult>,
    ) -> Self {
        Self {
            image: ImageInfo {
                width: session.grid().width(),
                height: session.grid().height(),
                total_lanes: session.lanes().len(),
                total_bands: session.total_bands(),
            },
            lanes: session.lanes().to_vec(),
            bands_by_lane: session.bands_by_lane().clone(),
            measurements: session.measure(ladder_lane_id),
            comparison,
        }
    }
}
