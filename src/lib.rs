#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod error;
pub mod grid;
pub mod image;
pub mod params;
pub mod report;
pub mod session;
pub mod types;

// Stage modules – public for callers that want to drive the pipeline
// piecewise or substitute their own numeric backend.
pub mod bands;
pub mod compare;
pub mod lanes;
pub mod measure;
pub mod signal;

// --- High-level re-exports -------------------------------------------------

// Main entry points: session + results.
pub use crate::error::AnalysisError;
pub use crate::grid::IntensityGrid;
pub use crate::params::{AnalyzerParams, BandParams, LaneParams, MeasureParams};
pub use crate::report::AnalysisReport;
pub use crate::session::AnalysisSession;
pub use crate::types::{Band, BandMatch, ComparisonResult, Lane, Measurement};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use gel_analyzer::prelude::*;
///
/// # fn main() -> Result<(), AnalysisError> {
/// let (w, h) = (200usize, 150usize);
/// let gray = vec![128u8; w * h];
/// let grid = IntensityGrid::from_gray(ImageU8 { w, h, stride: w, data: &gray })?;
///
/// let session = AnalysisSession::analyze(grid, &AnalyzerParams::default());
/// println!("lanes={} bands={}", session.lanes().len(), session.total_bands());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{AnalysisError, AnalysisSession, AnalyzerParams, IntensityGrid};
}
