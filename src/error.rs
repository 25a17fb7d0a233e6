use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// The two image variants are fatal: nothing downstream can run without a
/// usable grid. `LaneNotFound` is recoverable — callers routinely probe lane
/// ids taken from user input, so a missing id is a "not comparable" outcome
/// rather than a bug. Empty lanes and empty band sets are not errors at all;
/// they flow through measurement and comparison as zero-length sequences.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source image could not be decoded.
    #[error("failed to decode image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded image is below the 100×100 analysis floor.
    #[error("image too small for analysis: {width}x{height} (minimum 100x100)")]
    ImageTooSmall { width: usize, height: usize },

    /// A lane id requested for comparison has no detected band set.
    #[error("lane {lane_id} has no detected band set")]
    LaneNotFound { lane_id: u32 },
}
