mod common;

use common::synthetic_gel::{gel_image_u8, uniform_gel_image_u8};
use gel_analyzer::image::ImageU8;
use gel_analyzer::{AnalysisSession, AnalyzerParams, IntensityGrid, MeasureParams};

fn grid_from(data: &[u8], w: usize, h: usize) -> IntensityGrid {
    IntensityGrid::from_gray(ImageU8 {
        w,
        h,
        stride: w,
        data,
    })
    .expect("valid grid")
}

#[test]
fn six_lane_gel_with_identical_lanes_compares_at_100_percent() {
    let (w, h) = (800usize, 600usize);
    let band_rows = [150usize, 250, 350, 450];
    let buffer = uniform_gel_image_u8(w, h, 6, &band_rows);
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &AnalyzerParams::default());

    assert_eq!(session.lanes().len(), 6);
    for lane_id in 0..6u32 {
        assert_eq!(
            session.bands_in_lane(lane_id).unwrap().len(),
            band_rows.len(),
            "lane {lane_id}"
        );
    }

    let result = session.compare(0, 1, 10).expect("both lanes present");
    assert_eq!(result.matched_bands, band_rows.len());
    assert_eq!(result.matched_bands, result.total_bands_lane1);
    assert_eq!(result.matched_bands, result.total_bands_lane2);
    assert!(
        (result.similarity_score - 100.0).abs() < 1e-9,
        "score={}",
        result.similarity_score
    );
}

#[test]
fn lanes_are_contiguous_and_exhaustive() {
    let (w, h) = (800usize, 600usize);
    let buffer = uniform_gel_image_u8(w, h, 6, &[200, 400]);
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &AnalyzerParams::default());

    let lanes = session.lanes();
    assert_eq!(lanes[0].x1, 0);
    assert_eq!(lanes.last().unwrap().x2, w);
    for pair in lanes.windows(2) {
        assert_eq!(pair[0].x2, pair[1].x1);
    }
    for lane in lanes {
        assert_eq!(lane.width, lane.x2 - lane.x1);
        assert_eq!(lane.y1, 0);
        assert_eq!(lane.y2, h);
    }
}

#[test]
fn bands_stay_inside_their_lane_and_ascend() {
    let (w, h) = (600usize, 500usize);
    let buffer = uniform_gel_image_u8(w, h, 4, &[100, 220, 390]);
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &AnalyzerParams::default());

    for lane in session.lanes() {
        let bands = session.bands_in_lane(lane.id).unwrap();
        assert!(!bands.is_empty(), "lane {}", lane.id);
        for pair in bands.windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
        for band in bands {
            assert!(lane.y1 <= band.top);
            assert!(band.top <= band.position);
            assert!(band.position <= band.bottom);
            assert!(band.bottom <= lane.y2);
            assert_eq!(band.lane_id, lane.id);
        }
    }
}

#[test]
fn analysis_is_idempotent() {
    let (w, h) = (640usize, 480usize);
    let buffer = uniform_gel_image_u8(w, h, 5, &[120, 300]);
    let params = AnalyzerParams::default();
    let first = AnalysisSession::analyze(grid_from(&buffer, w, h), &params);
    let second = AnalysisSession::analyze(grid_from(&buffer, w, h), &params);

    assert_eq!(first.lanes(), second.lanes());
    assert_eq!(first.bands_by_lane(), second.bands_by_lane());
}

#[test]
fn blank_grid_yields_empty_lanes_and_defined_zero_similarity() {
    let (w, h) = (800usize, 600usize);
    let buffer = vec![0u8; w * h];
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &AnalyzerParams::default());

    assert_eq!(session.lanes().len(), 6);
    assert_eq!(session.total_bands(), 0);

    let result = session.compare(0, 1, 10).expect("lanes exist");
    assert_eq!(result.matched_bands, 0);
    assert_eq!(result.similarity_score, 0.0);
    assert!(result.matches.is_empty());
    assert!(result.unique_lane1.is_empty());
    assert!(result.unique_lane2.is_empty());
}

#[test]
fn partial_band_overlap_scores_40_percent() {
    let (w, h) = (400usize, 700usize);
    let rows = vec![vec![100usize, 300, 500], vec![105usize, 600]];
    let buffer = gel_image_u8(w, h, &rows);
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &AnalyzerParams::default());

    assert_eq!(session.bands_in_lane(0).unwrap().len(), 3);
    assert_eq!(session.bands_in_lane(1).unwrap().len(), 2);

    let result = session.compare(0, 1, 10).expect("both lanes present");
    assert_eq!(result.matched_bands, 1);
    assert!(result.matches[0].distance <= 10);
    assert_eq!(result.unique_lane1.len(), 2);
    assert_eq!(result.unique_lane2.len(), 1);
    assert!(
        (result.similarity_score - 40.0).abs() < 1e-9,
        "score={}",
        result.similarity_score
    );
}

#[test]
fn ladder_lane_calibrates_fragment_sizes() {
    let (w, h) = (300usize, 700usize);
    let rows = vec![vec![50usize, 550], vec![300usize]];
    let buffer = gel_image_u8(w, h, &rows);
    let params = AnalyzerParams {
        measure: MeasureParams {
            ladder_sizes_bp: vec![10000, 250],
        },
        ..Default::default()
    };
    let session = AnalysisSession::analyze(grid_from(&buffer, w, h), &params);

    assert_eq!(session.bands_in_lane(0).unwrap().len(), 2);
    assert_eq!(session.bands_in_lane(1).unwrap().len(), 1);

    let measurements = session.measure(Some(0));
    let size = measurements[&1][0].estimated_size_bp.expect("ladder usable");
    // Midpoint of the ladder span maps to the middle of the size table.
    assert!(
        (size as i64 - 5125).abs() <= 120,
        "estimated size {size} not near 5125"
    );

    let without_ladder = session.measure(None);
    assert_eq!(without_ladder[&1][0].estimated_size_bp, None);
}
