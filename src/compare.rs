//! Lane comparator: greedy band matching within a pixel tolerance.
//!
//! Matching is lane1-anchored: each band of lane 1, in its natural order,
//! claims the nearest unused band of lane 2 within `tolerance_pixels`. An
//! earlier lane-1 band can claim a lane-2 band that a later one would fit
//! more tightly; that asymmetry is a deliberate, reproducibility-bearing
//! property of the matcher, not a defect. The similarity score depends only
//! on the match count and the two band totals, so it is symmetric.

use crate::error::AnalysisError;
use crate::types::{Band, BandMatch, ComparisonResult};
use std::collections::BTreeMap;

/// Compare two lanes' band sets.
///
/// A lane id absent from `bands_by_lane` surfaces as the recoverable
/// [`AnalysisError::LaneNotFound`]; an *empty* band set is a valid input and
/// simply yields zero matches.
pub fn compare_lanes(
    bands_by_lane: &BTreeMap<u32, Vec<Band>>,
    lane1_id: u32,
    lane2_id: u32,
    tolerance_pixels: usize,
) -> Result<ComparisonResult, AnalysisError> {
    let bands1 = bands_by_lane
        .get(&lane1_id)
        .ok_or(AnalysisError::LaneNotFound { lane_id: lane1_id })?;
    let bands2 = bands_by_lane
        .get(&lane2_id)
        .ok_or(AnalysisError::LaneNotFound { lane_id: lane2_id })?;

    let mut matches = Vec::new();
    let mut unique_lane1 = Vec::new();
    let mut used2 = vec![false; bands2.len()];

    for band1 in bands1 {
        let mut best: Option<(usize, usize)> = None; // (index, distance)
        for (i, band2) in bands2.iter().enumerate() {
            if used2[i] {
                continue;
            }
            let distance = band1.position.abs_diff(band2.position);
            if distance <= tolerance_pixels && best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        match best {
            Some((i, distance)) => {
                used2[i] = true;
                matches.push(BandMatch {
                    band1: band1.clone(),
                    band2: bands2[i].clone(),
                    distance,
                });
            }
            None => unique_lane1.push(band1.clone()),
        }
    }

    let unique_lane2: Vec<Band> = bands2
        .iter()
        .zip(&used2)
        .filter_map(|(band, &used)| (!used).then(|| band.clone()))
        .collect();

    let total = bands1.len() + bands2.len();
    let similarity_score = if total > 0 {
        let raw = 2.0 * matches.len() as f64 / total as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    } else {
        0.0
    };

    Ok(ComparisonResult {
        lane1_id,
        lane2_id,
        similarity_score,
        matched_bands: matches.len(),
        total_bands_lane1: bands1.len(),
        total_bands_lane2: bands2.len(),
        matches,
        unique_lane1,
        unique_lane2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(lane_id: u32, id: u32, position: usize) -> Band {
        Band {
            id,
            position,
            intensity: 40.0,
            width: 5,
            top: position.saturating_sub(2),
            bottom: position + 2,
            lane_id,
        }
    }

    fn map_of(rows1: &[usize], rows2: &[usize]) -> BTreeMap<u32, Vec<Band>> {
        let mut map = BTreeMap::new();
        map.insert(
            1,
            rows1
                .iter()
                .enumerate()
                .map(|(i, &r)| band(1, i as u32, r))
                .collect(),
        );
        map.insert(
            2,
            rows2
                .iter()
                .enumerate()
                .map(|(i, &r)| band(2, i as u32, r))
                .collect(),
        );
        map
    }

    #[test]
    fn partial_overlap_matches_within_tolerance() {
        let map = map_of(&[100, 300, 500], &[105, 600]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();

        assert_eq!(result.matched_bands, 1);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].band1.position, 100);
        assert_eq!(result.matches[0].band2.position, 105);
        assert_eq!(result.matches[0].distance, 5);

        let unique1: Vec<usize> = result.unique_lane1.iter().map(|b| b.position).collect();
        let unique2: Vec<usize> = result.unique_lane2.iter().map(|b| b.position).collect();
        assert_eq!(unique1, vec![300, 500]);
        assert_eq!(unique2, vec![600]);

        assert_eq!(result.total_bands_lane1, 3);
        assert_eq!(result.total_bands_lane2, 2);
        assert!((result.similarity_score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn partition_invariant_holds() {
        let map = map_of(&[100, 150, 320, 480], &[95, 330, 700]);
        let result = compare_lanes(&map, 1, 2, 15).unwrap();
        assert_eq!(
            result.matches.len() + result.unique_lane1.len(),
            result.total_bands_lane1
        );
        assert_eq!(
            result.matches.len() + result.unique_lane2.len(),
            result.total_bands_lane2
        );
    }

    #[test]
    fn identical_lanes_score_100() {
        let map = map_of(&[80, 200, 330, 410], &[80, 200, 330, 410]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();
        assert_eq!(result.matched_bands, 4);
        assert!((result.similarity_score - 100.0).abs() < 1e-9);
        assert!(result.unique_lane1.is_empty());
        assert!(result.unique_lane2.is_empty());
    }

    #[test]
    fn both_lanes_empty_scores_defined_zero() {
        let map = map_of(&[], &[]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();
        assert_eq!(result.matched_bands, 0);
        assert_eq!(result.similarity_score, 0.0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn empty_versus_populated_lane_scores_zero() {
        let map = map_of(&[], &[120, 240]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();
        assert_eq!(result.matched_bands, 0);
        assert_eq!(result.similarity_score, 0.0);
        assert_eq!(result.unique_lane2.len(), 2);
    }

    #[test]
    fn missing_lane_id_is_recoverable() {
        let map = map_of(&[100], &[100]);
        let err = compare_lanes(&map, 1, 7, 10).unwrap_err();
        assert!(matches!(err, AnalysisError::LaneNotFound { lane_id: 7 }));
    }

    #[test]
    fn earlier_band_can_steal_the_nearest_partner() {
        // Greedy, lane1-anchored: band 100 claims 103 (distance 3) even
        // though band 103 would fit it exactly.
        let map = map_of(&[100, 103], &[103]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();
        assert_eq!(result.matched_bands, 1);
        assert_eq!(result.matches[0].band1.position, 100);
        assert_eq!(result.matches[0].band2.position, 103);
        assert_eq!(result.unique_lane1[0].position, 103);
    }

    #[test]
    fn score_is_symmetric_even_when_partitions_are_not() {
        let map = map_of(&[100, 104], &[102]);
        let forward = compare_lanes(&map, 1, 2, 10).unwrap();
        let backward = compare_lanes(&map, 2, 1, 10).unwrap();
        assert_eq!(forward.similarity_score, backward.similarity_score);
        assert_eq!(forward.matched_bands, backward.matched_bands);
        // The unique partitions swap roles between the two directions.
        assert_eq!(forward.unique_lane1.len(), backward.unique_lane2.len());
        assert_eq!(forward.unique_lane2.len(), backward.unique_lane1.len());
    }

    #[test]
    fn ties_break_toward_the_earlier_lane2_band() {
        let map = map_of(&[100], &[95, 105]);
        let result = compare_lanes(&map, 1, 2, 10).unwrap();
        assert_eq!(result.matches[0].band2.position, 95);
        assert_eq!(result.unique_lane2[0].position, 105);
    }
}
