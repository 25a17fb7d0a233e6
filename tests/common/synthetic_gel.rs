/// Generates synthetic gel electrophoresis images: bright sample lanes on a
/// dark background, separated by dark gap stripes, with dark horizontal
/// bands drawn at the requested rows of each lane.
const LANE_BACKGROUND: u8 = 200;
const GAP_VALUE: u8 = 30;
const BAND_VALUE: u8 = 30;
const GAP_HALF_WIDTH: usize = 3;
const BAND_HALF_HEIGHT: usize = 2;

/// A gel with `rows_per_lane.len()` lanes and per-lane band rows.
pub fn gel_image_u8(width: usize, height: usize, rows_per_lane: &[Vec<usize>]) -> Vec<u8> {
    let num_lanes = rows_per_lane.len();
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(num_lanes > 0, "at least one lane is required");

    let mut img = vec![LANE_BACKGROUND; width * height];

    // Dark gap stripes at the interior lane boundaries, full height.
    let boundaries: Vec<usize> = (1..num_lanes).map(|i| i * width / num_lanes).collect();
    for &b in &boundaries {
        for y in 0..height {
            for x in b.saturating_sub(GAP_HALF_WIDTH)..=(b + GAP_HALF_WIDTH).min(width - 1) {
                img[y * width + x] = GAP_VALUE;
            }
        }
    }

    let in_gap = |x: usize| {
        boundaries
            .iter()
            .any(|&b| x + GAP_HALF_WIDTH >= b && x <= b + GAP_HALF_WIDTH)
    };

    // Dark bands inside each lane's column span, skipping the gap stripes.
    for (lane, rows) in rows_per_lane.iter().enumerate() {
        let x1 = lane * width / num_lanes;
        let x2 = (lane + 1) * width / num_lanes;
        for &row in rows {
            assert!(row < height, "band row {row} outside image height");
            for y in row.saturating_sub(BAND_HALF_HEIGHT)..=(row + BAND_HALF_HEIGHT).min(height - 1)
            {
                for x in x1..x2 {
                    if !in_gap(x) {
                        img[y * width + x] = BAND_VALUE;
                    }
                }
            }
        }
    }
    img
}

/// A gel whose lanes all carry bands at the same rows.
pub fn uniform_gel_image_u8(
    width: usize,
    height: usize,
    num_lanes: usize,
    band_rows: &[usize],
) -> Vec<u8> {
    let rows: Vec<Vec<usize>> = (0..num_lanes).map(|_| band_rows.to_vec()).collect();
    gel_image_u8(width, height, &rows)
}
