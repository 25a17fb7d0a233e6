//! Intensity grid provider: the immutable input of an analysis session.
//!
//! Purpose
//! - Wrap a decoded grayscale image into a 2-D f32 grid (samples 0–255) plus
//!   a smoothed variant used by all detection math. The smoothing suppresses
//!   pixel-level sensor noise without eroding band edges.
//!
//! Design
//! - The smoothed plane applies a separable 5-tap Gaussian blur
//!   (kernel ≈ [1,4,6,4,1]/16) with replicated borders.
//! - Grids below 100×100 samples are rejected up front
//!   ([`AnalysisError::ImageTooSmall`]); nothing downstream re-validates.
//! - Once constructed the grid is read-only and may be shared freely across
//!   per-lane detection tasks.

use crate::error::AnalysisError;
use crate::image::{io::load_grayscale_image, ImageF32, ImageU8};
use std::path::Path;

/// Minimum decoded size accepted for analysis, in samples per axis.
pub const MIN_GRID_SIDE: usize = 100;

/// A height×width grid of non-negative intensity samples (0–255) plus the
/// Gaussian-smoothed plane every detection stage reads.
#[derive(Clone, Debug)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    raw: ImageF32,
    smoothed: ImageF32,
}

impl IntensityGrid {
    /// Wrap an 8-bit grayscale view, validating the size floor.
    pub fn from_gray(gray: ImageU8<'_>) -> Result<Self, AnalysisError> {
        if gray.w < MIN_GRID_SIDE || gray.h < MIN_GRID_SIDE {
            return Err(AnalysisError::ImageTooSmall {
                width: gray.w,
                height: gray.h,
            });
        }
        let mut raw = ImageF32::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let dst = &mut raw.data[y * gray.w..(y + 1) * gray.w];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = s as f32;
            }
        }
        let mut smoothed = ImageF32::new(gray.w, gray.h);
        gaussian5x5_sep(&raw, &mut smoothed);
        Ok(Self {
            width: gray.w,
            height: gray.h,
            raw,
            smoothed,
        })
    }

    /// Decode an image file and wrap it; fails with [`AnalysisError::ImageLoad`]
    /// when the source cannot be decoded.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let gray = load_grayscale_image(path)?;
        Self::from_gray(gray.as_view())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Unsmoothed samples as loaded.
    pub fn raw(&self) -> &ImageF32 {
        &self.raw
    }

    /// Blurred plane used by lane segmentation and band detection.
    pub fn smoothed(&self) -> &ImageF32 {
        &self.smoothed
    }

    /// Mean of each column of the smoothed plane (the "vertical profile").
    pub fn column_means(&self) -> Vec<f32> {
        let mut sums = vec![0.0f32; self.width];
        for y in 0..self.height {
            for (s, &v) in sums.iter_mut().zip(self.smoothed.row(y)) {
                *s += v;
            }
        }
        let inv_h = 1.0 / self.height as f32;
        sums.iter_mut().for_each(|s| *s *= inv_h);
        sums
    }

    /// Mean across columns `[x1, x2)` for each row in `[y1, y2)` of the
    /// smoothed plane (a lane's "horizontal profile"). Empty ranges yield an
    /// empty profile.
    pub fn row_means(&self, x1: usize, x2: usize, y1: usize, y2: usize) -> Vec<f32> {
        let x1 = x1.min(self.width);
        let x2 = x2.min(self.width);
        let y1 = y1.min(self.height);
        let y2 = y2.min(self.height);
        if x1 >= x2 || y1 >= y2 {
            return Vec::new();
        }
        let inv_w = 1.0 / (x2 - x1) as f32;
        (y1..y2)
            .map(|y| self.smoothed.row(y)[x1..x2].iter().sum::<f32>() * inv_w)
            .collect()
    }
}

/// Separable 5-tap Gaussian blur with replicated borders.
fn gaussian5x5_sep(inp: &ImageF32, out: &mut ImageF32) {
    // 1D kernel [1,4,6,4,1]/16 applied separably
    let w = inp.w;
    let h = inp.h;
    let mut tmp = ImageF32::new(w, h);
    // horizontal
    for y in 0..h {
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xm2 = x.saturating_sub(2);
            let xp1 = (x + 1).min(w - 1);
            let xp2 = (x + 2).min(w - 1);
            let v = (inp.get(xm2, y)
                + 4.0 * inp.get(xm1, y)
                + 6.0 * inp.get(x, y)
                + 4.0 * inp.get(xp1, y)
                + inp.get(xp2, y))
                * (1.0 / 16.0);
            tmp.set(x, y, v);
        }
    }
    // vertical
    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let ym2 = y.saturating_sub(2);
        let yp1 = (y + 1).min(h - 1);
        let yp2 = (y + 2).min(h - 1);
        for x in 0..w {
            let v = (tmp.get(x, ym2)
                + 4.0 * tmp.get(x, ym1)
                + 6.0 * tmp.get(x, y)
                + 4.0 * tmp.get(x, yp1)
                + tmp.get(x, yp2))
                * (1.0 / 16.0);
            out.set(x, y, v);
        }
    }
}
