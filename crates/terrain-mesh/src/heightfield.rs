//! Heightfield rasters.
//!
//! A [`Heightfield`] is the decoded, single-channel elevation grid the mesher
//! consumes. Decoding image or GeoTIFF files is left to the caller; this type
//! only owns the samples and their shape.

use tracing::debug;

use crate::error::{TerrainError, TerrainResult};

/// Row-major grid of elevation samples.
///
/// Row 0 is the northern edge of the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    rows: usize,
    cols: usize,
    samples: Vec<f64>,
}

impl Heightfield {
    /// Create a heightfield from a flat row-major buffer.
    ///
    /// The buffer length must equal `rows * cols`. Shape is not otherwise
    /// restricted here; the mesher rejects rasters smaller than 2x2.
    pub fn from_vec(rows: usize, cols: usize, samples: Vec<f64>) -> TerrainResult<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(TerrainError::ShapeMismatch {
                rows,
                cols,
                expected: usize::MAX,
                actual: samples.len(),
            })?;
        if samples.len() != expected {
            return Err(TerrainError::ShapeMismatch {
                rows,
                cols,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    /// Create a heightfield from nested rows.
    ///
    /// ```
    /// use terrain_mesh::Heightfield;
    ///
    /// let hf = Heightfield::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
    /// assert_eq!(hf.shape(), (2, 2));
    /// assert_eq!(hf.get(0, 0), Some(1.0));
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> TerrainResult<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut samples = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(TerrainError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            samples.extend_from_slice(values);
        }
        Self::from_vec(rows.len(), cols, samples)
    }

    /// Create a heightfield by evaluating `f(row, col)` for every sample.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut samples = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                samples.push(f(row, col));
            }
        }
        Self {
            rows,
            cols,
            samples,
        }
    }

    /// Number of raster rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of raster columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Flat row-major sample buffer.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample at `(row, col)`, or None when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.samples[row * self.cols + col])
        } else {
            None
        }
    }

    /// One raster row.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.samples[row * self.cols..(row + 1) * self.cols])
    }

    /// Lowest sample, ignoring NaN. None for an empty or all-NaN raster.
    pub fn min(&self) -> Option<f64> {
        self.samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Highest sample, ignoring NaN. None for an empty or all-NaN raster.
    pub fn max(&self) -> Option<f64> {
        self.samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Position of the first NaN or infinite sample as `(row, col, value)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.samples
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx / self.cols, idx % self.cols, self.samples[idx]))
    }

    /// Extract a rectangular sub-raster.
    ///
    /// `row`/`col` give the top-left corner, `rows`/`cols` the size.
    pub fn window(&self, row: usize, col: usize, rows: usize, cols: usize) -> TerrainResult<Self> {
        let fits = row
            .checked_add(rows)
            .is_some_and(|end| end <= self.rows)
            && col.checked_add(cols).is_some_and(|end| end <= self.cols);
        if !fits {
            return Err(TerrainError::WindowOutOfBounds {
                row,
                col,
                rows,
                cols,
                raster_rows: self.rows,
                raster_cols: self.cols,
            });
        }

        let mut samples = Vec::with_capacity(rows * cols);
        for r in row..row + rows {
            let start = r * self.cols + col;
            samples.extend_from_slice(&self.samples[start..start + cols]);
        }

        debug!(
            "Cropped {}x{} window at ({}, {}) from {}x{} raster",
            rows, cols, row, col, self.rows, self.cols
        );

        Ok(Self {
            rows,
            cols,
            samples,
        })
    }
}
