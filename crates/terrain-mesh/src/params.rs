//! Build parameters for terrain meshing.

use serde::{Deserialize, Serialize};

use crate::error::{TerrainError, TerrainResult};

/// Default upper bound on the number of vertices in a built solid.
pub const DEFAULT_MAX_VERTICES: usize = 50_000_000;

/// Parameters controlling how raster samples become mesh coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Distance between adjacent raster columns along X.
    ///
    /// Default: `1.0`
    pub xscale: f64,

    /// Distance between adjacent raster rows along Y.
    ///
    /// Row 0 is placed at the largest Y; each following row steps `yscale`
    /// toward -Y.
    ///
    /// Default: `1.0`
    pub yscale: f64,

    /// Multiplier applied to every elevation sample.
    ///
    /// Zero flattens the terrain; negative values mirror it.
    ///
    /// Default: `1.0`
    pub zscale: f64,

    /// Extra depth of the base below the lowest terrain vertex.
    ///
    /// With `0.0` the floor sits exactly at the lowest scaled elevation, so
    /// the lowest terrain cells touch the base.
    ///
    /// Default: `0.0`
    pub box_height: f64,

    /// Fail with `InvalidSample` on the first NaN or infinite elevation.
    ///
    /// When disabled, non-finite samples propagate into vertex coordinates
    /// and the resulting solid is degenerate.
    ///
    /// Default: `false`
    pub reject_non_finite: bool,

    /// Largest solid (in vertices) the builder will allocate.
    ///
    /// Default: [`DEFAULT_MAX_VERTICES`]
    pub max_vertices: usize,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            xscale: 1.0,
            yscale: 1.0,
            zscale: 1.0,
            box_height: 0.0,
            reject_non_finite: false,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

impl TerrainParams {
    /// Parameters with uniform horizontal scale and the given vertical scale.
    pub fn with_scales(horizontal: f64, vertical: f64) -> Self {
        Self {
            xscale: horizontal,
            yscale: horizontal,
            zscale: vertical,
            ..Self::default()
        }
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> TerrainResult<()> {
        check_positive("xscale", self.xscale)?;
        check_positive("yscale", self.yscale)?;
        if !self.zscale.is_finite() {
            return Err(TerrainError::invalid_parameter(
                "zscale",
                self.zscale,
                "must be finite",
            ));
        }
        if !self.box_height.is_finite() || self.box_height < 0.0 {
            return Err(TerrainError::invalid_parameter(
                "box_height",
                self.box_height,
                "must be finite and not negative",
            ));
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> TerrainResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TerrainError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}
