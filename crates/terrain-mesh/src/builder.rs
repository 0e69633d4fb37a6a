//! Fluent builder for terrain solids.
//!
//! The builder runs the meshing stages in their required order and reports
//! each one to an optional [`BuildObserver`].
//!
//! # Example
//!
//! ```
//! use terrain_mesh::{Heightfield, TerrainBuilder};
//!
//! let hf = Heightfield::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
//!
//! let solid = TerrainBuilder::new(&hf)
//!     .xscale(2.0)
//!     .yscale(2.0)
//!     .zscale(0.5)
//!     .box_height(1.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(solid.mesh().vertex_count(), 8);
//! assert_eq!(solid.mesh().face_count(), 12);
//! assert_eq!(solid.floor_z(), -1.0);
//! ```

use std::time::Instant;

use tracing::{info, warn};

use crate::error::{TerrainError, TerrainResult};
use crate::heightfield::Heightfield;
use crate::observer::{BuildEvent, BuildObserver, BuildStage, EventLevel};
use crate::params::TerrainParams;
use crate::solid::{
    BaseSurface, TerrainLayout, TerrainMesh, TopSurface, VertexGrid, WallRibbon, WallSide,
};
use crate::tracing_ext::{OperationTimer, log_mesh_stats};

/// Fluent builder turning a [`Heightfield`] into a [`TerrainMesh`].
pub struct TerrainBuilder<'a> {
    heightfield: &'a Heightfield,
    params: TerrainParams,
    observer: Option<&'a mut dyn BuildObserver>,
}

impl<'a> TerrainBuilder<'a> {
    /// Start a build with default parameters.
    pub fn new(heightfield: &'a Heightfield) -> Self {
        Self {
            heightfield,
            params: TerrainParams::default(),
            observer: None,
        }
    }

    /// Replace all parameters at once.
    pub fn params(mut self, params: TerrainParams) -> Self {
        self.params = params;
        self
    }

    pub fn xscale(mut self, xscale: f64) -> Self {
        self.params.xscale = xscale;
        self
    }

    pub fn yscale(mut self, yscale: f64) -> Self {
        self.params.yscale = yscale;
        self
    }

    pub fn zscale(mut self, zscale: f64) -> Self {
        self.params.zscale = zscale;
        self
    }

    /// Depth of the base below the lowest terrain vertex.
    pub fn box_height(mut self, box_height: f64) -> Self {
        self.params.box_height = box_height;
        self
    }

    /// Fail on NaN or infinite samples instead of passing them through.
    pub fn reject_non_finite(mut self, reject: bool) -> Self {
        self.params.reject_non_finite = reject;
        self
    }

    /// Upper bound on the solid's vertex count.
    pub fn max_vertices(mut self, max_vertices: usize) -> Self {
        self.params.max_vertices = max_vertices;
        self
    }

    /// Receive an event after each stage.
    pub fn with_observer(mut self, observer: &'a mut dyn BuildObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Parameters the build will use.
    pub fn current_params(&self) -> &TerrainParams {
        &self.params
    }

    /// Run every stage and assemble the solid.
    pub fn build(mut self) -> TerrainResult<TerrainMesh> {
        let hf = self.heightfield;
        let params = self.params;
        let _timer = OperationTimer::with_shape("build_terrain_mesh", hf.rows(), hf.cols());

        let started = Instant::now();
        let layout = TerrainLayout::new(hf.rows(), hf.cols())?;
        params.validate()?;

        if layout.total_vertex_count() > params.max_vertices {
            return Err(TerrainError::MeshTooLarge {
                vertices: layout.total_vertex_count(),
                limit: params.max_vertices,
            });
        }

        if let Some((row, col, value)) = hf.first_non_finite() {
            if params.reject_non_finite {
                return Err(TerrainError::invalid_sample(row, col, value));
            }
            warn!(
                row,
                col,
                value,
                "Non-finite elevation sample, solid will be degenerate"
            );
        }

        self.emit(
            BuildStage::Validate,
            EventLevel::Verbose,
            format!("{}x{} raster accepted", layout.rows(), layout.cols()),
            (0, 0),
            started,
        );

        let started = Instant::now();
        let grid = VertexGrid::build(hf, layout, &params);
        self.emit(
            BuildStage::VertexGrid,
            EventLevel::Verbose,
            "terrain vertices placed".into(),
            (grid.vertices().len(), 0),
            started,
        );

        let started = Instant::now();
        let top = TopSurface::triangulate(&layout);
        self.emit(
            BuildStage::TopSurface,
            EventLevel::Verbose,
            "top surface triangulated".into(),
            (0, top.faces().len()),
            started,
        );

        let started = Instant::now();
        let base = BaseSurface::build(&grid, &top, params.box_height);
        self.emit(
            BuildStage::Base,
            EventLevel::Verbose,
            format!("base at z = {}", base.floor_z()),
            (base.vertices().len(), base.faces().len()),
            started,
        );

        let walls = WallSide::ALL.map(|side| {
            let started = Instant::now();
            let wall = WallRibbon::build(side, &layout, &base);
            self.emit(
                BuildStage::Wall(side),
                EventLevel::Verbose,
                format!("{} stitched", side),
                (0, wall.faces().len()),
                started,
            );
            wall
        });

        let started = Instant::now();
        let solid = TerrainMesh::assemble(grid, top, base, walls);
        let mesh = solid.mesh();
        self.emit(
            BuildStage::Assembly,
            EventLevel::Info,
            format!(
                "solid with {} vertices and {} triangles",
                mesh.vertex_count(),
                mesh.face_count()
            ),
            (mesh.vertex_count(), mesh.face_count()),
            started,
        );

        info!(
            rows = layout.rows(),
            cols = layout.cols(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            floor_z = solid.floor_z(),
            "Built terrain solid"
        );
        log_mesh_stats(mesh, "terrain solid");

        Ok(solid)
    }

    fn emit(
        &mut self,
        stage: BuildStage,
        level: EventLevel,
        message: String,
        (vertices, faces): (usize, usize),
        started: Instant,
    ) {
        let Some(observer) = self.observer.as_deref_mut() else {
            return;
        };
        if level > observer.verbosity() {
            return;
        }
        observer.on_event(&BuildEvent {
            stage,
            level,
            message,
            vertices,
            faces,
            elapsed: started.elapsed(),
        });
    }
}

/// Build a terrain solid with the given parameters.
///
/// Equivalent to `TerrainBuilder::new(heightfield).params(*params).build()`.
pub fn build_terrain_mesh(
    heightfield: &Heightfield,
    params: &TerrainParams,
) -> TerrainResult<TerrainMesh> {
    TerrainBuilder::new(heightfield).params(*params).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::EventLog;

    fn ramp(rows: usize, cols: usize) -> Heightfield {
        Heightfield::from_fn(rows, cols, |r, c| (r * cols + c) as f64)
    }

    #[test]
    fn test_builder_matches_function() {
        let hf = ramp(3, 4);
        let params = TerrainParams {
            xscale: 2.0,
            yscale: 0.5,
            zscale: 3.0,
            box_height: 1.5,
            ..Default::default()
        };
        let a = build_terrain_mesh(&hf, &params).unwrap();
        let b = TerrainBuilder::new(&hf)
            .xscale(2.0)
            .yscale(0.5)
            .zscale(3.0)
            .box_height(1.5)
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shape_checked_before_parameters() {
        let hf = ramp(1, 5);
        let err = TerrainBuilder::new(&hf).xscale(-1.0).build().unwrap_err();
        assert!(matches!(err, TerrainError::InvalidShape { rows: 1, cols: 5 }));
    }

    #[test]
    fn test_invalid_parameter() {
        let hf = ramp(2, 2);
        let err = TerrainBuilder::new(&hf).box_height(-0.1).build().unwrap_err();
        assert!(matches!(
            err,
            TerrainError::InvalidParameter {
                name: "box_height",
                ..
            }
        ));
    }

    #[test]
    fn test_vertex_limit() {
        let hf = ramp(4, 4);
        let err = TerrainBuilder::new(&hf).max_vertices(31).build().unwrap_err();
        assert!(matches!(
            err,
            TerrainError::MeshTooLarge {
                vertices: 32,
                limit: 31
            }
        ));
        assert!(TerrainBuilder::new(&hf).max_vertices(32).build().is_ok());
    }

    #[test]
    fn test_non_finite_policy() {
        let mut samples = vec![0.0; 6];
        samples[4] = f64::NAN;
        let hf = Heightfield::from_vec(2, 3, samples).unwrap();

        let solid = TerrainBuilder::new(&hf).build().unwrap();
        assert!(solid.mesh().vertices[4].position.z.is_nan());

        let err = TerrainBuilder::new(&hf)
            .reject_non_finite(true)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            TerrainError::InvalidSample { row: 1, col: 1, .. }
        ));
    }

    #[test]
    fn test_observer_levels() {
        let hf = ramp(3, 3);

        let mut verbose = EventLog::new(EventLevel::Verbose);
        TerrainBuilder::new(&hf)
            .with_observer(&mut verbose)
            .build()
            .unwrap();
        let stages: Vec<BuildStage> = verbose.events().iter().map(|e| e.stage).collect();
        assert_eq!(
            stages,
            vec![
                BuildStage::Validate,
                BuildStage::VertexGrid,
                BuildStage::TopSurface,
                BuildStage::Base,
                BuildStage::Wall(WallSide::North),
                BuildStage::Wall(WallSide::South),
                BuildStage::Wall(WallSide::West),
                BuildStage::Wall(WallSide::East),
                BuildStage::Assembly,
            ]
        );

        let mut quiet = EventLog::new(EventLevel::Info);
        TerrainBuilder::new(&hf)
            .with_observer(&mut quiet)
            .build()
            .unwrap();
        assert_eq!(quiet.events().len(), 1);
        assert_eq!(quiet.events()[0].faces, 32);
    }
}
