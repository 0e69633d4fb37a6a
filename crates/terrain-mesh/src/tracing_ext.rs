//! Tracing extensions for terrain meshing.
//!
//! Enable output by installing a subscriber in your application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=terrain_mesh=debug for per-stage counts
//! // RUST_LOG=terrain_mesh::timing=info for stage timings
//! ```
//!
//! # Log Levels
//!
//! - **WARN**: non-finite elevations, solids failing validation
//! - **INFO**: build summaries, files written, timings
//! - **DEBUG**: per-stage counts, floor elevation, bounds
//! - **TRACE**: detailed mesh state dumps

use std::time::{Duration, Instant};
use tracing::{Span, debug, info, trace};

use crate::Mesh;

/// A performance timer that logs duration on drop.
///
/// ```rust,ignore
/// fn expensive_operation() {
///     let _timer = OperationTimer::new("expensive_operation");
///     // ... do work ...
/// } // logs elapsed time here
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("terrain_operation", operation = name);
        debug!(target: "terrain_mesh::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Create a timer carrying the raster shape.
    pub fn with_shape(name: &'static str, rows: usize, cols: usize) -> Self {
        let span = tracing::info_span!("terrain_operation", operation = name, rows, cols);
        debug!(
            target: "terrain_mesh::timing",
            operation = name,
            rows,
            cols,
            "Starting operation"
        );
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            target: "terrain_mesh::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", self.elapsed_ms()),
            "Operation completed"
        );
    }
}

/// Log mesh statistics at debug level.
pub fn log_mesh_stats(mesh: &Mesh, context: &str) {
    let Some((min, max)) = mesh.bounds() else {
        debug!(target: "terrain_mesh::mesh_state", context, "Mesh state: empty");
        return;
    };
    let dims = max - min;

    debug!(
        target: "terrain_mesh::mesh_state",
        context,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        dimensions = format!("{:.2} x {:.2} x {:.2}", dims.x, dims.y, dims.z),
        "Mesh state"
    );
    trace!(
        target: "terrain_mesh::mesh_state",
        context,
        min = format!("({:.4}, {:.4}, {:.4})", min.x, min.y, min.z),
        max = format!("({:.4}, {:.4}, {:.4})", max.x, max.y, max.z),
        "Mesh bounds"
    );
}
