// Allow unused_assignments lint for error struct fields that are used in thiserror Display macros
// but appear as "never read" to the compiler.
#![allow(unused_assignments)]

//! Error types for terrain meshing with rich diagnostics.
//!
//! Every error carries:
//! - A machine-readable code for programmatic handling
//! - Location context (raster row/column, parameter name, output path)
//! - A recovery suggestion
//! - Terminal display via miette
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `TERRAIN-XXXX`:
//! - `TERRAIN-1xxx`: Raster errors (shape, samples, windows)
//! - `TERRAIN-2xxx`: Parameter errors (scales, box height, size limits)
//! - `TERRAIN-3xxx`: Output errors (writing, unsupported formats)
//!
//! # Example
//!
//! ```
//! use terrain_mesh::{ErrorCode, TerrainError};
//!
//! let err = TerrainError::invalid_shape(1, 40);
//! assert_eq!(err.code(), ErrorCode::InvalidShape);
//! assert_eq!(err.code().as_str(), "TERRAIN-1001");
//! ```

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Raster errors (1xxx)
    /// TERRAIN-1001: Raster has fewer than 2 rows or columns
    InvalidShape = 1001,
    /// TERRAIN-1002: Sample buffer length disagrees with the declared shape
    ShapeMismatch = 1002,
    /// TERRAIN-1003: Rows of a nested raster have different lengths
    RaggedRows = 1003,
    /// TERRAIN-1004: Elevation sample is NaN or infinite
    InvalidSample = 1004,
    /// TERRAIN-1005: Requested window lies outside the raster
    WindowOutOfBounds = 1005,

    // Parameter errors (2xxx)
    /// TERRAIN-2001: Scale or box height out of range
    InvalidParameter = 2001,
    /// TERRAIN-2002: Mesh would exceed the configured vertex limit
    MeshTooLarge = 2002,

    // Output errors (3xxx)
    /// TERRAIN-3001: Failed to write mesh file
    IoWrite = 3001,
    /// TERRAIN-3002: Output extension is not a supported mesh format
    UnsupportedFormat = 3002,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `TERRAIN-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidShape => "TERRAIN-1001",
            ErrorCode::ShapeMismatch => "TERRAIN-1002",
            ErrorCode::RaggedRows => "TERRAIN-1003",
            ErrorCode::InvalidSample => "TERRAIN-1004",
            ErrorCode::WindowOutOfBounds => "TERRAIN-1005",
            ErrorCode::InvalidParameter => "TERRAIN-2001",
            ErrorCode::MeshTooLarge => "TERRAIN-2002",
            ErrorCode::IoWrite => "TERRAIN-3001",
            ErrorCode::UnsupportedFormat => "TERRAIN-3002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for terrain errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Supply a larger raster or a larger window.
    EnlargeRaster { min_rows: usize, min_cols: usize },
    /// Move or shrink a window so it fits inside the raster.
    FitWindow {
        raster_rows: usize,
        raster_cols: usize,
    },
    /// Check the raster source data.
    CheckSource { checks: Vec<String> },
    /// Adjust parameters for the operation.
    AdjustParameters { parameters: Vec<(String, String)> },
    /// Crop or downsample the raster before meshing.
    ReduceRaster { max_vertices: usize },
    /// Use a different output format.
    UseDifferentFormat { suggested: Vec<String> },
    /// No automatic recovery available.
    None,
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::EnlargeRaster { min_rows, min_cols } => write!(
                f,
                "Provide a raster of at least {} rows by {} columns",
                min_rows, min_cols
            ),
            RecoverySuggestion::FitWindow {
                raster_rows,
                raster_cols,
            } => write!(
                f,
                "Move or shrink the window so it lies inside the {}x{} raster",
                raster_rows, raster_cols
            ),
            RecoverySuggestion::CheckSource { checks } => {
                write!(f, "Check the raster source for: {}", checks.join(", "))
            }
            RecoverySuggestion::AdjustParameters { parameters } => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                write!(f, "Try adjusting: {}", params.join(", "))
            }
            RecoverySuggestion::ReduceRaster { max_vertices } => write!(
                f,
                "Crop or downsample the raster so the solid stays under {} vertices",
                max_vertices
            ),
            RecoverySuggestion::UseDifferentFormat { suggested } => {
                write!(f, "Try using a different format: {}", suggested.join(", "))
            }
            RecoverySuggestion::None => write!(f, "No automatic recovery available"),
        }
    }
}

/// Errors that can occur while building or writing a terrain mesh.
#[derive(Debug, Error, Diagnostic)]
pub enum TerrainError {
    /// Raster too small to form a single grid cell.
    #[error("invalid raster shape {rows}x{cols}: need at least 2 rows and 2 columns")]
    #[diagnostic(
        code(terrain::raster::shape),
        help("A heightfield needs at least one full grid cell (2x2 samples) to form a solid.")
    )]
    InvalidShape { rows: usize, cols: usize },

    /// Flat sample buffer does not match the declared shape.
    #[error("raster shape {rows}x{cols} needs {expected} samples, got {actual}")]
    #[diagnostic(code(terrain::raster::mismatch))]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    /// Nested rows have differing lengths.
    #[error("raster row {row} has {actual} samples, expected {expected}")]
    #[diagnostic(
        code(terrain::raster::ragged),
        help("Every raster row must contain the same number of samples.")
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Elevation sample is NaN or infinite.
    #[error("invalid elevation at row {row}, column {col}: {value}")]
    #[diagnostic(
        code(terrain::raster::sample),
        help(
            "Non-finite elevations usually mark no-data cells. Fill or crop them out before meshing."
        )
    )]
    InvalidSample { row: usize, col: usize, value: f64 },

    /// Requested window falls outside the raster.
    #[error(
        "window at ({row}, {col}) of size {rows}x{cols} exceeds raster {raster_rows}x{raster_cols}"
    )]
    #[diagnostic(code(terrain::raster::window))]
    WindowOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
        raster_rows: usize,
        raster_cols: usize,
    },

    /// Scale factor or box height out of range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    #[diagnostic(
        code(terrain::params::invalid),
        help("xscale and yscale must be positive, zscale finite, box height zero or positive.")
    )]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Mesh would exceed the vertex limit.
    #[error("mesh would need {vertices} vertices, limit is {limit}")]
    #[diagnostic(
        code(terrain::params::too_large),
        help("Crop the raster with a window or raise the vertex limit.")
    )]
    MeshTooLarge { vertices: usize, limit: usize },

    /// Error writing to a file.
    #[error("failed to write mesh to {path}")]
    #[diagnostic(
        code(terrain::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported output format.
    #[error("unsupported mesh format: {extension:?}")]
    #[diagnostic(
        code(terrain::format::unsupported),
        help("Supported output formats: STL, OBJ")
    )]
    UnsupportedFormat { extension: Option<String> },
}

impl TerrainError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TerrainError::InvalidShape { .. } => ErrorCode::InvalidShape,
            TerrainError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            TerrainError::RaggedRows { .. } => ErrorCode::RaggedRows,
            TerrainError::InvalidSample { .. } => ErrorCode::InvalidSample,
            TerrainError::WindowOutOfBounds { .. } => ErrorCode::WindowOutOfBounds,
            TerrainError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            TerrainError::MeshTooLarge { .. } => ErrorCode::MeshTooLarge,
            TerrainError::IoWrite { .. } => ErrorCode::IoWrite,
            TerrainError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            TerrainError::InvalidShape { .. } => RecoverySuggestion::EnlargeRaster {
                min_rows: 2,
                min_cols: 2,
            },
            TerrainError::WindowOutOfBounds {
                raster_rows,
                raster_cols,
                ..
            } => RecoverySuggestion::FitWindow {
                raster_rows: *raster_rows,
                raster_cols: *raster_cols,
            },
            TerrainError::ShapeMismatch { .. } | TerrainError::RaggedRows { .. } => {
                RecoverySuggestion::CheckSource {
                    checks: vec!["raster dimensions".into(), "decoder output".into()],
                }
            }
            TerrainError::InvalidSample { .. } => RecoverySuggestion::CheckSource {
                checks: vec!["no-data cells".into(), "NaN or infinite elevations".into()],
            },
            TerrainError::InvalidParameter { name, reason, .. } => {
                RecoverySuggestion::AdjustParameters {
                    parameters: vec![((*name).to_string(), (*reason).to_string())],
                }
            }
            TerrainError::MeshTooLarge { limit, .. } => RecoverySuggestion::ReduceRaster {
                max_vertices: *limit,
            },
            TerrainError::IoWrite { .. } => RecoverySuggestion::CheckSource {
                checks: vec!["directory exists".into(), "write permissions".into()],
            },
            TerrainError::UnsupportedFormat { .. } => RecoverySuggestion::UseDifferentFormat {
                suggested: vec!["STL".into(), "OBJ".into()],
            },
        }
    }

    /// Create an InvalidShape error.
    pub fn invalid_shape(rows: usize, cols: usize) -> Self {
        TerrainError::InvalidShape { rows, cols }
    }

    /// Create an InvalidSample error.
    pub fn invalid_sample(row: usize, col: usize, value: f64) -> Self {
        TerrainError::InvalidSample { row, col, value }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        TerrainError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TerrainError::IoWrite {
            path: path.into(),
            source,
        }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(extension: Option<String>) -> Self {
        TerrainError::UnsupportedFormat { extension }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = TerrainError::invalid_shape(1, 5);
        assert_eq!(err.code(), ErrorCode::InvalidShape);
        assert_eq!(err.code().as_str(), "TERRAIN-1001");

        let err = TerrainError::invalid_parameter("xscale", 0.0, "must be positive");
        assert_eq!(err.code().to_string(), "TERRAIN-2001");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = TerrainError::MeshTooLarge {
            vertices: 10,
            limit: 4,
        };
        match err.recovery_suggestion() {
            RecoverySuggestion::ReduceRaster { max_vertices } => assert_eq!(max_vertices, 4),
            other => panic!("Expected ReduceRaster suggestion, got {:?}", other),
        }

        let err = TerrainError::invalid_parameter("box_height", -1.0, "must not be negative");
        let text = err.recovery_suggestion().to_string();
        assert!(text.contains("box_height = must not be negative"));
        assert!(!text.contains("positive"));

        let err = TerrainError::WindowOutOfBounds {
            row: 8,
            col: 0,
            rows: 4,
            cols: 4,
            raster_rows: 10,
            raster_cols: 10,
        };
        match err.recovery_suggestion() {
            RecoverySuggestion::FitWindow {
                raster_rows,
                raster_cols,
            } => assert_eq!((raster_rows, raster_cols), (10, 10)),
            other => panic!("Expected FitWindow suggestion, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = TerrainError::invalid_shape(1, 40);
        let display = err.to_string();
        assert!(display.contains("1x40"));

        let err = TerrainError::invalid_sample(3, 7, f64::NAN);
        let display = err.to_string();
        assert!(display.contains("row 3"));
        assert!(display.contains("column 7"));
        assert!(display.contains("NaN"));
    }
}
