//! # Label Generation Error Types
//!
//! Failures from the two external collaborators (rasterizer and
//! document canvas) plus the one input rule this crate enforces
//! itself.
//!
//! Note that `LabelService::generate` never surfaces these: single-code
//! generation reports problems through the result's `is_valid`/`error`
//! fields. Errors here belong to the document-producing paths.

use thiserror::Error;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// The external PNG rasterizer failed.
#[derive(Debug, Error)]
#[error("rasterizer failed: {0}")]
pub struct RasterError(pub String);

/// The external document composer failed.
#[derive(Debug, Error)]
#[error("document canvas failed: {0}")]
pub struct CanvasError(pub String);

// =============================================================================
// Label Error
// =============================================================================

/// Document-producing operation failures.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The input string was empty or whitespace.
    #[error("input is empty")]
    EmptyInput,

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Convenience type alias for Results with LabelError.
pub type LabelResult<T> = Result<T, LabelError>;
