//! # Rendering Collaborator Boundaries
//!
//! Traits for the two external renderers this crate drives: a barcode/QR
//! rasterizer producing PNG images, and a page-oriented document
//! composer. Concrete engines live outside this crate; tests mock both.
//!
//! ## Pipeline Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   LabelService / CatalogGenerator                                       │
//! │        │                          │                                     │
//! │        ▼                          ▼                                     │
//! │   Rasterizer (async)         DocumentCanvas (sync)                      │
//! │   data → base64 PNG          text/image placement → saved document      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use stocktag_core::Symbology;

use crate::error::{CanvasError, RasterError};

// =============================================================================
// Format Mapping
// =============================================================================

/// Maps a symbology to the rasterizer's format token.
pub const fn raster_format(symbology: Symbology) -> &'static str {
    match symbology {
        Symbology::Ean13 => "EAN13",
        Symbology::Ean8 => "EAN8",
        Symbology::UpcA => "UPC",
        Symbology::Code128 => "CODE128",
        Symbology::Code39 => "CODE39",
        Symbology::Itf14 => "ITF14",
    }
}

// =============================================================================
// Raster Options
// =============================================================================

/// Rendering parameters for a 1D barcode.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Rasterizer format token, from [`raster_format`].
    pub format: &'static str,
    /// Module (narrow bar) width in device units.
    pub width: u32,
    /// Bar height in device units.
    pub height: u32,
    /// Render the human-readable text line under the bars.
    pub display_value: bool,
    /// Font size for the human-readable line.
    pub font_size: u32,
    /// Quiet-zone margin in device units.
    pub margin: u32,
}

impl RasterOptions {
    /// Standard label parameters for the given symbology.
    pub const fn for_symbology(symbology: Symbology) -> Self {
        RasterOptions {
            format: raster_format(symbology),
            width: 2,
            height: 50,
            display_value: true,
            font_size: 14,
            margin: 10,
        }
    }
}

/// Rendering parameters for a QR code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrOptions {
    /// Square edge length in pixels.
    pub width: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        QrOptions { width: 200 }
    }
}

// =============================================================================
// Rasterizer Trait
// =============================================================================

/// The external image renderer.
///
/// Both methods return a base64-encoded PNG.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Rasterizer: Send + Sync {
    /// Renders a 1D barcode for pre-validated data.
    async fn rasterize(&self, data: &str, options: &RasterOptions) -> Result<String, RasterError>;

    /// Renders a QR code for an arbitrary string.
    async fn rasterize_qr(&self, data: &str, options: &QrOptions) -> Result<String, RasterError>;
}

// =============================================================================
// DocumentCanvas Trait
// =============================================================================

/// The external page-oriented document composer.
///
/// Coordinates are in the composer's own units with the origin at the
/// top-left of the current page.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentCanvas {
    /// Places a text line at (x, y) on the current page.
    fn add_text(&mut self, text: &str, x: u32, y: u32) -> Result<(), CanvasError>;

    /// Places a base64 PNG at (x, y) scaled to w × h.
    fn add_image(&mut self, png_base64: &str, x: u32, y: u32, w: u32, h: u32)
        -> Result<(), CanvasError>;

    /// Starts a fresh page; subsequent placements land on it.
    fn add_page(&mut self) -> Result<(), CanvasError>;

    /// Finalizes and persists the document under `file_name`.
    fn save(&mut self, file_name: &str) -> Result<(), CanvasError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
