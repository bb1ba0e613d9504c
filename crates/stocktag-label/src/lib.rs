//! # stocktag-label: Code Generation & Printable Documents
//!
//! This crate drives the two external renderers (PNG rasterizer and
//! page-oriented document composer) to turn validated barcode data into
//! printable artifacts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockTag Label Flow                               │
//! │                                                                         │
//! │  Caller (UI command, export tool)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stocktag-label (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌──────────────────┐                    │   │
//! │  │   │  LabelService  │──▶│ CatalogGenerator │                    │   │
//! │  │   │ (generate.rs)  │   │  (catalog.rs)    │                    │   │
//! │  │   └───────┬────────┘   └────────┬─────────┘                    │   │
//! │  │           │                     │                               │   │
//! │  │           ▼                     ▼                               │   │
//! │  │   Rasterizer trait      DocumentCanvas trait   (raster.rs)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                     │                                           │
//! │       ▼                     ▼                                           │
//! │  PNG renderer          PDF composer   (external collaborators)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`raster`] - Collaborator traits and rendering parameters
//! - [`generate`] - Single-code generation (never-throws pipeline)
//! - [`catalog`] - Paginated batch generation
//! - [`error`] - Label error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stocktag_label::{CatalogGenerator, LabelService};
//!
//! let labels = LabelService::new(Arc::new(my_rasterizer));
//! let catalog = CatalogGenerator::new(labels.clone());
//!
//! let results = catalog.generate_catalog(&products, &mut my_canvas).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod generate;
pub mod raster;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogGenerator, PRODUCTS_PER_PAGE};
pub use error::{CanvasError, LabelError, LabelResult, RasterError};
pub use generate::LabelService;
pub use raster::{raster_format, DocumentCanvas, QrOptions, RasterOptions, Rasterizer};
