//! # stocktag-core: Pure Business Logic for StockTag
//!
//! This crate is the **heart** of StockTag. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockTag Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation Layer (out of repo)             │   │
//! │  │    Code forms ──► Product forms ──► Inventory dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stocktag-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ symbology │  │ registry  │  │ inventory │  │   │
//! │  │   │  Product  │  │  validate │  │ GS1 table │  │  summary  │  │   │
//! │  │   │  Barcode  │  │check digit│  │ prefixes  │  │  filters  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     stocktag-store (persistence)   stocktag-label (rendering)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, BarcodeResult, filters, summary)
//! - [`symbology`] - Per-symbology validation and check-digit arithmetic
//! - [`registry`] - Commercial (GS1-style) prefix registry
//! - [`inventory`] - Derived inventory aggregation, search and filtering
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic apart from the
//!    explicit sample generators, which draw from `rand`
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stocktag_core::symbology::{self, check_digit};
//! use stocktag_core::types::Symbology;
//!
//! // Known-good EAN-13: payload 400781732732, check digit 6
//! assert!(symbology::validate("4007817327326", Symbology::Ean13).is_ok());
//!
//! // Check digit computed over the 12-digit payload
//! assert_eq!(check_digit(&[4, 0, 0, 7, 8, 1, 7, 3, 2, 7, 3, 2]), 6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod registry;
pub mod symbology;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stocktag_core::Product` instead of
// `use stocktag_core::types::Product`

pub use error::{RegistryError, SymbologyError};
pub use registry::CommercialRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the document-store collection holding product records.
///
/// Shared between the persistence layer and the seed tooling so the
/// collection name never drifts between writers and readers.
pub const PRODUCTS_COLLECTION: &str = "products";
