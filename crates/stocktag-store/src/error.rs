//! # Persistence Error Types
//!
//! Error types for document-store operations and the inventory service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryError ← Business-rule rejections join the flow here          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer displays a user-facing message                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Policy
//! Writes fail closed (create/update propagate errors); `delete`
//! degrades to `false`; the uniqueness pre-check degrades to "not
//! unique". Read paths PROPAGATE store failures so callers can tell
//! "empty" from "failed".

use thiserror::Error;

use stocktag_core::{RegistryError, SymbologyError};

// =============================================================================
// Store Error
// =============================================================================

/// Document store operation failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store is unreachable or refused the connection.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// A query or write failed at the store.
    #[error("store query failed: {0}")]
    Query(String),

    /// A document body was not valid JSON / did not fit the schema.
    #[error("document body invalid: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The referenced document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Inventory Error
// =============================================================================

/// Inventory service failures: business-rule rejections layered over
/// store failures.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The barcode is already held by another active product.
    #[error("barcode '{barcode}' is already in use by another active product")]
    DuplicateBarcode { barcode: String },

    /// The barcode fails its symbology's format or checksum rules.
    #[error("invalid barcode: {0}")]
    InvalidBarcode(#[from] SymbologyError),

    /// A COMMERCIAL-source barcode was rejected by the prefix registry.
    #[error("commercial code rejected: {0}")]
    Registry(#[from] RegistryError),

    /// The referenced product id does not resolve.
    #[error("product not found: {0}")]
    NotFound(String),

    /// The underlying store call failed.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for InventoryError {
    /// A missing document surfaces as a product-level NotFound so
    /// callers see one error for "no such product".
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => InventoryError::NotFound(id),
            other => InventoryError::Store(other),
        }
    }
}

/// Convenience type alias for Results with InventoryError.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================
