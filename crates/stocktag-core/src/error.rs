//! # Error Types
//!
//! Domain-specific error types for stocktag-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stocktag-core errors (this file)                                      │
//! │  ├── SymbologyError  - Format / check-digit failures                   │
//! │  └── RegistryError   - Commercial prefix registration failures         │
//! │                                                                         │
//! │  stocktag-store errors (separate crate)                                │
//! │  ├── StoreError      - Document store operation failures               │
//! │  └── InventoryError  - CRUD / uniqueness / not-found failures          │
//! │                                                                         │
//! │  stocktag-label errors (separate crate)                                │
//! │  └── LabelError      - Rasterizer / canvas failures                    │
//! │                                                                         │
//! │  Flow: SymbologyError → InventoryError → presentation message          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (symbology name, prefix, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::Symbology;

// =============================================================================
// Symbology Error
// =============================================================================

/// Validation failure for a barcode data string.
///
/// Two categories, matching how a caller should present them:
/// - [`SymbologyError::Format`] - length or charset does not fit the standard
/// - [`SymbologyError::Checksum`] - the trailing check digit does not match
///   the digits that precede it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbologyError {
    /// Charset or length mismatch for the symbology.
    #[error("invalid {symbology} data: {reason}")]
    Format { symbology: Symbology, reason: String },

    /// Payload digits do not produce the trailing check digit.
    #[error("check digit mismatch for {symbology}")]
    Checksum { symbology: Symbology },
}

impl SymbologyError {
    /// Creates a Format error for the given symbology.
    pub fn format(symbology: Symbology, reason: impl Into<String>) -> Self {
        SymbologyError::Format {
            symbology,
            reason: reason.into(),
        }
    }

    /// Creates a Checksum error for the given symbology.
    pub fn checksum(symbology: Symbology) -> Self {
        SymbologyError::Checksum { symbology }
    }

    /// The symbology the failing data was validated against.
    pub fn symbology(&self) -> Symbology {
        match self {
            SymbologyError::Format { symbology, .. } => *symbology,
            SymbologyError::Checksum { symbology } => *symbology,
        }
    }
}

// =============================================================================
// Registry Error
// =============================================================================

/// Rejection of a "commercial" source code.
///
/// A commercial code must be a valid barcode AND carry a registered
/// company prefix. An unregistered prefix is a distinct failure from a
/// plain format error: the data may be perfectly well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The code failed plain symbology validation.
    #[error(transparent)]
    Invalid(#[from] SymbologyError),

    /// The code is well-formed but its prefix is not in the registry.
    #[error("commercial prefix '{prefix}' is not registered; a registered GS1 prefix is required")]
    Unregistered { prefix: String },

    /// The symbology has no commercial-registry concept (CODE-128/CODE-39).
    #[error("{symbology} codes have no commercial registration")]
    Unsupported { symbology: Symbology },
}

// =============================================================================
// Unit Tests
// =============================================================================
