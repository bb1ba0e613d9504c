//! # Document Store Boundary
//!
//! The interface of the remote document store, as consumed by this
//! system. The store itself is an external collaborator; everything
//! behind this trait is somebody else's problem.
//!
//! ## Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Document Store Model                               │
//! │                                                                         │
//! │  collection "products"                                                  │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │ id: "c1f9..."  fields: { "name": "Laptop",   │                      │
//! │  │                          "barcodeData": ...,  │                      │
//! │  │                          "isActive": true }   │                      │
//! │  └──────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  query(collection, [isActive == true, barcodeData == "X"])             │
//! │  → simple equality predicates only, ANDed together                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is an independent, transaction-less read or write; there
//! are no multi-document transactions and no optimistic-concurrency
//! tokens.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;

/// A document body: JSON field map, excluding the id.
pub type Fields = Map<String, Value>;

// =============================================================================
// Document
// =============================================================================

/// A stored document: store-assigned id plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Document {
            id: id.into(),
            fields,
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// A simple equality predicate on a document field.
///
/// Multiple filters in a query are conjunctive.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// DocumentStore Trait
// =============================================================================

/// The persistence collaborator.
///
/// Implementations may talk to a remote document database or, as in
/// [`crate::sqlite::SqliteStore`], a local SQLite file. Unit tests mock
/// this trait for error-path coverage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns documents in `collection` matching ALL filters.
    async fn query(&self, collection: &str, filters: &[Filter]) -> StoreResult<Vec<Document>>;

    /// Fetches one document by id; None when absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Inserts a new document and returns the store-assigned id.
    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<String>;

    /// Merges `partial` into an existing document's body.
    ///
    /// Fails with [`crate::error::StoreError::NotFound`] when the
    /// document does not exist.
    async fn update(&self, collection: &str, id: &str, partial: Fields) -> StoreResult<()>;

    /// Removes a document. Idempotent: deleting an absent id succeeds.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}
