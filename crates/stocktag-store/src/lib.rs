//! # stocktag-store: Persistence Layer for StockTag
//!
//! This crate owns the document-store boundary and the inventory
//! service built on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockTag Data Flow                                │
//! │                                                                         │
//! │  Caller (UI command, seed tool, label generator)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stocktag-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │ InventoryService│   │ DocumentStore  │   │ SqliteStore  │  │   │
//! │  │   │ (inventory.rs) │──▶│    (trait)     │◀──│ (sqlite.rs)  │  │   │
//! │  │   │                │   │ (document.rs)  │   │              │  │   │
//! │  │   │ CRUD + rules   │   │ query/get/...  │   │ JSON bodies  │  │   │
//! │  │   └────────────────┘   └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         SQLite file (or any other DocumentStore impl)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - The document-store trait and its data model
//! - [`sqlite`] - SQLite-backed implementation
//! - [`inventory`] - Product CRUD and business rules
//! - [`error`] - Store and inventory error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stocktag_store::{InventoryService, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::connect(StoreConfig::new("stocktag.db")).await?;
//! let inventory = InventoryService::new(Arc::new(store));
//!
//! let products = inventory.get_all_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod inventory;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{Document, DocumentStore, Fields, Filter};
pub use error::{InventoryError, InventoryResult, StoreError, StoreResult};
pub use inventory::InventoryService;
pub use sqlite::{SqliteStore, StoreConfig};
