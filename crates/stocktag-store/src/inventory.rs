//! # Inventory Service
//!
//! Product CRUD over the document store, plus the business rules that
//! guard it.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      add_product(input)                                 │
//! │                                                                         │
//! │  1. derive barcode from SKU when none supplied                          │
//! │  2. uniqueness check among ACTIVE products        → DuplicateBarcode    │
//! │  3. symbology format/checksum validation          → InvalidBarcode     │
//! │  4. registry check when source is COMMERCIAL      → Registry            │
//! │  5. stamp timestamps, insert, hydrate id                                │
//! │                                                                         │
//! │  The store has no transactions: steps 2 and 5 are check-then-act.      │
//! │  A concurrent writer can slip between them.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Barcode uniqueness is scoped to active products; a retired
//!   product's code may be reused
//! - Stock never goes negative: subtractions clamp at zero
//! - `min_stock`/`max_stock` are advisory; crossings are logged,
//!   never enforced
//! - Retiring a product flips `is_active` (soft delete); `delete_product`
//!   removes the document outright and reports success as a bool

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use stocktag_core::inventory as rules;
use stocktag_core::symbology;
use stocktag_core::{
    BarcodeSource, CommercialRegistry, InventorySummary, NewProduct, Product, ProductFilters,
    ProductPatch, StockOperation, PRODUCTS_COLLECTION,
};

use crate::document::{Document, DocumentStore, Fields, Filter};
use crate::error::{InventoryError, InventoryResult, StoreResult};

// =============================================================================
// Helpers
// =============================================================================

/// Serializes a value into a document body.
fn to_fields<T: Serialize>(value: &T) -> StoreResult<Fields> {
    Ok(serde_json::to_value(value)?
        .as_object()
        .cloned()
        .unwrap_or_default())
}

/// Hydrates a product from a stored document, folding the store id in.
fn product_from_document(doc: Document) -> StoreResult<Product> {
    let mut product: Product = serde_json::from_value(serde_json::Value::Object(doc.fields))?;
    product.id = doc.id;
    Ok(product)
}

/// Derives an internal barcode from a SKU: whitespace stripped,
/// uppercased, suffixed with the low six digits of the current epoch
/// millis.
fn derive_barcode(sku: &str) -> String {
    let normalized: String = sku
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let suffix = Utc::now().timestamp_millis().rem_euclid(1_000_000);
    format!("{}-{:06}", normalized, suffix)
}

fn active_filter() -> Filter {
    Filter::eq("isActive", true)
}

// =============================================================================
// InventoryService
// =============================================================================

/// Product catalog operations, generic over the persistence
/// collaborator.
#[derive(Debug, Clone)]
pub struct InventoryService<S: DocumentStore> {
    store: Arc<S>,
    registry: CommercialRegistry,
}

impl<S: DocumentStore> InventoryService<S> {
    /// Service with the built-in demo prefix registry.
    pub fn new(store: Arc<S>) -> Self {
        InventoryService {
            store,
            registry: CommercialRegistry::default(),
        }
    }

    /// Service with a caller-supplied prefix registry.
    pub fn with_registry(store: Arc<S>, registry: CommercialRegistry) -> Self {
        InventoryService { store, registry }
    }

    /// The commercial prefix registry in use.
    pub fn registry(&self) -> &CommercialRegistry {
        &self.registry
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Creates a product.
    ///
    /// When `barcode_data` is absent or blank, an internal identifier is
    /// derived from the SKU. The code must be unique among active
    /// products and valid for its symbology; COMMERCIAL codes must also
    /// carry a registered prefix.
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn add_product(&self, input: NewProduct) -> InventoryResult<Product> {
        let barcode = match input.barcode_data.as_deref() {
            Some(code) if !code.trim().is_empty() => code.to_string(),
            _ => derive_barcode(&input.sku),
        };

        if !self.validate_barcode_uniqueness(&barcode, None).await {
            return Err(InventoryError::DuplicateBarcode { barcode });
        }
        symbology::validate(&barcode, input.barcode_type)?;
        if input.barcode_source == BarcodeSource::Commercial {
            self.registry.validate_commercial(&barcode, input.barcode_type)?;
        }

        let now = Utc::now();
        let product = Product {
            id: String::new(),
            name: input.name,
            sku: input.sku,
            description: input.description,
            price_cents: input.price_cents,
            cost_cents: input.cost_cents,
            category: input.category,
            supplier: input.supplier,
            barcode_type: input.barcode_type,
            barcode_data: barcode,
            barcode_source: input.barcode_source,
            stock: input.stock,
            min_stock: input.min_stock,
            max_stock: input.max_stock,
            location: input.location,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let fields = to_fields(&product).map_err(InventoryError::Store)?;
        let id = self.store.insert(PRODUCTS_COLLECTION, fields).await?;

        info!(id = %id, barcode = %product.barcode_data, "Product created");
        Ok(Product { id, ..product })
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Fetches one product by id; None when absent.
    pub async fn get_product(&self, id: &str) -> InventoryResult<Option<Product>> {
        match self.store.get(PRODUCTS_COLLECTION, id).await? {
            Some(doc) => Ok(Some(product_from_document(doc).map_err(InventoryError::Store)?)),
            None => Ok(None),
        }
    }

    /// All active products, newest first.
    pub async fn get_all_products(&self) -> InventoryResult<Vec<Product>> {
        let docs = self
            .store
            .query(PRODUCTS_COLLECTION, &[active_filter()])
            .await?;

        let mut products = docs
            .into_iter()
            .map(product_from_document)
            .collect::<StoreResult<Vec<_>>>()
            .map_err(InventoryError::Store)?;

        rules::sort_newest_first(&mut products);
        debug!(count = products.len(), "Loaded active products");
        Ok(products)
    }

    /// Looks up the active product holding `barcode`, if any.
    pub async fn get_product_by_barcode(&self, barcode: &str) -> InventoryResult<Option<Product>> {
        let docs = self
            .store
            .query(
                PRODUCTS_COLLECTION,
                &[active_filter(), Filter::eq("barcodeData", barcode)],
            )
            .await?;

        match docs.into_iter().next() {
            Some(doc) => Ok(Some(product_from_document(doc).map_err(InventoryError::Store)?)),
            None => Ok(None),
        }
    }

    /// Active products in `category`, newest first.
    pub async fn get_products_by_category(&self, category: &str) -> InventoryResult<Vec<Product>> {
        let docs = self
            .store
            .query(
                PRODUCTS_COLLECTION,
                &[active_filter(), Filter::eq("category", category)],
            )
            .await?;

        let mut products = docs
            .into_iter()
            .map(product_from_document)
            .collect::<StoreResult<Vec<_>>>()
            .map_err(InventoryError::Store)?;

        rules::sort_newest_first(&mut products);
        Ok(products)
    }

    /// Case-insensitive search across name, SKU, description and barcode.
    pub async fn search_products(&self, query: &str) -> InventoryResult<Vec<Product>> {
        Ok(rules::search(self.get_all_products().await?, query))
    }

    /// Conjunctive filtering over the active set.
    pub async fn filter_products(&self, filters: &ProductFilters) -> InventoryResult<Vec<Product>> {
        Ok(rules::apply_filters(self.get_all_products().await?, filters))
    }

    /// Active products at or below their low-stock threshold.
    pub async fn get_low_stock_products(&self) -> InventoryResult<Vec<Product>> {
        Ok(rules::low_stock(self.get_all_products().await?))
    }

    /// Aggregates over the active product set.
    pub async fn get_inventory_summary(&self) -> InventoryResult<InventorySummary> {
        Ok(rules::summarize(&self.get_all_products().await?))
    }

    /// Sorted distinct categories among active products.
    pub async fn get_categories(&self) -> InventoryResult<Vec<String>> {
        let products = self.get_all_products().await?;
        let set: BTreeSet<String> = products.into_iter().map(|p| p.category).collect();
        Ok(set.into_iter().collect())
    }

    /// Sorted distinct suppliers among active products.
    pub async fn get_suppliers(&self) -> InventoryResult<Vec<String>> {
        let products = self.get_all_products().await?;
        let set: BTreeSet<String> = products.into_iter().filter_map(|p| p.supplier).collect();
        Ok(set.into_iter().collect())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Applies a partial update; only set fields are written.
    ///
    /// A changed barcode or symbology re-runs the full validation chain
    /// (uniqueness excluding this product, symbology against the
    /// effective type, registry when the effective source is
    /// COMMERCIAL), so the stored type/data pair stays consistent.
    /// Returns the updated product.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> InventoryResult<Product> {
        if let Some(barcode) = &patch.barcode_data {
            if !self.validate_barcode_uniqueness(barcode, Some(id)).await {
                return Err(InventoryError::DuplicateBarcode {
                    barcode: barcode.clone(),
                });
            }
        }

        if patch.barcode_data.is_some() || patch.barcode_type.is_some() {
            let current = self.require_product(id).await?;
            let barcode = patch
                .barcode_data
                .as_deref()
                .unwrap_or(current.barcode_data.as_str());
            let barcode_type = patch.barcode_type.unwrap_or(current.barcode_type);
            symbology::validate(barcode, barcode_type)?;

            let source = patch.barcode_source.unwrap_or(current.barcode_source);
            if source == BarcodeSource::Commercial {
                self.registry.validate_commercial(barcode, barcode_type)?;
            }
        }

        let mut fields = to_fields(&patch).map_err(InventoryError::Store)?;
        fields.insert("updatedAt".to_string(), json!(Utc::now()));

        self.store.update(PRODUCTS_COLLECTION, id, fields).await?;
        debug!(id, "Product updated");
        self.require_product(id).await
    }

    /// Adds or subtracts stock. Subtractions clamp at zero; a result at
    /// or below the low-stock threshold is logged, never rejected.
    pub async fn update_stock(
        &self,
        id: &str,
        quantity: i64,
        operation: StockOperation,
    ) -> InventoryResult<Product> {
        let product = self.require_product(id).await?;
        let new_stock = match operation {
            StockOperation::Add => product.stock + quantity,
            StockOperation::Subtract => rules::subtract_stock(product.stock, quantity),
        };

        let updated = self.update_product(id, ProductPatch::stock(new_stock)).await?;
        if updated.stock == 0 {
            warn!(id, sku = %updated.sku, "Product is out of stock");
        } else if updated.is_low_stock() {
            warn!(id, sku = %updated.sku, stock = updated.stock, "Product is low on stock");
        }
        Ok(updated)
    }

    /// Retires a product (soft delete). Its barcode becomes reusable.
    pub async fn deactivate_product(&self, id: &str) -> InventoryResult<Product> {
        let patch = ProductPatch {
            is_active: Some(false),
            ..ProductPatch::default()
        };
        let product = self.update_product(id, patch).await?;
        info!(id, sku = %product.sku, "Product deactivated");
        Ok(product)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Removes the document outright. Reports success as a bool and
    /// never errors; a store failure degrades to `false`.
    pub async fn delete_product(&self, id: &str) -> bool {
        match self.store.delete(PRODUCTS_COLLECTION, id).await {
            Ok(()) => {
                info!(id, "Product deleted");
                true
            }
            Err(err) => {
                warn!(id, error = %err, "Product delete failed");
                false
            }
        }
    }

    // =========================================================================
    // Barcode Helpers
    // =========================================================================

    /// True when no OTHER active product holds `barcode`. Degrades to
    /// "not unique" when the store cannot be asked, so writers fail
    /// closed.
    pub async fn validate_barcode_uniqueness(&self, barcode: &str, exclude_id: Option<&str>) -> bool {
        let filters = [active_filter(), Filter::eq("barcodeData", barcode)];
        match self.store.query(PRODUCTS_COLLECTION, &filters).await {
            Ok(docs) => docs.iter().all(|doc| Some(doc.id.as_str()) == exclude_id),
            Err(err) => {
                warn!(barcode, error = %err, "Uniqueness check failed, treating as taken");
                false
            }
        }
    }

    /// Derives a fresh internal barcode for an existing product from its
    /// SKU. On collision a random four-digit suffix is appended.
    pub async fn generate_barcode_for_product(&self, id: &str) -> InventoryResult<String> {
        let product = self.require_product(id).await?;
        let candidate = derive_barcode(&product.sku);
        if self.validate_barcode_uniqueness(&candidate, Some(id)).await {
            return Ok(candidate);
        }
        let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
        Ok(format!("{}-{:04}", candidate, suffix))
    }

    async fn require_product(&self, id: &str) -> InventoryResult<Product> {
        self.get_product(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
