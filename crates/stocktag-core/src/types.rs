//! # Domain Types
//!
//! Core domain types used throughout StockTag.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │  BarcodeResult  │   │ CommercialCodeInfo  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (store)     │   │  id (UUID)      │   │  gs1_prefix         │   │
//! │  │  sku, name      │   │  product_id?    │   │  product_code       │   │
//! │  │  barcode_data   │   │  data, image?   │   │  check_digit        │   │
//! │  │  stock levels   │   │  is_valid       │   │  is_registered      │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   Symbology     │   │  BarcodeSource  │   │  InventorySummary   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  Ean13, Ean8    │   │  Commercial     │   │  total_value_cents  │   │
//! │  │  UpcA, Itf14    │   │  Internal       │   │  margin_percent     │   │
//! │  │  Code128/39     │   │  Sample         │   │  low/out-of-stock   │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Field Names
//! Product documents use camelCase field names (`barcodeData`, `isActive`)
//! so the JSON bodies match what the presentation layer exchanges.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Symbology
// =============================================================================

/// A barcode encoding standard.
///
/// Four numeric, checksum-bearing symbologies (the EAN/UPC/ITF family)
/// and two free-text symbologies without a checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbology {
    /// Retail products worldwide (13 digits).
    #[serde(rename = "EAN-13")]
    Ean13,
    /// Small retail products (8 digits).
    #[serde(rename = "EAN-8")]
    Ean8,
    /// North American retail products (12 digits).
    #[serde(rename = "UPC-A")]
    UpcA,
    /// Alphanumeric text (logistics, internal codes).
    #[serde(rename = "CODE-128")]
    Code128,
    /// Industry and logistics (restricted charset).
    #[serde(rename = "CODE-39")]
    Code39,
    /// Cases and pallets (14 digits).
    #[serde(rename = "ITF-14")]
    Itf14,
}

impl Symbology {
    /// All supported symbologies, in display order.
    pub const fn all() -> [Symbology; 6] {
        [
            Symbology::Ean13,
            Symbology::Ean8,
            Symbology::UpcA,
            Symbology::Code128,
            Symbology::Code39,
            Symbology::Itf14,
        ]
    }

    /// Human-readable label, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8",
            Symbology::UpcA => "UPC-A",
            Symbology::Code128 => "CODE-128",
            Symbology::Code39 => "CODE-39",
            Symbology::Itf14 => "ITF-14",
        }
    }

    /// Short description for selection UIs.
    pub const fn description(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "Retail products (13 digits)",
            Symbology::Ean8 => "Small products (8 digits)",
            Symbology::UpcA => "North American products (12 digits)",
            Symbology::Code128 => "Alphanumeric text (up to 48 characters)",
            Symbology::Code39 => "Industry and logistics (up to 43 characters)",
            Symbology::Itf14 => "Cases and pallets (14 digits)",
        }
    }

    /// Fixed digit count for the numeric symbologies; None for the
    /// variable-length text symbologies.
    pub const fn digit_count(&self) -> Option<usize> {
        match self {
            Symbology::Ean13 => Some(13),
            Symbology::Ean8 => Some(8),
            Symbology::UpcA => Some(12),
            Symbology::Itf14 => Some(14),
            Symbology::Code128 | Symbology::Code39 => None,
        }
    }

    /// Whether this symbology is digits-only with a trailing check digit.
    pub const fn is_numeric(&self) -> bool {
        self.digit_count().is_some()
    }

    /// The static `{value, label, description}` table consumed by
    /// selection UIs.
    pub fn catalog() -> Vec<SymbologyInfo> {
        Symbology::all()
            .into_iter()
            .map(|value| SymbologyInfo {
                value,
                label: value.label(),
                description: value.description(),
            })
            .collect()
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the symbology selection catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SymbologyInfo {
    pub value: Symbology,
    pub label: &'static str,
    pub description: &'static str,
}

// =============================================================================
// Barcode Source
// =============================================================================

/// Where a barcode identifier originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarcodeSource {
    /// Officially registered code (EAN/UPC family); its prefix must
    /// resolve in the commercial registry.
    Commercial,
    /// Company-internal code, free to invent.
    Internal,
    /// Demonstration/placeholder code.
    Sample,
}

impl Default for BarcodeSource {
    fn default() -> Self {
        BarcodeSource::Internal
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record in the catalog.
///
/// ## Identity
/// - `id`: opaque string assigned by the document store on creation
/// - `sku`: human-readable business identifier (unique by convention,
///   not enforced)
///
/// ## Lifecycle
/// Created by `InventoryService::add_product`, mutated by
/// `update_product`/`update_stock`, retired by flipping `is_active`
/// to false (soft delete). Only active records are visible to normal
/// queries and to barcode uniqueness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier. Not part of the document body;
    /// hydrated from the document id on read.
    #[serde(default, skip_serializing)]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Sale price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Acquisition cost in cents.
    pub cost_cents: i64,

    /// Category (free text).
    pub category: String,

    /// Supplier (free text, optional).
    #[serde(default)]
    pub supplier: Option<String>,

    /// Symbology of `barcode_data`.
    pub barcode_type: Symbology,

    /// The barcode identifier; unique among active products.
    pub barcode_data: String,

    /// Origin of the barcode identifier.
    pub barcode_source: BarcodeSource,

    /// Current stock level (never negative).
    pub stock: i64,

    /// Advisory low-stock threshold.
    pub min_stock: i64,

    /// Recorded capacity. Advisory only: additions are not capped.
    pub max_stock: i64,

    /// Physical location (optional).
    #[serde(default)]
    pub location: Option<String>,

    /// Soft-delete flag.
    pub is_active: bool,

    /// Set by the service layer on creation; never client-trusted.
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub created_at: DateTime<Utc>,

    /// Set by the service layer on every mutation.
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Total sale value of the units on hand.
    #[inline]
    pub fn stock_value_cents(&self) -> i64 {
        self.price_cents * self.stock
    }

    /// Total acquisition cost of the units on hand.
    #[inline]
    pub fn stock_cost_cents(&self) -> i64 {
        self.cost_cents * self.stock
    }

    /// True when stock is positive but at or below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= self.min_stock
    }
}

/// Stored timestamps default to "now" when absent or corrupt.
fn timestamp_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)
        .unwrap_or(None)
        .unwrap_or_else(Utc::now))
}

// =============================================================================
// Product Input & Patch
// =============================================================================

/// Input for creating a product. The service assigns id, timestamps
/// and the active flag; `barcode_data` is derived from the SKU when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub category: String,
    #[serde(default)]
    pub supplier: Option<String>,
    pub barcode_type: Symbology,
    /// When None, a `{SKU}-{timestamp}` identifier is derived.
    #[serde(default)]
    pub barcode_data: Option<String>,
    #[serde(default)]
    pub barcode_source: BarcodeSource,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    #[serde(default)]
    pub location: Option<String>,
}

/// Partial update for a product. Only set fields are written; the
/// service stamps `updatedAt` itself.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_type: Option<Symbology>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_source: Option<BarcodeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// A patch that only changes the stock level.
    pub fn stock(stock: i64) -> Self {
        ProductPatch {
            stock: Some(stock),
            ..ProductPatch::default()
        }
    }
}

// =============================================================================
// Stock Operation
// =============================================================================

/// Direction of a stock mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    /// Increase stock by the given quantity.
    Add,
    /// Decrease stock by the given quantity, clamping at zero.
    Subtract,
}

// =============================================================================
// Product Filters
// =============================================================================

/// Conjunctive filter over the active product set.
/// Every set field must match for a product to pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    /// Inclusive lower price bound, in cents.
    #[serde(default)]
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound, in cents.
    #[serde(default)]
    pub max_price_cents: Option<i64>,
    /// true: stock > 0; false: stock == 0.
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub barcode_type: Option<Symbology>,
}

// =============================================================================
// Inventory Summary
// =============================================================================

/// Aggregates derived over all active products.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Count of active products.
    pub total_products: usize,
    /// Σ(price × stock), in cents.
    pub total_value_cents: i64,
    /// Σ(cost × stock), in cents.
    pub total_cost_cents: i64,
    /// (value − cost) / cost × 100; zero when total cost is zero.
    pub margin_percent: f64,
    /// Products with 0 < stock ≤ min_stock.
    pub low_stock_products: usize,
    /// Products with stock == 0.
    pub out_of_stock_products: usize,
}

// =============================================================================
// Barcode Result
// =============================================================================

/// Outcome of one code-generation attempt. Transient: never persisted.
///
/// Generation never fails loudly; a validation or rasterization
/// problem is reported through `is_valid` and `error`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeResult {
    /// Fresh UUID for this artifact.
    pub id: String,
    /// Owning product, when generated for one.
    pub product_id: Option<String>,
    pub barcode_type: Symbology,
    /// The encoded data string.
    pub data: String,
    /// Base64 PNG from the rasterizer; None when generation failed.
    pub image: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub is_valid: bool,
    /// Human-readable reason when `is_valid` is false.
    pub error: Option<String>,
    pub source: BarcodeSource,
}

// =============================================================================
// Commercial Code Info
// =============================================================================

/// Decomposition of a validated commercial code into its GS1-style
/// fields, per the symbology's fixed field widths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialCodeInfo {
    /// Leading company prefix (6 digits, 4 for EAN-8).
    pub gs1_prefix: String,
    /// Middle product-code segment.
    pub product_code: String,
    /// Trailing check digit.
    pub check_digit: String,
    /// The full code the fields were sliced from.
    pub full_code: String,
    pub is_registered: bool,
    /// Known only for registry-backed codes.
    pub registration_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
