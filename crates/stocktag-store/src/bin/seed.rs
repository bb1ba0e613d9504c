//! # Seed Data Generator
//!
//! Populates the document store with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default)
//! cargo run -p stocktag-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p stocktag-store --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stocktag-store --bin seed -- --db ./data/stocktag.db
//! ```
//!
//! ## Generated Products
//! Creates realistic catalog data across categories:
//! - Computers (laptops, monitors, docks)
//! - Accessories (mice, keyboards, cables)
//! - Audio (headsets, speakers)
//! - Storage (SSDs, flash drives)
//!
//! Each product has:
//! - Unique SKU: `{CATEGORY}-{INDEX}`
//! - CODE-128 internal barcode derived from the SKU
//! - Random price: $4.99 - $299.99
//! - Random stock: 0 - 40

use std::env;
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use stocktag_core::{BarcodeSource, NewProduct, Symbology};
use stocktag_store::{InventoryService, SqliteStore, StoreConfig};

/// Product categories for realistic demo data
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "CMP",
        "Computers",
        &[
            "Gaming Laptop",
            "Ultrabook 14",
            "Desktop Tower",
            "4K Monitor",
            "Curved Monitor",
            "USB-C Dock",
            "Mini PC",
            "Workstation",
        ],
    ),
    (
        "ACC",
        "Accessories",
        &[
            "Wireless Mouse",
            "Mechanical Keyboard",
            "Laptop Stand",
            "HDMI Cable",
            "USB-C Cable",
            "Webcam HD",
            "Mouse Pad XL",
            "Laptop Sleeve",
        ],
    ),
    (
        "AUD",
        "Audio",
        &[
            "Wireless Headset",
            "Studio Headphones",
            "Bluetooth Speaker",
            "USB Microphone",
            "Earbuds Pro",
            "Soundbar",
        ],
    ),
    (
        "STO",
        "Storage",
        &[
            "SSD 1TB",
            "SSD 2TB",
            "NVMe 512GB",
            "Flash Drive 64GB",
            "External HDD 4TB",
            "MicroSD 256GB",
        ],
    ),
];

const SUPPLIERS: &[&str] = &["TechSupply Co", "Nordic Parts", "Acme Wholesale"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 60;
    let mut db_path = String::from("./stocktag_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("StockTag Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 60)");
                println!("  -d, --db <PATH>    Database file path (default: ./stocktag_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 StockTag Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let store = SqliteStore::connect(StoreConfig::new(&db_path)).await?;
    let inventory = InventoryService::new(Arc::new(store));

    println!("✓ Connected to document store");

    // Check existing products
    let existing = inventory.get_all_products().await?.len();
    if existing > 0 {
        println!("⚠ Store already has {} active products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_code, category_name, names) in CATEGORIES {
        for (idx, name) in names.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let input = generate_product(category_code, category_name, name, generated + idx);
            let sku = input.sku.clone();
            if let Err(e) = inventory.add_product(input).await {
                eprintln!("Failed to insert {}: {}", sku, e);
                continue;
            }

            generated += 1;
            if generated % 20 == 0 {
                println!("  Generated {} products...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Verify the service sees what we wrote
    let summary = inventory.get_inventory_summary().await?;
    info!(
        total = summary.total_products,
        value_cents = summary.total_value_cents,
        "Seed summary"
    );
    println!();
    println!("  Active products: {}", summary.total_products);
    println!(
        "  Inventory value: ${:.2}",
        summary.total_value_cents as f64 / 100.0
    );
    println!("  Low stock:       {}", summary.low_stock_products);
    println!("  Out of stock:    {}", summary.out_of_stock_products);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(category_code: &str, category: &str, name: &str, seed: usize) -> NewProduct {
    let mut rng = rand::thread_rng();

    let sku = format!("{}-{:03}", category_code, seed);

    // Base $4.99-$299.99, cost at 55-80% of price
    let price_cents: i64 = rng.gen_range(499..=29_999);
    let cost_cents = price_cents * rng.gen_range(55..=80) / 100;

    NewProduct {
        name: name.to_string(),
        sku: sku.clone(),
        description: Some(format!("{} ({})", name, category)),
        price_cents,
        cost_cents,
        category: category.to_string(),
        supplier: Some(SUPPLIERS[seed % SUPPLIERS.len()].to_string()),
        barcode_type: Symbology::Code128,
        // Explicit so reruns in the same millisecond cannot collide
        barcode_data: Some(format!("{}-{:06}", sku, seed)),
        barcode_source: BarcodeSource::Internal,
        stock: rng.gen_range(0..=40),
        min_stock: 3,
        max_stock: 50,
        location: Some(format!("Aisle {}", (seed % 9) + 1)),
    }
}
