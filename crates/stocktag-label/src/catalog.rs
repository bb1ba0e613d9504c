//! # Catalog Generator
//!
//! Batch generation: one barcode artifact per product, laid out across
//! paginated printable pages.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product Catalog                                            Page 1     │
//! │                                                                         │
//! │  ┌──────────┐  Gaming Laptop                                            │
//! │  │ ▌▌▌ ▌▌▌ │  SKU: LAP-001                                             │
//! │  └──────────┘  $1299.00 - Computers                                     │
//! │                4007817327326                                            │
//! │  ┌──────────┐  Wireless Mouse                        (8 rows per page,  │
//! │  │ ▌▌ ▌ ▌▌ │  ...                                    then add_page)    │
//! │  └──────────┘                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layout is a pure function of input order: identical products in
//! identical order always land at identical positions. A product whose
//! code cannot be rendered still occupies its row and yields an invalid
//! result; the batch continues.

use tracing::info;

use stocktag_core::{symbology, BarcodeResult, Product};

use crate::error::LabelResult;
use crate::generate::LabelService;
use crate::raster::{DocumentCanvas, Rasterizer};

// =============================================================================
// Layout Constants
// =============================================================================

/// Rows on a page before a page break.
pub const PRODUCTS_PER_PAGE: usize = 8;

const TITLE: &str = "Product Catalog";
const HEADER_Y: u32 = 10;
const PAGE_NUMBER_X: u32 = 170;
const FIRST_ROW_Y: u32 = 22;
const ROW_HEIGHT: u32 = 32;
const IMAGE_X: u32 = 10;
const IMAGE_W: u32 = 60;
const IMAGE_H: u32 = 20;
const TEXT_X: u32 = 80;

// =============================================================================
// CatalogGenerator
// =============================================================================

/// Composes a multi-page product catalog document.
#[derive(Debug, Clone)]
pub struct CatalogGenerator<R: Rasterizer> {
    labels: LabelService<R>,
}

impl<R: Rasterizer> CatalogGenerator<R> {
    pub fn new(labels: LabelService<R>) -> Self {
        CatalogGenerator { labels }
    }

    /// Generates one artifact per product, in input order, and emits
    /// the paginated document saved as `catalog.pdf`.
    ///
    /// Products without a barcode value get a synthesized sample for
    /// their declared symbology.
    pub async fn generate_catalog(
        &self,
        products: &[Product],
        canvas: &mut dyn DocumentCanvas,
    ) -> LabelResult<Vec<BarcodeResult>> {
        canvas.add_text(TITLE, IMAGE_X, HEADER_Y)?;
        canvas.add_text("Page 1", PAGE_NUMBER_X, HEADER_Y)?;

        let mut results = Vec::with_capacity(products.len());

        for (index, product) in products.iter().enumerate() {
            if index > 0 && index % PRODUCTS_PER_PAGE == 0 {
                canvas.add_page()?;
                let page = index / PRODUCTS_PER_PAGE + 1;
                canvas.add_text(&format!("Page {}", page), PAGE_NUMBER_X, HEADER_Y)?;
            }

            let slot = (index % PRODUCTS_PER_PAGE) as u32;
            let y = FIRST_ROW_Y + slot * ROW_HEIGHT;

            let data = if product.barcode_data.trim().is_empty() {
                symbology::generate_sample(product.barcode_type)
            } else {
                product.barcode_data.clone()
            };

            let result = self
                .labels
                .generate(
                    &data,
                    product.barcode_type,
                    product.barcode_source,
                    Some(product.id.clone()),
                )
                .await;

            match &result.image {
                Some(image) => canvas.add_image(image, IMAGE_X, y, IMAGE_W, IMAGE_H)?,
                None => canvas.add_text("(code unavailable)", IMAGE_X, y)?,
            }
            canvas.add_text(&product.name, TEXT_X, y)?;
            canvas.add_text(&format!("SKU: {}", product.sku), TEXT_X, y + 6)?;
            canvas.add_text(
                &format!(
                    "${:.2} - {}",
                    product.price_cents as f64 / 100.0,
                    product.category
                ),
                TEXT_X,
                y + 12,
            )?;
            canvas.add_text(&result.data, TEXT_X, y + 18)?;

            results.push(result);
        }

        canvas.save("catalog.pdf")?;
        info!(
            products = products.len(),
            pages = products.len().div_ceil(PRODUCTS_PER_PAGE).max(1),
            "Catalog document saved"
        );
        Ok(results)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use crate::raster::MockRasterizer;
    use chrono::Utc;
    use std::sync::Arc;
    use stocktag_core::{BarcodeSource, Symbology};

    #[derive(Debug, PartialEq)]
    enum Op {
        Text(String, u32, u32),
        Image(u32, u32),
        Page,
        Save(String),
    }

    /// Records every placement so layout can be asserted.
    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl DocumentCanvas for RecordingCanvas {
        fn add_text(&mut self, text: &str, x: u32, y: u32) -> Result<(), CanvasError> {
            self.ops.push(Op::Text(text.to_string(), x, y));
            Ok(())
        }

        fn add_image(
            &mut self,
            _png: &str,
            x: u32,
            y: u32,
            _w: u32,
            _h: u32,
        ) -> Result<(), CanvasError> {
            self.ops.push(Op::Image(x, y));
            Ok(())
        }

        fn add_page(&mut self) -> Result<(), CanvasError> {
            self.ops.push(Op::Page);
            Ok(())
        }

        fn save(&mut self, file_name: &str) -> Result<(), CanvasError> {
            self.ops.push(Op::Save(file_name.to_string()));
            Ok(())
        }
    }

    fn product(index: usize, barcode: &str) -> Product {
        Product {
            id: format!("prod-{}", index),
            name: format!("Product {}", index),
            sku: format!("SKU-{:03}", index),
            description: None,
            price_cents: 1999,
            cost_cents: 1000,
            category: "General".to_string(),
            supplier: None,
            barcode_type: Symbology::Code128,
            barcode_data: barcode.to_string(),
            barcode_source: BarcodeSource::Internal,
            stock: 1,
            min_stock: 0,
            max_stock: 10,
            location: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn generator(rasterizer: MockRasterizer) -> CatalogGenerator<MockRasterizer> {
        CatalogGenerator::new(LabelService::new(Arc::new(rasterizer)))
    }

    #[tokio::test]
    async fn test_seventeen_products_make_three_pages() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .times(17)
            .returning(|_, _| Ok("png".to_string()));

        let products: Vec<Product> = (0..17)
            .map(|i| product(i, &format!("CODE-{:03}", i)))
            .collect();
        let mut canvas = RecordingCanvas::default();

        let results = generator(rasterizer)
            .generate_catalog(&products, &mut canvas)
            .await
            .unwrap();

        // One result per product, in input order
        assert_eq!(results.len(), 17);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.product_id.as_deref(), Some(format!("prod-{}", i).as_str()));
            assert!(result.is_valid);
        }

        // 8 + 8 + 1 layout: two page breaks
        let pages = canvas.ops.iter().filter(|op| **op == Op::Page).count();
        assert_eq!(pages, 2);

        // Every page carries its number header
        for page in 1..=3 {
            let header = format!("Page {}", page);
            assert!(canvas
                .ops
                .iter()
                .any(|op| matches!(op, Op::Text(t, _, _) if t == &header)));
        }

        assert_eq!(canvas.ops.last(), Some(&Op::Save("catalog.pdf".to_string())));
    }

    #[tokio::test]
    async fn test_rows_restart_at_top_of_each_page() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Ok("png".to_string()));

        let products: Vec<Product> = (0..9)
            .map(|i| product(i, &format!("CODE-{:03}", i)))
            .collect();
        let mut canvas = RecordingCanvas::default();

        generator(rasterizer)
            .generate_catalog(&products, &mut canvas)
            .await
            .unwrap();

        let image_rows: Vec<u32> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(_, y) => Some(*y),
                _ => None,
            })
            .collect();

        assert_eq!(image_rows.len(), 9);
        assert_eq!(image_rows[0], FIRST_ROW_Y);
        assert_eq!(image_rows[7], FIRST_ROW_Y + 7 * ROW_HEIGHT);
        // The 9th product opens page 2 at the top row
        assert_eq!(image_rows[8], FIRST_ROW_Y);
    }

    #[tokio::test]
    async fn test_missing_barcode_is_synthesized() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .withf(|data, _| data == "SAMPLE123")
            .times(1)
            .returning(|_, _| Ok("png".to_string()));

        let products = vec![product(0, "")];
        let mut canvas = RecordingCanvas::default();

        let results = generator(rasterizer)
            .generate_catalog(&products, &mut canvas)
            .await
            .unwrap();

        assert_eq!(results[0].data, "SAMPLE123");
        assert!(results[0].is_valid);
    }

    #[tokio::test]
    async fn test_bad_product_does_not_stop_the_batch() {
        let mut rasterizer = MockRasterizer::new();
        // Only the two valid codes reach the rasterizer
        rasterizer
            .expect_rasterize()
            .times(2)
            .returning(|_, _| Ok("png".to_string()));

        let mut broken = product(1, "123");
        broken.barcode_type = Symbology::Ean13;
        let products = vec![product(0, "GOOD-0"), broken, product(2, "GOOD-2")];
        let mut canvas = RecordingCanvas::default();

        let results = generator(rasterizer)
            .generate_catalog(&products, &mut canvas)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_valid);
        assert!(!results[1].is_valid);
        assert!(results[2].is_valid);

        // The broken row shows a placeholder instead of an image
        assert!(canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(t, _, _) if t == "(code unavailable)")));
        assert_eq!(canvas.ops.last(), Some(&Op::Save("catalog.pdf".to_string())));
    }

    #[tokio::test]
    async fn test_layout_is_deterministic() {
        let products: Vec<Product> = (0..5)
            .map(|i| product(i, &format!("CODE-{:03}", i)))
            .collect();

        let mut first = RecordingCanvas::default();
        let mut second = RecordingCanvas::default();

        for canvas in [&mut first, &mut second] {
            let mut rasterizer = MockRasterizer::new();
            rasterizer
                .expect_rasterize()
                .returning(|_, _| Ok("png".to_string()));
            generator(rasterizer)
                .generate_catalog(&products, canvas)
                .await
                .unwrap();
        }

        assert_eq!(first.ops, second.ops);
    }
}
