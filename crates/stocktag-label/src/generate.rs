//! # Label Service
//!
//! Single-code generation: validate, rasterize, wrap in a result.
//!
//! ## Never-Throws Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      generate(data, symbology)                          │
//! │                                                                         │
//! │  validate ──fail──▶ BarcodeResult { is_valid: false,                    │
//! │     │                               error: validator message,           │
//! │     ok                              image: None }                       │
//! │     ▼                                                                   │
//! │  rasterize ─fail──▶ BarcodeResult { is_valid: false,                    │
//! │     │                               error: technical message }          │
//! │     ok                                                                  │
//! │     ▼                                                                   │
//! │  BarcodeResult { is_valid: true, image: Some(base64 PNG) }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document-producing paths (`generate_pdf`, `generate_qr`) DO
//! return errors: a canvas that cannot save has no degraded outcome to
//! offer.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use stocktag_core::{symbology, BarcodeResult, BarcodeSource, Symbology};

use crate::error::{LabelError, LabelResult};
use crate::raster::{DocumentCanvas, QrOptions, RasterOptions, Rasterizer};

// =============================================================================
// LabelService
// =============================================================================

/// Code generation over an external rasterizer.
#[derive(Debug)]
pub struct LabelService<R: Rasterizer> {
    rasterizer: Arc<R>,
}

impl<R: Rasterizer> Clone for LabelService<R> {
    fn clone(&self) -> Self {
        LabelService {
            rasterizer: Arc::clone(&self.rasterizer),
        }
    }
}

impl<R: Rasterizer> LabelService<R> {
    pub fn new(rasterizer: Arc<R>) -> Self {
        LabelService { rasterizer }
    }

    /// Generates one barcode artifact. Never fails: validation and
    /// rasterizer problems are reported through `is_valid` and `error`.
    pub async fn generate(
        &self,
        data: &str,
        barcode_type: Symbology,
        source: BarcodeSource,
        product_id: Option<String>,
    ) -> BarcodeResult {
        if let Err(err) = symbology::validate(data, barcode_type) {
            debug!(data, %barcode_type, error = %err, "Rejected barcode data");
            return self.invalid(data, barcode_type, source, product_id, err.to_string());
        }

        let options = RasterOptions::for_symbology(barcode_type);
        match self.rasterizer.rasterize(data, &options).await {
            Ok(image) => BarcodeResult {
                id: Uuid::new_v4().to_string(),
                product_id,
                barcode_type,
                data: data.to_string(),
                image: Some(image),
                generated_at: Utc::now(),
                is_valid: true,
                error: None,
                source,
            },
            Err(err) => {
                warn!(data, %barcode_type, error = %err, "Rasterizer failed");
                self.invalid(data, barcode_type, source, product_id, err.to_string())
            }
        }
    }

    /// Generates a code and emits it as a single-page document saved as
    /// `barcode.pdf`.
    pub async fn generate_pdf(
        &self,
        data: &str,
        barcode_type: Symbology,
        source: BarcodeSource,
        canvas: &mut dyn DocumentCanvas,
    ) -> LabelResult<BarcodeResult> {
        let result = self.generate(data, barcode_type, source, None).await;

        canvas.add_text(&format!("{}: {}", barcode_type, result.data), 10, 10)?;
        if let Some(image) = &result.image {
            canvas.add_image(image, 10, 20, 100, 40)?;
        }
        canvas.save("barcode.pdf")?;

        Ok(result)
    }

    /// Emits a QR code for an arbitrary resource string as a
    /// single-page document saved as `qr_code.pdf`.
    ///
    /// The only input rule is non-emptiness; QR payloads are free text.
    pub async fn generate_qr(
        &self,
        resource: &str,
        canvas: &mut dyn DocumentCanvas,
    ) -> LabelResult<()> {
        if resource.trim().is_empty() {
            return Err(LabelError::EmptyInput);
        }

        let image = self
            .rasterizer
            .rasterize_qr(resource, &QrOptions::default())
            .await?;

        canvas.add_text("Scan the QR code:", 10, 10)?;
        canvas.add_image(&image, 10, 20, 50, 50)?;
        canvas.save("qr_code.pdf")?;

        debug!(resource, "QR document saved");
        Ok(())
    }

    fn invalid(
        &self,
        data: &str,
        barcode_type: Symbology,
        source: BarcodeSource,
        product_id: Option<String>,
        error: String,
    ) -> BarcodeResult {
        BarcodeResult {
            id: Uuid::new_v4().to_string(),
            product_id,
            barcode_type,
            data: data.to_string(),
            image: None,
            generated_at: Utc::now(),
            is_valid: false,
            error: Some(error),
            source,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use crate::raster::{MockDocumentCanvas, MockRasterizer};
    use mockall::predicate::eq;

    fn service(rasterizer: MockRasterizer) -> LabelService<MockRasterizer> {
        LabelService::new(Arc::new(rasterizer))
    }

    #[tokio::test]
    async fn test_generate_valid_code_carries_image() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .withf(|data, options| data == "4007817327326" && options.format == "EAN13")
            .returning(|_, _| Ok("iVBORfake".to_string()));

        let result = service(rasterizer)
            .generate(
                "4007817327326",
                Symbology::Ean13,
                BarcodeSource::Commercial,
                Some("prod-1".to_string()),
            )
            .await;

        assert!(result.is_valid);
        assert_eq!(result.image.as_deref(), Some("iVBORfake"));
        assert_eq!(result.product_id.as_deref(), Some("prod-1"));
        assert!(result.error.is_none());
        assert!(!result.id.is_empty());
    }

    #[tokio::test]
    async fn test_generate_invalid_data_skips_rasterizer() {
        // No expectation set: a rasterize call would panic the mock
        let result = service(MockRasterizer::new())
            .generate("123", Symbology::Ean13, BarcodeSource::Internal, None)
            .await;

        assert!(!result.is_valid);
        assert!(result.image.is_none());
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_generate_rasterizer_failure_degrades() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Err(RasterError("out of memory".to_string())));

        let result = service(rasterizer)
            .generate("SAMPLE123", Symbology::Code128, BarcodeSource::Sample, None)
            .await;

        assert!(!result.is_valid);
        assert!(result.error.as_deref().unwrap_or("").contains("out of memory"));
    }

    #[tokio::test]
    async fn test_generate_qr_rejects_empty_input() {
        let mut canvas = MockDocumentCanvas::new();
        canvas.expect_save().times(0);

        let err = service(MockRasterizer::new())
            .generate_qr("   ", &mut canvas)
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::EmptyInput));
    }

    #[tokio::test]
    async fn test_generate_qr_layout_and_file_name() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize_qr()
            .withf(|data, options| data == "https://example.com/p/1" && options.width == 200)
            .returning(|_, _| Ok("qrpng".to_string()));

        let mut canvas = MockDocumentCanvas::new();
        canvas
            .expect_add_text()
            .with(eq("Scan the QR code:"), eq(10), eq(10))
            .times(1)
            .returning(|_, _, _| Ok(()));
        canvas
            .expect_add_image()
            .with(eq("qrpng"), eq(10), eq(20), eq(50), eq(50))
            .times(1)
            .returning(|_, _, _, _, _| Ok(()));
        canvas
            .expect_save()
            .with(eq("qr_code.pdf"))
            .times(1)
            .returning(|_| Ok(()));

        service(rasterizer)
            .generate_qr("https://example.com/p/1", &mut canvas)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_generate_pdf_saves_single_page() {
        let mut rasterizer = MockRasterizer::new();
        rasterizer
            .expect_rasterize()
            .returning(|_, _| Ok("png".to_string()));

        let mut canvas = MockDocumentCanvas::new();
        canvas.expect_add_text().returning(|_, _, _| Ok(()));
        canvas
            .expect_add_image()
            .times(1)
            .returning(|_, _, _, _, _| Ok(()));
        canvas
            .expect_save()
            .with(eq("barcode.pdf"))
            .times(1)
            .returning(|_| Ok(()));

        let result = service(rasterizer)
            .generate_pdf(
                "SAMPLE123",
                Symbology::Code128,
                BarcodeSource::Internal,
                &mut canvas,
            )
            .await
            .unwrap();
        assert!(result.is_valid);
    }
}
