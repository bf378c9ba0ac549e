// specter-core/src/document.rs
//! Loading image-backed documents and driving them through the engine.
//!
//! A document is an ordered list of page images. Raster image files are
//! loaded directly through the `image` crate; PDF conversion is delegated
//! to an external [`PageRasterizer`] collaborator, and any conversion
//! failure surfaces as a single "cannot convert document" error.
//!
//! License: MIT OR APACHE 2.0

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use log::{debug, warn};

use crate::engine::{Engine, PageOutcome};
use crate::errors::SpecterError;
use crate::ocr::OcrProvider;
use crate::render::{redact_page, RenderOutcome, RenderStyle};

/// Raster extensions handled in-process.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "tiff"];

/// External collaborator that converts a document file (e.g. a PDF) into
/// an ordered list of page images.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>, SpecterError>;
}

/// An image-backed document with one raster per page.
#[derive(Debug)]
pub struct Document {
    pub path: PathBuf,
    pub images: Vec<DynamicImage>,
}

impl Document {
    /// Loads a document from disk.
    ///
    /// Image files become single-page documents; `.pdf` files are handed
    /// to the rasterizer when one is available. Missing files, unsupported
    /// extensions, and conversion failures are all fatal for this document
    /// only.
    pub fn load(
        path: &Path,
        rasterizer: Option<&dyn PageRasterizer>,
    ) -> Result<Self, SpecterError> {
        if !path.is_file() {
            return Err(SpecterError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("cannot find file '{}'", path.display()),
            )));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let images = if extension == "pdf" {
            let rasterizer = rasterizer.ok_or_else(|| {
                SpecterError::DocumentConversion(path.display().to_string())
            })?;
            rasterizer
                .rasterize(path)
                .map_err(|_| SpecterError::DocumentConversion(path.display().to_string()))?
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            let image = image::open(path)
                .map_err(|_| SpecterError::DocumentConversion(path.display().to_string()))?;
            vec![image]
        } else {
            return Err(SpecterError::UnsupportedExtension(extension));
        };

        debug!(
            "Loaded document '{}' with {} page(s).",
            path.display(),
            images.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            images,
        })
    }
}

/// The result of processing one page of a document.
pub struct ProcessedPage {
    pub page: u32,
    /// `None` when the page was aborted by a contract violation.
    pub outcome: Option<PageOutcome>,
    /// The page raster with replacements painted over it.
    pub image: RgbaImage,
    pub render: RenderOutcome,
}

/// The result of processing a whole document.
pub struct ProcessedDocument {
    pub path: PathBuf,
    pub pages: Vec<ProcessedPage>,
    pub failed_pages: usize,
}

/// Runs every page of `document` through OCR, the engine, and the
/// renderer.
///
/// A contract violation aborts only the affected page's output; the rest
/// of the document continues. Configuration errors and OCR failures abort
/// the whole document.
pub fn process_document(
    document: &Document,
    engine: &mut Engine,
    provider: &dyn OcrProvider,
    style: &RenderStyle,
) -> Result<ProcessedDocument, SpecterError> {
    let mut pages = Vec::with_capacity(document.images.len());
    let mut failed_pages = 0;

    for (index, image) in document.images.iter().enumerate() {
        let page_number = index as u32;
        let ocr_page = provider.process_image(image, page_number)?;
        let mut raster = image.to_rgba8();

        match engine.process_page(&ocr_page.text, &ocr_page.words) {
            Ok(outcome) => {
                let render = redact_page(&mut raster, &outcome.result.replacements, style);
                pages.push(ProcessedPage {
                    page: page_number,
                    outcome: Some(outcome),
                    image: raster,
                    render,
                });
            }
            Err(error) if !error.is_configuration() => {
                warn!(
                    "Page {} of '{}' aborted: {}. Continuing with next page.",
                    page_number,
                    document.path.display(),
                    error
                );
                failed_pages += 1;
                pages.push(ProcessedPage {
                    page: page_number,
                    outcome: None,
                    image: raster,
                    render: RenderOutcome::default(),
                });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(ProcessedDocument {
        path: document.path.clone(),
        pages,
        failed_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Document::load(Path::new("/nonexistent/page.png"), None).unwrap_err();
        assert!(matches!(err, SpecterError::IoError(_)));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let err = Document::load(file.path(), None).unwrap_err();
        assert!(matches!(err, SpecterError::UnsupportedExtension(ext) if ext == "docx"));
    }

    #[test]
    fn test_pdf_without_rasterizer_cannot_convert() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = Document::load(file.path(), None).unwrap_err();
        assert!(matches!(err, SpecterError::DocumentConversion(_)));
    }

    #[test]
    fn test_image_file_becomes_single_page_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();

        let document = Document::load(&path, None).unwrap();
        assert_eq!(document.images.len(), 1);
    }

    #[test]
    fn test_corrupt_image_cannot_convert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = Document::load(&path, None).unwrap_err();
        assert!(matches!(err, SpecterError::DocumentConversion(_)));
    }
}
