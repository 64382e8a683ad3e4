// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_surface_pdf --heading-base-level=0

//! PDF implementation of the Canopy surface.
//!
//! A [`PdfDocument`] is a sequence of pages of one fixed size. Each call to
//! [`PdfDocument::begin_page`] returns a [`PdfPage`], which implements
//! [`Surface`](canopy_surface::Surface) by appending operators to the page's
//! content stream. [`PdfPage::finish`] commits the page;
//! [`PdfDocument::finish`] serializes the whole document.
//!
//! Shapes become vector paths. Images are embedded as `DeviceRGB` image
//! XObjects with a `DeviceGray` soft mask carrying alpha, and non-opaque
//! colors go through `ExtGState` dictionaries.
//!
//! ```
//! use canopy_surface::{Color, Paint, Rect, Surface};
//! use canopy_surface_pdf::PdfDocument;
//!
//! let mut doc = PdfDocument::new(595.0, 842.0)?;
//! let mut page = doc.begin_page();
//! page.draw_rect(Rect::new(40.0, 40.0, 140.0, 90.0), &Paint::fill(Color::BLACK));
//! page.finish()?;
//! let bytes = doc.finish()?;
//! assert!(bytes.starts_with(b"%PDF-"));
//! # Ok::<(), canopy_surface_pdf::PdfError>(())
//! ```

mod content;
mod page;

pub use page::PdfPage;

use lopdf::{Document, Object, ObjectId, dictionary};

/// Errors from building a PDF document.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Page dimensions must be finite and positive.
    #[error("invalid page size {width}x{height}")]
    InvalidPageSize {
        /// Requested width in points.
        width: f64,
        /// Requested height in points.
        height: f64,
    },
    /// Encoding a content stream or the document failed.
    #[error("failed to encode PDF: {0}")]
    Encode(#[from] lopdf::Error),
}

/// A multi-page PDF document under construction.
pub struct PdfDocument {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    width: f64,
    height: f64,
}

impl core::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pages", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Starts an empty document whose pages are `width` x `height` points.
    pub fn new(width: f64, height: f64) -> Result<Self, PdfError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PdfError::InvalidPageSize { width, height });
        }
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Ok(Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            width,
            height,
        })
    }

    /// Page size in points.
    pub fn page_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Number of finished pages.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Starts a new page. It is added to the document by [`PdfPage::finish`].
    pub fn begin_page(&mut self) -> PdfPage<'_> {
        PdfPage::new(self)
    }

    /// Serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, PdfError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
        log::debug!(
            "serialized PDF with {} page(s), {} bytes",
            self.page_ids.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn add_page(&mut self, page: lopdf::Dictionary) -> ObjectId {
        let id = self.doc.add_object(page);
        self.page_ids.push(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_page_sizes() {
        assert!(PdfDocument::new(0.0, 842.0).is_err());
        assert!(PdfDocument::new(595.0, f64::NAN).is_err());
        assert!(PdfDocument::new(595.0, 842.0).is_ok());
    }

    #[test]
    fn pages_share_the_document_size() {
        let mut doc = PdfDocument::new(595.0, 842.0).unwrap();
        for _ in 0..3 {
            doc.begin_page().finish().unwrap();
        }
        assert_eq!(doc.page_count(), 3);
        let bytes = doc.finish().unwrap();

        let parsed = Document::load_mem(&bytes).unwrap();
        let pages = parsed.get_pages();
        assert_eq!(pages.len(), 3);
        for id in pages.values() {
            let page = parsed.get_dictionary(*id).unwrap();
            let media_box: Vec<f32> = page
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|o| o.as_float().unwrap())
                .collect();
            assert_eq!(media_box, vec![0.0, 0.0, 595.0, 842.0]);
        }
    }

    #[test]
    fn empty_documents_serialize() {
        let doc = PdfDocument::new(595.0, 842.0).unwrap();
        assert_eq!(doc.page_size(), (595.0, 842.0));
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let parsed = Document::load_mem(&bytes).unwrap();
        assert!(parsed.get_pages().is_empty());
    }

    #[test]
    fn unfinished_pages_are_not_added() {
        let mut doc = PdfDocument::new(100.0, 100.0).unwrap();
        drop(doc.begin_page());
        assert_eq!(doc.page_count(), 0);
    }
}
