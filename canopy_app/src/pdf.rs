// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::DisplayNode;
use canopy_surface_pdf::{PdfDocument, PdfError};
use canopy_translate::translate;

use crate::config::PdfConfig;

/// MIME type of [`PdfExport::bytes`].
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A finished PDF ready to be written out.
#[derive(Clone, PartialEq, Eq)]
pub struct PdfExport {
    /// The serialized document.
    pub bytes: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
    /// Always [`PDF_MIME_TYPE`].
    pub mime_type: &'static str,
}

impl core::fmt::Debug for PdfExport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PdfExport")
            .field("len", &self.bytes.len())
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Writes scenes to a multi-page PDF, one fixed-size page per scene.
#[derive(Clone, Debug)]
pub struct PdfExporter {
    page_width: f64,
    page_height: f64,
    file_name: String,
}

impl PdfExporter {
    /// An exporter using the page size and file name from `config`.
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            page_width: config.page_width,
            page_height: config.page_height,
            file_name: config.file_name.clone(),
        }
    }

    /// Translates each scene onto its own page, in order.
    pub fn export<'a>(
        &self,
        scenes: impl IntoIterator<Item = &'a DisplayNode>,
    ) -> Result<PdfExport, PdfError> {
        let mut doc = PdfDocument::new(self.page_width, self.page_height)?;
        for scene in scenes {
            let mut page = doc.begin_page();
            translate(&mut page, scene);
            page.finish()?;
        }
        let pages = doc.page_count();
        let bytes = doc.finish()?;
        log::info!(
            "exported {pages} page(s) to {} ({} bytes)",
            self.file_name,
            bytes.len()
        );
        Ok(PdfExport {
            bytes,
            file_name: self.file_name.clone(),
            mime_type: PDF_MIME_TYPE,
        })
    }
}
