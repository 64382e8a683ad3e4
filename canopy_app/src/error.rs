// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_surface::SurfaceError;
use canopy_surface_pdf::PdfError;
use canopy_surface_vello_cpu::RasterError;

use crate::config::ConfigError;

/// Errors surfaced by the application layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Loading or validating configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A raster surface could not be acquired.
    #[error("raster surface: {0}")]
    Raster(#[from] RasterError),
    /// An intermediate image could not be drawn.
    #[error("surface: {0}")]
    Surface(#[from] SurfaceError),
    /// PDF export failed.
    #[error("PDF export: {0}")]
    Pdf(#[from] PdfError),
    /// The Skia comparison surface failed.
    #[cfg(feature = "skia")]
    #[error("Skia: {0}")]
    Skia(#[from] canopy_surface_skia::SkiaError),
    /// PNG encoding failed.
    #[error("PNG encoding: {0}")]
    Png(#[from] png::EncodingError),
    /// Two images that must match in size do not.
    #[error("image sizes differ: {left:?} vs {right:?}")]
    SizeMismatch {
        /// Size of the first image.
        left: (u32, u32),
        /// Size of the second image.
        right: (u32, u32),
    },
    /// Writing output failed.
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
