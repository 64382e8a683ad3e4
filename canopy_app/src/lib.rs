// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_app --heading-base-level=0

//! Canopy App: surface adapters and a headless application shell.
//!
//! The same [`canopy_translate::translate`] call drives three outputs:
//!
//! - [`ScreenRenderer`]: a persistent raster of the canvas size times the
//!   device pixel ratio.
//! - [`PdfExporter`]: one fixed-size PDF page per scene.
//! - [`ThumbnailRenderer`]: an offscreen render scaled into a small preview.
//!
//! [`Application`] keeps them in step with a [`SceneStore`](canopy_scene::SceneStore).
//!
//! ```
//! use canopy_app::{Application, CanopyConfig, demo};
//!
//! let mut app = Application::init(&CanopyConfig::default())?;
//! app.add_scene(demo::demo_scene())?;
//! app.add_scene(demo::gallery_scene())?;
//! assert_eq!(app.thumbnails().len(), 2);
//!
//! let pdf = app.export_pdf()?;
//! assert_eq!(pdf.mime_type, "application/pdf");
//! # Ok::<(), canopy_app::AppError>(())
//! ```

mod app;
mod error;
mod pdf;
mod raster;
mod screen;
mod thumbnail;

pub mod compare;
pub mod config;
pub mod demo;
#[cfg(feature = "skia")]
pub mod skia;

pub use app::Application;
pub use compare::{DiffReport, diff_images};
pub use config::{CanopyConfig, ConfigError};
pub use error::AppError;
pub use pdf::{PDF_MIME_TYPE, PdfExport, PdfExporter};
pub use raster::RasterImage;
pub use screen::ScreenRenderer;
pub use thumbnail::ThumbnailRenderer;
