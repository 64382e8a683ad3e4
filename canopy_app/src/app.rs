// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::{DisplayNode, SceneId, SceneStore};

use crate::AppError;
use crate::config::CanopyConfig;
use crate::pdf::{PdfExport, PdfExporter};
use crate::raster::RasterImage;
use crate::screen::ScreenRenderer;
use crate::thumbnail::ThumbnailRenderer;

/// Headless application state: the scene list plus its three outputs.
///
/// Every action that changes the scene list re-renders the screen and the
/// thumbnails, so [`screen`](Self::screen) and
/// [`thumbnails`](Self::thumbnails) always reflect the current store.
#[derive(Debug)]
pub struct Application {
    scenes: SceneStore,
    screen: ScreenRenderer,
    thumbnails: ThumbnailRenderer,
    previews: Vec<(SceneId, RasterImage)>,
    exporter: PdfExporter,
}

impl Application {
    /// Validates `config` and acquires the screen raster.
    pub fn init(config: &CanopyConfig) -> Result<Self, AppError> {
        config.validate()?;
        let screen = ScreenRenderer::new(&config.canvas)?;
        let (width, height) = screen.size();
        log::info!("screen surface ready at {width}x{height} device pixels");
        let thumbnails = ThumbnailRenderer::new(&config.canvas, &config.thumbnail);
        let (width, height) = thumbnails.size();
        log::debug!("thumbnails are {width}x{height}");
        let mut app = Self {
            scenes: SceneStore::new(),
            screen,
            thumbnails,
            previews: Vec::new(),
            exporter: PdfExporter::new(&config.pdf),
        };
        app.render();
        Ok(app)
    }

    /// The stored scenes.
    pub fn scenes(&self) -> &SceneStore {
        &self.scenes
    }

    /// Stores `scene`, makes it active and refreshes every output.
    pub fn add_scene(&mut self, scene: DisplayNode) -> Result<SceneId, AppError> {
        let id = self.scenes.add(scene);
        self.scenes.select(id);
        log::info!("added scene {} ({} total)", id.0, self.scenes.len());
        self.refresh()?;
        Ok(id)
    }

    /// Makes `id` the active scene and redraws the screen.
    ///
    /// Returns `false` if no such scene is stored.
    pub fn select(&mut self, id: SceneId) -> bool {
        if !self.scenes.select(id) {
            log::warn!("cannot select unknown scene {}", id.0);
            return false;
        }
        self.render();
        true
    }

    /// Removes `id` and refreshes every output.
    pub fn remove(&mut self, id: SceneId) -> Result<Option<DisplayNode>, AppError> {
        let removed = self.scenes.remove(id);
        if removed.is_some() {
            log::info!("removed scene {} ({} left)", id.0, self.scenes.len());
            self.refresh()?;
        }
        Ok(removed)
    }

    /// Redraws the active scene, or just the background if there is none.
    pub fn render(&mut self) {
        self.screen.render(self.scenes.active());
    }

    /// The current screen contents.
    pub fn screen(&self) -> RasterImage {
        self.screen.snapshot()
    }

    /// One preview per stored scene, in store order.
    pub fn thumbnails(&self) -> &[(SceneId, RasterImage)] {
        &self.previews
    }

    /// Exports every stored scene, in order, to a PDF.
    pub fn export_pdf(&self) -> Result<PdfExport, AppError> {
        let export = self
            .exporter
            .export(self.scenes.iter().map(|(_, scene)| scene))?;
        Ok(export)
    }

    fn refresh(&mut self) -> Result<(), AppError> {
        self.render();
        let previews = self
            .thumbnails
            .render_all(self.scenes.iter().map(|(_, scene)| scene))?;
        self.previews = self.scenes.iter().map(|(id, _)| id).zip(previews).collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use canopy_scene::ShapeBatchBuilder;

    fn filled(color: u32) -> DisplayNode {
        let mut batch = ShapeBatchBuilder::new();
        batch.begin_fill(color, 1.0).draw_rect(0.0, 0.0, 400.0, 300.0);
        batch.into_node()
    }

    fn small_config() -> CanopyConfig {
        CanopyConfig {
            canvas: CanvasConfig {
                width: 40,
                height: 30,
                ..CanvasConfig::default()
            },
            ..CanopyConfig::default()
        }
    }

    #[test]
    fn init_rejects_invalid_config() {
        let mut config = small_config();
        config.canvas.width = 0;
        assert!(matches!(
            Application::init(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn init_reports_surface_acquisition_failure() {
        let mut config = small_config();
        config.canvas.width = 70_000;
        assert!(matches!(
            Application::init(&config),
            Err(AppError::Raster(_))
        ));
    }

    #[test]
    fn adding_selects_and_refreshes() {
        let mut app = Application::init(&small_config()).unwrap();
        assert_eq!(app.screen().pixel(5, 5), Some([255, 255, 255, 255]));

        let red = app.add_scene(filled(0xFF0000)).unwrap();
        assert_eq!(app.screen().pixel(5, 5), Some([255, 0, 0, 255]));
        let green = app.add_scene(filled(0x00FF00)).unwrap();
        assert_eq!(app.scenes().active_id(), Some(green));
        assert_eq!(app.screen().pixel(5, 5), Some([0, 255, 0, 255]));

        let ids: Vec<_> = app.thumbnails().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![red, green]);

        assert!(app.select(red));
        assert_eq!(app.screen().pixel(5, 5), Some([255, 0, 0, 255]));
        assert!(!app.select(SceneId(99)));
    }

    #[test]
    fn removing_the_last_scene_clears_to_background() {
        let mut app = Application::init(&small_config()).unwrap();
        let id = app.add_scene(filled(0xFF0000)).unwrap();
        assert!(app.remove(id).unwrap().is_some());
        assert!(app.thumbnails().is_empty());
        assert_eq!(app.screen().pixel(5, 5), Some([255, 255, 255, 255]));
        assert!(app.remove(id).unwrap().is_none());
    }
}
