// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the demo scenes and writes the screen, thumbnails and PDF to disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use canopy_app::{Application, CanopyConfig, demo};

fn write(dir: &Path, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let path = dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = CanopyConfig::path_from_env();
    let mut config = CanopyConfig::load_or_default(&path)?;
    config.merge_with_env();

    let mut app = Application::init(&config).context("initializing surfaces")?;
    app.add_scene(demo::gallery_scene())?;
    // Added last, so it is the active scene.
    app.add_scene(demo::demo_scene())?;

    let dir = config.output.dir.as_path();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let screen = app.screen();
    write(dir, "screen.png", &screen.to_png()?)?;
    for (n, (id, thumbnail)) in app.thumbnails().iter().enumerate() {
        log::debug!("thumbnail {n} is scene {}", id.0);
        write(dir, &format!("thumbnail-{n}.png"), &thumbnail.to_png()?)?;
    }

    let pdf = app.export_pdf()?;
    write(dir, &pdf.file_name, &pdf.bytes)?;

    #[cfg(feature = "skia")]
    {
        let skia = canopy_app::skia::render_screen(&config.canvas, app.scenes().active())?;
        write(dir, "skia.png", &skia.to_png()?)?;
        let report = canopy_app::diff_images(&screen, &skia, 16)?;
        log::info!(
            "Skia and Vello CPU differ in {} pixel(s)",
            report.differing
        );
        write(dir, "diff.png", &report.highlight.to_png()?)?;
    }

    Ok(())
}
