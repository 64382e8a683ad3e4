// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application configuration, loaded from `canopy.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file read when `CANOPY_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "canopy.toml";

/// Errors from loading or validating a [`CanopyConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CanopyConfig {
    /// On-screen canvas.
    pub canvas: CanvasConfig,
    /// Thumbnail previews.
    pub thumbnail: ThumbnailConfig,
    /// PDF export.
    pub pdf: PdfConfig,
    /// Where the demo writes its files.
    pub output: OutputConfig,
}

/// On-screen canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f64,
    /// Clear color as `0xRRGGBB`.
    pub background: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            device_pixel_ratio: 1.0,
            background: 0xFF_FF_FF,
        }
    }
}

impl CanvasConfig {
    /// Canvas size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (
            scale_dimension(self.width, self.device_pixel_ratio),
            scale_dimension(self.height, self.device_pixel_ratio),
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "validated sizes and ratios are positive; oversized results are rejected by the raster"
)]
fn scale_dimension(size: u32, ratio: f64) -> u32 {
    (f64::from(size) * ratio).round() as u32
}

/// Thumbnail settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Preview width in pixels.
    pub width: u32,
    /// Preview height in pixels.
    pub height: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 75,
        }
    }
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Page width in points.
    pub page_width: f64,
    /// Page height in points.
    pub page_height: f64,
    /// Name of the exported file.
    pub file_name: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        // A4
        Self {
            page_width: 595.0,
            page_height: 842.0,
            file_name: "output.pdf".to_owned(),
        }
    }
}

/// Output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the demo writes into. Created if missing.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl CanopyConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Load configuration from `path`, or the defaults if it does not exist.
    ///
    /// A file that exists but fails to read or parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// The config file to read: `CANOPY_CONFIG` if set, else [`DEFAULT_CONFIG_FILE`].
    pub fn path_from_env() -> PathBuf {
        std::env::var_os("CANOPY_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Apply overrides from the process environment.
    ///
    /// Environment variables take precedence over file values.
    pub fn merge_with_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ratio) = parse_var(&lookup, "CANOPY_DEVICE_PIXEL_RATIO") {
            self.canvas.device_pixel_ratio = ratio;
        }
        if let Some(width) = parse_var(&lookup, "CANOPY_CANVAS_WIDTH") {
            self.canvas.width = width;
        }
        if let Some(height) = parse_var(&lookup, "CANOPY_CANVAS_HEIGHT") {
            self.canvas.height = height;
        }
        if let Some(dir) = lookup("CANOPY_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
    }

    /// Check that every size is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.canvas.device_pixel_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas.device_pixel_ratio must be finite and positive, got {ratio}"
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.canvas.background > 0xFF_FF_FF {
            return Err(ConfigError::Invalid(format!(
                "canvas.background must be 0xRRGGBB, got {:#x}",
                self.canvas.background
            )));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "thumbnail size must be non-zero, got {}x{}",
                self.thumbnail.width, self.thumbnail.height
            )));
        }
        let (w, h) = (self.pdf.page_width, self.pdf.page_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "PDF page size must be finite and positive, got {w}x{h}"
            )));
        }
        if self.pdf.file_name.is_empty() {
            return Err(ConfigError::Invalid("pdf.file_name is empty".to_owned()));
        }
        Ok(())
    }
}

fn parse_var<T: core::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = CanopyConfig::default();
        assert_eq!((config.canvas.width, config.canvas.height), (400, 300));
        assert_eq!(config.canvas.device_pixel_ratio, 1.0);
        assert_eq!(config.canvas.background, 0xFFFFFF);
        assert_eq!((config.thumbnail.width, config.thumbnail.height), (100, 75));
        assert_eq!((config.pdf.page_width, config.pdf.page_height), (595.0, 842.0));
        assert_eq!(config.pdf.file_name, "output.pdf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_files_keep_other_defaults() {
        let config: CanopyConfig = toml::from_str(
            "[canvas]\ndevice_pixel_ratio = 2.0\n\n[output]\ndir = \"out\"\n",
        )
        .unwrap();
        assert_eq!(config.canvas.device_pixel_ratio, 2.0);
        assert_eq!(config.canvas.width, 400);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.thumbnail, ThumbnailConfig::default());
        assert_eq!(config.canvas.device_size(), (800, 600));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = CanopyConfig::default();
        config.merge_from(env(&[
            ("CANOPY_DEVICE_PIXEL_RATIO", "1.5"),
            ("CANOPY_CANVAS_WIDTH", "640"),
            ("CANOPY_CANVAS_HEIGHT", "not a number"),
            ("CANOPY_OUTPUT_DIR", "/tmp/canopy"),
        ]));
        assert_eq!(config.canvas.device_pixel_ratio, 1.5);
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 300, "bad values are ignored");
        assert_eq!(config.output.dir, PathBuf::from("/tmp/canopy"));
    }

    #[test]
    fn validation_rejects_unusable_sizes() {
        let mut config = CanopyConfig::default();
        config.canvas.device_pixel_ratio = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CanopyConfig::default();
        config.canvas.device_pixel_ratio = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CanopyConfig::default();
        config.thumbnail.height = 0;
        assert!(config.validate().is_err());

        let mut config = CanopyConfig::default();
        config.pdf.page_width = -1.0;
        assert!(config.validate().is_err());

        let mut config = CanopyConfig::default();
        config.canvas.background = 0x1_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CanopyConfig::load_or_default("/nonexistent/canopy.toml").unwrap();
        assert_eq!(config, CanopyConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("canopy-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[canvas]\nwidth = \"wide\"\n").unwrap();
        let result = CanopyConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
