//! Shared configuration loader for the md2odp toolchain.
//!
//! `defaults/md2odp.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`Md2OdpConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use md2odp::odf::Rect;
use md2odp::{ConvertOptions, ImageBox, LayoutOverrides, RenderOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/md2odp.default.toml");

/// Top-level configuration consumed by md2odp applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Md2OdpConfig {
    pub render: RenderConfig,
    pub insert: InsertConfig,
    pub layout: LayoutConfig,
}

/// How markdown is turned into slides.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub highlight_style: String,
    pub autofit_text: bool,
    pub code_font: String,
    /// Unset masters are not looked up in the template
    pub break_master: Option<String>,
    pub content_master: Option<String>,
}

/// Where new slides go.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertConfig {
    pub page: i64,
}

/// Frame geometry. Unset frames follow the template's master pages.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub image_box: ImageBox,
    pub break_header: Option<Rect>,
    pub header: Option<Rect>,
    pub outline: Option<Rect>,
}

impl From<&Md2OdpConfig> for RenderOptions {
    fn from(config: &Md2OdpConfig) -> Self {
        RenderOptions {
            highlight_style: config.render.highlight_style.clone(),
            autofit_text: config.render.autofit_text,
            code_font: config.render.code_font.clone(),
            break_master: config.render.break_master.clone(),
            content_master: config.render.content_master.clone(),
            layout: LayoutOverrides {
                break_header: config.layout.break_header.clone(),
                header: config.layout.header.clone(),
                outline: config.layout.outline.clone(),
            },
            image_box: config.layout.image_box,
            base_dir: None,
        }
    }
}

impl From<&Md2OdpConfig> for ConvertOptions {
    fn from(config: &Md2OdpConfig) -> Self {
        ConvertOptions {
            render: config.into(),
            page: config.insert.page,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<Md2OdpConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Md2OdpConfig, ConfigError> {
    Loader::new().build()
}
