//! Configuration types for Tessera diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! TOML or any other serde format.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Table-level output options.
//! - [`StyleConfig`] - Default style of abbreviation blocks.
//!
//! # Example
//!
//! ```
//! # use tessera::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().table_class(), "diagram");
//! assert!(config.style().validate().is_ok());
//! ```

use log::warn;
use serde::Deserialize;

use tessera_core::style::{StyleKey, StyleParams};
use tessera_parser::style::is_valid_value;

use crate::{
    error::TesseraError,
    render::{DEFAULT_TABLE_CLASS, RenderOptions},
};

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Builds the [`RenderOptions`] described by this configuration.
    ///
    /// Invalid style defaults are skipped; see [`StyleConfig::block_style`].
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.render.table_class(), self.style.block_style())
    }
}

/// Table-level output options.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// CSS class of the generated `<table>`.
    #[serde(default = "default_table_class")]
    table_class: String,
}

fn default_table_class() -> String {
    DEFAULT_TABLE_CLASS.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_class: default_table_class(),
        }
    }
}

impl RenderConfig {
    pub fn new(table_class: impl Into<String>) -> Self {
        Self {
            table_class: table_class.into(),
        }
    }

    /// Returns the CSS class of the generated table.
    pub fn table_class(&self) -> &str {
        &self.table_class
    }
}

/// Default style of abbreviation blocks.
///
/// Every field is optional. Values follow the same rules as block
/// parameters written in a diagram, and a block's own parameters override
/// these defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    border_color: Option<String>,

    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    text_align: Option<String>,

    #[serde(default)]
    padding: Option<String>,
}

impl StyleConfig {
    /// Returns a copy with `key` set to `value`.
    pub fn with(mut self, key: StyleKey, value: impl Into<String>) -> Self {
        let slot = match key {
            StyleKey::BorderColor => &mut self.border_color,
            StyleKey::BackgroundColor => &mut self.background_color,
            StyleKey::TextAlign => &mut self.text_align,
            StyleKey::Padding => &mut self.padding,
        };
        *slot = Some(value.into());
        self
    }

    fn entries(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        [
            (StyleKey::BorderColor, &self.border_color),
            (StyleKey::BackgroundColor, &self.background_color),
            (StyleKey::TextAlign, &self.text_align),
            (StyleKey::Padding, &self.padding),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value.trim())))
    }

    /// Checks every configured default against the block parameter rules.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidStyle`] for the first rejected value.
    pub fn validate(&self) -> Result<(), TesseraError> {
        match self.entries().find(|(key, value)| !is_valid_value(*key, value)) {
            Some((key, value)) => Err(TesseraError::new_invalid_style(key, value)),
            None => Ok(()),
        }
    }

    /// Returns the valid defaults as block style parameters.
    ///
    /// Rejected values are logged and left out.
    pub fn block_style(&self) -> StyleParams {
        let mut params = StyleParams::new();
        for (key, value) in self.entries() {
            if is_valid_value(key, value) {
                params.insert(key, value);
            } else {
                warn!(key:% = key, value; "Ignoring invalid style default");
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.render().table_class(), DEFAULT_TABLE_CLASS);
        assert!(config.style().block_style().is_empty());
    }

    #[test]
    fn test_deserialize_toml() {
        let config: AppConfig = toml::from_str(
            r##"
            [render]
            table_class = "wiki-diagram"

            [style]
            background_color = "#eee"
            padding = "2px 4px"
            "##,
        )
        .unwrap();

        assert_eq!(config.render().table_class(), "wiki-diagram");
        assert!(config.style().validate().is_ok());
        assert_eq!(
            config.render_options().block_style().to_css(),
            "background-color: #eee; padding: 2px 4px;"
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[style]\ntext_align = \"left\"\n").unwrap();
        assert_eq!(config.render().table_class(), DEFAULT_TABLE_CLASS);
    }

    #[test]
    fn test_invalid_default_is_rejected_and_skipped() {
        let style = StyleConfig::default()
            .with(StyleKey::TextAlign, "middle")
            .with(StyleKey::BorderColor, "red");

        assert!(matches!(
            style.validate(),
            Err(TesseraError::InvalidStyle {
                key: StyleKey::TextAlign,
                ..
            })
        ));
        assert_eq!(style.block_style().to_css(), "border-color: red;");
    }
}
