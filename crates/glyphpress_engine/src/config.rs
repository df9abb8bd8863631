//! Engine configuration.
//!
//! Every knob is optional and defaults to the stock preset. Configuration is
//! plain data: it can be built in code or loaded once at startup from a TOML
//! file. Validation happens when an engine is constructed, never at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::style::Color;

/// Full configuration for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    /// Text content of the animated block.
    pub text: String,
    /// Font family name the backend should resolve.
    pub font_family: String,
    /// Font asset reference handed through to the backend.
    pub font_url: String,
    /// Enable the stretch (width) axis.
    pub width: bool,
    /// Enable the weight (boldness) axis.
    pub weight: bool,
    /// Enable the slant (italic) axis.
    pub italic: bool,
    /// Enable the opacity (alpha) axis.
    pub alpha: bool,
    /// Even-spacing layout mode.
    pub flex: bool,
    /// Outline rendering mode: a stroked duplicate layer behind each glyph.
    pub stroke: bool,
    /// Vertical-fit: rescale the block to exactly fill the container height.
    pub scale: bool,
    /// Fill color for the primary glyph layer.
    pub text_color: Color,
    /// Stroke color for the outline layer.
    pub stroke_color: Color,
    /// Stroke width for the outline layer, in pixels.
    pub stroke_width: f32,
    /// Lower clamp for the fitted base font size, in pixels.
    pub min_font_size: f32,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            text: "Compressa".to_string(),
            font_family: "Compressa VF".to_string(),
            font_url:
                "https://res.cloudinary.com/dr6lvwubh/raw/upload/v1529908256/CompressaPRO-GX.woff2"
                    .to_string(),
            width: true,
            weight: true,
            italic: true,
            alpha: false,
            flex: true,
            stroke: false,
            scale: false,
            text_color: Color::WHITE,
            stroke_color: Color::RED,
            stroke_width: 2.0,
            min_font_size: 24.0,
        }
    }
}

impl PressureConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a knob is outside its
    /// legal domain. An empty `text` is legal: the engine renders nothing
    /// until text arrives.
    pub fn validate(&self) -> EngineResult<()> {
        if self.font_family.is_empty() {
            return Err(EngineError::InvalidConfig(
                "font_family must not be empty".to_string(),
            ));
        }
        if !(self.min_font_size > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "min_font_size must be positive, got {}",
                self.min_font_size
            )));
        }
        if !(self.stroke_width >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "stroke_width must not be negative, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigParse`] on malformed TOML and
    /// [`EngineError::InvalidConfig`] on validation failure.
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| EngineError::ConfigParse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigIo`] when the file cannot be read, plus
    /// everything [`Self::from_toml_str`] can return.
    pub fn from_toml(path: &str) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| EngineError::ConfigParse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_preset() {
        let config = PressureConfig::default();

        assert_eq!(config.text, "Compressa");
        assert!(config.width && config.weight && config.italic);
        assert!(!config.alpha);
        assert!(config.flex);
        assert!(!config.stroke && !config.scale);
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.stroke_color, Color::RED);
        assert_eq!(config.stroke_width, 2.0);
        assert_eq!(config.min_font_size, 24.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_knobs() {
        let mut config = PressureConfig {
            min_font_size: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.min_font_size = 24.0;
        config.stroke_width = -1.0;
        assert!(config.validate().is_err());

        config.stroke_width = 0.0;
        config.font_family.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let config = PressureConfig::from_toml_str(
            r##"
            text = "StarScope"
            min_font_size = 120.0
            scale = true
            text_color = "#FFFFFF"
            "##,
        )
        .unwrap();

        assert_eq!(config.text, "StarScope");
        assert_eq!(config.min_font_size, 120.0);
        assert!(config.scale);
        // Untouched knobs keep their defaults
        assert!(config.width);
        assert!(!config.alpha);
    }

    #[test]
    fn test_from_toml_str_rejects_malformed() {
        assert!(PressureConfig::from_toml_str("text = ").is_err());
        assert!(PressureConfig::from_toml_str("min_font_size = -4.0").is_err());
    }
}
