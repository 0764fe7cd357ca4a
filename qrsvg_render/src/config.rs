//! Display parameters loaded from a TOML file.
//!
//! ```toml
//! [display]
//! size = 256
//! bg_color = "white"
//! fg_color = "#1a1a1a"
//! ecl = "H"
//! version = 6
//!
//! [logo]
//! href = "logo.png"
//! width = "20%"
//! centerized = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use qrsvg_core::{Ecl, Version};

use crate::encode::Payload;
use crate::logo::LogoSpec;
use crate::props::{Props, Size};
use crate::Color;

/// Name of the file read by [RenderConfig::load_or_default].
pub const DEFAULT_CONFIG_FILE: &str = "qrsvg.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub display: DisplayConfig,
    pub logo: Option<LogoSpec>,
}

/// Everything about the drawing except the value and the logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub size: Size,
    pub bg_color: Color,
    pub fg_color: Color,
    pub ecl: Option<Ecl>,
    pub version: Option<Version>,
    /// Pack text into bytes before encoding it.
    pub legacy_bytes: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            size: Size::default(),
            bg_color: Color::transparent(),
            fg_color: Color::black(),
            ecl: None,
            version: None,
            legacy_bytes: false,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from [DEFAULT_CONFIG_FILE] in the current directory, or return the default configuration
    /// if the file is missing or invalid.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring {}: {}", DEFAULT_CONFIG_FILE, err);
                Self::default()
            }
        }
    }

    /// Build the display parameters for `value`.
    pub fn props<T: Into<Payload>>(&self, value: T) -> Props {
        let display = &self.display;
        let mut props = Props::new(value)
            .with_size(display.size.clone())
            .with_bg_color(display.bg_color.clone())
            .with_fg_color(display.fg_color.clone());
        props.ecl = display.ecl;
        props.version = display.version;
        if let Some(logo) = &self.logo {
            props = props.with_logo(logo.clone());
        }
        props
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::logo::Length;

    #[test]
    fn test_empty_config_is_default() {
        let config = RenderConfig::from_toml("").unwrap();
        assert_eq!(config, RenderConfig::default());
        let props = config.props("hello");
        assert_eq!(props.size, Size::Px(128.0));
        assert_eq!(props.bg_color, Color::transparent());
        assert!(props.logo.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = RenderConfig::from_toml(
            r##"
            [display]
            size = 256
            bg_color = "White"
            fg_color = [16, 32, 48, 255]
            ecl = "H"
            version = 6
            legacy_bytes = true

            [logo]
            href = "logo.png"
            width = "20%"
            height = 40
            centerized = true
            "##,
        )
        .unwrap();
        assert_eq!(config.display.size, Size::Px(256.0));
        assert_eq!(config.display.fg_color, Color::Rgba([16, 32, 48, 255]));
        assert_eq!(config.display.ecl, Some(Ecl::H));
        assert_eq!(config.display.version, Some(Version::V06));
        assert!(config.display.legacy_bytes);

        let props = config.props("hello");
        let logo = props.logo.unwrap();
        assert_eq!(logo.width, Some(Length::Text("20%".into())));
        assert_eq!(logo.height, Some(Length::Px(40.0)));
        assert_eq!(logo.centerized, Some(true));
        assert_eq!(logo.as_background, None);
    }

    #[test]
    fn test_size_as_string() {
        let config = RenderConfig::from_toml("[display]\nsize = \"300px\"").unwrap();
        assert_eq!(config.display.size.coerce(), Some(300));
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let err = RenderConfig::from_toml("[display]\nversion = 41").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_logo_requires_href() {
        let err = RenderConfig::from_toml("[logo]\nwidth = \"20%\"\ncenterized = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("href"));

        let config = RenderConfig::from_toml("[logo]\nhref = \"logo.png\"").unwrap();
        assert_eq!(config.logo, Some(LogoSpec::new("logo.png")));
    }

    #[test]
    fn test_missing_file() {
        let err = RenderConfig::load_from_file("/nonexistent/qrsvg.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
