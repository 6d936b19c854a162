//! Settings loading and validation.
//!
//! All tunables live in a single `config.toml` loaded once at process start.
//! Settings are immutable for the lifetime of the process; every component
//! receives them by reference instead of reading ambient global state.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_directory = "resized"   # Where converted images are written
//! allowed_extensions = [".jpg", ".jpeg", ".png", ".gif", ".bmp"]
//! max_file_size = 52428800       # Source size ceiling in bytes (50MB)
//!
//! [target_size]
//! width = 512                    # Output square edge length
//! height = 512
//!
//! [padding_color]
//! r = 0                          # Fill for unused canvas area in fit mode
//! g = 0
//! b = 0
//! a = 255
//!
//! [encoding]
//! jpeg_quality = 90              # 1-100
//! png_compression_level = 6      # 0-9
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Process-wide settings loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory converted images are written to.
    pub output_directory: String,
    /// Output square dimensions. Width and height must be equal.
    pub target_size: TargetSize,
    /// Accepted source extensions, each starting with a dot.
    pub allowed_extensions: Vec<String>,
    /// Source size ceiling in bytes.
    pub max_file_size: u64,
    /// RGBA fill for unused canvas area in fit mode.
    pub padding_color: PaddingColor,
    /// Per-format encoder tunables.
    pub encoding: EncodingSettings,
}

fn default_output_directory() -> String {
    "resized".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    [".jpg", ".jpeg", ".png", ".gif", ".bmp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            target_size: TargetSize::default(),
            allowed_extensions: default_allowed_extensions(),
            max_file_size: 52_428_800, // 50MB
            padding_color: PaddingColor::default(),
            encoding: EncodingSettings::default(),
        }
    }
}

impl Settings {
    /// Validate setting values, collecting every violation.
    ///
    /// All problems are reported at once rather than one per run, so a bad
    /// config file can be fixed in a single pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.output_directory.trim().is_empty() {
            errors.push("output_directory must not be empty".to_string());
        }
        if self.target_size.width == 0 {
            errors.push("target_size.width must be positive".to_string());
        }
        if self.target_size.height == 0 {
            errors.push("target_size.height must be positive".to_string());
        }
        // Output naming and the transform both assume a square target
        if self.target_size.width != self.target_size.height {
            errors.push(format!(
                "target_size.width and target_size.height must be equal (got {}x{})",
                self.target_size.width, self.target_size.height
            ));
        }
        if self.allowed_extensions.is_empty() {
            errors.push("allowed_extensions must not be empty".to_string());
        } else {
            let invalid: Vec<&str> = self
                .allowed_extensions
                .iter()
                .filter(|ext| ext.trim().is_empty() || !ext.starts_with('.'))
                .map(String::as_str)
                .collect();
            if !invalid.is_empty() {
                errors.push(format!(
                    "allowed_extensions contains invalid entries: {}",
                    invalid.join(", ")
                ));
            }
        }
        if self.max_file_size == 0 {
            errors.push("max_file_size must be positive".to_string());
        }
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            errors.push("encoding.jpeg_quality must be 1-100".to_string());
        }
        if self.encoding.png_compression_level > 9 {
            errors.push("encoding.png_compression_level must be 0-9".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Case-insensitive allow-list membership test. `ext` includes the dot.
    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

/// Output square dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// RGBA padding fill, opaque black by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for PaddingColor {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

impl PaddingColor {
    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Per-format encoder tunables. GIF and BMP use encoder defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingSettings {
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u8,
    /// PNG compression level (0 = none, 9 = max).
    pub png_compression_level: u8,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            png_compression_level: 6,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load settings from a `config.toml` file.
///
/// A missing file yields the stock defaults. A present file is parsed with
/// unknown keys rejected, then validated.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let settings = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# square-thumb Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory converted images are written to.
output_directory = "resized"

# Accepted source extensions. Matching is case-insensitive.
allowed_extensions = [".jpg", ".jpeg", ".png", ".gif", ".bmp"]

# Source size ceiling in bytes (50MB).
max_file_size = 52428800

# ---------------------------------------------------------------------------
# Output dimensions (width and height must be equal)
# ---------------------------------------------------------------------------
[target_size]
width = 512
height = 512

# ---------------------------------------------------------------------------
# Padding fill for fit mode (RGBA, 0-255 per channel)
# ---------------------------------------------------------------------------
[padding_color]
r = 0
g = 0
b = 0
a = 255

# ---------------------------------------------------------------------------
# Encoder tunables (GIF and BMP use encoder defaults)
# ---------------------------------------------------------------------------
[encoding]
# JPEG quality (1 = worst, 100 = best).
jpeg_quality = 90

# PNG compression level (0 = none, 9 = max).
png_compression_level = 6
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.output_directory, "resized");
        assert_eq!(settings.target_size.width, 512);
        assert_eq!(settings.target_size.height, 512);
        assert_eq!(settings.max_file_size, 52_428_800);
        assert_eq!(settings.padding_color.rgba(), [0, 0, 0, 255]);
        assert_eq!(settings.encoding.jpeg_quality, 90);
        assert_eq!(settings.encoding.png_compression_level, 6);
    }

    #[test]
    fn default_extensions_cover_supported_formats() {
        let settings = Settings::default();
        for ext in [".jpg", ".jpeg", ".png", ".gif", ".bmp"] {
            assert!(settings.is_extension_allowed(ext), "missing {ext}");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let settings = Settings::default();
        assert!(settings.is_extension_allowed(".JPG"));
        assert!(settings.is_extension_allowed(".Png"));
        assert!(!settings.is_extension_allowed(".webp"));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[target_size]
width = 256
height = 256
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.target_size.width, 256);
        // Unspecified values keep their defaults
        assert_eq!(settings.output_directory, "resized");
        assert_eq!(settings.encoding.jpeg_quality, 90);
    }

    #[test]
    fn parse_padding_color() {
        let toml = r#"
[padding_color]
r = 255
g = 255
b = 255
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.padding_color.rgba(), [255, 255, 255, 255]);
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[encoding]
jpg_quality = 90
"#;
        let result: Result<Settings, _> = toml::from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = r#"
[encodings]
jpeg_quality = 90
"#;
        let result: Result<Settings, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_settings_passes() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_target_size() {
        let mut settings = Settings::default();
        settings.target_size.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.target_size.height = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_square_target() {
        let mut settings = Settings::default();
        settings.target_size.height = 256;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("must be equal (got 512x256)"));
    }

    #[test]
    fn validate_empty_extensions() {
        let mut settings = Settings::default();
        settings.allowed_extensions.clear();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("allowed_extensions"));
    }

    #[test]
    fn validate_extension_without_dot() {
        let mut settings = Settings::default();
        settings.allowed_extensions = vec!["jpg".to_string()];
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("invalid entries: jpg"));
    }

    #[test]
    fn validate_zero_max_file_size() {
        let mut settings = Settings::default();
        settings.max_file_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_jpeg_quality_bounds() {
        let mut settings = Settings::default();
        settings.encoding.jpeg_quality = 0;
        assert!(settings.validate().is_err());

        settings.encoding.jpeg_quality = 100;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_png_compression_bounds() {
        let mut settings = Settings::default();
        settings.encoding.png_compression_level = 10;
        assert!(settings.validate().is_err());

        settings.encoding.png_compression_level = 0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_collects_every_violation() {
        let mut settings = Settings::default();
        settings.target_size.width = 0;
        settings.max_file_size = 0;
        settings.encoding.jpeg_quality = 0;
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("target_size.width"));
        assert!(err.contains("max_file_size"));
        assert!(err.contains("jpeg_quality"));
    }

    // =========================================================================
    // load_settings tests
    // =========================================================================

    #[test]
    fn load_settings_returns_defaults_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings.target_size.width, 512);
    }

    #[test]
    fn load_settings_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
output_directory = "out"

[encoding]
jpeg_quality = 75
"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.output_directory, "out");
        assert_eq!(settings.encoding.jpeg_quality, 75);
        // Unspecified values keep defaults
        assert_eq!(settings.max_file_size, 52_428_800);
    }

    #[test]
    fn load_settings_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid toml [[[").unwrap();
        assert!(matches!(load_settings(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_settings_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "max_file_size = 0").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).expect("must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let settings: Settings = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(settings.output_directory, "resized");
        assert_eq!(settings.target_size.width, 512);
        assert_eq!(settings.max_file_size, 52_428_800);
        assert_eq!(settings.encoding.jpeg_quality, 90);
        assert_eq!(settings.encoding.png_compression_level, 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[target_size]"));
        assert!(content.contains("[padding_color]"));
        assert!(content.contains("[encoding]"));
        assert!(content.contains("allowed_extensions"));
    }
}
