// ============================================================
// EXPORTER SETTINGS
// ============================================================
// Configuration values for CSV export, layered from defaults,
// an optional TOML file, and VIEWHELPERS_-prefixed env vars

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::RowEncoder;

/// Configuration for CSV export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterSettings {
    /// WHATWG label of the target output encoding (default: "utf-8")
    pub encoding: String,

    /// Delimiter character (default: ',')
    pub delimiter: char,

    /// Base filename used when none is given and the record sequence is
    /// empty, so no type name can be derived (default: "export")
    pub fallback_basename: String,
}

impl Default for ExporterSettings {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            delimiter: ',',
            fallback_basename: "export".to_string(),
        }
    }
}

impl ExporterSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings: defaults, then `viewhelpers.toml`, then
    /// `VIEWHELPERS_*` environment variables
    pub fn load() -> Result<Self> {
        let settings: ExporterSettings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("viewhelpers.toml"))
            .merge(Env::prefixed("VIEWHELPERS_"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        settings
            .validate()
            .map_err(AppError::ConfigError)?;
        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.delimiter.is_ascii() {
            return Err(format!("delimiter must be ASCII, got '{}'", self.delimiter));
        }
        if encoding_rs::Encoding::for_label(self.encoding.as_bytes()).is_none() {
            return Err(format!("unknown encoding label: {}", self.encoding));
        }
        if self.fallback_basename.trim().is_empty() {
            return Err("fallback_basename must not be empty".to_string());
        }
        Ok(())
    }

    /// Build a row encoder honoring these settings. Settings constructed
    /// directly, without going through [`ExporterSettings::load`], are
    /// validated here so a non-ASCII delimiter cannot be truncated.
    pub fn row_encoder(&self) -> Result<RowEncoder> {
        self.validate().map_err(AppError::ConfigError)?;
        Ok(RowEncoder::for_label(&self.encoding)?.with_delimiter(self.delimiter as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(ExporterSettings::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let settings = ExporterSettings {
            encoding: "klingon".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let settings = ExporterSettings {
            delimiter: '\u{2603}',
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_row_encoder_rejects_non_ascii_delimiter() {
        let settings = ExporterSettings {
            delimiter: '\u{30a2}',
            ..Default::default()
        };
        assert!(matches!(
            settings.row_encoder(),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_row_encoder_uses_settings() {
        let settings = ExporterSettings {
            encoding: "windows-1252".to_string(),
            delimiter: ';',
            ..Default::default()
        };
        let mut encoder = settings.row_encoder().unwrap();
        assert_eq!(encoder.encoding_name(), "windows-1252");
        assert_eq!(encoder.encode_row(["a", "b"]).unwrap(), b"a;b\n");
    }
}
