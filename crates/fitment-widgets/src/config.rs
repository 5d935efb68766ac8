//! Widget configuration.

use std::path::Path;

use fitment_lookup::LookupSettings;
use fitment_store::CookieSettings;
use serde::{Deserialize, Serialize};

use crate::WidgetError;

/// Label of the floor-mat option that needs a third seat row.
pub const THIRD_ROW_OPTION: &str = "Full Set with 3rd Row (if applicable)";

/// Configuration for every widget on a page.
///
/// All fields have defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitmentConfig {
    /// Lookup API location and timeout.
    #[serde(default)]
    pub api: LookupSettings,

    /// Cookie names and lifetime.
    #[serde(default)]
    pub cookies: CookieSettings,

    /// Selector behaviour.
    #[serde(default)]
    pub selector: SelectorSettings,
}

impl FitmentConfig {
    /// Load from a file; `.json` is parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WidgetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))?;
        if is_json(path) {
            serde_json::from_str(&content)
                .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Self::from_toml(&content)
                .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))
        }
    }

    /// Save to a file, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WidgetError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| WidgetError::Config(e.to_string()))?
        } else {
            self.to_toml()?
        };
        std::fs::write(path, content)
            .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, WidgetError> {
        toml::from_str(content).map_err(|e| WidgetError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, WidgetError> {
        toml::to_string_pretty(self).map_err(|e| WidgetError::Config(e.to_string()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// Selector settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSettings {
    /// Option disabled for vehicles with fewer than three seat rows.
    #[serde(default = "default_third_row_option")]
    pub third_row_option: String,

    /// Seat rows assumed when the lookup fails or has no answer.
    #[serde(default = "default_seat_rows")]
    pub default_seat_rows: u32,
}

fn default_third_row_option() -> String {
    THIRD_ROW_OPTION.to_string()
}

fn default_seat_rows() -> u32 {
    2
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            third_row_option: default_third_row_option(),
            default_seat_rows: default_seat_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = FitmentConfig::from_toml("").unwrap();
        assert_eq!(config, FitmentConfig::default());
        assert_eq!(config.cookies.ttl_days, 31);
        assert_eq!(config.selector.default_seat_rows, 2);
    }

    #[test]
    fn test_partial_toml() {
        let config = FitmentConfig::from_toml(
            r#"
            [api]
            base_url = "http://localhost:8080/api"

            [cookies]
            ttl_days = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.cookies.ttl_days, 7);
        assert_eq!(config.cookies.ledger_cookie, "cart_details");
    }

    #[test]
    fn test_save_and_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FitmentConfig::default();
        config.selector.default_seat_rows = 3;

        for name in ["fitment.toml", "fitment.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(FitmentConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitment.toml");
        std::fs::write(&path, "[api\n").unwrap();
        assert!(matches!(FitmentConfig::load(&path), Err(WidgetError::Config(_))));
    }
}
