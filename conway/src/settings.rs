use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Recognised configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cells along each side of the square grid.
    pub grid_size: usize,
    /// Pixel size of a drawn cell.
    pub cell_extent: usize,
    pub tick_interval_ms: u64,
    /// Chance that Randomise brings any one cell to life.
    pub random_density: f64,
    /// Fixed RNG seed; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: 100,
            cell_extent: 8,
            tick_interval_ms: 500,
            random_density: 0.10,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_size == 0 {
            return Err(invalid("grid_size", "must be at least 1"));
        }
        if self.cell_extent == 0 {
            return Err(invalid("cell_extent", "must be at least 1 pixel"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.random_density) {
            return Err(invalid(
                "random_density",
                format!("{} is not a probability", self.random_density),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid { field, reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.grid_size, 100);
        assert_eq!(settings.cell_extent, 8);
        assert_eq!(settings.tick_interval(), Duration::from_millis(500));
        assert_eq!(settings.random_density, 0.10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "grid_size": 40, "seed": 9 }"#).expect("valid json");
        assert_eq!(settings.grid_size, 40);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.tick_interval_ms, 500);
    }

    #[test]
    fn test_rejects_zero_grid() {
        let err = Settings::from_json(r#"{ "grid_size": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "grid_size", .. }));
    }

    #[test]
    fn test_rejects_bad_density() {
        for text in [r#"{ "random_density": 1.5 }"#, r#"{ "random_density": -0.1 }"#] {
            let err = Settings::from_json(text).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid { field: "random_density", .. }));
        }
        let nan = Settings { random_density: f64::NAN, ..Settings::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_interval_and_extent() {
        assert!(Settings::from_json(r#"{ "tick_interval_ms": 0 }"#).is_err());
        assert!(Settings::from_json(r#"{ "cell_extent": 0 }"#).is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ grid_size: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/nonexistent/conway-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
