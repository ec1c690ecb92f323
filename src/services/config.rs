//! Calendar configuration file
//!
//! Stored as JSON in `~/.yeargrid/config.json`. Missing files fall back to
//! defaults; every field is optional.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::calendar::weekday_from_index;
use crate::services::delegate::{CalendarDelegate, YearViewStyle};
use crate::types::{Result, YearGridError, YearMonth};

/// Largest padding or margin accepted from a config file
pub const MAX_STYLE_VALUE: i32 = 10_000;

/// On-disk calendar configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// 0 = Sunday .. 6 = Saturday
    pub week_start: u8,
    pub min_year: i32,
    pub min_year_month: u32,
    pub max_year: i32,
    pub max_year_month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_month: Option<u32>,
    pub style: YearViewStyle,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: 0,
            min_year: 1971,
            min_year_month: 1,
            max_year: 2055,
            max_year_month: 12,
            selected_year: None,
            selected_month: None,
            style: YearViewStyle::default(),
        }
    }
}

impl CalendarConfig {
    /// Validate and build the runtime delegate.
    /// Without an explicit selection, today's month clamped into range is selected.
    pub fn into_delegate(self) -> Result<CalendarDelegate> {
        let week_start = weekday_from_index(self.week_start)
            .map_err(|e| YearGridError::Config(e.to_string()))?;

        for (name, month) in [
            ("min_year_month", self.min_year_month),
            ("max_year_month", self.max_year_month),
        ] {
            if !(1..=12).contains(&month) {
                return Err(YearGridError::Config(format!(
                    "{} must be in 1..=12, got {}",
                    name, month
                )));
            }
        }

        let style = self.style;
        for (name, value) in [
            ("padding_left", style.padding_left),
            ("padding_right", style.padding_right),
            ("month_margin_left", style.month_margin_left),
            ("month_margin_right", style.month_margin_right),
            ("month_margin_top", style.month_margin_top),
            ("month_margin_bottom", style.month_margin_bottom),
        ] {
            if !(0..=MAX_STYLE_VALUE).contains(&value) {
                return Err(YearGridError::Config(format!(
                    "style.{} must be in 0..={}, got {}",
                    name, MAX_STYLE_VALUE, value
                )));
            }
        }

        let min = YearMonth::new(self.min_year, self.min_year_month);
        let max = YearMonth::new(self.max_year, self.max_year_month);
        if min > max {
            return Err(YearGridError::Config(format!(
                "min {} is after max {}",
                min, max
            )));
        }

        let selected = match (self.selected_year, self.selected_month) {
            (Some(year), Some(month)) => {
                if !(1..=12).contains(&month) {
                    return Err(YearGridError::Config(format!(
                        "selected_month must be in 1..=12, got {}",
                        month
                    )));
                }
                YearMonth::new(year, month)
            }
            (None, None) => {
                let today = Local::now().date_naive();
                YearMonth::new(today.year(), today.month()).clamp(min, max)
            }
            _ => {
                return Err(YearGridError::Config(
                    "selected_year and selected_month must be set together".into(),
                ))
            }
        };

        Ok(CalendarDelegate::new(
            week_start, selected, min, max, self.style,
        ))
    }
}

/// Reads and writes [`CalendarConfig`] files
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Service for the default location, `~/.yeargrid/config.json`
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| YearGridError::Config("Cannot determine home directory".into()))?;
        let path = base_dirs.home_dir().join(".yeargrid").join("config.json");
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, or defaults when the file does not exist
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<CalendarConfig> {
        if !self.path.exists() {
            debug!("config file not found, using defaults");
            return Ok(CalendarConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: CalendarConfig = serde_json::from_str(&content)
            .map_err(|e| YearGridError::Config(format!("Invalid config file: {}", e)))?;
        debug!(?config, "loaded config");
        Ok(config)
    }

    /// Save using atomic write (temp file + rename)
    pub fn save(&self, config: &CalendarConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| YearGridError::Config(format!("Serialization failed: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use tempfile::TempDir;

    fn config_with_selection(year: i32, month: u32) -> CalendarConfig {
        CalendarConfig {
            selected_year: Some(year),
            selected_month: Some(month),
            ..CalendarConfig::default()
        }
    }

    // ========== CalendarConfig::into_delegate tests ==========

    #[test]
    fn test_default_config_builds_delegate() {
        let delegate = config_with_selection(2024, 5).into_delegate().unwrap();
        assert_eq!(delegate.week_start(), Weekday::Sun);
        assert_eq!(delegate.min(), YearMonth::new(1971, 1));
        assert_eq!(delegate.max(), YearMonth::new(2055, 12));
        assert_eq!(delegate.selected(), YearMonth::new(2024, 5));
    }

    #[test]
    fn test_default_selection_is_clamped_into_range() {
        let config = CalendarConfig {
            min_year: 1990,
            max_year: 1990,
            ..CalendarConfig::default()
        };
        let delegate = config.into_delegate().unwrap();
        assert_eq!(delegate.selected(), YearMonth::new(1990, 12));
    }

    #[test]
    fn test_invalid_week_start_is_config_error() {
        let config = CalendarConfig {
            week_start: 7,
            ..config_with_selection(2024, 1)
        };
        assert!(matches!(
            config.into_delegate(),
            Err(YearGridError::Config(_))
        ));
    }

    #[test]
    fn test_inverted_range_is_config_error() {
        let config = CalendarConfig {
            min_year: 2030,
            max_year: 2020,
            ..config_with_selection(2024, 1)
        };
        assert!(matches!(
            config.into_delegate(),
            Err(YearGridError::Config(_))
        ));
    }

    #[test]
    fn test_half_selection_is_config_error() {
        let config = CalendarConfig {
            selected_year: Some(2024),
            ..CalendarConfig::default()
        };
        assert!(config.into_delegate().is_err());
    }

    #[test]
    fn test_bad_range_month_is_config_error() {
        let config = CalendarConfig {
            max_year_month: 13,
            ..config_with_selection(2024, 1)
        };
        assert!(config.into_delegate().is_err());
    }

    #[test]
    fn test_style_out_of_bounds_is_config_error() {
        let overflowing = CalendarConfig {
            style: YearViewStyle {
                padding_left: i32::MAX,
                padding_right: 1,
                ..YearViewStyle::default()
            },
            ..config_with_selection(2024, 1)
        };
        assert!(matches!(
            overflowing.into_delegate(),
            Err(YearGridError::Config(msg)) if msg.contains("padding_left")
        ));

        let negative = CalendarConfig {
            style: YearViewStyle {
                month_margin_bottom: -1,
                ..YearViewStyle::default()
            },
            ..config_with_selection(2024, 1)
        };
        assert!(matches!(
            negative.into_delegate(),
            Err(YearGridError::Config(msg)) if msg.contains("month_margin_bottom")
        ));

        let at_limit = CalendarConfig {
            style: YearViewStyle {
                month_margin_top: MAX_STYLE_VALUE,
                ..YearViewStyle::default()
            },
            ..config_with_selection(2024, 1)
        };
        assert!(at_limit.into_delegate().is_ok());
    }

    #[test]
    fn test_style_from_file_is_validated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"style": {"padding_left": 2147483647, "padding_right": 1}}"#,
        )
        .unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert!(matches!(
            config.into_delegate(),
            Err(YearGridError::Config(_))
        ));
    }

    // ========== ConfigService tests ==========

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.json"));
        assert_eq!(service.load().unwrap(), CalendarConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("nested").join("config.json"));
        let config = CalendarConfig {
            week_start: 1,
            style: YearViewStyle {
                padding_left: 4,
                month_margin_top: 1,
                ..YearViewStyle::default()
            },
            ..config_with_selection(2024, 2)
        };

        service.save(&config).unwrap();
        assert_eq!(service.load().unwrap(), config);
        assert!(!service.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"week_start": 1, "style": {"padding_left": 2}}"#).unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert_eq!(config.week_start, 1);
        assert_eq!(config.style.padding_left, 2);
        assert_eq!(config.style.padding_right, 0);
        assert_eq!(config.min_year, 1971);
    }

    #[test]
    fn test_corrupted_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(matches!(err, YearGridError::Config(_)));
    }
}
