//! # tally-config
//!
//! Dashboard configuration loaded from `~/.tally/config.yaml`.
//!
//! ```yaml
//! report:
//!   top_items_limit: 5
//!   peak_hours_limit: 5
//! locale:
//!   month_names: [Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov, Dec]
//! ingest:
//!   sales_date_field: saleDate
//!   cost_date_field: costDate
//! ```
//!
//! Every section and field is optional; anything left out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{Result, TallyError};
use tally_report::ingest::{DEFAULT_COST_DATE_FIELD, DEFAULT_SALES_DATE_FIELD};
use tally_report::locale::{ENGLISH_MONTHS, ENGLISH_WEEKDAYS};
use tally_report::ranking::DEFAULT_LIMIT;
use tally_report::{LocaleTable, RecordParser, RollupOptions};
use tracing::debug;

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ranked list sizes
    pub report: ReportConfig,

    /// Period labels
    pub locale: LocaleConfig,

    /// Input field names
    pub ingest: IngestConfig,
}

/// Sizes of the ranked lists inside each rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_items_limit: usize,
    pub peak_hours_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_items_limit: DEFAULT_LIMIT,
            peak_hours_limit: DEFAULT_LIMIT,
        }
    }
}

/// Month and weekday labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Twelve month names, January first
    pub month_names: Vec<String>,

    /// Seven weekday names, Sunday first
    pub weekday_names: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            month_names: ENGLISH_MONTHS.iter().map(|s| s.to_string()).collect(),
            weekday_names: ENGLISH_WEEKDAYS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Names of the date fields in the raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub sales_date_field: String,
    pub cost_date_field: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sales_date_field: DEFAULT_SALES_DATE_FIELD.to_string(),
            cost_date_field: DEFAULT_COST_DATE_FIELD.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Default config file path (`~/.tally/config.yaml`).
    pub fn default_path() -> Result<PathBuf> {
        Ok(tally_core::logging::tally_home()?.join("config.yaml"))
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TallyError::config_not_found_with_source(path, e)
            } else {
                TallyError::io("reading config", path, e)
            }
        })?;

        let config = Self::from_yaml(&text).map_err(|e| match e {
            TallyError::YamlParse { message, .. } => TallyError::ConfigInvalid {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` when given, otherwise the default file if it exists,
    /// otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            debug!(path = %default_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate YAML text. An empty document gives the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| TallyError::yaml_parse("config", e))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Rollup limits for the report builders.
    pub fn rollup_options(&self) -> RollupOptions {
        RollupOptions::default()
            .with_top_items_limit(self.report.top_items_limit)
            .with_peak_hours_limit(self.report.peak_hours_limit)
    }

    /// Label table for the report builders.
    pub fn locale_table(&self) -> LocaleTable {
        LocaleTable::new(self.locale.month_names.clone(), self.locale.weekday_names.clone())
    }

    /// Input parser using the configured date field names.
    pub fn record_parser(&self) -> RecordParser {
        RecordParser::new()
            .with_date_fields(&self.ingest.sales_date_field, &self.ingest.cost_date_field)
    }

    /// Check table lengths, limits and field names.
    pub fn validate(&self) -> Result<()> {
        if self.report.top_items_limit == 0 {
            return Err(TallyError::config_validation("report.top_items_limit must be at least 1"));
        }
        if self.report.peak_hours_limit == 0 {
            return Err(TallyError::config_validation("report.peak_hours_limit must be at least 1"));
        }
        if self.locale.month_names.len() != 12 {
            return Err(TallyError::config_validation(format!(
                "locale.month_names needs 12 entries, found {}",
                self.locale.month_names.len()
            )));
        }
        if self.locale.weekday_names.len() != 7 {
            return Err(TallyError::config_validation(format!(
                "locale.weekday_names needs 7 entries, found {}",
                self.locale.weekday_names.len()
            )));
        }
        if self.ingest.sales_date_field.trim().is_empty()
            || self.ingest.cost_date_field.trim().is_empty()
        {
            return Err(TallyError::config_validation("ingest date field names must not be empty"));
        }
        Ok(())
    }
}
