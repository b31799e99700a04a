//! Load configuration.
//!
//! [`LoadOptions`] is what the loaders take. [`LoadConfig`] is its plain-data subset, which
//! can be deserialized (e.g. from a JSON settings file) and turned into options.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::convert::DEFAULT_TIME_LAYOUT;
use crate::error::{LoadError, LoadResult};

use super::observability::{LoadObserver, LoadSeverity};

/// Default cap on data rows for horizontal loads.
pub const DEFAULT_MAX_ROWS: usize = 1_048_576;

/// Default cap on data columns for vertical loads.
pub const DEFAULT_MAX_COLS: usize = 16_384;

/// Table orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// One source row per record.
    #[default]
    Horizontal,
    /// One source row per field; one source column per record.
    Vertical,
}

/// Options controlling a load.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Orientation used by [`super::load_from_reader`] and [`super::load_from_path`].
    pub orientation: Orientation,
    /// Rows to discard before data begins.
    pub top_margin: usize,
    /// Cells to discard from the start of every row (vertical loads only).
    pub left_margin: usize,
    /// Inclusive cap on data rows (horizontal loads).
    pub max_rows: usize,
    /// Inclusive cap on data columns (vertical loads).
    pub max_cols: usize,
    /// `chrono` strftime pattern for date and date-time fields; `None` uses
    /// [`DEFAULT_TIME_LAYOUT`].
    pub time_layout: Option<String>,
    /// Fail on the first cell whose text does not parse instead of leaving the field as is.
    pub strict: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl LoadOptions {
    /// The effective time layout.
    pub fn time_layout(&self) -> &str {
        self.time_layout.as_deref().unwrap_or(DEFAULT_TIME_LAYOUT)
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("orientation", &self.orientation)
            .field("top_margin", &self.top_margin)
            .field("left_margin", &self.left_margin)
            .field("max_rows", &self.max_rows)
            .field("max_cols", &self.max_cols)
            .field("time_layout", &self.time_layout())
            .field("strict", &self.strict)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            top_margin: 0,
            left_margin: 0,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            time_layout: None,
            strict: false,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Serializable load settings.
///
/// Omitted keys take the [`LoadOptions`] defaults.
///
/// ```
/// use tinycsv::{LoadConfig, Orientation};
///
/// let cfg = LoadConfig::from_json_str(r#"{"orientation":"vertical","top_margin":1,"left_margin":1}"#).unwrap();
/// assert_eq!(cfg.orientation, Orientation::Vertical);
/// assert_eq!(cfg.max_cols, tinycsv::DEFAULT_MAX_COLS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub orientation: Orientation,
    pub top_margin: usize,
    pub left_margin: usize,
    pub max_rows: usize,
    pub max_cols: usize,
    pub time_layout: Option<String>,
    pub strict: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            top_margin: 0,
            left_margin: 0,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            time_layout: None,
            strict: false,
        }
    }
}

impl LoadConfig {
    /// Parse settings from JSON.
    pub fn from_json_str(input: &str) -> LoadResult<Self> {
        serde_json::from_str(input).map_err(|e| LoadError::Config {
            message: e.to_string(),
        })
    }

    /// Build runtime options; observer fields keep their defaults.
    pub fn into_options(self) -> LoadOptions {
        LoadOptions {
            orientation: self.orientation,
            top_margin: self.top_margin,
            left_margin: self.left_margin,
            max_rows: self.max_rows,
            max_cols: self.max_cols,
            time_layout: self.time_layout,
            strict: self.strict,
            ..LoadOptions::default()
        }
    }
}

impl From<LoadConfig> for LoadOptions {
    fn from(config: LoadConfig) -> Self {
        config.into_options()
    }
}
