//! Load outcome reporting.
//!
//! The unified entrypoints hand every outcome to an optional [`LoadObserver`]. Failures carry a
//! [`LoadSeverity`]; the ones at or above [`super::LoadOptions::alert_at_or_above`] are also
//! raised as alerts. [`TracingObserver`] turns outcomes into `tracing` events.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::error::LoadError;

use super::options::Orientation;

/// How bad a failed load is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    Info,
    Warning,
    /// The source or the arguments were unusable.
    Error,
    /// The source could not be read at all.
    Critical,
}

impl LoadSeverity {
    /// Severity of a failed load: I/O problems are critical, everything else is a data error.
    pub fn of(error: &LoadError) -> Self {
        if error.is_io() {
            LoadSeverity::Critical
        } else {
            LoadSeverity::Error
        }
    }
}

/// Where a load read from and how.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// File path for [`super::load_from_path`]; `None` for readers.
    pub path: Option<PathBuf>,
    pub orientation: Orientation,
}

impl LoadContext {
    /// Path for display, `<reader>` when loading from a reader.
    pub fn source(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "<reader>".to_owned(), |p| p.display().to_string())
    }
}

/// Counters for a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records covered by the source: data rows (horizontal) or data columns (vertical).
    pub records: usize,
    /// Source rows consumed, margin rows included.
    pub rows_read: usize,
    /// Cells left unchanged because their text did not parse.
    pub rejected_cells: usize,
}

/// Receives load outcomes from [`super::load_from_reader`] and [`super::load_from_path`].
///
/// Every method has an empty default, so observers implement only what they need.
pub trait LoadObserver: Send + Sync {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Raised after `on_failure` when `severity` meets the alert threshold.
    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}
}

/// Emits load outcomes as `tracing` events under the `tinycsv::load` target.
///
/// - success: `info`, or `warn` when cells were rejected
/// - failure: `warn` for data errors, `error` for critical ones
/// - alert: `error` with `alert = true`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        let source = ctx.source();
        if stats.rejected_cells > 0 {
            warn!(
                target: "tinycsv::load",
                orientation = ?ctx.orientation,
                %source,
                records = stats.records,
                rejected_cells = stats.rejected_cells,
                "loaded with rejected cells"
            );
        } else {
            info!(
                target: "tinycsv::load",
                orientation = ?ctx.orientation,
                %source,
                records = stats.records,
                rows_read = stats.rows_read,
                "loaded"
            );
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, err: &LoadError) {
        let source = ctx.source();
        if severity >= LoadSeverity::Critical {
            error!(target: "tinycsv::load", orientation = ?ctx.orientation, %source, ?severity, error = %err, "load failed");
        } else {
            warn!(target: "tinycsv::load", orientation = ?ctx.orientation, %source, ?severity, error = %err, "load failed");
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, err: &LoadError) {
        error!(
            target: "tinycsv::load",
            alert = true,
            orientation = ?ctx.orientation,
            source = %ctx.source(),
            ?severity,
            error = %err,
            "load alert"
        );
    }
}
