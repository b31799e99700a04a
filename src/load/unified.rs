//! Orientation-dispatching entrypoints with observer reporting.
//!
//! - [`load_from_reader`] loads from any reader using [`LoadOptions::orientation`].
//! - [`load_from_path`] opens a file first; a missing file is reported as
//!   [`LoadSeverity::Critical`].
//!
//! If an [`super::observability::LoadObserver`] is configured, success/failure/alerts are
//! reported to it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::destination::Destination;
use crate::error::{LoadError, LoadResult};

use super::observability::{LoadContext, LoadSeverity, LoadStats};
use super::options::{LoadOptions, Orientation};
use super::{horizontal, vertical};

/// Load from `source` in the orientation selected by `options`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with [`LoadStats`]
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn load_from_reader<R, D>(source: Option<R>, out: &mut D, options: &LoadOptions) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    let ctx = LoadContext {
        path: None,
        orientation: options.orientation,
    };
    let result = dispatch(source, out, options);
    report(&ctx, options, &result);
    result
}

/// Open `path` and load it in the orientation selected by `options`.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tinycsv::{load_from_path, LoadOptions, Orientation, TracingObserver};
///
/// tinycsv::record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         pub id: i64,
///         pub name: String,
///     }
/// }
///
/// # fn main() -> Result<(), tinycsv::LoadError> {
/// let opts = LoadOptions {
///     orientation: Orientation::Vertical,
///     top_margin: 1,
///     left_margin: 1,
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let mut people: Vec<Person> = Vec::new();
/// let stats = load_from_path("people.csv", &mut people, &opts)?;
/// println!("records={}", stats.records);
/// # Ok(())
/// # }
/// ```
pub fn load_from_path<D>(path: impl AsRef<Path>, out: &mut D, options: &LoadOptions) -> LoadResult<LoadStats>
where
    D: Destination + ?Sized,
{
    let path = path.as_ref();
    let ctx = LoadContext {
        path: Some(path.to_path_buf()),
        orientation: options.orientation,
    };
    let result = File::open(path)
        .map_err(LoadError::from)
        .and_then(|file| dispatch(Some(file), out, options));
    report(&ctx, options, &result);
    result
}

fn dispatch<R, D>(source: Option<R>, out: &mut D, options: &LoadOptions) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    match options.orientation {
        Orientation::Horizontal => horizontal::load(source, out, options),
        Orientation::Vertical => vertical::load(source, out, options),
    }
}

fn report(ctx: &LoadContext, options: &LoadOptions, result: &LoadResult<LoadStats>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(stats) => obs.on_success(ctx, *stats),
        Err(e) => {
            let sev = LoadSeverity::of(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}
