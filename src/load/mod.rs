//! Load entrypoints and implementations.
//!
//! - [`horizontal`]: one source row per record
//! - [`vertical`]: one source row per field, one source column per record
//! - [`load_from_reader`] / [`load_from_path`]: pick the orientation from [`LoadOptions`] and
//!   report the outcome to an optional [`LoadObserver`]

pub mod horizontal;
pub mod observability;
pub mod options;
mod rows;
mod unified;
pub mod vertical;

use std::io::Read;

use tracing::debug;

use crate::binding::FieldRefs;
use crate::convert::convert_cell;
use crate::destination::Destination;
use crate::error::{LoadError, LoadResult};

pub use observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver};
pub use options::{LoadConfig, LoadOptions, Orientation, DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS};
pub use unified::{load_from_path, load_from_reader};

/// Load a row-major table: skip `top_margin` rows, then one record per row.
///
/// Shorthand for [`horizontal::load`] with default options otherwise.
pub fn load<R, D>(source: Option<R>, top_margin: usize, max_rows: usize, out: &mut D) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    let options = LoadOptions {
        top_margin,
        max_rows,
        ..LoadOptions::default()
    };
    horizontal::load(source, out, &options)
}

/// Load a column-major table: skip `top_margin` rows and `left_margin` cells per row, then one
/// record per column.
///
/// Shorthand for [`vertical::load`] with default options otherwise.
pub fn load_vertically<R, D>(
    source: Option<R>,
    top_margin: usize,
    left_margin: usize,
    max_cols: usize,
    out: &mut D,
) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    let options = LoadOptions {
        orientation: Orientation::Vertical,
        top_margin,
        left_margin,
        max_cols,
        ..LoadOptions::default()
    };
    vertical::load(source, out, &options)
}

/// Writes cells through a [`FieldRefs`] layout and applies the conversion failure policy.
pub(crate) struct CellWriter<'o> {
    refs: FieldRefs,
    time_layout: &'o str,
    strict: bool,
    rejected: usize,
}

impl<'o> CellWriter<'o> {
    pub fn new(refs: FieldRefs, options: &'o LoadOptions) -> Self {
        Self {
            refs,
            time_layout: options.time_layout(),
            strict: options.strict,
            rejected: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        self.refs.field_count()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn write<D>(&mut self, dest: &mut D, line: u64, record: usize, field: usize, text: &str) -> LoadResult<()>
    where
        D: Destination + ?Sized,
    {
        let target = self.refs.bind(dest, record, field)?;
        match convert_cell(target, self.time_layout, text) {
            Ok(()) => Ok(()),
            Err(source) if self.strict => Err(LoadError::InvalidCell {
                line,
                record,
                field: self.refs.label(field),
                source,
            }),
            Err(err) => {
                self.rejected += 1;
                debug!(line, record, field, error = %err, "cell left unchanged");
                Ok(())
            }
        }
    }
}
