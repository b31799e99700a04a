//! Row-major loading: one source row per record.

use std::io::Read;

use tracing::debug;

use crate::binding::FieldRefs;
use crate::destination::Destination;
use crate::error::{LoadError, LoadResult, Margin};

use super::observability::LoadStats;
use super::options::LoadOptions;
use super::rows::{Row, RowReader};
use super::CellWriter;

/// Load a row-major table into `out`.
///
/// Rules:
///
/// - the first `options.top_margin` rows are discarded (malformed ones included)
/// - every following row is a data row; more than `options.max_rows` of them fails
/// - `out` grows to the number of data rows; data row `i` populates record `i`
/// - cell `k` of a row goes to field `k`; extra record fields are left untouched
/// - the first data row may not carry more cells than the record has fields
///
/// Cells whose text does not parse leave their field unchanged unless `options.strict` is set.
pub fn load<R, D>(source: Option<R>, out: &mut D, options: &LoadOptions) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    let mut rows = RowReader::new(source.ok_or(LoadError::NilSource)?);

    let mut data: Vec<Row> = Vec::new();
    let mut rows_read = 0usize;
    loop {
        let next = rows.next_row();
        if rows_read < options.top_margin {
            match next {
                Ok(Some(_)) | Err(LoadError::MalformedRow { .. }) => {
                    rows_read += 1;
                    continue;
                }
                Ok(None) => break,
                Err(err) => return Err(err),
            }
        }

        let Some(row) = next? else { break };
        if data.len() >= options.max_rows {
            return Err(LoadError::TooManyRows {
                max: options.max_rows,
            });
        }
        data.push(row);
        rows_read += 1;
    }

    if data.is_empty() {
        return Err(LoadError::MarginTooLarge {
            margin: Margin::Top,
            value: options.top_margin,
            available: rows_read,
        });
    }

    out.ensure_len(data.len())?;
    let refs = FieldRefs::extract(out)?;

    let cells = data[0].len();
    if cells > refs.field_count() {
        return Err(LoadError::FieldCountMismatch {
            cells,
            fields: refs.field_count(),
        });
    }

    let mut writer = CellWriter::new(refs, options);
    for (record, row) in data.iter().enumerate() {
        for (field, text) in row.cells.iter().enumerate() {
            writer.write(out, row.line, record, field, text)?;
        }
    }

    let stats = LoadStats {
        records: data.len(),
        rows_read,
        rejected_cells: writer.rejected(),
    };
    debug!(
        records = stats.records,
        rows_read = stats.rows_read,
        rejected_cells = stats.rejected_cells,
        "horizontal load complete"
    );
    Ok(stats)
}
