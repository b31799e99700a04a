//! Column-major loading: one source row per field, one source column per record.

use std::io::Read;

use tracing::debug;

use crate::binding::FieldRefs;
use crate::destination::Destination;
use crate::error::{LoadError, LoadResult, Margin};

use super::observability::LoadStats;
use super::options::LoadOptions;
use super::rows::{Row, RowReader};
use super::CellWriter;

/// Load a column-major table into `out`.
///
/// Rules:
///
/// - `options.top_margin` rows are discarded; with a top margin of 0 exactly one row is read
///   anyway and used as the data for field 0
/// - the last discarded row fixes the record count: its width minus `options.left_margin`,
///   capped by `options.max_cols`; it must be well formed, so a malformed last margin row fails
///   with [`LoadError::MalformedRow`] while earlier malformed margin rows are skipped
/// - data row `f` populates field `f` of every record; cell `left_margin + k` goes to record `k`
/// - reading stops after one row per field or at end of input, whichever comes first
///
/// A malformed data row fails the load but keeps every field written by earlier rows.
pub fn load<R, D>(source: Option<R>, out: &mut D, options: &LoadOptions) -> LoadResult<LoadStats>
where
    R: Read,
    D: Destination + ?Sized,
{
    let mut rows = RowReader::new(source.ok_or(LoadError::NilSource)?);
    let left = options.left_margin;

    let discards = options.top_margin.max(1);
    let mut last: Option<Row> = None;
    let mut rows_read = 0usize;
    for i in 0..discards {
        match rows.next_row() {
            Ok(Some(row)) => last = Some(row),
            Ok(None) => return Err(LoadError::UnexpectedEof),
            // Only the last discarded row has to be well formed; it fixes the width.
            Err(LoadError::MalformedRow { .. }) if i + 1 < discards => {}
            Err(err) => return Err(err),
        }
        rows_read += 1;
    }
    let header = last.ok_or(LoadError::UnexpectedEof)?;

    let width = header.len();
    if left >= width {
        return Err(LoadError::MarginTooLarge {
            margin: Margin::Left,
            value: left,
            available: width,
        });
    }
    let columns = width - left;
    if columns > options.max_cols {
        return Err(LoadError::TooManyColumns {
            columns,
            max: options.max_cols,
        });
    }

    out.ensure_len(columns)?;
    let refs = FieldRefs::extract(out)?;
    let mut writer = CellWriter::new(refs, options);

    let mut field = 0;
    if options.top_margin == 0 {
        write_field(&mut writer, out, &header, left, field)?;
        field += 1;
    }
    while field < writer.field_count() {
        let Some(row) = rows.next_row()? else { break };
        rows_read += 1;
        write_field(&mut writer, out, &row, left, field)?;
        field += 1;
    }

    let stats = LoadStats {
        records: columns,
        rows_read,
        rejected_cells: writer.rejected(),
    };
    debug!(
        records = stats.records,
        fields_filled = field,
        rows_read = stats.rows_read,
        rejected_cells = stats.rejected_cells,
        "vertical load complete"
    );
    Ok(stats)
}

fn write_field<D>(writer: &mut CellWriter<'_>, out: &mut D, row: &Row, left: usize, field: usize) -> LoadResult<()>
where
    D: Destination + ?Sized,
{
    for (record, text) in row.cells.iter().skip(left).enumerate() {
        writer.write(out, row.line, record, field, text)?;
    }
    Ok(())
}
