//! Row source backed by the `csv` tokenizer.

use std::collections::VecDeque;
use std::io::{self, Read};

use csv::{ErrorKind, Position, StringRecord};

use crate::error::{LoadError, LoadResult};

/// One tokenized source row and the 1-based line it started on.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub line: u64,
    pub cells: StringRecord,
}

impl Row {
    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Reads headerless, fixed-width rows. The first row fixes the width.
pub(crate) struct RowReader<R> {
    inner: csv::Reader<NewlineIndex<R>>,
    line: u64,
}

impl<R: Read> RowReader<R> {
    pub fn new(source: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(NewlineIndex::new(source));
        Self { inner, line: 1 }
    }

    /// Next row, `Ok(None)` at end of input.
    ///
    /// A row of the wrong width fails with [`LoadError::MalformedRow`]; the reader stays usable
    /// and continues with the following row.
    pub fn next_row(&mut self) -> LoadResult<Option<Row>> {
        let mut cells = StringRecord::new();
        match self.inner.read_record(&mut cells) {
            Ok(false) => Ok(None),
            Ok(true) => {
                let start = cells.position().cloned().unwrap_or_else(|| self.inner.position().clone());
                let line = self.line_at(&start);
                Ok(Some(Row { line, cells }))
            }
            Err(err) => {
                let start = match err.kind() {
                    ErrorKind::UnequalLengths { pos: Some(pos), .. } => pos.clone(),
                    _ => self.inner.position().clone(),
                };
                let line = self.line_at(&start);
                Err(map_csv_error(err, line))
            }
        }
    }

    // The tokenizer's own line counter lags behind on CRLF input, since a record ends at `\r`
    // and the `\n` is only consumed with the next one. Byte offsets are exact, so lines are
    // counted from the newlines seen at or before the record start.
    fn line_at(&mut self, start: &Position) -> u64 {
        let newlines = &mut self.inner.get_mut().newlines;
        while newlines.front().is_some_and(|&offset| offset <= start.byte()) {
            newlines.pop_front();
            self.line += 1;
        }
        self.line
    }
}

fn map_csv_error(err: csv::Error, line: u64) -> LoadError {
    if let ErrorKind::UnequalLengths { .. } = err.kind() {
        return LoadError::MalformedRow { line };
    }
    LoadError::Csv(err)
}

/// Byte offsets of the `\n`s read so far and not yet attributed to a row.
struct NewlineIndex<R> {
    inner: R,
    consumed: u64,
    newlines: VecDeque<u64>,
}

impl<R> NewlineIndex<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            consumed: 0,
            newlines: VecDeque::new(),
        }
    }
}

impl<R: Read> Read for NewlineIndex<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let base = self.consumed;
        self.newlines.extend(
            buf[..n]
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| base + i as u64),
        );
        self.consumed += n as u64;
        Ok(n)
    }
}
