use std::fmt;

use thiserror::Error;

use crate::convert::CellError;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Which margin a [`LoadError::MarginTooLarge`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Margin {
    /// Leading rows discarded before data begins.
    Top,
    /// Leading cells discarded from every row (vertical loads only).
    Left,
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Top => f.write_str("top margin"),
            Margin::Left => f.write_str("left margin"),
        }
    }
}

/// Error type returned by the load operations.
///
/// Structural problems (bad destination, malformed rows, margin and limit violations) abort a
/// load. Unparseable cell values only surface here as [`LoadError::InvalidCell`] when strict
/// mode is enabled; otherwise they are absorbed and counted.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No source reader was supplied.
    #[error("reader is nil")]
    NilSource,

    /// The output handle does not reference a supported record collection.
    #[error("output does not reference a record collection (expected Vec<R>, Vec<Box<R>> or Vec<Option<Box<R>>>)")]
    InvalidTarget,

    /// The destination storage cannot be grown in place.
    #[error("destination cannot grow in place: {required} records required, {available} available")]
    NotAddressable { required: usize, available: usize },

    /// The destination's elements are not usable as positional records.
    #[error("unsupported element type: {reason}")]
    UnsupportedElementType { reason: String },

    /// A source row has a different number of cells than the first row.
    #[error("record on line {line}: wrong number of fields")]
    MalformedRow { line: u64 },

    /// A margin consumes the whole source (top) or the whole row (left).
    #[error("{margin} of {value} is too large (available {available})")]
    MarginTooLarge {
        margin: Margin,
        value: usize,
        available: usize,
    },

    /// More data rows than `max_rows`.
    #[error("rows are too large: more than {max} data rows")]
    TooManyRows { max: usize },

    /// More data columns than `max_cols`.
    #[error("columns are too large: {columns} data columns exceed the limit of {max}")]
    TooManyColumns { columns: usize, max: usize },

    /// The first data row carries more cells than the record has fields.
    #[error("number of fields in the record ({fields}) is smaller than the number of cells in the row ({cells})")]
    FieldCountMismatch { cells: usize, fields: usize },

    /// A (record, field) pair could not be bound for writing.
    #[error("cannot set field {field} of record {record}")]
    NotSettable { record: usize, field: usize },

    /// The source ended while rows were still required.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Strict mode only: a cell could not be converted into its field type.
    #[error("invalid cell on line {line}, record {record}, field {field}: {source}")]
    InvalidCell {
        line: u64,
        record: usize,
        field: String,
        #[source]
        source: CellError,
    },

    /// Load settings could not be parsed.
    #[error("invalid load config: {message}")]
    Config { message: String },

    /// Tokenizer error other than a width mismatch (invalid UTF-8, I/O while reading).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error (e.g. file not found when loading from a path).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// `true` for failures caused by the environment rather than by the data or the call.
    pub fn is_io(&self) -> bool {
        match self {
            LoadError::Io(_) => true,
            LoadError::Csv(err) => matches!(err.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }
}
