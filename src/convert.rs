//! Cell conversion: one text cell into one record field.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

use crate::types::{FieldKind, FieldRef};

/// Layout used for date and date-time fields when none is configured (e.g. `2011.5.12`).
pub const DEFAULT_TIME_LAYOUT: &str = "%Y.%m.%d";

/// A cell whose text could not be converted into the field's type.
///
/// The field is left as it was. Loaders only surface this in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {raw:?} as {kind}: {message}")]
pub struct CellError {
    pub kind: FieldKind,
    pub raw: String,
    pub message: String,
}

impl CellError {
    fn new(kind: FieldKind, raw: &str, message: impl Display) -> Self {
        Self {
            kind,
            raw: raw.to_owned(),
            message: message.to_string(),
        }
    }
}

/// Convert `text` into the type behind `field` and write it.
///
/// - integers and floats are parsed from the text as is (no trimming)
/// - strings are stored with surrounding whitespace trimmed
/// - dates and date-times are parsed with `time_layout` (a `chrono` strftime pattern)
/// - [`FieldRef::Opaque`] is never written
///
/// On error the field keeps its previous value.
pub fn convert_cell(field: FieldRef<'_>, time_layout: &str, text: &str) -> Result<(), CellError> {
    match field {
        FieldRef::I8(slot) => parse_into(slot, FieldKind::Int, text),
        FieldRef::I16(slot) => parse_into(slot, FieldKind::Int, text),
        FieldRef::I32(slot) => parse_into(slot, FieldKind::Int, text),
        FieldRef::I64(slot) => parse_into(slot, FieldKind::Int, text),
        FieldRef::Isize(slot) => parse_into(slot, FieldKind::Int, text),
        FieldRef::U8(slot) => parse_into(slot, FieldKind::UInt, text),
        FieldRef::U16(slot) => parse_into(slot, FieldKind::UInt, text),
        FieldRef::U32(slot) => parse_into(slot, FieldKind::UInt, text),
        FieldRef::U64(slot) => parse_into(slot, FieldKind::UInt, text),
        FieldRef::Usize(slot) => parse_into(slot, FieldKind::UInt, text),
        FieldRef::F32(slot) => parse_into(slot, FieldKind::Float, text),
        FieldRef::F64(slot) => parse_into(slot, FieldKind::Float, text),
        FieldRef::Bool(slot) => {
            *slot = parse_bool(text).map_err(|message| CellError::new(FieldKind::Bool, text, message))?;
            Ok(())
        }
        FieldRef::Text(slot) => {
            slot.clear();
            slot.push_str(text.trim());
            Ok(())
        }
        FieldRef::Date(slot) => {
            *slot = parse_date(text, time_layout)?;
            Ok(())
        }
        FieldRef::DateTime(slot) => {
            *slot = parse_date_time(text, time_layout)?;
            Ok(())
        }
        FieldRef::Timestamp(slot) => {
            *slot = parse_timestamp(text, time_layout)?;
            Ok(())
        }
        FieldRef::Opaque => Ok(()),
    }
}

fn parse_into<T>(slot: &mut T, kind: FieldKind, text: &str) -> Result<(), CellError>
where
    T: FromStr,
    T::Err: Display,
{
    *slot = text.parse::<T>().map_err(|e| CellError::new(kind, text, e))?;
    Ok(())
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

fn parse_date(text: &str, layout: &str) -> Result<NaiveDate, CellError> {
    NaiveDate::parse_from_str(text, layout)
        .or_else(|err| {
            NaiveDateTime::parse_from_str(text, layout)
                .map(|dt| dt.date())
                .map_err(|_| err)
        })
        .map_err(|e| CellError::new(FieldKind::Date, text, e))
}

fn parse_date_time(text: &str, layout: &str) -> Result<NaiveDateTime, CellError> {
    // A date-only layout yields midnight.
    NaiveDateTime::parse_from_str(text, layout)
        .or_else(|err| {
            NaiveDate::parse_from_str(text, layout)
                .map(|d| d.and_time(NaiveTime::MIN))
                .map_err(|_| err)
        })
        .map_err(|e| CellError::new(FieldKind::DateTime, text, e))
}

fn parse_timestamp(text: &str, layout: &str) -> Result<DateTime<Utc>, CellError> {
    match DateTime::parse_from_str(text, layout) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => parse_date_time(text, layout).map(|dt| dt.and_utc()),
    }
}
