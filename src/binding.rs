//! Field reference extraction.
//!
//! [`FieldRefs`] captures the field layout of a destination once, after it has been grown, and
//! then hands out one [`FieldRef`] per (record, field) pair on demand. Nothing is borrowed
//! between calls, so the destination cannot be resized under a live reference.

use crate::destination::Destination;
use crate::error::{LoadError, LoadResult};
use crate::types::{FieldKind, FieldRef, Record};

/// Field layout of a destination, taken from its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRefs {
    records: usize,
    kinds: Vec<FieldKind>,
    names: Vec<Option<&'static str>>,
}

impl FieldRefs {
    /// Validate `dest` and record its field layout.
    ///
    /// Fails with [`LoadError::UnsupportedElementType`] when the destination is empty, the
    /// record exposes no fields, or the elements disagree on their field count, and with
    /// [`LoadError::NotSettable`] when a slot in range holds no record.
    pub fn extract<D>(dest: &mut D) -> LoadResult<Self>
    where
        D: Destination + ?Sized,
    {
        let records = dest.len();
        if records == 0 {
            return Err(unsupported("destination holds no elements"));
        }

        let first = dest
            .record_mut(0)
            .ok_or(LoadError::NotSettable { record: 0, field: 0 })?;
        let field_count = first.field_count();
        if field_count == 0 {
            return Err(unsupported("record declares no fields"));
        }

        let mut kinds = Vec::with_capacity(field_count);
        let mut names = Vec::with_capacity(field_count);
        for field in 0..field_count {
            let name = first.field_name(field);
            let kind = first
                .field_mut(field)
                .map(|f| f.kind())
                .ok_or(LoadError::NotSettable { record: 0, field })?;
            kinds.push(kind);
            names.push(name);
        }

        for record in 1..records {
            let elem = dest
                .record_mut(record)
                .ok_or(LoadError::NotSettable { record, field: 0 })?;
            if elem.field_count() != field_count {
                return Err(unsupported(&format!(
                    "element {record} declares {} fields, element 0 declares {field_count}",
                    elem.field_count()
                )));
            }
        }

        Ok(Self { records, kinds, names })
    }

    /// Number of records covered by the layout.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of fields per record.
    pub fn field_count(&self) -> usize {
        self.kinds.len()
    }

    /// Static kind of field `field`.
    pub fn kind(&self, field: usize) -> Option<FieldKind> {
        self.kinds.get(field).copied()
    }

    /// Field label for diagnostics: the declared name when known, else the index.
    pub fn label(&self, field: usize) -> String {
        match self.names.get(field).copied().flatten() {
            Some(name) => name.to_owned(),
            None => field.to_string(),
        }
    }

    /// Bind field `field` of record `record` for writing.
    pub fn bind<'d, D>(&self, dest: &'d mut D, record: usize, field: usize) -> LoadResult<FieldRef<'d>>
    where
        D: Destination + ?Sized,
    {
        if record >= self.records || field >= self.kinds.len() {
            return Err(LoadError::NotSettable { record, field });
        }
        dest.record_mut(record)
            .and_then(|r| r.field_mut(field))
            .ok_or(LoadError::NotSettable { record, field })
    }
}

fn unsupported(reason: &str) -> LoadError {
    LoadError::UnsupportedElementType {
        reason: reason.to_owned(),
    }
}
