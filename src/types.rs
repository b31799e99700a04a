//! Record model used by the loaders.
//!
//! A [`Record`] is a fixed aggregate of positional fields. The loaders never look at field
//! names; they ask a record for a [`FieldRef`] by index and write one text cell through it.
//! Most callers declare their records with the [`record!`](crate::record) macro, which
//! implements the trait from the struct definition.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Static kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    UInt,
    /// 32 or 64-bit floating point.
    Float,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Text,
    /// Calendar date.
    Date,
    /// Calendar date and time, naive or UTC.
    DateTime,
    /// Anything the converter does not write to.
    Opaque,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Int => "integer",
            FieldKind::UInt => "unsigned integer",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::Text => "string",
            FieldKind::Date => "date",
            FieldKind::DateTime => "date-time",
            FieldKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Write-only binding to exactly one field of one record.
///
/// Lives only as long as the mutable borrow of the record it came from.
#[derive(Debug)]
pub enum FieldRef<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    Text(&'a mut String),
    Date(&'a mut NaiveDate),
    DateTime(&'a mut NaiveDateTime),
    Timestamp(&'a mut DateTime<Utc>),
    /// Nested aggregates, collections and indirections; never written.
    Opaque,
}

impl FieldRef<'_> {
    /// The static kind of the referenced field.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::I8(_) | FieldRef::I16(_) | FieldRef::I32(_) | FieldRef::I64(_) | FieldRef::Isize(_) => {
                FieldKind::Int
            }
            FieldRef::U8(_) | FieldRef::U16(_) | FieldRef::U32(_) | FieldRef::U64(_) | FieldRef::Usize(_) => {
                FieldKind::UInt
            }
            FieldRef::F32(_) | FieldRef::F64(_) => FieldKind::Float,
            FieldRef::Bool(_) => FieldKind::Bool,
            FieldRef::Text(_) => FieldKind::Text,
            FieldRef::Date(_) => FieldKind::Date,
            FieldRef::DateTime(_) | FieldRef::Timestamp(_) => FieldKind::DateTime,
            FieldRef::Opaque => FieldKind::Opaque,
        }
    }
}

/// Types that can appear as a field of a [`Record`].
///
/// Implemented for the supported primitives and, as [`FieldRef::Opaque`], for the common
/// container types. Implement it for your own nested types (returning `FieldRef::Opaque`) to
/// keep them in a record without the loader touching them.
pub trait AsFieldRef {
    fn as_field_ref(&mut self) -> FieldRef<'_>;
}

macro_rules! impl_as_field_ref {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsFieldRef for $ty {
                fn as_field_ref(&mut self) -> FieldRef<'_> {
                    FieldRef::$variant(self)
                }
            }
        )*
    };
}

impl_as_field_ref! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => Text,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamp,
}

impl<T> AsFieldRef for Vec<T> {
    fn as_field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Opaque
    }
}

impl<T> AsFieldRef for Option<T> {
    fn as_field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Opaque
    }
}

impl<T: ?Sized> AsFieldRef for Box<T> {
    fn as_field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Opaque
    }
}

impl<K, V, S> AsFieldRef for HashMap<K, V, S> {
    fn as_field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Opaque
    }
}

impl<K, V> AsFieldRef for BTreeMap<K, V> {
    fn as_field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Opaque
    }
}

/// A fixed aggregate of positional fields that a load can populate.
///
/// `field_mut(i)` must return `Some` for every `i < field_count()` and `None` beyond it.
/// Records are created with [`Default`] when a destination grows.
pub trait Record: Default {
    /// Number of top-level fields, in declaration order.
    fn field_count(&self) -> usize;

    /// Mutable binding to field `index`.
    fn field_mut(&mut self, index: usize) -> Option<FieldRef<'_>>;

    /// Declared name of field `index`, used in diagnostics only.
    fn field_name(&self, _index: usize) -> Option<&'static str> {
        None
    }
}

// Boxed records are records, so `Vec<Box<R>>` is a destination like `Vec<R>`.
impl<R: Record> Record for Box<R> {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldRef<'_>> {
        (**self).field_mut(index)
    }

    fn field_name(&self, index: usize) -> Option<&'static str> {
        (**self).field_name(index)
    }
}

/// Declare a struct and implement [`Record`](crate::Record) for it.
///
/// Fields are bound positionally in declaration order. Every field type must implement
/// [`AsFieldRef`](crate::AsFieldRef); column slots you want to ignore can simply be
/// declared with a leading underscore.
///
/// ```
/// use chrono::NaiveDate;
///
/// tinycsv::record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         pub id: i64,
///         pub name: String,
///         pub birth: NaiveDate,
///     }
/// }
///
/// let mut people: Vec<Person> = Vec::new();
/// tinycsv::load(Some("1,A,2020.01.01\n2,B,2020.02.02\n".as_bytes()), 0, 10, &mut people).unwrap();
/// assert_eq!(people.len(), 2);
/// assert_eq!(people[1].name, "B");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn field_count(&self) -> usize {
                <[&str]>::len(&[$(stringify!($field)),*])
            }

            #[allow(unused_mut, unused_assignments, unused_variables)]
            fn field_mut(&mut self, index: usize) -> ::core::option::Option<$crate::FieldRef<'_>> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return ::core::option::Option::Some($crate::AsFieldRef::as_field_ref(&mut self.$field));
                    }
                    position += 1;
                )*
                ::core::option::Option::None
            }

            fn field_name(&self, index: usize) -> ::core::option::Option<&'static str> {
                <[&'static str]>::get(&[$(stringify!($field)),*], index).copied()
            }
        }
    };
}
