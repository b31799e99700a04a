//! `tinycsv` loads delimited text tables straight into user-defined record structs.
//!
//! Fields are bound by position: column `k` of a row goes to the `k`-th declared field of a
//! record. Two table orientations are supported:
//!
//! - **horizontal** ([`load()`], [`horizontal::load`]): one source row per record
//! - **vertical** ([`load_vertically`], [`vertical::load`]): one source row per field, one
//!   source column per record
//!
//! ## Records
//!
//! A record is any type implementing [`Record`]. The [`record!`] macro declares a struct and
//! implements the trait for it. Supported field types:
//!
//! - signed and unsigned integers of any width
//! - `f32`, `f64`
//! - `bool`
//! - `String` (stored trimmed)
//! - `chrono::NaiveDate`, `chrono::NaiveDateTime`, `chrono::DateTime<Utc>`, parsed with the
//!   configured time layout (default [`DEFAULT_TIME_LAYOUT`], `%Y.%m.%d`)
//!
//! Fields of other types (`Vec`, `Option`, `Box`, maps, nested structs implementing
//! [`AsFieldRef`]) occupy their position but are never written.
//!
//! ## Destinations
//!
//! Loads write into a [`Destination`]: `Vec<R>`, `Vec<Box<R>>`, `Vec<Option<Box<R>>>` or a
//! fixed-size `[R]`. A destination is grown to the number of records in the source, never
//! shrunk; records past the source length keep their contents. [`resolve`] accepts the vector
//! shapes behind a `&mut dyn Any`.
//!
//! ## Errors
//!
//! Shape problems (malformed rows, margins, limits, field counts) fail the load with a
//! [`LoadError`]. Cells whose text does not parse are left as they were and counted in
//! [`LoadStats::rejected_cells`]; set [`LoadOptions::strict`] to fail on them instead.
//!
//! ## Quick example: horizontal
//!
//! ```rust
//! use chrono::NaiveDate;
//!
//! tinycsv::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub id: i64,
//!         pub name: String,
//!         pub birth: NaiveDate,
//!     }
//! }
//!
//! let csv = "No,Name,Birth\n1,Alex,1999.01.01\n2,Bert,2001.02.02\n";
//! let mut people: Vec<Person> = Vec::new();
//! let stats = tinycsv::load(Some(csv.as_bytes()), 1, 100, &mut people).unwrap();
//!
//! assert_eq!(stats.records, 2);
//! assert_eq!(people[1].name, "Bert");
//! assert_eq!(people[1].birth, NaiveDate::from_ymd_opt(2001, 2, 2).unwrap());
//! ```
//!
//! ## Quick example: vertical
//!
//! ```rust
//! tinycsv::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub id: i64,
//!         pub name: String,
//!         pub age: u8,
//!     }
//! }
//!
//! let csv = "header,A,B\nNo,1,2\nName,Alex,Bert\nAge,41,42\n";
//! let mut people: Vec<Box<Person>> = Vec::new();
//! tinycsv::load_vertically(Some(csv.as_bytes()), 1, 1, 100, &mut people).unwrap();
//!
//! assert_eq!(people.len(), 2);
//! assert_eq!((people[0].id, people[0].name.as_str(), people[0].age), (1, "Alex", 41));
//! ```
//!
//! ## Modules
//!
//! - [`mod@load`]: entrypoints, options and observers
//! - [`types`]: the record model
//! - [`destination`]: output collections
//! - [`binding`]: field reference extraction
//! - [`convert`]: cell conversion
//! - [`error`]: error types

pub mod binding;
pub mod convert;
pub mod destination;
pub mod error;
pub mod load;
pub mod types;

pub use binding::FieldRefs;
pub use convert::{convert_cell, CellError, DEFAULT_TIME_LAYOUT};
pub use destination::{resolve, Destination, Resolved};
pub use error::{LoadError, LoadResult, Margin};
pub use load::{
    horizontal, load, load_from_path, load_from_reader, load_vertically, vertical, LoadConfig, LoadContext,
    LoadObserver, LoadOptions, LoadSeverity, LoadStats, Orientation, TracingObserver, DEFAULT_MAX_COLS,
    DEFAULT_MAX_ROWS,
};
pub use types::{AsFieldRef, FieldKind, FieldRef, Record};
