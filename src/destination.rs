//! Output collections that a load writes into.
//!
//! A [`Destination`] is an ordered, indexable sequence of [`Record`]s that can be grown to a
//! required length before any field is written. Supported shapes:
//!
//! - `Vec<R>`: records held inline, which may move when the vector grows; `Vec<Box<R>>` is the
//!   same shape since `Box<R>` is itself a record, and boxed records keep their address
//! - `Vec<Option<Box<R>>>`: nullable owned indirection; empty slots are populated on growth
//! - `[R]`: a fixed-size slice, usable only when it is already long enough
//!
//! [`resolve`] turns an opaque `&mut dyn Any` handle into a [`Resolved`] destination for callers
//! that do not know the collection shape statically.

use std::any::Any;

use crate::error::{LoadError, LoadResult};
use crate::types::Record;

/// A record collection that a load can grow and populate in place.
pub trait Destination {
    type Record: Record;

    /// Current number of slots.
    fn len(&self) -> usize;

    /// `true` when the collection holds no slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grow to at least `len` slots.
    ///
    /// Never shrinks, and never replaces a record that is already present. Every slot that is
    /// unpopulated afterwards holds a default record.
    ///
    /// Only boxed shapes (`Vec<Box<R>>`, `Vec<Option<Box<R>>>`) keep existing records at the same
    /// address. `Vec<R>` may reallocate and move them; a fixed slice never moves but cannot grow.
    fn ensure_len(&mut self, len: usize) -> LoadResult<()>;

    /// The record at `index`, or `None` if the slot is out of range or unpopulated.
    fn record_mut(&mut self, index: usize) -> Option<&mut Self::Record>;
}

impl<R: Record> Destination for Vec<R> {
    type Record = R;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ensure_len(&mut self, len: usize) -> LoadResult<()> {
        if self.len() < len {
            self.resize_with(len, R::default);
        }
        Ok(())
    }

    fn record_mut(&mut self, index: usize) -> Option<&mut R> {
        self.get_mut(index)
    }
}

impl<R: Record> Destination for Vec<Option<Box<R>>> {
    type Record = R;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn ensure_len(&mut self, len: usize) -> LoadResult<()> {
        if self.len() < len {
            self.resize_with(len, || None);
        }
        // Slots beyond `len` are filled as well, so every slot is populated afterwards.
        for slot in self.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(Box::default());
        }
        Ok(())
    }

    fn record_mut(&mut self, index: usize) -> Option<&mut R> {
        self.get_mut(index).and_then(|slot| slot.as_deref_mut())
    }
}

impl<R: Record> Destination for [R] {
    type Record = R;

    fn len(&self) -> usize {
        <[R]>::len(self)
    }

    fn ensure_len(&mut self, len: usize) -> LoadResult<()> {
        if self.len() < len {
            return Err(LoadError::NotAddressable {
                required: len,
                available: self.len(),
            });
        }
        Ok(())
    }

    fn record_mut(&mut self, index: usize) -> Option<&mut R> {
        self.get_mut(index)
    }
}

/// A vector destination recovered from an opaque handle by [`resolve`].
#[derive(Debug)]
pub enum Resolved<'a, R> {
    Inline(&'a mut Vec<R>),
    Boxed(&'a mut Vec<Box<R>>),
    Nullable(&'a mut Vec<Option<Box<R>>>),
}

impl<R: Record> Destination for Resolved<'_, R> {
    type Record = R;

    fn len(&self) -> usize {
        match self {
            Resolved::Inline(v) => v.len(),
            Resolved::Boxed(v) => v.len(),
            Resolved::Nullable(v) => v.len(),
        }
    }

    fn ensure_len(&mut self, len: usize) -> LoadResult<()> {
        match self {
            Resolved::Inline(v) => v.ensure_len(len),
            Resolved::Boxed(v) => v.ensure_len(len),
            Resolved::Nullable(v) => v.ensure_len(len),
        }
    }

    fn record_mut(&mut self, index: usize) -> Option<&mut R> {
        match self {
            Resolved::Inline(v) => v.get_mut(index),
            Resolved::Boxed(v) => v.get_mut(index).map(|boxed| &mut **boxed),
            Resolved::Nullable(v) => v.record_mut(index),
        }
    }
}

/// Resolve an opaque output handle into a destination of `R`.
///
/// Accepts `Vec<R>`, `Vec<Box<R>>` and `Vec<Option<Box<R>>>`; anything else fails with
/// [`LoadError::InvalidTarget`].
///
/// ```
/// use std::any::Any;
///
/// tinycsv::record! {
///     #[derive(Default)]
///     struct Row { id: i32 }
/// }
///
/// let mut rows: Vec<Box<Row>> = Vec::new();
/// let handle: &mut dyn Any = &mut rows;
/// let mut dest = tinycsv::resolve::<Row>(handle).unwrap();
/// tinycsv::horizontal::load(Some("1\n2\n".as_bytes()), &mut dest, &Default::default()).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].id, 2);
/// ```
pub fn resolve<R: Record + 'static>(out: &mut dyn Any) -> LoadResult<Resolved<'_, R>> {
    if out.is::<Vec<R>>() {
        return out.downcast_mut().map(Resolved::Inline).ok_or(LoadError::InvalidTarget);
    }
    if out.is::<Vec<Box<R>>>() {
        return out.downcast_mut().map(Resolved::Boxed).ok_or(LoadError::InvalidTarget);
    }
    out.downcast_mut().map(Resolved::Nullable).ok_or(LoadError::InvalidTarget)
}
