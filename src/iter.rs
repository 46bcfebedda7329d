//! The pull iteration contract shared by all producers.
//!
//! A consumer drives a producer this way:
//!
//! ```
//! use inputiter::prelude::*;
//!
//! let values = vec![1, 2, 3];
//! let mut iter = SliceIter::new(&values);
//! let mut sum = 0;
//! while iter.advance() {
//!     sum += *iter.item().unwrap();
//! }
//! assert!(iter.err().is_none());
//! assert_eq!(sum, 6);
//! ```
//!
//! Iterating and closing are two separate capabilities : [Iter] and [Close].
//! A consumer which must release what it iterates over asks for [IterClose].

use std::io;

use crate::error::IterError;

/// Single item at a time, error terminated iteration.
///
/// All the work is done synchronously inside [advance](Iter::advance), nothing happens before it is called.
pub trait Iter {
    /// the item produced
    type Item;

    /// Moves to the next item. Returns true if an item is available with [item](Iter::item),
    /// false if the input is exhausted or an error occurred.
    /// Must be called before each call to item, including the first one.
    fn advance(&mut self) -> bool;

    /// Returns the current item.
    /// The value is only meaningful after a call to advance that returned true.
    /// Before the first advance producers of this crate return None, after exhaustion the value is unspecified.
    fn item(&self) -> Option<&Self::Item>;

    /// Returns the error that stopped the iteration, None if iteration ended normally or is not finished.
    /// Must be checked after advance returned false to distinguish end of input from failure.
    fn err(&self) -> Option<&IterError>;

    /// Borrows the producer as a standard [Iterator] yielding clones of the items.
    /// The terminal error stays available on the producer once the returned iterator is dropped.
    fn items(&mut self) -> Items<'_, Self>
    where
        Self: Sized,
    {
        Items { iter: self }
    }
} // end of trait Iter

/// Release of an owned resource.
///
/// For [File](std::fs::File) and [Stdin](std::io::Stdin) close always succeeds : std has no fallible close,
/// the descriptor is released when the handle is dropped, and a failure at that point is not reported.
pub trait Close {
    /// Releases the resource and reports the failure, if any.
    fn close(&mut self) -> io::Result<()>;
}

/// A producer that can be iterated and must be closed.
pub trait IterClose: Iter + Close {}

impl<T: Iter + Close + ?Sized> IterClose for T {}

//=========================================================

impl<I: Iter + ?Sized> Iter for Box<I> {
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn item(&self) -> Option<&Self::Item> {
        (**self).item()
    }

    fn err(&self) -> Option<&IterError> {
        (**self).err()
    }
}

impl<I: Iter + ?Sized> Iter for &mut I {
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn item(&self) -> Option<&Self::Item> {
        (**self).item()
    }

    fn err(&self) -> Option<&IterError> {
        (**self).err()
    }
}

impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

// std handles are released on drop, which the owner does right after close.

impl Close for std::fs::File {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for io::Stdin {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T> Close for io::Cursor<T> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Close for &[u8] {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//=========================================================

/// Standard [Iterator] view of an [Iter], obtained by [Iter::items].
pub struct Items<'a, I: Iter> {
    iter: &'a mut I,
}

impl<I> Iterator for Items<'_, I>
where
    I: Iter,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iter.advance() {
            self.iter.item().cloned()
        } else {
            None
        }
    }
} // end of impl Iterator for Items

// end of mod tests
