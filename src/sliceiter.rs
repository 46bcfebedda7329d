//! Producer over an in memory list of values.
//!

use std::io;

use crate::error::IterError;
use crate::iter::{Close, Iter};

/// Iterates over a borrowed slice. No copy of the values is made.
///
/// The cursor is in \[0, len\] : 0 before the first item, len once the last item has been made current.
/// Once there, advance keeps returning false.
#[derive(Clone, Debug)]
pub struct SliceIter<'a, T> {
    values: &'a [T],
    // index of the next item, the current one is at next - 1
    next: usize,
}

impl<'a, T> SliceIter<'a, T> {
    pub fn new(values: &'a [T]) -> Self {
        log::trace!("new slice iterator size : {}", values.len());
        SliceIter { values, next: 0 }
    }

    /// number of values in the slice
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// true when no item remains to be produced
    pub fn is_exhausted(&self) -> bool {
        self.next == self.values.len()
    }
} // end of impl SliceIter

impl<'a, T> From<&'a [T]> for SliceIter<'a, T> {
    fn from(values: &'a [T]) -> Self {
        SliceIter::new(values)
    }
}

impl<'a, T> From<&'a Vec<T>> for SliceIter<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        SliceIter::new(values.as_slice())
    }
}

impl<T> Iter for SliceIter<'_, T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.next < self.values.len() {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn item(&self) -> Option<&T> {
        match self.next {
            0 => None,
            n => self.values.get(n - 1),
        }
    }

    fn err(&self) -> Option<&IterError> {
        None
    }
} // end of impl Iter for SliceIter

impl<T> Close for SliceIter<'_, T> {
    /// nothing to release
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_exactly_n_items() {
        log_init_test();
        let values: Vec<u64> = (10..20).collect();
        let mut iter = SliceIter::new(&values);
        let mut k = 0;
        while iter.advance() {
            k += 1;
            assert_eq!(*iter.item().unwrap(), values[k - 1]);
            assert!(iter.err().is_none());
        }
        assert_eq!(k, values.len());
        assert!(iter.is_exhausted());
        for _ in 0..5 {
            assert!(!iter.advance());
            assert!(iter.err().is_none());
        }
        assert!(iter.is_exhausted());
    }

    #[test]
    fn test_empty() {
        log_init_test();
        let values: Vec<String> = Vec::new();
        let mut iter = SliceIter::from(&values);
        assert!(iter.is_empty());
        assert!(iter.item().is_none());
        assert!(!iter.advance());
        assert!(!iter.advance());
        assert!(iter.err().is_none());
    }

    #[test]
    fn test_item_is_stable_between_advances() {
        let values = ["x", "y"];
        let mut iter = SliceIter::from(&values[..]);
        assert!(!iter.is_exhausted());
        assert!(iter.advance());
        assert_eq!(iter.item(), Some(&"x"));
        assert_eq!(iter.item(), Some(&"x"));
        assert!(iter.advance());
        assert_eq!(iter.item(), Some(&"y"));
        assert!(iter.is_exhausted());
        assert!(!iter.advance());
        assert!(!iter.advance());
        assert!(iter.is_exhausted());
    }

    #[test]
    fn test_close_is_noop() {
        let values = vec![1, 2, 3];
        let mut iter = SliceIter::new(&values);
        assert!(iter.advance());
        assert!(iter.close().is_ok());
        assert!(iter.close().is_ok());
        // closing releases nothing, iteration goes on
        assert!(iter.advance());
        assert_eq!(iter.item(), Some(&2));
    }

    #[test]
    fn test_items_bridge() {
        let values = vec![String::from("a"), String::from("b")];
        let mut iter = SliceIter::new(&values);
        let got: Vec<String> = iter.items().collect();
        assert_eq!(got, values);
        assert_eq!(values.len(), iter.len());
    }
} // end of mod tests
