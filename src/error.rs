//! Terminal errors of an iteration.
//!
//! End of input is not an error: it is reported by [advance](crate::iter::Iter::advance) returning false
//! with [err](crate::iter::Iter::err) returning None.
//! Failures of the resource release are not part of this enum, they are returned by [close](crate::iter::Close::close).

use thiserror::Error;

/// Why an iteration stopped before the end of its input.
#[derive(Debug, Error)]
pub enum IterError {
    /// read failure of the underlying resource
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// a line exceeded the maximum buffered length. `line` is 1-based.
    #[error("line {line} exceeds maximum length of {max} bytes")]
    TooLong { line: usize, max: usize },

    /// a line was not valid utf8. `line` is 1-based.
    #[error("line {line} is not valid utf8")]
    Encoding {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_long_message() {
        let err = IterError::TooLong { line: 3, max: 16 };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("16 bytes"));
    }

    #[test]
    fn test_encoding_keeps_source() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = IterError::Encoding { line: 1, source: bad };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe gone");
        let err: IterError = io.into();
        assert!(matches!(err, IterError::Io(_)));
        assert!(err.to_string().contains("pipe gone"));
    }
} // end of mod tests
