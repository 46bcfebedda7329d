//! Line scanning producer.
//!
//! [LineIter] owns a readable resource and returns its content one line at a time,
//! without the line terminator (`\n` or `\r\n`).
//! An unterminated last line is still returned, a final newline does not produce an extra empty line.
//!
//! The resource is released exactly once : by [close](Close::close), or when the iterator is dropped.

use std::io;
use std::io::{BufRead, BufReader, Read};

use crate::error::IterError;
use crate::iter::{Close, Iter};

/// Default maximum length of a line in bytes, terminator excluded.
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Default initial capacity of the read buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Scanning parameters
#[derive(Copy, Clone, Debug)]
pub struct ScanParams {
    /// a line longer than this (in bytes, `\r` included, `\n` excluded) stops the iteration with an error
    max_line_len: usize,
    /// capacity of the read buffer
    capacity: usize,
}

impl ScanParams {
    pub fn new(max_line_len: usize, capacity: usize) -> Self {
        ScanParams {
            max_line_len,
            capacity: capacity.max(1),
        }
    }

    //
    pub fn get_max_line_len(&self) -> usize {
        self.max_line_len
    }

    //
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }
} // end of impl ScanParams

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

//==========================================================

/// Iterates over the lines of a resource.
pub struct LineIter<R: Read + Close> {
    // None once the resource has been closed
    reader: Option<BufReader<R>>,
    max_line_len: usize,
    // raw bytes of the line being scanned
    buf: Vec<u8>,
    // line made current by the last successful advance
    current: Option<String>,
    // number of lines produced
    nb_lines: usize,
    // set at end of input, on error or after close. Permanent.
    done: bool,
    error: Option<IterError>,
}

impl<R: Read + Close> LineIter<R> {
    /// takes ownership of the resource, with default parameters
    pub fn new(resource: R) -> Self {
        LineIter::with_params(resource, &ScanParams::default())
    }

    pub fn with_params(resource: R, params: &ScanParams) -> Self {
        log::debug!(
            "new line iterator, max line len : {}, buffer capacity : {}",
            params.get_max_line_len(),
            params.get_capacity()
        );
        LineIter {
            reader: Some(BufReader::with_capacity(params.get_capacity(), resource)),
            max_line_len: params.get_max_line_len(),
            buf: Vec::new(),
            current: None,
            nb_lines: 0,
            done: false,
            error: None,
        }
    }

    /// returns the number of lines produced so far
    pub fn get_nb_lines(&self) -> usize {
        self.nb_lines
    }

    /// current line as a str
    pub fn line(&self) -> Option<&str> {
        self.current.as_deref()
    }

    // records a terminal error
    fn fail(&mut self, error: IterError) -> bool {
        log::debug!("line iterator stopped after {} lines : {}", self.nb_lines, error);
        self.error = Some(error);
        self.done = true;
        false
    }
} // end of impl LineIter

impl<R: Read + Close> Iter for LineIter<R> {
    type Item = String;

    fn advance(&mut self) -> bool {
        self.current = None;
        if self.done {
            return false;
        }
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => {
                self.done = true;
                return false;
            }
        };
        let lineno = self.nb_lines + 1;
        let last = match scan_line(reader, &mut self.buf, self.max_line_len, lineno) {
            Ok(Scanned::Line) => false,
            Ok(Scanned::LastLine) => true,
            Ok(Scanned::End) => {
                log::debug!("line iterator reached end of input after {} lines", self.nb_lines);
                self.done = true;
                return false;
            }
            Err(error) => return self.fail(error),
        };
        // end of input is permanent, the resource is not read again
        self.done = last;
        match String::from_utf8(std::mem::take(&mut self.buf)) {
            Ok(line) => {
                log::trace!("line {} : {} bytes", lineno, line.len());
                self.nb_lines = lineno;
                self.current = Some(line);
                true
            }
            Err(source) => self.fail(IterError::Encoding {
                line: lineno,
                source,
            }),
        }
    } // end of advance

    fn item(&self) -> Option<&String> {
        self.current.as_ref()
    }

    fn err(&self) -> Option<&IterError> {
        self.error.as_ref()
    }
} // end of impl Iter for LineIter

impl<R: Read + Close> Close for LineIter<R> {
    /// Closes the resource. A second call does nothing.
    fn close(&mut self) -> io::Result<()> {
        self.done = true;
        self.current = None;
        match self.reader.take() {
            Some(reader) => {
                log::debug!("closing resource after {} lines", self.nb_lines);
                let mut resource = reader.into_inner();
                resource.close()
            }
            None => Ok(()),
        }
    }
}

impl<R: Read + Close> Drop for LineIter<R> {
    fn drop(&mut self) {
        if self.reader.is_some() {
            if let Err(e) = self.close() {
                log::warn!("closing resource of dropped line iterator failed : {}", e);
            }
        }
    }
}

//==========================================================

// outcome of scan_line
enum Scanned {
    // a terminated line
    Line,
    // an unterminated line followed by end of input
    LastLine,
    // end of input, nothing scanned
    End,
}

// Reads one line into `line`, terminator excluded.
fn scan_line<B: BufRead>(
    reader: &mut B,
    line: &mut Vec<u8>,
    max_len: usize,
    lineno: usize,
) -> Result<Scanned, IterError> {
    line.clear();
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(IterError::Io(e)),
        };
        if available.is_empty() {
            if line.is_empty() {
                return Ok(Scanned::End);
            }
            drop_cr(line);
            return Ok(Scanned::LastLine);
        }
        let (used, found) = match available.iter().position(|b| *b == b'\n') {
            Some(pos) => (pos, true),
            None => (available.len(), false),
        };
        if line.len() + used > max_len {
            return Err(IterError::TooLong {
                line: lineno,
                max: max_len,
            });
        }
        line.extend_from_slice(&available[..used]);
        reader.consume(if found { used + 1 } else { used });
        if found {
            drop_cr(line);
            return Ok(Scanned::Line);
        }
    }
} // end of scan_line

fn drop_cr(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

//==========================================================

// end of mod tests
