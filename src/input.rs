//! Choice of the producer from command line arguments.
//!
//! A single argument may designate a source of lines :
//!   - `-` reads standard input
//!   - `file://<path>` reads the file, which must exist
//!   - the path of an existing file reads that file
//!
//! Otherwise the arguments themselves are the items.

use std::fs::File;
use std::io;

use anyhow::{Context, anyhow};

use crate::iter::IterClose;
use crate::lineiter::{LineIter, ScanParams};
use crate::sliceiter::SliceIter;

/// argument designating standard input
pub const STDIN_ARG: &str = "-";

/// prefix of an argument designating a file explicitly
pub const FILE_URL_PREFIX: &str = "file://";

/// Returns an iterator over the lines designated by args, or over args themselves.
/// The caller must close the returned iterator.
pub fn open(args: &[String]) -> anyhow::Result<Box<dyn IterClose<Item = String> + '_>> {
    open_with_params(args, &ScanParams::default())
}

/// Same as [open], lines being scanned with params.
pub fn open_with_params<'a>(
    args: &'a [String],
    params: &ScanParams,
) -> anyhow::Result<Box<dyn IterClose<Item = String> + 'a>> {
    //
    if let [arg] = args {
        if arg == STDIN_ARG {
            log::debug!("iterating over lines of stdin");
            return Ok(Box::new(LineIter::with_params(io::stdin(), params)));
        }
        if let Some(path) = arg.strip_prefix(FILE_URL_PREFIX) {
            let file = File::open(path).with_context(|| format!("cannot open {}", arg))?;
            log::debug!("iterating over lines of file {}", path);
            return Ok(Box::new(LineIter::with_params(file, params)));
        }
        match File::open(arg) {
            Ok(file) => {
                log::debug!("iterating over lines of file {}", arg);
                return Ok(Box::new(LineIter::with_params(file, params)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} is not a file, taken as an item", arg);
            }
            Err(e) => {
                return Err(anyhow!(e).context(format!("cannot open {}", arg)));
            }
        }
    }
    //
    log::debug!("iterating over {} arguments", args.len());
    Ok(Box::new(SliceIter::new(args)))
} // end of open_with_params

// end of mod tests
