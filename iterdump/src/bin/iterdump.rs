//! Dumps the items of an input, one per line.
//!
//! usage : iterdump [--number] [--max-line-len n] inputs...
//!
//! With a single input, `-` reads stdin, `file://path` or an existing path reads a file.
//! Otherwise the inputs themselves are dumped.
//! Log level is set with RUST_LOG.

use cpu_time::ProcessTime;
use std::io::Write;
use std::time::{Duration, SystemTime};

use anyhow::{Context, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};

use inputiter::prelude::*;

//========================================

/// Dump parameters
struct DumpParams {
    inputs: Vec<String>,
    numbered: bool,
    scan: ScanParams,
}

impl DumpParams {
    fn new(inputs: Vec<String>, numbered: bool, max_line_len: usize) -> DumpParams {
        DumpParams {
            inputs,
            numbered,
            scan: ScanParams::new(max_line_len, DEFAULT_BUFFER_CAPACITY),
        }
    }
    //
    fn get_inputs(&self) -> &[String] {
        &self.inputs
    }

    //
    fn is_numbered(&self) -> bool {
        self.numbered
    }

    //
    fn get_scan_params(&self) -> &ScanParams {
        &self.scan
    }
} // end of impl DumpParams

//========================================

fn parse_cmd(matches: &ArgMatches) -> anyhow::Result<DumpParams> {
    log::debug!("in parse_cmd");
    let inputs: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let numbered = matches.get_flag("number");
    let max_line_len = matches
        .get_one::<usize>("max_line_len")
        .copied()
        .unwrap_or(DEFAULT_MAX_LINE_LEN);
    if max_line_len == 0 {
        return Err(anyhow!("max-line-len must be positive"));
    }
    log::debug!(
        "got {} inputs, numbered : {}, max line len : {}",
        inputs.len(),
        numbered,
        max_line_len
    );
    Ok(DumpParams::new(inputs, numbered, max_line_len))
} // end of parse_cmd

fn command() -> Command {
    Command::new("iterdump")
        .arg(
            Arg::new("number")
                .long("number")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("prefix each item with its rank, starting at 1"),
        )
        .arg(
            Arg::new("max_line_len")
                .long("max-line-len")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .help("maximum length in bytes of a line read from a file or stdin, default 65536"),
        )
        .arg(
            Arg::new("inputs")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(String))
                .help("-, a file, file://path, or the items themselves"),
        )
} // end of command

//========================================

// writes items until the input is exhausted or fails.
fn write_items<I, W>(iter: &mut I, numbered: bool, out: &mut W) -> anyhow::Result<usize>
where
    I: Iter<Item = String> + ?Sized,
    W: Write,
{
    let mut nb_items = 0;
    while iter.advance() {
        nb_items += 1;
        let item = iter.item().map(|s| s.as_str()).unwrap_or_default();
        if numbered {
            writeln!(out, "{}\t{}", nb_items, item)?;
        } else {
            writeln!(out, "{}", item)?;
        }
    }
    out.flush()?;
    Ok(nb_items)
}

/// Dumps all items to out and closes the input, whatever happened.
/// Returns the number of items written.
fn dump<I, W>(iter: &mut I, numbered: bool, out: &mut W) -> anyhow::Result<usize>
where
    I: IterClose<Item = String> + ?Sized,
    W: Write,
{
    let written = write_items(iter, numbered, out);
    let closed = iter.close();
    let nb_items = written?;
    if let Some(e) = iter.err() {
        if let Err(close_err) = &closed {
            log::warn!("closing failed input : {}", close_err);
        }
        return Err(anyhow!("input failed after {} items : {}", nb_items, e));
    }
    closed.context("cannot close input")?;
    Ok(nb_items)
} // end of dump

fn run(params: &DumpParams) -> anyhow::Result<usize> {
    let mut iter = open_with_params(params.get_inputs(), params.get_scan_params())?;
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    dump(&mut iter, params.is_numbered(), &mut out)
}

//==========================================

pub fn main() {
    //
    let _ = env_logger::builder().try_init();
    //
    log::info!("running iterdump");
    //
    let matches = command().get_matches();
    let params = match parse_cmd(&matches) {
        Ok(params) => params,
        Err(e) => {
            log::error!("bad command : {:#}", e);
            eprintln!("iterdump : {:#}", e);
            std::process::exit(2);
        }
    };
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    //
    match run(&params) {
        Ok(nb_items) => {
            let cpu_time: Duration = cpu_start.elapsed();
            log::info!(
                "dumped {} items, sys time(ms) {:?} cpu time(ms) {:?}",
                nb_items,
                sys_now.elapsed().map(|d| d.as_millis()).unwrap_or(0),
                cpu_time.as_millis()
            );
        }
        Err(e) => {
            log::error!("iterdump failed : {:#}", e);
            eprintln!("iterdump : {:#}", e);
            std::process::exit(1);
        }
    }
} // end of main

//==========================================

#[cfg(test)]
mod tests {

    use super::*;
    use std::cell::Cell;
    use std::io;
    use std::io::Read;
    use std::rc::Rc;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // reader failing after its content, counting closes
    struct Flaky {
        data: io::Cursor<Vec<u8>>,
        fail: bool,
        closes: Rc<Cell<usize>>,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 && self.fail {
                return Err(io::Error::other("device vanished"));
            }
            Ok(n)
        }
    }

    impl Close for Flaky {
        fn close(&mut self) -> io::Result<()> {
            self.closes.set(self.closes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_parse_cmd() {
        log_init_test();
        let matches = command()
            .try_get_matches_from(["iterdump", "-n", "--max-line-len", "12", "a", "b"])
            .unwrap();
        let params = parse_cmd(&matches).unwrap();
        assert_eq!(params.get_inputs(), &["a".to_string(), "b".to_string()]);
        assert!(params.is_numbered());
        assert_eq!(params.get_scan_params().get_max_line_len(), 12);
    }

    #[test]
    fn test_parse_cmd_defaults() {
        let matches = command().try_get_matches_from(["iterdump"]).unwrap();
        let params = parse_cmd(&matches).unwrap();
        assert!(params.get_inputs().is_empty());
        assert!(!params.is_numbered());
        assert_eq!(
            params.get_scan_params().get_max_line_len(),
            DEFAULT_MAX_LINE_LEN
        );
    }

    #[test]
    fn test_parse_cmd_rejects_zero_len() {
        let matches = command()
            .try_get_matches_from(["iterdump", "--max-line-len", "0"])
            .unwrap();
        assert!(parse_cmd(&matches).is_err());
    }

    #[test]
    fn test_dump_items_numbered() {
        log_init_test();
        let values = vec!["x".to_string(), "y".to_string()];
        let mut iter = SliceIter::new(&values);
        let mut out = Vec::new();
        let nb = dump(&mut iter, true, &mut out).unwrap();
        assert_eq!(nb, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "1\tx\n2\ty\n");
    }

    #[test]
    fn test_dump_lines() {
        log_init_test();
        let closes = Rc::new(Cell::new(0));
        let resource = Flaky {
            data: io::Cursor::new(b"a\nb\n".to_vec()),
            fail: false,
            closes: closes.clone(),
        };
        let mut iter = LineIter::new(resource);
        let mut out = Vec::new();
        assert_eq!(dump(&mut iter, false, &mut out).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_dump_failure_still_closes() {
        log_init_test();
        let closes = Rc::new(Cell::new(0));
        let resource = Flaky {
            data: io::Cursor::new(b"a\nb".to_vec()),
            fail: true,
            closes: closes.clone(),
        };
        let mut iter = LineIter::new(resource);
        let mut out = Vec::new();
        let res = dump(&mut iter, false, &mut out);
        let msg = res.unwrap_err().to_string();
        assert!(msg.contains("device vanished"));
        assert_eq!(String::from_utf8(out).unwrap(), "a\n");
        assert_eq!(closes.get(), 1);
    }
} // end of mod tests
