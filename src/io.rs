//! Opening the input and output streams.

use color_eyre::eyre::{Result, WrapErr};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Read, StdinLock, StdoutLock, Write};

/// Readable input: standard input, a local file or the body of an HTTP response.
pub enum Source {
    Stdin(StdinLock<'static>),
    File(File),
    Url(Box<reqwest::blocking::Response>),
}

fn is_stdio(location: &str) -> bool {
    location.is_empty() || location == "-"
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Source {
    pub fn open(location: &str) -> Result<Self> {
        if is_stdio(location) {
            debug!("reading from stdin");
            return Ok(Source::Stdin(io::stdin().lock()));
        }

        if is_url(location) {
            debug!("fetching {}", location);
            let response = reqwest::blocking::get(location)
                .wrap_err_with(|| format!("failed to fetch {}", location))?
                .error_for_status()
                .wrap_err_with(|| format!("failed to fetch {}", location))?;
            return Ok(Source::Url(Box::new(response)));
        }

        debug!("reading from {}", location);
        let file = File::open(location).wrap_err_with(|| format!("failed to open {}", location))?;
        Ok(Source::File(file))
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Stdin(stdin) => stdin.read(buf),
            Source::File(file) => file.read(buf),
            Source::Url(response) => response.read(buf),
        }
    }
}

/// Buffered output: standard output or a created file.
pub enum Destination {
    Stdout(BufWriter<StdoutLock<'static>>),
    File(BufWriter<File>),
}

impl Destination {
    /// `None`, an empty path or `-` all mean stdout. A file is created or truncated.
    pub fn create(location: Option<&str>) -> Result<Self> {
        match location {
            Some(path) if !is_stdio(path) => {
                debug!("writing to {}", path);
                let file = File::create(path).wrap_err_with(|| format!("failed to create {}", path))?;
                Ok(Destination::File(BufWriter::new(file)))
            }
            _ => {
                debug!("writing to stdout");
                Ok(Destination::Stdout(BufWriter::new(io::stdout().lock())))
            }
        }
    }

    /// Flushes and releases the stream.
    pub fn close(mut self) -> Result<()> {
        self.flush().wrap_err("failed to close destination")
    }
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Destination::Stdout(out) => out.write(buf),
            Destination::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Destination::Stdout(out) => out.flush(),
            Destination::File(out) => out.flush(),
        }
    }
}

/// Combines the result of an operation with the result of releasing its stream.
///
/// The earlier error wins; a close error only surfaces when the operation succeeded.
pub fn keep_first<T>(result: Result<T>, close: Result<()>) -> Result<T> {
    match (result, close) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(discarded)) => {
            debug!("discarding close error: {:?}", discarded);
            Err(err)
        }
    }
}
