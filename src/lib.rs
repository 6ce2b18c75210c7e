pub use crate::parsing::{arg_parse, normalize_args, parse_args};
use crate::io::{keep_first, Destination, Source};
use crate::transform::{serialize, Mode};
use clap::Parser;
use color_eyre::eyre::Result;
use log::debug;
use std::process::ExitCode;

pub mod io;
mod parsing;
mod quoting;
pub mod transform;

/// Exit status when the source or destination cannot be opened.
pub const SETUP_FAILURE: u8 = 3;
/// Exit status when conversion, serialization or closing fails.
pub const RUNTIME_FAILURE: u8 = 1;

#[derive(Parser, Debug, Clone)]
#[clap(name = "csv2json")]
#[clap(version = "0.2")]
#[clap(about = "Converts csv to json", long_about = None)]
pub struct ApplicationOptions {
    /// Source path for file or URL (default: stdin)
    #[clap(long, value_name = "PATH", default_value = "-")]
    pub src: String,

    /// Destination file (default: stdout)
    #[clap(long, value_name = "PATH")]
    pub dest: Option<String>,

    /// Return each row as an array
    #[clap(long)]
    pub no_headers: bool,

    /// Pretty print JSON output
    #[clap(long)]
    pub pretty_print: bool,
}

impl ApplicationOptions {
    pub fn mode(&self) -> Mode {
        if self.no_headers {
            Mode::NoHeaders
        } else {
            Mode::WithHeaders
        }
    }
}

/// A configured one-shot conversion with both streams already open.
pub struct Encoder {
    src: Source,
    dest: Destination,
    mode: Mode,
    pretty_print: bool,
}

impl Encoder {
    pub fn from_options(options: &ApplicationOptions) -> Result<Self> {
        let src = Source::open(&options.src)?;
        let dest = Destination::create(options.dest.as_deref())?;

        Ok(Encoder {
            src,
            dest,
            mode: options.mode(),
            pretty_print: options.pretty_print,
        })
    }

    /// Converts the whole source and closes the destination, on success or failure.
    pub fn encode(self) -> Result<()> {
        let Encoder {
            src,
            mut dest,
            mode,
            pretty_print,
        } = self;

        // the source is dropped as soon as parsing returns
        let result = mode.parse(src).and_then(|document| {
            debug!("{:?} produced {} row(s)", mode, document.len());
            serialize(&document, &mut dest, pretty_print)
        });

        keep_first(result, dest.close())
    }
}

pub fn run_by_option(options: &ApplicationOptions) -> Result<()> {
    Encoder::from_options(options)?.encode()
}

pub fn run() -> ExitCode {
    let options = arg_parse();

    let encoder = match Encoder::from_options(&options) {
        Ok(encoder) => encoder,
        Err(err) => {
            eprintln!("Initial error: {:?}", err);
            return ExitCode::from(SETUP_FAILURE);
        }
    };

    match encoder.encode() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Run time error: {:?}", err);
            ExitCode::from(RUNTIME_FAILURE)
        }
    }
}
