//! CSV to JSON conversion.
//!
//! The whole input is parsed into a [`Document`] before anything is written, so a
//! malformed record never leaves half a JSON value behind on the output.

use color_eyre::eyre::{Result, WrapErr};
use crate::quoting::QuoteCheck;
use csv::{ByteRecord, Reader, ReaderBuilder};
use log::debug;
use serde::Serialize;
use serde_json::{map::Map, Value};
use std::io::{Read, Write};

/// One data row keyed by header name.
pub type Record = Map<String, Value>;

/// How rows are shaped in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// First record names the columns, every other record becomes an object.
    #[default]
    WithHeaders,
    /// Every record becomes an array of strings.
    NoHeaders,
}

impl Mode {
    pub fn parse<R: Read>(self, input: R) -> Result<Document> {
        match self {
            Mode::WithHeaders => parse_with_header(input),
            Mode::NoHeaders => parse_without_header(input),
        }
    }
}

/// The complete output value, accumulated in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Mapped(Vec<Record>),
    Rows(Vec<Vec<String>>),
}

impl Document {
    pub(crate) fn len(&self) -> usize {
        match self {
            Document::Mapped(records) => records.len(),
            Document::Rows(rows) => rows.len(),
        }
    }
}

/// Field bytes as text; invalid UTF-8 becomes U+FFFD.
fn field_text(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Column position to header name, taken from the first record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    pub fn from_record(record: &ByteRecord) -> Self {
        HeaderIndex {
            names: record.iter().map(field_text).collect(),
        }
    }

    /// Pairs each field with the header at the same position.
    ///
    /// Fields past the last header are dropped and headers past the last field
    /// produce no key. When a header name repeats, the later column's value wins.
    pub fn zip(&self, record: &ByteRecord) -> Record {
        self.names
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), Value::String(field_text(value))))
            .collect()
    }
}

fn csv_reader<R: Read>(input: R) -> Reader<QuoteCheck<R>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(QuoteCheck::new(input))
}

pub fn parse_with_header<R: Read>(input: R) -> Result<Document> {
    let mut rdr = csv_reader(input);
    let mut record = ByteRecord::new();

    if !rdr
        .read_byte_record(&mut record)
        .wrap_err("failed to parse CSV header")?
    {
        debug!("empty input, no header row");
        return Ok(Document::Mapped(Vec::new()));
    }
    let headers = HeaderIndex::from_record(&record);
    debug!("{} header column(s)", record.len());

    let mut data = Vec::new();
    while rdr
        .read_byte_record(&mut record)
        .wrap_err("failed to parse CSV record")?
    {
        data.push(headers.zip(&record));
    }
    debug!("parsed {} record(s)", data.len());

    Ok(Document::Mapped(data))
}

pub fn parse_without_header<R: Read>(input: R) -> Result<Document> {
    let rows = csv_reader(input)
        .byte_records()
        .map(|record| record.map(|fields| fields.iter().map(field_text).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()
        .wrap_err("failed to parse CSV record")?;
    debug!("parsed {} row(s)", rows.len());

    Ok(Document::Rows(rows))
}

/// Writes `document` as a single JSON value followed by a newline.
pub fn serialize<W: Write>(document: &Document, mut output: W, pretty_print: bool) -> Result<()> {
    if pretty_print {
        serde_json::to_writer_pretty(&mut output, document)
    } else {
        serde_json::to_writer(&mut output, document)
    }
    .wrap_err("failed to write JSON")?;
    output.write_all(b"\n").wrap_err("failed to write JSON")?;

    Ok(())
}

pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    mode: Mode,
    pretty_print: bool,
) -> Result<()> {
    let document = mode.parse(input)?;
    serialize(&document, output, pretty_print)
}
