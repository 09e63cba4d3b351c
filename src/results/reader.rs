//! Result document reader
//!
//! Only the first element of a result document matters: its `tests`,
//! `failures`, `time` and `name` attributes. Reading stops as soon as that
//! element has been seen.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::SuiteSummary;

/// Result document errors
#[derive(Error, Debug)]
pub enum ResultError {
    #[error("Failed to open result file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed result document: {0}")]
    Xml(String),

    #[error("Result document contains no element")]
    Empty,

    #[error("Missing '{0}' attribute on result element")]
    MissingAttribute(&'static str),

    #[error("Invalid '{attribute}' value '{value}'")]
    InvalidCount {
        attribute: &'static str,
        value: String,
    },
}

/// Read the summary of the result document at `path`
pub fn read_summary_file(path: &Path) -> Result<SuiteSummary, ResultError> {
    let file = File::open(path).map_err(|source| ResultError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_summary(BufReader::new(file))
}

/// Read the summary from the first element of a result document
pub fn read_summary<R: BufRead>(source: R) -> Result<SuiteSummary, ResultError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ResultError::Xml(e.to_string()))?
        {
            Event::Start(element) | Event::Empty(element) => return summary_from(&element),
            Event::Eof => return Err(ResultError::Empty),
            _ => {}
        }
        buf.clear();
    }
}

fn summary_from(element: &BytesStart<'_>) -> Result<SuiteSummary, ResultError> {
    let mut tests = None;
    let mut failures = None;
    let mut time = None;
    let mut name = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| ResultError::Xml(e.to_string()))?;
        let slot = match attr.key.as_ref() {
            b"tests" => &mut tests,
            b"failures" => &mut failures,
            b"time" => &mut time,
            b"name" => &mut name,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| ResultError::Xml(e.to_string()))?;
        *slot = Some(value.into_owned());
    }

    Ok(SuiteSummary {
        tests: parse_count("tests", tests)?,
        failures: parse_count("failures", failures)?,
        time: time.unwrap_or_default(),
        name: name.unwrap_or_default(),
    })
}

fn parse_count(attribute: &'static str, value: Option<String>) -> Result<u32, ResultError> {
    let value = value.ok_or(ResultError::MissingAttribute(attribute))?;
    value
        .trim()
        .parse()
        .map_err(|_| ResultError::InvalidCount { attribute, value })
}
