//! Newline-delimited JSON files: one record per line, blank lines ignored.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read line {line} of {path}")]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("malformed record on line {line} of {path}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn read<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, NdjsonError> {
    let file = File::open(path).map_err(|source| NdjsonError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| NdjsonError::Read {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| NdjsonError::Parse {
            path: path.to_path_buf(),
            line: line_number,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn write<T: Serialize>(path: &Path, records: &[T]) -> Result<(), NdjsonError> {
    let write_error = |source| NdjsonError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serialize_line(&mut writer, record).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}

fn serialize_line<W, V>(mut writer: W, value: &V) -> io::Result<()>
where
    W: Write,
    V: ?Sized + Serialize,
{
    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n")
}
