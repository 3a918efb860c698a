//! JSON array read/write helpers.
//!
//! Corpus files are JSON arrays of records, written pretty-printed.
//! serde_json does not escape non-ASCII, so Tibetan text survives verbatim.
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::types::Record;

/// Reads a whole JSON file into `T`.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let f = File::open(path)?;
    let br = BufReader::new(f);
    Ok(serde_json::from_reader(br)?)
}

/// Writes `value` to `path` as pretty-printed JSON, creating parent
/// directories if needed. Overwrites any previous content.
pub fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let f = File::create(path)?;
    let bw = BufWriter::new(f);
    Ok(serde_json::to_writer_pretty(bw, value)?)
}

/// Appends `records` to the JSON array at `path`.
///
/// The array is read back, extended and rewritten whole, so a finished write
/// always leaves a well-formed file. If `path` does not exist it is created.
pub fn append_records(path: &Path, records: &[Record]) -> Result<(), Error> {
    if !path.exists() {
        return write(path, &records);
    }
    let mut existing: Vec<Record> = read(path)?;
    existing.extend_from_slice(records);
    write(path, &existing)
}
