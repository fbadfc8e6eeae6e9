//! Newline-delimited JSON records.
//!
//! Each line is one flat JSON object (`{"id":1,"lft":1,"rgt":10,"depth":0}`).
//! Blank lines are skipped on read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nestree_core::types::Record;

use crate::error::{Result, StoreError};

pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let rec: Record = serde_json::from_str(&line).map_err(|source| StoreError::Json {
            line: idx + 1,
            source,
        })?;
        out.push(rec);
    }
    Ok(out)
}

pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let f = File::open(path)?;
    read_records(BufReader::new(f))
}

/// Streaming NDJSON writer.
pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl JsonlWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write records as one JSON object per line.
    pub fn write_records<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) -> Result<()> {
        for rec in records {
            let line = serde_json::to_string(rec)?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| StoreError::Io(e.into_error()))
    }
}
