//! Local CSV question files.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::error::QuizError;
use crate::models::SHEET_HEADER;

use super::{zip_record, RowRecord, RowStore};

/// A question set kept in a local CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> QuizError {
        QuizError::SourceUnavailable(format!("{}: {}", self.path.display(), err))
    }

    fn read_header(&self, content: &str) -> Result<Vec<String>, QuizError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());
        let header = reader.headers().map_err(|e| self.unavailable(e))?;
        Ok(header.iter().map(str::to_string).collect())
    }
}

impl RowStore for CsvStore {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn read_rows(&self) -> Result<Vec<RowRecord>, QuizError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let header = self.read_header(&content)?;
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| self.unavailable(format!("row {}: {}", i + 1, e)))?;
            rows.push(zip_record(&header, record.iter()));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "read csv rows");
        Ok(rows)
    }

    fn append_row(&self, row: &[String]) -> Result<(), QuizError> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.unavailable(e)),
        };

        let needs_header = existing.trim().is_empty();
        if !needs_header {
            let header = self.read_header(&existing)?;
            if header != SHEET_HEADER {
                return Err(self.unavailable(format!(
                    "header [{}] does not accept new questions, expected [{}]",
                    header.join(","),
                    SHEET_HEADER.join(",")
                )));
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        if !needs_header && !existing.ends_with('\n') {
            file.write_all(b"\n").map_err(|e| self.unavailable(e))?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer
                .write_record(SHEET_HEADER)
                .map_err(|e| self.unavailable(e))?;
        }
        writer.write_record(row).map_err(|e| self.unavailable(e))?;
        writer.flush().map_err(|e| self.unavailable(e))?;

        debug!(path = %self.path.display(), "appended csv row");
        Ok(())
    }
}
