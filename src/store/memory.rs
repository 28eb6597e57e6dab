//! In-process store, used by tests and when embedding the quiz.

use std::cell::RefCell;

use crate::error::QuizError;
use crate::models::SHEET_HEADER;

use super::{zip_record, RowRecord, RowStore};

/// Rows held in memory under a fixed header.
#[derive(Debug)]
pub struct MemoryStore {
    header: Vec<String>,
    rows: RefCell<Vec<Vec<String>>>,
    failure: Option<String>,
}

impl MemoryStore {
    /// An empty store with the spreadsheet layout.
    pub fn new() -> Self {
        Self::with_header(&SHEET_HEADER)
    }

    pub fn with_header(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: RefCell::new(Vec::new()),
            failure: None,
        }
    }

    /// A store whose every call fails with `SourceUnavailable`.
    pub fn unavailable(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Add a row without going through [`RowStore::append_row`].
    pub fn push<S: AsRef<str>>(&self, cells: &[S]) {
        self.rows
            .borrow_mut()
            .push(cells.iter().map(|c| c.as_ref().to_string()).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw cells of every stored row.
    pub fn raw_rows(&self) -> Vec<Vec<String>> {
        self.rows.borrow().clone()
    }

    fn check(&self) -> Result<(), QuizError> {
        match &self.failure {
            Some(message) => Err(QuizError::SourceUnavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read_rows(&self) -> Result<Vec<RowRecord>, QuizError> {
        self.check()?;
        Ok(self
            .rows
            .borrow()
            .iter()
            .map(|cells| zip_record(&self.header, cells.iter().cloned()))
            .collect())
    }

    fn append_row(&self, row: &[String]) -> Result<(), QuizError> {
        self.check()?;
        self.rows.borrow_mut().push(row.to_vec());
        Ok(())
    }
}
