//! Row stores: the external tables questions are read from and appended to.

mod csv_store;
mod memory;
mod sheets;

use std::collections::HashMap;

use crate::error::QuizError;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use sheets::{rows_from_values, SheetsStore, DEFAULT_SHEETS_URL, DEFAULT_RANGE};

/// One record of a tabular store: column name to cell text.
pub type RowRecord = HashMap<String, String>;

/// A tabular question store.
///
/// Calls are synchronous and are not retried; a failure surfaces as
/// [`QuizError::SourceUnavailable`].
pub trait RowStore {
    /// Short description for logs and status lines.
    fn describe(&self) -> String;

    /// Read every data row, in store order.
    fn read_rows(&self) -> Result<Vec<RowRecord>, QuizError>;

    /// Append one row laid out in the spreadsheet column order.
    fn append_row(&self, row: &[String]) -> Result<(), QuizError>;
}

/// Pair header names with the cells of one row. Cells past the end of a
/// short row are absent from the record.
pub(crate) fn zip_record<I, S>(header: &[String], cells: I) -> RowRecord
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    header
        .iter()
        .cloned()
        .zip(cells.into_iter().map(Into::into))
        .collect()
}
