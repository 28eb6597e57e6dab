//! Google Sheets store over the Sheets v4 REST API.
//!
//! Only the first worksheet range is used. Authentication is out of scope:
//! the caller supplies an OAuth access token.

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::error::QuizError;

use super::{zip_record, RowRecord, RowStore};

pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_RANGE: &str = "Sheet1";

/// A question set stored in a Google spreadsheet.
pub struct SheetsStore {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    access_token: String,
}

impl std::fmt::Debug for SheetsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsStore")
            .field("base_url", &self.base_url)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("access_token", &"***")
            .finish()
    }
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl SheetsStore {
    pub fn new(
        base_url: &str,
        spreadsheet_id: &str,
        range: &str,
        access_token: &str,
    ) -> Result<Self, QuizError> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuizError::Config(format!("failed to build HTTP client: {e}")))?;

        let base = if base_url.is_empty() {
            DEFAULT_SHEETS_URL
        } else {
            base_url
        };
        let range = if range.is_empty() { DEFAULT_RANGE } else { range };

        Ok(Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}{suffix}` with each segment
    /// percent-encoded.
    pub fn values_url(&self, suffix: &str) -> Result<Url, QuizError> {
        let last = format!("{}{}", self.range, suffix);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| QuizError::Config(format!("invalid sheets URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| QuizError::Config(format!("invalid sheets URL {}", self.base_url)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                last.as_str(),
            ]);
        Ok(url)
    }

    fn check(&self, response: Response) -> Result<Response, QuizError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);
        Err(QuizError::SourceUnavailable(format!(
            "spreadsheet {} (HTTP {}): {}",
            self.spreadsheet_id,
            status.as_u16(),
            message
        )))
    }

    fn transport_error(&self, err: reqwest::Error) -> QuizError {
        QuizError::SourceUnavailable(format!("spreadsheet {}: {}", self.spreadsheet_id, err))
    }
}

impl RowStore for SheetsStore {
    fn describe(&self) -> String {
        format!("sheets:{}/{}", self.spreadsheet_id, self.range)
    }

    #[instrument(skip(self), fields(spreadsheet = %self.spreadsheet_id))]
    fn read_rows(&self) -> Result<Vec<RowRecord>, QuizError> {
        let url = self.values_url("")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(|e| self.transport_error(e))?;
        let range: ValueRange = self
            .check(response)?
            .json()
            .map_err(|e| self.transport_error(e))?;

        let rows = rows_from_values(range.values);
        debug!(rows = rows.len(), "read spreadsheet rows");
        Ok(rows)
    }

    #[instrument(skip(self, row), fields(spreadsheet = %self.spreadsheet_id))]
    fn append_row(&self, row: &[String]) -> Result<(), QuizError> {
        let mut url = self.values_url(":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": [row] }))
            .send()
            .map_err(|e| self.transport_error(e))?;
        self.check(response)?;

        debug!("appended spreadsheet row");
        Ok(())
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn a values grid into records. The first row is the header; an empty
/// grid has no records.
pub fn rows_from_values(values: Vec<Vec<Value>>) -> Vec<RowRecord> {
    let mut grid = values.into_iter();
    let Some(header) = grid.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header
        .into_iter()
        .map(|cell| cell_text(cell).trim().to_string())
        .collect();

    grid.map(|cells| zip_record(&header, cells.into_iter().map(cell_text)))
        .collect()
}
