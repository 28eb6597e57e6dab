//! Configuration file and store selection.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::store::{CsvStore, RowStore, SheetsStore, DEFAULT_RANGE, DEFAULT_SHEETS_URL};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

/// Where questions live.
///
/// Note: custom Debug impl masks the access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    Csv {
        path: PathBuf,
    },
    Sheets {
        spreadsheet_id: String,
        #[serde(default = "default_range")]
        range: String,
        #[serde(default)]
        access_token: String,
        #[serde(default = "default_base_url")]
        base_url: String,
    },
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Csv { path } => f.debug_struct("Csv").field("path", path).finish(),
            SourceConfig::Sheets {
                spreadsheet_id,
                range,
                access_token: _,
                base_url,
            } => f
                .debug_struct("Sheets")
                .field("spreadsheet_id", spreadsheet_id)
                .field("range", range)
                .field("access_token", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_SHEETS_URL.to_string()
}

fn default_source() -> SourceConfig {
    SourceConfig::Csv {
        path: PathBuf::from("questions.csv"),
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_source")]
    pub source: SourceConfig,
    /// Log destination for interactive runs; nothing is logged when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            log_file: None,
        }
    }
}

/// Expand `${VAR}` references using `lookup`. Unknown variables expand to an
/// empty string; an unterminated reference is left as is.
pub fn expand_vars<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl QuizConfig {
    /// Parse a TOML document, expanding environment references in the
    /// sheets settings.
    pub fn parse(content: &str) -> Result<Self, QuizError> {
        let mut config: QuizConfig =
            toml::from_str(content).map_err(|e| QuizError::Config(e.to_string()))?;
        config.resolve_env(env_lookup);
        Ok(config)
    }

    fn resolve_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let SourceConfig::Sheets {
            spreadsheet_id,
            access_token,
            base_url,
            ..
        } = &mut self.source
        {
            *spreadsheet_id = expand_vars(spreadsheet_id, &lookup);
            *access_token = expand_vars(access_token, &lookup);
            *base_url = expand_vars(base_url, &lookup);
        }
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] when it
    /// exists. With neither, defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, QuizError> {
        let path = match path {
            Some(p) if p.exists() => p.to_path_buf(),
            Some(p) => {
                return Err(QuizError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    return Ok(Self::default());
                }
                local
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| QuizError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Box<dyn RowStore>, QuizError> {
        match &self.source {
            SourceConfig::Csv { path } => Ok(Box::new(CsvStore::new(path))),
            SourceConfig::Sheets {
                spreadsheet_id,
                range,
                access_token,
                base_url,
            } => {
                if spreadsheet_id.is_empty() {
                    return Err(QuizError::Config("spreadsheet_id is empty".to_string()));
                }
                if access_token.is_empty() {
                    return Err(QuizError::Config(
                        "sheets access_token is empty; set it in the config file or environment"
                            .to_string(),
                    ));
                }
                Ok(Box::new(SheetsStore::new(
                    base_url,
                    spreadsheet_id,
                    range,
                    access_token,
                )?))
            }
        }
    }
}
