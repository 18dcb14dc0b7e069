//! Error types shared by the scraper and the syllabus pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The document source could not fetch or parse a page
    #[error("source '{url}' is unavailable: {reason}")]
    SourceUnavailable { url: String, reason: String },

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// A field descriptor is wired inconsistently (e.g. list post-processing on a single locator)
    #[error("schema violation on field '{field}': {reason}")]
    SchemaViolation { field: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("pdf extraction failed for '{path}': {reason}")]
    Pdf { path: String, reason: String },

    #[error("language model request failed: {0}")]
    Llm(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl Error {
    pub fn source_unavailable(url: &str, reason: impl ToString) -> Self {
        Error::SourceUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
