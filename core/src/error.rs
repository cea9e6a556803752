use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid timestamp '{value}', expected 'DD MON YYYY HH:MM'")]
    InvalidTimestamp { value: String },

    #[error("Unknown month code '{month}'")]
    UnknownMonth { month: String },

    #[error("Invalid number '{value}'")]
    InvalidNumber { value: String },

    #[error("Expected element '{selector}' not found in page")]
    MissingElement { selector: &'static str },

    #[error("Station '{station}' has no id in its link")]
    MissingStationId { station: String },

    #[error("Invalid CSS selector '{selector}'")]
    InvalidSelector { selector: &'static str },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed for {url} with status {status}")]
    Fetch { url: String, status: u16 },

    #[error("Network request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse page content")]
    Parse(#[from] ParseError),

    #[error("Failed to serialize regions")]
    Serialize(#[from] serde_json::Error),
}

impl ScrapeError {
    /// HTTP status of a non-200 response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScrapeError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
