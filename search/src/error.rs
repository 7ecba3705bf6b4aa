//! Error types for the `search` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level search error type, holding the kind of failure and the original
/// error that caused it.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// The outbound HTTP request failed, timed out, or came back non-2xx.
    Network,
    /// The provider answered but the result markup could not be read.
    Parse,
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Search Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client
        // instance occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: ErrorKind::Other("Failed to build reqwest client".to_string()),
            }
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: ErrorKind::Network,
            }
        }
    }
}
