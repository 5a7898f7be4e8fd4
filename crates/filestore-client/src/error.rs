use std::fmt;

/// Errors from the file store client's internal request paths.
///
/// These never cross the public operation boundary; every public operation
/// absorbs them into its fallback return value.
#[derive(Debug)]
pub enum FilestoreError {
    /// Request failed to complete or its body failed to decode
    Http(reqwest::Error),
    /// The store answered with a non-success status
    Status(reqwest::StatusCode),
}

impl fmt::Display for FilestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "file store HTTP error: {e}"),
            Self::Status(status) => write!(f, "file store returned status {status}"),
        }
    }
}

impl std::error::Error for FilestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for FilestoreError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, FilestoreError>;
