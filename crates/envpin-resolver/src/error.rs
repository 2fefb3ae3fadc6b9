//! Error types for envpin-resolver

use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid cutoff date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    #[error("Index query for {package} failed: {message}")]
    QueryFailed { package: String, message: String },

    #[error("Malformed index response for {package}: {message}")]
    MalformedResponse { package: String, message: String },

    #[error("No version of {package} published on or before {cutoff}")]
    NotFound { package: String, cutoff: NaiveDate },
}

impl Error {
    /// True when the index answered but nothing satisfied the cutoff.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the index itself could not be queried or understood.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            Self::CommandNotFound { .. } | Self::QueryFailed { .. } | Self::MalformedResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound {
            package: "numpy".to_string(),
            cutoff: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "No version of numpy published on or before 2023-06-01"
        );
        assert!(err.is_not_found());
        assert!(!err.is_query_failure());
    }

    #[test]
    fn test_query_failure_kinds() {
        let spawn = Error::CommandNotFound {
            command: "conda".to_string(),
        };
        let malformed = Error::MalformedResponse {
            package: "numpy".to_string(),
            message: "expected value".to_string(),
        };
        assert!(spawn.is_query_failure());
        assert!(malformed.is_query_failure());
        assert!(malformed.to_string().contains("numpy"));
    }
}
