/*!
 * Error types for the scribedown application.
 *
 * This module contains custom error types for the provider layer and for the
 * batch run as a whole, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The response decoded but carried no `choices[0].message.content`
    #[error("API response did not contain any message content")]
    MissingContent,
}

/// Main application error type
///
/// Every variant is fatal to the run.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input path is neither a regular file nor a directory
    #[error("The input path is neither a file nor a directory: {0}")]
    InvalidPath(PathBuf),

    /// Directory holds no file with a recognized transcript extension
    #[error("No transcript files found in the directory: {0}")]
    NoInput(PathBuf),

    /// The remote completion call failed for one file
    #[error("Failed to rewrite {file}: {source}")]
    RemoteService {
        /// Name of the transcript being rewritten
        file: String,
        #[source]
        source: ProviderError,
    },

    /// Reading, listing or writing a file failed
    #[error("Filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Wrap an IO error together with the path it happened on
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Wrap a provider error together with the transcript it was rewriting
    pub fn remote(file: impl Into<String>, source: ProviderError) -> Self {
        Self::RemoteService {
            file: file.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
