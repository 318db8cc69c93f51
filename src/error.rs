//! Error types for the apidoc client.
//
// Only transport-level failures are errors here. Any HTTP status the
// service answers with, 4xx and 5xx included, is a normal `ApiResponse`.

use std::io;
use thiserror::Error;

/// Errors raised while talking to the remote service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The blocking HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response (connection refused, DNS,
    /// timeout) or the response body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors raised by the command-line dispatcher.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("missing required option '--{0}'")]
    MissingArgument(&'static str),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub type CliResult<T> = std::result::Result<T, CliError>;
