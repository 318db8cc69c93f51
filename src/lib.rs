// Library root
// ------------
// The binary (`main.rs`) is a thin shell over these modules.
//
// Module responsibilities:
// - `api`: HTTP calls against the apidoc service (create app, delete app,
//   upsert version) and the request/response shapes they use.
// - `cli`: flag parsing and dispatch to exactly one `api` operation.
// - `error`: error types shared by both layers.
// - `exitcode`: process exit codes for the validation failures.
pub mod api;
pub mod cli;
pub mod error;
pub mod exitcode;

pub use api::{encrypt_token, ApiClient, ApiResponse, Visibility};
pub use error::{ApiError, CliError};
