//! Common test utilities

#![allow(dead_code)]

use apidoc_cli::api::ApiClient;
use apidoc_cli::encrypt_token;
use wiremock::MockServer;

pub const TOKEN: &str = "s3cr3t-token\n";

/// Value the service expects in the Authorization header for `TOKEN`.
pub fn basic_auth() -> String {
    format!("Basic {}", encrypt_token(TOKEN))
}

/// Run a blocking client call off the async test runtime.
pub async fn with_client<T, F>(server: &MockServer, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce(ApiClient) -> T + Send + 'static,
{
    let uri = server.uri();
    tokio::task::spawn_blocking(move || f(ApiClient::new(&uri).unwrap()))
        .await
        .unwrap()
}

/// Run a blocking closure (e.g. a spawned CLI process) off the runtime.
pub async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}
