use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every notification request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance shared by all notifiers
///
/// This client is initialized lazily on first access, so runs with no channels
/// configured never build it.
///
/// # Features
/// - **Connection pooling**: Reuses TCP connections between notifiers hitting the same host
/// - **No request timeout**: a notification call waits as long as the remote side takes
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// async fn post_hook(url: &str) -> Result<reqwest::StatusCode, reqwest::Error> {
///     let response = HTTP_CLIENT
///         .post(url)
///         .json(&serde_json::json!({ "text": "done" }))
///         .send()
///         .await?;
///
///     Ok(response.status())
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Connection pooling
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build configured HTTP client, using defaults");
            reqwest::Client::new()
        })
});
