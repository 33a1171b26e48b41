use reqwest::Client;
use std::time::Duration;

/// Build a client for a single request/response exchange.
///
/// Nothing is pooled: the client is dropped together with the session that
/// owns it.
pub fn build_session_client(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .pool_max_idle_per_host(0)
        .build()
        .unwrap_or_else(|_| Client::new())
}
