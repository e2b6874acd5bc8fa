//! GraphQL transport: a shared reqwest client and a posting helper with
//! retry/backoff. The decoder never sees this layer; it always receives a
//! complete, already-fetched response payload.

use crate::config::Config;
use crate::error::Error;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 5;

pub fn build_client(cfg: &Config) -> reqwest::Result<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(USER_AGENT, HeaderValue::from_str(&cfg.user_agent).unwrap());
    // Authorization header is injected per request to allow token rotation.
    Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()
}

fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header")
}

pub fn map_status_to_error(status: StatusCode, message: String) -> Error {
    let retriable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
    Error::Status {
        status,
        message,
        retriable,
    }
}

fn compute_backoff(attempt: u32, retry_after: Option<Duration>) -> Duration {
    if let Some(d) = retry_after {
        return d;
    }
    // Exponential backoff with jitter: base 200ms * 2^attempt, max 5s.
    let base = 200u64.saturating_mul(1u64 << attempt.min(5));
    let max = 5_000u64.min(base);
    let jitter = fastrand::u64(0..=max / 2);
    Duration::from_millis(max / 2 + jitter)
}

/// Post one GraphQL query and return the `data` payload.
///
/// Retries on transport errors, 429 and 5xx with exponential backoff,
/// honoring `Retry-After`. A GraphQL-level `errors` array maps to
/// `Error::Graphql`; retries beyond the backoff budget are a caller concern.
pub async fn graphql_post(
    client: &Client,
    cfg: &Config,
    query: &str,
    variables: &Value,
) -> Result<Value, Error> {
    let body = serde_json::json!({ "query": query, "variables": variables });
    let mut attempt: u32 = 0;
    loop {
        let res = client
            .post(&cfg.graphql_url)
            .header(AUTHORIZATION, auth_header(&cfg.token))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await;

        let res = match res {
            Ok(r) => r,
            Err(e) => {
                if attempt < MAX_ATTEMPTS {
                    warn!("GraphQL POST error sending request: {}", e);
                    tokio::time::sleep(compute_backoff(attempt, None)).await;
                    attempt += 1;
                    continue;
                }
                return Err(Error::Transport(e));
            }
        };

        let status = res.status();
        let retry_after = res
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = res.text().await.unwrap_or_default();

        if status.is_success() {
            let v: Value = serde_json::from_str(&text)
                .map_err(|e| Error::Graphql(format!("malformed response body: {}", e)))?;
            if let Some(errors) = v.get("errors").and_then(Value::as_array) {
                if !errors.is_empty() {
                    let msg = errors
                        .iter()
                        .filter_map(|e| e.get("message").and_then(Value::as_str))
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Err(Error::Graphql(msg));
                }
            }
            if let Some(remaining) = v
                .get("data")
                .and_then(|d| d.get("rateLimit"))
                .and_then(|rl| rl.get("remaining"))
                .and_then(Value::as_i64)
            {
                debug!("GraphQL rate limit remaining: {}", remaining);
            }
            return Ok(v.get("data").cloned().unwrap_or(Value::Null));
        }

        if (status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
            && attempt < MAX_ATTEMPTS
        {
            let backoff = compute_backoff(attempt, retry_after);
            warn!(
                "GraphQL POST retrying (status {}), backoff {:?}",
                status, backoff
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
            continue;
        }
        return Err(map_status_to_error(status, text));
    }
}
