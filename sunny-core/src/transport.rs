//! One GET in, one decoded body (or one `FetchError`) out.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{FetchError, FetchResult};

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Sends exactly one request. No retries; timeouts are the client's.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status,
                body: truncate_body(&body),
            });
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
