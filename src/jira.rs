use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::auth::Credentials;
use crate::tracker::FetchError;

mod issues;
mod transitions;
mod types;

pub use types::*;

const API_PATH: &str = "rest/api/2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl JiraClient {
    pub fn new(base_url: &str, credentials: Credentials) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("jiradash"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PATH, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, FetchError> {
        let response = self.credentials.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(FetchError::Protocol(format!(
            "{} {}",
            status.as_u16(),
            api_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            })
        )))
    }
}

pub fn permalink(base_url: &str, issue_key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), issue_key)
}

fn api_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    let mut messages = parsed.error_messages;
    let mut field_errors = parsed
        .errors
        .into_iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<String>>();
    field_errors.sort();
    messages.extend(field_errors);
    if messages.is_empty() {
        return None;
    }
    Some(messages.join("; "))
}
