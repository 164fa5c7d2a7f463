use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;

use crate::error_handling::ApiError;

/// Status line and raw body of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Anything that can perform a GET and hand back the response.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;
}

/// Blocking reqwest transport preconfigured with GitHub headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("ghprofile"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Transport {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let transport_error = |e: reqwest::Error| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;

        Ok(HttpResponse { status, body })
    }
}

/// GitHub REST client built around the single-request `fetch_data` contract.
#[derive(Debug)]
pub struct GitHubApi<T> {
    transport: T,
    base_url: String,
    repo_page_size: u32,
}

impl<T: Transport> GitHubApi<T> {
    pub fn new(transport: T, base_url: &str, repo_page_size: u32) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            repo_page_size,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one GET and route the decoded JSON to exactly one handler:
    /// `on_success` for any 2xx status, `on_failure` with the status otherwise.
    ///
    /// A failure body that is not JSON reaches `on_failure` as a JSON string.
    /// When no response arrives at all, neither handler runs and the error is
    /// returned.
    pub fn fetch_data<R, S, F>(&self, url: &str, on_success: S, on_failure: F) -> Result<R, ApiError>
    where
        S: FnOnce(Value) -> R,
        F: FnOnce(u16, Value) -> R,
    {
        debug!("GET {url}");
        let response = self.transport.get(url)?;
        debug!("{url} -> {}", response.status);

        if response.is_success() {
            let data = serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
                url: url.to_string(),
                source,
            })?;
            Ok(on_success(data))
        } else {
            Ok(on_failure(response.status, decode_error_body(&response.body)))
        }
    }

    /// `fetch_data` folded into a `Result`, non-2xx becoming `ApiError::Status`.
    pub fn fetch_json(&self, url: &str) -> Result<Value, ApiError> {
        self.fetch_data(url, Ok, |status, body| {
            Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            })
        })?
    }

    #[must_use]
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, username.trim())
    }

    /// First page of a user's repositories, newest first.
    #[must_use]
    pub fn repos_page_url(&self, repos_url: &str) -> String {
        format!(
            "{repos_url}?sort=created&per_page={}",
            self.repo_page_size
        )
    }
}

/// `following_url` arrives as `.../following{/other_user}`.
#[must_use]
pub fn following_endpoint(template: &str) -> String {
    template.replace("{/other_user}", "")
}

fn decode_error_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
