use crate::ui;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to the GitHub API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, TLS...)
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A 2xx response whose body is not valid JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response status outside the 2xx range
    #[error("GitHub API returned {status} for {url}")]
    Status { url: String, status: u16, body: Value },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull GitHub's `{"message": "..."}` out of an error body when present.
#[must_use]
pub fn api_message(body: &Value) -> Option<&str> {
    match body {
        Value::Object(map) => map.get("message").and_then(Value::as_str),
        Value::String(text) if !text.trim().is_empty() => Some(text.as_str()),
        _ => None,
    }
}

/// Explain a failed profile lookup with recovery guidance
pub fn show_profile_failure(username: &str, status: u16, body: &Value) {
    match status {
        404 => show_user_not_found(username),
        _ => show_generic_failure(username, status, body),
    }
}

/// Explain an error that never reached the failure handler
pub fn show_api_error(error: &ApiError) {
    match error {
        ApiError::Transport { url, message } => show_network_error(url, message),
        ApiError::Decode { url, .. } => {
            ui::show_error_with_help(
                &format!("Unexpected response from {url}"),
                &["The API answered with something that is not JSON", "Check --api-url"],
            );
        }
        ApiError::Status { url, status, body } => show_generic_failure(url, *status, body),
    }
}

fn show_user_not_found(username: &str) {
    ui::show_error_with_help(
        &format!("GitHub user '{username}' was not found"),
        &[
            "Check the spelling of the username",
            &format!("Open https://github.com/{username} in a browser to confirm it exists"),
        ],
    );
}

fn show_network_error(url: &str, message: &str) {
    ui::print_error(&format!("Network error reaching {url}"));
    ui::print_info("Network issues detected:");
    ui::print_info(&format!("   • Error: {}", message.trim()));
    ui::print_info("   • Check internet connection");
    ui::print_info("   • Check GitHub status: https://www.githubstatus.com/");
}

fn show_generic_failure(subject: &str, status: u16, body: &Value) {
    let detail = api_message(body).unwrap_or("no details given");
    ui::print_error(&format!("Failed to fetch data for {subject} (HTTP {status})"));
    ui::print_info(&format!("   • GitHub says: {detail}"));
    ui::print_info("   • Please try again later");
}
