use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories fetched per profile; there is no pagination beyond this.
pub const REPO_PAGE_SIZE: u32 = 12;

const API_URL_VAR: &str = "GHPROFILE_API_URL";
const STATE_DIR_VAR: &str = "GHPROFILE_STATE_DIR";
const DEFAULT_USER_VAR: &str = "GHPROFILE_DEFAULT_USER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub repo_page_size: u32,
    pub state_dir: PathBuf,
    /// Profile `browse` opens when no username is given
    pub default_user: Option<String>,
}

impl Config {
    /// Resolve configuration: command line first, then environment, then defaults
    pub fn load(api_url_override: Option<&str>) -> Result<Self> {
        let api_url = api_url_override
            .map(str::to_string)
            .or_else(|| std::env::var(API_URL_VAR).ok());
        let state_dir = std::env::var(STATE_DIR_VAR).ok().map(PathBuf::from);

        let mut config = Self::resolve(api_url, state_dir)?;
        config.default_user = non_blank(std::env::var(DEFAULT_USER_VAR).ok());
        Ok(config)
    }

    pub fn resolve(api_url: Option<String>, state_dir: Option<PathBuf>) -> Result<Self> {
        let api_url = non_blank(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            anyhow::bail!("Invalid API URL '{api_url}': expected an http:// or https:// address");
        }

        Ok(Self {
            api_url,
            repo_page_size: REPO_PAGE_SIZE,
            state_dir: state_dir.unwrap_or_else(session_state_dir),
            default_user: None,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Directory that lives as long as the login session.
/// `$XDG_RUNTIME_DIR/ghprofile` when available, else a temp directory.
#[must_use]
pub fn session_state_dir() -> PathBuf {
    dirs::runtime_dir().map_or_else(
        || std::env::temp_dir().join("ghprofile-session"),
        |dir| dir.join("ghprofile"),
    )
}
