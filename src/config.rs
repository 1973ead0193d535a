// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Recruiting API, e.g. `http://localhost:8000`.
    pub api_base_url: Url,
    /// Bearer token for administrative calls, if already known.
    pub admin_token: Option<String>,
    pub rust_log: String,
    /// `None` leaves reqwest's default (no timeout).
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&api_base_url)?;

        let admin_token = env::var("ADMIN_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    AppError::Config(format!("REQUEST_TIMEOUT_SECS must be an integer, got '{}'", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_base_url,
            admin_token,
            rust_log,
            request_timeout,
        })
    }

    /// Config pointing at `base_url` with no token and default logging.
    pub fn for_base_url(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: Url::parse(base_url)?,
            admin_token: None,
            rust_log: "info".to_string(),
            request_timeout: None,
        })
    }
}
