//! Configuration management for the ChatSherlock demo server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication); `dotenvy` reads
//! an optional `.env` file without printing anything.

use crate::error::{ConfigError, ConfigResult};
use crate::search::DEFAULT_SNIPPET_RADIUS;
use std::env;
use std::path::PathBuf;

/// Default User-Agent sent to the mailing-list API.
pub const DEFAULT_USER_AGENT: &str = "ChatSherlock/1.0";

/// Credentials and target list for the mailing-list API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailingListConfig {
    /// API base URL, e.g. `https://us7.api.mailchimp.com`
    pub api_base_url: String,

    /// API key sent as the basic-auth password
    pub api_key: String,

    /// Audience (list) id the signups are added to
    pub list_id: String,

    pub user_agent: String,
}

/// Configuration for the ChatSherlock demo server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Characters of context on each side of a snippet match (default: 60)
    pub snippet_radius: usize,

    /// Directory with `dataset_<persona>.json` files; embedded datasets when unset
    pub dataset_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Mailing-list settings; signup is disabled when unset
    pub mailing_list: Option<MailingListConfig>,

    /// Default log filter when `RUST_LOG` is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SNIPPET_RADIUS`: Snippet context in characters (default: 60)
    /// - `DATASET_DIR`: Directory to load persona datasets from
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MAILCHIMP_API_KEY`: Enables signup; requires `MAILCHIMP_API_BASE_URL`
    ///   and `MAILCHIMP_LIST_ID`
    /// - `MAILCHIMP_USER_AGENT`: User-Agent header (default: "ChatSherlock/1.0")
    /// - `LOG_LEVEL`: Log filter used when `RUST_LOG` is unset (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let snippet_radius = Self::parse_env_usize("SNIPPET_RADIUS", DEFAULT_SNIPPET_RADIUS)?;
        if snippet_radius == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SNIPPET_RADIUS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let dataset_dir = env::var("DATASET_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let mailing_list = Self::mailing_list_from_env()?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            snippet_radius,
            dataset_dir,
            request_timeout,
            mailing_list,
            log_level,
        })
    }

    fn mailing_list_from_env() -> ConfigResult<Option<MailingListConfig>> {
        let api_key = match env::var("MAILCHIMP_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };

        let api_base_url = env::var("MAILCHIMP_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("MAILCHIMP_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MAILCHIMP_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let list_id = env::var("MAILCHIMP_LIST_ID")
            .map_err(|_| ConfigError::MissingVar("MAILCHIMP_LIST_ID".to_string()))?;

        if list_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MAILCHIMP_LIST_ID".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let user_agent =
            env::var("MAILCHIMP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Some(MailingListConfig {
            api_base_url,
            api_key,
            list_id,
            user_agent,
        }))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
            dataset_dir: None,
            request_timeout: 10,
            mailing_list: None,
            log_level: "error".to_string(),
        }
    }
}
