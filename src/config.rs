use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::codeforces::client::DEFAULT_CODEFORCES_API_URL;
use crate::combined::report::DEFAULT_TOP_SKILLS;
use crate::leetcode::catalog::DEFAULT_CATALOG_TTL;
use crate::leetcode::client::DEFAULT_LEETCODE_API_URL;

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is a valid
/// configuration. The .env file is loaded at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// LeetCode REST mirror (LEETCODE_API_URL)
    pub leetcode_api_url: String,
    /// Codeforces API base (CODEFORCES_API_URL)
    pub codeforces_api_url: String,
    /// Problem catalog lifetime (CODETALLY_CATALOG_TTL_HOURS, default 24)
    pub catalog_ttl: Duration,
    /// Topics listed in summary.topSkills (CODETALLY_TOP_SKILLS, default 10)
    pub top_skills: usize,
    /// Timeout for per-user endpoints (CODETALLY_HTTP_TIMEOUT_SECS, default 10)
    pub http_timeout: Duration,
    /// Timeout for the catalog download (CODETALLY_CATALOG_TIMEOUT_SECS, default 30)
    pub catalog_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Numeric settings that are present but unparseable are an error
    /// rather than silently falling back to the default.
    pub fn load() -> Result<Self> {
        let catalog_ttl_hours: u64 = env_number(
            "CODETALLY_CATALOG_TTL_HOURS",
            DEFAULT_CATALOG_TTL.as_secs() / 3600,
        )?;

        Ok(Self {
            leetcode_api_url: env::var("LEETCODE_API_URL")
                .unwrap_or_else(|_| DEFAULT_LEETCODE_API_URL.to_string()),
            codeforces_api_url: env::var("CODEFORCES_API_URL")
                .unwrap_or_else(|_| DEFAULT_CODEFORCES_API_URL.to_string()),
            catalog_ttl: Duration::from_secs(catalog_ttl_hours * 3600),
            top_skills: env_number("CODETALLY_TOP_SKILLS", DEFAULT_TOP_SKILLS)?,
            http_timeout: Duration::from_secs(env_number("CODETALLY_HTTP_TIMEOUT_SECS", 10)?),
            catalog_timeout: Duration::from_secs(env_number(
                "CODETALLY_CATALOG_TIMEOUT_SECS",
                30,
            )?),
        })
    }
}

fn env_number<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
