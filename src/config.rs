use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const MAX_PREVIEW_SIZE: u32 = 2048;

/// Runtime settings for the server binary. Every field has a default;
/// environment variables override them.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub addr: SocketAddr,
    /// Static front-end served at `/`.
    pub frontend: PathBuf,

    // Model update service
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,

    // Preview
    pub preview_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            frontend: PathBuf::from("frontend"),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            preview_size: 512,
        }
    }
}

impl Settings {
    /// Reads `SCULPTOR_ADDR`, `SCULPTOR_FRONTEND`, `SCULPTOR_MODEL`,
    /// `SCULPTOR_TIMEOUT_SECS`, `SCULPTOR_PREVIEW_SIZE` and `GEMINI_API_KEY`
    /// (or `API_KEY`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SCULPTOR_ADDR") {
            settings.addr = v.trim().parse().map_err(|e: std::net::AddrParseError| {
                invalid("SCULPTOR_ADDR", &v, e.to_string())
            })?;
        }
        if let Some(v) = get("SCULPTOR_FRONTEND") {
            settings.frontend = PathBuf::from(v);
        }
        if let Some(v) = get("SCULPTOR_MODEL") {
            settings.model = v.trim().to_string();
        }
        if let Some(v) = get("SCULPTOR_TIMEOUT_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("SCULPTOR_TIMEOUT_SECS", &v, e.to_string()))?;
            if secs == 0 {
                return Err(invalid("SCULPTOR_TIMEOUT_SECS", &v, "must be positive".into()));
            }
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get("SCULPTOR_PREVIEW_SIZE") {
            let size: u32 = v
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("SCULPTOR_PREVIEW_SIZE", &v, e.to_string()))?;
            if size == 0 || size > MAX_PREVIEW_SIZE {
                return Err(invalid(
                    "SCULPTOR_PREVIEW_SIZE",
                    &v,
                    format!("must be between 1 and {MAX_PREVIEW_SIZE}"),
                ));
            }
            settings.preview_size = size;
        }
        settings.api_key = get("GEMINI_API_KEY").or_else(|| get("API_KEY"));
        Ok(settings)
    }
}

fn invalid(var: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    }
}
