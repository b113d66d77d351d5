use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;
use thiserror::Error;

use crate::clients::http::RetryPolicy;

pub const DEFAULT_BASE_API_URL: &str = "https://alanwarpakijangan.com/api";
pub const DEFAULT_MYQURAN_BASE_URL: &str = "https://api.myquran.com/v2";
pub const DEFAULT_CITY_ID: &str = "1219";
pub const DEFAULT_CITY_NAME: &str = "Kota Semarang";
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unable to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Typed settings. Each key is looked up in the config file, then through
/// `lookup` (the process environment in the binary), then defaulted.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_api_url: String,
    pub myquran_base_url: String,
    pub city_id: String,
    pub city_name: String,
    pub timezone: Tz,
    pub hijri_adjustment: i32,
    pub retry: RetryPolicy,
    pub log_format: LogFormat,
    pub log_level: tracing::Level,
}

impl Settings {
    pub fn load<L>(config: &AppConfig, lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get_prop = |key: &str| -> Option<String> {
            config
                .get(key)
                .or_else(|| lookup(key))
                .filter(|v| !v.trim().is_empty())
        };
        let string_or = |key: &str, default: &str| get_prop(key).unwrap_or(default.to_string());
        let trimmed_or = |key: &str, default: &str| string_or(key, default).trim().to_string();
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let timezone_raw = trimmed_or("TIMEZONE", DEFAULT_TIMEZONE);
        let timezone: Tz = timezone_raw
            .parse()
            .map_err(|_| invalid("TIMEZONE", &timezone_raw))?;

        let adj_raw = trimmed_or("HIJRI_ADJUSTMENT", "-1");
        let hijri_adjustment: i32 = adj_raw
            .parse()
            .map_err(|_| invalid("HIJRI_ADJUSTMENT", &adj_raw))?;

        let retries_raw = trimmed_or("HTTP_RETRIES", "3");
        let attempts: u32 = retries_raw
            .parse()
            .map_err(|_| invalid("HTTP_RETRIES", &retries_raw))?;

        let backoff_raw = trimmed_or("HTTP_RETRY_BACKOFF_MS", "500");
        let backoff_ms: u64 = backoff_raw
            .parse()
            .map_err(|_| invalid("HTTP_RETRY_BACKOFF_MS", &backoff_raw))?;

        let timeout_raw = trimmed_or("HTTP_TIMEOUT_MS", "10000");
        let timeout_ms: u64 = timeout_raw
            .parse()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| invalid("HTTP_TIMEOUT_MS", &timeout_raw))?;

        let format_raw = trimmed_or("LOG_FORMAT", "text");
        let log_format = match format_raw.to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            _ => return Err(invalid("LOG_FORMAT", &format_raw)),
        };

        let level_raw = trimmed_or("LOG_LEVEL", "info");
        let log_level: tracing::Level = level_raw
            .parse()
            .map_err(|_| invalid("LOG_LEVEL", &level_raw))?;

        Ok(Self {
            base_api_url: string_or("BASE_API_URL", DEFAULT_BASE_API_URL),
            myquran_base_url: string_or("MYQURAN_BASE_URL", DEFAULT_MYQURAN_BASE_URL),
            city_id: string_or("CITY_ID", DEFAULT_CITY_ID),
            city_name: string_or("CITY_NAME", DEFAULT_CITY_NAME),
            timezone,
            hijri_adjustment,
            retry: RetryPolicy {
                attempts,
                backoff: Duration::from_millis(backoff_ms),
                timeout: Duration::from_millis(timeout_ms),
            },
            log_format,
            log_level,
        })
    }
}
