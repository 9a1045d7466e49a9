//! Server configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use doclink_reporting::Locale;
use doclink_resolution::ResolutionConfig;

use crate::error::AppError;

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// `PostgreSQL` URL for the persistent cache. In-memory cache when unset.
    pub database_url: Option<String>,
    /// JSON file mapping error codes to description URIs.
    pub error_codes_file: Option<PathBuf>,
    /// Locale used for log lines rendered by the error reporter.
    pub reporting_locale: Locale,
    /// Base URL of the reporter's documentation links.
    pub docs_base_url: String,
    /// Resolution service tunables.
    pub resolution: ResolutionConfig,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `var`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = ResolutionConfig::default();

        let port = parse_or(&var, "PORT", 3000)?;
        let event_capacity = parse_or(&var, "EVENT_BUFFER_CAPACITY", defaults.event_capacity)?;
        if event_capacity == 0 {
            return Err(AppError::Config(
                "EVENT_BUFFER_CAPACITY must be greater than zero".to_owned(),
            ));
        }
        let coalesce_lookups = parse_or(&var, "COALESCE_LOOKUPS", defaults.coalesce_lookups)?;
        let drain_timeout = var("DRAIN_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    AppError::Config(format!("DRAIN_TIMEOUT_SECS must be a valid u64: {e}"))
                })
            })
            .transpose()?
            .unwrap_or(defaults.drain_timeout);
        let reporting_locale = var("REPORTING_LOCALE")
            .unwrap_or_else(|| "en-US".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("REPORTING_LOCALE: {e}")))?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            database_url: var("DATABASE_URL").filter(|url| !url.is_empty()),
            error_codes_file: var("ERROR_CODES_FILE").map(PathBuf::from),
            reporting_locale,
            docs_base_url: var("DOCS_BASE_URL")
                .unwrap_or_else(|| "https://docs.doclink.dev/errors".to_owned()),
            resolution: ResolutionConfig {
                event_capacity,
                coalesce_lookups,
                drain_timeout,
            },
        })
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::Config(format!(
                "{key} must be a valid {}: {e}",
                std::any::type_name::<T>()
            ))
        }),
        None => Ok(default),
    }
}
