use std::{env, time::Duration};

use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    api: ApiSettings,
    session: SessionSettings,
    runtime: RuntimeSettings,
    telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) base_url: ApiBaseUrl,
    pub(crate) timeout_seconds: u64,
    pub(crate) connect_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) token: Option<String>,
    pub(crate) user: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Base URL of the exam backend, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiBaseUrl(String);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required secret for {0}")]
    MissingSecret(&'static str),
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) base_url: Option<String>,
    pub(crate) token: Option<String>,
    pub(crate) log_json: bool,
}

impl Settings {
    pub(crate) fn load_with(overrides: Overrides) -> Result<Self, ConfigError> {
        let base_url = overrides
            .base_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| env_or_default("EXAM_ADMIN_API_URL", DEFAULT_API_URL));

        let timeout_seconds = parse_positive_u64(
            "EXAM_ADMIN_TIMEOUT_SECONDS",
            env_or_default("EXAM_ADMIN_TIMEOUT_SECONDS", "30"),
        )?;
        let connect_timeout_seconds = parse_positive_u64(
            "EXAM_ADMIN_CONNECT_TIMEOUT_SECONDS",
            env_or_default("EXAM_ADMIN_CONNECT_TIMEOUT_SECONDS", "10"),
        )?;

        let token = overrides
            .token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| env_optional("EXAM_ADMIN_TOKEN"));
        let user = env_optional("EXAM_ADMIN_USER");

        let environment = parse_environment(env_optional("EXAM_ADMIN_ENV"));

        let log_level = env_or_default("EXAM_ADMIN_LOG_LEVEL", "info");
        let json = overrides.log_json
            || env_optional("EXAM_ADMIN_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            api: ApiSettings {
                base_url: ApiBaseUrl::parse(base_url)?,
                timeout_seconds,
                connect_timeout_seconds,
            },
            session: SessionSettings { token, user },
            runtime: RuntimeSettings { environment },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn session(&self) -> &SessionSettings {
        &self.session
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.connect_timeout_seconds > self.api.timeout_seconds {
            return Err(ConfigError::InvalidValue {
                field: "EXAM_ADMIN_CONNECT_TIMEOUT_SECONDS",
                value: self.api.connect_timeout_seconds.to_string(),
            });
        }

        if self.runtime.environment.is_production() && self.session.token.is_none() {
            return Err(ConfigError::MissingSecret("EXAM_ADMIN_TOKEN"));
        }

        Ok(())
    }
}

impl ApiSettings {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl ApiBaseUrl {
    pub(crate) fn parse(value: String) -> Result<Self, ConfigError> {
        let trimmed = value.trim().trim_end_matches('/');
        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let has_host = trimmed.split("://").nth(1).is_some_and(|rest| !rest.is_empty());
        if !has_scheme || !has_host {
            return Err(ConfigError::InvalidBaseUrl(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

fn parse_positive_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidValue { field, value }),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES" | "on" | "ON")
}

fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref().map(|val| val.to_lowercase()) {
        Some(ref val) if val == "production" || val == "prod" => Environment::Production,
        Some(ref val) if val == "staging" => Environment::Staging,
        Some(ref val) if val == "test" || val == "testing" => Environment::Test,
        _ => Environment::Development,
    }
}
