use axum::http::HeaderValue;
use cloudpulse_core::catalog::ResourceDimensions;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin (`CORS_ORIGINS=*`).
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Region of the metrics backend and notification channel.
    pub aws_region: String,
    /// Topic that manual alerts are published to.
    pub sns_topic_arn: String,
    /// The monitored instance and its root filesystem.
    pub resource: ResourceDimensions,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `4000`                   |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `AWS_REGION`           | required                 |
    /// | `INSTANCE_ID`          | required                 |
    /// | `SNS_TOPIC_ARN`        | required                 |
    /// | `ROOT_DISK_PATH`       | `/`                      |
    /// | `ROOT_DISK_DEVICE`     | `xvda1`                  |
    /// | `ROOT_DISK_FSTYPE`     | `xfs`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let host = optional("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var("PORT", optional("PORT"), 4000u16)?;
        let request_timeout_secs =
            parse_var("REQUEST_TIMEOUT_SECS", optional("REQUEST_TIMEOUT_SECS"), 30u64)?;

        let cors_origins = parse_cors_origins(
            &optional("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".into()),
        )?;

        let defaults = ResourceDimensions::for_instance(required("INSTANCE_ID")?);
        let resource = ResourceDimensions {
            root_path: optional("ROOT_DISK_PATH").unwrap_or(defaults.root_path.clone()),
            root_device: optional("ROOT_DISK_DEVICE").unwrap_or(defaults.root_device.clone()),
            root_fstype: optional("ROOT_DISK_FSTYPE").unwrap_or(defaults.root_fstype.clone()),
            ..defaults
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            aws_region: required("AWS_REGION")?,
            sns_topic_arn: required("SNS_TOPIC_ARN")?,
            resource,
        })
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

/// Parse a comma-separated origin list. `*` allows any origin.
fn parse_cors_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.contains(&"*") {
        return Ok(Vec::new());
    }

    origins
        .into_iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: o.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
