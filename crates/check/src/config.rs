/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Check configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub region: String,
    pub instance_id: String,
    pub sns_topic_arn: String,
}

impl CheckConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var         | Notes                              |
    /// |-----------------|------------------------------------|
    /// | `APP_REGION`    | preferred; falls back to `AWS_REGION` |
    /// | `INSTANCE_ID`   | required                           |
    /// | `SNS_TOPIC_ARN` | required                           |
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

        let region = optional("APP_REGION")
            .or_else(|| optional("AWS_REGION"))
            .ok_or(ConfigError::Missing("APP_REGION"))?;

        Ok(Self {
            region,
            instance_id: required("INSTANCE_ID")?,
            sns_topic_arn: required("SNS_TOPIC_ARN")?,
        })
    }
}
