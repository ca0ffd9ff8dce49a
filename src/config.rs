//! Static configuration, read once from the environment at cold start.

use thiserror::Error;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
}

/// Deployment stage, used to decide how much gets logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvLevel {
    #[default]
    Dev,
    Qa,
    Prod,
    Local,
}

impl EnvLevel {
    /// Anything starting with `prod` is production; unknown values fall back to dev.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.starts_with("prod") {
            Self::Prod
        } else if value == "qa" {
            Self::Qa
        } else if value == "local" {
            Self::Local
        } else {
            Self::Dev
        }
    }

    #[must_use]
    pub const fn is_prod(self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub region: String,
    pub bucket_name: String,
    /// Prefix joined in front of the request URI to build object keys.
    pub base_path: String,
    pub env_level: EnvLevel,
}

impl Config {
    #[must_use]
    pub fn new(region: impl Into<String>, bucket_name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket_name: bucket_name.into(),
            base_path: String::new(),
            env_level: EnvLevel::default(),
        }
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Load configuration from `S3BUCKETNAME`, `AWS_REGION`, `S3_BASE_PATH` and `APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no bucket name is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no bucket name is configured.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bucket_name = lookup("S3BUCKETNAME")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("S3BUCKETNAME"))?;
        let region = lookup("AWS_REGION")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut config = Self::new(region, bucket_name);
        if let Some(base_path) = lookup("S3_BASE_PATH") {
            config.base_path = base_path;
        }
        if let Some(env) = lookup("APP_ENV") {
            config.env_level = EnvLevel::parse(&env);
        }
        Ok(config)
    }

    /// Virtual-hosted bucket domain. `us-east-1` uses the global endpoint.
    #[must_use]
    pub fn bucket_domain(&self) -> String {
        if self.region == DEFAULT_REGION {
            format!("{}.s3.amazonaws.com", self.bucket_name)
        } else {
            format!("{}.s3.{}.amazonaws.com", self.bucket_name, self.region)
        }
    }
}
