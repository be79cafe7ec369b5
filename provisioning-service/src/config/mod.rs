use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_optional_env};
use service_core::error::AppError;

pub const DEFAULT_API_HOST: &str = "api.mist.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ProvisioningConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub mist: MistConfig,
    pub redis: RedisConfig,
    pub context: ContextConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MistConfig {
    /// Operator credential used when a request carries no `X-Mist-API-Key`.
    /// Empty disables the fallback.
    pub api_key: Secret<String>,
    pub default_api_host: String,
    pub request_timeout_seconds: u64,
}

impl MistConfig {
    pub fn fallback_key(&self) -> Option<&str> {
        let key = self.api_key.expose_secret().trim();
        (!key.is_empty()).then_some(key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    pub key_prefix: String,
    /// `None` keeps session context until it is deleted.
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl ProvisioningConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment: Environment = get_env("ENVIRONMENT_NAME", Some("dev"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let request_timeout_seconds = get_env("MIST_REQUEST_TIMEOUT_SECONDS", Some("30"), false)?
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                AppError::ConfigError(anyhow::anyhow!("MIST_REQUEST_TIMEOUT_SECONDS: {}", e))
            })?;

        let config = ProvisioningConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("provisioning-service"), false)?,
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            mist: MistConfig {
                api_key: Secret::new(get_optional_env("MIST_API_KEY").unwrap_or_default()),
                default_api_host: get_env("MIST_DEFAULT_API_HOST", Some(DEFAULT_API_HOST), false)?,
                request_timeout_seconds,
            },
            redis: RedisConfig {
                url: Secret::new(get_env("REDIS_URL", Some("redis://localhost:6379"), is_prod)?),
            },
            context: ContextConfig {
                key_prefix: get_env("CONTEXT_KEY_PREFIX", Some("mist-ctx"), false)?,
                ttl_seconds: parse_ttl(get_optional_env("CONTEXT_TTL_SECONDS").as_deref())?,
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("*"), false)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.common.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if self.mist.request_timeout_seconds == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MIST_REQUEST_TIMEOUT_SECONDS must be positive"
            )));
        }

        if self.context.key_prefix.is_empty() || self.context.key_prefix.contains(':') {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CONTEXT_KEY_PREFIX must be non-empty and must not contain ':'"
            )));
        }

        if self.environment == Environment::Prod {
            if self.security.allowed_origins.iter().any(|o| o == "*") {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin not allowed in production"
                )));
            }

            if self.mist.fallback_key().is_some() {
                tracing::warn!(
                    "MIST_API_KEY is set in production; requests without X-Mist-API-Key \
                     will share its session context"
                );
            }
        }

        Ok(())
    }
}

/// `0` and unset both mean "no expiry".
fn parse_ttl(raw: Option<&str>) -> Result<Option<u64>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let seconds: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                AppError::ConfigError(anyhow::anyhow!("CONTEXT_TTL_SECONDS: {}", e))
            })?;
            Ok((seconds > 0).then_some(seconds))
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}
