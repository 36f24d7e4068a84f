//! Process-wide configuration for the text generation engine

use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{debug, error};

use crate::credentials::SecretResolver;
use crate::error::Error;

pub const ENV_ENDPOINT: &str = "AI_ENDPOINT";
pub const ENV_MODEL: &str = "AI_MODEL";
pub const ENV_API_KEY: &str = "AI_API_KEY";
pub const ENV_API_KEY_SECRET: &str = "AI_API_KEY_SECRET";
pub const ENV_CONNECTION_TIMEOUT: &str = "AI_CONNECTION_TIMEOUT_S";
pub const ENV_STRICT_HOST_CHECK: &str = "AI_STRICT_HOST_CHECK";

const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;

/// Engine configuration.
///
/// Built once at startup and only read afterwards; every call takes its
/// defaults from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig
{   /// Default API endpoint
    pub endpoint: String
  , /// Default model
    pub model: String
  , /// Default bearer token
    pub api_key: Option<String>
  , /// Secret name resolved into `api_key` at startup
    pub api_key_secret: Option<String>
  , /// Request timeout in seconds
    pub connection_timeout_secs: u64
  , /// Only accept structurally matching hosts
    pub strict_host_check: bool
}

impl Default for EngineConfig
{   fn default() -> Self
    {   EngineConfig
        {   endpoint: String::new()
          , model: String::new()
          , api_key: None
          , api_key_secret: None
          , connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS
          , strict_host_check: false
        }
    }
}

impl EngineConfig
{   /// Defaults overlaid with the AI_* environment variables
    pub fn from_env() -> Result<Self, Error>
    {   let mut config = EngineConfig::default();
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT)
        {   config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var(ENV_MODEL)
        {   config.model = model;
        }
        config.api_key = non_empty_var(ENV_API_KEY);
        config.api_key_secret = non_empty_var(ENV_API_KEY_SECRET);
        if let Ok(raw) = std::env::var(ENV_CONNECTION_TIMEOUT)
        {   config.connection_timeout_secs = raw.trim().parse()
              .map_err(|e| {
                error!("{} is not a number: {}", ENV_CONNECTION_TIMEOUT, e);
                Error::InvalidConfiguration(
                  format!("{}={}", ENV_CONNECTION_TIMEOUT, raw)
                )
              })?;
        }
        if let Ok(raw) = std::env::var(ENV_STRICT_HOST_CHECK)
        {   config.strict_host_check = parse_bool(&raw)
              .ok_or_else(|| {
                error!("{} is not a boolean", ENV_STRICT_HOST_CHECK);
                Error::InvalidConfiguration(
                  format!("{}={}", ENV_STRICT_HOST_CHECK, raw)
                )
              })?;
        }
        debug!(
          "Loaded config from env, endpoint: {:?}, model: {:?}",
          config.endpoint, config.model
        );
        Ok(config)
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
          error!("Failed to read {}: {}", path.display(), e);
          Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })?;
        serde_json::from_str(&raw).map_err(|e| {
          error!("Failed to parse {}: {}", path.display(), e);
          Error::InvalidConfiguration(
            format!("{}: {}", path.display(), e)
          )
        })
    }

    /// Resolve `api_key_secret` into the default bearer token.
    /// A config without a secret name is returned unchanged.
    pub fn resolve_api_key(
      mut self
    , resolver: &dyn SecretResolver
    ) -> Result<Self, Error>
    {   if let Some(secret) = &self.api_key_secret
        {   debug!("Resolving default api key from secret {}", secret);
            let key = resolver.resolve(secret)
              .map_err(Error::Credential)?;
            self.api_key = Some(key);
        }
        Ok(self)
    }

    pub fn connection_timeout(&self) -> Duration
    {   Duration::from_secs(self.connection_timeout_secs)
    }

    /// Default bearer token, empty when none is configured
    pub fn default_api_key(&self) -> &str
    {   self.api_key.as_deref().unwrap_or("")
    }
}

fn non_empty_var(name: &str) -> Option<String>
{   std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool>
{   match raw.trim().to_ascii_lowercase().as_str()
    {   "1" | "true" | "yes" | "on" => Some(true)
      , "0" | "false" | "no" | "off" => Some(false)
      , _ => None
    }
}
