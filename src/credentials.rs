//! Secret resolution: turns a named credential reference into a bearer token

use std::collections::HashMap;
use std::path::Path;
use log::{debug, error};

use crate::error::Error;

/// Resolves a named secret into a bearer token.
///
/// The `Err` string is handed back to the caller of the engine verbatim,
/// so it should read well on its own.
pub trait SecretResolver: Send + Sync
{   fn resolve(&self, reference: &str) -> Result<String, String>;
}

/// Looks the secret up in the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvSecretResolver;

impl SecretResolver for EnvSecretResolver
{   fn resolve(&self, reference: &str) -> Result<String, String>
    {   match std::env::var(reference)
        {   Ok(value) if !value.is_empty() => {
              debug!("Resolved secret {} from environment", reference);
              Ok(value)
            }
          , _ => {
              error!("Secret {} not set in environment", reference);
              Err(format!(
                "Failed to get secret '{}' from the environment",
                reference
              ))
            }
        }
    }
}

/// Fixed name -> token map
#[derive(Debug, Clone, Default)]
pub struct StaticSecretResolver
{   secrets: HashMap<String, String>
}

impl StaticSecretResolver
{   pub fn new() -> Self
    {   StaticSecretResolver::default()
    }

    pub fn with_secret(
      mut self
    , name: impl Into<String>
    , token: impl Into<String>
    ) -> Self
    {   self.secrets.insert(name.into(), token.into());
        self
    }
}

impl SecretResolver for StaticSecretResolver
{   fn resolve(&self, reference: &str) -> Result<String, String>
    {   self.secrets.get(reference)
          .cloned()
          .ok_or_else(|| {
            error!("Unknown secret: {}", reference);
            format!("Secret '{}' not found", reference)
          })
    }
}

/// Keystore backed by a JSON file of `{"name": "token"}` pairs,
/// read once when the resolver is built
#[derive(Debug, Clone)]
pub struct KeystoreFileResolver
{   path: String
  , secrets: HashMap<String, String>
}

impl KeystoreFileResolver
{   pub fn open(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
          error!("Failed to read keystore {}: {}", path.display(), e);
          Error::InvalidConfiguration(
            format!("keystore {}: {}", path.display(), e)
          )
        })?;
        let secrets: HashMap<String, String>
          = serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse keystore {}: {}", path.display(), e);
            Error::InvalidConfiguration(
              format!("keystore {}: {}", path.display(), e)
            )
          })?;
        debug!(
          "Loaded {} secrets from keystore {}",
          secrets.len(), path.display()
        );
        Ok(KeystoreFileResolver
        {   path: path.display().to_string()
          , secrets
        })
    }
}

impl SecretResolver for KeystoreFileResolver
{   fn resolve(&self, reference: &str) -> Result<String, String>
    {   self.secrets.get(reference)
          .cloned()
          .ok_or_else(|| {
            error!("Secret {} not in keystore {}", reference, self.path);
            format!(
              "Secret '{}' not found in keystore {}",
              reference, self.path
            )
          })
    }
}
