//! Per-call request and outcome types

use std::fmt;
use serde::{Deserialize, Serialize};

/// One text generation request.
/// Empty and absent optional fields both mean "use the configured default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec
{   /// API endpoint URL
    pub endpoint: Option<String>
  , /// The prompt text
    pub prompt: Option<String>
  , /// Model name
    pub model: Option<String>
  , /// Name of the secret holding the bearer token
    pub credential_reference: Option<String>
  , /// JSON object merged into the request payload
    pub overrides: Option<String>
  , /// Return the request instead of sending it
    #[serde(default)]
    pub dry_run: bool
}

impl RequestSpec
{   pub fn new(prompt: impl Into<String>) -> Self
    {   RequestSpec
        {   prompt: Some(prompt.into())
          , ..RequestSpec::default()
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self
    {   self.endpoint = Some(endpoint.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }

    pub fn credential_reference(mut self, name: impl Into<String>) -> Self
    {   self.credential_reference = Some(name.into());
        self
    }

    pub fn overrides(mut self, overrides: impl Into<String>) -> Self
    {   self.overrides = Some(overrides.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self
    {   self.dry_run = dry_run;
        self
    }
}

/// Result of a single call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome
{   /// Generated text from the API
    ExtractedText(String)
  , /// Would-be request, dry run only
    SerializedRequest(String)
  , /// One of the fixed error strings, or a transport/credential message
    ErrorMessage(String)
}

impl Outcome
{   pub fn is_error(&self) -> bool
    {   matches!(self, Outcome::ErrorMessage(_))
    }

    pub fn as_str(&self) -> &str
    {   match self
        {   Outcome::ExtractedText(s)
          | Outcome::SerializedRequest(s)
          | Outcome::ErrorMessage(s) => s
        }
    }

    pub fn into_string(self) -> String
    {   match self
        {   Outcome::ExtractedText(s)
          | Outcome::SerializedRequest(s)
          | Outcome::ErrorMessage(s) => s
        }
    }
}

impl fmt::Display for Outcome
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl From<crate::error::Error> for Outcome
{   fn from(e: crate::error::Error) -> Self
    {   Outcome::ErrorMessage(e.to_string())
    }
}
