use std::fmt;

pub const JSON_PARSE_ERROR: &str = "Invalid Json";
pub const INVALID_PROTOCOL_ERROR: &str = "Invalid Protocol, use https";
pub const UNSUPPORTED_ENDPOINT_ERROR: &str = "Unsupported Endpoint";
pub const INVALID_PROMPT_ERROR: &str
  = "Invalid Prompt, cannot be null or empty";
pub const MSG_OVERRIDE_FORBIDDEN_ERROR: &str
  = "Invalid override, 'messages' cannot be overriden";

/// Error type for text generation.
/// The Display text of each variant is exactly what callers get back
/// as the outcome string, so it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Override params or API response were not usable JSON
    JsonParse
  , /// Endpoint does not start with https://
    InvalidProtocol
  , /// Endpoint host is not a known OpenAI host
    UnsupportedEndpoint
  , /// Prompt was null or empty
    InvalidPrompt
  , /// Override params tried to replace 'messages'
    OverrideForbidden
  , /// HTTP transport failure, passed through verbatim
    Transport(String)
  , /// Secret resolution failure, passed through verbatim
    Credential(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::JsonParse => f.write_str(JSON_PARSE_ERROR)
          , Error::InvalidProtocol => {
              f.write_str(INVALID_PROTOCOL_ERROR)
            }
          , Error::UnsupportedEndpoint => {
              f.write_str(UNSUPPORTED_ENDPOINT_ERROR)
            }
          , Error::InvalidPrompt => {
              f.write_str(INVALID_PROMPT_ERROR)
            }
          , Error::OverrideForbidden => {
              f.write_str(MSG_OVERRIDE_FORBIDDEN_ERROR)
            }
          , Error::Transport(msg) => f.write_str(msg)
          , Error::Credential(msg) => f.write_str(msg)
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   Error::Transport(e.to_string())
    }
}
