//! Endpoint and prompt validation

use log::{error, warn};
use url::Url;

use crate::error::Error;
use crate::providers::openai::OPEN_AI_HOSTS;

const API_ENDPOINT_PREFIX: &str = "https://";

/// Empty requested endpoint means the configured default
pub fn resolve_endpoint<'a>(requested: &'a str, default: &'a str) -> &'a str
{   if requested.is_empty() { default } else { requested }
}

/// Endpoint must start with https://, ignoring case
pub fn is_api_endpoint_valid(endpoint: &str) -> bool
{   endpoint.len() >= API_ENDPOINT_PREFIX.len()
      && endpoint.is_char_boundary(API_ENDPOINT_PREFIX.len())
      && endpoint[..API_ENDPOINT_PREFIX.len()]
        .eq_ignore_ascii_case(API_ENDPOINT_PREFIX)
}

/// Endpoint must reference one of the OpenAI hosts.
///
/// The parsed host has to be a known host or a subdomain of one. Unless
/// `strict` is set, an endpoint that only mentions a known host somewhere
/// in the string is still accepted for compatibility, with a warning.
pub fn is_api_endpoint_supported(endpoint: &str, strict: bool) -> bool
{   if host_matches(endpoint)
    {   return true;
    }
    if strict
    {   return false;
    }
    let lowered = endpoint.to_ascii_lowercase();
    let legacy = OPEN_AI_HOSTS.iter().any(|h| lowered.contains(h));
    if legacy
    {   warn!(
          "Endpoint host is not a known OpenAI host, \
           accepted by substring match: {}",
          endpoint
        );
    }
    legacy
}

fn host_matches(endpoint: &str) -> bool
{   let Ok(url) = Url::parse(endpoint) else { return false };
    let Some(host) = url.host_str() else { return false };
    let host = host.to_ascii_lowercase();
    OPEN_AI_HOSTS.iter().any(|known| {
      host == *known
        || host.strip_suffix(known)
          .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Resolve the effective endpoint and run the protocol and host checks
pub fn validate_endpoint(
  requested: &str
, default: &str
, strict: bool
) -> Result<String, Error>
{   let endpoint = resolve_endpoint(requested, default);
    if !is_api_endpoint_valid(endpoint)
    {   error!("AI Generate Text: invalid protocol: {}", endpoint);
        return Err(Error::InvalidProtocol);
    }
    if !is_api_endpoint_supported(endpoint, strict)
    {   error!("AI Generate Text: unsupported endpoint: {}", endpoint);
        return Err(Error::UnsupportedEndpoint);
    }
    Ok(endpoint.to_string())
}

/// Prompt must be present and non-empty
pub fn validate_prompt(prompt: Option<&str>) -> Result<&str, Error>
{   match prompt
    {   Some(p) if !p.is_empty() => Ok(p)
      , _ => {
          error!("AI Generate Text: null or empty prompt");
          Err(Error::InvalidPrompt)
        }
    }
}
