//! Canonical request payload and caller overrides

use serde_json::{Map, Value};
use log::{error, trace, warn};

use crate::error::{Error, JSON_PARSE_ERROR};
use crate::providers::openai::{
  ChatMessage, REQUEST_FIELD_MESSAGES, REQUEST_FIELD_MODEL
};

pub type Payload = Map<String, Value>;

/// `{"model": .., "messages": [{"role": "user", "content": ..}]}`
pub fn canonical_payload(model: &str, prompt: &str) -> Payload
{   let mut payload = Map::new();
    payload.insert(
      REQUEST_FIELD_MODEL.to_string()
    , Value::String(model.to_string())
    );
    payload.insert(
      REQUEST_FIELD_MESSAGES.to_string()
    , serde_json::json!([ChatMessage::user(prompt)])
    );
    payload
}

/// Parse caller override params; anything but a JSON object is rejected
pub fn parse_overrides(raw: &str) -> Result<Payload, Error>
{   let value: Value = serde_json::from_str(raw).map_err(|e| {
      warn!(
        "{}: error {:?}, line {}, column {}",
        JSON_PARSE_ERROR, e.classify(), e.line(), e.column()
      );
      Error::JsonParse
    })?;
    match value
    {   Value::Object(map) => Ok(map)
      , other => {
          warn!("{}: overrides must be an object, got {}", JSON_PARSE_ERROR, other);
          Err(Error::JsonParse)
        }
    }
}

/// Shallow merge: existing keys keep their position and take the new
/// value, new keys are appended in override order. `messages` is
/// rejected before the payload is touched.
pub fn merge_overrides(
  mut payload: Payload
, overrides: Payload
) -> Result<Payload, Error>
{   if overrides.contains_key(REQUEST_FIELD_MESSAGES)
    {   error!(
          "{}: 'messages' is constructed from 'prompt', \
           cannot be overridden",
          JSON_PARSE_ERROR
        );
        return Err(Error::OverrideForbidden);
    }
    for (key, value) in overrides
    {   payload.insert(key, value);
    }
    Ok(payload)
}

/// Canonical payload with overrides applied, serialized for the wire
pub fn build_payload(
  model: &str
, prompt: &str
, overrides: Option<&str>
) -> Result<String, Error>
{   let mut payload = canonical_payload(model, prompt);
    if let Some(raw) = overrides.filter(|o| !o.is_empty())
    {   payload = merge_overrides(payload, parse_overrides(raw)?)?;
    }
    let serialized = Value::Object(payload).to_string();
    trace!("AI Generate Text: payload: {}", serialized);
    Ok(serialized)
}
