//! OpenAI chat-completion dialect: message shape and response parsing

use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::{trace, warn};

use crate::error::{Error, JSON_PARSE_ERROR};

pub const OPEN_AI_PUBLIC_ENDPOINT: &str = "api.openai.com";
pub const OPEN_AI_AZURE_ENDPOINT: &str = "openai.azure.com";
pub const OPEN_AI_HOSTS: [&str; 2]
  = [OPEN_AI_PUBLIC_ENDPOINT, OPEN_AI_AZURE_ENDPOINT];

pub const REQUEST_FIELD_MODEL: &str = "model";
pub const REQUEST_FIELD_MESSAGES: &str = "messages";
const RESPONSE_FIELD_CHOICES: &str = "choices";
const RESPONSE_FIELD_MESSAGE: &str = "message";
const RESPONSE_FIELD_CONTENT: &str = "content";

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

// ===== Response Parsing =====

/// Why a response could not be turned into text.
/// Only logged; callers always see the generic JSON error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractFailure
{   NotJson
  , MissingChoices
  , MissingMessage
  , MissingContent
  , EmptyContent
}

/// Walk `choices[0].message.content`, ignoring any other fields
pub fn extract_content(document: &Value) -> Result<&str, ExtractFailure>
{   let choices = document.get(RESPONSE_FIELD_CHOICES)
      .and_then(Value::as_array)
      .filter(|c| !c.is_empty())
      .ok_or(ExtractFailure::MissingChoices)?;
    let message = choices[0].get(RESPONSE_FIELD_MESSAGE)
      .filter(|m| m.is_object())
      .ok_or(ExtractFailure::MissingMessage)?;
    let content = message.get(RESPONSE_FIELD_CONTENT)
      .and_then(Value::as_str)
      .ok_or(ExtractFailure::MissingContent)?;
    if content.is_empty()
    {   return Err(ExtractFailure::EmptyContent);
    }
    Ok(content)
}

/// Parse a raw chat-completion body into the generated text
pub fn parse_chat_completion(body: &str) -> Result<String, Error>
{   let document: Value = serde_json::from_str(body).map_err(|e| {
      warn!(
        "{}: {:?} ({:?} at line {}, column {}): {}",
        JSON_PARSE_ERROR, ExtractFailure::NotJson,
        e.classify(), e.line(), e.column(), body
      );
      Error::JsonParse
    })?;
    match extract_content(&document)
    {   Ok(content) => {
          trace!("AI Generate Text: response: {}", content);
          Ok(content.to_string())
        }
      , Err(failure) => {
          warn!("{}: {:?}: {}", JSON_PARSE_ERROR, failure, body);
          Err(Error::JsonParse)
        }
    }
}
