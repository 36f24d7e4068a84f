use serde_json::json;

use aigen::error::Error;
use aigen::providers::openai::{
  extract_content, parse_chat_completion, ExtractFailure
};

#[test]
fn test_parse_minimal_response()
{   assert_eq!(
      parse_chat_completion(r#"{"choices":[{"message":{"content":"hello"}}]}"#)
    , Ok("hello".to_string())
    );
}

#[test]
fn test_extra_fields_ignored()
{   let body = json!({
      "id": "chatcmpl-abc",
      "model": "gpt-4",
      "choices": [
        { "index": 0
        , "message": { "role": "assistant", "content": "4", "refusal": null }
        , "logprobs": null
        },
        { "index": 1, "message": { "content": "ignored" } }
      ],
      "usage": { "prompt_tokens": 5 }
    });
    assert_eq!(parse_chat_completion(&body.to_string()), Ok("4".to_string()));
}

#[test]
fn test_not_json()
{   for body in ["", "oops", r#"{"choices":"#]
    {   assert_eq!(parse_chat_completion(body), Err(Error::JsonParse));
    }
}

#[test]
fn test_each_step_of_the_walk()
{   let cases =
      [ (json!({}), ExtractFailure::MissingChoices)
      , (json!([]), ExtractFailure::MissingChoices)
      , (json!({"choices": []}), ExtractFailure::MissingChoices)
      , (json!({"choices": {"0": 1}}), ExtractFailure::MissingChoices)
      , (json!({"choices": [1]}), ExtractFailure::MissingMessage)
      , (json!({"choices": [{}]}), ExtractFailure::MissingMessage)
      , (json!({"choices": [{"message": "hi"}]}), ExtractFailure::MissingMessage)
      , (json!({"choices": [{"message": {}}]}), ExtractFailure::MissingContent)
      , (json!({"choices": [{"message": {"content": null}}]}), ExtractFailure::MissingContent)
      , (json!({"choices": [{"message": {"content": 42}}]}), ExtractFailure::MissingContent)
      , (json!({"choices": [{"message": {"content": ""}}]}), ExtractFailure::EmptyContent)
      ];
    for (document, failure) in cases
    {   assert_eq!(extract_content(&document), Err(failure), "{}", document);
        assert_eq!(
          parse_chat_completion(&document.to_string())
        , Err(Error::JsonParse)
        );
    }
}

#[test]
fn test_error_body_is_parse_error()
{   let body = r#"{"error":{"message":"Rate limit","type":"requests"}}"#;
    assert_eq!(
      parse_chat_completion(body).unwrap_err().to_string()
    , "Invalid Json"
    );
}
