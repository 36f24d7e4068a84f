use serde_json::{json, Value};

use aigen::error::Error;
use aigen::payload::{
  build_payload, canonical_payload, merge_overrides, parse_overrides
};

fn keys(serialized: &str) -> Vec<String>
{   let value: Value = serde_json::from_str(serialized).unwrap();
    value.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_canonical_payload()
{   let payload = build_payload("gpt-4", "hi", None).unwrap();
    assert_eq!(
      payload
    , r#"{"model":"gpt-4","messages":[{"role":"user","content":"hi"}]}"#
    );
}

#[test]
fn test_prompt_is_escaped()
{   let payload = build_payload("m", "say \"hi\"\n", None).unwrap();
    let value: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["messages"][0]["content"], "say \"hi\"\n");
}

#[test]
fn test_empty_overrides_ignored()
{   assert_eq!(
      build_payload("m", "p", Some("")).unwrap()
    , build_payload("m", "p", None).unwrap()
    );
}

#[test]
fn test_novel_keys_appended_in_order()
{   let payload = build_payload(
      "m", "p", Some(r#"{"temperature":0.5,"max_tokens":64,"n":1}"#)
    ).unwrap();
    assert_eq!(
      keys(&payload)
    , ["model", "messages", "temperature", "max_tokens", "n"]
    );
}

#[test]
fn test_existing_key_replaced_in_place()
{   let payload = build_payload(
      "gpt-3.5-turbo", "p", Some(r#"{"top_p":1,"model":"gpt-4"}"#)
    ).unwrap();
    assert_eq!(keys(&payload), ["model", "messages", "top_p"]);
    let value: Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["model"], "gpt-4");
}

#[test]
fn test_merge_is_shallow()
{   let base = canonical_payload("m", "p");
    let base = merge_overrides(
      base
    , parse_overrides(r#"{"response_format":{"type":"json_object","extra":1}}"#)
        .unwrap()
    ).unwrap();
    let merged = merge_overrides(
      base
    , parse_overrides(r#"{"response_format":{"type":"text"}}"#).unwrap()
    ).unwrap();
    assert_eq!(merged["response_format"], json!({"type": "text"}));
}

#[test]
fn test_independent_builds_never_duplicate_keys()
{   let overrides = r#"{"temperature":0.5,"seed":7}"#;
    let first = build_payload("m", "p", Some(overrides)).unwrap();
    let second = build_payload("m", "p", Some(overrides)).unwrap();
    assert_eq!(first, second);
    assert_eq!(keys(&first), ["model", "messages", "temperature", "seed"]);
}

#[test]
fn test_messages_forbidden_anywhere()
{   for overrides in
      [ r#"{"messages":[]}"#
      , r#"{"n":1,"messages":[{"role":"system","content":"x"}]}"#
      , r#"{"model":"gpt-4","temperature":2,"messages":{}}"#
      ]
    {   assert_eq!(
          build_payload("m", "p", Some(overrides))
        , Err(Error::OverrideForbidden)
        );
    }
}

#[test]
fn test_forbidden_merge_leaves_nothing_behind()
{   let base = canonical_payload("m", "p");
    let before = base.clone();
    let rejected = merge_overrides(
      base.clone()
    , parse_overrides(r#"{"model":"gpt-4","messages":[]}"#).unwrap()
    );
    assert_eq!(rejected, Err(Error::OverrideForbidden));
    assert_eq!(base, before);
}

#[test]
fn test_malformed_overrides()
{   for raw in [r#"{"a":"#, "{a:1}", "", "null", "[]", "\"temperature\"", "1"]
    {   assert_eq!(parse_overrides(raw), Err(Error::JsonParse), "{:?}", raw);
    }
}
