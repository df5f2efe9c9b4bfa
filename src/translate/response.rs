//! Decoding of translation replies.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use super::TranslationMap;

/// Fields a completion service may carry its text in.
const TEXT_FIELDS: &[&str] = &["output", "result", "text", "content"];

/// Parse the free-text reply of the completion backend.
///
/// One blank-line separated block per key, in key order. The first line of a
/// block echoes the key; each following `<lang>: <text>` line is a
/// translation. Lines for unknown languages, and keys without a block, are
/// skipped. A quote pair around the translation is removed, as is a single
/// trailing period the key itself does not have.
pub fn parse_request_output(text: &str, keys: &[String], languages: &[String]) -> TranslationMap {
    let mut translations: TranslationMap = languages
        .iter()
        .map(|lang| (lang.clone(), Default::default()))
        .collect();

    let normalized = text.replace("\r\n", "\n");
    let blocks: Vec<&str> = normalized.trim().split("\n\n").collect();

    for (key, block) in keys.iter().zip(blocks) {
        for line in block.trim().lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((lang, value)) = languages.iter().find_map(|lang| {
                line.strip_prefix(lang.as_str())
                    .and_then(|rest| rest.strip_prefix(':'))
                    .map(|rest| (lang, rest))
            }) else {
                continue;
            };
            let value = normalize_translation(value.trim(), key);
            if let Some(map) = translations.get_mut(lang) {
                map.insert(key.clone(), value);
            }
        }
    }

    translations
}

fn normalize_translation(value: &str, key: &str) -> String {
    let mut value = value;
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = &value[1..value.len() - 1];
    }
    if !key.ends_with('.')
        && let Some(stripped) = value.strip_suffix('.')
    {
        value = stripped;
    }
    value.to_string()
}

/// Reduce a completion reply body to its text.
///
/// Accepts a JSON string, a JSON object with a string `output`, `result`,
/// `text` or `content` field, or plain text.
pub fn reply_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text,
        Ok(Value::Object(object)) => TEXT_FIELDS
            .iter()
            .find_map(|field| object.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

#[derive(Deserialize)]
struct StructuredReply {
    translations: serde_json::Map<String, Value>,
}

/// Decode `{"translations": {lang: {key: text}}}`. Non-string values are dropped.
pub fn parse_structured(body: &str) -> Result<TranslationMap> {
    let reply: StructuredReply =
        serde_json::from_str(body).context("Translation reply is not valid JSON")?;
    Ok(reply
        .translations
        .into_iter()
        .filter_map(|(lang, entries)| match entries {
            Value::Object(entries) => Some((
                lang,
                entries
                    .into_iter()
                    .filter_map(|(key, value)| match value {
                        Value::String(text) => Some((key, text)),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        })
        .collect())
}
