//! Response decoders — raw model text in, typed results out.
//!
//! Structured replies are parsed as JSON and then walked field by field.
//! The first violation found is reported with its path (`[2].viralScore`,
//! `sections[1].heading`); there is no partial recovery. Extra fields are ignored.
//!
//! The trend reply is free text and always decodes.

use serde_json::{Map, Value};

use crate::llm_client::RawReply;
use crate::mediation::error::MediationError;
use crate::mediation::models::{FullScript, ScriptSection, TrendResult, VideoIdea, VideoMetadata};

const VIRAL_SCORE_MIN: i64 = 1;
const VIRAL_SCORE_MAX: i64 = 100;

type Object = Map<String, Value>;

// ────────────────────────────────────────────────────────────────────────────
// Unstructured flow
// ────────────────────────────────────────────────────────────────────────────

pub fn decode_trends(niche: &str, reply: RawReply) -> TrendResult {
    let first = reply.citations.first().cloned();
    TrendResult {
        topic: format!("Trend Report for {}", niche.trim()),
        narrative: reply.text,
        citation_url: first.as_ref().map(|c| c.url.clone()),
        citation_title: first.and_then(|c| c.title),
        citations: reply.citations,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Structured flows
// ────────────────────────────────────────────────────────────────────────────

pub fn decode_ideas(text: &str) -> Result<Vec<VideoIdea>, MediationError> {
    let root = parse_reply(text)?;
    as_array(&root, "")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = index("", i);
            let obj = as_object(item, &path)?;
            Ok(VideoIdea {
                title: required_string(obj, &path, "title")?,
                hook: required_string(obj, &path, "hook")?,
                viral_score: viral_score(obj, &path)?,
                target_audience: required_string(obj, &path, "targetAudience")?,
            })
        })
        .collect()
}

pub fn decode_script(text: &str) -> Result<FullScript, MediationError> {
    let root = parse_reply(text)?;
    let obj = as_object(&root, "")?;
    let title = required_string(obj, "", "title")?;

    let sections_path = join("", "sections");
    let sections = as_array(field(obj, "", "sections")?, &sections_path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = index(&sections_path, i);
            let section = as_object(item, &path)?;
            Ok(ScriptSection {
                heading: required_string(section, &path, "heading")?,
                content: text_field(section, &path, "content")?,
                duration: text_field(section, &path, "duration")?,
            })
        })
        .collect::<Result<Vec<_>, MediationError>>()?;

    Ok(FullScript { title, sections })
}

pub fn decode_metadata(text: &str) -> Result<VideoMetadata, MediationError> {
    let root = parse_reply(text)?;
    let obj = as_object(&root, "")?;
    Ok(VideoMetadata {
        titles: string_list(obj, "", "titles", 1)?,
        description: text_field(obj, "", "description")?,
        tags: string_list(obj, "", "tags", 0)?,
        thumbnail_prompt: required_string(obj, "", "thumbnailPrompt")?,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ────────────────────────────────────────────────────────────────────────────

/// Parses reply text as JSON, tolerating a surrounding markdown code fence.
fn parse_reply(text: &str) -> Result<Value, MediationError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(MediationError::MalformedResponse(
            "model returned an empty reply".to_string(),
        ));
    }
    serde_json::from_str(text)
        .map_err(|e| MediationError::MalformedResponse(format!("reply is not valid JSON: {e}")))
}

/// Strips a surrounding ``` fence, along with any language tag (`json`, `JSON`, ...) on the
/// opening line.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        .trim_start();
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

/// Path shown for the document root.
fn display(path: &str) -> &str {
    if path.is_empty() {
        "$"
    } else {
        path
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, MediationError> {
    value.as_object().ok_or_else(|| {
        MediationError::schema(
            display(path),
            format!("expected an object, got {}", kind_of(value)),
        )
    })
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, MediationError> {
    value.as_array().ok_or_else(|| {
        MediationError::schema(
            display(path),
            format!("expected an array, got {}", kind_of(value)),
        )
    })
}

fn field<'a>(obj: &'a Object, path: &str, key: &str) -> Result<&'a Value, MediationError> {
    obj.get(key)
        .ok_or_else(|| MediationError::schema(join(path, key), "required field is missing"))
}

fn as_string(value: &Value, path: &str) -> Result<String, MediationError> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        MediationError::schema(path, format!("expected a string, got {}", kind_of(value)))
    })
}

/// A string field that may be empty.
fn text_field(obj: &Object, path: &str, key: &str) -> Result<String, MediationError> {
    as_string(field(obj, path, key)?, &join(path, key))
}

/// A string field that must contain something other than whitespace.
fn required_string(obj: &Object, path: &str, key: &str) -> Result<String, MediationError> {
    let value = text_field(obj, path, key)?;
    if value.trim().is_empty() {
        return Err(MediationError::schema(join(path, key), "must not be empty"));
    }
    Ok(value)
}

fn string_list(
    obj: &Object,
    path: &str,
    key: &str,
    min_len: usize,
) -> Result<Vec<String>, MediationError> {
    let list_path = join(path, key);
    let items = as_array(field(obj, path, key)?, &list_path)?;
    if items.len() < min_len {
        return Err(MediationError::schema(
            list_path,
            format!("expected at least {min_len} item(s), got {}", items.len()),
        ));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = index(&list_path, i);
            let value = as_string(item, &item_path)?;
            if value.trim().is_empty() {
                return Err(MediationError::schema(item_path, "must not be empty"));
            }
            Ok(value)
        })
        .collect()
}

/// Integer in 1..=100. Integral floats such as `85.0` are accepted; out-of-range values are
/// rejected rather than clamped.
fn viral_score(obj: &Object, path: &str) -> Result<u8, MediationError> {
    let score_path = join(path, "viralScore");
    let value = field(obj, path, "viralScore")?;
    let number = value.as_number().ok_or_else(|| {
        MediationError::schema(
            &score_path,
            format!("expected a number, got {}", kind_of(value)),
        )
    })?;

    let score = match (number.as_i64(), number.as_f64()) {
        (Some(i), _) => i,
        (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => f as i64,
        (None, Some(f)) if f.fract() != 0.0 => {
            return Err(MediationError::schema(
                score_path,
                format!("must be an integer, got {f}"),
            ))
        }
        _ => {
            return Err(MediationError::schema(
                score_path,
                format!("must be between {VIRAL_SCORE_MIN} and {VIRAL_SCORE_MAX}, got {number}"),
            ))
        }
    };

    if !(VIRAL_SCORE_MIN..=VIRAL_SCORE_MAX).contains(&score) {
        return Err(MediationError::schema(
            score_path,
            format!("must be between {VIRAL_SCORE_MIN} and {VIRAL_SCORE_MAX}, got {score}"),
        ));
    }
    Ok(score as u8)
}
