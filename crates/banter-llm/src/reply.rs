//! Turning completion responses and failures into reply text.
//!
//! Every path ends in a string that gets stored as an assistant message, so
//! the fixed replies below are user-visible.

use banter_types::trim_text;
use serde_json::Value;

pub const COULD_NOT_PARSE_REPLY: &str = "Sorry, could not parse AI reply.";
pub const NO_RESPONSE_REPLY: &str = "No response from AI service.";
pub const MODEL_UNAVAILABLE_REPLY: &str =
    "AI model unavailable. Please contact admin to update the model.";
pub const AUTH_ERROR_REPLY: &str = "AI auth error. Check GROQ_API_KEY.";
pub const SERVICE_ERROR_REPLY: &str = "AI service returned an error. Using fallback reply.";
pub const NETWORK_ERROR_REPLY: &str = "AI network error. Using fallback reply.";

/// Longest raw-choice dump kept when a choice has no recognizable text
pub const MAX_RAW_CHOICE_CHARS: usize = 4000;

/// Reply used when no completion credential is configured
pub fn echo_reply(prompt: &str) -> String {
    format!("You said: \"{prompt}\". (Fallback reply, no GROQ_API_KEY.)")
}

/// Pull the reply text out of a 2xx response body.
///
/// Precedence: `choices[0].message.content`, `choices[0].text`, the first
/// choice serialized (capped at [`MAX_RAW_CHOICE_CHARS`]), then
/// `output[0].content`. A `null` first choice yields [`NETWORK_ERROR_REPLY`].
pub fn extract_reply(body: Option<&Value>) -> String {
    let Some(body) = body.filter(|b| is_truthy(b)) else {
        return NO_RESPONSE_REPLY.to_string();
    };

    let reply = if let Some(first) = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
    {
        if first.is_null() {
            // a null choice has nothing to read and counts as a failed call
            return NETWORK_ERROR_REPLY.to_string();
        }
        if let Some(content) = first.pointer("/message/content").filter(|v| is_truthy(v)) {
            trim_text(&stringify(content)).to_string()
        } else if let Some(text) = first.get("text").filter(|v| is_truthy(v)) {
            trim_text(&stringify(text)).to_string()
        } else {
            first.to_string().chars().take(MAX_RAW_CHOICE_CHARS).collect()
        }
    } else if let Some(content) = body
        .get("output")
        .and_then(Value::as_array)
        .and_then(|output| output.first())
        .and_then(|first| first.get("content"))
        .filter(|v| is_truthy(v))
    {
        trim_text(&stringify(content)).to_string()
    } else {
        return COULD_NOT_PARSE_REPLY.to_string();
    };

    // a whitespace-only reply cannot be stored
    if trim_text(&reply).is_empty() {
        COULD_NOT_PARSE_REPLY.to_string()
    } else {
        reply
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
