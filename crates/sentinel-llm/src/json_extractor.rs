//! JSON extraction utilities for cleaning LLM responses

use crate::error::{LLMError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn fenced_block() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("fence pattern is valid")
    })
}

/// Extracts a JSON object from an LLM response
///
/// Providers in JSON mode normally return a bare object, but some wrap it in a
/// markdown fence or add a sentence around it. Handles, in order:
/// - Bare JSON
/// - Markdown code blocks (```json ... ```)
/// - The outermost `{ ... }` span of the text
///
/// # Returns
/// * `Ok(serde_json::Value)` - Parsed JSON object
/// * `Err(LLMError)` - If no JSON object found
pub fn extract_json(llm_output: &str) -> Result<serde_json::Value> {
    let cleaned = llm_output.trim();
    if cleaned.is_empty() {
        return Err(LLMError::InvalidResponse("Empty response".to_string()));
    }

    if let Some(value) = parse_object(cleaned) {
        return Ok(value);
    }

    if let Some(captures) = fenced_block().captures(cleaned) {
        if let Some(value) = captures.get(1).and_then(|m| parse_object(m.as_str())) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            if let Some(value) = parse_object(&cleaned[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(LLMError::InvalidResponse(
        "No JSON object found in response".to_string(),
    ))
}

fn parse_object(candidate: &str) -> Option<serde_json::Value> {
    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}
