//! Output formatting for command results
//!
//! Stdout carries the result (JSON or extracted assistant text); summaries
//! and diagnostics go to stderr so the output stays pipeable.

use eyre::Result;
use serde_json::Value;

/// Pretty-print a JSON value to stdout
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Extract the assistant text from an OpenAI-compatible chat response
pub fn chat_text(response: &Value) -> Option<String> {
    let content = response.get("choices")?.get(0)?.get("message")?.get("content")?.as_str()?;
    if content.is_empty() { None } else { Some(content.to_string()) }
}

/// Print a chat response: assistant text by default, full JSON on request
/// or when the response shape is unexpected
pub fn print_chat(response: &Value, raw_json: bool, show_sources: bool) -> Result<()> {
    if raw_json {
        return print_json(response);
    }

    match chat_text(response) {
        Some(text) => println!("{}", text),
        // Fallback: show the full response if the shape is unexpected.
        None => print_json(response)?,
    }

    if show_sources
        && let Some(sources) = response.get("source_nodes")
        && !sources.is_null()
    {
        println!("\n---\nsource_nodes:");
        print_json(sources)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_text_extracts_content() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "The answer."}}]
        });
        assert_eq!(chat_text(&response).as_deref(), Some("The answer."));
    }

    #[test]
    fn test_chat_text_missing_choices() {
        assert!(chat_text(&json!({"error": "boom"})).is_none());
    }

    #[test]
    fn test_chat_text_empty_choices() {
        assert!(chat_text(&json!({"choices": []})).is_none());
    }

    #[test]
    fn test_chat_text_empty_content() {
        let response = json!({"choices": [{"message": {"content": ""}}]});
        assert!(chat_text(&response).is_none());
    }

    #[test]
    fn test_chat_text_non_string_content() {
        let response = json!({"choices": [{"message": {"content": 42}}]});
        assert!(chat_text(&response).is_none());
    }
}
