//! Lenient extraction — best-effort recovery of a JSON object from
//! otherwise unstructured generated text.
//!
//! Provider replies are not guaranteed well-formed: they arrive wrapped in
//! markdown code fences, preceded by prose, or followed by commentary. The
//! extraction strips fences and takes the substring from the first `{` to
//! the last `}`. This is not balanced-brace parsing; a stray closing brace
//! in trailing text defeats it, and the composers fall back when it does.

/// Pull a JSON object out of generated text, or `None` if nothing parses.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let cleaned = strip_code_fences(text).trim();
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str(&cleaned[start..=end]) {
        Ok(value @ serde_json::Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "lenient extraction failed to parse candidate JSON");
            None
        }
    }
}

/// Take the contents of the first ```json (or bare ```) fence, if any.
fn strip_code_fences(text: &str) -> &str {
    if let Some((_, rest)) = text.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_json_object() {
        let value = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn json_inside_fenced_block() {
        let text = "Here you go:\n```json\n{\"status\": \"ok\"}\n```\nanything else";
        let value = extract_json(text).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[test]
    fn json_inside_bare_fence() {
        let text = "```\n{\"x\": true}\n```";
        assert_eq!(extract_json(text).unwrap()["x"], true);
    }

    #[test]
    fn prose_around_braces_is_ignored() {
        let text = "The result is {\"n\": 2} as requested.";
        assert_eq!(extract_json(text).unwrap()["n"], 2);
    }

    #[test]
    fn nested_objects_survive() {
        let text = r#"{"outer": {"inner": [1, 2, 3]}}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["outer"]["inner"][2], 3);
    }

    #[test]
    fn missing_braces_yield_none() {
        assert!(extract_json("no json here").is_none());
        assert!(extract_json("only an opening { brace").is_none());
        assert!(extract_json("} reversed {").is_none());
    }

    #[test]
    fn non_object_json_yields_none() {
        // first-{/last-} slicing never selects a bare array, but a brace pair
        // wrapping garbage must not pass
        assert!(extract_json("{not valid json}").is_none());
    }

    #[test]
    fn stray_trailing_brace_defeats_extraction() {
        // Documented limitation: the slice runs to the LAST }, which here
        // captures trailing commentary and fails to parse.
        let text = r#"{"a": 1} and by the way }"#;
        assert!(extract_json(text).is_none());
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(extract_json("").is_none());
    }
}
