//! Utilities for extracting structured data from model responses.
//!
//! Planning responses often contain JSON wrapped in markdown code blocks or
//! mixed with explanatory prose. Normalization is best-effort and never
//! fails; callers own parse validation and fallback content.

use reelforge_error::{JsonError, ReelforgeResult};

/// Normalize a model response down to its structured payload.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Outermost balanced `{...}` or `[...]` region (string/escape aware)
/// 3. The trimmed full text
///
/// Idempotent: running the normalizer on its own output is a no-op.
///
/// # Examples
///
/// ```
/// use reelforge_pipeline::normalize_payload;
///
/// let response = "Here's the plan:\n```json\n[{\"title\": \"Opening\"}]\n```\n";
/// assert_eq!(normalize_payload(response), "[{\"title\": \"Opening\"}]");
/// ```
pub fn normalize_payload(response: &str) -> String {
    if let Some(payload) = extract_from_code_block(response, "json") {
        return payload;
    }

    // Prefer whichever structure opens first in the response.
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let balanced = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    };
    if let Some(payload) = balanced {
        return payload;
    }

    response.trim().to_string()
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence - likely truncated response
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to next newline (in case there's a language specifier)
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, handling nesting correctly.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
pub fn parse_json<T>(json_str: &str) -> ReelforgeResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}
