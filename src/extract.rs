//! Extraction of a JSON object from prose-wrapped model output.
//!
//! Generation endpoints routinely wrap the requested JSON in explanatory
//! text despite instructions, so extraction tolerates an arbitrary prefix
//! and suffix. The scan tracks string literals and backslash escapes, so
//! braces inside string values do not unbalance the count.

use crate::error::GenError;
use serde_json::Value;

/// Extract and parse the leftmost balanced top-level `{...}` span in `text`.
///
/// Fails with [`GenError::Extraction`] when no balanced span exists or when
/// the span is not valid JSON. Both cases are retryable upstream.
pub fn extract_json_object(text: &str) -> Result<Value, GenError> {
    let span = balanced_object_span(text).ok_or_else(|| {
        GenError::Extraction("no balanced JSON object in response".to_string())
    })?;

    serde_json::from_str(span)
        .map_err(|e| GenError::Extraction(format!("candidate span is not valid JSON: {e}")))
}

/// Find the first `{` and scan forward to the `}` that closes it, skipping
/// over string literals. Returns `None` when the object never closes.
fn balanced_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }

    None
}
