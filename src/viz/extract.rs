//! Fenced-block Vega-Lite extraction.
//!
//! The model is instructed to wrap chart specs in ```vega-lite fences, but in
//! practice replies also arrive with ```json fences or with prose around the
//! block. Recognition is therefore duck-typed: any fenced JSON object that
//! either names a vega schema or carries the minimal chart keys is accepted.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

const FENCE_PATTERN: &str = r"```(?:vega-lite|json)\s*\n?([\s\S]*?)```";

/// Scan `text` for the first fenced code block that parses as a Vega-Lite
/// spec. Candidates are considered in document order; blocks that fail to
/// parse as JSON are skipped rather than aborting the scan.
pub fn extract_visualization(text: &str) -> Option<Value> {
    if let Ok(re) = Regex::new(FENCE_PATTERN) {
        for caps in re.captures_iter(text) {
            let candidate = match caps.get(1) {
                Some(m) => m.as_str().trim(),
                None => continue,
            };
            if candidate.is_empty() {
                continue;
            }
            let value: Value = match serde_json::from_str(candidate) {
                Ok(v) => v,
                Err(_) => {
                    debug!("skipping fenced block that is not valid JSON");
                    continue;
                }
            };
            if looks_like_vega_lite(&value) {
                return Some(value);
            }
        }
    }
    None
}

/// A candidate is a chart when it is an object and either its `$schema`
/// names vega, or it has `data` plus a `mark` or `layer`.
fn looks_like_vega_lite(value: &Value) -> bool {
    let obj = match value.as_object() {
        Some(o) => o,
        None => return false,
    };

    if let Some(schema) = obj.get("$schema").and_then(|s| s.as_str()) {
        if schema.contains("vega") {
            return true;
        }
    }

    obj.contains_key("data") && (obj.contains_key("mark") || obj.contains_key("layer"))
}
