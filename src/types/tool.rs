//! Service-facing tool declaration and the per-invocation audit record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool declaration in the shape the reasoning service consumes.
/// Derived from a [`crate::tools::ToolDescriptor`]; `input_schema` is a
/// JSON-Schema-style object with `properties` and `required`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Audit entry for one tool invocation, accumulated in call order for the
/// lifetime of one request. `result` holds the tool's payload on success or
/// an `{"error": ...}` envelope when the invocation faulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub args: Value,
    pub result: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_call_record_roundtrip() {
        let record = ToolCallRecord {
            tool: "citation-stats".to_string(),
            args: json!({}),
            result: json!({"total_papers": 25000}),
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["tool"], "citation-stats");
        assert_eq!(v["result"]["total_papers"], 25000);
    }
}
