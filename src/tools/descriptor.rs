//! Declarative tool descriptors and schema derivation.
//!
//! Tools are declared as data: a name, a description, and an ordered list
//! of parameters with semantic types. [`ToolDescriptor::schema`] turns the
//! declaration into the JSON shape the reasoning service consumes.

use serde_json::{json, Map, Value};

use crate::types::ToolSchema;

/// Substitution table from semantic parameter types to the service's
/// primitive vocabulary. Unlisted types pass through unchanged, so new
/// semantic types do not require registry changes.
const TYPE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("int", "integer"),
    ("str", "string"),
    ("bool", "boolean"),
];

/// Normalize a semantic parameter type to the service vocabulary.
/// Idempotent: already-normalized types map to themselves.
pub fn normalize_type(kind: &str) -> &str {
    TYPE_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == kind)
        .map(|(_, to)| *to)
        .unwrap_or(kind)
}

/// One declared parameter of a tool.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    /// Semantic type (`int`, `str`, `bool`, or a future addition).
    pub kind: String,
    pub description: String,
    pub optional: bool,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: description.into(),
            optional: false,
            default: None,
        }
    }

    /// Mark the parameter optional. Optional parameters never appear in
    /// the derived required list.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Give the parameter a default. Defaulted parameters never appear in
    /// the derived required list.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// A parameter is required iff it is neither optional nor defaulted.
    /// Evaluated independently per parameter.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }
}

/// Declarative description of one tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.parameters.push(param);
        self
    }

    /// Derive the service-facing schema. Pure; re-derivable on every
    /// request.
    pub fn schema(&self) -> ToolSchema {
        let mut properties = Map::new();
        let mut required: Vec<Value> = Vec::new();

        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": normalize_type(&param.kind),
                    "description": param.description,
                }),
            );
            if param.is_required() {
                required.push(Value::String(param.name.clone()));
            }
        }

        ToolSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}
