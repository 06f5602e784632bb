//! Boundary validation: loosely typed JSON into `HierarchyNode`.
//!
//! Strict mode rejects malformed fields with a typed error. Lenient mode
//! substitutes defaults and logs a warning instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::entities::HierarchyNode;
use crate::domain::error::DomainError;

/// How malformed fields are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Strict,
    Lenient,
}

impl ValidationMode {
    pub fn is_strict(self) -> bool {
        self == ValidationMode::Strict
    }
}

/// Validate a JSON value into a typed hierarchy.
pub fn node_from_value(value: &Value, mode: ValidationMode) -> Result<HierarchyNode, DomainError> {
    node_at(value, mode, "")
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn node_at(value: &Value, mode: ValidationMode, path: &str) -> Result<HierarchyNode, DomainError> {
    let obj = value.as_object().ok_or_else(|| DomainError::NotAnObject {
        path: display_path(path),
    })?;

    let name = name_field(obj, mode, path)?;
    let value = value_field(obj, mode, path)?;
    let description = description_field(obj, mode, path)?;

    let children = match obj.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, child)| node_at(child, mode, &format!("{}/children/{}", path, i)))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) if mode.is_strict() => {
            return Err(DomainError::InvalidChildren {
                path: display_path(path),
            })
        }
        Some(_) => {
            warn!("{}: non-list children, treating node as leaf", display_path(path));
            Vec::new()
        }
    };

    Ok(HierarchyNode {
        name,
        value,
        description,
        children,
    })
}

fn name_field(obj: &Map<String, Value>, mode: ValidationMode, path: &str) -> Result<String, DomainError> {
    match obj.get("name") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        None | Some(Value::Null) if mode.is_strict() => Err(DomainError::MissingName {
            path: display_path(path),
        }),
        None | Some(Value::Null) => {
            warn!("{}: missing name, using empty label", display_path(path));
            Ok(String::new())
        }
        Some(other) => Err(DomainError::InvalidField {
            path: display_path(path),
            field: "name",
            message: format!("expected string, got {}", type_name(other)),
        }),
    }
}

fn value_field(obj: &Map<String, Value>, mode: ValidationMode, path: &str) -> Result<f64, DomainError> {
    match obj.get("value") {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        Some(Value::String(s)) if mode.is_strict() => {
            s.trim().parse::<f64>().map_err(|e| DomainError::InvalidField {
                path: display_path(path),
                field: "value",
                message: e.to_string(),
            })
        }
        Some(other) if mode.is_strict() => Err(DomainError::InvalidField {
            path: display_path(path),
            field: "value",
            message: format!("expected number, got {}", type_name(other)),
        }),
        Some(other) => {
            let parsed = other.as_str().and_then(|s| s.trim().parse::<f64>().ok());
            if parsed.is_none() {
                warn!("{}: non-numeric value, using 0", display_path(path));
            }
            Ok(parsed.unwrap_or(0.0))
        }
    }
}

fn description_field(
    obj: &Map<String, Value>,
    mode: ValidationMode,
    path: &str,
) -> Result<Option<String>, DomainError> {
    match obj.get("description") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) if mode.is_strict() => Err(DomainError::InvalidField {
            path: display_path(path),
            field: "description",
            message: format!("expected string, got {}", type_name(other)),
        }),
        Some(_) => {
            warn!("{}: non-string description dropped", display_path(path));
            Ok(None)
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
