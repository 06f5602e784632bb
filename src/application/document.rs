//! Locating the hierarchy inside backend result documents
//!
//! Accepted shapes, tried in order:
//! - a bare node: object with `name` or `children`
//! - an LLM result: `{ "hierarchy": <shape>, "prompts": [...] }`
//! - a stored request: `{ "tasks": { "hierarchyGeneration": { "status", "data": { "hierarchy": <shape> } } } }`,
//!   once the task succeeded, or while it is still `running` with the hierarchy already saved
//! - an unparsed LLM result: `{ "raw": "..." }` (rejected)

use serde_json::Value;
use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};

const TASK_NAME: &str = "hierarchyGeneration";
const SUCCESS: &str = "success";
const RUNNING: &str = "running";

/// Find the hierarchy root inside a parsed document.
pub fn locate_hierarchy(doc: &Value) -> ApplicationResult<&Value> {
    let Some(obj) = doc.as_object() else {
        return Err(ApplicationError::HierarchyNotFound);
    };

    if obj.contains_key("name") || obj.contains_key("children") {
        debug!("document is a bare hierarchy node");
        return Ok(doc);
    }

    if let Some(inner) = obj.get("hierarchy") {
        debug!("unwrapping 'hierarchy' envelope");
        return locate_hierarchy(inner);
    }

    if let Some(task) = obj.get("tasks").and_then(|t| t.get(TASK_NAME)) {
        let inner = task
            .get("data")
            .and_then(|d| d.get("hierarchy"))
            .filter(|h| !h.is_null());
        match task.get("status").and_then(Value::as_str) {
            None | Some(SUCCESS) => {}
            // hierarchy is saved before the optional evaluation step finishes
            Some(RUNNING) if inner.is_some() => {
                info!("task '{}' still running, exporting saved hierarchy", TASK_NAME);
            }
            Some(status) => {
                return Err(ApplicationError::HierarchyNotReady {
                    status: status.to_string(),
                });
            }
        }
        debug!("unwrapping request record task '{}'", TASK_NAME);
        return locate_hierarchy(inner.ok_or(ApplicationError::HierarchyNotFound)?);
    }

    if obj.contains_key("raw") {
        return Err(ApplicationError::UnparsedHierarchy);
    }

    Err(ApplicationError::HierarchyNotFound)
}
