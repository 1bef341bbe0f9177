use crate::error::ConnectorError;
use rmcp::model::{CallToolResult, Content, JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::sync::Arc;

/// Successful tool result: pretty-printed JSON as text content, and the same value as
/// structured content (non-object values are wrapped under `data`).
pub fn pretty_json_result<T: Serialize>(data: &T) -> Result<CallToolResult, ConnectorError> {
    let value = serde_json::to_value(data)?;
    let text = serde_json::to_string_pretty(&value)?;

    let map: JsonMap<String, JsonValue> = match value {
        JsonValue::Object(m) => m,
        other => {
            let mut m = JsonMap::new();
            m.insert("data".to_string(), other);
            m
        }
    };

    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(JsonValue::Object(map)),
        is_error: Some(false),
        meta: None,
    })
}

/// Failed tool result carrying a single human-readable message.
pub fn error_result(err: &ConnectorError) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format!("Error: {}", err))],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

/// JSON schema object for a tool's input type.
pub fn input_schema<T: JsonSchema>() -> Result<Arc<JsonObject>, ConnectorError> {
    match serde_json::to_value(schemars::schema_for!(T))? {
        JsonValue::Object(map) => Ok(Arc::new(map)),
        _ => Err(ConnectorError::Other(
            "tool input schema is not an object".to_string(),
        )),
    }
}

/// First text content of a tool result, if any.
pub fn result_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .iter()
        .find_map(|content| content.as_text().map(|t| t.text.as_str()))
}
