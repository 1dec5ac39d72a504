//! Delegated response record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response returned by the dispatcher for one delegated request.
///
/// `response` is opaque and may itself be structured. Any further fields the
/// dispatcher sends are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub response: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowResponse {
    pub fn new(response: impl Into<Value>) -> Self {
        Self {
            response: response.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Application-level `success` flag, when the dispatcher reports one.
    pub fn reported_success(&self) -> Option<bool> {
        self.extra.get("success").and_then(Value::as_bool)
    }

    pub fn into_response(self) -> Value {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_are_flattened() {
        let response: WorkflowResponse = serde_json::from_value(json!({
            "response": {"files": 3},
            "success": true,
            "model": "planner-large"
        }))
        .unwrap();

        assert_eq!(response.response, json!({"files": 3}));
        assert_eq!(response.extra.get("model"), Some(&json!("planner-large")));
        assert_eq!(response.reported_success(), Some(true));
    }

    #[test]
    fn test_reported_success_absent() {
        let response = WorkflowResponse::new("env ready");
        assert_eq!(response.reported_success(), None);

        let failed = WorkflowResponse::new("nope").with_field("success", false);
        assert_eq!(failed.reported_success(), Some(false));
    }

    #[test]
    fn test_serializes_flat() {
        let response = WorkflowResponse::new("code done").with_field("duration_ms", 12);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"response": "code done", "duration_ms": 12}));
    }
}
