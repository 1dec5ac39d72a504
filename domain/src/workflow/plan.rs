//! Project plan value object

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plan produced by the planning agent.
///
/// The coordinator never looks inside: the value is handed back verbatim
/// as request context when the plan is executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPlan(Value);

impl ProjectPlan {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_transparently() {
        let plan = ProjectPlan::new(json!({"steps": ["init repo"]}));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json, json!({"steps": ["init repo"]}));
    }

    #[test]
    fn test_plain_string_plan() {
        let plan: ProjectPlan = serde_json::from_str("\"Plan: build it\"").unwrap();
        assert_eq!(plan.as_value(), &json!("Plan: build it"));
    }
}
