/// Outcome of a successful custom resource handler run
///
/// `physical_id` becomes the resource's PhysicalResourceId and `data` is
/// exposed to the template through `Fn::GetAtt`.
use serde_json::{Map, Value};

/// Data keys whose values never appear in `Display` output
const MASKED_KEYS: &[&str] = &["SecretAccessKey"];

#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub physical_id: String,
    pub data: Map<String, Value>,
}

impl HandlerResponse {
    pub fn new(physical_id: impl Into<String>) -> Self {
        Self {
            physical_id: physical_id.into(),
            data: Map::new(),
        }
    }

    /// Add one attribute to the response data
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Check whether the data carries a value that must not be echoed
    pub fn has_secret(&self) -> bool {
        MASKED_KEYS.iter().any(|key| self.data.contains_key(*key))
    }
}

impl std::fmt::Display for HandlerResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut shown = self.data.clone();
        for key in MASKED_KEYS {
            if let Some(value) = shown.get_mut(*key) {
                *value = Value::String("****".to_string());
            }
        }
        write!(f, "HandlerResponse({}, {})", self.physical_id, Value::Object(shown))
    }
}
