/// ResourceProperties of a `Custom::IamAccessKey` resource
///
/// CloudFormation passes every scalar property as a string, so numeric
/// properties accept both JSON numbers and numeric strings.
use serde_json::{Map, Value};
use thiserror::Error;

/// Property validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertiesError {
    #[error("ResourceProperties is missing")]
    MissingProperties,

    #[error("UserName is required and must be a non-empty string")]
    MissingUserName,

    #[error("Serial must be a non-negative integer: {0}")]
    InvalidSerial(String),

    #[error("Status must be Active or Inactive: {0}")]
    InvalidStatus(String),
}

/// IAM access key status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessKeyStatus {
    #[default]
    Active,
    Inactive,
}

impl AccessKeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKeyStatus::Active => "Active",
            AccessKeyStatus::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for AccessKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeyProperties {
    /// IAM user that owns the key
    pub user_name: String,

    /// Bumping this forces a new key (rotation)
    pub serial: u64,

    pub status: AccessKeyStatus,
}

impl AccessKeyProperties {
    /// Parse the properties map of a request
    pub fn parse(properties: Option<&Map<String, Value>>) -> Result<Self, PropertiesError> {
        let properties = properties.ok_or(PropertiesError::MissingProperties)?;

        let user_name = properties
            .get("UserName")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(PropertiesError::MissingUserName)?
            .to_string();

        let serial = match properties.get("Serial") {
            None | Some(Value::Null) => 0,
            Some(value) => parse_serial(value)?,
        };

        let status = match properties.get("Status") {
            None | Some(Value::Null) => AccessKeyStatus::default(),
            Some(Value::String(s)) if s == "Active" => AccessKeyStatus::Active,
            Some(Value::String(s)) if s == "Inactive" => AccessKeyStatus::Inactive,
            Some(other) => return Err(PropertiesError::InvalidStatus(other.to_string())),
        };

        Ok(Self {
            user_name,
            serial,
            status,
        })
    }

    /// Whether moving from `old` to `self` needs a brand new access key
    ///
    /// A key cannot change owner, and a changed Serial is an explicit
    /// rotation request. Status changes are applied in place.
    pub fn requires_replacement(&self, old: &AccessKeyProperties) -> bool {
        self.user_name != old.user_name || self.serial != old.serial
    }
}

fn parse_serial(value: &Value) -> Result<u64, PropertiesError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| PropertiesError::InvalidSerial(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| PropertiesError::InvalidSerial(s.clone())),
        other => Err(PropertiesError::InvalidSerial(other.to_string())),
    }
}
