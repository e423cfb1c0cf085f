use serde::{Deserialize, Serialize};

/// Lifecycle action CloudFormation asks a custom resource to perform
///
/// Serialized as the exact strings CloudFormation sends in `RequestType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudFormationRequestType {
    /// Resource is being added to the stack
    Create,

    /// Resource properties changed
    Update,

    /// Resource is being removed, or replaced and cleaned up
    Delete,
}

impl CloudFormationRequestType {
    /// Wire representation of the request type
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudFormationRequestType::Create => "Create",
            CloudFormationRequestType::Update => "Update",
            CloudFormationRequestType::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for CloudFormationRequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
