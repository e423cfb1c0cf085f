/// CloudFormation custom resource request
///
/// Mirrors the JSON document CloudFormation delivers to the Lambda function.
/// Fields CloudFormation adds that the handler does not use (`ServiceToken`
/// at the top level, for example) are ignored.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CloudFormationRequestType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudFormationCustomResourceRequest {
    /// Create / Update / Delete
    pub request_type: CloudFormationRequestType,

    /// Pre-signed S3 URL that receives the response document
    #[serde(rename = "ResponseURL")]
    pub response_url: String,

    /// ARN of the stack that owns the resource
    pub stack_id: String,

    /// Unique id of this request, echoed back in the response
    pub request_id: String,

    /// Template type name, e.g. `Custom::IamAccessKey`
    pub resource_type: String,

    /// Template logical id of the resource
    pub logical_resource_id: String,

    /// Present on Update and Delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_properties: Option<Map<String, Value>>,

    /// Present on Update only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
}

impl CloudFormationCustomResourceRequest {
    /// Build a request from all of its parts
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        request_type: CloudFormationRequestType,
        response_url: impl Into<String>,
        stack_id: impl Into<String>,
        request_id: impl Into<String>,
        resource_type: impl Into<String>,
        logical_resource_id: impl Into<String>,
        physical_resource_id: Option<String>,
        resource_properties: Option<Map<String, Value>>,
        old_resource_properties: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            request_type,
            response_url: response_url.into(),
            stack_id: stack_id.into(),
            request_id: request_id.into(),
            resource_type: resource_type.into(),
            logical_resource_id: logical_resource_id.into(),
            physical_resource_id,
            resource_properties,
            old_resource_properties,
        }
    }

    /// Physical id, treating an empty string the same as absent
    pub fn physical_resource_id(&self) -> Option<&str> {
        self.physical_resource_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}
