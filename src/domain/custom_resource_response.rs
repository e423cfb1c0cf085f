/// Response document uploaded to the request's ResponseURL
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CloudFormationCustomResourceRequest, HandlerResponse};

/// CloudFormation rejects longer reasons
const MAX_REASON_BYTES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,

    /// Masks `Data` in DescribeStackEvents and console output
    #[serde(default)]
    pub no_echo: bool,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl CustomResourceResponse {
    /// SUCCESS document for a completed handler run
    pub fn success(
        request: &CloudFormationCustomResourceRequest,
        response: HandlerResponse,
    ) -> Self {
        let no_echo = response.has_secret();
        Self {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: response.physical_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo,
            data: response.data,
        }
    }

    /// FAILED document
    ///
    /// CloudFormation requires a physical id even on failure. The request's
    /// own id is reused when it has one so a failed Update or Delete does not
    /// look like a replacement.
    pub fn failure(
        request: &CloudFormationCustomResourceRequest,
        reason: impl Into<String>,
        fallback_physical_id: impl Into<String>,
    ) -> Self {
        let physical_resource_id = request
            .physical_resource_id()
            .map(str::to_string)
            .unwrap_or_else(|| fallback_physical_id.into());

        Self {
            status: ResponseStatus::Failed,
            reason: Some(truncate_reason(reason.into())),
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            no_echo: false,
            data: Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

fn truncate_reason(mut reason: String) -> String {
    if reason.len() <= MAX_REASON_BYTES {
        return reason;
    }
    let mut end = MAX_REASON_BYTES;
    while !reason.is_char_boundary(end) {
        end -= 1;
    }
    reason.truncate(end);
    reason
}
