// Domain layer modules
pub mod access_key_properties;
pub mod custom_resource_request;
pub mod custom_resource_response;
pub mod handler_response;
pub mod request_type;

// Re-exports
pub use access_key_properties::{AccessKeyProperties, AccessKeyStatus, PropertiesError};
pub use custom_resource_request::CloudFormationCustomResourceRequest;
pub use custom_resource_response::{CustomResourceResponse, ResponseStatus};
pub use handler_response::HandlerResponse;
pub use request_type::CloudFormationRequestType;
