// Infrastructure layer modules
pub mod config;
pub mod iam_ops;
pub mod logging;
pub mod response_sender;

// Re-exports
pub use config::{HandlerConfig, HandlerConfigError};
pub use iam_ops::{AwsIamOps, CreatedAccessKey, IamOps, IamOpsError};
pub use logging::{init_cli_logging, init_logging};
pub use response_sender::{HttpResponseSender, ResponseSendError, ResponseSender};
