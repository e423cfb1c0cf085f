// アプリケーション層モジュール
pub mod access_key_handler;
pub mod custom_resource_runner;

// 再エクスポート
pub use access_key_handler::{AccessKeyHandler, CustomResourceHandler, HandlerError};
pub use custom_resource_runner::{CustomResourceRunner, RunnerError};
