// ResponseSender - CloudFormationへのレスポンス送信
//
// カスタムリソースの処理結果をリクエストのResponseURL（署名付きS3 URL）へPUTする。
// 送信に失敗するとCloudFormationはタイムアウトまでスタック操作を待ち続けるため、
// 一時的なエラーは指数バックオフで再試行する。

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, instrument};
use url::Url;

use crate::domain::CustomResourceResponse;
use crate::infrastructure::HandlerConfig;

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// レスポンス送信のエラー型
#[derive(Debug, Error)]
pub enum ResponseSendError {
    /// ResponseURLが不正
    #[error("ResponseURLが不正です: {0}")]
    InvalidUrl(String),

    /// HTTPクライアントの構築に失敗
    #[error("HTTPクライアント構築エラー: {0}")]
    ClientBuild(String),

    /// シリアライズエラー
    #[error("シリアライズエラー: {0}")]
    SerializationError(String),

    /// ネットワークエラー（再試行後）
    #[error("ネットワークエラー: {0}")]
    NetworkError(String),

    /// HTTPエラー（ステータスコード付き）
    #[error("HTTPエラー: status={status}, message={message}")]
    HttpError {
        /// HTTPステータスコード
        status: u16,
        /// レスポンスボディ
        message: String,
    },
}

/// レスポンス送信トレイト（テスト用の抽象化）
#[async_trait]
pub trait ResponseSender: Send + Sync {
    /// レスポンスドキュメントをResponseURLへ送信する
    async fn send(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), ResponseSendError>;
}

/// reqwestを使用したHTTPレスポンス送信実装
#[derive(Clone)]
pub struct HttpResponseSender {
    /// HTTPクライアント（再試行ミドルウェア付き）
    client: ClientWithMiddleware,
}

impl std::fmt::Debug for HttpResponseSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponseSender").finish_non_exhaustive()
    }
}

impl HttpResponseSender {
    /// 再試行回数とタイムアウトを指定して作成
    pub fn new(max_retries: u32, request_timeout: Duration) -> Result<Self, ResponseSendError> {
        let base_client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ResponseSendError::ClientBuild(e.to_string()))?;

        // 指数バックオフ再試行ポリシー
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }

    /// 設定から作成
    pub fn from_config(config: &HandlerConfig) -> Result<Self, ResponseSendError> {
        Self::new(config.response_max_retries(), config.response_timeout())
    }
}

/// ResponseURLを検証する
///
/// 署名付きURLのクエリ文字列は署名の一部なので、パースはするが再構築はしない。
fn validate_url(response_url: &str) -> Result<(), ResponseSendError> {
    let url = Url::parse(response_url)
        .map_err(|e| ResponseSendError::InvalidUrl(format!("{}: {}", e, response_url)))?;

    match url.scheme() {
        "https" | "http" => Ok(()),
        other => Err(ResponseSendError::InvalidUrl(format!(
            "unsupported scheme {}",
            other
        ))),
    }
}

#[async_trait]
impl ResponseSender for HttpResponseSender {
    #[instrument(skip(self, response_url, response), fields(request_id = %response.request_id, status = ?response.status))]
    async fn send(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> Result<(), ResponseSendError> {
        validate_url(response_url)?;

        let body = serde_json::to_string(response)
            .map_err(|e| ResponseSendError::SerializationError(e.to_string()))?;

        // 署名付きS3 URLはContent-Typeを署名に含めないため空にする
        let http_response = self
            .client
            .put(response_url)
            .header("Content-Type", "")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "レスポンス送信リクエスト失敗");
                ResponseSendError::NetworkError(e.to_string())
            })?;

        let status = http_response.status();
        if status.is_success() {
            info!(status = %status, "CloudFormationへのレスポンス送信成功");
            return Ok(());
        }

        let message = http_response.text().await.unwrap_or_default();
        error!(status = %status, body = %message, "CloudFormationへのレスポンス送信エラー");

        Err(ResponseSendError::HttpError {
            status: status.as_u16(),
            message,
        })
    }
}
