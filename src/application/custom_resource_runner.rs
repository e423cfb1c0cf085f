/// カスタムリソースランナー
///
/// ハンドラーの結果をCloudFormationのレスポンスドキュメントに変換し、
/// ResponseURLへ送信する。ハンドラーの失敗やタイムアウトはFAILEDとして報告し、
/// Lambdaのエラーにはしない。報告しないとCloudFormationは1時間待ち続ける。
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use super::CustomResourceHandler;
use crate::domain::{CloudFormationCustomResourceRequest, CustomResourceResponse};
use crate::infrastructure::{ResponseSendError, ResponseSender};

/// ランナーのエラー型
#[derive(Debug, Error)]
pub enum RunnerError {
    /// レスポンスの送信に失敗
    #[error("Failed to deliver response to CloudFormation: {0}")]
    Send(#[from] ResponseSendError),
}

pub struct CustomResourceRunner<H, S>
where
    H: CustomResourceHandler,
    S: ResponseSender,
{
    handler: H,
    sender: S,
}

impl<H, S> CustomResourceRunner<H, S>
where
    H: CustomResourceHandler,
    S: ResponseSender,
{
    pub fn new(handler: H, sender: S) -> Self {
        Self { handler, sender }
    }

    /// リクエストを処理してレスポンスを送信する
    ///
    /// # 引数
    /// * `request` - カスタムリソースリクエスト
    /// * `fallback_physical_id` - 物理IDが決まらないまま失敗した場合に使うID
    /// * `budget` - ハンドラーに与える時間（`None`なら無制限）
    ///
    /// # 戻り値
    /// * `Ok(CustomResourceResponse)` - 送信したドキュメント（FAILEDを含む）
    /// * `Err(RunnerError)` - 送信に失敗
    pub async fn run(
        &self,
        request: &CloudFormationCustomResourceRequest,
        fallback_physical_id: &str,
        budget: Option<Duration>,
    ) -> Result<CustomResourceResponse, RunnerError> {
        let outcome = match budget {
            Some(budget) => {
                match tokio::time::timeout(budget, self.handler.handle_request(request)).await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(_) => {
                        // 打ち切ったハンドラーが作りかけたリソースを片付けてからFAILEDを返す
                        self.handler.cleanup_incomplete().await;
                        Err(format!(
                            "Handler did not finish within {} ms",
                            budget.as_millis()
                        ))
                    }
                }
            }
            None => self
                .handler
                .handle_request(request)
                .await
                .map_err(|e| e.to_string()),
        };

        let response = match outcome {
            Ok(handler_response) => {
                info!(
                    request_id = %request.request_id,
                    physical_id = %handler_response.physical_id,
                    "ハンドラー成功"
                );
                CustomResourceResponse::success(request, handler_response)
            }
            Err(reason) => {
                warn!(
                    request_id = %request.request_id,
                    reason = %reason,
                    "ハンドラー失敗、FAILEDを送信"
                );
                CustomResourceResponse::failure(request, reason, fallback_physical_id)
            }
        };

        if let Err(err) = self.sender.send(&request.response_url, &response).await {
            error!(
                request_id = %request.request_id,
                error = %err,
                "レスポンス送信失敗"
            );
            return Err(err.into());
        }

        Ok(response)
    }
}
