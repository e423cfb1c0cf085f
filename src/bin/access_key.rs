/// IAMアクセスキー カスタムリソースLambda関数
///
/// CloudFormationから`Custom::IamAccessKey`のCreate/Update/Deleteリクエストを受け取り、
/// IAMアクセスキーを操作した結果をResponseURLへ送信する。
///
/// ハンドラーの失敗はFAILEDとして送信済みのため、Lambdaとしては成功を返す。
/// Lambdaエラーを返すのはレスポンスを送信できなかった場合のみ。
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use iam_access_key::application::{AccessKeyHandler, CustomResourceRunner};
use iam_access_key::domain::CloudFormationCustomResourceRequest;
use iam_access_key::infrastructure::{
    AwsIamOps, HandlerConfig, HttpResponseSender, init_logging,
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::{error, info};

type Runner = CustomResourceRunner<AccessKeyHandler<AwsIamOps>, HttpResponseSender>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定を環境変数から読み込み（コールドスタート時に1回）
    let config = HandlerConfig::from_env().map_err(|err| {
        error!(error = %err, "設定読み込み失敗");
        err
    })?;
    info!(
        response_max_retries = config.response_max_retries(),
        response_timeout_secs = config.response_timeout().as_secs(),
        deadline_margin_ms = duration_millis(config.deadline_margin()),
        "設定を読み込み"
    );

    let sender = HttpResponseSender::from_config(&config)?;
    let runner = CustomResourceRunner::new(AccessKeyHandler::from_env().await, sender);

    let runner = &runner;
    let config = &config;
    lambda_runtime::run(service_fn(move |event| async move {
        handler(runner, config, event).await
    }))
    .await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. 実行期限から余裕時間を引いてハンドラーの持ち時間を決める
/// 2. ランナーでリクエストを処理し、レスポンスを送信
/// 3. 送信結果をログ出力
#[tracing::instrument(
    name = "custom_resource",
    skip_all,
    fields(
        request_type = %event.payload.request_type,
        request_id = %event.payload.request_id,
        logical_resource_id = %event.payload.logical_resource_id,
    )
)]
async fn handler(
    runner: &Runner,
    config: &HandlerConfig,
    event: LambdaEvent<CloudFormationCustomResourceRequest>,
) -> Result<(), Error> {
    let request = event.payload;

    let budget = config.handler_budget(remaining_time(event.context.deadline));
    info!(
        stack_id = %request.stack_id,
        resource_type = %request.resource_type,
        budget_ms = duration_millis(budget),
        "カスタムリソースリクエストを受信"
    );

    // 作成前に失敗した場合の物理ID（Deleteで識別できるようにアクセスキー形式にしない）
    let fallback_physical_id = format!("{}-{}", request.logical_resource_id, request.request_id);

    match runner.run(&request, &fallback_physical_id, Some(budget)).await {
        Ok(response) => {
            info!(
                status = ?response.status,
                physical_resource_id = %response.physical_resource_id,
                "レスポンス送信完了"
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "レスポンス送信失敗");
            Err(err.into())
        }
    }
}

/// 実行期限（UNIXエポックからのミリ秒）までの残り時間
fn remaining_time(deadline_ms: u64) -> Duration {
    let now_ms = duration_millis(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default(),
    );
    Duration::from_millis(deadline_ms.saturating_sub(now_ms))
}

/// ミリ秒をu64に変換する（収まらない場合はu64::MAX）
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
