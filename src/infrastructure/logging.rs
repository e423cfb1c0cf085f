/// ログ基盤モジュール
///
/// CloudWatch Logs向けの構造化ログ設定を提供する。
/// tracingクレートを使用し、JSON形式で出力する。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// RUST_LOG未設定時のフィルター
///
/// AWS SDK内部のログは認証情報の解決過程まで出力するためwarnに抑える。
const DEFAULT_FILTER: &str = "info,aws_config=warn,aws_smithy_runtime=warn";

/// 手動実行バイナリでRUST_LOG未設定時のフィルター
const CLI_DEFAULT_FILTER: &str = "warn";

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`があればそれを、なければ`DEFAULT_FILTER`を使用する。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use iam_access_key::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!(request_id = "req-1", "カスタムリソースリクエスト受信");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // JSON形式のログレイヤー（Lambda/CloudWatch向け）
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true);

        // 他で初期化済みの場合（constructor_check等）は何もしない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// 手動実行するバイナリ向けのログサブスクライバーを初期化する
///
/// 標準出力は結果表示に使うため、ログは人間が読める形式で標準エラーへ出力する。
/// `RUST_LOG`がなければ`CLI_DEFAULT_FILTER`を使用する。
pub fn init_cli_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(CLI_DEFAULT_FILTER));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_default_filter_parses() {
        // 不正なディレクティブがあるとEnvFilter::try_newはエラーになる
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(CLI_DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_init_cli_logging_idempotent() {
        // 他のテストが先にグローバルサブスクライバーを設定していても失敗しない
        init_test_logging();
        init_cli_logging();
        init_cli_logging();
        tracing::warn!("標準エラーへの出力");
    }

    /// リクエスト単位のspan内でログが出力できることを確認
    #[test]
    fn test_request_span_context() {
        init_test_logging();

        let span = tracing::info_span!(
            "custom_resource",
            request_type = "Create",
            request_id = "req-456",
            logical_resource_id = "DeployerKey"
        );
        let _guard = span.enter();

        tracing::info!(user_name = "deployer", "アクセスキー作成開始");
        tracing::warn!(access_key_id = "AKIAMOCK00000001", "アクセスキーが既に存在しない");
    }

    #[test]
    fn test_json_logging_configuration() {
        let env_filter = EnvFilter::new(DEFAULT_FILTER);
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .flatten_event(true);

        let _subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer);
    }
}
