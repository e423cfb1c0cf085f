/// カスタムリソースLambda設定
///
/// レスポンス送信の再試行・タイムアウトと、Lambda実行期限に対する余裕時間を管理する。
/// すべての環境変数は省略可能で、未設定時はデフォルト値を使用する。
use std::time::Duration;
use thiserror::Error;

/// レスポンス送信の最大再試行回数（デフォルト）
const DEFAULT_RESPONSE_MAX_RETRIES: u32 = 3;

/// レスポンス送信のリクエストタイムアウト秒数（デフォルト）
const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 30;

/// Lambda実行期限の何ミリ秒前にハンドラーを打ち切るか（デフォルト）
const DEFAULT_DEADLINE_MARGIN_MS: u64 = 5000;

/// 設定のエラー型
#[derive(Debug, Error, PartialEq)]
pub enum HandlerConfigError {
    #[error("環境変数の値が不正です: {name}={value}")]
    InvalidValue { name: String, value: String },
}

/// カスタムリソースLambda設定
///
/// 以下の環境変数から読み込む:
/// - RESPONSE_MAX_RETRIES: ResponseURLへの送信再試行回数
/// - RESPONSE_TIMEOUT_SECS: ResponseURLへの送信タイムアウト（秒）
/// - DEADLINE_MARGIN_MS: 実行期限前にFAILEDを返すための余裕時間（ミリ秒）
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    response_max_retries: u32,
    response_timeout_secs: u64,
    deadline_margin_ms: u64,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            response_max_retries: DEFAULT_RESPONSE_MAX_RETRIES,
            response_timeout_secs: DEFAULT_RESPONSE_TIMEOUT_SECS,
            deadline_margin_ms: DEFAULT_DEADLINE_MARGIN_MS,
        }
    }
}

impl HandlerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// 値が数値として解釈できない場合はエラーを返す
    pub fn from_env() -> Result<Self, HandlerConfigError> {
        Ok(Self {
            response_max_retries: read_env("RESPONSE_MAX_RETRIES", DEFAULT_RESPONSE_MAX_RETRIES)?,
            response_timeout_secs: read_env("RESPONSE_TIMEOUT_SECS", DEFAULT_RESPONSE_TIMEOUT_SECS)?,
            deadline_margin_ms: read_env("DEADLINE_MARGIN_MS", DEFAULT_DEADLINE_MARGIN_MS)?,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(response_max_retries: u32, response_timeout_secs: u64, deadline_margin_ms: u64) -> Self {
        Self {
            response_max_retries,
            response_timeout_secs,
            deadline_margin_ms,
        }
    }

    pub fn response_max_retries(&self) -> u32 {
        self.response_max_retries
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }

    pub fn deadline_margin(&self) -> Duration {
        Duration::from_millis(self.deadline_margin_ms)
    }

    /// 実行期限までの残り時間からハンドラーに与える時間を計算する
    ///
    /// 差し引く余裕時間は残り時間の半分までに抑える。
    /// 残り時間が余裕時間より短くてもハンドラーは0にならない。
    pub fn handler_budget(&self, remaining: Duration) -> Duration {
        remaining.saturating_sub(self.deadline_margin().min(remaining / 2))
    }
}

/// 環境変数を読み込んで数値に変換する（未設定・空文字はデフォルト値）
fn read_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, HandlerConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| HandlerConfigError::InvalidValue {
                    name: name.to_string(),
                    value,
                })
        }
        _ => Ok(default),
    }
}
