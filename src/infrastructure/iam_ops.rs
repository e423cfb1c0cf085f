//! IAM操作モジュール
//!
//! カスタムリソースハンドラーで使用するIAMアクセスキー操作を提供する。
//! - アクセスキーの作成
//! - アクセスキーのステータス変更（Active / Inactive）
//! - アクセスキーの削除

use async_trait::async_trait;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types::StatusType;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::AccessKeyStatus;

/// IAM操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IamOpsError {
    /// 対象のユーザーまたはアクセスキーが存在しない
    #[error("IAMエンティティが存在しません: {0}")]
    NoSuchEntity(String),

    /// AWS SDK エラー
    #[error("AWS IAM APIエラー: {0}")]
    AwsSdkError(String),

    /// レスポンスに必須フィールドが含まれていない
    #[error("IAMレスポンスにフィールドがありません: {0}")]
    MissingField(&'static str),
}

/// 作成されたアクセスキー
///
/// シークレットは作成時にしか取得できないため、呼び出し側で即座に返却する。
#[derive(Clone, PartialEq)]
pub struct CreatedAccessKey {
    /// アクセスキーID（物理リソースIDとして使用）
    pub access_key_id: String,
    /// シークレットアクセスキー
    pub secret_access_key: String,
    /// 所有ユーザー名
    pub user_name: String,
}

impl std::fmt::Debug for CreatedAccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedAccessKey")
            .field("access_key_id", &self.access_key_id)
            .field("user_name", &self.user_name)
            .finish_non_exhaustive()
    }
}

/// IAM操作トレイト（テスト用の抽象化）
#[async_trait]
pub trait IamOps: Send + Sync {
    /// ユーザーに新しいアクセスキーを作成する
    ///
    /// # 引数
    /// * `user_name` - IAMユーザー名
    ///
    /// # 戻り値
    /// * `Ok(CreatedAccessKey)` - 作成されたキー（シークレット含む）
    /// * `Err(IamOpsError)` - エラー
    async fn create_access_key(&self, user_name: &str) -> Result<CreatedAccessKey, IamOpsError>;

    /// アクセスキーのステータスを変更する
    async fn update_access_key_status(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: AccessKeyStatus,
    ) -> Result<(), IamOpsError>;

    /// アクセスキーを削除する
    ///
    /// キーが存在しない場合は`Err(IamOpsError::NoSuchEntity)`を返す。
    /// べき等性の扱いは呼び出し側で決める。
    async fn delete_access_key(&self, user_name: &str, access_key_id: &str)
    -> Result<(), IamOpsError>;
}

/// 実際のAWS IAM SDKを使用したIAM操作実装
#[derive(Debug, Clone)]
pub struct AwsIamOps {
    client: IamClient,
}

impl AwsIamOps {
    /// 新しいAwsIamOpsを作成
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = IamClient::new(&config);
        Self::new(client)
    }
}

fn to_status_type(status: AccessKeyStatus) -> StatusType {
    match status {
        AccessKeyStatus::Active => StatusType::Active,
        AccessKeyStatus::Inactive => StatusType::Inactive,
    }
}

#[async_trait]
impl IamOps for AwsIamOps {
    async fn create_access_key(&self, user_name: &str) -> Result<CreatedAccessKey, IamOpsError> {
        info!(user_name = %user_name, "アクセスキー作成開始");

        let output = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .map_err(|err| {
                warn!(user_name = %user_name, error = %DisplayErrorContext(&err), "CreateAccessKeyエラー");
                let no_such_entity = err
                    .as_service_error()
                    .map(|e| e.is_no_such_entity_exception())
                    .unwrap_or(false);
                if no_such_entity {
                    IamOpsError::NoSuchEntity(format!("user {}", user_name))
                } else {
                    IamOpsError::AwsSdkError(DisplayErrorContext(&err).to_string())
                }
            })?;

        let access_key = output
            .access_key()
            .ok_or(IamOpsError::MissingField("AccessKey"))?;

        let created = CreatedAccessKey {
            access_key_id: access_key.access_key_id().to_string(),
            secret_access_key: access_key.secret_access_key().to_string(),
            user_name: user_name.to_string(),
        };

        info!(
            user_name = %user_name,
            access_key_id = %created.access_key_id,
            "アクセスキー作成完了"
        );

        Ok(created)
    }

    async fn update_access_key_status(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: AccessKeyStatus,
    ) -> Result<(), IamOpsError> {
        info!(
            user_name = %user_name,
            access_key_id = %access_key_id,
            status = %status,
            "アクセスキーのステータス変更"
        );

        self.client
            .update_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .status(to_status_type(status))
            .send()
            .await
            .map_err(|err| {
                warn!(access_key_id = %access_key_id, error = %DisplayErrorContext(&err), "UpdateAccessKeyエラー");
                let no_such_entity = err
                    .as_service_error()
                    .map(|e| e.is_no_such_entity_exception())
                    .unwrap_or(false);
                if no_such_entity {
                    IamOpsError::NoSuchEntity(format!("access key {}", access_key_id))
                } else {
                    IamOpsError::AwsSdkError(DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(())
    }

    async fn delete_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
    ) -> Result<(), IamOpsError> {
        info!(
            user_name = %user_name,
            access_key_id = %access_key_id,
            "アクセスキー削除開始"
        );

        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|err| {
                let no_such_entity = err
                    .as_service_error()
                    .map(|e| e.is_no_such_entity_exception())
                    .unwrap_or(false);
                if no_such_entity {
                    IamOpsError::NoSuchEntity(format!("access key {}", access_key_id))
                } else {
                    warn!(access_key_id = %access_key_id, error = %DisplayErrorContext(&err), "DeleteAccessKeyエラー");
                    IamOpsError::AwsSdkError(DisplayErrorContext(&err).to_string())
                }
            })?;

        info!(access_key_id = %access_key_id, "アクセスキー削除完了");
        Ok(())
    }
}
