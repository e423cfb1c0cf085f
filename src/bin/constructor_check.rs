/// ハンドラー構築の手動確認用バイナリ
///
/// 引数なしでハンドラーを構築し、合成したCreateリクエストで1回だけ呼び出して
/// 結果を標準出力に表示する。Lambdaは引数なしで構築できることが前提のため、
/// その確認に使う。
///
/// 失敗はそのまま`main`から返し、非0で終了する（再試行しない）。
/// `--user-name`を指定すると実際のIAMユーザーにキーが作成されるので注意。
use clap::Parser;
use iam_access_key::application::{AccessKeyHandler, CustomResourceHandler};
use iam_access_key::domain::{CloudFormationCustomResourceRequest, CloudFormationRequestType};
use iam_access_key::infrastructure::init_cli_logging;
use lambda_runtime::Error;
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(about = "Invoke the access key handler once with a synthetic Create request")]
struct Args {
    /// ResourcePropertiesのUserName（省略時はResourceProperties自体を送らない）
    #[arg(long)]
    user_name: Option<String>,

    /// ResourcePropertiesのStatus（Active / Inactive）
    #[arg(long)]
    status: Option<String>,
}

impl Args {
    /// 引数からResourcePropertiesを組み立てる
    fn resource_properties(&self) -> Option<Map<String, Value>> {
        if self.user_name.is_none() && self.status.is_none() {
            return None;
        }

        let mut properties = Map::new();
        if let Some(user_name) = &self.user_name {
            properties.insert("UserName".to_string(), Value::String(user_name.clone()));
        }
        if let Some(status) = &self.status {
            properties.insert("Status".to_string(), Value::String(status.clone()));
        }
        Some(properties)
    }
}

fn synthetic_create_request(properties: Option<Map<String, Value>>) -> CloudFormationCustomResourceRequest {
    CloudFormationCustomResourceRequest::new(
        CloudFormationRequestType::Create,
        "",
        "",
        "",
        "",
        "",
        None,
        properties,
        None,
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    // 標準出力はレスポンス表示専用なのでログは標準エラーへ
    init_cli_logging();

    let handler = AccessKeyHandler::from_env().await;

    let request = synthetic_create_request(args.resource_properties());
    let response = handler.handle_request(&request).await?;

    println!("{}", response);
    Ok(())
}
