//! 事前チェック
//!
//! バッチ開始前に一度だけ実行し、失敗したら処理全体を中止する。

use crate::config::Config;
use crate::error::Result;
use crate::providers::VisionScorer;

/// APIキーとビジョンモデルの利用可否を確認し、APIキーを返す
pub async fn run_preflight(
    config: &Config,
    cli_api_key: Option<&str>,
    scorer: &dyn VisionScorer,
) -> Result<String> {
    let api_key = config.resolve_api_key(cli_api_key)?;
    scorer.check_available().await?;
    tracing::debug!(model = %config.model, "preflight passed");
    Ok(api_key)
}
