//! 外部サービスとの境界
//!
//! パイプラインは以下のトレイト越しにのみ外部サービスを呼び出す。
//! テストでは偽の実装に差し替える。

pub mod google_places;
pub mod ollama;

pub use google_places::GooglePlacesClient;
pub use ollama::OllamaVisionScorer;

use crate::error::Result;
use async_trait::async_trait;
use photo_curator_common::PhotoAnalysis;

/// 検索で解決された場所
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceMatch {
    pub place_id: String,
    /// 解決された名称（入力名と異なることがある）
    pub name: String,
    pub address: String,
}

/// 写真の不透明な参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoReference(pub String);

/// ロケーション名から場所を検索する
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// 最初（最適）の一致を返す。一致なしは `Ok(None)`
    async fn search(&self, name: &str) -> Result<Option<PlaceMatch>>;
}

/// 場所の写真を取得する
#[async_trait]
pub trait PhotoFetch: Send + Sync {
    /// 写真参照の一覧（プロバイダの返却順）
    async fn list_photos(&self, place_id: &str) -> Result<Vec<PhotoReference>>;

    /// 写真のバイナリを取得
    async fn fetch(&self, reference: &PhotoReference, max_width: u32) -> Result<Vec<u8>>;
}

/// 写真を採点する
#[async_trait]
pub trait VisionScorer: Send + Sync {
    /// 画像とロケーション名から解析結果を生成する。
    /// 構造化できない応答はエラーとして返す。
    async fn score(&self, image: &[u8], filename: &str, context_label: &str) -> Result<PhotoAnalysis>;

    /// 事前チェック: バックエンドに到達でき、モデルが利用可能か
    async fn check_available(&self) -> Result<()>;
}
