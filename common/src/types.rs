//! 解析結果の型定義
//!
//! パイプラインとCLIで共有される型:
//! - PhotoAnalysis: ビジョンモデルによる写真1枚の解析結果
//! - LocationResult: ロケーション1件の処理結果
//! - BatchSummary: バッチ全体の集計

use serde::{Deserialize, Serialize};

/// 写真1枚の解析結果（生成後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    /// ダウンロード済み画像のファイル名（例: photo_03.jpg）
    pub filename: String,
    /// 品質スコア 1-10
    pub quality_score: u8,
    /// カテゴリ（語彙は推奨のみ、未知の値もそのまま保持）
    pub category: String,
    pub description: String,
    /// 場所そのものを写しているか
    pub represents_place: bool,
    pub reasoning: String,
}

/// ロケーション処理の終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Success,
    NotFound,
    NoPhotos,
    AnalysisFailed,
}

impl LocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStatus::Success => "success",
            LocationStatus::NotFound => "not_found",
            LocationStatus::NoPhotos => "no_photos",
            LocationStatus::AnalysisFailed => "analysis_failed",
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ロケーション1件の処理結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationResult {
    /// 入力されたロケーション名
    pub name: String,
    /// Google Placesで解決された名称
    pub google_name: String,
    pub google_address: String,
    pub photos_downloaded: usize,
    pub photos_analyzed: usize,
    /// キュレーション後のファイル名（ランク順）
    pub photos_selected: Vec<String>,
    pub status: LocationStatus,
}

impl LocationResult {
    /// 検索で見つからなかった場合
    pub fn not_found(name: &str) -> Self {
        Self {
            name: name.to_string(),
            google_name: String::new(),
            google_address: String::new(),
            photos_downloaded: 0,
            photos_analyzed: 0,
            photos_selected: Vec::new(),
            status: LocationStatus::NotFound,
        }
    }

    /// 場所は解決できたが写真が1枚も得られなかった場合
    pub fn no_photos(name: &str, google_name: &str, google_address: &str) -> Self {
        Self {
            name: name.to_string(),
            google_name: google_name.to_string(),
            google_address: google_address.to_string(),
            photos_downloaded: 0,
            photos_analyzed: 0,
            photos_selected: Vec::new(),
            status: LocationStatus::NoPhotos,
        }
    }

    /// ダウンロードはできたが解析が全滅した場合
    pub fn analysis_failed(
        name: &str,
        google_name: &str,
        google_address: &str,
        photos_downloaded: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            google_name: google_name.to_string(),
            google_address: google_address.to_string(),
            photos_downloaded,
            photos_analyzed: 0,
            photos_selected: Vec::new(),
            status: LocationStatus::AnalysisFailed,
        }
    }

    pub fn success(
        name: &str,
        google_name: &str,
        google_address: &str,
        photos_downloaded: usize,
        photos_analyzed: usize,
        photos_selected: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            google_name: google_name.to_string(),
            google_address: google_address.to_string(),
            photos_downloaded,
            photos_analyzed,
            photos_selected,
            status: LocationStatus::Success,
        }
    }
}

/// バッチ全体の集計（reports/summary.json）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_locations: usize,
    pub success: usize,
    pub not_found: usize,
    pub no_photos: usize,
    pub analysis_failed: usize,
    pub total_downloaded: usize,
    pub total_curated: usize,
    /// 開始時刻（RFC 3339）
    #[serde(default)]
    pub started_at: String,
    /// 終了時刻（RFC 3339）
    #[serde(default)]
    pub finished_at: String,
    pub results: Vec<LocationResult>,
}

impl BatchSummary {
    /// 処理結果の一覧から集計を作成
    pub fn from_results(results: Vec<LocationResult>) -> Self {
        let count = |status: LocationStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            total_locations: results.len(),
            success: count(LocationStatus::Success),
            not_found: count(LocationStatus::NotFound),
            no_photos: count(LocationStatus::NoPhotos),
            analysis_failed: count(LocationStatus::AnalysisFailed),
            total_downloaded: results.iter().map(|r| r.photos_downloaded).sum(),
            total_curated: results.iter().map(|r| r.photos_selected.len()).sum(),
            started_at: String::new(),
            finished_at: String::new(),
            results,
        }
    }

    /// 開始・終了時刻を設定
    pub fn with_timestamps(mut self, started_at: String, finished_at: String) -> Self {
        self.started_at = started_at;
        self.finished_at = finished_at;
        self
    }

    /// Google上で見つからなかったロケーション名（手動確認用）
    pub fn not_found_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.status == LocationStatus::NotFound)
            .map(|r| r.name.as_str())
            .collect()
    }
}
