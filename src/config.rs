use crate::error::{CuratorError, Result};
use photo_curator_common::DEFAULT_PHOTOS_TO_SELECT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// 実行設定
///
/// `~/.config/location-photo-curator/config.json` から読み込み、CLI引数で上書きする。
/// パイプラインやプロバイダには構築時に明示的に渡す。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Google Places APIキー
    pub api_key: Option<String>,
    /// OllamaのベースURL
    pub ollama_url: String,
    /// ビジョンモデル名
    pub model: String,
    /// 写真ダウンロード時の最大幅(px)
    pub photo_max_width: u32,
    /// ロケーションあたりの最大ダウンロード枚数
    pub max_photos_to_download: usize,
    /// ロケーションあたりの選定枚数
    pub photos_to_select: usize,
    /// Google Places呼び出し前の待機時間(ms)
    pub request_delay_ms: u64,
    /// 検索クエリに付加する地域名
    pub region_hint: String,
    /// 検索の位置バイアス（"緯度,経度"）
    pub location_bias: String,
    /// 検索半径(m)
    pub search_radius_m: u32,
    /// 検索・詳細取得のタイムアウト(秒)
    pub search_timeout_seconds: u64,
    /// 写真ダウンロードのタイムアウト(秒)
    pub download_timeout_seconds: u64,
    /// ビジョン採点のタイムアウト(秒)
    pub vision_timeout_seconds: u64,
    /// モデル一覧取得（事前チェック）のタイムアウト(秒)
    pub health_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            ollama_url: "http://localhost:11434".into(),
            model: "llava:13b".into(),
            photo_max_width: 1200,
            max_photos_to_download: 10,
            photos_to_select: DEFAULT_PHOTOS_TO_SELECT,
            request_delay_ms: 250,
            region_hint: "California".into(),
            location_bias: "37.5,-120".into(),
            search_radius_m: 500_000,
            search_timeout_seconds: 30,
            download_timeout_seconds: 60,
            vision_timeout_seconds: 120,
            health_timeout_seconds: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CuratorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("location-photo-curator")
            .join("config.json"))
    }

    /// APIキーを取得（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Result<String> {
        self.resolve_api_key_from(cli_key, std::env::var(API_KEY_ENV).ok())
    }

    /// 環境変数の値を明示的に受け取る版。空白のみの値は未設定として扱う
    pub fn resolve_api_key_from(&self, cli_key: Option<&str>, env_key: Option<String>) -> Result<String> {
        [cli_key, env_key.as_deref(), self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or(CuratorError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_seconds)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_seconds)
    }

    pub fn vision_timeout(&self) -> Duration {
        Duration::from_secs(self.vision_timeout_seconds)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_seconds)
    }
}
