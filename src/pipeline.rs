//! ロケーション単位の処理パイプライン
//!
//! ## 処理フロー（各段階で終了しうる）
//! 1. 検索: ロケーション名 → place_id（失敗 → not_found）
//! 2. 写真一覧: place_id → 写真参照（0件・失敗 → no_photos）
//! 3. ダウンロード: 1枚ずつ取得、失敗はスキップ（0枚 → no_photos）
//! 4. AI解析: 1枚ずつ採点、失敗はスキップ（0件 → analysis_failed）
//! 5. 選定・コピー・レポート出力（→ success）
//!
//! どの段階の失敗もLocationResultの状態として返し、呼び出し元には伝播させない。

use crate::config::Config;
use crate::layout::{curated_file_name, reset_dir, sanitize_folder_name, staging_file_name, OutputLayout};
use crate::providers::{PhotoFetch, PhotoReference, PlaceMatch, PlaceSearch, VisionScorer};
use crate::report::LocationReport;
use photo_curator_common::{select_diverse_photos, LocationResult, PhotoAnalysis};
use std::path::PathBuf;
use std::time::Duration;

/// パイプラインの動作パラメータ
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub max_photos_to_download: usize,
    pub photos_to_select: usize,
    pub photo_max_width: u32,
    /// Google Places呼び出し前の固定待機
    pub request_delay: Duration,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_photos_to_download: config.max_photos_to_download,
            photos_to_select: config.photos_to_select,
            photo_max_width: config.photo_max_width,
            request_delay: config.request_delay(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// ダウンロード済みの写真
#[derive(Debug, Clone)]
struct DownloadedPhoto {
    filename: String,
    path: PathBuf,
}

/// 1ロケーション分の処理を実行する
pub struct LocationPipeline<'a> {
    places: &'a dyn PlaceSearch,
    photos: &'a dyn PhotoFetch,
    scorer: &'a dyn VisionScorer,
    layout: &'a OutputLayout,
    settings: PipelineSettings,
}

impl<'a> LocationPipeline<'a> {
    pub fn new(
        places: &'a dyn PlaceSearch,
        photos: &'a dyn PhotoFetch,
        scorer: &'a dyn VisionScorer,
        layout: &'a OutputLayout,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            places,
            photos,
            scorer,
            layout,
            settings,
        }
    }

    /// ロケーション1件を最後まで処理する
    pub async fn process_location(&self, location_name: &str) -> LocationResult {
        let folder_name = sanitize_folder_name(location_name);

        println!("\n{}", "─".repeat(60));
        println!("📍 {}", location_name);
        println!("{}", "─".repeat(60));

        // 1. 検索
        let place = match self.search(location_name).await {
            Some(place) => place,
            None => {
                println!("  🔍 Google Places: 見つかりません");
                return LocationResult::not_found(location_name);
            }
        };
        println!("  🔍 Google Places: {}", place.name);

        // 2. 写真一覧
        let references = self.list_photos(&place).await;
        if references.is_empty() {
            println!("  📷 写真がありません");
            return LocationResult::no_photos(location_name, &place.name, &place.address);
        }

        // 3. ダウンロード
        println!("  📷 {}枚をダウンロード中...", references.len());
        let downloaded = self.download_all(&references, &folder_name).await;
        println!("  ✔ {}枚ダウンロード", downloaded.len());
        if downloaded.is_empty() {
            return LocationResult::no_photos(location_name, &place.name, &place.address);
        }

        // 4. AI解析
        println!("  🤖 AI解析中...");
        let analyses = self.analyze_all(&downloaded, location_name).await;
        if analyses.is_empty() {
            println!("  ⚠ 全ての解析に失敗しました");
            return LocationResult::analysis_failed(
                location_name,
                &place.name,
                &place.address,
                downloaded.len(),
            );
        }

        // 5. 選定・コピー・レポート
        let selected_files = self.curate(location_name, &place, &folder_name, &analyses);

        LocationResult::success(
            location_name,
            &place.name,
            &place.address,
            downloaded.len(),
            analyses.len(),
            selected_files,
        )
    }

    async fn search(&self, location_name: &str) -> Option<PlaceMatch> {
        tokio::time::sleep(self.settings.request_delay).await;
        match self.places.search(location_name).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(location = location_name, error = %e, "place search failed");
                None
            }
        }
    }

    async fn list_photos(&self, place: &PlaceMatch) -> Vec<PhotoReference> {
        tokio::time::sleep(self.settings.request_delay).await;
        match self.photos.list_photos(&place.place_id).await {
            Ok(mut references) => {
                references.truncate(self.settings.max_photos_to_download);
                references
            }
            Err(e) => {
                tracing::warn!(place_id = %place.place_id, error = %e, "photo listing failed");
                Vec::new()
            }
        }
    }

    /// 1枚ずつダウンロード。失敗した写真はスキップ
    async fn download_all(&self, references: &[PhotoReference], folder_name: &str) -> Vec<DownloadedPhoto> {
        let staging = self.layout.staging_folder(folder_name);
        if let Err(e) = reset_dir(&staging) {
            tracing::warn!(path = %staging.display(), error = %e, "cannot create download folder");
            return Vec::new();
        }

        let mut downloaded = Vec::new();

        for (i, reference) in references.iter().enumerate() {
            let filename = staging_file_name(i + 1);
            let path = staging.join(&filename);

            tokio::time::sleep(self.settings.request_delay).await;
            let bytes = match self.photos.fetch(reference, self.settings.photo_max_width).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!(filename = %filename, error = %e, "download skipped");
                    continue;
                }
            };

            if let Err(e) = std::fs::write(&path, &bytes) {
                tracing::warn!(path = %path.display(), error = %e, "cannot write photo");
                continue;
            }

            downloaded.push(DownloadedPhoto { filename, path });
        }

        downloaded
    }

    /// 1枚ずつ採点。失敗した写真はスキップ
    async fn analyze_all(&self, downloaded: &[DownloadedPhoto], location_name: &str) -> Vec<PhotoAnalysis> {
        let total = downloaded.len();
        let mut analyses = Vec::new();

        for (i, photo) in downloaded.iter().enumerate() {
            let image = match std::fs::read(&photo.path) {
                Ok(image) => image,
                Err(e) => {
                    println!("     [{}/{}] {}... 失敗", i + 1, total, photo.filename);
                    tracing::warn!(path = %photo.path.display(), error = %e, "cannot read photo");
                    continue;
                }
            };

            match self.scorer.score(&image, &photo.filename, location_name).await {
                Ok(analysis) => {
                    println!(
                        "     [{}/{}] {}... score={}, {}",
                        i + 1,
                        total,
                        photo.filename,
                        analysis.quality_score,
                        analysis.category
                    );
                    analyses.push(analysis);
                }
                Err(e) => {
                    println!("     [{}/{}] {}... 失敗", i + 1, total, photo.filename);
                    tracing::debug!(filename = %photo.filename, error = %e, "analysis skipped");
                }
            }
        }

        analyses
    }

    /// 選定した写真をコピーし、レポートを書き出す。コピーできたファイル名を返す
    ///
    /// キュレーション先は毎回空にしてから書き込む。レポートの選定結果もコピーできた分のみ
    fn curate(
        &self,
        location_name: &str,
        place: &PlaceMatch,
        folder_name: &str,
        analyses: &[PhotoAnalysis],
    ) -> Vec<String> {
        let selected = select_diverse_photos(analyses, self.settings.photos_to_select);
        println!("  ✅ {}枚を選定:", selected.len());

        let staging = self.layout.staging_folder(folder_name);
        let curated = self.layout.curated_folder(folder_name);
        if let Err(e) = reset_dir(&curated) {
            tracing::warn!(path = %curated.display(), error = %e, "cannot create curated folder");
        }

        let mut selected_files = Vec::with_capacity(selected.len());
        let mut copied = Vec::with_capacity(selected.len());

        for (i, photo) in selected.iter().enumerate() {
            let rank = i + 1;
            let file_name = curated_file_name(rank, &photo.category);
            let src = staging.join(&photo.filename);
            let dst = curated.join(&file_name);

            if let Err(e) = std::fs::copy(&src, &dst) {
                tracing::warn!(src = %src.display(), dst = %dst.display(), error = %e, "cannot copy selected photo");
                continue;
            }

            println!("     {}. {} (score: {}/10)", rank, photo.category, photo.quality_score);
            println!("        {}", preview(&photo.description, 60));
            selected_files.push(file_name);
            copied.push(*photo);
        }

        let report = LocationReport::new(location_name, &place.name, &place.address, &copied, analyses);
        let report_path = self.layout.report_path(folder_name);
        if let Err(e) = report.save(&report_path) {
            tracing::warn!(path = %report_path.display(), error = %e, "cannot write location report");
        }

        selected_files
    }
}

/// 説明文の先頭を表示用に切り出す
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text() {
        assert_eq!(preview("Redwoods", 60), "Redwoods");
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            photos_to_select: 5,
            request_delay_ms: 0,
            ..Default::default()
        };
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.photos_to_select, 5);
        assert_eq!(settings.max_photos_to_download, 10);
        assert_eq!(settings.request_delay, Duration::ZERO);
    }
}
