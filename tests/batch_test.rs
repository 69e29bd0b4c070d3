//! バッチ処理・事前チェックの統合テスト

mod common;

use common::{FakePhotos, FakePlaces, FakeScorer};
use location_photo_curator::batch::BatchRunner;
use location_photo_curator::config::Config;
use location_photo_curator::error::CuratorError;
use location_photo_curator::layout::OutputLayout;
use location_photo_curator::pipeline::{LocationPipeline, PipelineSettings};
use location_photo_curator::preflight::run_preflight;
use photo_curator_common::{BatchSummary, LocationStatus};
use std::time::Duration;
use tempfile::tempdir;

fn settings() -> PipelineSettings {
    PipelineSettings {
        request_delay: Duration::ZERO,
        ..Default::default()
    }
}

fn locations(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// 成功・見つからない・写真なし・解析失敗が混在するバッチ
fn mixed_fakes() -> (FakePlaces, FakePhotos, FakeScorer) {
    let places = FakePlaces::default()
        .with_place("Muir Woods", "muir")
        .with_place("Empty Lot", "lot")
        .with_place("Joshua Tree", "jt");
    let photos = FakePhotos::default()
        .with_photos("muir", 3)
        .with_photos("lot", 0)
        .with_photos("jt", 2);
    let scorer = FakeScorer::default()
        .with_verdict("Muir Woods", "photo_01.jpg", 9, "exterior", true)
        .with_verdict("Muir Woods", "photo_02.jpg", 7, "trail", true)
        .with_verdict("Muir Woods", "photo_03.jpg", 8, "scenic_view", true);
    (places, photos, scorer)
}

#[tokio::test]
async fn test_batch_summary_counts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let layout = OutputLayout::new(dir.path());
    layout.create_dirs().unwrap();
    let (places, photos, scorer) = mixed_fakes();

    let pipeline = LocationPipeline::new(&places, &photos, &scorer, &layout, settings());
    let runner = BatchRunner::new(pipeline, &layout);
    let names = locations(&["Muir Woods", "Atlantis", "Empty Lot", "Joshua Tree", "El Dorado"]);
    let summary = runner.run(&names).await;

    assert_eq!(summary.total_locations, 5);
    assert_eq!(summary.success, 1);
    assert_eq!(summary.not_found, 2);
    assert_eq!(summary.no_photos, 1);
    assert_eq!(summary.analysis_failed, 1);
    assert_eq!(
        summary.success + summary.not_found + summary.no_photos + summary.analysis_failed,
        names.len()
    );
    assert_eq!(summary.total_downloaded, 5);
    assert_eq!(summary.total_curated, 3);
    assert_eq!(summary.not_found_names(), vec!["Atlantis", "El Dorado"]);
    assert!(!summary.started_at.is_empty());
    assert!(!summary.finished_at.is_empty());

    // 入力順で結果が並ぶ
    let statuses: Vec<LocationStatus> = summary.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            LocationStatus::Success,
            LocationStatus::NotFound,
            LocationStatus::NoPhotos,
            LocationStatus::AnalysisFailed,
            LocationStatus::NotFound,
        ]
    );

    // 選定は成功時のみ
    for result in &summary.results {
        assert!(result.photos_selected.len() <= 3);
        if result.status != LocationStatus::Success {
            assert!(result.photos_selected.is_empty());
        }
    }
}

#[tokio::test]
async fn test_run_and_save_writes_summary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let layout = OutputLayout::new(dir.path());
    layout.create_dirs().unwrap();
    let (places, photos, scorer) = mixed_fakes();

    let pipeline = LocationPipeline::new(&places, &photos, &scorer, &layout, settings());
    let runner = BatchRunner::new(pipeline, &layout);
    runner
        .run_and_save(&locations(&["Muir Woods", "Atlantis"]))
        .await
        .expect("サマリー保存失敗");

    let content = std::fs::read_to_string(layout.summary_path()).unwrap();
    let summary: BatchSummary = serde_json::from_str(&content).unwrap();
    assert_eq!(summary.total_locations, 2);
    assert_eq!(summary.success, 1);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.results[0].photos_selected.len(), 3);
    assert!(content.contains("\"status\": \"not_found\""));
}

#[tokio::test]
async fn test_empty_batch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let layout = OutputLayout::new(dir.path());
    let (places, photos, scorer) = mixed_fakes();

    let pipeline = LocationPipeline::new(&places, &photos, &scorer, &layout, settings());
    let runner = BatchRunner::new(pipeline, &layout);
    let summary = runner.run(&[]).await;

    assert_eq!(summary.total_locations, 0);
    assert!(summary.results.is_empty());
}

#[tokio::test]
async fn test_preflight_fails_when_model_unavailable() {
    let config = Config::default();
    let scorer = FakeScorer::default().unavailable();

    let result = run_preflight(&config, Some("test-key"), &scorer).await;
    assert!(matches!(result, Err(CuratorError::ModelUnavailable(_))));
}

#[tokio::test]
async fn test_preflight_returns_cli_api_key() {
    let config = Config::default();
    let scorer = FakeScorer::default();

    let api_key = run_preflight(&config, Some("test-key"), &scorer).await.unwrap();
    assert_eq!(api_key, "test-key");
}

/// APIキーがどこにも無い場合は中止（モデル確認より先に失敗する）
#[tokio::test]
async fn test_preflight_fails_without_api_key() {
    std::env::remove_var("GOOGLE_PLACES_API_KEY");
    let config = Config::default();
    let scorer = FakeScorer::default().unavailable();

    let result = run_preflight(&config, None, &scorer).await;
    assert!(matches!(result, Err(CuratorError::MissingApiKey)));

    let result = run_preflight(&config, Some("  "), &scorer).await;
    assert!(matches!(result, Err(CuratorError::MissingApiKey)));
}

/// 設定ファイルのAPIキーでも事前チェックを通過する
#[tokio::test]
async fn test_preflight_accepts_config_api_key() {
    let config = Config {
        api_key: Some("file-key".into()),
        ..Default::default()
    };
    let scorer = FakeScorer::default();

    let api_key = run_preflight(&config, Some("cli-key"), &scorer).await.unwrap();
    assert_eq!(api_key, "cli-key");
    assert!(run_preflight(&config, None, &scorer).await.is_ok());
}
