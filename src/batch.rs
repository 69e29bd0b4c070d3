//! バッチ処理
//!
//! ロケーションを1件ずつ順番にパイプラインへ流し、結果を集計する。

use crate::error::Result;
use crate::layout::OutputLayout;
use crate::pipeline::LocationPipeline;
use crate::report::save_summary;
use photo_curator_common::{BatchSummary, LocationResult};

pub struct BatchRunner<'a> {
    pipeline: LocationPipeline<'a>,
    layout: &'a OutputLayout,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: LocationPipeline<'a>, layout: &'a OutputLayout) -> Self {
        Self { pipeline, layout }
    }

    /// 全ロケーションを処理して集計する（サマリーの保存は行わない）
    pub async fn run(&self, locations: &[String]) -> BatchSummary {
        let started_at = chrono::Local::now().to_rfc3339();
        let total = locations.len();
        let mut results: Vec<LocationResult> = Vec::with_capacity(total);

        for (i, location) in locations.iter().enumerate() {
            print!("\n[{}/{}]", i + 1, total);
            let result = self.pipeline.process_location(location).await;
            tracing::debug!(location = %location, status = %result.status, "location finished");
            results.push(result);
        }

        let finished_at = chrono::Local::now().to_rfc3339();
        BatchSummary::from_results(results).with_timestamps(started_at, finished_at)
    }

    /// 全ロケーションを処理し、reports/summary.json に保存する
    pub async fn run_and_save(&self, locations: &[String]) -> Result<BatchSummary> {
        let summary = self.run(locations).await;
        save_summary(&summary, &self.layout.summary_path())?;
        Ok(summary)
    }
}

/// サマリーをコンソールに表示
pub fn print_summary(summary: &BatchSummary, layout: &OutputLayout) {
    println!("\n\n{}", "═".repeat(60));
    println!("SUMMARY");
    println!("{}", "═".repeat(60));
    println!("  ✅ 成功:         {}", summary.success);
    println!("  ❌ 見つからない: {}", summary.not_found);
    println!("  📷 写真なし:     {}", summary.no_photos);
    println!("  ⚠️  AI解析失敗:   {}", summary.analysis_failed);
    println!("  ─────────────────────");
    println!("  📥 ダウンロード: {}枚", summary.total_downloaded);
    println!("  🏆 キュレーション: {}枚", summary.total_curated);
    println!("\n  出力先: {}", layout.root().display());
    println!("  └── curated/     ← 選定された写真");

    let not_found = summary.not_found_names();
    if !not_found.is_empty() {
        println!("\n  Googleで見つからなかったロケーション:");
        for name in not_found {
            println!("    • {}", name);
        }
    }
}
