//! JSONレポート出力
//!
//! - ロケーションごとの解析レポート（AIの判断理由を含む）
//! - バッチ全体のサマリー

use crate::error::Result;
use photo_curator_common::{sort_by_quality, BatchSummary, PhotoAnalysis};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// ロケーションごとの解析レポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReport {
    /// 入力されたロケーション名
    pub location: String,
    pub google_name: String,
    pub google_address: String,
    /// 選定された解析結果（ランク順）
    pub selected: Vec<PhotoAnalysis>,
    /// 全解析結果（品質スコア降順）
    pub all_analyses: Vec<PhotoAnalysis>,
}

impl LocationReport {
    pub fn new(
        location: &str,
        google_name: &str,
        google_address: &str,
        selected: &[&PhotoAnalysis],
        analyses: &[PhotoAnalysis],
    ) -> Self {
        Self {
            location: location.to_string(),
            google_name: google_name.to_string(),
            google_address: google_address.to_string(),
            selected: selected.iter().map(|a| (*a).clone()).collect(),
            all_analyses: sort_by_quality(analyses).into_iter().cloned().collect(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/// サマリーを保存
pub fn save_summary(summary: &BatchSummary, path: &Path) -> Result<()> {
    write_json(path, summary)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
