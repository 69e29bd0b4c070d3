//! 出力フォルダ構成
//!
//! ```text
//! output/
//! ├── curated/              # 選定された写真
//! │   └── Muir_Woods/01_exterior.jpg
//! ├── all_downloads/        # ダウンロードした全写真（手動確認用）
//! │   └── Muir_Woods/photo_01.jpg
//! └── reports/
//!     ├── summary.json
//!     └── Muir_Woods_analysis.json
//! ```

use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// フォルダ名の最大文字数
const MAX_FOLDER_NAME_CHARS: usize = 80;

/// 出力ルート配下のパスを管理
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// curated / all_downloads / reports を作成
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [self.curated_dir(), self.downloads_dir(), self.reports_dir()] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn curated_dir(&self) -> PathBuf {
        self.root.join("curated")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join("all_downloads")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// ロケーションごとのダウンロード先
    pub fn staging_folder(&self, folder_name: &str) -> PathBuf {
        self.downloads_dir().join(folder_name)
    }

    /// ロケーションごとのキュレーション先
    pub fn curated_folder(&self, folder_name: &str) -> PathBuf {
        self.curated_dir().join(folder_name)
    }

    pub fn report_path(&self, folder_name: &str) -> PathBuf {
        self.reports_dir().join(format!("{}_analysis.json", folder_name))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.reports_dir().join("summary.json")
    }
}

/// 名前が空、またはドットのみの場合に使うフォルダ名
const FALLBACK_FOLDER_NAME: &str = "location";

/// ロケーション名をフォルダ名に変換
///
/// 使用禁止文字を除去し、空白を `_` にまとめ、80文字で切り詰める。
/// 結果が空や `.` `..` になる場合は `location` を使う。
pub fn sanitize_folder_name(name: &str) -> String {
    clean_name(name).unwrap_or_else(|| FALLBACK_FOLDER_NAME.to_string())
}

/// 使用禁止文字の除去と空白の置換。パスとして使えない結果は None
fn clean_name(name: &str) -> Option<String> {
    lazy_static::lazy_static! {
        static ref ILLEGAL_RE: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let stripped = ILLEGAL_RE.replace_all(name, "");
    let underscored = WHITESPACE_RE.replace_all(&stripped, "_");
    let cleaned: String = underscored.chars().take(MAX_FOLDER_NAME_CHARS).collect();

    if cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned)
    }
}

/// フォルダを空の状態で作り直す（前回実行の残りを消す）
pub fn reset_dir(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::create_dir_all(path)
}

/// ダウンロード時のファイル名（1始まり、2桁ゼロ埋め）
pub fn staging_file_name(index: usize) -> String {
    format!("photo_{:02}.jpg", index)
}

/// キュレーション後のファイル名（ランク + カテゴリ）
pub fn curated_file_name(rank: usize, category: &str) -> String {
    let category = clean_name(category).unwrap_or_else(|| "other".to_string());
    format!("{:02}_{}.jpg", rank, category)
}
