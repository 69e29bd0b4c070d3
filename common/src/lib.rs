//! Location Photo Curator Common Library
//!
//! パイプラインとCLIで共有される型と純粋ロジック:
//! - 写真解析結果・ロケーション結果・バッチ集計の型
//! - カテゴリ多様性を考慮した写真選定
//! - ビジョンモデル応答のパース
//! - 採点プロンプト生成

pub mod types;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod selector;

pub use types::{BatchSummary, LocationResult, LocationStatus, PhotoAnalysis};
pub use error::{Error, Result};
pub use parser::{extract_json_object, parse_photo_analysis};
pub use prompts::{build_scoring_prompt, PHOTO_CATEGORIES};
pub use selector::{select_diverse_photos, sort_by_quality, DEFAULT_PHOTOS_TO_SELECT};
