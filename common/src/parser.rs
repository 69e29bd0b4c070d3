//! ビジョンモデル応答パーサー
//!
//! モデルの自由文の応答からJSONオブジェクトを抽出し、
//! PhotoAnalysisに変換する。欠損・不正な値はデフォルトに丸める。

use crate::error::{Error, Result};
use crate::types::PhotoAnalysis;
use serde_json::{Map, Value};

/// スコア欠損・不正時のデフォルト値
const DEFAULT_QUALITY_SCORE: u8 = 5;
const MIN_QUALITY_SCORE: i64 = 1;
const MAX_QUALITY_SCORE: i64 = 10;
/// カテゴリ欠損時のデフォルト値
const DEFAULT_CATEGORY: &str = "other";

/// 応答からJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 最初の `{` から最後の `}` まで
/// 3. エラー
///
/// # Examples
/// ```
/// use photo_curator_common::extract_json_object;
///
/// let response = "Sure! {\"quality_score\": 8} Hope this helps.";
/// assert_eq!(extract_json_object(response).unwrap(), "{\"quality_score\": 8}");
/// ```
pub fn extract_json_object(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let block = response[start..start + end_offset].trim();
            if block.starts_with('{') {
                return Ok(block);
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONオブジェクトが見つかりません".into()))
}

/// 採点応答をパースしてPhotoAnalysisを生成
///
/// # Arguments
/// * `response` - ビジョンモデルの応答テキスト
/// * `filename` - 解析対象のファイル名
///
/// # Returns
/// * `Ok(PhotoAnalysis)` - パース成功（欠損値はデフォルト）
/// * `Err` - JSONが見つからない、またはオブジェクトでない場合
pub fn parse_photo_analysis(response: &str, filename: &str) -> Result<PhotoAnalysis> {
    let json_str = extract_json_object(response)?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("採点JSONパースエラー: {}", e)))?;
    let fields = value
        .as_object()
        .ok_or_else(|| Error::Parse("採点結果がJSONオブジェクトではありません".into()))?;

    Ok(PhotoAnalysis {
        filename: filename.to_string(),
        quality_score: quality_score(fields.get("quality_score")),
        category: text_field(fields, "category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        description: text_field(fields, "description").unwrap_or_default(),
        represents_place: represents_place(fields.get("represents_place")),
        reasoning: text_field(fields, "reasoning").unwrap_or_default(),
    })
}

/// スコアを1-10に丸める。数値・数値文字列以外はデフォルト
fn quality_score(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    match raw {
        Some(score) => score.clamp(MIN_QUALITY_SCORE, MAX_QUALITY_SCORE) as u8,
        None => DEFAULT_QUALITY_SCORE,
    }
}

fn represents_place(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}
