//! ロケーション一覧（CSV）の読み込み
//!
//! ヘッダー行に `Location` 列を持つCSVから、ロケーション名を入力順に読み込む。

use crate::error::{CuratorError, Result};
use std::borrow::Cow;
use std::path::Path;

const LOCATION_COLUMN: &str = "Location";

/// CSVファイルからロケーション名を読み込み
pub fn read_locations(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(CuratorError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_locations(&content)
}

/// CSV文字列からロケーション名を読み込み（空行・空欄はスキップ）
pub fn parse_locations(content: &str) -> Result<Vec<String>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines();

    let header = lines
        .next()
        .ok_or_else(|| CuratorError::InvalidLocationList("CSVが空です".into()))?;
    let column = parse_csv_line(header)
        .iter()
        .position(|h| *h == LOCATION_COLUMN)
        .ok_or_else(|| {
            CuratorError::InvalidLocationList(format!("'{}' 列がありません", LOCATION_COLUMN))
        })?;

    let locations = lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_csv_line(line).get(column).map(|f| f.to_string()))
        .filter(|name| !name.is_empty())
        .collect();

    Ok(locations)
}

/// CSVの1行をフィールドに分割（ダブルクォート内のカンマは区切りとしない）
fn parse_csv_line(line: &str) -> Vec<Cow<'_, str>> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + c.len_utf8();
        }
    }
    fields.push(trim_quotes(&line[field_start..]));

    fields
}

/// 前後のクォートを外し、クォート内の `""` を `"` に戻す
fn trim_quotes(s: &str) -> Cow<'_, str> {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        let inner = s[1..s.len() - 1].trim();
        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(s)
    }
}
