//! 写真選定ロジック
//!
//! 解析結果から品質とカテゴリの多様性を考慮して上位N枚を選ぶ。
//!
//! ## 選定手順
//! 1. 場所を表す写真（represents_place）に絞り込む。N枚未満なら絞り込みを解除
//! 2. 品質スコアの降順に安定ソート
//! 3. 1巡目: 未選択カテゴリの写真を1枚ずつ採用
//! 4. 2巡目: 残り枠をカテゴリ問わず品質順で補充

use crate::types::PhotoAnalysis;
use std::collections::HashSet;

/// ロケーションあたりの選定枚数（デフォルト）
pub const DEFAULT_PHOTOS_TO_SELECT: usize = 3;

/// 品質スコア降順に並べる（同点は元の順序を維持）
pub fn sort_by_quality(analyses: &[PhotoAnalysis]) -> Vec<&PhotoAnalysis> {
    let mut sorted: Vec<&PhotoAnalysis> = analyses.iter().collect();
    sorted.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    sorted
}

/// カテゴリが偏らないように高品質な写真をN枚選ぶ
///
/// 場所を表す写真がN枚に満たない場合は全写真から選ぶ。
/// この場合「場所を表すこと」より「品質」が優先されるが、枠を埋めるための意図的な動作。
///
/// # Arguments
/// * `analyses` - 解析結果
/// * `count` - 選定枚数
///
/// # Returns
/// 選定順（1巡目の多様性枠 → 2巡目の補充枠）の解析結果
pub fn select_diverse_photos(analyses: &[PhotoAnalysis], count: usize) -> Vec<&PhotoAnalysis> {
    if count == 0 {
        return Vec::new();
    }

    let mut pool: Vec<&PhotoAnalysis> = analyses.iter().filter(|a| a.represents_place).collect();
    if pool.len() < count {
        pool = analyses.iter().collect();
    }
    pool.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));

    let mut taken = vec![false; pool.len()];
    let mut selected = Vec::with_capacity(count.min(pool.len()));
    let mut used_categories: HashSet<&str> = HashSet::new();

    // 1巡目: カテゴリごとに最高品質の1枚
    for (i, photo) in pool.iter().enumerate() {
        if selected.len() >= count {
            break;
        }
        if used_categories.insert(photo.category.as_str()) {
            taken[i] = true;
            selected.push(*photo);
        }
    }

    // 2巡目: 残りを品質順で補充
    for (i, photo) in pool.iter().enumerate() {
        if selected.len() >= count {
            break;
        }
        if !taken[i] {
            taken[i] = true;
            selected.push(*photo);
        }
    }

    selected
}
