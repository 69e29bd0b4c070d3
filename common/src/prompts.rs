//! プロンプト生成モジュール
//!
//! - PHOTO_CATEGORIES: 写真カテゴリの推奨語彙
//! - build_scoring_prompt: 写真1枚の採点用プロンプト

/// 写真カテゴリ（推奨語彙。モデルが他の値を返してもそのまま受け入れる）
pub const PHOTO_CATEGORIES: &[&str] = &[
    "exterior",
    "interior",
    "landscape",
    "scenic_view",
    "trail",
    "signage",
    "detail",
    "food",
    "people",
    "other",
];

/// 採点プロンプト生成
///
/// # Arguments
/// * `location_name` - 写真が表すべきロケーション名
///
/// # Returns
/// JSONオブジェクトのみを返すよう指示したプロンプト
pub fn build_scoring_prompt(location_name: &str) -> String {
    let categories = PHOTO_CATEGORIES.join(", ");

    format!(
        r#"You are evaluating a photo that should represent "{location_name}" for a travel photo collection.

Analyze this image and respond with ONLY a JSON object (no other text):

{{
  "quality_score": <1-10 rating for image quality, composition, lighting>,
  "category": "<one of: {categories}>",
  "description": "<brief description of what's shown>",
  "represents_place": <true if it shows the actual location/setting, false if it's just food, selfies, or generic content>,
  "reasoning": "<why this would or wouldn't be a good representative photo>"
}}

Be strict: food close-ups, selfies, and generic shots score low. Exteriors, scenic views, interiors showing ambiance, and landscape shots score high."#
    )
}
