//! テスト用の偽プロバイダ

#![allow(dead_code)]

use async_trait::async_trait;
use location_photo_curator::error::{CuratorError, Result};
use location_photo_curator::providers::{PhotoFetch, PhotoReference, PlaceMatch, PlaceSearch, VisionScorer};
use photo_curator_common::PhotoAnalysis;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// 登録済みの名前だけを解決する検索
#[derive(Default)]
pub struct FakePlaces {
    places: HashMap<String, PlaceMatch>,
    /// エラーを返す名前
    failing: HashSet<String>,
}

impl FakePlaces {
    pub fn with_place(mut self, name: &str, place_id: &str) -> Self {
        self.places.insert(
            name.to_string(),
            PlaceMatch {
                place_id: place_id.to_string(),
                name: format!("{} (Google)", name),
                address: format!("{} address", name),
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

#[async_trait]
impl PlaceSearch for FakePlaces {
    async fn search(&self, name: &str) -> Result<Option<PlaceMatch>> {
        if self.failing.contains(name) {
            return Err(CuratorError::ApiCall("search unavailable".into()));
        }
        Ok(self.places.get(name).cloned())
    }
}

/// place_idごとに写真参照を返す。取得内容は参照文字列のバイト列
#[derive(Default)]
pub struct FakePhotos {
    photos: HashMap<String, Vec<PhotoReference>>,
    failing_lists: HashSet<String>,
    failing_fetches: HashSet<String>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakePhotos {
    pub fn with_photos(mut self, place_id: &str, count: usize) -> Self {
        let refs = (1..=count)
            .map(|i| PhotoReference(format!("{}-ref-{:02}", place_id, i)))
            .collect();
        self.photos.insert(place_id.to_string(), refs);
        self
    }

    pub fn with_list_failure(mut self, place_id: &str) -> Self {
        self.failing_lists.insert(place_id.to_string());
        self
    }

    pub fn with_fetch_failure(mut self, reference: &str) -> Self {
        self.failing_fetches.insert(reference.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl PhotoFetch for FakePhotos {
    async fn list_photos(&self, place_id: &str) -> Result<Vec<PhotoReference>> {
        if self.failing_lists.contains(place_id) {
            return Err(CuratorError::ApiCall("details unavailable".into()));
        }
        Ok(self.photos.get(place_id).cloned().unwrap_or_default())
    }

    async fn fetch(&self, reference: &PhotoReference, _max_width: u32) -> Result<Vec<u8>> {
        self.fetched.lock().unwrap().push(reference.0.clone());
        if self.failing_fetches.contains(&reference.0) {
            return Err(CuratorError::ApiCall("download failed".into()));
        }
        Ok(reference.0.as_bytes().to_vec())
    }
}

/// (ロケーション名, ファイル名) ごとに用意した結果を返す採点
#[derive(Default)]
pub struct FakeScorer {
    verdicts: HashMap<(String, String), (u8, String, bool)>,
    /// 結果に別のファイル名を記録する写真
    renamed: HashMap<(String, String), String>,
    unavailable: bool,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeScorer {
    pub fn with_verdict(mut self, location: &str, filename: &str, score: u8, category: &str, represents_place: bool) -> Self {
        self.verdicts.insert(
            (location.to_string(), filename.to_string()),
            (score, category.to_string(), represents_place),
        );
        self
    }

    /// 採点結果のfilenameを存在しないファイル名に差し替える
    pub fn reporting_filename(mut self, location: &str, filename: &str, reported: &str) -> Self {
        self.renamed.insert(
            (location.to_string(), filename.to_string()),
            reported.to_string(),
        );
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionScorer for FakeScorer {
    async fn score(&self, image: &[u8], filename: &str, context_label: &str) -> Result<PhotoAnalysis> {
        self.calls
            .lock()
            .unwrap()
            .push((context_label.to_string(), filename.to_string()));

        if image.is_empty() {
            return Err(CuratorError::ApiParse("empty image".into()));
        }

        let key = (context_label.to_string(), filename.to_string());
        let reported = self.renamed.get(&key).map(String::as_str).unwrap_or(filename);

        match self.verdicts.get(&key) {
            Some((score, category, represents_place)) => Ok(PhotoAnalysis {
                filename: reported.to_string(),
                quality_score: *score,
                category: category.clone(),
                description: format!("{} of {}", category, context_label),
                represents_place: *represents_place,
                reasoning: "test verdict".to_string(),
            }),
            None => Err(CuratorError::ApiParse(format!("{}: unparseable response", filename))),
        }
    }

    async fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(CuratorError::ModelUnavailable("ollama not running".into()));
        }
        Ok(())
    }
}
