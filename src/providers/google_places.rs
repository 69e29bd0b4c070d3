//! Google Places API連携
//!
//! - Text Search: ロケーション名 → place_id
//! - Place Details: place_id → 写真参照一覧
//! - Place Photo: 写真参照 → 画像バイナリ

use super::{PhotoFetch, PhotoReference, PlaceMatch, PlaceSearch};
use crate::config::Config;
use crate::error::{CuratorError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";

/// Text Searchレスポンス
#[derive(Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Deserialize)]
struct TextSearchResult {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
}

/// Place Detailsレスポンス
#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<DetailsResult>,
}

#[derive(Deserialize)]
struct DetailsResult {
    #[serde(default)]
    photos: Vec<PhotoEntry>,
}

#[derive(Deserialize)]
struct PhotoEntry {
    photo_reference: Option<String>,
}

pub struct GooglePlacesClient {
    http: reqwest::Client,
    api_key: String,
    region_hint: String,
    location_bias: String,
    radius_m: u32,
    search_timeout: Duration,
    download_timeout: Duration,
}

impl GooglePlacesClient {
    pub fn new(api_key: String, config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            region_hint: config.region_hint.clone(),
            location_bias: config.location_bias.clone(),
            radius_m: config.search_radius_m,
            search_timeout: config.search_timeout(),
            download_timeout: config.download_timeout(),
        }
    }

    /// 地域名を付加した検索クエリ
    fn query_for(&self, name: &str) -> String {
        if self.region_hint.trim().is_empty() {
            name.to_string()
        } else {
            format!("{} {}", name, self.region_hint)
        }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn search(&self, name: &str) -> Result<Option<PlaceMatch>> {
        let query = self.query_for(name);
        let radius = self.radius_m.to_string();

        let response: TextSearchResponse = self
            .http
            .get(TEXT_SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("query", query.as_str()),
                ("location", self.location_bias.as_str()),
                ("radius", radius.as_str()),
            ])
            .timeout(self.search_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(query = %query, status = %response.status, "text search");

        if response.status != "OK" {
            return Ok(None);
        }

        Ok(response.results.into_iter().next().map(|r| PlaceMatch {
            place_id: r.place_id,
            name: r.name,
            address: r.formatted_address,
        }))
    }
}

#[async_trait]
impl PhotoFetch for GooglePlacesClient {
    async fn list_photos(&self, place_id: &str) -> Result<Vec<PhotoReference>> {
        let response: DetailsResponse = self
            .http
            .get(DETAILS_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("place_id", place_id),
                ("fields", "name,formatted_address,photos"),
            ])
            .timeout(self.search_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(CuratorError::ApiCall(format!(
                "Place Details status: {}",
                response.status
            )));
        }

        let photos = response
            .result
            .map(|r| r.photos)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.photo_reference)
            .filter(|r| !r.is_empty())
            .map(PhotoReference)
            .collect();

        Ok(photos)
    }

    async fn fetch(&self, reference: &PhotoReference, max_width: u32) -> Result<Vec<u8>> {
        let max_width = max_width.to_string();

        let bytes = self
            .http
            .get(PHOTO_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("photo_reference", reference.0.as_str()),
                ("maxwidth", max_width.as_str()),
            ])
            .timeout(self.download_timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}
