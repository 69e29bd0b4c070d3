//! Ollama（ローカルビジョンモデル）連携
//!
//! - /api/generate: 画像 + プロンプト → 採点JSON
//! - /api/tags: モデルの存在確認（事前チェック）

use super::VisionScorer;
use crate::config::Config;
use crate::error::{CuratorError, Result};
use async_trait::async_trait;
use base64::Engine;
use photo_curator_common::{build_scoring_prompt, parse_photo_analysis, PhotoAnalysis};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// /api/generate リクエスト
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    images: Vec<String>,
    stream: bool,
}

/// /api/generate レスポンス
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// /api/tags レスポンス
#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

pub struct OllamaVisionScorer {
    http: reqwest::Client,
    base_url: String,
    model: String,
    vision_timeout: Duration,
    health_timeout: Duration,
}

impl OllamaVisionScorer {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            vision_timeout: config.vision_timeout(),
            health_timeout: config.health_timeout(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// インストール済みモデル一覧に指定モデルが含まれるか（":latest" は無視）
fn model_installed(model: &str, installed: &[String]) -> bool {
    let wanted = model.trim_end_matches(":latest");
    installed.iter().any(|name| name.contains(wanted))
}

#[async_trait]
impl VisionScorer for OllamaVisionScorer {
    async fn score(&self, image: &[u8], filename: &str, context_label: &str) -> Result<PhotoAnalysis> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_scoring_prompt(context_label),
            images: vec![base64::engine::general_purpose::STANDARD.encode(image)],
            stream: false,
        };

        let response: GenerateResponse = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .timeout(self.vision_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response.response.trim();
        tracing::debug!(filename, response_len = text.len(), "vision response");

        parse_photo_analysis(text, filename)
            .map_err(|e| CuratorError::ApiParse(format!("{}: {}", filename, e)))
    }

    async fn check_available(&self) -> Result<()> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| {
                CuratorError::ModelUnavailable(format!(
                    "Ollamaに接続できません（`ollama serve` で起動してください）: {}",
                    e
                ))
            })?;

        let tags: TagsResponse = response.json().await?;
        let installed: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();

        if !model_installed(&self.model, &installed) {
            return Err(CuratorError::ModelUnavailable(format!(
                "モデル {} が見つかりません。インストール済み: {:?}（`ollama pull {}` でインストール）",
                self.model, installed, self.model
            )));
        }

        Ok(())
    }
}
