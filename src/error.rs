use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("Google Places APIキーが設定されていません。--api-key、環境変数 GOOGLE_PLACES_API_KEY、または `location-curator config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ロケーション一覧が不正: {0}")]
    InvalidLocationList(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("ビジョンモデルが利用できません: {0}")]
    ModelUnavailable(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_curator_common::Error),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
