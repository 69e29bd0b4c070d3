use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "location-curator")]
#[command(about = "Google Places + ローカルAIでロケーションごとの代表写真を選定", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVのロケーション一覧から写真を収集・選定
    Run {
        /// 'Location' 列を持つCSVファイル
        #[arg(required = true)]
        csv_file: PathBuf,

        /// 出力ディレクトリ
        #[arg(required = true)]
        output_dir: PathBuf,

        /// Google Places APIキー（省略時: 環境変数 GOOGLE_PLACES_API_KEY / 設定ファイル）
        #[arg(long)]
        api_key: Option<String>,

        /// Ollamaのビジョンモデル
        #[arg(short, long)]
        model: Option<String>,

        /// ロケーションあたりの選定枚数
        #[arg(short, long)]
        select: Option<usize>,

        /// ロケーションあたりの最大ダウンロード枚数
        #[arg(long)]
        max_photos: Option<usize>,

        /// 検索クエリに付加する地域名
        #[arg(long)]
        region: Option<String>,
    },

    /// 事前チェックのみ実行（APIキーとOllamaモデル）
    Check {
        /// Google Places APIキー
        #[arg(long)]
        api_key: Option<String>,

        /// Ollamaのビジョンモデル
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 使用するモデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
