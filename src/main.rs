use anyhow::Context;
use clap::Parser;
use location_photo_curator::{batch, cli, config, layout, locations, pipeline, preflight, providers};
use cli::{Cli, Commands};
use config::Config;
use tracing::Level;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Run { csv_file, output_dir, api_key, model, select, max_photos, region } => {
            let mut config = config;
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(select) = select {
                config.photos_to_select = select;
            }
            if let Some(max_photos) = max_photos {
                config.max_photos_to_download = max_photos;
            }
            if let Some(region) = region {
                config.region_hint = region;
            }

            // 事前チェック（失敗時は全体を中止）
            let scorer = providers::OllamaVisionScorer::new(&config);
            let api_key = preflight::run_preflight(&config, api_key.as_deref(), &scorer).await?;

            let locations = locations::read_locations(&csv_file)
                .with_context(|| format!("ロケーション一覧の読み込みに失敗: {}", csv_file.display()))?;

            let output = layout::OutputLayout::new(&output_dir);
            output
                .create_dirs()
                .with_context(|| format!("出力フォルダの作成に失敗: {}", output_dir.display()))?;

            println!("╔{}╗", "═".repeat(58));
            println!("║  Location Photo Curator{:34}║", "");
            println!("╠{}╣", "═".repeat(58));
            println!("║  ロケーション: {:<42}║", locations.len());
            println!("║  出力先:       {:<42}║", output_dir.display().to_string());
            println!("║  モデル:       {:<42}║", config.model);
            println!("╚{}╝", "═".repeat(58));

            let places = providers::GooglePlacesClient::new(api_key, &config);
            let pipeline = pipeline::LocationPipeline::new(
                &places,
                &places,
                &scorer,
                &output,
                pipeline::PipelineSettings::from(&config),
            );
            let runner = batch::BatchRunner::new(pipeline, &output);

            let summary = runner
                .run_and_save(&locations)
                .await
                .context("サマリーの保存に失敗")?;

            batch::print_summary(&summary, &output);
        }

        Commands::Check { api_key, model } => {
            let mut config = config;
            if let Some(model) = model {
                config.model = model;
            }

            let scorer = providers::OllamaVisionScorer::new(&config);
            preflight::run_preflight(&config, api_key.as_deref(), &scorer).await?;
            println!("✔ APIキー: 設定済み");
            println!("✔ モデル: {} (利用可能)", scorer.model());
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.model = model;
                config.save()?;
                println!("✔ モデルを設定しました: {}", config.model);
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  Ollama: {}", config.ollama_url);
                println!("  モデル: {}", config.model);
                println!("  最大ダウンロード枚数: {}", config.max_photos_to_download);
                println!("  選定枚数: {}", config.photos_to_select);
                println!("  写真の最大幅: {}px", config.photo_max_width);
                println!("  リクエスト間隔: {}ms", config.request_delay_ms);
                println!("  検索地域: {}", config.region_hint);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
