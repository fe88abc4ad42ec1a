use anyhow::Context;
use clap::{Parser, Subcommand};
use sn_news::TheNewsApiClient;
use sn_storage::{create_storage, StorageKind};
use sn_translate::{detect_language, supported_languages, Translator};
use sn_web::service::{FetchRequest, TranslateOutcome};
use sn_web::{AppState, ArticleService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sports news aggregation and translation backend", long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite (default) or memory
    #[arg(long, default_value_t = StorageKind::Sqlite)]
    storage: StorageKind,
    /// Overrides SPORTNEWS_BIND
    #[arg(long)]
    bind: Option<String>,
    /// Overrides SPORTNEWS_DATABASE
    #[arg(long)]
    database: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Pull sports headlines and store the new ones
    Fetch {
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Translate one article, or the next batch of untranslated ones
    Translate {
        id: Option<i64>,
    },
    /// Print article statistics
    Stats,
    /// List the supported target languages
    Languages,
    /// Guess the language of a piece of text
    Detect {
        text: String,
    },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn build_service(cli: &Cli, config: &AppConfig) -> anyhow::Result<ArticleService> {
    let store = create_storage(cli.storage, &config.database_path)
        .await
        .with_context(|| format!("failed to open {} storage", cli.storage))?;
    let news = TheNewsApiClient::new(Some(config.news_api_key.clone()), Some(&config.news_api_url))?;
    let translator = Translator::from_config(&config.translation())?;
    info!(
        storage = %cli.storage,
        translators = ?translator.provider_names(),
        "services initialized"
    );
    Ok(ArticleService::new(store, Arc::new(news), Arc::new(translator)))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(bind) = &cli.bind {
        config.bind_address = bind.clone();
    }
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }
    init_tracing(&config.log_level);

    match &cli.command {
        Commands::Languages => {
            for (code, name) in supported_languages() {
                println!("{}\t{}", code, name);
            }
            return Ok(());
        }
        Commands::Detect { text } => {
            let code = detect_language(text);
            let name = supported_languages().get(code).copied().unwrap_or("Unknown");
            println!("{}\t{}", code, name);
            return Ok(());
        }
        _ => {}
    }

    let service = build_service(&cli, &config).await?;

    match cli.command {
        Commands::Serve => {
            let addr = config.socket_addr()?;
            sn_web::serve(AppState::new(service), addr).await?;
        }
        Commands::Fetch { locale, language, limit } => {
            let outcome = service.fetch_news(&FetchRequest::new(locale, language, limit)).await?;
            println!(
                "Fetched {} new articles ({} already stored)",
                outcome.inserted.len(),
                outcome.existing
            );
            for article in &outcome.inserted {
                println!("  [{}] {}", article.id, article.title);
            }
        }
        Commands::Translate { id: Some(id) } => match service.translate_article(id).await? {
            TranslateOutcome::AlreadyTranslated(_) => println!("Article {} already translated", id),
            TranslateOutcome::Translated(article) => print_json(&article)?,
        },
        Commands::Translate { id: None } => {
            let translated = service.translate_pending().await?;
            println!("Translated {} articles", translated);
        }
        Commands::Stats => print_json(&service.stats().await?)?,
        Commands::Languages | Commands::Detect { .. } => {}
    }

    Ok(())
}
