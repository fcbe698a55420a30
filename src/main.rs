use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use triagex_core::{EmbeddingProvider, Error, TextCompleter, TicketFields};
use triagex_engine::{EngineBuilder, Mode};
use triagex_provider::{HashEmbedder, RemoteEmbedder};

/// Recommend a resolution for an IT support ticket
#[derive(Parser, Debug)]
#[command(name = "triagex")]
#[command(about = "Recommends resolutions for IT tickets from a corpus of solved ones", long_about = None)]
struct Args {
    /// Directory with the historical ticket files (csv, tsv, json)
    #[arg(short, long, default_value = "./data/tickets")]
    corpus_dir: PathBuf,

    /// Optional file with query-shaped example rows
    #[arg(long)]
    examples: Option<PathBuf>,

    /// Ticket title
    #[arg(long)]
    title: Option<String>,

    /// Ticket category
    #[arg(long)]
    category: Option<String>,

    /// Ticket description
    #[arg(long)]
    description: Option<String>,

    /// Output mode: solution, value, df, or complete
    #[arg(short, long, default_value = "value")]
    mode: String,

    /// Base URL of the embedding service
    #[arg(long, default_value = "https://api.openai.com/v1")]
    endpoint: String,

    /// Embedding model name
    #[arg(long, default_value = "text-embedding-3-small")]
    model: String,

    /// Completion model name (for --mode complete)
    #[arg(long, default_value = "gpt-4o-mini")]
    completion_model: String,

    /// Use the deterministic offline embedder instead of the remote service
    #[arg(long)]
    offline: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting triagex v{}", env!("CARGO_PKG_VERSION"));
    info!("Corpus directory: {:?}", args.corpus_dir);

    let mode: Mode = args.mode.parse()?;

    let mut builder = if args.offline {
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbedder::default());
        EngineBuilder::new(provider)
    } else {
        let api_key = std::env::var("TRIAGEX_API_TOKEN")
            .map_err(|_| Error::Provider("TRIAGEX_API_TOKEN is not set".to_string()))?;
        let remote = RemoteEmbedder::new(&api_key, &args.endpoint, args.model.clone())?
            .with_completion_model(args.completion_model.clone());
        let completer: Arc<dyn TextCompleter> = Arc::new(remote.clone());
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(remote);
        EngineBuilder::new(provider).completer(completer)
    };

    builder = builder.corpus_dir(&args.corpus_dir);
    if let Some(examples) = &args.examples {
        builder = builder.examples_path(examples);
    }

    let engine = builder.build().await?;
    info!(
        "Corpus ready: {} records, categories: {:?}",
        engine.corpus().len(),
        engine.corpus().categories()
    );

    let query = match (&args.title, &args.category, &args.description) {
        (Some(title), Some(category), Some(description)) => {
            TicketFields::new(title.as_str(), category.as_str(), description.as_str())
        }
        (None, None, None) if !engine.examples().is_empty() => {
            // No query given: fall back to the first held-out example.
            let example = engine.examples()[0].clone();
            info!("No query given, using example: {}", example.issue);
            example.into_fields()
        }
        (None, _, _) => return Err(Error::MissingField("title").into()),
        (_, None, _) => return Err(Error::MissingField("category").into()),
        (_, _, None) => return Err(Error::MissingField("description").into()),
    };

    let recommendation = engine.recommend(query, mode).await?;
    println!("{recommendation}");

    Ok(())
}
