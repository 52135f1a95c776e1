mod config;
mod metrics;

use annotate::{AnnotationSession, CoreNlpClient};
use anyhow::Result;
use clap::Parser;
use extract::Dispatcher;
use ingest::{Document, FileReader};
use query::Finder;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::metrics::{Metrics, TimedOperation};

#[derive(Parser, Debug)]
#[command(name = "answer", version, about = "Answers questions from the text of a document")]
struct Args {
    /// Document to answer from.
    document: PathBuf,
    /// Questions, one per line.
    questions: PathBuf,
    /// JSON run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// CoreNLP server URL; overrides the configuration.
    #[arg(long, env = "CORENLP_URL")]
    corenlp_url: Option<String>,
    /// Skip building the document entity table.
    #[arg(long)]
    no_entities: bool,
    /// Log as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path).await?,
        None => AppConfig::default(),
    };
    if let Some(url) = args.corenlp_url {
        config.annotation.url = url;
    }
    if args.no_entities {
        config.entities.enabled = false;
    }

    let document = Document::load(&args.document).await?;
    let questions = FileReader::read_questions(&args.questions).await?;
    info!(
        paragraphs = document.paragraphs().len(),
        questions = questions.len(),
        url = %config.annotation.url,
        "Loaded inputs"
    );

    let client = CoreNlpClient::new(
        config.annotation.url.clone(),
        config.annotation.annotators.clone(),
    );
    let session = AnnotationSession::new(Box::new(client), config.retry_policy());
    let mut finder = Finder::new(document, session)
        .with_ranker(config.ranker())
        .with_window(config.candidates.window);

    if config.entities.enabled {
        finder.tag_entities().await;
    }

    let dispatcher = Dispatcher::standard()?;
    let metrics = Metrics::new();

    for question in &questions {
        let timer = TimedOperation::start();
        let category = dispatcher.classify(question);
        let outcome = dispatcher.answer(question, &mut finder).await;
        metrics.record_answer(category, &outcome, timer.elapsed());

        // stdout carries answers only
        println!("{}", outcome);
    }

    let snapshot = metrics.snapshot(finder.session_stats());
    info!(metrics = %serde_json::to_string(&snapshot)?, "Run complete");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
