use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use falc_config::Config;
use falc_config::logging::LoggingConfig;
use falc_core::{Pipeline, RankCache};
use falc_fetch::FastTextVocabulary;
use falc_lang_latin::LatinProcessor;
use serde::Serialize;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod cli;

use self::cli::Args;

/// Everything the blocking worker needs
struct Job {
    config: Config,
    text: String,
    complex_words: Option<f64>,
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = cli::load_config(&args)?;
    init_tracing(&config.logging);

    let job = Job {
        text: args.input()?,
        complex_words: args.complex_words.then_some(args.log_rank_threshold),
        pretty: args.pretty,
        config,
    };

    let cancel = CancellationToken::new();
    let mut worker = {
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || run(job, cancel))
    };

    tokio::select! {
        result = &mut worker => {
            let output = result.context("Detection worker panicked")??;
            println!("{output}");
            Ok(())
        }
        _ = signal::ctrl_c() => {
            tracing::info!("Interrupted, cancelling");
            cancel.cancel();
            // Let the worker remove partial downloads
            if let Err(e) = worker.await {
                tracing::error!("Detection worker panicked: {e}");
            }
            anyhow::bail!("Interrupted")
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(job: Job, cancel: CancellationToken) -> anyhow::Result<String> {
    let Job {
        config,
        text,
        complex_words,
        pretty,
    } = job;

    let vocabulary = FastTextVocabulary::from_config(&config.vocabulary).with_cancel(cancel);
    let ranks = Arc::new(RankCache::new(vocabulary));

    let processor = match &config.lemmas_path {
        Some(path) => LatinProcessor::with_lemmas_file(Path::new(path))
            .with_context(|| format!("Failed to load lemmas from {path}"))?,
        None => LatinProcessor::new(),
    };
    let pipeline = Pipeline::new(processor, ranks, config.detection);

    match complex_words {
        Some(threshold) => {
            let words = pipeline.complex_words(&text, threshold)?;
            to_json(&words, pretty)
        }
        None => {
            let report = pipeline.detect(&text)?;
            tracing::info!(
                "{} detections, {} tokens failed",
                report.detections.len(),
                report.failures.len()
            );
            to_json(&report.detections, pretty)
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
