use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use factlens_broker::{service, synthesize, tally, AnalysisError, AnalysisResult, Analyzer};
use factlens_network::{GoogleFactCheckClient, RemoteClassifier};
use factlens_signals::{
    Classifier, FactCheckEvidence, FactCheckSource, FixedClassifier, MlPrediction,
};
use tokio::task::JoinHandle;

mod cli;
mod config;
mod input;
mod output;

use cli::{Args, ModelOverride, OutputFormat};
use config::{Config, ConfigError, Environment};
use input::{validate_text, InputError};
use output::{BatchLine, SynthesisOutput};

const GENERIC_FAILURE: &str = "An error occurred";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("FACTLENS_LOG").unwrap_or_else(|_| "factlens=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "factlens starting");

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {}", chain(&error));
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(environment = ?config.environment, "configuration loaded");

    let outcome = match args.command {
        cli::Command::Analyze {
            text,
            file,
            model,
            format,
        } => analyze(&config, text, file, model, format).await,
        cli::Command::Batch {
            path,
            model,
            concurrency,
        } => batch(&config, &path, model, concurrency).await,
        cli::Command::Synthesize {
            ml_label,
            ml_confidence,
            ratings,
        } => synthesize_offline(MlPrediction::new(ml_label.into(), ml_confidence), ratings),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            eprintln!("error: {}", user_message(&error, config.environment));
            ExitCode::FAILURE
        }
    }
}

async fn analyze(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    model: ModelOverride,
    format: OutputFormat,
) -> Result<()> {
    let raw = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };
    let text = validate_text(&raw)?;

    let analyzer = build_analyzer(config, model)?;
    let report = analyzer.analyze(text).await?.report();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", output::render_text(&report)),
    }
    Ok(())
}

enum BatchEntry {
    Submitted(JoinHandle<Result<AnalysisResult, AnalysisError>>),
    Rejected(InputError),
}

async fn batch(
    config: &Config,
    path: &Path,
    model: ModelOverride,
    concurrency: usize,
) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let analyzer = build_analyzer(config, model)?;
    let (handle, service_task) = service::spawn_with_limit(analyzer, concurrency);

    let mut entries = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = match validate_text(line) {
            Ok(text) => {
                let handle = handle.clone();
                let text = text.to_string();
                BatchEntry::Submitted(tokio::spawn(async move { handle.analyze(text).await }))
            }
            Err(error) => BatchEntry::Rejected(error),
        };
        entries.push((index + 1, entry));
    }
    tracing::info!(lines = entries.len(), "batch submitted");

    // Results are printed in input order regardless of completion order.
    for (line_number, entry) in entries {
        let line = match entry {
            BatchEntry::Submitted(task) => match task.await.context("batch task panicked")? {
                Ok(result) => BatchLine::ok(line_number, result.report()),
                Err(error) if config.environment.shows_error_detail() => {
                    BatchLine::failed(line_number, error.detail())
                }
                Err(_) => BatchLine::failed(line_number, GENERIC_FAILURE),
            },
            BatchEntry::Rejected(error) => BatchLine::failed(line_number, error.to_string()),
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    handle.shutdown().await?;
    service_task.await.context("analyzer service panicked")?;
    Ok(())
}

fn synthesize_offline(ml: MlPrediction, ratings: Vec<String>) -> Result<()> {
    let evidence: Vec<FactCheckEvidence> = ratings
        .into_iter()
        .map(|rating| FactCheckEvidence::new("", rating, "cli"))
        .collect();
    let counts = tally(&evidence);
    let verdict = synthesize(&ml, counts, !evidence.is_empty());
    println!(
        "{}",
        serde_json::to_string_pretty(&SynthesisOutput::new(&verdict, counts))?
    );
    Ok(())
}

fn build_analyzer(config: &Config, model: ModelOverride) -> Result<Analyzer> {
    let classifier: Arc<dyn Classifier> = match (model.prediction(), &config.classifier.endpoint) {
        (Some(prediction), _) => Arc::new(FixedClassifier::new(prediction)),
        (None, Some(endpoint)) => Arc::new(RemoteClassifier::with_timeout(
            endpoint.as_str(),
            config.classifier.timeout(),
        )?),
        (None, None) => {
            return Err(ConfigError::Invalid(
                "no classifier configured; set classifier.endpoint, FACTLENS_CLASSIFIER_URL, \
                 or pass --ml-label with --ml-confidence"
                    .into(),
            )
            .into())
        }
    };
    let source: Arc<dyn FactCheckSource> =
        Arc::new(GoogleFactCheckClient::new(config.fact_check.client_config())?);

    if !config.fact_check.client_config().is_configured() {
        tracing::warn!("fact-check API key not configured; verdicts will rely on the classifier only");
    }

    Ok(Analyzer::new(classifier, source).with_retrieval_timeout(config.fact_check.timeout()))
}

/// Input and configuration problems are always shown; anything else only in
/// development.
fn user_message(error: &anyhow::Error, environment: Environment) -> String {
    if let Some(input) = error.downcast_ref::<InputError>() {
        return input.to_string();
    }
    if let Some(invalid) = error.downcast_ref::<ConfigError>() {
        return chain(invalid);
    }
    if !environment.shows_error_detail() {
        return GENERIC_FAILURE.to_string();
    }
    match error.downcast_ref::<AnalysisError>() {
        Some(analysis) => analysis.detail(),
        None => format!("{error:#}"),
    }
}

fn chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
