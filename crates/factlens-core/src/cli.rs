use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "factlens",
    version,
    about = "Fake-news verdicts from a text classifier and fact-checker reviews"
)]
pub struct Args {
    /// TOML configuration file.
    #[arg(long, global = true, env = "FACTLENS_CONFIG")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one text. Reads stdin when neither TEXT nor --file is given.
    Analyze {
        #[arg(conflicts_with = "file")]
        text: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        model: ModelOverride,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Analyze every non-empty line of a file, one JSON result per line.
    Batch {
        path: PathBuf,
        #[command(flatten)]
        model: ModelOverride,
        /// Lines analyzed at the same time.
        #[arg(
            long,
            default_value_t = factlens_broker::service::DEFAULT_MAX_IN_FLIGHT,
            value_parser = parse_concurrency
        )]
        concurrency: usize,
    },
    /// Run verdict synthesis offline on a given prediction and ratings.
    Synthesize {
        #[arg(long, value_enum)]
        ml_label: LabelChoice,
        #[arg(long, value_parser = parse_confidence)]
        ml_confidence: f64,
        /// Fact-checker rating; repeat for several reviews.
        #[arg(long = "rating")]
        ratings: Vec<String>,
    },
}

/// Bypasses the configured classifier with a fixed prediction.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct ModelOverride {
    #[arg(long, value_enum, requires = "ml_confidence")]
    pub ml_label: Option<LabelChoice>,
    #[arg(long, value_parser = parse_confidence, requires = "ml_label")]
    pub ml_confidence: Option<f64>,
}

impl ModelOverride {
    pub fn prediction(&self) -> Option<factlens_signals::MlPrediction> {
        match (self.ml_label, self.ml_confidence) {
            (Some(label), Some(confidence)) => {
                Some(factlens_signals::MlPrediction::new(label.into(), confidence))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelChoice {
    Fake,
    Real,
}

impl From<LabelChoice> for factlens_signals::MlLabel {
    fn from(value: LabelChoice) -> Self {
        match value {
            LabelChoice::Fake => factlens_signals::MlLabel::Fake,
            LabelChoice::Real => factlens_signals::MlLabel::Real,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

fn parse_confidence(value: &str) -> Result<f64, String> {
    let confidence: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(format!("confidence must be within [0, 1], got {confidence}"))
    }
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(_) => Err(format!("`{value}` is not a positive integer")),
    }
}
