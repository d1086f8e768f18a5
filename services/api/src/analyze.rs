use clap::Args;
use std::io::{self, Read};
use std::path::PathBuf;
use textrisk::config::AppConfig;
use textrisk::error::AppError;
use textrisk::service::{AnalysisResponse, AnalysisService};
use textrisk::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// Text to analyze. Reads stdin when neither --text nor --file is given.
    #[arg(long, conflicts_with = "file")]
    pub(crate) text: Option<String>,
    /// Read the text to analyze from a file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Dictionary CSV to load instead of the configured one
    #[arg(long)]
    pub(crate) dictionary: Option<PathBuf>,
    /// Maximum number of findings to list
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the full response as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(path) = args.dictionary.clone() {
        config.analysis.dictionary_path = path;
    }

    let text = read_input(&args)?;
    let service = AnalysisService::from_config(config.analysis)?;
    let response = service.analyze(&text, args.limit)?;

    println!("{}", format_response(&response, args.json)?);
    Ok(())
}

fn read_input(args: &AnalyzeArgs) -> Result<String, AppError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn format_response(response: &AnalysisResponse, json: bool) -> Result<String, AppError> {
    if !json {
        return Ok(response.rendered.clone());
    }

    serde_json::to_string_pretty(response)
        .map_err(|err| AppError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}
