use crate::config::{is_truthy, AgentConfig, ProviderKind};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Turn lecture notes (.pdf, .txt, .docx) into summaries, flashcards and formula sheets
#[derive(Debug, Parser)]
#[command(name = "lecture-agent", version, about)]
pub struct Cli {
    /// Directory containing lecture notes
    pub input_dir: PathBuf,

    /// Output directory (defaults to the input directory)
    #[arg(long = "out")]
    pub output_dir: Option<PathBuf>,

    /// Generative provider: gemini, perplexity or local
    #[arg(long, env = "LECTURE_PROVIDER", default_value = "gemini")]
    pub provider: String,

    /// Model name (defaults to the provider's default model)
    #[arg(long, env = "LECTURE_MODEL")]
    pub model: Option<String>,

    /// Do not fall back to local methods when the provider fails
    /// (`--strict` or `--strict=<bool>`)
    #[arg(
        long,
        env = "GEMINI_STRICT",
        action = clap::ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false"
    )]
    pub strict: bool,

    /// Network timeout for each provider call, in seconds
    #[arg(long, env = "LECTURE_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(is_truthy(value))
}

impl Cli {
    /// Resolve into a run configuration, reading the provider key from the environment
    pub fn into_config(self) -> AgentConfig {
        let provider: ProviderKind = self.provider.parse().unwrap_or_default();
        let model = self
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        AgentConfig {
            provider,
            api_key: None,
            model,
            strict: self.strict,
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            input_dir: self.input_dir,
            output_dir: self.output_dir,
        }
        .with_env_credentials()
    }
}
