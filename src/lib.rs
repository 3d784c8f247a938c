pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod formulas;
pub mod output;
pub mod pipeline;
pub mod text;

use config::AgentConfig;
use error::AgentError;
use extract::DocumentExtractor;
use output::{render_outputs, DocxRenderer};
use pipeline::{discover_inputs, GenerationOrchestrator, PipelineDriver, PipelineOutput};
use tracing_subscriber::EnvFilter;

/// Initialize tracing with the RUST_LOG env filter
///
/// Default: warn for dependencies, info for this crate (per-file progress
/// visible). Use RUST_LOG=debug for per-step cascade logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,lecture_agent=info")),
        )
        .try_init();
}

/// Process every lecture file under the input directory and write the
/// artifacts. Only startup problems are errors; per-file failures end up as
/// empty records.
pub async fn process_directory(config: &AgentConfig) -> Result<PipelineOutput, AgentError> {
    if !config.input_dir.is_dir() {
        return Err(AgentError::MissingInput(config.input_dir.clone()));
    }

    let out_dir = config.output_dir();
    std::fs::create_dir_all(&out_dir).map_err(|source| AgentError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;

    tracing::info!("[Agent] Using input directory: {}", config.input_dir.display());
    tracing::info!("[Agent] Writing outputs to: {}", out_dir.display());

    let provider = match ai::get_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!(
                "[Agent] {} provider unavailable ({}); using local fallbacks",
                config.provider.as_str(),
                e
            );
            None
        }
    };
    if provider.is_none() && config.strict {
        tracing::info!("[Agent] Strict mode has no effect without a provider");
    }

    let driver = PipelineDriver::new(
        DocumentExtractor::new(),
        GenerationOrchestrator::from_config(provider, config),
    );

    let inputs = discover_inputs(&config.input_dir);
    tracing::info!("[Agent] Found {} file(s) to process", inputs.len());

    let output = driver.run(inputs).await;
    let written = render_outputs(&DocxRenderer::new(), &out_dir, &output);
    tracing::info!("[Agent] Done: {} document(s) written", written.len());

    Ok(output)
}

/// Blocking entry point: one current-thread runtime for the whole run
pub fn run(config: AgentConfig) -> Result<PipelineOutput, AgentError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(process_directory(&config))
}
