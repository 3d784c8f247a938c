use clap::Parser;
use lecture_agent::cli::Cli;
use lecture_agent::config::load_dotenv;
use std::process::ExitCode;

fn main() -> ExitCode {
    // .env first so its values reach clap's env fallbacks
    load_dotenv();
    lecture_agent::init_tracing();

    let config = Cli::parse().into_config();
    match lecture_agent::run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[Agent] {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
