use clap::Parser;

use meme_ascii::cli::{self, Args};
use meme_ascii::enhance::GEMINI_API_KEY_ENV;

fn load_env() {
    // Load .env file, don't override existing env vars
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Notice logged at startup when no usable API key is configured.
fn missing_key_notice(api_key: Option<&str>) -> Option<String> {
    match api_key {
        Some(key) if !key.is_empty() => None,
        _ => Some(format!(
            "{} not set, AI enhancement unavailable",
            GEMINI_API_KEY_ENV
        )),
    }
}

fn main() {
    // Load .env file before anything else
    load_env();
    init_logging();

    if let Some(notice) = missing_key_notice(std::env::var(GEMINI_API_KEY_ENV).ok().as_deref()) {
        log::debug!("{}", notice);
    }

    let args = Args::parse();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
