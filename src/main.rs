use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use roster_console::cli::Cli;
use roster_console::config::Config;
use roster_console::display::render_error;
use roster_console::i18n::text;

const LOG_ENV: &str = "ROSTER_LOG";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let lang = cli
        .lang
        .or_else(|| Config::load().ok().map(|c| c.language))
        .unwrap_or_default();

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = e.message().resolve_or(lang, text::REQUEST_FAILED);
            eprintln!("{}", render_error(&message, e.field_errors()));
            ExitCode::FAILURE
        }
    }
}
