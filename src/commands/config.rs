//! Configuration commands.
//!
//! - `config set`: Set a configuration value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    let base_url = config.base_url().ok().map(|u| u.to_string());
    let token_configured = config.token().is_some();

    let json_output = json!({
        "api": { "base_url": base_url },
        "auth": { "token_configured": token_configured },
        "language": config.language.to_string(),
        "page_size": config.page_size,
        "search_debounce_ms": config.search_debounce_ms,
        "request_timeout_secs": config.request_timeout_secs,
        "pagination_window": config.pagination_window,
        "config_file": path.to_string_lossy(),
    });

    let not_configured = "not configured".dimmed().to_string();
    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());
    text_output.push_str(&format!(
        "{}: {}\n",
        "api.base_url".cyan(),
        base_url.unwrap_or_else(|| not_configured.clone())
    ));
    text_output.push_str(&format!(
        "{}: {}\n",
        "auth.token".cyan(),
        if token_configured {
            "configured".green().to_string()
        } else {
            not_configured
        }
    ));
    text_output.push_str(&format!("{}: {}\n", "language".cyan(), config.language));
    text_output.push_str(&format!("{}: {}\n", "page_size".cyan(), config.page_size));
    text_output.push_str(&format!(
        "{}: {}\n",
        "search_debounce_ms".cyan(),
        config.search_debounce_ms
    ));
    text_output.push_str(&format!(
        "{}: {}\n",
        "request_timeout_secs".cyan(),
        config.request_timeout_secs
    ));
    text_output.push_str(&format!(
        "{}: {}\n\n",
        "pagination_window".cyan(),
        config.pagination_window
    ));
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    // Never echo the token back
    let shown = if key == "auth.token" { "[REDACTED]" } else { value };

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), shown))
    .print(output)
}
