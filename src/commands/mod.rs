mod auth;
mod config;
mod entity;

pub use auth::{cmd_auth_status, cmd_login, cmd_logout};
pub use config::{cmd_config_set, cmd_config_show};
pub use entity::{ListQuery, build_filter, cmd_delete, cmd_list, cmd_show};

use std::env;

use serde_json::Value;

use crate::api::HttpBackend;
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::i18n::Language;

/// Width assumed when `COLUMNS` is not set
const DEFAULT_COLUMNS: usize = 120;

/// Print a JSON value to stdout
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A command result with both a JSON and a human-readable form.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Loaded configuration plus per-invocation settings.
pub struct CommandContext {
    pub config: Config,
    pub columns: usize,
}

impl CommandContext {
    pub fn load(language: Option<Language>) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(language) = language {
            config.language = language;
        }
        Ok(Self {
            config,
            columns: terminal_columns(),
        })
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn backend(&self) -> Result<HttpBackend> {
        HttpBackend::from_config(&self.config)
    }
}

fn terminal_columns() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&c| c > 0)
        .unwrap_or(DEFAULT_COLUMNS)
}
