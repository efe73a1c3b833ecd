use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use secrecy::SecretString;
use serde_json::json;

use super::{CommandContext, CommandOutput};
use crate::auth::{self, AuthStatus};
use crate::cli::OutputOptions;
use crate::error::Result;
use crate::i18n::text;

/// Read one line from stdin, prompting on stderr.
fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_login(
    ctx: &mut CommandContext,
    email: Option<&str>,
    output: OutputOptions,
) -> Result<()> {
    let email = match email {
        Some(email) => email.to_string(),
        None => prompt_line("Email: ")?,
    };
    let password = SecretString::from(prompt_line("Password: ")?);

    let backend = ctx.backend()?;
    let session = auth::login(&backend, &email, &password).await?;
    auth::store_session(&mut ctx.config, &session)?;

    let lang = ctx.language();
    let mut text_output = text::LOGGED_IN.get(lang).green().to_string();
    if let Some(name) = &session.display_name {
        text_output.push_str(&format!(" ({name})"));
    }

    CommandOutput::new(json!({
        "action": "login",
        "email": email.trim(),
        "success": true,
    }))
    .with_text(text_output)
    .print(output)
}

pub fn cmd_logout(ctx: &mut CommandContext, output: OutputOptions) -> Result<()> {
    let had_token = auth::logout(&mut ctx.config)?;

    CommandOutput::new(json!({
        "action": "logout",
        "had_token": had_token,
    }))
    .with_text(text::LOGGED_OUT.get(ctx.language()))
    .print(output)
}

pub fn cmd_auth_status(ctx: &CommandContext, output: OutputOptions) -> Result<()> {
    let status = auth::status(&ctx.config);
    let (source, text_output) = match status {
        AuthStatus::Environment => (
            "environment",
            format!("{} (token from {})", "logged in".green(), crate::config::TOKEN_ENV),
        ),
        AuthStatus::ConfigFile => ("config", format!("{}", "logged in".green())),
        AuthStatus::LoggedOut => ("none", format!("{}", "not logged in".dimmed())),
    };

    CommandOutput::new(json!({
        "logged_in": status != AuthStatus::LoggedOut,
        "source": source,
    }))
    .with_text(text_output)
    .print(output)
}
