use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::process::ExitCode;

use crate::commands::{
    CommandContext, ListQuery, cmd_auth_status, cmd_config_set, cmd_config_show, cmd_delete,
    cmd_list, cmd_login, cmd_logout, cmd_show,
};
use crate::entities::{
    DepartmentHead, Entity, Manager, ManagerHistoryEntry, Role, SubDepartment,
};
use crate::error::Result;
use crate::i18n::Language;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Admin console for the staffing roster")]
#[command(version)]
pub struct Cli {
    /// Display language: en or ar (overrides the configured language)
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output flags shared by every command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Permission roles
    Roles {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Current department managers
    Managers {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manager assignment history
    History {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Department heads
    Heads {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Sub-departments
    #[command(name = "sub-departments", visible_alias = "subs")]
    SubDepartments {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Log in, log out or show the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum EntityAction {
    /// List records, one page at a time
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one record
    #[command(visible_alias = "s")]
    Show {
        /// Record ID
        id: String,
    },

    /// Delete a record (a reason is mandatory)
    Delete {
        /// Record ID
        id: String,

        /// Why the record is being deleted
        #[arg(short, long)]
        reason: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field filter, repeatable; `any` clears it (e.g. --filter is_active=true)
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub filters: Vec<(String, String)>,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: configured page_size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery {
            search: args.search,
            filters: args.filters,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Exchange email and password for a session token
    Login {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is configured
    Status,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// api.base_url, auth.token, language, page_size, search_debounce_ms,
        /// request_timeout_secs or pagination_window
        key: String,

        value: String,
    },
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid filter '{s}'. Expected KEY=VALUE")),
    }
}

impl Cli {
    /// Run the selected command. `show` exits non-zero for a missing or
    /// forbidden record after rendering it; errors are left to the caller.
    pub async fn run(self) -> Result<ExitCode> {
        let output = self.output;
        let lang = self.lang;

        match self.command {
            Commands::Roles { action } => run_entity::<Role>(lang, action, output).await,
            Commands::Managers { action } => run_entity::<Manager>(lang, action, output).await,
            Commands::History { action } => {
                run_entity::<ManagerHistoryEntry>(lang, action, output).await
            }
            Commands::Heads { action } => run_entity::<DepartmentHead>(lang, action, output).await,
            Commands::SubDepartments { action } => {
                run_entity::<SubDepartment>(lang, action, output).await
            }

            Commands::Auth { action } => {
                let mut ctx = CommandContext::load(lang)?;
                match action {
                    AuthAction::Login { email } => {
                        cmd_login(&mut ctx, email.as_deref(), output).await?
                    }
                    AuthAction::Logout => cmd_logout(&mut ctx, output)?,
                    AuthAction::Status => cmd_auth_status(&ctx, output)?,
                }
                Ok(ExitCode::SUCCESS)
            }

            Commands::Config { action } => {
                match action {
                    ConfigAction::Show => cmd_config_show(output)?,
                    ConfigAction::Set { key, value } => cmd_config_set(&key, &value, output)?,
                }
                Ok(ExitCode::SUCCESS)
            }

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn run_entity<T: Entity>(
    lang: Option<Language>,
    action: EntityAction,
    output: OutputOptions,
) -> Result<ExitCode> {
    let ctx = CommandContext::load(lang)?;
    match action {
        EntityAction::List(args) => cmd_list::<T>(&ctx, &args.into(), output).await?,
        EntityAction::Show { id } => return cmd_show::<T>(&ctx, &id, output).await,
        EntityAction::Delete { id, reason } => {
            cmd_delete::<T>(&ctx, &id, reason.as_deref(), output).await?
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "roster", &mut io::stdout());
}
