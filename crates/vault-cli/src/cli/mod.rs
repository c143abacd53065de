//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vault_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "vault")]
#[command(version = "0.1")]
#[command(about = "i.AM Vault: sign in, generate components, keep the design registry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a component from a prompt without opening the shell
    Generate {
        /// Description of the component to generate
        #[arg(short, long)]
        prompt: String,

        /// Write the markup to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Open the result as a preview page in the browser
        #[arg(long)]
        open: bool,
    },

    /// Sign in to the vault account
    Login {
        /// Unlock with the platform authenticator and the cached password
        #[arg(long)]
        biometric: bool,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the session and biometric unlock status
    Status,

    /// Create the vault account on the identity provider
    Signup {
        /// Account email (defaults to `identity.account` from config)
        #[arg(long, env = "VAULT_ACCOUNT")]
        email: Option<String>,
    },

    /// Work with the design tokens
    Tokens {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TokenCommands {
    /// Print the Tailwind theme configuration
    Export {
        /// Print the custom CSS classes instead
        #[arg(long)]
        css: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // The guard flushes the log file on exit.
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // default to the interactive shell
    let Some(command) = cli.command else {
        return commands::shell::run(config).await;
    };

    match command {
        Commands::Generate { prompt, out, open } => {
            commands::generate::run(&config, &prompt, out.as_deref(), open).await
        }
        Commands::Login { biometric } => commands::auth::login(config, biometric).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(config).await,
        Commands::Signup { email } => commands::auth::signup(config, email).await,

        Commands::Tokens { command } => match command {
            TokenCommands::Export { css } => {
                commands::tokens::export(css);
                Ok(())
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
