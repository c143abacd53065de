//! Account command handlers: login, logout, status and signup.

use std::io::{IsTerminal, Write, stderr, stdin};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use vault_core::auth::validate_secret;
use vault_core::credential_cache::CredentialCache;
use vault_core::session::SessionStore;
use vault_core::{Config, SessionState, VaultServices};

pub async fn login(config: Config, biometric: bool) -> Result<()> {
    let services = VaultServices::from_config(config)?;

    let result = if biometric {
        if !services.auth.biometric_available() {
            bail!(
                "No platform authenticator is configured.\n\
                 Set `biometric.command` in the config file or sign in with a password."
            );
        }
        services.auth.biometric_sign_in().await
    } else {
        let secret = read_secret(&format!("Password for {}: ", services.auth.account()))?;
        services.auth.manual_sign_in(&secret).await
    };

    match result {
        Ok(session) => {
            println!("Signed in as {}", session.email);
            Ok(())
        }
        Err(failure) => {
            tracing::debug!("login failed: {failure:?}");
            bail!("{}", failure.user_message())
        }
    }
}

pub fn logout() -> Result<()> {
    let store = SessionStore::default_location();
    if store.clear()? {
        println!("Signed out.");
    } else {
        println!("No stored session.");
    }
    Ok(())
}

pub async fn status(config: Config) -> Result<()> {
    let services = VaultServices::from_config(config)?;

    match services.session.restore().await {
        SessionState::SignedIn(session) => {
            println!("Signed in as {}", session.email);
            if let Some(expires_at) = session.expires_at {
                println!("Token expires {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        SessionState::SignedOut | SessionState::Restoring => {
            match SessionStore::default_location().load() {
                Ok(Some(stored)) => println!(
                    "Stored session for {} could not be verified (identity service unavailable)",
                    stored.email
                ),
                _ => println!("Signed out (account {})", services.auth.account()),
            }
        }
    }

    let biometric = if services.auth.biometric_available() {
        "available"
    } else {
        "not configured"
    };
    println!("Biometric unlock: {biometric}");

    let cache = CredentialCache::default_location();
    match cache.load() {
        Ok(Some(_)) => println!("Cached password: {} (plaintext)", cache.path().display()),
        Ok(None) => println!("Cached password: none"),
        Err(e) => println!("Cached password: unreadable ({e:#})"),
    }
    Ok(())
}

pub async fn signup(config: Config, email: Option<String>) -> Result<()> {
    let email = email.unwrap_or_else(|| config.identity.account.clone());
    let current_account = config.identity.account.clone();
    let services = VaultServices::from_config(config)?;

    let secret = read_secret(&format!("New password for {email}: "))?;
    validate_secret(&secret).map_err(|failure| anyhow::anyhow!(failure.user_message()))?;
    let confirm = read_secret("Confirm password: ")?;
    if confirm != secret {
        bail!("Passwords do not match.");
    }

    let session = services
        .session
        .sign_up(&email, &secret)
        .await
        .context("Sign-up failed")?;

    if session.email != current_account {
        Config::save_account(&session.email).context("save account to config")?;
        println!("Vault account set to {}", session.email);
    }
    println!("Created and signed in as {}", session.email);
    Ok(())
}

/// Prompts on stderr and reads a secret without echo.
///
/// Falls back to a plain line read when stdin is not a terminal.
fn read_secret(prompt: &str) -> Result<String> {
    let mut err = stderr();
    write!(err, "{prompt}")?;
    err.flush()?;

    if !stdin().is_terminal() {
        let mut line = String::new();
        stdin().read_line(&mut line).context("read password")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    terminal::enable_raw_mode().context("enable raw mode")?;
    let result = read_hidden_line();
    let _ = terminal::disable_raw_mode();
    writeln!(err)?;
    result
}

fn read_hidden_line() -> Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                bail!("Interrupted")
            }
            KeyCode::Esc => bail!("Cancelled"),
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}
