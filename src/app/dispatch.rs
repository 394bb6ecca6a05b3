use crate::cli::commands::{Cli, Commands, SettingsCommands, TargetArgs};
use crate::config::{RelayConfig, Settings};
use crate::delivery::{DeliveryClient, SendRequest, send_page, status_text};
use crate::extract::extract;
use crate::transport::relay::{CommandAction, RelayState, run_relay};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

fn settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Settings::default_path().context("locate settings file"),
    }
}

async fn run_relay_command(port: Option<u16>, host: Option<String>) -> Result<()> {
    let mut config = RelayConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }

    if config.port == 0 {
        info!("Starting relay on {} (random port)", config.host);
    } else {
        info!("Starting relay on {}:{}", config.host, config.port);
    }
    let action = Arc::new(CommandAction::new(config.action_program.clone()));
    let state = RelayState::new(&config, action);
    run_relay(&config.host, config.port, state).await
}

async fn run_extract(target: &TargetArgs) -> Result<()> {
    let tab = target.require_tab()?;
    let result = extract(&*tab, target.options()).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("encode extraction result")?
    );
    Ok(())
}

async fn run_send(target: &TargetArgs, message: String, settings: &Path) -> Result<()> {
    let settings = Settings::load(settings)?;
    let tab = target.open_tab()?;
    let request = SendRequest {
        message,
        selection_override: target.selection.clone(),
        options: target.options(),
    };

    let outcome = send_page(tab.as_deref(), &settings, &DeliveryClient::new(), &request).await;
    let status = status_text(&outcome);
    match outcome {
        Ok(_) => {
            println!("{status}");
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context(status)),
    }
}

fn run_settings(command: SettingsCommands, path: &Path) -> Result<()> {
    let mut settings = Settings::load(path)?;
    match command {
        SettingsCommands::Show => {
            println!("Settings: {}", path.display());
            let webhook = if settings.is_configured() {
                settings.webhook_url.trim()
            } else {
                "(not set)"
            };
            println!("  webhook_url:  {webhook}");
            println!("  auth_token:   {}", settings.masked_token());
            println!("  display_name: {}", settings.display_name());
        }
        SettingsCommands::Set {
            webhook_url,
            auth_token,
            display_name,
        } => {
            if let Some(webhook_url) = webhook_url {
                settings.webhook_url = webhook_url;
            }
            if let Some(auth_token) = auth_token {
                settings.auth_token = auth_token;
            }
            if let Some(display_name) = display_name {
                settings.display_name = display_name;
            }
            settings.trimmed().save(path)?;
            println!("Saved.");
        }
    }
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Relay { port, host } => run_relay_command(port, host).await,
        Commands::Extract { target } => run_extract(&target).await,
        Commands::Send {
            target,
            message,
            settings,
        } => run_send(&target, message, &settings_path(settings)?).await,
        Commands::Settings { settings, command } => {
            run_settings(command, &settings_path(settings)?)
        }
    }
}
