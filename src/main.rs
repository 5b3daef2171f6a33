//! Demo application: registers a handful of slash commands and serves the
//! interaction webhook endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::error;

use discord_app::entity::{ApplicationCommand, InteractionResponse};
use discord_app::{App, Client, Config, Result};

fn version_command() -> ApplicationCommand {
    ApplicationCommand {
        name_localizations: Some(HashMap::from([("zh-TW".to_string(), "顯示程式版本".to_string())])),
        description_localizations: Some(HashMap::from([(
            "zh-TW".to_string(),
            "顯示程式版本".to_string(),
        )])),
        ..ApplicationCommand::chat_input("version", "Show application version")
    }
}

fn whoami_command() -> ApplicationCommand {
    ApplicationCommand {
        name_localizations: Some(HashMap::from([("zh-TW".to_string(), "顯示個人資訊".to_string())])),
        description_localizations: Some(HashMap::from([(
            "zh-TW".to_string(),
            "包含用戶名稱、ID".to_string(),
        )])),
        ..ApplicationCommand::chat_input("whoami", "Show information about the command issuer")
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let mut client = Client::new(config.application_id.clone())?;
    if let Some(ref token) = config.bot_token {
        client = client.with_token(token.clone());
    }

    let mut app = App::new(client, &config.public_key)?;

    app.register_command(version_command(), |_interaction| {
        Ok(InteractionResponse::content(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )))
    });

    app.register_command(whoami_command(), |interaction| {
        let content = match interaction.invoking_user() {
            Some(user) => format!("Username: {}\nUser id: {}", user.username, user.id),
            None => "No such data can be fetched".to_string(),
        };
        Ok(InteractionResponse::content(content))
    });

    // Mirror the local registry to the platform when credentials allow it.
    if app.client().is_authorized() {
        app.sync_commands().await?;
    }

    discord_app::server::serve(Arc::new(app), config.bind_addr, &config.endpoint).await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        error!(error = %e, "application failed");
        std::process::exit(1);
    }
}
