use std::sync::Arc;

use recipe_client::terminal::{ConsoleNotifier, Terminal};
use recipe_client::ui::PageId;
use recipe_client::{App, Config, RecipeClient, SessionStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the page output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    tracing::info!("Using recipe backend at {}", config.base_url);

    // The session lives exactly as long as this process
    let session = SessionStore::in_memory();
    let client = RecipeClient::new(config.base_url.clone(), session);

    let notifier = ConsoleNotifier::new();
    let app = App::new(client, Arc::new(notifier.clone()), PageId::Login);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down...");
            ctrl_c.cancel();
        }
    });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut terminal = Terminal::new(app, notifier, stdin, tokio::io::stdout());
    terminal.run(cancel).await?;

    Ok(())
}
