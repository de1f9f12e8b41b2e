//! Learning Buddy terminal client - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing (stderr, so the chat on stdout stays readable)
//! 3. Build the REST backend client
//! 4. Log in, open the chat session and deliver any queued message
//! 5. Run the interactive loop on stdin

mod cli;
mod repl;

use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use buddy_chat::{AppContext, LearningBackend};
use buddy_client::HttpBackend;
use buddy_core::config::BuddyConfig;

use crate::cli::CliArgs;
use crate::repl::{help_text, Repl};

#[tokio::main]
async fn main() -> buddy_core::Result<()> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = BuddyConfig::load_or_default(&config_file);
    args.apply(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Learning Buddy v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    if args.save_config {
        config.save(&config_file)?;
    }

    // Backend.
    let backend = match HttpBackend::from_config(&config.api) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(url = %config.api.base_url, error = %e, "Invalid backend URL");
            return Err(e.into());
        }
    };
    tracing::info!(url = %backend.base_url(), "Backend client ready");
    let backend: Arc<dyn LearningBackend> = Arc::new(backend);

    // Session.
    let mut ctx = AppContext::new(config.user.default_email.clone());
    ctx.login();
    if args.summarize {
        ctx.request_summary();
    } else if let Some(ref message) = args.message {
        ctx.set_pending_message(message.clone());
    }

    println!("Learning Buddy ({})", ctx.user_email());
    println!("{}\n", help_text());

    let session = ctx.open_chat(backend).await?;

    let stdout = std::io::stdout();
    let mut repl = Repl::new(session.as_ref(), stdout.lock());
    repl.run(BufReader::new(tokio::io::stdin())).await?;

    ctx.logout();
    tracing::info!("Learning Buddy stopped");
    Ok(())
}
