use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use wikisearch::api::create_router;
use wikisearch::client::HttpSearchClient;
use wikisearch::config::CONFIG;
use wikisearch::controller::ControllerOptions;
use wikisearch::session::{SearchSession, search_once};

#[derive(Parser)]
#[command(name = "wikisearch", about = "Search widget over a remote search API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the widget's host page
    Serve {
        /// Address to listen on (defaults to BIND_ADDR)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one search cycle and print the rendered results region
    Search {
        query: String,
        /// Print the whole view as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = &*CONFIG;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .init();

    let client = HttpSearchClient::from_config(config)?;
    let options = ControllerOptions {
        discard_superseded: config.discard_superseded,
    };

    match cli.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind_addr.clone());
            let cancel = CancellationToken::new();
            let session = SearchSession::spawn(Arc::new(client), options, cancel.clone());

            let listener = tokio::net::TcpListener::bind(&bind).await?;
            tracing::info!("listening on http://{}", listener.local_addr()?);

            let shutdown = cancel.clone();
            axum::serve(listener, create_router(session))
                .with_graceful_shutdown(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::error!("failed to listen for ctrl-c: {e}");
                    }
                    shutdown.cancel();
                })
                .await?;
        }
        Command::Search { query, json } => {
            let view = search_once(&client, &query, options).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.results_html);
            }
        }
    }
    Ok(())
}
