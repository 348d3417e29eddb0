use std::sync::Arc;

use anyhow::Result;
use client::{ApiClient, FileTokenStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use fleet_admin_console::app::{App, AppSettings, Services};
use fleet_admin_console::config::Config;
use fleet_admin_console::error::ConsoleError;
use fleet_admin_console::logging::init_logging;
use fleet_admin_console::screens::Outcome;
use fleet_admin_console::session::Session;

async fn print(out: &mut tokio::io::Stdout, text: &str) -> Result<(), ConsoleError> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n> ").await?;
    out.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(ConsoleError::from)?;

    init_logging(&config.logging)?;

    info!(
        base_url = %config.backend.base_url,
        "Starting fleet admin console v{}",
        env!("CARGO_PKG_VERSION")
    );

    let tokens = Arc::new(FileTokenStore::new(&config.session.token_file));
    let session = Session::new(tokens.clone());
    if !session.is_signed_in() {
        warn!(
            token_file = %config.session.token_file.display(),
            "No session token found, requests will be unauthenticated"
        );
    }

    let api = ApiClient::new(&config.http(), tokens).map_err(ConsoleError::from)?;
    let mut app = App::new(
        Services::rest(api),
        session,
        AppSettings {
            page_size: config.listing.page_size,
            search_debounce: config.search_debounce(),
        },
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.start().await;
    print(&mut stdout, &app.render()).await?;

    loop {
        let deadline = app.search_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(ConsoleError::from)? else {
                    info!("Input closed");
                    break;
                };
                let outcome = app.handle_line(&line).await;
                print(&mut stdout, &app.render()).await?;
                match outcome {
                    Outcome::Continue => {}
                    Outcome::Logout => {
                        info!("Session ended");
                        break;
                    }
                    Outcome::Quit => break,
                }
            }
            _ = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                if app.run_due_search(tokio::time::Instant::now()).await {
                    print(&mut stdout, &app.render()).await?;
                }
            }
        }
    }

    Ok(())
}
