mod api;
mod app;
mod config;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use moviebot_shared::ChatResponse;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::ApiClient;
use app::App;

const CONFIG_FILE: &str = "moviebot.json";
const LOG_FILE: &str = "moviebot.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file; stdout belongs to the terminal UI.
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(".", LOG_FILE));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviebot_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    let config = config::load_config(CONFIG_FILE).await?;
    tracing::info!("Using chat server at {}", config.server_url);

    let client = ApiClient::new(&config.server_url);

    // Requests flow out through one channel, settled exchanges come back on
    // another. Each request runs on its own task, so a second send does not
    // wait behind the first.
    let (req_tx, mut req_rx) = mpsc::channel::<String>(32);
    let (resp_tx, mut resp_rx) = mpsc::channel::<Result<ChatResponse>>(32);

    {
        let client = client.clone();
        let resp_tx = resp_tx.clone();
        tokio::spawn(async move {
            while let Some(text) = req_rx.recv().await {
                let client = client.clone();
                let resp_tx = resp_tx.clone();
                tokio::spawn(async move {
                    tracing::debug!("Sending message ({} chars)", text.len());
                    let result = client.send_message(&text).await;
                    // If this fails the UI is gone; nothing left to deliver to.
                    let _ = resp_tx.send(result).await;
                });
            }
        });
    }

    if config.greeting {
        let client = client.clone();
        let resp_tx = resp_tx.clone();
        tokio::spawn(async move {
            let _ = resp_tx.send(client.send_message("").await).await;
        });
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let mut events = EventStream::new();
    let mut running = true;

    while running {
        terminal.draw(|f| ui::ui(f, &app))?;

        tokio::select! {
            // Settled exchanges
            resp = resp_rx.recv() => {
                if let Some(result) = resp {
                    app.on_response(result);
                }
            }
            // User input
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Esc => running = false,
                            KeyCode::Char(c) if app.input_enabled => app.input.push(c),
                            KeyCode::Backspace if app.input_enabled => {
                                app.input.pop();
                            }
                            KeyCode::Enter if app.input_enabled => {
                                if let Some(text) = app.submit() {
                                    if req_tx.send(text).await.is_err() {
                                        break;
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        running = false;
                    }
                    None => running = false,
                }
            }
        }
    }

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
