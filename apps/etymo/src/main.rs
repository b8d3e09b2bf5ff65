use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lookup_core::{
    ControllerEvent, DisplayState, HttpLookupService, LookupController, LookupState,
    ProbeConnectivity,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast::error::RecvError, oneshot},
    time,
};
use tokio_stream::{wrappers::LinesStream, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod view;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "etymo", about = "Look up word definitions")]
struct Args {
    /// Look up a single word, print the result and exit.
    #[arg(long)]
    word: Option<String>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    lookup_timeout_ms: Option<u64>,
    /// Assume the network is reachable instead of probing it.
    #[arg(long)]
    no_probe: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(v) = args.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = args.lookup_timeout_ms.and_then(config::nonzero_millis) {
        settings.lookup_timeout_ms = v;
    }
    info!(api_base_url = %settings.api_base_url, "starting etymo");

    let service = HttpLookupService::new(&settings.api_base_url)
        .context("failed to build dictionary client")?;
    let controller =
        LookupController::with_options(Arc::new(service), settings.controller_options());

    let probe = (!args.no_probe).then(|| ProbeConnectivity::spawn(settings.probe_options()));
    let _follow = probe
        .as_ref()
        .map(|monitor| controller.follow_connectivity(monitor));

    match args.word {
        Some(word) => {
            if let Some(monitor) = &probe {
                let wait = settings.probe_options().timeout * 2;
                match time::timeout(wait, monitor.first_probe()).await {
                    Ok(is_connected) => {
                        controller.on_connectivity_changed(is_connected).await;
                    }
                    Err(_) => warn!("no connectivity result before lookup"),
                }
            }
            controller.set_query(word).await;
            let state = controller.settled().await;
            print_display(&state.display_state());
            Ok(())
        }
        None => run_interactive(controller).await,
    }
}

async fn run_interactive(controller: Arc<LookupController>) -> Result<()> {
    println!(
        "{} ({}: type and press enter, empty line clears)",
        view::TITLE,
        view::PROMPT
    );

    let mut events = controller.subscribe();
    let mut last = controller.display_state().await;
    print_display(&last);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let renderer = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Ok(ControllerEvent::StateChanged(state)) => render_if_changed(&state, &mut last),
                    Err(RecvError::Lagged(skipped)) => warn!(skipped, "renderer fell behind"),
                    Err(RecvError::Closed) => break,
                },
                _ = &mut stop_rx => {
                    while let Ok(ControllerEvent::StateChanged(state)) = events.try_recv() {
                        render_if_changed(&state, &mut last);
                    }
                    break;
                }
            }
        }
    });

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    while let Some(line) = lines.next().await {
        let line = line.context("failed to read query from stdin")?;
        controller.set_query(line).await;
    }

    controller.settled().await;
    let _ = stop_tx.send(());
    renderer.await.context("renderer task failed")?;
    Ok(())
}

fn render_if_changed(state: &LookupState, last: &mut DisplayState) {
    let display = state.display_state();
    if display != *last {
        print_display(&display);
        *last = display;
    }
}

fn print_display(display: &DisplayState) {
    println!();
    for line in view::render(display) {
        println!("{line}");
    }
}
