//! Entry point wiring the engine, simulated sensor and console together.

use std::sync::Arc;

use clap::Parser;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Notify};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use radar_presence_cli::console::{self, ConsoleCommand};
use radar_presence_cli::{Cli, Scene};
use radar_presence_core::{FrameSource, RegisterProfile};
use radar_presence_engine::{ConfigOptimizer, PresenceConfig, PresenceEngine};
use radar_presence_hardware::profiles::{HIGH_FRAME_RATE, LOW_FRAME_RATE};
use radar_presence_hardware::{
    acquisition, AcquisitionCommand, SimTarget, SimulatedRadar,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = PresenceConfig::default();
    let num_samples = config.num_samples_per_chirp;
    let engine = Arc::new(Mutex::new(PresenceEngine::new(config)?));
    let bin_length = engine.lock().bin_length();

    let mut radar = SimulatedRadar::new(num_samples);
    match cli.scene {
        Scene::Empty => {}
        Scene::Stationary => radar.add_target(SimTarget::stationary(3, 1.5)),
        Scene::Breathing => radar.add_target(SimTarget::breathing(3, 1.5)),
    }
    let source = Arc::new(Mutex::new(radar));

    let reconfigure_source = Arc::clone(&source);
    let optimizer = ConfigOptimizer::new(
        &LOW_FRAME_RATE,
        &HIGH_FRAME_RATE,
        Box::new(move |profile: &RegisterProfile| {
            reconfigure_source.lock().apply_profile(profile)
        }),
    );

    let frame_ready = Arc::new(Notify::new());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let handle = acquisition::spawn(
        Arc::clone(&engine),
        Arc::clone(&source),
        Arc::clone(&frame_ready),
        optimizer,
        event_tx,
    );
    let clock = acquisition::spawn_frame_clock(Arc::clone(&source), frame_ready);

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if event.range_bin >= 0 {
                println!(
                    "[{:>8} ms] {} at bin {} ({:.2} m)",
                    event.timestamp_ms,
                    event.state.as_str(),
                    event.range_bin,
                    event.range_bin as f32 * bin_length,
                );
            } else {
                println!("[{:>8} ms] {}", event.timestamp_ms, event.state.as_str());
            }
        }
    });

    if cli.run {
        handle.commands.send(AcquisitionCommand::Run).await?;
    }
    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match console::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("error: {message}");
                continue;
            }
        };

        match command {
            ConsoleCommand::Run => handle.commands.send(AcquisitionCommand::Run).await?,
            ConsoleCommand::Stop => handle.commands.send(AcquisitionCommand::Stop).await?,
            ConsoleCommand::Status => println!("{}", console::status_text(&engine)),
            ConsoleCommand::Help => println!("{}", console::HELP),
            ConsoleCommand::Exit => break,
            _ => match console::apply(&engine, &command) {
                Ok(()) => {
                    println!("ok");
                    if let ConsoleCommand::SetMode(mode) = command {
                        handle
                            .commands
                            .send(AcquisitionCommand::ModeChanged(mode))
                            .await?;
                    }
                }
                Err(message) => eprintln!("error: {message}"),
            },
        }
    }

    handle.commands.send(AcquisitionCommand::Shutdown).await?;
    handle.join.await?;
    clock.abort();
    printer.abort();
    Ok(())
}
