//! Frame acquisition and processing task.
//!
//! One high-priority task owns the frame loop: it blocks on the frame-ready
//! notification, fetches the frame under the source lock, runs the presence
//! engine and feeds every emitted event to the configuration optimizer and
//! to the outward event channel. The notification is a wake signal, not a
//! queue; multiple signals before service collapse into one, and stale
//! signals are drained around start/stop so an old frame can never leak
//! into a new capture session.
//!
//! Configuration commands arrive over a channel and are handled between
//! frames, so a config mutation never races a `process_frame` call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use radar_presence_core::{FrameSource, PresenceEvent, PresenceMode};
use radar_presence_engine::{ConfigOptimizer, PresenceEngine};

use crate::simulated::SimulatedRadar;

/// Stall detection window while actively capturing.
const CAPTURE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Commands handled by the acquisition task between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionCommand {
    /// Start frame generation and processing; resets the engine first.
    Run,
    /// Stop frame generation. Synchronous from the algorithm's perspective:
    /// no frame is processed after the command is handled.
    Stop,
    /// The operating mode changed; re-trigger the frame-rate policy.
    ModeChanged(PresenceMode),
    /// Stop and exit the task.
    Shutdown,
}

/// Handle to a spawned acquisition task.
pub struct AcquisitionHandle {
    /// Command channel into the task.
    pub commands: mpsc::Sender<AcquisitionCommand>,
    /// Frames successfully processed since spawn.
    pub frames_processed: Arc<AtomicU64>,
    /// The task itself.
    pub join: JoinHandle<()>,
}

/// Spawn the acquisition task.
///
/// The task takes ownership of the engine callback slot, forwarding events
/// to `events` in detection order. `optimizer` decides frame-rate switches;
/// its reconfigure hook typically locks the same `source`.
pub fn spawn<S: FrameSource + 'static>(
    engine: Arc<Mutex<PresenceEngine>>,
    source: Arc<Mutex<S>>,
    frame_ready: Arc<Notify>,
    mut optimizer: ConfigOptimizer,
    events: mpsc::UnboundedSender<PresenceEvent>,
) -> AcquisitionHandle {
    let (command_tx, mut command_rx) = mpsc::channel(16);
    let frames_processed = Arc::new(AtomicU64::new(0));
    let frames = Arc::clone(&frames_processed);

    // Events surface through the engine callback during process_frame; the
    // internal channel carries them out of the lock so the optimizer runs
    // without holding the engine.
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel();
    {
        let tx = internal_tx.clone();
        engine.lock().set_callback(Some(Box::new(move |ev: &PresenceEvent| {
            let _ = tx.send(*ev);
        })));
    }

    let num_samples = engine.lock().config().num_samples_per_chirp;

    let join = tokio::spawn(async move {
        let started = Instant::now();
        let mut frame = vec![0.0f32; num_samples];
        let mut running = false;

        loop {
            tokio::select! {
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(AcquisitionCommand::Run) => {
                            drain_stale(&frame_ready).await;
                            match source.lock().start() {
                                Ok(()) => {
                                    engine.lock().reset();
                                    running = true;
                                    tracing::info!("frame acquisition started");
                                }
                                Err(err) => {
                                    tracing::error!(error = %err, "failed to start frame generation");
                                }
                            }
                        }
                        Some(AcquisitionCommand::Stop) => {
                            if let Err(err) = source.lock().stop() {
                                tracing::warn!(error = %err, "failed to stop frame generation");
                            }
                            drain_stale(&frame_ready).await;
                            running = false;
                            tracing::info!("frame acquisition stopped");
                        }
                        Some(AcquisitionCommand::ModeChanged(mode)) => {
                            optimizer.set_operational_mode(mode);
                        }
                        Some(AcquisitionCommand::Shutdown) | None => {
                            let _ = source.lock().stop();
                            break;
                        }
                    }
                }
                wake = tokio::time::timeout(CAPTURE_TIMEOUT, frame_ready.notified()), if running => {
                    if wake.is_err() {
                        tracing::warn!("no frame within capture timeout");
                        continue;
                    }

                    let time_ms = started.elapsed().as_millis() as u64;
                    let fetched = source.lock().fetch_frame(&mut frame);
                    match fetched {
                        Err(err) => {
                            // no frame this cycle; wait for the next wake
                            tracing::warn!(error = %err, "frame fetch failed, skipping cycle");
                        }
                        Ok(()) => {
                            if let Err(err) = engine.lock().process_frame(&frame, time_ms) {
                                tracing::error!(error = %err, "frame processing failed");
                                continue;
                            }
                            frames.fetch_add(1, Ordering::Relaxed);

                            while let Ok(event) = internal_rx.try_recv() {
                                optimizer.optimize(&event);
                                let _ = events.send(event);
                            }
                        }
                    }
                }
            }
        }
    });

    AcquisitionHandle {
        commands: command_tx,
        frames_processed,
        join,
    }
}

/// Discard any pending frame notification.
async fn drain_stale(notify: &Notify) {
    while tokio::time::timeout(Duration::ZERO, notify.notified())
        .await
        .is_ok()
    {}
}

/// Frame clock for the simulator: signals `frame_ready` at the period of
/// the profile currently programmed, standing in for the sensor's FIFO
/// interrupt.
pub fn spawn_frame_clock(
    source: Arc<Mutex<SimulatedRadar>>,
    frame_ready: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let period = {
                let radar = source.lock();
                radar.is_running().then(|| radar.frame_period_ms())
            };
            match period {
                Some(ms) => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    frame_ready.notify_one();
                }
                None => tokio::time::sleep(Duration::from_millis(20)).await,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{HIGH_FRAME_RATE, LOW_FRAME_RATE};
    use radar_presence_core::RegisterProfile;
    use radar_presence_engine::PresenceConfig;

    fn test_rig() -> (
        Arc<Mutex<PresenceEngine>>,
        Arc<Mutex<SimulatedRadar>>,
        AcquisitionHandle,
        mpsc::UnboundedReceiver<PresenceEvent>,
        JoinHandle<()>,
    ) {
        let engine = Arc::new(Mutex::new(
            PresenceEngine::new(PresenceConfig::default()).unwrap(),
        ));
        let source = Arc::new(Mutex::new(SimulatedRadar::new(128)));
        let frame_ready = Arc::new(Notify::new());

        let reconfigure_source = Arc::clone(&source);
        let optimizer = ConfigOptimizer::new(
            &LOW_FRAME_RATE,
            &HIGH_FRAME_RATE,
            Box::new(move |profile: &RegisterProfile| {
                reconfigure_source.lock().apply_profile(profile)
            }),
        );

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handle = spawn(
            Arc::clone(&engine),
            Arc::clone(&source),
            Arc::clone(&frame_ready),
            optimizer,
            event_tx,
        );
        let clock = spawn_frame_clock(Arc::clone(&source), frame_ready);
        (engine, source, handle, event_rx, clock)
    }

    #[tokio::test]
    async fn test_run_processes_frames_and_stop_halts() {
        let (_engine, _source, handle, _events, clock) = test_rig();

        handle.commands.send(AcquisitionCommand::Run).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.frames_processed.load(Ordering::Relaxed) > 0);

        handle.commands.send(AcquisitionCommand::Stop).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let after_stop = handle.frames_processed.load(Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(handle.frames_processed.load(Ordering::Relaxed), after_stop);

        handle.commands.send(AcquisitionCommand::Shutdown).await.unwrap();
        handle.join.await.unwrap();
        clock.abort();
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_cycle_and_recovers() {
        let (_engine, source, handle, _events, clock) = test_rig();

        source.lock().inject_fetch_failures(3);
        handle.commands.send(AcquisitionCommand::Run).await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;

        // failed cycles were skipped, later cycles still processed
        assert!(handle.frames_processed.load(Ordering::Relaxed) > 0);

        handle.commands.send(AcquisitionCommand::Shutdown).await.unwrap();
        handle.join.await.unwrap();
        clock.abort();
    }
}
