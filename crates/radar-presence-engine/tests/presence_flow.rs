//! End-to-end detector scenarios driven through the public spectrum entry
//! point: the macro -> micro -> absence hand-off, the frame-rate policy
//! riding on those events, and flicker suppression in the decimated path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use num_complex::Complex32;
use radar_presence_core::{PresenceEvent, PresenceMode, PresenceState, RegisterProfile};
use radar_presence_engine::{ConfigOptimizer, OptimizerStatus, PresenceConfig, PresenceEngine};

static LOW: RegisterProfile = RegisterProfile {
    name: "low_frame_rate",
    registers: &[0x1000_0001],
    fifo_limit: 2048,
};
static HIGH: RegisterProfile = RegisterProfile {
    name: "high_frame_rate",
    registers: &[0x1000_0003],
    fifo_limit: 8192,
};

fn collect_events(engine: &mut PresenceEngine) -> Arc<Mutex<Vec<PresenceEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    engine.set_callback(Some(Box::new(move |ev: &PresenceEvent| {
        sink.lock().unwrap().push(*ev);
    })));
    events
}

/// A person walks in at bin 3, stops moving, breathes for a while, leaves.
/// The engine must report macro presence, hand over to micro presence at the
/// same bin, and finally report absence once the seeded validity expires.
/// The optimizer must switch to the low frame rate exactly once, on the
/// absence event.
#[test]
fn test_micro_if_macro_full_cycle() {
    let config = PresenceConfig::builder()
        .mode(PresenceMode::MicroIfMacro)
        .micro_fft_size(16)
        .build();
    let mut engine = PresenceEngine::new(config).unwrap();
    let events = collect_events(&mut engine);

    let to_low = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&to_low);
    let mut optimizer = ConfigOptimizer::new(
        &LOW,
        &HIGH,
        Box::new(move |profile: &RegisterProfile| {
            if profile.name == "low_frame_rate" {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }),
    );

    let mut statuses = Vec::new();
    let mut seen = 0;
    for k in 1..=70u64 {
        let t = 100 * k;
        let mut spectrum = vec![Complex32::ZERO; 64];
        if t >= 800 {
            spectrum[3] = Complex32::new(2.0, 0.0);
        }
        engine.process_spectrum(&spectrum, t).unwrap();

        // every event triggers one optimizer decision, in order
        let snapshot = events.lock().unwrap().clone();
        for ev in &snapshot[seen..] {
            statuses.push(optimizer.optimize(ev));
        }
        seen = snapshot.len();
    }

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3, "unexpected events: {events:?}");

    assert_eq!(events[0].state, PresenceState::MacroPresence);
    assert_eq!(events[0].range_bin, 3);
    assert_eq!(events[0].timestamp_ms, 900);

    assert_eq!(events[1].state, PresenceState::MicroPresence);
    assert_eq!(events[1].range_bin, 3);
    assert_eq!(events[1].timestamp_ms, 2100);

    assert_eq!(events[2].state, PresenceState::Absence);
    assert_eq!(events[2].range_bin, -1);
    assert_eq!(engine.state(), PresenceState::Absence);

    // one switch down, no switching while presence was held at high rate
    assert_eq!(to_low.load(Ordering::SeqCst), 1);
    assert_eq!(
        statuses,
        vec![
            OptimizerStatus::NoChange,
            OptimizerStatus::NoChange,
            OptimizerStatus::Reconfigured,
        ]
    );
    assert_eq!(optimizer.active_profile(), "low_frame_rate");
}

/// Two micro targets at bins 2 and 3. After bin 2 is reported and its
/// movement stops, bin 3 may only be reported once its validity expiry is
/// more than 2 s past bin 2's, so the report cannot flicker between bins.
#[test]
fn test_decimated_micro_reporting_does_not_flicker() {
    let config = PresenceConfig::builder()
        .mode(PresenceMode::MicroOnly)
        .micro_fft_decimation_enabled(true)
        .micro_fft_size(16)
        .micro_threshold(5.0)
        .micro_movement_validity_ms(500)
        .build();
    let mut engine = PresenceEngine::new(config).unwrap();
    let events = collect_events(&mut engine);

    // Per-frame rotation of 2*pi/64 lands on Doppler bin 2 of the 16-row
    // decimated slow-time window (factor 8) and sits inside the decimator's
    // pass band.
    let mut bin2_active = true;
    for k in 1..=1200u64 {
        let t = 10 * k;
        let phase = 2.0 * std::f32::consts::PI * k as f32 / 64.0;
        let rot = Complex32::new(phase.cos(), phase.sin());

        let mut spectrum = vec![Complex32::ZERO; 64];
        if bin2_active {
            spectrum[2] = 5.0 * rot;
        }
        spectrum[3] = 3.0 * rot;
        engine.process_spectrum(&spectrum, t).unwrap();

        if bin2_active {
            let events = events.lock().unwrap();
            if events
                .iter()
                .any(|ev| ev.state == PresenceState::MicroPresence && ev.range_bin == 2)
            {
                // stronger target stops moving once it has been reported
                bin2_active = false;
            }
        }
    }

    let events = events.lock().unwrap();
    let micro_events: Vec<&PresenceEvent> = events
        .iter()
        .filter(|ev| ev.state == PresenceState::MicroPresence)
        .collect();

    assert!(!micro_events.is_empty(), "no micro events: {events:?}");
    assert_eq!(
        micro_events[0].range_bin, 2,
        "strongest bin must be reported first: {events:?}"
    );

    let bin3 = micro_events
        .iter()
        .find(|ev| ev.range_bin == 3)
        .expect("bin 3 must eventually be reported");
    assert!(
        bin3.timestamp_ms - micro_events[0].timestamp_ms > 2000,
        "bin 3 reported {} ms after bin 2",
        bin3.timestamp_ms - micro_events[0].timestamp_ms
    );

    // the hand-off passes through absence while bin 3 is suppressed
    let bin2_pos = events
        .iter()
        .position(|ev| ev.state == PresenceState::MicroPresence && ev.range_bin == 2)
        .unwrap();
    let bin3_pos = events
        .iter()
        .position(|ev| ev.state == PresenceState::MicroPresence && ev.range_bin == 3)
        .unwrap();
    assert!(events[bin2_pos..bin3_pos]
        .iter()
        .any(|ev| ev.state == PresenceState::Absence));
}
