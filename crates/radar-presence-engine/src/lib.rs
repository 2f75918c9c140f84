//! Presence detection engine for FMCW radar frames.
//!
//! The engine consumes raw fast-time sample frames together with a
//! millisecond timestamp and emits discrete presence transitions: macro
//! movement (a person entering or moving), micro movement (breathing, small
//! gestures) and absence. Detections carry per-bin validity windows so that
//! the reported state has hysteresis rather than flickering frame to frame.
//!
//! [`ConfigOptimizer`] sits next to the engine and decides when the radar
//! front-end should be reprogrammed between its low and high frame-rate
//! register profiles.
//!
//! # Example
//!
//! ```rust
//! use radar_presence_engine::{PresenceConfig, PresenceEngine};
//!
//! let mut engine = PresenceEngine::new(PresenceConfig::default()).unwrap();
//! engine.set_callback(Some(Box::new(|event| {
//!     println!("{:?} at bin {}", event.state, event.range_bin);
//! })));
//! let frame = vec![0.0f32; 128];
//! engine.process_frame(&frame, 0).unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod optimizer;

pub use config::{PresenceConfig, PresenceConfigBuilder};
pub use engine::{EventCallback, PresenceEngine};
pub use optimizer::{ConfigOptimizer, OptimizerStatus, ReconfigureFn};
