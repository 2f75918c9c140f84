//! Radar front-end layer.
//!
//! Everything between the presence engine and the sensor lives here: the
//! register profiles the frame-rate policy switches between, a simulated
//! sensor implementing [`radar_presence_core::FrameSource`], and the async
//! acquisition task that drives frames through the engine.

pub mod acquisition;
pub mod profiles;
pub mod simulated;

pub use acquisition::{spawn, spawn_frame_clock, AcquisitionCommand, AcquisitionHandle};
pub use simulated::{SimTarget, SimulatedRadar};
