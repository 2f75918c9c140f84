//! Trait boundary towards the radar front-end.
//!
//! The presence engine never talks to hardware directly. Everything it needs
//! from the sensor driver is captured by [`FrameSource`]: frame generation
//! control, one-frame fetch, and full reconfiguration with a register
//! profile. The shipped implementation is a simulator; a real SPI driver
//! plugs in behind the same trait.

use crate::error::PresenceResult;

/// A complete radar front-end configuration: the register list programmed
/// into the device and the FIFO fill level that triggers the frame
/// interrupt. Profiles live in static tables and are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterProfile {
    /// Human-readable profile name for logs.
    pub name: &'static str,
    /// Raw register words, written in order during reconfiguration.
    pub registers: &'static [u32],
    /// FIFO limit in samples; the sensor raises its interrupt at this fill.
    pub fifo_limit: u32,
}

/// Supplier of raw fast-time sample frames.
///
/// Contract (see the acquisition task for the driving side):
/// - `fetch_frame` fills `out` with exactly `out.len()` real-valued samples
///   for one frame. A failed fetch is a recoverable per-cycle error; the
///   caller skips the cycle and waits for the next wake.
/// - `start`/`stop` control frame generation. `stop` is synchronous: once it
///   returns, no further frame becomes ready.
/// - `apply_profile` performs the full reconfiguration sequence
///   (stop -> write register list -> set FIFO limit -> restart) as one
///   atomic operation from the algorithm's perspective.
pub trait FrameSource: Send {
    /// Begin frame generation.
    fn start(&mut self) -> PresenceResult<()>;

    /// Stop frame generation. No frame may be delivered after this returns.
    fn stop(&mut self) -> PresenceResult<()>;

    /// Fetch the most recent frame into `out`.
    fn fetch_frame(&mut self, out: &mut [f32]) -> PresenceResult<()>;

    /// Reprogram the front-end with `profile` and restart frame generation.
    fn apply_profile(&mut self, profile: &RegisterProfile) -> PresenceResult<()>;

    /// Profile currently programmed into the device.
    fn active_profile(&self) -> &'static str;
}
