//! Frame-rate policy over presence events.
//!
//! In `MicroIfMacro` mode the radar only needs its high frame rate while a
//! macro movement is being tracked; absence can be watched at a low frame
//! rate to save power. This module decides when to reprogram the front-end
//! and delegates the actual register rewrite to a caller-supplied
//! reconfigure function, which performs stop / write registers / set FIFO
//! limit / restart as one atomic sequence.

use radar_presence_core::{
    PresenceEvent, PresenceMode, PresenceResult, PresenceState, RegisterProfile,
};

/// Outcome of one [`ConfigOptimizer::optimize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerStatus {
    /// The active profile already fits the situation.
    NoChange,
    /// The front-end was reprogrammed with a new profile.
    Reconfigured,
    /// Reconfiguration was attempted and failed; the previous profile is
    /// assumed to still be active.
    Failed,
}

/// Which of the two register profiles is programmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameRate {
    Low,
    High,
}

/// Reconfiguration hook; programs `profile` into the radar front-end.
pub type ReconfigureFn = Box<dyn FnMut(&RegisterProfile) -> PresenceResult<()> + Send>;

/// Decides between the low and high frame-rate register profiles based on
/// the latest presence event.
pub struct ConfigOptimizer {
    low: &'static RegisterProfile,
    high: &'static RegisterProfile,
    reconfigure: ReconfigureFn,
    mode: PresenceMode,
    current: FrameRate,
}

impl ConfigOptimizer {
    /// Create an optimizer. The high frame-rate profile is assumed active,
    /// matching the profile programmed at sensor bring-up.
    pub fn new(
        low: &'static RegisterProfile,
        high: &'static RegisterProfile,
        reconfigure: ReconfigureFn,
    ) -> Self {
        Self {
            low,
            high,
            reconfigure,
            mode: PresenceMode::MicroIfMacro,
            current: FrameRate::High,
        }
    }

    /// Name of the profile the optimizer believes is programmed.
    pub fn active_profile(&self) -> &'static str {
        match self.current {
            FrameRate::Low => self.low.name,
            FrameRate::High => self.high.name,
        }
    }

    /// Record a mode change.
    ///
    /// Leaving `MicroIfMacro` pins the high frame-rate profile: the other
    /// modes have no absence phase the low rate could exploit.
    pub fn set_operational_mode(&mut self, mode: PresenceMode) -> OptimizerStatus {
        self.mode = mode;
        if mode != PresenceMode::MicroIfMacro && self.current != FrameRate::High {
            return self.switch_to(FrameRate::High);
        }
        OptimizerStatus::NoChange
    }

    /// Apply the policy for the latest presence event.
    ///
    /// Only meaningful in `MicroIfMacro` mode: a macro detection at the low
    /// rate switches high; a return to absence at the high rate switches
    /// low. Every other combination keeps the active profile.
    pub fn optimize(&mut self, last_event: &PresenceEvent) -> OptimizerStatus {
        if self.mode != PresenceMode::MicroIfMacro {
            return OptimizerStatus::NoChange;
        }

        match (self.current, last_event.state) {
            (FrameRate::Low, PresenceState::MacroPresence) => self.switch_to(FrameRate::High),
            (FrameRate::High, PresenceState::Absence) => self.switch_to(FrameRate::Low),
            _ => OptimizerStatus::NoChange,
        }
    }

    fn switch_to(&mut self, target: FrameRate) -> OptimizerStatus {
        let profile = match target {
            FrameRate::Low => self.low,
            FrameRate::High => self.high,
        };
        match (self.reconfigure)(profile) {
            Ok(()) => {
                tracing::info!(profile = profile.name, "radar reconfigured");
                self.current = target;
                OptimizerStatus::Reconfigured
            }
            Err(err) => {
                tracing::warn!(profile = profile.name, error = %err, "radar reconfiguration failed");
                OptimizerStatus::Failed
            }
        }
    }
}

impl std::fmt::Debug for ConfigOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigOptimizer")
            .field("mode", &self.mode)
            .field("current", &self.current)
            .finish()
    }
}
