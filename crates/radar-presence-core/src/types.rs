//! Presence states, operating modes and the event type.

use serde::{Deserialize, Serialize};

/// Milliseconds since boot. Monotonically non-decreasing; supplied by the
/// frame source together with each frame.
pub type Timestamp = u64;

/// Maximum range the detector ever evaluates, in meters. Together with the
/// configured bandwidth this bounds the highest usable range-bin index.
pub const MAX_RANGE_LIMIT_M: f32 = 5.0;

/// Speed of light in m/s.
const SPEED_OF_LIGHT: f32 = 299_792_458.0;

/// Physical length of one range bin in meters for the given chirp bandwidth.
#[inline]
pub fn range_resolution(bandwidth_hz: f32) -> f32 {
    SPEED_OF_LIGHT / (2.0 * bandwidth_hz)
}

/// Detection state reported by the presence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceState {
    /// No target in the observed range.
    Absence,
    /// Large-scale movement (a person entering or moving through the field).
    MacroPresence,
    /// Small-scale movement only (breathing, fine gestures).
    MicroPresence,
}

impl PresenceState {
    /// Short human-readable tag used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceState::Absence => "absence",
            PresenceState::MacroPresence => "macro_presence",
            PresenceState::MicroPresence => "micro_presence",
        }
    }
}

/// Which detectors participate in the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceMode {
    /// Macro detector only; micro evaluation is skipped entirely.
    MacroOnly,
    /// Micro detector only; macro comparison is skipped.
    MicroOnly,
    /// Macro first; micro is evaluated only once macro has fired.
    MicroIfMacro,
    /// Both detectors run unconditionally.
    MicroAndMacro,
}

impl PresenceMode {
    /// Parse the CLI spelling of a mode.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "macro" | "macro_only" => Some(PresenceMode::MacroOnly),
            "micro" | "micro_only" => Some(PresenceMode::MicroOnly),
            "micro_if_macro" => Some(PresenceMode::MicroIfMacro),
            "micro_and_macro" => Some(PresenceMode::MicroAndMacro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceMode::MacroOnly => "macro_only",
            PresenceMode::MicroOnly => "micro_only",
            PresenceMode::MicroIfMacro => "micro_if_macro",
            PresenceMode::MicroAndMacro => "micro_and_macro",
        }
    }
}

/// A presence transition delivered to the registered callback.
///
/// Events are ephemeral: the engine does not retain them after the callback
/// returns. `timestamp_ms` is the time the underlying detection was made
/// (recovered from the stored validity expiry), not the time of delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEvent {
    /// Detection time in milliseconds since boot.
    pub timestamp_ms: Timestamp,
    /// Range bin of the detection, or -1 for an absence event.
    pub range_bin: i32,
    /// State entered by this transition.
    pub state: PresenceState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_resolution() {
        // 460 MHz chirp bandwidth -> ~0.3259 m per bin
        let res = range_resolution(460e6);
        assert!((res - 0.3259).abs() < 1e-3);
    }

    #[test]
    fn test_max_range_bin_from_bandwidth() {
        // floor(5.0 / 0.3259) = 15 usable bins at 460 MHz
        let max_idx = (MAX_RANGE_LIMIT_M / range_resolution(460e6)).floor() as usize;
        assert_eq!(max_idx, 15);
    }

    #[test]
    fn test_mode_parse_round_trip() {
        for mode in [
            PresenceMode::MacroOnly,
            PresenceMode::MicroOnly,
            PresenceMode::MicroIfMacro,
            PresenceMode::MicroAndMacro,
        ] {
            assert_eq!(PresenceMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(PresenceMode::parse("bogus"), None);
    }
}
