//! Presence detection configuration.

use radar_presence_core::PresenceMode;
use serde::{Deserialize, Serialize};

/// Full configuration of the presence engine.
///
/// `num_samples_per_chirp` and the micro FFT ceiling are fixed when the
/// engine is constructed; everything else may change at runtime through
/// [`crate::PresenceEngine::set_config`]. Range-bin bounds outside the
/// physical range limit are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Chirp bandwidth in Hz. Determines the physical length of one range bin.
    pub bandwidth_hz: f32,

    /// Fast-time samples per chirp. Must be a supported FFT length.
    pub num_samples_per_chirp: usize,

    /// Feed the micro buffer through the factor-8 decimator instead of
    /// writing one row per frame.
    pub micro_fft_decimation_enabled: bool,

    /// Slow-time (Doppler) FFT length. Must be a supported FFT length and,
    /// after construction, can only shrink.
    pub micro_fft_size: usize,

    /// Macro movement detection threshold.
    pub macro_threshold: f32,

    /// Micro movement detection threshold.
    pub micro_threshold: f32,

    /// First range bin evaluated by both detectors.
    pub min_range_bin: usize,

    /// Last range bin evaluated by both detectors (inclusive).
    pub max_range_bin: usize,

    /// Minimum interval between two macro spectrum comparisons.
    pub macro_compare_interval_ms: u64,

    /// How long a macro detection stays valid after its hit.
    pub macro_movement_validity_ms: u64,

    /// How long a micro detection stays valid after its hit.
    pub micro_movement_validity_ms: u64,

    /// Consecutive macro comparison hits required before a detection is
    /// reported.
    pub macro_movement_confirmations: u32,

    /// Number of simultaneously hit range bins required to leave absence.
    pub macro_trigger_range: usize,

    /// Which detectors participate in the decision.
    pub mode: PresenceMode,

    /// Run the per-bin band-pass filter on the macro comparison stream.
    pub macro_fft_bandpass_filter_enabled: bool,

    /// Highest Doppler bin (inclusive, starting at 1) summed into the micro
    /// movement energy.
    pub micro_movement_compare_idx: usize,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            bandwidth_hz: 460e6,
            num_samples_per_chirp: 128,
            micro_fft_decimation_enabled: false,
            micro_fft_size: 128,
            macro_threshold: 1.0,
            micro_threshold: 25.0,
            min_range_bin: 1,
            max_range_bin: 5,
            macro_compare_interval_ms: 250,
            macro_movement_validity_ms: 1000,
            micro_movement_validity_ms: 4000,
            macro_movement_confirmations: 0,
            macro_trigger_range: 1,
            mode: PresenceMode::MicroIfMacro,
            macro_fft_bandpass_filter_enabled: false,
            micro_movement_compare_idx: 5,
        }
    }
}

impl PresenceConfig {
    /// Create a new config builder.
    pub fn builder() -> PresenceConfigBuilder {
        PresenceConfigBuilder::new()
    }
}

/// Builder for [`PresenceConfig`].
#[derive(Debug, Default)]
pub struct PresenceConfigBuilder {
    config: PresenceConfig,
}

impl PresenceConfigBuilder {
    /// Create a new builder seeded with defaults.
    pub fn new() -> Self {
        Self {
            config: PresenceConfig::default(),
        }
    }

    /// Set chirp bandwidth in Hz.
    pub fn bandwidth_hz(mut self, bandwidth: f32) -> Self {
        self.config.bandwidth_hz = bandwidth;
        self
    }

    /// Set fast-time samples per chirp.
    pub fn num_samples_per_chirp(mut self, samples: usize) -> Self {
        self.config.num_samples_per_chirp = samples;
        self
    }

    /// Enable/disable micro buffer decimation.
    pub fn micro_fft_decimation_enabled(mut self, enabled: bool) -> Self {
        self.config.micro_fft_decimation_enabled = enabled;
        self
    }

    /// Set the slow-time FFT length.
    pub fn micro_fft_size(mut self, size: usize) -> Self {
        self.config.micro_fft_size = size;
        self
    }

    /// Set the macro detection threshold.
    pub fn macro_threshold(mut self, threshold: f32) -> Self {
        self.config.macro_threshold = threshold;
        self
    }

    /// Set the micro detection threshold.
    pub fn micro_threshold(mut self, threshold: f32) -> Self {
        self.config.micro_threshold = threshold;
        self
    }

    /// Set the first evaluated range bin.
    pub fn min_range_bin(mut self, bin: usize) -> Self {
        self.config.min_range_bin = bin;
        self
    }

    /// Set the last evaluated range bin (inclusive).
    pub fn max_range_bin(mut self, bin: usize) -> Self {
        self.config.max_range_bin = bin;
        self
    }

    /// Set the macro comparison interval in milliseconds.
    pub fn macro_compare_interval_ms(mut self, interval: u64) -> Self {
        self.config.macro_compare_interval_ms = interval;
        self
    }

    /// Set the macro detection validity window in milliseconds.
    pub fn macro_movement_validity_ms(mut self, validity: u64) -> Self {
        self.config.macro_movement_validity_ms = validity;
        self
    }

    /// Set the micro detection validity window in milliseconds.
    pub fn micro_movement_validity_ms(mut self, validity: u64) -> Self {
        self.config.micro_movement_validity_ms = validity;
        self
    }

    /// Set the required consecutive macro hit count.
    pub fn macro_movement_confirmations(mut self, confirmations: u32) -> Self {
        self.config.macro_movement_confirmations = confirmations;
        self
    }

    /// Set the number of hit bins required to leave absence.
    pub fn macro_trigger_range(mut self, range: usize) -> Self {
        self.config.macro_trigger_range = range;
        self
    }

    /// Set the operating mode.
    pub fn mode(mut self, mode: PresenceMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enable/disable the macro band-pass filter.
    pub fn macro_fft_bandpass_filter_enabled(mut self, enabled: bool) -> Self {
        self.config.macro_fft_bandpass_filter_enabled = enabled;
        self
    }

    /// Set the highest Doppler bin summed into the micro energy.
    pub fn micro_movement_compare_idx(mut self, idx: usize) -> Self {
        self.config.micro_movement_compare_idx = idx;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PresenceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PresenceConfig::default();
        assert_eq!(config.num_samples_per_chirp, 128);
        assert_eq!(config.micro_fft_size, 128);
        assert_eq!(config.min_range_bin, 1);
        assert_eq!(config.max_range_bin, 5);
        assert_eq!(config.mode, PresenceMode::MicroIfMacro);
        assert!(!config.macro_fft_bandpass_filter_enabled);
        assert!(!config.micro_fft_decimation_enabled);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PresenceConfig::builder()
            .mode(PresenceMode::MacroOnly)
            .macro_threshold(1.5)
            .max_range_bin(10)
            .micro_fft_decimation_enabled(true)
            .build();
        assert_eq!(config.mode, PresenceMode::MacroOnly);
        assert_eq!(config.macro_threshold, 1.5);
        assert_eq!(config.max_range_bin, 10);
        assert!(config.micro_fft_decimation_enabled);
        // untouched fields keep their defaults
        assert_eq!(config.micro_threshold, 25.0);
    }
}
