//! Software radar front-end.
//!
//! Synthesizes fast-time frames with static clutter, measurement noise and
//! optional moving targets, behind the same [`FrameSource`] trait a real
//! SPI-attached sensor driver implements. A target at range bin `b` appears
//! as a tone at `b` cycles per frame; motion phase-modulates that tone so
//! the slow-time spectrum picks it up.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use radar_presence_core::{FrameSource, PresenceError, PresenceResult, RegisterProfile};

use crate::profiles::{self, HIGH_FRAME_RATE};

/// A simulated reflector.
#[derive(Debug, Clone, Copy)]
pub struct SimTarget {
    /// Range bin the reflection lands in.
    pub bin: usize,
    /// Tone amplitude.
    pub amplitude: f32,
    /// Motion frequency in Hz (0.0 for a perfectly still target).
    pub motion_hz: f32,
    /// Motion phase deviation in radians.
    pub motion_depth: f32,
}

impl SimTarget {
    /// A still, strongly reflecting target.
    pub fn stationary(bin: usize, amplitude: f32) -> Self {
        Self {
            bin,
            amplitude,
            motion_hz: 0.0,
            motion_depth: 0.0,
        }
    }

    /// A target with breathing-like micro motion.
    pub fn breathing(bin: usize, amplitude: f32) -> Self {
        Self {
            bin,
            amplitude,
            motion_hz: 0.3,
            motion_depth: 1.5,
        }
    }
}

/// Simulated radar sensor.
pub struct SimulatedRadar {
    num_samples: usize,
    profile: &'static RegisterProfile,
    running: bool,
    frame_count: u64,
    targets: Vec<SimTarget>,
    noise_amplitude: f32,
    rng: StdRng,
    fail_fetches: u32,
}

impl SimulatedRadar {
    /// Create a stopped simulator producing frames of `num_samples` samples.
    pub fn new(num_samples: usize) -> Self {
        Self {
            num_samples,
            profile: &HIGH_FRAME_RATE,
            running: false,
            frame_count: 0,
            targets: Vec::new(),
            noise_amplitude: 0.01,
            rng: StdRng::seed_from_u64(0x5eed),
            fail_fetches: 0,
        }
    }

    /// Place a target in the scene.
    pub fn add_target(&mut self, target: SimTarget) {
        self.targets.push(target);
    }

    /// Remove every target from the scene.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Whether frame generation is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frame period of the currently programmed profile.
    pub fn frame_period_ms(&self) -> u64 {
        profiles::frame_period_ms(self.profile)
    }

    /// Make the next `count` fetches fail, simulating FIFO read errors.
    pub fn inject_fetch_failures(&mut self, count: u32) {
        self.fail_fetches = count;
    }
}

impl FrameSource for SimulatedRadar {
    fn start(&mut self) -> PresenceResult<()> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> PresenceResult<()> {
        self.running = false;
        Ok(())
    }

    fn fetch_frame(&mut self, out: &mut [f32]) -> PresenceResult<()> {
        if !self.running {
            return Err(PresenceError::hardware("frame generator is stopped"));
        }
        if self.fail_fetches > 0 {
            self.fail_fetches -= 1;
            return Err(PresenceError::hardware("fifo read failed"));
        }
        if out.len() != self.num_samples {
            return Err(PresenceError::hardware(format!(
                "frame buffer length {} does not match {} samples per chirp",
                out.len(),
                self.num_samples
            )));
        }

        let n = self.num_samples as f32;
        let t = self.frame_count as f32 * self.frame_period_ms() as f32 / 1000.0;

        for (i, sample) in out.iter_mut().enumerate() {
            let mut value = self.rng.gen_range(-1.0..1.0) * self.noise_amplitude;
            for target in &self.targets {
                let motion =
                    target.motion_depth * (2.0 * std::f32::consts::PI * target.motion_hz * t).sin();
                let phase = 2.0 * std::f32::consts::PI * target.bin as f32 * i as f32 / n + motion;
                value += target.amplitude * phase.cos();
            }
            *sample = value;
        }

        self.frame_count += 1;
        Ok(())
    }

    fn apply_profile(&mut self, profile: &RegisterProfile) -> PresenceResult<()> {
        self.stop()?;
        // register writes and FIFO limit are a no-op for the simulator; a
        // real driver streams profile.registers over SPI here
        self.profile = match profile.name {
            name if name == profiles::LOW_FRAME_RATE.name => &profiles::LOW_FRAME_RATE,
            _ => &profiles::HIGH_FRAME_RATE,
        };
        self.start()
    }

    fn active_profile(&self) -> &'static str {
        self.profile.name
    }
}

impl std::fmt::Debug for SimulatedRadar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedRadar")
            .field("running", &self.running)
            .field("profile", &self.profile.name)
            .field("targets", &self.targets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_requires_running() {
        let mut radar = SimulatedRadar::new(128);
        let mut frame = vec![0.0f32; 128];
        assert!(radar.fetch_frame(&mut frame).is_err());

        radar.start().unwrap();
        radar.fetch_frame(&mut frame).unwrap();
        radar.stop().unwrap();
        assert!(radar.fetch_frame(&mut frame).is_err());
    }

    #[test]
    fn test_target_tone_lands_in_its_bin() {
        let mut radar = SimulatedRadar::new(128);
        radar.add_target(SimTarget::stationary(3, 2.0));
        radar.start().unwrap();

        let mut frame = vec![0.0f32; 128];
        radar.fetch_frame(&mut frame).unwrap();

        // correlate against the expected tone; 3 cycles per frame dominate
        let n = frame.len() as f32;
        let power: f32 = frame
            .iter()
            .enumerate()
            .map(|(i, s)| s * (2.0 * std::f32::consts::PI * 3.0 * i as f32 / n).cos())
            .sum();
        assert!(power > 100.0, "tone correlation too weak: {power}");
    }

    #[test]
    fn test_apply_profile_switches_and_restarts() {
        let mut radar = SimulatedRadar::new(128);
        radar.start().unwrap();
        assert_eq!(radar.active_profile(), "high_frame_rate");
        assert_eq!(radar.frame_period_ms(), 50);

        radar.apply_profile(&profiles::LOW_FRAME_RATE).unwrap();
        assert_eq!(radar.active_profile(), "low_frame_rate");
        assert_eq!(radar.frame_period_ms(), 200);
        assert!(radar.is_running());
    }

    #[test]
    fn test_injected_failures_are_transient() {
        let mut radar = SimulatedRadar::new(128);
        radar.start().unwrap();
        radar.inject_fetch_failures(2);

        let mut frame = vec![0.0f32; 128];
        assert!(radar.fetch_frame(&mut frame).is_err());
        assert!(radar.fetch_frame(&mut frame).is_err());
        assert!(radar.fetch_frame(&mut frame).is_ok());
    }
}
