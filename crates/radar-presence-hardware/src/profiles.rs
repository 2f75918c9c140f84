//! Register profiles for the two supported frame rates.
//!
//! A profile is the complete front-end configuration written during
//! reconfiguration: the ordered register list plus the FIFO fill level that
//! raises the frame interrupt. The high-rate profile is programmed at
//! bring-up; the low-rate profile halves chirp repetition to save power
//! while watching an empty room.

use radar_presence_core::RegisterProfile;

/// Frame period of [`HIGH_FRAME_RATE`] in milliseconds.
pub const HIGH_FRAME_PERIOD_MS: u64 = 50;

/// Frame period of [`LOW_FRAME_RATE`] in milliseconds.
pub const LOW_FRAME_PERIOD_MS: u64 = 200;

/// Full-rate acquisition profile, active while presence is being tracked.
pub static HIGH_FRAME_RATE: RegisterProfile = RegisterProfile {
    name: "high_frame_rate",
    registers: &[
        0x11e8270, 0x30a0210, 0x9e967fd, 0xb0805b4, 0xdf02fff, 0xf010d00, 0x11000000, 0x13000000,
        0x15000000, 0x17000be0, 0x19000000, 0x1b000000, 0x1d000000, 0x1f000b60, 0x2113fc51,
        0x237ff41f, 0x25006f7b, 0x2d000490, 0x3b000480, 0x49000480, 0x57000480, 0x5911be0e,
        0x5b678c0a, 0x5d00f000, 0x5f787e1e, 0x61f5208c, 0x630000a4, 0x65000252, 0x67000080,
        0x69000000, 0x6b000000, 0x6d000000, 0x6f093910, 0x7f000100, 0x8f000100, 0x9f000100,
        0xad000000, 0xb7000000,
    ],
    fifo_limit: 8192,
};

/// Reduced-rate acquisition profile for absence monitoring.
pub static LOW_FRAME_RATE: RegisterProfile = RegisterProfile {
    name: "low_frame_rate",
    registers: &[
        0x11e8270, 0x30a0210, 0x9e967fd, 0xb0805b4, 0xdf02fff, 0xf010d00, 0x11000000, 0x13000000,
        0x15000000, 0x17000be0, 0x19000000, 0x1b000000, 0x1d000000, 0x1f000b60, 0x2113fc51,
        0x237ff41f, 0x25006f7b, 0x2d000490, 0x3b000480, 0x49000480, 0x57000480, 0x5911be0e,
        0x5b678c0a, 0x5d00f000, 0x5f787e1e, 0x61f5208c, 0x630000a4, 0x65000252, 0x67000080,
        0x69000000, 0x6b000000, 0x6d000000, 0x6f2d8b10, 0x7f000100, 0x8f000100, 0x9f000100,
        0xad000000, 0xb7000000,
    ],
    fifo_limit: 2048,
};

/// Frame period a profile is clocked at.
pub fn frame_period_ms(profile: &RegisterProfile) -> u64 {
    if profile.name == LOW_FRAME_RATE.name {
        LOW_FRAME_PERIOD_MS
    } else {
        HIGH_FRAME_PERIOD_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_differ_only_in_timing() {
        assert_eq!(HIGH_FRAME_RATE.registers.len(), LOW_FRAME_RATE.registers.len());
        let differing = HIGH_FRAME_RATE
            .registers
            .iter()
            .zip(LOW_FRAME_RATE.registers.iter())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(differing, 1);
        assert!(HIGH_FRAME_RATE.fifo_limit > LOW_FRAME_RATE.fifo_limit);
    }

    #[test]
    fn test_frame_periods() {
        assert_eq!(frame_period_ms(&HIGH_FRAME_RATE), 50);
        assert_eq!(frame_period_ms(&LOW_FRAME_RATE), 200);
    }
}
