//! Error types for the radar presence detection system.
//!
//! Structural errors (unsupported FFT length, bad configuration) surface
//! once at setup time. Per-frame transients (a failed frame fetch, a failed
//! register write) are reported as [`PresenceError::Hardware`] and are
//! recoverable: the processing loop skips the cycle and waits for the next
//! frame instead of halting.

use thiserror::Error;

/// A specialized `Result` type for presence detection operations.
pub type PresenceResult<T> = Result<T, PresenceError>;

/// Unified error type for the presence detection system.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PresenceError {
    /// The requested transform length is not supported by the FFT backend.
    ///
    /// Raised at initialization and at config-set time, never per frame.
    #[error("unsupported FFT length: {size} (expected a power of two in 16..=4096)")]
    FftLength {
        /// The rejected transform size.
        size: usize,
    },

    /// Invalid configuration outside the documented clamping leniency.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Hardware I/O failure reported by the frame source or during radar
    /// reconfiguration.
    #[error("hardware error: {message}")]
    Hardware {
        /// Description of the hardware failure.
        message: String,
    },
}

impl PresenceError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a new hardware error.
    #[must_use]
    pub fn hardware(message: impl Into<String>) -> Self {
        Self::Hardware {
            message: message.into(),
        }
    }

    /// Returns `true` if the processing loop may continue after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Hardware { .. } => true,
            Self::FftLength { .. } | Self::Config { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_length_display() {
        let err = PresenceError::FftLength { size: 100 };
        assert!(err.to_string().contains("100"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_hardware_recoverable() {
        let err = PresenceError::hardware("fifo read failed");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("fifo read failed"));
    }
}
