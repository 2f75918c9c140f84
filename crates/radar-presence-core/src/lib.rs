//! Core types for the radar presence detection system.
//!
//! This crate defines the vocabulary shared by every layer of the system:
//! presence states and operating modes, the event type delivered to
//! subscribers, the error taxonomy, and the trait boundary towards the
//! radar front-end.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PresenceError, PresenceResult};
pub use traits::{FrameSource, RegisterProfile};
pub use types::{
    range_resolution, PresenceEvent, PresenceMode, PresenceState, Timestamp,
    MAX_RANGE_LIMIT_M,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
