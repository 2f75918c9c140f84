//! Signal processing primitives for the radar presence detection system.
//!
//! This crate provides the per-frame DSP building blocks the presence engine
//! composes: window functions, the fast-time range FFT, the slow-time
//! Doppler FFT, and the streaming FIR filters (band-pass and decimating)
//! whose state persists across frames.
//!
//! # Example
//!
//! ```rust
//! use radar_presence_signal::{RangeFft, WindowFunction};
//!
//! let mut fft = RangeFft::new(128, WindowFunction::Hamming).unwrap();
//! let frame = vec![0.0f32; 128];
//! let mut spectrum = vec![num_complex::Complex32::ZERO; 64];
//! fft.process(&frame, &mut spectrum);
//! ```

pub mod decimate;
pub mod fft;
pub mod fir;
pub mod window;

pub use decimate::{ComplexFirDecimator, FirDecimator, DECIMATION_FACTOR, DECIMATION_TAPS};
pub use fft::{supported_fft_size, DopplerFft, RangeFft};
pub use fir::{FirFilter, BANDPASS_TAPS, BANDPASS_WARMUP_MS};
pub use window::{make_window, WindowFunction};
