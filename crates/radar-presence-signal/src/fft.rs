//! Fast-time (range) and slow-time (Doppler) FFT wrappers.
//!
//! Transform lengths mirror what the embedded FFT kernels accept: powers of
//! two in 16..=4096. Anything else is rejected at construction with
//! [`PresenceError::FftLength`] so that a bad configuration never reaches
//! the per-frame path.

use num_complex::Complex32;
use radar_presence_core::{PresenceError, PresenceResult};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use crate::window::{make_window, WindowFunction};

/// Whether `size` is a transform length the engine accepts.
#[inline]
pub fn supported_fft_size(size: usize) -> bool {
    size.is_power_of_two() && (16..=4096).contains(&size)
}

fn plan_forward(size: usize) -> PresenceResult<Arc<dyn Fft<f32>>> {
    if !supported_fft_size(size) {
        return Err(PresenceError::FftLength { size });
    }
    let mut planner = FftPlanner::new();
    Ok(planner.plan_fft_forward(size))
}

/// Windowed forward FFT over one frame of real fast-time samples.
///
/// `size` real samples in, `size / 2` complex range bins out (the upper half
/// of the spectrum of a real signal is redundant).
pub struct RangeFft {
    size: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
}

impl RangeFft {
    /// Plan a range FFT of `size` points with the given window.
    pub fn new(size: usize, window: WindowFunction) -> PresenceResult<Self> {
        let fft = plan_forward(size)?;
        Ok(Self {
            size,
            window: make_window(window, size),
            fft,
            scratch: vec![Complex32::ZERO; size],
        })
    }

    /// Number of fast-time samples consumed per frame.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of range bins produced per frame.
    pub fn output_size(&self) -> usize {
        self.size / 2
    }

    /// Transform one frame. `samples.len()` must equal [`Self::size`],
    /// `spectrum.len()` must equal [`Self::output_size`].
    pub fn process(&mut self, samples: &[f32], spectrum: &mut [Complex32]) {
        debug_assert_eq!(samples.len(), self.size);
        debug_assert_eq!(spectrum.len(), self.size / 2);

        for (dst, (&s, &w)) in self
            .scratch
            .iter_mut()
            .zip(samples.iter().zip(self.window.iter()))
        {
            *dst = Complex32::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);
        spectrum.copy_from_slice(&self.scratch[..self.size / 2]);
    }
}

impl std::fmt::Debug for RangeFft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeFft").field("size", &self.size).finish()
    }
}

/// In-place forward complex FFT over a slow-time column.
pub struct DopplerFft {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
}

impl DopplerFft {
    /// Plan a Doppler FFT of `size` points.
    pub fn new(size: usize) -> PresenceResult<Self> {
        Ok(Self {
            size,
            fft: plan_forward(size)?,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `column` in place. `column.len()` must equal [`Self::size`].
    pub fn process(&self, column: &mut [Complex32]) {
        debug_assert_eq!(column.len(), self.size);
        self.fft.process(column);
    }
}

impl std::fmt::Debug for DopplerFft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DopplerFft").field("size", &self.size).finish()
    }
}
