//! Streaming FIR filter with persistent state.
//!
//! The presence engine runs one of these per range bin and per channel
//! (real/imaginary), feeding it exactly one sample per frame. The delay
//! line therefore spans `taps - 1` frames of history and must never be
//! reallocated while frames are flowing.

/// Band-stop (10-35 Hz at a 100 Hz frame rate) coefficients used to isolate
/// the macro-motion band of the per-bin range spectrum stream. Generated
/// with MATLAB `fir1(64, [10/100 35/100 99/100], 'DC-1')`; values preserved
/// verbatim from the reference implementation.
pub const BANDPASS_TAPS: [f32; 65] = [
    -0.000672018944688787,
    5.40997750800323e-05,
    -0.00170551007050673,
    0.000706931294401583,
    0.000529718080087782,
    0.00403359866465874,
    0.00102443397277923,
    0.00234848093688213,
    -0.00194992073010673,
    0.00451365295988384,
    0.00312574092180467,
    0.00888191214923986,
    -0.00340548841703134,
    -0.00434494380465395,
    -0.0153910491204704,
    -0.00133041100723547,
    -0.00517641595111685,
    0.00200054539528286,
    -0.0241426155178683,
    -0.0230852875573157,
    -0.0293254372480552,
    0.0105956968865953,
    0.0175013648649183,
    0.0306608940135099,
    -0.00856346834860387,
    0.00160778144085906,
    0.0222545709144638,
    0.112213549580022,
    0.136465963717548,
    0.110216333677660,
    -0.0448122804532963,
    -0.174898778170997,
    0.740136712192538,
    -0.174898778170997,
    -0.0448122804532963,
    0.110216333677660,
    0.136465963717548,
    0.112213549580022,
    0.0222545709144638,
    0.00160778144085906,
    -0.00856346834860387,
    0.0306608940135099,
    0.0175013648649183,
    0.0105956968865953,
    -0.0293254372480552,
    -0.0230852875573157,
    -0.0241426155178683,
    0.00200054539528286,
    -0.00517641595111685,
    -0.00133041100723547,
    -0.0153910491204704,
    -0.00434494380465395,
    -0.00340548841703134,
    0.00888191214923986,
    0.00312574092180467,
    0.00451365295988384,
    -0.00194992073010673,
    0.00234848093688213,
    0.00102443397277923,
    0.00403359866465874,
    0.000529718080087782,
    0.000706931294401583,
    -0.00170551007050673,
    5.40997750800323e-05,
    -0.000672018944688787,
];

/// Settling time of the band-pass filtered stream in milliseconds. Macro
/// comparisons are suppressed until this long after the first frame.
pub const BANDPASS_WARMUP_MS: u64 = 490;

/// Direct-form FIR filter processing one sample per call.
#[derive(Debug, Clone)]
pub struct FirFilter {
    coeffs: &'static [f32],
    /// Delay line, most recent sample at `pos`.
    state: Vec<f32>,
    pos: usize,
}

impl FirFilter {
    /// Create a filter over a static coefficient table.
    pub fn new(coeffs: &'static [f32]) -> Self {
        Self {
            coeffs,
            state: vec![0.0; coeffs.len()],
            pos: 0,
        }
    }

    /// Band-stop filter for the macro-motion path.
    pub fn bandpass() -> Self {
        Self::new(&BANDPASS_TAPS)
    }

    /// Feed one input sample, returning one filtered output sample.
    pub fn push(&mut self, sample: f32) -> f32 {
        self.state[self.pos] = sample;
        let n = self.state.len();
        let mut acc = 0.0f32;
        for (k, &b) in self.coeffs.iter().enumerate() {
            // state index of x[n - k], walking backwards around the ring
            let idx = (self.pos + n - k) % n;
            acc += b * self.state[idx];
        }
        self.pos = (self.pos + 1) % n;
        acc
    }

    /// Clear the delay line.
    pub fn reset(&mut self) {
        self.state.fill(0.0);
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bandpass_tap_count_and_symmetry() {
        assert_eq!(BANDPASS_TAPS.len(), 65);
        for i in 0..32 {
            assert_eq!(BANDPASS_TAPS[i], BANDPASS_TAPS[64 - i]);
        }
    }

    #[test]
    fn test_impulse_response_reproduces_taps() {
        let mut fir = FirFilter::bandpass();
        let mut response = Vec::with_capacity(65);
        response.push(fir.push(1.0));
        for _ in 1..65 {
            response.push(fir.push(0.0));
        }
        for (got, want) in response.iter().zip(BANDPASS_TAPS.iter()) {
            assert!((got - want).abs() < 1e-7);
        }
    }

    #[test]
    fn test_dc_rejection() {
        // The band-stop table sums to ~1 at DC minus the stop band; feed a
        // constant and check the steady-state output stays close to the tap
        // sum (linearity sanity check, not a spectral assertion).
        let tap_sum: f32 = BANDPASS_TAPS.iter().sum();
        let mut fir = FirFilter::bandpass();
        let mut last = 0.0;
        for _ in 0..200 {
            last = fir.push(1.0);
        }
        assert!((last - tap_sum).abs() < 1e-5);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut fir = FirFilter::bandpass();
        for _ in 0..10 {
            fir.push(1.0);
        }
        fir.reset();
        // After reset, an impulse must again reproduce tap 0.
        let y = fir.push(1.0);
        assert!((y - BANDPASS_TAPS[0]).abs() < 1e-7);
    }
}
