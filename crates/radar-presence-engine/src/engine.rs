//! Presence detection engine.
//!
//! One [`PresenceEngine`] owns the complete rolling state of the detector:
//! the range spectrum of the previous macro comparison, the per-bin
//! band-pass filters, the slow-time ring buffer feeding the micro Doppler
//! FFT, and the per-bin detection timestamps that implement the validity
//! windows. `process_frame` is not reentrant; at most one call may be in
//! flight at a time, and configuration changes require exclusive access
//! followed by a `reset`.
//!
//! All buffers are sized once at construction from the configuration maxima
//! (the physical range limit and the initial micro FFT size) and are never
//! resized, so the per-frame path performs no allocation.

use ndarray::Array2;
use num_complex::Complex32;
use radar_presence_core::{
    range_resolution, PresenceError, PresenceEvent, PresenceMode, PresenceResult, PresenceState,
    Timestamp, MAX_RANGE_LIMIT_M,
};
use radar_presence_signal::{
    supported_fft_size, ComplexFirDecimator, DopplerFft, FirFilter, RangeFft, WindowFunction,
    BANDPASS_WARMUP_MS, DECIMATION_FACTOR,
};

use crate::config::PresenceConfig;

/// Minimum spacing between the validity expiries of two micro bins before
/// the decimated selection may report the second one.
const ANTI_FLICKER_WINDOW_MS: u64 = 2000;

/// Gain compensation applied to macro magnitudes while the band-pass filter
/// is active. Empirical constant; the filter weakens the difference signal
/// and would otherwise delay detection of a person entering.
const BANDPASS_COMPENSATION: f32 = 0.5 / 0.45;

/// Handler invoked synchronously for every presence transition. Must not
/// block and must not call back into the engine.
pub type EventCallback = Box<dyn FnMut(&PresenceEvent) + Send>;

/// The presence detection engine.
pub struct PresenceEngine {
    config: PresenceConfig,

    /// `num_samples_per_chirp / 2`, the number of complex range bins.
    macro_fft_size: usize,
    /// Number of range bins within the physical range limit, never more
    /// than the spectrum length; sizes every per-bin filter bank and the
    /// micro ring columns.
    max_range_limit_idx: usize,
    /// Micro FFT size fixed at construction; runtime changes may only shrink.
    max_micro_fft_size: usize,

    range_fft: RangeFft,
    doppler_fft: DopplerFft,
    /// Per-bin intensity ramp `0.2 * (i + 1)` scaling macro differences.
    range_intensity_win: Vec<f32>,

    macro_fft_buffer: Vec<Complex32>,
    last_macro_compare: Vec<Complex32>,
    bandpass_buffer: Vec<Complex32>,
    bandpass_re: Vec<FirFilter>,
    bandpass_im: Vec<FirFilter>,

    /// Slow-time ring, `[row][range bin]`. Refilled rather than cleared on
    /// reset; `micro_calc_ready` gates reads until a full refill.
    micro_ring: Array2<Complex32>,
    micro_col_buffer: Vec<Complex32>,
    micro_write_row: usize,
    micro_calc_col: usize,
    micro_calc_ready: bool,
    micro_all_calculated: bool,

    decim_buffer: Array2<Complex32>,
    decimators: Vec<ComplexFirDecimator>,
    decim_write_row: usize,

    macro_last_compare_ms: Timestamp,
    macro_last_compare_init: bool,
    macro_hit_count: u32,
    /// End of the band-pass warm-up window; 0 means "armed on next frame".
    bandpass_initial_time_ms: Timestamp,

    macro_detect_timestamps: Vec<Timestamp>,
    micro_detect_timestamps: Vec<Timestamp>,
    macro_detect_confidences: Vec<f32>,
    micro_detect_distances: Vec<f32>,

    max_macro: f32,
    max_macro_idx: i32,
    max_micro: f32,
    max_micro_idx: i32,

    last_macro_reported_idx: i32,
    last_micro_reported_idx: i32,
    /// Bin of the most recent reported event of either kind; -1 before the
    /// first report.
    last_reported_idx: i32,

    state: PresenceState,
    callback: Option<EventCallback>,
}

impl PresenceEngine {
    /// Build an engine for `config`.
    ///
    /// Fails with [`PresenceError::FftLength`] if `num_samples_per_chirp` or
    /// `micro_fft_size` is not a supported transform length. Range-bin
    /// bounds beyond the physical range limit are clamped, as is a micro
    /// compare index beyond the Doppler spectrum.
    pub fn new(config: PresenceConfig) -> PresenceResult<Self> {
        let range_fft = RangeFft::new(config.num_samples_per_chirp, WindowFunction::Hamming)?;
        let doppler_fft = DopplerFft::new(config.micro_fft_size)?;

        let macro_fft_size = config.num_samples_per_chirp / 2;
        // The spectrum carries macro_fft_size bins; a short chirp can put
        // the physical range limit past the end of the spectrum.
        let max_range_limit_idx = ((MAX_RANGE_LIMIT_M / range_resolution(config.bandwidth_hz))
            .floor() as usize)
            .min(macro_fft_size);
        let last_valid_bin = max_range_limit_idx.saturating_sub(1);

        let mut config = config;
        config.min_range_bin = config.min_range_bin.min(last_valid_bin);
        config.max_range_bin = config.max_range_bin.min(last_valid_bin);
        config.micro_movement_compare_idx = config
            .micro_movement_compare_idx
            .min(config.micro_fft_size - 1);

        let max_micro_fft_size = config.micro_fft_size;

        Ok(Self {
            config,
            macro_fft_size,
            max_range_limit_idx,
            max_micro_fft_size,
            range_fft,
            doppler_fft,
            range_intensity_win: (0..macro_fft_size).map(|i| 0.2 * (i as f32 + 1.0)).collect(),
            macro_fft_buffer: vec![Complex32::ZERO; macro_fft_size],
            last_macro_compare: vec![Complex32::ZERO; macro_fft_size],
            bandpass_buffer: vec![Complex32::ZERO; macro_fft_size],
            bandpass_re: (0..max_range_limit_idx).map(|_| FirFilter::bandpass()).collect(),
            bandpass_im: (0..max_range_limit_idx).map(|_| FirFilter::bandpass()).collect(),
            micro_ring: Array2::from_elem((max_micro_fft_size, max_range_limit_idx), Complex32::ZERO),
            micro_col_buffer: vec![Complex32::ZERO; max_micro_fft_size],
            micro_write_row: 0,
            micro_calc_col: 0,
            micro_calc_ready: false,
            micro_all_calculated: false,
            decim_buffer: Array2::from_elem((DECIMATION_FACTOR, max_range_limit_idx), Complex32::ZERO),
            decimators: (0..max_range_limit_idx).map(|_| ComplexFirDecimator::new()).collect(),
            decim_write_row: 0,
            macro_last_compare_ms: 0,
            macro_last_compare_init: false,
            macro_hit_count: 0,
            bandpass_initial_time_ms: 0,
            macro_detect_timestamps: vec![0; macro_fft_size],
            micro_detect_timestamps: vec![0; macro_fft_size],
            macro_detect_confidences: vec![0.0; macro_fft_size],
            micro_detect_distances: vec![0.0; macro_fft_size],
            max_macro: 0.0,
            max_macro_idx: -1,
            max_micro: 0.0,
            max_micro_idx: -1,
            last_macro_reported_idx: -1,
            last_micro_reported_idx: -1,
            last_reported_idx: -1,
            state: PresenceState::Absence,
            callback: None,
        })
    }

    /// Register (or clear) the event callback.
    pub fn set_callback(&mut self, callback: Option<EventCallback>) {
        self.callback = callback;
    }

    /// Current detection state.
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    /// Physical length of one range bin in meters.
    pub fn bin_length(&self) -> f32 {
        range_resolution(self.config.bandwidth_hz)
    }

    /// Highest range bin usable under the physical range limit.
    pub fn max_range_limit_idx(&self) -> usize {
        self.max_range_limit_idx
    }

    /// Range spectrum of the most recently processed frame.
    pub fn macro_spectrum(&self) -> &[Complex32] {
        &self.macro_fft_buffer
    }

    /// Replace the active configuration.
    ///
    /// The micro FFT size may shrink but never grow past the size the
    /// buffers were allocated for; a growth request is rejected with
    /// [`PresenceError::FftLength`] and the stored configuration is left
    /// untouched. `num_samples_per_chirp` is fixed at construction.
    /// Range-bin bounds and the micro compare index are clamped, not
    /// rejected. The caller is expected
    /// to `reset` afterwards; rolling state is undefined across a live
    /// config change.
    pub fn set_config(&mut self, new: PresenceConfig) -> PresenceResult<()> {
        if new.micro_fft_size > self.max_micro_fft_size || !supported_fft_size(new.micro_fft_size)
        {
            return Err(PresenceError::FftLength {
                size: new.micro_fft_size,
            });
        }
        if new.num_samples_per_chirp != self.config.num_samples_per_chirp {
            return Err(PresenceError::config(
                "num_samples_per_chirp is fixed at construction",
            ));
        }
        if new.micro_fft_size != self.config.micro_fft_size {
            self.doppler_fft = DopplerFft::new(new.micro_fft_size)?;
        }

        let last_valid_bin = self.max_range_limit_idx.saturating_sub(1);
        self.config = new;
        self.config.min_range_bin = self.config.min_range_bin.min(last_valid_bin);
        self.config.max_range_bin = self.config.max_range_bin.min(last_valid_bin);
        self.config.micro_movement_compare_idx = self
            .config
            .micro_movement_compare_idx
            .min(self.config.micro_fft_size - 1);
        Ok(())
    }

    /// Drop all rolling state and return to `Absence`.
    ///
    /// The band-pass warm-up re-arms on the next frame. Ring buffer contents
    /// are not cleared; they are gated behind a full refill.
    pub fn reset(&mut self) {
        self.decim_write_row = 0;
        self.micro_write_row = 0;
        self.micro_calc_ready = false;
        self.micro_calc_col = 0;
        self.micro_all_calculated = false;

        self.macro_detect_timestamps.fill(0);
        self.micro_detect_timestamps.fill(0);
        self.macro_detect_confidences.fill(0.0);
        self.micro_detect_distances.fill(0.0);

        self.macro_last_compare_init = false;
        self.macro_last_compare_ms = 0;
        self.macro_hit_count = 0;
        self.last_macro_reported_idx = -1;
        self.last_micro_reported_idx = -1;
        self.state = PresenceState::Absence;
        self.max_macro = 0.0;
        self.max_micro = 0.0;
        self.max_macro_idx = -1;
        self.max_micro_idx = -1;
        self.last_reported_idx = -1;
        self.bandpass_initial_time_ms = 0;
    }

    /// Highest macro magnitude seen since the last query, with its bin.
    /// Returns `None` if no comparison ran since; querying clears the value.
    pub fn get_max_macro(&mut self) -> Option<(f32, usize)> {
        if self.max_macro_idx < 0 {
            return None;
        }
        let out = (self.max_macro, self.max_macro_idx as usize);
        self.max_macro = 0.0;
        self.max_macro_idx = -1;
        Some(out)
    }

    /// Highest micro movement energy seen since the last query, with its
    /// bin. Returns `None` if no column was evaluated since; querying clears
    /// the value.
    pub fn get_max_micro(&mut self) -> Option<(f32, usize)> {
        if self.max_micro_idx < 0 {
            return None;
        }
        let out = (self.max_micro, self.max_micro_idx as usize);
        self.max_micro = 0.0;
        self.max_micro_idx = -1;
        Some(out)
    }

    /// Process one frame of raw fast-time samples taken at `time_ms`.
    ///
    /// `frame.len()` must equal the configured samples per chirp. Frames
    /// must arrive in timestamp order.
    pub fn process_frame(&mut self, frame: &[f32], time_ms: Timestamp) -> PresenceResult<()> {
        if frame.len() != self.config.num_samples_per_chirp {
            return Err(PresenceError::config(format!(
                "frame length {} does not match samples per chirp {}",
                frame.len(),
                self.config.num_samples_per_chirp
            )));
        }
        self.range_fft.process(frame, &mut self.macro_fft_buffer);
        self.run_detectors(time_ms);
        Ok(())
    }

    /// Process one frame given its precomputed range spectrum.
    ///
    /// Entry point for offline replay of recorded spectra; `process_frame`
    /// is this plus the windowed range FFT.
    pub fn process_spectrum(
        &mut self,
        spectrum: &[Complex32],
        time_ms: Timestamp,
    ) -> PresenceResult<()> {
        if spectrum.len() != self.macro_fft_size {
            return Err(PresenceError::config(format!(
                "spectrum length {} does not match range bin count {}",
                spectrum.len(),
                self.macro_fft_size
            )));
        }
        self.macro_fft_buffer.copy_from_slice(spectrum);
        self.run_detectors(time_ms);
        Ok(())
    }

    fn run_detectors(&mut self, time_ms: Timestamp) {
        // First frame after construction or reset: clear the band-pass delay
        // lines and start the warm-up window. Armed regardless of the enable
        // flag so that macro comparisons never start before the stream is
        // settled.
        if self.bandpass_initial_time_ms == 0 {
            for f in &mut self.bandpass_re {
                f.reset();
            }
            for f in &mut self.bandpass_im {
                f.reset();
            }
            self.bandpass_initial_time_ms = time_ms + BANDPASS_WARMUP_MS;
        }

        let use_bandpass = self.config.macro_fft_bandpass_filter_enabled;
        if use_bandpass {
            for i in 0..self.max_range_limit_idx {
                let m = self.macro_fft_buffer[i];
                let re = self.bandpass_re[i].push(m.re);
                let im = self.bandpass_im[i].push(m.im);
                self.bandpass_buffer[i] = Complex32::new(re, im);
            }
        }

        if !self.macro_last_compare_init {
            if use_bandpass {
                self.last_macro_compare.copy_from_slice(&self.bandpass_buffer);
            } else {
                self.last_macro_compare.copy_from_slice(&self.macro_fft_buffer);
            }
            self.macro_last_compare_init = true;
        }

        self.compare_macro(time_ms, use_bandpass);
        self.write_micro_row();

        if self.micro_write_row == self.config.micro_fft_size {
            self.micro_calc_ready = true;
            self.micro_write_row = 0;
            self.micro_calc_col = self.config.min_range_bin;
        }

        // Micro evaluation only runs in modes and states that can use it.
        if self.config.mode == PresenceMode::MacroOnly
            || (self.config.mode == PresenceMode::MicroIfMacro
                && (self.state == PresenceState::Absence
                    || self.state == PresenceState::MacroPresence))
        {
            return;
        }

        if self.micro_calc_ready {
            self.calc_micro_column(time_ms);
        }

        let micro_movement_idx = self.select_micro_bin(time_ms);

        if micro_movement_idx != self.last_micro_reported_idx {
            self.last_micro_reported_idx = micro_movement_idx;
            if micro_movement_idx >= 0 {
                let idx = micro_movement_idx as usize;
                let event = PresenceEvent {
                    timestamp_ms: self.micro_detect_timestamps[idx]
                        - self.config.micro_movement_validity_ms,
                    range_bin: micro_movement_idx,
                    state: PresenceState::MicroPresence,
                };
                self.emit(&event);
                self.last_reported_idx = micro_movement_idx;
            }
        }

        if micro_movement_idx == -1
            && self.state == PresenceState::MicroPresence
            && self.micro_all_calculated
        {
            self.switch_to_absence(time_ms);
        }
    }

    /// Macro movement comparison against the previous spectrum snapshot,
    /// detection bookkeeping and the resulting state transition.
    fn compare_macro(&mut self, time_ms: Timestamp, use_bandpass: bool) {
        if self.config.mode == PresenceMode::MicroOnly
            || self.macro_last_compare_ms + self.config.macro_compare_interval_ms >= time_ms
            || time_ms <= self.bandpass_initial_time_ms
        {
            return;
        }

        let min = self.config.min_range_bin;
        let max = self.config.max_range_bin;

        let mut hit = false;
        // Only compare against a snapshot younger than two intervals; after
        // a longer gap the snapshot is refreshed without comparing.
        if self.macro_last_compare_ms + 2 * self.config.macro_compare_interval_ms > time_ms {
            for i in min..=max {
                let cur = if use_bandpass {
                    self.bandpass_buffer[i]
                } else {
                    self.macro_fft_buffer[i]
                };
                let diff = cur - self.last_macro_compare[i];
                let mut macro_value = diff.norm() * self.range_intensity_win[i];
                if use_bandpass {
                    macro_value *= BANDPASS_COMPENSATION;
                }

                if macro_value >= self.max_macro {
                    self.max_macro = macro_value;
                    self.max_macro_idx = i as i32;
                }

                if macro_value >= self.config.macro_threshold {
                    hit = true;
                    self.macro_detect_timestamps[i] =
                        time_ms + self.config.macro_movement_validity_ms;
                    self.macro_detect_confidences[i] = macro_value - self.config.macro_threshold;
                }
            }
        }

        if hit {
            self.macro_hit_count += 1;
        } else {
            self.macro_hit_count = 0;
        }

        if use_bandpass {
            self.last_macro_compare.copy_from_slice(&self.bandpass_buffer);
        } else {
            self.last_macro_compare.copy_from_slice(&self.macro_fft_buffer);
        }

        let mut macro_movement_idx: i32 = -1;
        if self.macro_hit_count >= self.config.macro_movement_confirmations {
            let mut detect_range = 0usize;
            for i in min..=max {
                if time_ms <= self.macro_detect_timestamps[i] {
                    detect_range += 1;
                }
            }

            // Entering presence needs macro_trigger_range simultaneous bins;
            // sustaining an already established presence needs only one.
            if detect_range >= self.config.macro_trigger_range
                || self.state != PresenceState::Absence
            {
                for i in min..=max {
                    if time_ms <= self.macro_detect_timestamps[i] {
                        macro_movement_idx = i as i32;
                        break;
                    }
                }
            }
        }
        self.macro_last_compare_ms = time_ms;

        if macro_movement_idx != self.last_macro_reported_idx {
            if macro_movement_idx >= 0 {
                let idx = macro_movement_idx as usize;
                let event = PresenceEvent {
                    timestamp_ms: self.macro_detect_timestamps[idx]
                        - self.config.macro_movement_validity_ms,
                    range_bin: macro_movement_idx,
                    state: PresenceState::MacroPresence,
                };
                self.emit(&event);
                self.state = PresenceState::MacroPresence;
                self.last_reported_idx = macro_movement_idx;
            } else {
                if self.config.mode == PresenceMode::MacroOnly {
                    self.switch_to_absence(time_ms);
                } else {
                    // Macro expired with micro permitted: hand over to the
                    // micro detector, seeding validity for every bin at or
                    // beyond the last macro report.
                    self.state = PresenceState::MicroPresence;
                    self.last_micro_reported_idx = -1;
                    for i in min..=max {
                        self.micro_detect_timestamps[i] =
                            if (i as i32) >= self.last_macro_reported_idx {
                                time_ms + self.config.micro_movement_validity_ms
                            } else {
                                0
                            };
                    }
                }
                self.micro_calc_col = self.config.min_range_bin;
            }
            self.last_macro_reported_idx = macro_movement_idx;
        }
    }

    /// Append the current range spectrum to the slow-time ring, through the
    /// decimator when enabled.
    fn write_micro_row(&mut self) {
        if self.config.micro_fft_decimation_enabled {
            for i in 0..self.max_range_limit_idx {
                self.decim_buffer[[self.decim_write_row, i]] = self.macro_fft_buffer[i];
            }
            self.decim_write_row += 1;

            if self.decim_write_row == DECIMATION_FACTOR {
                self.decim_write_row = 0;
                for i in 0..self.max_range_limit_idx {
                    let mut block = [Complex32::ZERO; DECIMATION_FACTOR];
                    for (j, slot) in block.iter_mut().enumerate() {
                        *slot = self.decim_buffer[[j, i]];
                    }
                    let out = self.decimators[i].process_block(&block);
                    self.micro_ring[[self.micro_write_row, i]] = out;
                }
                self.micro_write_row += 1;
            }
        } else {
            for i in 0..self.max_range_limit_idx {
                self.micro_ring[[self.micro_write_row, i]] = self.macro_fft_buffer[i];
            }
            self.micro_write_row += 1;
        }
    }

    /// Doppler-transform the next range-bin column of the ring and score its
    /// micro movement energy.
    fn calc_micro_column(&mut self, time_ms: Timestamp) {
        let size = self.config.micro_fft_size;
        let col = self.micro_calc_col;

        // Gather the column in ring order, oldest row first.
        let mut mean = Complex32::ZERO;
        for k in 0..size {
            let row = (self.micro_write_row + k) % size;
            let v = self.micro_ring[[row, col]];
            self.micro_col_buffer[k] = v;
            mean += v;
        }
        mean /= size as f32;
        for v in &mut self.micro_col_buffer[..size] {
            *v -= mean;
        }

        self.doppler_fft.process(&mut self.micro_col_buffer[..size]);

        let mut speed = 0.0f32;
        for k in 1..=self.config.micro_movement_compare_idx {
            speed += self.micro_col_buffer[k].norm();
        }

        if self.max_micro < speed {
            self.max_micro = speed;
            self.max_micro_idx = col as i32;
        }

        let confidence = speed - self.config.micro_threshold;
        if confidence >= 0.0 {
            self.micro_detect_timestamps[col] = time_ms + self.config.micro_movement_validity_ms;
            self.micro_detect_distances[col] = confidence;
            self.state = PresenceState::MicroPresence;
        }

        self.micro_calc_col += 1;
        if self.micro_calc_col > self.config.max_range_bin {
            self.micro_calc_col = self.config.min_range_bin;
            self.micro_all_calculated = true;
        }
    }

    /// Pick the micro bin to report, or -1.
    ///
    /// The decimated path partitions bins into "previously announced"
    /// (min..=last_reported) and "not yet announced" (last_reported+1..=max)
    /// and enforces a 2 s spacing between the expiries of two reported bins
    /// to suppress flicker. The non-decimated path simply reports the first
    /// bin with a live validity window.
    fn select_micro_bin(&mut self, time_ms: Timestamp) -> i32 {
        let min = self.config.min_range_bin;
        let max = self.config.max_range_bin;
        let mut micro_movement_idx: i32 = -1;

        if self.config.micro_fft_decimation_enabled {
            let mut all_previous_expired = true;
            if self.last_reported_idx >= 0 {
                for i in min..=(self.last_reported_idx as usize) {
                    if time_ms <= self.macro_detect_timestamps[i] {
                        all_previous_expired = false;
                    }
                }
            }

            let mut macro_not_displayed = false;
            if all_previous_expired {
                let start = (self.last_reported_idx + 1).max(0) as usize;
                for i in start..=max {
                    if time_ms <= self.macro_detect_timestamps[i] {
                        micro_movement_idx = i as i32;
                        macro_not_displayed = true;
                        break;
                    }
                }
            }

            // No prior report means no reference expiry; treat it as 0.
            let last_ref_ts = if self.last_reported_idx >= 0 {
                self.micro_detect_timestamps[self.last_reported_idx as usize]
            } else {
                0
            };

            if time_ms <= last_ref_ts && !macro_not_displayed {
                micro_movement_idx = self.last_reported_idx;
            } else if self.micro_all_calculated && !macro_not_displayed {
                let mut max_confidence = 0.0f32;
                for i in min..=max {
                    if time_ms <= self.micro_detect_timestamps[i]
                        && self.micro_detect_distances[i] > max_confidence
                        && self.micro_detect_timestamps[i].wrapping_sub(last_ref_ts)
                            > ANTI_FLICKER_WINDOW_MS
                    {
                        micro_movement_idx = i as i32;
                        max_confidence = self.micro_detect_distances[i];
                    }
                }
            }
        } else {
            for i in min..=max {
                if time_ms <= self.micro_detect_timestamps[i] {
                    micro_movement_idx = i as i32;
                    break;
                }
            }
        }

        micro_movement_idx
    }

    /// Report absence. Must never be called while already in `Absence`; that
    /// is a logic error, not a runtime condition.
    fn switch_to_absence(&mut self, time_ms: Timestamp) {
        debug_assert!(self.state != PresenceState::Absence);

        let event = PresenceEvent {
            timestamp_ms: time_ms,
            range_bin: -1,
            state: PresenceState::Absence,
        };
        self.emit(&event);

        self.state = PresenceState::Absence;
        self.last_micro_reported_idx = -1;
        self.micro_all_calculated = false;
    }

    fn emit(&mut self, event: &PresenceEvent) {
        tracing::debug!(
            state = event.state.as_str(),
            range_bin = event.range_bin,
            timestamp_ms = event.timestamp_ms,
            "presence event"
        );
        if let Some(cb) = self.callback.as_mut() {
            cb(event);
        }
    }
}

impl std::fmt::Debug for PresenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("max_range_limit_idx", &self.max_range_limit_idx)
            .finish()
    }
}
