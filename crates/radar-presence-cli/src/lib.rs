//! Radar presence demo console.
//!
//! Runs the presence engine against the simulated radar front-end and
//! exposes the firmware-style serial console over stdin: start and stop
//! acquisition, tune thresholds and range at runtime, and watch presence
//! events as they happen.
//!
//! ```bash
//! # empty room, start capturing immediately
//! radar-presence --scene empty --run
//!
//! # then, at the prompt
//! set_max_range 2.0
//! set_mode micro_if_macro
//! run
//! ```

use clap::{Parser, ValueEnum};

pub mod console;

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "radar-presence")]
#[command(author, version, about = "FMCW radar presence detection demo console")]
pub struct Cli {
    /// Simulated scene placed in front of the sensor
    #[arg(long, value_enum, default_value = "breathing")]
    pub scene: Scene,

    /// Start frame acquisition immediately
    #[arg(long)]
    pub run: bool,
}

/// What the simulated sensor is looking at.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Nothing but noise.
    Empty,
    /// A strong but perfectly still reflector.
    Stationary,
    /// A person sitting still and breathing.
    Breathing,
}
