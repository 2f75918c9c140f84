//! Interactive console commands.
//!
//! Mirrors the serial console of the reference kit firmware: runtime
//! reconfiguration of thresholds, range and mode, plus start/stop control.
//! Parsing and validation are separated from execution so bad input is
//! rejected before any engine state is touched.

use parking_lot::Mutex;
use radar_presence_core::PresenceMode;
use radar_presence_engine::PresenceEngine;

/// Smallest settable maximum range in meters.
pub const MIN_RANGE_M: f32 = 0.66;
/// Largest settable maximum range in meters.
pub const MAX_RANGE_M: f32 = 5.0;

const MACRO_THRESHOLD_RANGE: (f32, f32) = (0.5, 2.0);
const MICRO_THRESHOLD_RANGE: (f32, f32) = (0.2, 50.0);

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  run                        start frame acquisition
  stop                       stop frame acquisition
  status                     print the current configuration and state
  set_max_range <m>          maximum detection range, 0.66 to 5.0 m
  set_macro_threshold <v>    macro movement threshold, 0.5 to 2.0
  set_micro_threshold <v>    micro movement threshold, 0.2 to 50.0
  set_mode <mode>            macro_only | micro_only | micro_if_macro | micro_and_macro
  bandpass <on|off>          enable or disable the macro band-stop filter
  help                       show this text
  exit                       quit";

/// A validated console command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Run,
    Stop,
    SetMaxRange(f32),
    SetMacroThreshold(f32),
    SetMicroThreshold(f32),
    SetMode(PresenceMode),
    SetBandpass(bool),
    Status,
    Help,
    Exit,
}

/// Parse one console line. Returns `Ok(None)` for blank input.
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };

    let command = match name {
        "run" | "start" => ConsoleCommand::Run,
        "stop" => ConsoleCommand::Stop,
        "status" => ConsoleCommand::Status,
        "help" => ConsoleCommand::Help,
        "exit" | "quit" => ConsoleCommand::Exit,
        "set_max_range" => {
            let value = parse_value(name, tokens.next())?;
            if !(MIN_RANGE_M..=MAX_RANGE_M).contains(&value) {
                return Err(format!(
                    "max range must be between {MIN_RANGE_M} and {MAX_RANGE_M} m"
                ));
            }
            ConsoleCommand::SetMaxRange(value)
        }
        "set_macro_threshold" => {
            let value = parse_value(name, tokens.next())?;
            let (lo, hi) = MACRO_THRESHOLD_RANGE;
            if !(lo..=hi).contains(&value) {
                return Err(format!("macro threshold must be between {lo} and {hi}"));
            }
            ConsoleCommand::SetMacroThreshold(value)
        }
        "set_micro_threshold" => {
            let value = parse_value(name, tokens.next())?;
            let (lo, hi) = MICRO_THRESHOLD_RANGE;
            if !(lo..=hi).contains(&value) {
                return Err(format!("micro threshold must be between {lo} and {hi}"));
            }
            ConsoleCommand::SetMicroThreshold(value)
        }
        "set_mode" => {
            let arg = tokens
                .next()
                .ok_or_else(|| "set_mode needs a mode argument".to_string())?;
            let mode = PresenceMode::parse(arg).ok_or_else(|| {
                "mode must be one of macro_only, micro_only, micro_if_macro, micro_and_macro"
                    .to_string()
            })?;
            ConsoleCommand::SetMode(mode)
        }
        "bandpass" => match tokens.next() {
            Some("on") => ConsoleCommand::SetBandpass(true),
            Some("off") => ConsoleCommand::SetBandpass(false),
            _ => return Err("bandpass takes 'on' or 'off'".to_string()),
        },
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };

    if tokens.next().is_some() {
        return Err(format!("too many arguments for '{name}'"));
    }
    Ok(Some(command))
}

fn parse_value(name: &str, token: Option<&str>) -> Result<f32, String> {
    token
        .ok_or_else(|| format!("{name} needs a value"))?
        .parse::<f32>()
        .map_err(|_| format!("{name} needs a numeric value"))
}

/// Apply a configuration command to the engine.
///
/// The detector restarts from absence after every accepted change; a
/// rejected change leaves the configuration as it was.
pub fn apply(engine: &Mutex<PresenceEngine>, command: &ConsoleCommand) -> Result<(), String> {
    let mut engine = engine.lock();
    let mut config = *engine.config();

    match *command {
        ConsoleCommand::SetMaxRange(meters) => {
            config.max_range_bin = (meters / engine.bin_length()) as usize;
        }
        ConsoleCommand::SetMacroThreshold(value) => config.macro_threshold = value,
        ConsoleCommand::SetMicroThreshold(value) => config.micro_threshold = value,
        ConsoleCommand::SetMode(mode) => config.mode = mode,
        ConsoleCommand::SetBandpass(enabled) => config.macro_fft_bandpass_filter_enabled = enabled,
        _ => return Ok(()),
    }

    engine.set_config(config).map_err(|err| err.to_string())?;
    engine.reset();
    Ok(())
}

/// Human-readable configuration and state summary.
pub fn status_text(engine: &Mutex<PresenceEngine>) -> String {
    let engine = engine.lock();
    let config = engine.config();
    let bin_length = engine.bin_length();
    format!(
        "state: {}\nmode: {}\nmacro threshold: {}\nmicro threshold: {}\nrange: {:.2} to {:.2} m (bins {} to {})\nbandpass filter: {}",
        engine.state().as_str(),
        config.mode.as_str(),
        config.macro_threshold,
        config.micro_threshold,
        config.min_range_bin as f32 * bin_length,
        config.max_range_bin as f32 * bin_length,
        config.min_range_bin,
        config.max_range_bin,
        if config.macro_fft_bandpass_filter_enabled {
            "on"
        } else {
            "off"
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_presence_engine::PresenceConfig;

    fn engine() -> Mutex<PresenceEngine> {
        Mutex::new(PresenceEngine::new(PresenceConfig::default()).unwrap())
    }

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse("run").unwrap(), Some(ConsoleCommand::Run));
        assert_eq!(parse("  stop ").unwrap(), Some(ConsoleCommand::Stop));
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(
            parse("set_mode micro_only").unwrap(),
            Some(ConsoleCommand::SetMode(PresenceMode::MicroOnly))
        );
        assert_eq!(
            parse("bandpass on").unwrap(),
            Some(ConsoleCommand::SetBandpass(true))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse("set_max_range").is_err());
        assert!(parse("set_max_range fast").is_err());
        assert!(parse("set_max_range 0.1").is_err());
        assert!(parse("set_max_range 7.5").is_err());
        assert!(parse("set_macro_threshold 3.0").is_err());
        assert!(parse("set_micro_threshold 0.05").is_err());
        assert!(parse("set_mode sideways").is_err());
        assert!(parse("bandpass maybe").is_err());
        assert!(parse("warp 9").is_err());
        assert!(parse("run now").is_err());
    }

    #[test]
    fn test_set_max_range_converts_to_bins() {
        let engine = engine();
        apply(&engine, &ConsoleCommand::SetMaxRange(2.0)).unwrap();

        let guard = engine.lock();
        let expected = (2.0 / guard.bin_length()) as usize;
        assert_eq!(guard.config().max_range_bin, expected);
    }

    #[test]
    fn test_threshold_and_mode_changes_apply() {
        let engine = engine();
        apply(&engine, &ConsoleCommand::SetMacroThreshold(1.5)).unwrap();
        apply(&engine, &ConsoleCommand::SetMicroThreshold(10.0)).unwrap();
        apply(&engine, &ConsoleCommand::SetMode(PresenceMode::MacroOnly)).unwrap();
        apply(&engine, &ConsoleCommand::SetBandpass(true)).unwrap();

        let guard = engine.lock();
        let config = guard.config();
        assert_eq!(config.macro_threshold, 1.5);
        assert_eq!(config.micro_threshold, 10.0);
        assert_eq!(config.mode, PresenceMode::MacroOnly);
        assert!(config.macro_fft_bandpass_filter_enabled);
    }

    #[test]
    fn test_status_text_names_current_mode() {
        let engine = engine();
        let text = status_text(&engine);
        assert!(text.contains("micro_if_macro"));
        assert!(text.contains("absence"));
    }
}
