use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::analog_clock::AnalogClock;
use crate::error::ClockError;
use crate::resources::cli::CliArgs;
use crate::utils::time_input::parse_time_input;

/// Initial settings for the demo clock.
///
/// Loaded from JSON; every field is optional and falls back to the default.
/// ```json
/// { "tick_frequency": 4.0, "seconds_per_tick": 60, "start_time": "09:15" }
/// ```
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub tick_frequency: f32,
    pub seconds_per_tick: i32,
    pub start_on_enable: bool,
    pub use_system_time: bool,
    pub smooth_second_hand: bool,
    pub smooth_minute_hand: bool,
    pub smooth_hour_hand: bool,
    /// Initial time, in the same format the control panel accepts.
    pub start_time: Option<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_frequency: 1.0,
            seconds_per_tick: 1,
            start_on_enable: false,
            use_system_time: false,
            smooth_second_hand: false,
            smooth_minute_hand: false,
            smooth_hour_hand: false,
            start_time: None,
        }
    }
}

impl ClockConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ClockError> {
        let text = fs::read_to_string(path).map_err(|source| ClockError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ClockError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the startup config: the file named on the command line (or the
    /// defaults if there is none or it fails to load), then CLI flags on top.
    pub fn resolve(cli: &CliArgs) -> Self {
        let mut config = match &cli.config {
            Some(path) => match Self::load(path) {
                Ok(config) => {
                    info!("Loaded clock config from '{}'", path.display());
                    config
                }
                Err(err) => {
                    warn!("{err}; using default clock config");
                    Self::default()
                }
            },
            None => Self::default(),
        };
        config.apply_cli(cli);
        config
    }

    pub fn apply_cli(&mut self, cli: &CliArgs) {
        if cli.start {
            self.start_on_enable = true;
        }
        if cli.system_time {
            self.use_system_time = true;
        }
    }

    /// Creates a clock with these settings. An unparsable `start_time` is
    /// logged and left at midnight.
    pub fn build_clock(&self) -> AnalogClock {
        let mut clock = AnalogClock::new();
        clock.set_tick_frequency(self.tick_frequency);
        clock.set_seconds_per_tick(self.seconds_per_tick);
        clock.set_start_on_enable(self.start_on_enable);
        clock.set_use_system_time(self.use_system_time);
        clock.set_smooth_second_hand(self.smooth_second_hand);
        clock.set_smooth_minute_hand(self.smooth_minute_hand);
        clock.set_smooth_hour_hand(self.smooth_hour_hand);

        if let Some(start_time) = &self.start_time {
            match parse_time_input(start_time) {
                Ok(time) => clock.set_current_time(time),
                Err(err) => warn!("Ignoring clock start_time: {err}"),
            }
        }

        clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClockConfig =
            serde_json::from_str(r#"{ "seconds_per_tick": 60, "smooth_hour_hand": true }"#)
                .unwrap();
        assert_eq!(config.seconds_per_tick, 60);
        assert!(config.smooth_hour_hand);
        assert_eq!(config.tick_frequency, 1.0);
        assert_eq!(config.start_time, None);
    }

    #[test]
    fn test_build_clock_applies_settings() {
        let config = ClockConfig {
            tick_frequency: 500.0,
            seconds_per_tick: -10,
            start_on_enable: true,
            smooth_second_hand: true,
            start_time: Some("09:15".to_string()),
            ..default()
        };
        let clock = config.build_clock();
        assert_eq!(clock.tick_frequency(), 60.0);
        assert_eq!(clock.seconds_per_tick(), -10);
        assert!(clock.start_on_enable());
        assert!(clock.smooth_second_hand());
        assert!(!clock.power());
        assert_eq!(clock.current_time(), TimeDelta::hours(9) + TimeDelta::minutes(15));
    }

    #[test]
    fn test_invalid_start_time_is_ignored() {
        let config = ClockConfig {
            start_time: Some("quarter past nine".to_string()),
            ..default()
        };
        assert_eq!(config.build_clock().current_time(), TimeDelta::zero());
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = CliArgs::parse_from(["--start", "--system-time"]);
        let config = ClockConfig::resolve(&cli);
        assert!(config.start_on_enable);
        assert!(config.use_system_time);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ClockConfig::load(Path::new("/nonexistent/clock.json")).unwrap_err();
        assert!(matches!(err, ClockError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_reports_bad_json() {
        let path = std::env::temp_dir().join(format!("analog_clock_bad_{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = ClockConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ClockError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let cli = CliArgs {
            config: Some("/nonexistent/clock.json".into()),
            ..default()
        };
        assert_eq!(ClockConfig::resolve(&cli), ClockConfig::default());
    }
}
