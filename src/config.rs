use crate::animation::{FieldSettings, PeriodRange, PulseSizing, RevealPacing};
use crate::render::resize::ResizePolicy;
use crate::style::Color;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

/// The built in looks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    /// Red points and a fast heartbeat with fixed sizes.
    #[default]
    Classic,

    /// Blue points, a slow heartbeat sized after the window and a steady typewriter.
    Midnight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The number of frames per second to render.
    pub fps: u32,

    /// The seed used for the background field. Random when unset.
    pub seed: Option<u64>,

    pub field: FieldSettings,

    pub pulse: PulseSettings,

    /// How fast the heart is typed.
    pub reveal: RevealPacing,

    pub resize: ResizePolicy,

    pub ui: UiSettings,

    pub audio: AudioSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_theme(ThemeName::Classic)
    }
}

impl Config {
    pub const MAX_FPS: u32 = 240;

    /// Build the configuration for one of the built in themes.
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Classic => Self {
                fps: 60,
                seed: None,
                field: FieldSettings::default(),
                pulse: PulseSettings::default(),
                reveal: RevealPacing::default(),
                resize: ResizePolicy::default(),
                ui: UiSettings::default(),
                audio: AudioSettings::default(),
            },
            ThemeName::Midnight => Self {
                fps: 60,
                seed: None,
                field: FieldSettings {
                    count: 150,
                    period: PeriodRange { min: 40, max: 90 },
                    primary: Color::new(13, 108, 232),
                },
                pulse: PulseSettings {
                    speed: 0.06,
                    sizing: PulseSizing::Viewport { divisor: 65.0 },
                    small: Color::new(0x85, 0x07, 0x07),
                    large: Color::new(0xc3, 0x13, 0x13),
                },
                reveal: RevealPacing::Interval { millis: 75 },
                resize: ResizePolicy::default(),
                ui: UiSettings::default(),
                audio: AudioSettings::default(),
            },
        }
    }

    /// Load a configuration file. Missing fields take the classic theme's values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The path the configuration is looked up at when none is given.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "nameheart")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > Self::MAX_FPS {
            return Err(ConfigError::InvalidFps(self.fps));
        }
        let period = self.field.period;
        if !period.is_valid() {
            return Err(ConfigError::InvalidPeriod { min: period.min, max: period.max });
        }
        if !self.pulse.speed.is_finite() {
            return Err(ConfigError::InvalidPulseSpeed(self.pulse.speed));
        }
        if !self.pulse.sizing.is_valid() {
            return Err(ConfigError::InvalidPulseSizing(self.pulse.sizing));
        }
        if let RevealPacing::Interval { millis: 0 } = self.reveal {
            return Err(ConfigError::InvalidRevealInterval);
        }
        // the input panel is drawn in the rows below the canvas
        if self.resize.margin_rows == 0 {
            return Err(ConfigError::MissingInputRow);
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::InvalidVolume(self.audio.volume));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PulseSettings {
    /// How much the heartbeat phase moves every frame.
    pub speed: f32,

    pub sizing: PulseSizing,

    /// The color at the smallest point of the beat.
    pub small: Color,

    /// The color at the largest point of the beat.
    pub large: Color,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            speed: 0.12,
            sizing: PulseSizing::default(),
            small: Color::new(0x9a, 0x0f, 0x29),
            large: Color::new(0xcf, 0x14, 0x62),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSettings {
    /// The greeting shown on the welcome screen.
    pub title: String,

    /// The hint shown next to the name input.
    pub prompt: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "I have something for you".into(),
            prompt: "Type a name and press Enter".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    /// The audio file played in the background once the welcome screen is left.
    pub path: Option<PathBuf>,

    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { path: None, volume: 0.4 }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {error}", path = .0.display(), error = .1)]
    Io(PathBuf, io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error("fps must be between 1 and 240, got {0}")]
    InvalidFps(u32),

    #[error("invalid blink period range {min}..={max}")]
    InvalidPeriod { min: i32, max: i32 },

    #[error("pulse speed must be a finite number, got {0}")]
    InvalidPulseSpeed(f32),

    #[error("pulse sizes must be finite and positive, got {0:?}")]
    InvalidPulseSizing(PulseSizing),

    #[error("reveal interval must be at least 1ms")]
    InvalidRevealInterval,

    #[error("volume must be between 0 and 1, got {0}")]
    InvalidVolume(f32),

    #[error("resize.margin_rows must leave at least one row for the name input")]
    MissingInputRow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::classic(ThemeName::Classic)]
    #[case::midnight(ThemeName::Midnight)]
    fn themes_round_trip(#[case] theme: ThemeName) {
        let config = Config::for_theme(theme);
        config.validate().expect("invalid theme");
        let yaml = config.to_yaml().expect("serialize failed");
        let parsed: Config = serde_yaml::from_str(&yaml).expect("parse failed");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config() {
        let input = r##"
fps: 30
field:
  count: 10
  primary: "#00ff00"
pulse:
  sizing:
    mode: viewport
    divisor: 40.0
reveal:
  mode: interval
  millis: 20
"##;
        let config: Config = serde_yaml::from_str(input).expect("parse failed");
        assert_eq!(config.fps, 30);
        assert_eq!(config.field.count, 10);
        assert_eq!(config.field.primary, Color::new(0, 255, 0));
        assert_eq!(config.field.period, FieldSettings::default().period);
        assert_eq!(config.pulse.sizing, PulseSizing::Viewport { divisor: 40.0 });
        assert_eq!(config.reveal, RevealPacing::Interval { millis: 20 });
        config.validate().expect("invalid config");
    }

    #[test]
    fn per_frame_pacing() {
        let config: Config = serde_yaml::from_str("reveal:\n  mode: per_frame\n").expect("parse failed");
        assert_eq!(config.reveal, RevealPacing::PerFrame);
    }

    #[test]
    fn invalid_color() {
        let result = serde_yaml::from_str::<Config>("pulse:\n  small: \"#12\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_field() {
        assert!(serde_yaml::from_str::<Config>("colour: red").is_err());
    }

    #[rstest]
    #[case::inverted_period("field:\n  period:\n    min: 10\n    max: 2\n")]
    #[case::zero_fps("fps: 0")]
    #[case::zero_interval("reveal:\n  mode: interval\n  millis: 0\n")]
    #[case::loud("audio:\n  volume: 3.0\n")]
    #[case::nan_speed("pulse:\n  speed: .nan\n")]
    #[case::infinite_speed("pulse:\n  speed: .inf\n")]
    #[case::negative_base("pulse:\n  sizing:\n    mode: fixed\n    base: -3.0\n    amplitude: 7.0\n")]
    #[case::zero_amplitude("pulse:\n  sizing:\n    mode: fixed\n    base: 18.0\n    amplitude: 0.0\n")]
    #[case::nan_divisor("pulse:\n  sizing:\n    mode: viewport\n    divisor: .nan\n")]
    #[case::zero_divisor("pulse:\n  sizing:\n    mode: viewport\n    divisor: 0.0\n")]
    #[case::no_input_row("resize:\n  margin_rows: 0\n")]
    fn validation(#[case] input: &str) {
        let config: Config = serde_yaml::from_str(input).expect("parse failed");
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_reveal_is_wall_clock() {
        assert_eq!(Config::default().reveal, RevealPacing::Interval { millis: 75 });
        assert_eq!(Config::for_theme(ThemeName::Midnight).reveal, RevealPacing::Interval { millis: 75 });
    }

    #[test]
    fn io_error_names_the_file() {
        let error = ConfigError::Io(PathBuf::from("/tmp/nameheart.yaml"), io::Error::other("gone"));
        assert_eq!(error.to_string(), "reading /tmp/nameheart.yaml: gone");
    }

    #[test]
    fn load_missing_file() {
        let error = Config::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(error, ConfigError::Io(..)));
    }
}
