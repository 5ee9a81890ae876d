use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use platformer_core::Tunables;
use serde::Deserialize;

/// Optional TOML configuration layered over the built-in defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Physics and balance constants.
    pub(crate) tuning: Tunables,
    /// Window settings.
    pub(crate) window: WindowConfig,
}

/// Window settings read from the `[window]` table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Platformer".to_owned(),
            width: 1024,
            height: 480,
            vsync: false,
            show_fps: false,
        }
    }
}

impl GameConfig {
    /// Reads the configuration file, falling back to defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        validate_tuning(&config.tuning)
            .with_context(|| format!("invalid [tuning] in config file {}", path.display()))?;
        Ok(config)
    }
}

/// Highest simulation rate accepted from a config file.
const MAX_FRAME_RATE: i32 = 1000;

/// Rejects tuning values the simulation cannot run with.
fn validate_tuning(tuning: &Tunables) -> Result<()> {
    if !(1..=MAX_FRAME_RATE).contains(&tuning.frame_rate) {
        bail!("frame_rate must be between 1 and {MAX_FRAME_RATE}, got {}", tuning.frame_rate);
    }
    if tuning.max_lives == 0 {
        bail!("max_lives must be at least 1");
    }
    for (name, value) in [
        ("max_level_time", tuning.max_level_time),
        ("exit_drain", tuning.exit_drain),
        ("bonus_progress", tuning.bonus_progress),
    ] {
        if value <= 0 {
            bail!("{name} must be positive, got {value}");
        }
    }
    for (name, value) in [
        ("player_speed", tuning.player_speed),
        ("enemy_speed", tuning.enemy_speed),
    ] {
        if !(value > 0.0 && value < 1.0) {
            bail!("{name} must lie strictly between 0 and 1, got {value}");
        }
    }
    for (name, value) in [
        ("jump_strength", tuning.jump_strength),
        ("gravity", tuning.gravity),
        ("ceiling_bounce", tuning.ceiling_bounce),
        ("enemy_bounce", tuning.enemy_bounce),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            bail!("{name} must be a finite non-negative number, got {value}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_uses_defaults() {
        let config = GameConfig::load(None).expect("defaults");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.tuning.max_lives, 3);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[tuning]\nmax_lives = 5\n\n[window]\nvsync = true").expect("write");

        let config = GameConfig::load(Some(file.path())).expect("parses");

        assert_eq!(config.tuning.max_lives, 5);
        assert_eq!(config.tuning.frame_rate, 60);
        assert!(config.window.vsync);
        assert_eq!(config.window.width, 1024);
    }

    #[test]
    fn unknown_tables_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[audio]\nvolume = 3").expect("write");

        let error = GameConfig::load(Some(file.path())).expect_err("unknown table");
        assert!(error.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn out_of_range_tuning_is_rejected() {
        for table in [
            "frame_rate = 2000000000",
            "frame_rate = 0",
            "exit_drain = -25",
            "bonus_progress = 0",
            "max_lives = 0",
            "player_speed = 1.5",
            "gravity = -0.01",
        ] {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            writeln!(file, "[tuning]\n{table}").expect("write");

            let error = GameConfig::load(Some(file.path())).expect_err(table);
            assert!(format!("{error:#}").contains("invalid [tuning]"), "{table}: {error:#}");
        }
    }

    #[test]
    fn defaults_pass_validation() {
        validate_tuning(&Tunables::default()).expect("defaults are valid");
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let error = GameConfig::load(Some(Path::new("/nonexistent/platformer.toml")))
            .expect_err("missing file");
        assert!(error.to_string().contains("/nonexistent/platformer.toml"));
    }
}
