//! Tuning configuration
//!
//! Every gameplay constant lives in `RushConfig` so runs can be retuned
//! without a rebuild. Uses RON (Rusty Object Notation) like the rest of the
//! game data; all sections are `#[serde(default)]` so a file only needs the
//! values it changes.

use macroquad::logging::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where the game looks for an override file (relative to the working dir / web root)
pub const CONFIG_PATH: &str = "assets/rush.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Playfield dimensions (virtual units, letterboxed to the window)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: f32,
    pub height: f32,
    /// Thickness of the ground strip at the bottom of the screen
    pub ground_height: f32,
}

impl ScreenSettings {
    /// Y coordinate of the ground surface
    pub fn ground_top(&self) -> f32 {
        self.height - self.ground_height
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            ground_height: 100.0,
        }
    }
}

/// Scroll speed curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedSettings {
    /// Starting scroll speed (units per second)
    pub base: f32,
    /// Scroll speed cap
    pub max: f32,
    /// Speed gained per meter travelled
    pub increase_per_meter: f32,
    /// Multiplier applied while slow motion is active
    pub slow_motion_factor: f32,
    /// Added to the scroll speed for enemy bullets
    pub bullet_extra: f32,
    /// Fraction of scroll speed used by background buildings
    pub building_parallax: f32,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            base: 200.0,
            max: 600.0,
            increase_per_meter: 0.5,
            slow_motion_factor: 0.3,
            bullet_extra: 200.0,
            building_parallax: 0.3,
        }
    }
}

/// Runner body and jump tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Horizontal position of the runner's center
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Gravity acceleration (units per second squared)
    pub gravity: f32,
    /// Upward velocity of a normal jump
    pub jump_force: f32,
    /// Total upward velocity reached with the hold bonus
    pub high_jump_force: f32,
    /// Hold window (seconds after the jump) in which the bonus can fire
    pub high_jump_window: (f32, f32),
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            x: 150.0,
            width: 40.0,
            height: 60.0,
            gravity: 2000.0,
            jump_force: 650.0,
            high_jump_force: 850.0,
            high_jump_window: (0.1, 0.5),
        }
    }
}

/// Spawn schedule and enemy fire rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Seconds between spawn rolls
    pub interval: f32,
    /// Cumulative roll thresholds: below `enemy` spawns an enemy, below
    /// `obstacle` an obstacle, below `coin` a coin, otherwise a power-up
    pub enemy_threshold: f32,
    pub obstacle_threshold: f32,
    pub coin_threshold: f32,
    /// Per-frame chance of a background building
    pub building_chance: f32,
    /// How far past the right edge new entities appear
    pub offscreen_margin: f32,
    /// Range of an enemy's first shot delay
    pub first_shot_delay: (f32, f32),
    /// Range of the delay between later shots
    pub reload_delay: (f32, f32),
    /// Enemies only shoot once they are this far inside the right edge
    pub shoot_margin: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            interval: 2.0,
            enemy_threshold: 0.4,
            obstacle_threshold: 0.7,
            coin_threshold: 0.85,
            building_chance: 0.01,
            offscreen_margin: 50.0,
            first_shot_delay: (0.5, 1.5),
            reload_delay: (1.0, 2.0),
            shoot_margin: 100.0,
        }
    }
}

/// Power-up durations and magnet behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub hyper_rush_secs: f32,
    pub slow_motion_secs: f32,
    pub magnet_secs: f32,
    pub double_jump_secs: f32,
    pub color_rush_secs: f32,
    /// Coins closer than this are pulled toward the runner
    pub magnet_radius: f32,
    /// Pull speed (units per second)
    pub magnet_pull: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            hyper_rush_secs: 3.0,
            slow_motion_secs: 5.0,
            magnet_secs: 8.0,
            double_jump_secs: 10.0,
            color_rush_secs: 10.0,
            magnet_radius: 300.0,
            magnet_pull: 400.0,
        }
    }
}

/// Points and adrenaline awards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Score per meter
    pub points_per_meter: f32,
    /// Score per meter while color rush is active
    pub color_rush_points_per_meter: f32,
    pub enemy_smash: u32,
    pub obstacle_smash: u32,
    pub bullet_smash: u32,
    pub coin: u32,
    pub power_up: u32,
    pub coin_adrenaline: f32,
    pub smash_adrenaline: f32,
    pub close_call_enemy: f32,
    pub close_call_obstacle: f32,
    /// Horizontal band (exclusive) that counts as a near miss
    pub close_call_band: (f32, f32),
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points_per_meter: 10.0,
            color_rush_points_per_meter: 20.0,
            enemy_smash: 50,
            obstacle_smash: 25,
            bullet_smash: 10,
            coin: 10,
            power_up: 100,
            coin_adrenaline: 2.0,
            smash_adrenaline: 10.0,
            close_call_enemy: 15.0,
            close_call_obstacle: 10.0,
            close_call_band: (40.0, 80.0),
        }
    }
}

/// All tuning for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RushConfig {
    pub screen: ScreenSettings,
    pub speed: SpeedSettings,
    pub player: PlayerSettings,
    pub spawn: SpawnSettings,
    pub effects: EffectSettings,
    pub scoring: ScoringSettings,
    /// Longest frame step the simulation accepts (seconds)
    pub max_frame_dt: f32,
}

impl Default for RushConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSettings::default(),
            speed: SpeedSettings::default(),
            player: PlayerSettings::default(),
            spawn: SpawnSettings::default(),
            effects: EffectSettings::default(),
            scoring: ScoringSettings::default(),
            max_frame_dt: 0.1,
        }
    }
}

impl RushConfig {
    /// Parse and validate a config from RON text
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: RushConfig = ron::from_str(s)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Serialize to pretty RON
    #[cfg(test)]
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), String> {
        let (hold_start, hold_end) = self.player.high_jump_window;
        let (near, far) = self.scoring.close_call_band;
        let spawn = &self.spawn;
        let effects = &self.effects;
        let finite = [
            ("screen.width", self.screen.width),
            ("screen.height", self.screen.height),
            ("screen.ground_height", self.screen.ground_height),
            ("speed.base", self.speed.base),
            ("speed.max", self.speed.max),
            ("speed.increase_per_meter", self.speed.increase_per_meter),
            ("speed.slow_motion_factor", self.speed.slow_motion_factor),
            ("speed.bullet_extra", self.speed.bullet_extra),
            ("speed.building_parallax", self.speed.building_parallax),
            ("player.x", self.player.x),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.gravity", self.player.gravity),
            ("player.jump_force", self.player.jump_force),
            ("player.high_jump_force", self.player.high_jump_force),
            ("player.high_jump_window.0", hold_start),
            ("player.high_jump_window.1", hold_end),
            ("spawn.interval", spawn.interval),
            ("spawn.enemy_threshold", spawn.enemy_threshold),
            ("spawn.obstacle_threshold", spawn.obstacle_threshold),
            ("spawn.coin_threshold", spawn.coin_threshold),
            ("spawn.building_chance", spawn.building_chance),
            ("spawn.offscreen_margin", spawn.offscreen_margin),
            ("spawn.first_shot_delay.0", spawn.first_shot_delay.0),
            ("spawn.first_shot_delay.1", spawn.first_shot_delay.1),
            ("spawn.reload_delay.0", spawn.reload_delay.0),
            ("spawn.reload_delay.1", spawn.reload_delay.1),
            ("spawn.shoot_margin", spawn.shoot_margin),
            ("effects.hyper_rush_secs", effects.hyper_rush_secs),
            ("effects.slow_motion_secs", effects.slow_motion_secs),
            ("effects.magnet_secs", effects.magnet_secs),
            ("effects.double_jump_secs", effects.double_jump_secs),
            ("effects.color_rush_secs", effects.color_rush_secs),
            ("effects.magnet_radius", effects.magnet_radius),
            ("effects.magnet_pull", effects.magnet_pull),
            ("scoring.points_per_meter", self.scoring.points_per_meter),
            ("scoring.color_rush_points_per_meter", self.scoring.color_rush_points_per_meter),
            ("scoring.coin_adrenaline", self.scoring.coin_adrenaline),
            ("scoring.smash_adrenaline", self.scoring.smash_adrenaline),
            ("scoring.close_call_enemy", self.scoring.close_call_enemy),
            ("scoring.close_call_obstacle", self.scoring.close_call_obstacle),
            ("scoring.close_call_band.0", near),
            ("scoring.close_call_band.1", far),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{} is not a finite number", name));
            }
        }

        if self.screen.width <= 0.0 || self.screen.height <= self.screen.ground_height {
            return Err("screen must be larger than the ground strip".to_string());
        }
        if self.speed.base <= 0.0 || self.speed.base > self.speed.max {
            return Err(format!(
                "speed.base ({}) must be positive and not above speed.max ({})",
                self.speed.base, self.speed.max
            ));
        }
        if !(0.0..=1.0).contains(&self.speed.slow_motion_factor) {
            return Err("speed.slow_motion_factor must be within 0..=1".to_string());
        }
        if self.player.high_jump_force < self.player.jump_force {
            return Err("player.high_jump_force must not be below player.jump_force".to_string());
        }
        if hold_start < 0.0 || hold_start >= hold_end {
            return Err("player.high_jump_window must be an increasing, non-negative range".to_string());
        }

        if spawn.interval <= 0.0 {
            return Err("spawn.interval must be positive".to_string());
        }
        let thresholds = [spawn.enemy_threshold, spawn.obstacle_threshold, spawn.coin_threshold];
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err("spawn thresholds must be within 0..=1".to_string());
        }
        if !(0.0..=1.0).contains(&spawn.building_chance) {
            return Err("spawn.building_chance must be within 0..=1".to_string());
        }
        if !(spawn.enemy_threshold <= spawn.obstacle_threshold && spawn.obstacle_threshold <= spawn.coin_threshold) {
            return Err("spawn thresholds must be non-decreasing".to_string());
        }
        for (name, (lo, hi)) in [("first_shot_delay", spawn.first_shot_delay), ("reload_delay", spawn.reload_delay)] {
            if lo <= 0.0 || lo > hi {
                return Err(format!("spawn.{} must be a positive range", name));
            }
        }

        let durations = [
            effects.hyper_rush_secs,
            effects.slow_motion_secs,
            effects.magnet_secs,
            effects.double_jump_secs,
            effects.color_rush_secs,
        ];
        if durations.iter().any(|d| *d <= 0.0) {
            return Err("effect durations must be positive".to_string());
        }

        if near < 0.0 || near >= far {
            return Err("scoring.close_call_band must be an increasing, non-negative range".to_string());
        }
        if self.max_frame_dt <= 0.0 {
            return Err("max_frame_dt must be positive".to_string());
        }
        Ok(())
    }
}

/// Load `CONFIG_PATH`, falling back to defaults. A missing file is normal;
/// a broken one is reported and ignored.
#[cfg(not(target_arch = "wasm32"))]
pub async fn load_or_default() -> RushConfig {
    match RushConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("loaded tuning from {}", CONFIG_PATH);
            config
        }
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("no {}, using default tuning", CONFIG_PATH);
            RushConfig::default()
        }
        Err(e) => {
            warn!("ignoring {}: {}", CONFIG_PATH, e);
            RushConfig::default()
        }
    }
}

/// Fetch `CONFIG_PATH` from the web root, falling back to defaults
#[cfg(target_arch = "wasm32")]
pub async fn load_or_default() -> RushConfig {
    let text = match macroquad::file::load_string(CONFIG_PATH).await {
        Ok(text) => text,
        Err(_) => {
            info!("no {}, using default tuning", CONFIG_PATH);
            return RushConfig::default();
        }
    };
    match RushConfig::from_ron_str(&text) {
        Ok(config) => {
            info!("loaded tuning from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("ignoring {}: {}", CONFIG_PATH, e);
            RushConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn defaults() -> RushConfig {
        RushConfig::default()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(RushConfig::default().validate().is_ok());
        assert_eq!(RushConfig::default().speed.base, 200.0);
        assert_eq!(RushConfig::default().speed.max, 600.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = RushConfig::from_ron_str("(speed: (max: 800.0))").unwrap();
        assert_eq!(config.speed.max, 800.0);
        assert_eq!(config.speed.base, 200.0);
        assert_eq!(config.effects.magnet_secs, 8.0);
    }

    #[test]
    fn test_roundtrip_through_ron() {
        let config = defaults();
        let text = config.to_ron_string().unwrap();
        let parsed = RushConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_base_above_max() {
        let err = RushConfig::from_ron_str("(speed: (base: 700.0, max: 600.0))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let mut config = defaults();
        config.spawn.obstacle_threshold = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_hold_window() {
        let mut config = defaults();
        config.player.high_jump_window = (0.5, 0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_shot_delay() {
        let err = RushConfig::from_ron_str("(spawn: (first_shot_delay: (0.5, inf)))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("spawn.first_shot_delay.1"));
    }

    #[test]
    fn test_rejects_non_finite_ranges() {
        let mut config = defaults();
        config.player.high_jump_window = (f32::NAN, 0.5);
        assert!(config.validate().is_err());

        let mut config = defaults();
        config.scoring.close_call_band = (f32::NAN, 80.0);
        assert!(config.validate().is_err());

        let mut config = defaults();
        config.spawn.reload_delay = (f32::NAN, f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_tuning() {
        let fields: [fn(&mut RushConfig); 5] = [
            |c| c.effects.magnet_radius = f32::INFINITY,
            |c| c.effects.magnet_pull = f32::NAN,
            |c| c.speed.bullet_extra = f32::NEG_INFINITY,
            |c| c.speed.building_parallax = f32::NAN,
            |c| c.spawn.building_chance = f32::NAN,
        ];
        for set in fields {
            let mut config = defaults();
            set(&mut config);
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_rejects_building_chance_above_one() {
        let mut config = defaults();
        config.spawn.building_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = RushConfig::from_ron_str("(speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(spawn: (interval: 1.5))").unwrap();
        let config = RushConfig::load(file.path()).unwrap();
        assert_eq!(config.spawn.interval, 1.5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RushConfig::load(dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
