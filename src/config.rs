//! Game configuration
//!
//! Every tunable number lives here so gameplay code has no magic values.
//! The config is built once at startup and only ever read afterwards.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Playfield dimensions (board-local units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Pulls the top and bottom bounce lines in from the field edge
    pub wall_inset: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 3.6,
            height: 2.1,
            wall_inset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Units per second at full axis deflection
    pub speed: f32,
    /// Distance from the side wall toward the center
    pub x_offset_from_wall: f32,
    pub z: f32,
    /// Max |ballX - paddleX| that still counts as a hit
    pub hit_threshold: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 0.1,
            height: 0.5,
            speed: 2.5,
            x_offset_from_wall: 0.2,
            z: 0.06,
            hit_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub z: f32,
    pub initial_speed: f32,
    /// Serve direction, normalized by the step engine
    pub initial_direction: Vec2,
    /// Added to the scalar speed on every paddle hit (0 disables)
    pub speed_increase_on_hit: f32,
    pub max_speed: f32,
    pub radius: f32,
    /// Vertical velocity added per unit of normalized hit offset
    pub spin_factor: f32,
    /// How far past the side wall the ball must travel before a point is scored
    pub out_of_bounds_margin: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            z: 0.07,
            initial_speed: 2.0,
            initial_direction: Vec2::new(1.0, 0.5),
            speed_increase_on_hit: 0.0,
            max_speed: 10.0,
            radius: 0.06,
            spin_factor: 0.6,
            out_of_bounds_margin: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub win_score: u32,
    pub round_reset_delay_ms: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_score: 5,
            round_reset_delay_ms: 1200.0,
        }
    }
}

/// Closed range of seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min_sec: f32,
    pub max_sec: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Max units per second the AI paddle slides toward its target
    pub follow_speed: f32,
    /// Max random aiming error in Y
    pub error_offset_max: f32,
    /// How long an aiming error is held before it is re-rolled
    pub error_change_interval: SecondsRange,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            follow_speed: 3.0,
            error_offset_max: 0.25,
            error_change_interval: SecondsRange {
                min_sec: 0.6,
                max_sec: 1.4,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrConfig {
    /// Multiplier applied to the controller's board-local Y
    pub vr_y_scale: f32,
    /// Desired-Y distance that maps to a full axis deflection
    pub axis_soft_limit: f32,
    /// Gamepad button index for calibrate
    pub calibrate_button: usize,
    /// Gamepad button index for restart
    pub restart_button: usize,
    /// Gamepad button index held to drag the board while placing it
    pub grab_button: usize,
}

impl Default for XrConfig {
    fn default() -> Self {
        Self {
            vr_y_scale: 2.0,
            axis_soft_limit: 0.25,
            calibrate_button: 0,
            restart_button: 1,
            grab_button: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Axis change per full viewport height of drag
    pub sensitivity: f32,
    /// Fraction of the viewport width where the control region begins
    pub active_region_start: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            sensitivity: 6.0,
            active_region_start: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub segments: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self { segments: 18 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub score_line_height_px: u32,
    pub message_line_height_px: u32,
    pub message_default_duration_ms: u32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            score_line_height_px: 64,
            message_line_height_px: 52,
            message_default_duration_ms: 1400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame dt clamp applied by the session before stepping
    pub max_frame_dt: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { max_frame_dt: 0.1 }
    }
}

/// Where the board root sits in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub position: Vec3,
    /// Yaw in radians
    pub rotation_y: f32,
    /// Uniform scale of the board root
    pub scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.2, -3.0),
            rotation_y: 0.0,
            scale: 0.8,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub field: FieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub scoring: ScoringConfig,
    pub ai: AiConfig,
    pub xr: XrConfig,
    pub touch: TouchConfig,
    pub trail: TrailConfig,
    pub hud: HudConfig,
    pub timing: TimingConfig,
    pub placement: PlacementConfig,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be non-negative and finite",
        })
    }
}

impl PongConfig {
    /// LocalStorage key for config overrides (web)
    pub const STORAGE_KEY: &'static str = "cyber_pong_config";
    /// Environment variable naming a config file (native)
    pub const CONFIG_ENV: &'static str = "CYBER_PONG_CONFIG";

    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `json` if given, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default config");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded config");
                config
            }
            Err(e) => {
                log::warn!("Ignoring config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Load overrides from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());
        Self::from_json_or_default(json.as_deref())
    }

    /// Load overrides from the file named by `CYBER_PONG_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var_os(Self::CONFIG_ENV).and_then(|path| {
            std::fs::read_to_string(&path)
                .map_err(|e| log::warn!("Cannot read {:?}: {}", path, e))
                .ok()
        });
        Self::from_json_or_default(json.as_deref())
    }

    /// Check the numeric invariants the step engine assumes
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field.width", self.field.width)?;
        positive("field.height", self.field.height)?;
        non_negative("field.wall_inset", self.field.wall_inset)?;

        positive("paddle.width", self.paddle.width)?;
        positive("paddle.height", self.paddle.height)?;
        positive("paddle.speed", self.paddle.speed)?;
        positive("paddle.x_offset_from_wall", self.paddle.x_offset_from_wall)?;
        non_negative("paddle.z", self.paddle.z)?;
        positive("paddle.hit_threshold", self.paddle.hit_threshold)?;
        if self.paddle.height >= self.field.height - 2.0 * self.field.wall_inset {
            return Err(ConfigError::Invalid {
                field: "paddle.height",
                reason: "must be smaller than field.height minus both wall insets",
            });
        }

        non_negative("ball.z", self.ball.z)?;
        positive("ball.initial_speed", self.ball.initial_speed)?;
        positive("ball.max_speed", self.ball.max_speed)?;
        non_negative("ball.speed_increase_on_hit", self.ball.speed_increase_on_hit)?;
        positive("ball.radius", self.ball.radius)?;
        non_negative("ball.spin_factor", self.ball.spin_factor)?;
        positive("ball.out_of_bounds_margin", self.ball.out_of_bounds_margin)?;
        let dir = self.ball.initial_direction;
        if !dir.is_finite() || dir.length_squared() == 0.0 {
            return Err(ConfigError::Invalid {
                field: "ball.initial_direction",
                reason: "must be finite and non-zero",
            });
        }
        if self.ball.max_speed < self.ball.initial_speed {
            return Err(ConfigError::Invalid {
                field: "ball.max_speed",
                reason: "must be >= ball.initial_speed",
            });
        }

        if self.scoring.win_score == 0 {
            return Err(ConfigError::Invalid {
                field: "scoring.win_score",
                reason: "must be at least 1",
            });
        }
        positive("scoring.round_reset_delay_ms", self.scoring.round_reset_delay_ms)?;

        positive("ai.follow_speed", self.ai.follow_speed)?;
        positive("ai.error_offset_max", self.ai.error_offset_max)?;
        let interval = self.ai.error_change_interval;
        positive("ai.error_change_interval.min_sec", interval.min_sec)?;
        positive("ai.error_change_interval.max_sec", interval.max_sec)?;
        if interval.min_sec > interval.max_sec {
            return Err(ConfigError::Invalid {
                field: "ai.error_change_interval",
                reason: "min_sec must be <= max_sec",
            });
        }

        positive("xr.vr_y_scale", self.xr.vr_y_scale)?;
        positive("xr.axis_soft_limit", self.xr.axis_soft_limit)?;
        positive("touch.sensitivity", self.touch.sensitivity)?;
        if !(0.0..1.0).contains(&self.touch.active_region_start) {
            return Err(ConfigError::Invalid {
                field: "touch.active_region_start",
                reason: "must be in [0, 1)",
            });
        }
        if self.trail.segments == 0 {
            return Err(ConfigError::Invalid {
                field: "trail.segments",
                reason: "must be at least 1",
            });
        }
        if self.hud.message_default_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "hud.message_default_duration_ms",
                reason: "must be at least 1",
            });
        }
        positive("timing.max_frame_dt", self.timing.max_frame_dt)?;

        if !self.placement.position.is_finite() || !self.placement.rotation_y.is_finite() {
            return Err(ConfigError::Invalid {
                field: "placement",
                reason: "position and rotation_y must be finite",
            });
        }
        positive("placement.scale", self.placement.scale)?;
        Ok(())
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.field.width / 2.0
    }

    /// Y of the top bounce line; the bottom one is its negation
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.field.height / 2.0 - self.field.wall_inset
    }

    /// Largest |Y| a paddle center may reach
    #[inline]
    pub fn paddle_limit(&self) -> f32 {
        self.half_height() - self.paddle.height / 2.0
    }

    /// X of the AI paddle
    #[inline]
    pub fn left_paddle_x(&self) -> f32 {
        -self.half_width() + self.paddle.x_offset_from_wall
    }

    /// X of the player paddle
    #[inline]
    pub fn right_paddle_x(&self) -> f32 {
        self.half_width() - self.paddle.x_offset_from_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PongConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.win_score, 5);
        assert_eq!(config.trail.segments, 18);
    }

    #[test]
    fn test_paddle_geometry() {
        let config = PongConfig::default();
        assert!((config.paddle_limit() - 0.8).abs() < 1e-6);
        assert!((config.left_paddle_x() + 1.6).abs() < 1e-6);
        assert!((config.right_paddle_x() - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PongConfig::from_json(r#"{ "scoring": { "win_score": 3 } }"#)
            .expect("partial config should load");
        assert_eq!(config.scoring.win_score, 3);
        assert_eq!(config.scoring.round_reset_delay_ms, 1200.0);
        assert_eq!(config.paddle, PaddleConfig::default());
    }

    #[test]
    fn test_rejects_max_speed_below_initial() {
        let json = r#"{ "ball": { "initial_speed": 4.0, "max_speed": 3.0 } }"#;
        match PongConfig::from_json(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "ball.max_speed"),
            other => panic!("expected invalid max_speed, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_direction() {
        let mut config = PongConfig::default();
        config.ball.initial_direction = Vec2::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            PongConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PongConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = PongConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_wall_inset_narrows_bounce_lines() {
        let config = PongConfig::from_json(r#"{ "field": { "wall_inset": 0.05 } }"#)
            .expect("inset config should load");
        assert!((config.half_height() - 1.0).abs() < 1e-6);
        assert!((config.paddle_limit() - 0.75).abs() < 1e-6);

        let mut config = PongConfig::default();
        config.field.wall_inset = 0.8;
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "paddle.height"),
            other => panic!("expected paddle.height to be rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_placement_section() {
        let config = PongConfig::from_json(
            r#"{ "placement": { "position": [0.5, 1.0, -2.0], "rotation_y": 1.571 } }"#,
        )
        .expect("placement config should load");
        assert_eq!(config.placement.position, Vec3::new(0.5, 1.0, -2.0));
        assert_eq!(config.placement.rotation_y, 1.571);
        assert_eq!(config.placement.scale, 0.8);
    }

    #[test]
    fn test_rejects_bad_placement_scale() {
        for scale in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            let mut config = PongConfig::default();
            config.placement.scale = scale;
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "placement.scale"),
                other => panic!("expected placement.scale to be rejected, got {:?}", other),
            }
        }
        let mut config = PongConfig::default();
        config.placement.position.x = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_to_defaults() {
        assert_eq!(PongConfig::from_json_or_default(None), PongConfig::default());
        assert_eq!(
            PongConfig::from_json_or_default(Some(r#"{"ball": {"max_speed": 0.5}}"#)),
            PongConfig::default()
        );
        let custom = PongConfig::from_json_or_default(Some(r#"{"scoring": {"win_score": 3}}"#));
        assert_eq!(custom.scoring.win_score, 3);
    }
}
