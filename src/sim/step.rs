//! Per-tick step engine
//!
//! `step_pong` is the whole rule set: paddle motion, AI tracking, ball
//! integration, collisions, scoring and the round/match lifecycle. It takes
//! the previous state by reference and returns a new one plus the ordered
//! side effects the presentation layer should perform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{
    AiState, BallState, GamePhase, GameState, Paddles, RoundState, Side, clamp_paddle_y,
};
use crate::config::PongConfig;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInput {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Whether an XR session is presenting
    pub is_xr: bool,
    /// Normalized vertical axis, `None` when no source has input
    pub move_y: Option<f32>,
    /// Edge-detected: true for exactly one tick per press
    pub calibrate_pressed: bool,
    /// Edge-detected: true for exactly one tick per press
    pub restart_pressed: bool,
}

impl StepInput {
    /// No input, only time
    pub fn idle(dt: f32) -> Self {
        Self {
            dt,
            ..Default::default()
        }
    }
}

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundName {
    Paddle,
    Wall,
    Score,
    GameOver,
    Calibrate,
}

/// Side effect requested by a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PongEvent {
    Sound {
        name: SoundName,
    },
    /// Show `text` for `ms` milliseconds (HUD default when `None`)
    Message {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ms: Option<u32>,
    },
}

impl PongEvent {
    pub fn sound(name: SoundName) -> Self {
        PongEvent::Sound { name }
    }

    pub fn message(text: impl Into<String>, ms: Option<u32>) -> Self {
        PongEvent::Message {
            text: text.into(),
            ms,
        }
    }
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub state: GameState,
    pub events: Vec<PongEvent>,
}

/// Duration of the "New match!" banner
const RESTART_MESSAGE_MS: u32 = 900;
/// Duration of the "Play!" banner
const START_MESSAGE_MS: u32 = 600;
/// Duration of the win banner
const WIN_MESSAGE_MS: u32 = 5000;

/// Move `current` toward `target` by at most `max_step`
#[inline]
fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    current + delta.max(-max_step).min(max_step)
}

/// Advance the game by one tick
pub fn step_pong<R: RandomSource + ?Sized>(
    config: &PongConfig,
    prev: &GameState,
    input: &StepInput,
    rng: &mut R,
) -> StepResult {
    let mut events = Vec::new();

    // Restart short-circuits everything else
    if prev.round.phase == GamePhase::GameOver && input.restart_pressed {
        events.push(PongEvent::sound(SoundName::Score));
        events.push(PongEvent::message("New match!", Some(RESTART_MESSAGE_MS)));
        return StepResult {
            state: GameState::new_match(config),
            events,
        };
    }

    let mut state = *prev;

    if state.round.phase == GamePhase::NotStarted {
        state = GameState::new_match(config);
        events.push(PongEvent::message("Play!", Some(START_MESSAGE_MS)));
    }

    if state.round.phase == GamePhase::RoundOver {
        let remaining = state.round.round_over_timer_ms - input.dt * 1000.0;
        if remaining > 0.0 {
            state.round.round_over_timer_ms = remaining;
        } else {
            // Resume with the re-served ball; motion starts next tick
            state.round = RoundState::in_phase(GamePhase::Playing);
        }
        return StepResult { state, events };
    }

    if state.round.phase != GamePhase::Playing {
        return StepResult { state, events };
    }

    let dt = input.dt;

    // --- Player (right paddle) ---
    let move_y = input.move_y.unwrap_or(0.0).clamp(-1.0, 1.0);
    let right_y = clamp_paddle_y(
        state.paddles.right_y + move_y * config.paddle.speed * dt,
        config,
    );

    // --- AI (left paddle) ---
    let mut next_change = state.ai.next_error_change_in_sec - dt;
    let mut error_offset = state.ai.error_offset_y;
    if next_change <= 0.0 {
        let max = config.ai.error_offset_max;
        let interval = config.ai.error_change_interval;
        error_offset = rng.between(-max, max);
        next_change = rng.between(interval.min_sec, interval.max_sec);
    }
    let target_left_y = state.ball.position.y + error_offset;
    let left_y = clamp_paddle_y(
        approach(
            state.paddles.left_y,
            target_left_y,
            config.ai.follow_speed * dt,
        ),
        config,
    );
    let paddles = Paddles { left_y, right_y };
    let ai = AiState {
        error_offset_y: error_offset,
        next_error_change_in_sec: next_change,
    };

    // --- Ball ---
    let direction = state.ball.direction.try_normalize().unwrap_or(Vec2::X);
    let mut speed = state.ball.speed;
    let mut vel = direction * speed;
    let mut pos = state.ball.position + vel * dt;

    let half_w = config.half_width();
    let half_h = config.half_height();

    // Top/bottom walls
    if pos.y > half_h {
        pos.y = half_h;
        vel.y = -vel.y.abs();
        events.push(PongEvent::sound(SoundName::Wall));
    } else if pos.y < -half_h {
        pos.y = -half_h;
        vel.y = vel.y.abs();
        events.push(PongEvent::sound(SoundName::Wall));
    }

    // Paddles: only a ball travelling toward a paddle can hit it
    let half_paddle = config.paddle.height / 2.0;
    let threshold = config.paddle.hit_threshold;
    let touches = |paddle_x: f32, paddle_y: f32| {
        (pos.x - paddle_x).abs() < threshold && (pos.y - paddle_y).abs() < half_paddle
    };

    let hit = if vel.x < 0.0 && touches(config.left_paddle_x(), left_y) {
        vel.x = vel.x.abs();
        Some(left_y)
    } else if vel.x > 0.0 && touches(config.right_paddle_x(), right_y) {
        vel.x = -vel.x.abs();
        Some(right_y)
    } else {
        None
    };

    if let Some(paddle_y) = hit {
        let offset = (pos.y - paddle_y) / half_paddle;
        vel.y += offset * config.ball.spin_factor;
        speed = (speed + config.ball.speed_increase_on_hit)
            .max(config.ball.initial_speed)
            .min(config.ball.max_speed);
        events.push(PongEvent::sound(SoundName::Paddle));
    }

    // --- Scoring ---
    let margin = config.ball.out_of_bounds_margin;
    let scorer = if pos.x < -half_w - margin {
        Some(Side::Right)
    } else if pos.x > half_w + margin {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(side) = scorer {
        let scored = GameState {
            score: state.score.with_point(side),
            paddles,
            ..state
        };
        let mut next = scored.next_round(config);
        events.push(PongEvent::sound(SoundName::Score));
        events.push(PongEvent::message(format!("{} scores!", side.label()), None));

        if next.score.get(side) >= config.scoring.win_score {
            next.round = RoundState::in_phase(GamePhase::GameOver);
            events.push(PongEvent::sound(SoundName::GameOver));
            events.push(PongEvent::message(
                format!("{} WINS - Press Restart", side.label().to_uppercase()),
                Some(WIN_MESSAGE_MS),
            ));
        }
        return StepResult {
            state: next,
            events,
        };
    }

    let ball = BallState {
        position: pos,
        direction: vel.try_normalize().unwrap_or(direction),
        speed,
    };

    StepResult {
        state: GameState {
            paddles,
            ball,
            ai,
            ..state
        },
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::FixedUnit;
    use crate::sim::state::Score;

    const DT: f32 = 1.0 / 60.0;

    fn playing(config: &PongConfig) -> GameState {
        let mut state = GameState::new_match(config);
        // Hold the current AI error for the whole test
        state.ai.next_error_change_in_sec = 100.0;
        state
    }

    fn sounds(events: &[PongEvent]) -> Vec<SoundName> {
        events
            .iter()
            .filter_map(|e| match e {
                PongEvent::Sound { name } => Some(*name),
                _ => None,
            })
            .collect()
    }

    fn messages(events: &[PongEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                PongEvent::Message { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_tick_starts_play() {
        let config = PongConfig::default();
        let state = GameState::new(&config);
        let result = step_pong(&config, &state, &StepInput::idle(DT), &mut FixedUnit(0.5));
        assert_eq!(result.state.phase(), GamePhase::Playing);
        assert_eq!(messages(&result.events), vec!["Play!".to_string()]);
        // Processing continued: the ball moved
        assert!(result.state.ball.position.x > 0.0);
    }

    #[test]
    fn test_player_paddle_follows_axis_and_clamps() {
        let config = PongConfig::default();
        let state = playing(&config);
        let input = StepInput {
            dt: 0.1,
            move_y: Some(1.0),
            ..Default::default()
        };
        let result = step_pong(&config, &state, &input, &mut FixedUnit(0.5));
        assert!((result.state.paddles.right_y - 0.25).abs() < 1e-6);

        let input = StepInput {
            dt: 10.0,
            move_y: Some(-1.0),
            ..Default::default()
        };
        let result = step_pong(&config, &state, &input, &mut FixedUnit(0.5));
        assert_eq!(result.state.paddles.right_y, -config.paddle_limit());
    }

    #[test]
    fn test_missing_axis_means_no_motion() {
        let config = PongConfig::default();
        let state = playing(&config);
        let result = step_pong(&config, &state, &StepInput::idle(0.1), &mut FixedUnit(0.5));
        assert_eq!(result.state.paddles.right_y, 0.0);
    }

    #[test]
    fn test_ai_error_offset_formula() {
        let config = PongConfig::default();
        let mut state = GameState::new_match(&config);
        state.ai = AiState {
            error_offset_y: 0.2,
            next_error_change_in_sec: 0.01,
        };
        let result = step_pong(&config, &state, &StepInput::idle(0.02), &mut FixedUnit(0.5));
        assert_eq!(result.state.ai.error_offset_y, 0.0);
        assert!((result.state.ai.next_error_change_in_sec - 1.0).abs() < 1e-6);

        // Extremes of the draw hit the configured bounds
        let result = step_pong(&config, &state, &StepInput::idle(0.02), &mut FixedUnit(0.0));
        assert_eq!(result.state.ai.error_offset_y, -config.ai.error_offset_max);
    }

    #[test]
    fn test_ai_offset_held_until_timer_expires() {
        let config = PongConfig::default();
        let mut state = GameState::new_match(&config);
        state.ai = AiState {
            error_offset_y: 0.2,
            next_error_change_in_sec: 0.5,
        };
        let result = step_pong(&config, &state, &StepInput::idle(0.1), &mut FixedUnit(0.9));
        assert_eq!(result.state.ai.error_offset_y, 0.2);
        assert!((result.state.ai.next_error_change_in_sec - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_ai_slides_at_follow_speed() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(0.0, 0.7);
        state.ball.direction = Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.1), &mut FixedUnit(0.5));
        // follow_speed 3.0 * 0.1 = 0.3, well short of the 0.7 target
        assert!((result.state.paddles.left_y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(0.0, config.half_height() - 0.01);
        state.ball.direction = Vec2::new(0.0, 1.0);
        let result = step_pong(&config, &state, &StepInput::idle(DT), &mut FixedUnit(0.5));
        assert_eq!(result.state.ball.position.y, config.half_height());
        assert!(result.state.ball.direction.y < 0.0);
        assert_eq!(sounds(&result.events), vec![SoundName::Wall]);
    }

    #[test]
    fn test_bottom_wall_bounce_reflects_and_clamps() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(0.0, -config.half_height() + 0.01);
        state.ball.direction = Vec2::new(0.0, -1.0);
        let result = step_pong(&config, &state, &StepInput::idle(DT), &mut FixedUnit(0.5));
        assert_eq!(result.state.ball.position.y, -config.half_height());
        assert!(result.state.ball.direction.y > 0.0);
        assert_eq!(sounds(&result.events), vec![SoundName::Wall]);
    }

    #[test]
    fn test_right_paddle_hit_reverses_and_speeds_up() {
        let mut config = PongConfig::default();
        config.ball.speed_increase_on_hit = 0.5;
        let mut state = playing(&config);
        state.paddles.right_y = 0.0;
        state.ball.position = Vec2::new(config.right_paddle_x() - 0.02, 0.1);
        state.ball.direction = Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.01), &mut FixedUnit(0.5));

        let ball = result.state.ball;
        assert!(ball.direction.x < 0.0);
        // Hit above center adds upward spin
        assert!(ball.direction.y > 0.0);
        assert!((ball.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(ball.speed, 2.5);
        assert_eq!(sounds(&result.events), vec![SoundName::Paddle]);
    }

    #[test]
    fn test_left_paddle_hit_below_center_spins_down() {
        let mut config = PongConfig::default();
        config.ball.speed_increase_on_hit = 0.5;
        let mut state = playing(&config);
        state.paddles.left_y = 0.0;
        state.ball.position = Vec2::new(config.left_paddle_x() + 0.02, -0.1);
        state.ball.direction = -Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.01), &mut FixedUnit(0.5));

        let ball = result.state.ball;
        assert!(ball.direction.x > 0.0);
        // Hit below center adds downward spin
        assert!(ball.direction.y < 0.0);
        assert!((ball.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(ball.speed, 2.5);
        assert_eq!(sounds(&result.events), vec![SoundName::Paddle]);
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let mut config = PongConfig::default();
        config.ball.speed_increase_on_hit = 5.0;
        config.ball.max_speed = 4.0;
        let mut state = playing(&config);
        state.ball.position = Vec2::new(config.left_paddle_x() + 0.02, 0.0);
        state.ball.direction = -Vec2::X;
        state.ball.speed = 3.5;
        state.paddles.left_y = 0.0;
        let result = step_pong(&config, &state, &StepInput::idle(0.001), &mut FixedUnit(0.5));
        assert_eq!(result.state.ball.speed, 4.0);
        assert!(result.state.ball.direction.x > 0.0);
    }

    #[test]
    fn test_ball_leaving_paddle_does_not_rehit() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(config.right_paddle_x() - 0.01, 0.0);
        state.ball.direction = -Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.001), &mut FixedUnit(0.5));
        assert!(result.state.ball.direction.x < 0.0);
        assert!(sounds(&result.events).is_empty());
    }

    #[test]
    fn test_ball_out_left_scores_for_player() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(-config.half_width() - 0.19, 0.9);
        state.ball.direction = -Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.1), &mut FixedUnit(0.5));

        assert_eq!(result.state.score, Score { left: 0, right: 1 });
        assert_eq!(result.state.phase(), GamePhase::RoundOver);
        assert_eq!(result.state.round.round_over_timer_ms, 1200.0);
        assert_eq!(result.state.ball, BallState::serve(&config));
        assert_eq!(sounds(&result.events), vec![SoundName::Score]);
        assert_eq!(messages(&result.events), vec!["Player scores!".to_string()]);
    }

    #[test]
    fn test_ball_out_right_scores_for_ai() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.ball.position = Vec2::new(config.half_width() + 0.19, -0.9);
        state.ball.direction = Vec2::X;
        let result = step_pong(&config, &state, &StepInput::idle(0.1), &mut FixedUnit(0.5));
        assert_eq!(result.state.score, Score { left: 1, right: 0 });
        assert_eq!(messages(&result.events), vec!["AI scores!".to_string()]);
    }

    #[test]
    fn test_round_over_pause_freezes_play() {
        let config = PongConfig::default();
        let state = playing(&config).next_round(&config);
        let input = StepInput {
            dt: 0.5,
            move_y: Some(1.0),
            ..Default::default()
        };
        let result = step_pong(&config, &state, &input, &mut FixedUnit(0.5));
        assert_eq!(result.state.phase(), GamePhase::RoundOver);
        assert!((result.state.round.round_over_timer_ms - 700.0).abs() < 1e-3);
        assert_eq!(result.state.paddles, state.paddles);
        assert_eq!(result.state.ball, state.ball);
        assert!(result.events.is_empty());

        // Exiting the pause resumes play without moving anything yet
        let input = StepInput { dt: 0.8, ..input };
        let result = step_pong(&config, &result.state, &input, &mut FixedUnit(0.5));
        assert_eq!(result.state.phase(), GamePhase::Playing);
        assert_eq!(result.state.paddles, state.paddles);
        assert_eq!(result.state.ball, BallState::serve(&config));
    }

    #[test]
    fn test_five_ai_points_end_the_match() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        let mut last_events = Vec::new();

        for _ in 0..5 {
            state.round = RoundState::in_phase(GamePhase::Playing);
            state.ball.position = Vec2::new(config.half_width() + 0.25, 0.0);
            state.ball.direction = Vec2::X;
            let result = step_pong(&config, &state, &StepInput::idle(DT), &mut FixedUnit(0.5));
            state = result.state;
            last_events = result.events;
        }

        assert_eq!(state.score, Score { left: 5, right: 0 });
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(sounds(&last_events).contains(&SoundName::GameOver));
        assert!(messages(&last_events).iter().any(|m| m.contains("AI WINS")));
    }

    #[test]
    fn test_game_over_waits_for_restart() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.score = Score { left: 5, right: 2 };
        state.round = RoundState::in_phase(GamePhase::GameOver);

        let input = StepInput {
            dt: 3.0,
            move_y: Some(1.0),
            calibrate_pressed: true,
            ..Default::default()
        };
        let result = step_pong(&config, &state, &input, &mut FixedUnit(0.5));
        assert_eq!(result.state, state);
        assert!(result.events.is_empty());

        let restart = StepInput {
            restart_pressed: true,
            ..input
        };
        let result = step_pong(&config, &state, &restart, &mut FixedUnit(0.5));
        assert_eq!(result.state, GameState::new_match(&config));
        assert_eq!(sounds(&result.events), vec![SoundName::Score]);
        assert_eq!(messages(&result.events), vec!["New match!".to_string()]);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let config = PongConfig::default();
        let mut state = playing(&config);
        state.score = Score { left: 1, right: 1 };
        let input = StepInput {
            dt: DT,
            restart_pressed: true,
            ..Default::default()
        };
        let result = step_pong(&config, &state, &input, &mut FixedUnit(0.5));
        assert_eq!(result.state.score, state.score);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&PongEvent::sound(SoundName::GameOver)).unwrap();
        assert_eq!(json, r#"{"type":"sound","name":"gameOver"}"#);
        let json = serde_json::to_string(&PongEvent::message("Play!", Some(600))).unwrap();
        assert_eq!(json, r#"{"type":"message","text":"Play!","ms":600}"#);
    }
}
