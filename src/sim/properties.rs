//! Property tests for the step engine

use glam::Vec2;
use proptest::prelude::*;

use super::rng::GameRng;
use super::state::{AiState, BallState, GamePhase, GameState, Paddles, RoundState, Score};
use super::step::{PongEvent, SoundName, StepInput, step_pong};
use crate::config::PongConfig;

fn config() -> PongConfig {
    let mut config = PongConfig::default();
    config.ball.speed_increase_on_hit = 0.4;
    config.ball.max_speed = 4.0;
    config
}

/// (dt, axis, axis present, restart pressed)
fn tick_inputs() -> impl Strategy<Value = Vec<(f32, f32, bool, bool)>> {
    prop::collection::vec(
        (0.0f32..0.05, -1.0f32..=1.0, any::<bool>(), any::<bool>()),
        1..400,
    )
}

fn to_input((dt, axis, has_axis, restart): (f32, f32, bool, bool)) -> StepInput {
    StepInput {
        dt,
        move_y: has_axis.then_some(axis),
        restart_pressed: restart,
        ..Default::default()
    }
}

prop_compose! {
    fn playing_state()(
        x in -1.8f32..1.8,
        y in -1.05f32..1.05,
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 2.0f32..4.0,
        left_y in -0.8f32..0.8,
        right_y in -0.8f32..0.8,
        offset in -0.25f32..0.25,
        next_change in 0.0f32..1.4,
        left in 0u32..4,
        right in 0u32..4,
    ) -> GameState {
        GameState {
            score: Score { left, right },
            paddles: Paddles { left_y, right_y },
            ball: BallState {
                position: Vec2::new(x, y),
                direction: Vec2::from_angle(angle),
                speed,
            },
            ai: AiState { error_offset_y: offset, next_error_change_in_sec: next_change },
            round: RoundState::in_phase(GamePhase::Playing),
        }
    }
}

fn scored(events: &[PongEvent]) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            PongEvent::Sound {
                name: SoundName::Score
            }
        )
    })
}

proptest! {
    #[test]
    fn zero_dt_is_identity(state in playing_state(), axis in -1.0f32..=1.0, seed in any::<u64>()) {
        let config = config();
        let input = StepInput { dt: 0.0, move_y: Some(axis), ..Default::default() };
        let result = step_pong(&config, &state, &input, &mut GameRng::new(seed));
        prop_assert_eq!(result.state.ball.position, state.ball.position);
        prop_assert_eq!(result.state.paddles, state.paddles);
        prop_assert_eq!(result.state.score, state.score);
    }

    #[test]
    fn direction_stays_unit_and_paddles_in_bounds(inputs in tick_inputs(), seed in any::<u64>()) {
        let config = config();
        let limit = config.paddle_limit();
        let mut rng = GameRng::new(seed);
        let mut state = GameState::new(&config);
        for tick in inputs {
            state = step_pong(&config, &state, &to_input(tick), &mut rng).state;
            if state.phase() == GamePhase::Playing {
                prop_assert!((state.ball.direction.length() - 1.0).abs() < 1e-4);
            }
            prop_assert!(state.paddles.left_y.abs() <= limit);
            prop_assert!(state.paddles.right_y.abs() <= limit);
        }
    }

    #[test]
    fn speed_never_drops_between_points(inputs in tick_inputs(), seed in any::<u64>()) {
        let config = config();
        let mut rng = GameRng::new(seed);
        let mut state = GameState::new_match(&config);
        for tick in inputs {
            let result = step_pong(&config, &state, &to_input(tick), &mut rng);
            if !scored(&result.events) && result.state.phase() == GamePhase::Playing {
                prop_assert!(result.state.ball.speed >= state.ball.speed);
            }
            prop_assert!(result.state.ball.speed >= config.ball.initial_speed);
            prop_assert!(result.state.ball.speed <= config.ball.max_speed);
            state = result.state;
        }
    }

    #[test]
    fn game_over_is_sticky_until_restart(
        inputs in prop::collection::vec((0.0f32..5.0, -1.0f32..=1.0, any::<bool>()), 1..100),
        left in 0u32..5,
    ) {
        let config = config();
        let mut state = GameState::new_match(&config);
        state.score = Score { left, right: config.scoring.win_score };
        state.round = RoundState::in_phase(GamePhase::GameOver);
        let frozen = state;
        let mut rng = GameRng::new(1);
        for (dt, axis, has_axis) in inputs {
            let input = StepInput { dt, move_y: has_axis.then_some(axis), ..Default::default() };
            state = step_pong(&config, &state, &input, &mut rng).state;
            prop_assert_eq!(state, frozen);
        }
        let restart = StepInput { restart_pressed: true, ..StepInput::idle(0.016) };
        state = step_pong(&config, &state, &restart, &mut rng).state;
        prop_assert_eq!(state.phase(), GamePhase::Playing);
        prop_assert_eq!(state.score, Score::default());
    }

    #[test]
    fn round_over_pause_holds_paddles(
        dts in prop::collection::vec(0.0f32..0.05, 1..200),
        axis in -1.0f32..=1.0,
    ) {
        let config = config();
        let mut state = GameState::new_match(&config);
        state.ball.position = Vec2::new(config.half_width() + 0.3, 0.0);
        state.ball.direction = Vec2::X;
        state.paddles.right_y = 0.4;
        let mut rng = GameRng::new(9);
        let result = step_pong(&config, &state, &StepInput::idle(0.001), &mut rng);
        prop_assert!(scored(&result.events));
        state = result.state;
        let paddles = state.paddles;

        let mut elapsed_ms = 0.0f32;
        for dt in dts {
            let input = StepInput { dt, move_y: Some(axis), ..Default::default() };
            let was_paused = state.phase() == GamePhase::RoundOver;
            state = step_pong(&config, &state, &input, &mut rng).state;
            elapsed_ms += dt * 1000.0;
            if was_paused {
                prop_assert_eq!(state.paddles, paddles);
            }
            // Rounded well inside the delay, the pause must still hold
            if elapsed_ms < config.scoring.round_reset_delay_ms - 1.0 {
                prop_assert_eq!(state.phase(), GamePhase::RoundOver);
            }
        }
    }
}
