//! Frame driver
//!
//! `PongSession` owns everything with a lifetime longer than one tick: the
//! game state, the RNG, the three samplers, the board pose and the
//! presentation handles.
//! Each `frame` samples, routes, steps, then fans the resulting events out
//! to the HUD and a `SoundSink`.

use crate::config::PongConfig;
use crate::input::{
    BoardPlacementMode, BoardPose, DesktopInput, InputSource, RouterFlags, SourceSamples,
    TouchInput, XrFrame, XrInput, select_source,
};
use crate::present::{Hud, SceneHandles, SoundSink};
use crate::sim::{
    GamePhase, GameRng, GameState, PongEvent, Side, SoundName, StepInput, step_pong,
};

/// HUD banner shown after a successful XR calibration
const CALIBRATED_MESSAGE_MS: u32 = 700;
const PLACEMENT_TOGGLE_MESSAGE_MS: u32 = 1800;
const PLACEMENT_LOGGED_MESSAGE_MS: u32 = 1200;

/// What happened during one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Sampler that drove this frame
    pub source: InputSource,
    /// Events from the step, already dispatched
    pub events: Vec<PongEvent>,
}

pub struct PongSession {
    config: PongConfig,
    state: GameState,
    rng: GameRng,
    desktop: DesktopInput,
    touch: TouchInput,
    xr: XrInput,
    board: BoardPose,
    placement: BoardPlacementMode,
    hud: Hud,
    scene: SceneHandles,
}

impl PongSession {
    pub fn new(config: PongConfig, seed: u64) -> Self {
        let state = GameState::new(&config);
        let mut scene = SceneHandles::new(&config);
        scene.apply(&state);
        log::info!("Pong session created with seed: {}", seed);
        Self {
            rng: GameRng::new(seed),
            desktop: DesktopInput::new(),
            touch: TouchInput::new(&config.touch),
            xr: XrInput::new(&config.xr),
            board: BoardPose::from_placement(&config.placement),
            placement: BoardPlacementMode::new(&config.placement, config.xr.grab_button),
            hud: Hud::new(&config.hud),
            scene,
            state,
            config,
        }
    }

    /// Run one frame of `dt` seconds
    pub fn frame(
        &mut self,
        dt: f32,
        xr: Option<&XrFrame>,
        sink: &mut impl SoundSink,
    ) -> FrameReport {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.timing.max_frame_dt)
        } else {
            0.0
        };

        // Sample every source so edge state stays current even when unused
        let xr_presenting = xr.is_some_and(|f| f.presenting);
        let samples = SourceSamples {
            xr: self.xr.sample(xr, &self.board),
            touch: self.touch.sample(),
            desktop: self.desktop.sample(),
        };
        let source = select_source(RouterFlags {
            xr_presenting,
            touch_active: self.touch.is_active(),
        });
        let input = samples.get(source);

        let keys = self.desktop.take_placement_actions();
        if keys.toggle {
            self.toggle_placement();
        }
        if keys.log {
            self.log_placement();
        }
        if self.placement.update(xr) {
            self.board = self.placement.board_pose();
        }

        if input.actions.calibrate_pressed
            && xr_presenting
            && self.xr.calibrate_at_current_pose(xr, &self.board)
        {
            sink.play(SoundName::Calibrate);
            self.hud.set_message("Calibrated", Some(CALIBRATED_MESSAGE_MS));
        }

        let step_input = StepInput {
            dt,
            is_xr: xr_presenting,
            move_y: input.move_y,
            calibrate_pressed: input.actions.calibrate_pressed,
            restart_pressed: input.actions.restart_pressed,
        };
        let prev_phase = self.state.phase();
        let result = step_pong(&self.config, &self.state, &step_input, &mut self.rng);
        self.state = result.state;

        let phase = self.state.phase();
        if phase != prev_phase {
            log::debug!("Phase {:?} -> {:?}", prev_phase, phase);
            if phase == GamePhase::GameOver {
                let winner = self.state.winner(&self.config).map_or("nobody", Side::label);
                log::info!(
                    "Match over, {} wins: AI {} - {} Player",
                    winner,
                    self.state.score.left,
                    self.state.score.right
                );
            }
        }

        self.scene.apply(&self.state);
        self.hud.set_score(self.state.score.left, self.state.score.right);
        self.hud.tick(dt);

        for event in &result.events {
            match event {
                PongEvent::Sound { name } => sink.play(*name),
                PongEvent::Message { text, ms } => self.hud.set_message(text, *ms),
            }
        }

        FrameReport {
            source,
            events: result.events,
        }
    }

    /// Drop back to a fresh, not-yet-started match
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.config);
        self.scene.apply(&self.state);
        self.hud.set_score(0, 0);
        log::info!("Session restarted");
    }

    /// Switch board placement mode on or off
    pub fn toggle_placement(&mut self) {
        let message = if self.placement.toggle() {
            "DEV CALIBRATION: ON (hold GRIP to move board)"
        } else {
            "DEV CALIBRATION: OFF"
        };
        self.hud.set_message(message, Some(PLACEMENT_TOGGLE_MESSAGE_MS));
    }

    /// Print the board placement as a pasteable config section
    pub fn log_placement(&mut self) {
        let placement = self.placement.placement_for_config();
        match serde_json::to_string(&placement) {
            Ok(json) => log::info!("placement = {}", json),
            Err(e) => log::warn!("Cannot serialize placement: {}", e),
        }
        self.hud
            .set_message("placement logged to console", Some(PLACEMENT_LOGGED_MESSAGE_MS));
    }

    pub fn config(&self) -> &PongConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn scene(&self) -> &SceneHandles {
        &self.scene
    }

    pub fn xr(&self) -> &XrInput {
        &self.xr
    }

    pub fn board(&self) -> &BoardPose {
        &self.board
    }

    pub fn placement(&self) -> &BoardPlacementMode {
        &self.placement
    }

    pub fn desktop_mut(&mut self) -> &mut DesktopInput {
        &mut self.desktop
    }

    pub fn touch_mut(&mut self) -> &mut TouchInput {
        &mut self.touch
    }
}
