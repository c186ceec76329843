//! Cyber Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use cyber_pong::audio::AudioManager;
    use cyber_pong::config::HudConfig;
    use cyber_pong::platform::{ListenerHandle, attach_keyboard, attach_touch};
    use cyber_pong::{PongConfig, PongSession};

    /// Game instance holding all state
    struct Game {
        session: Rc<RefCell<PongSession>>,
        audio: Rc<RefCell<AudioManager>>,
        last_time: f64,
        /// Kept alive for the lifetime of the page
        _listeners: Vec<ListenerHandle>,
    }

    impl Game {
        fn update(&mut self, dt: f32) {
            let mut audio = self.audio.borrow_mut();
            // WebXR frames come from the host page; the DOM build plays flat
            self.session.borrow_mut().frame(dt, None, &mut *audio);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.session.borrow();
            let hud = session.hud();

            if let Some(el) = document.query_selector("#hud-score").ok().flatten() {
                if el.text_content().as_deref() != Some(hud.score_line()) {
                    el.set_text_content(Some(hud.score_line()));
                }
            }
            if let Some(el) = document.query_selector("#hud-message").ok().flatten() {
                if el.text_content().as_deref() != Some(hud.message()) {
                    el.set_text_content(Some(hud.message()));
                }
            }
        }
    }

    /// Size the HUD lines once at boot
    fn style_hud(document: &web_sys::Document, hud: &HudConfig) {
        for (id, px) in [
            ("hud-score", hud.score_line_height_px),
            ("hud-message", hud.message_line_height_px),
        ] {
            if let Some(el) = document.get_element_by_id(id) {
                let style = format!("font-size:{}px;line-height:{}px", px * 3 / 4, px);
                let _ = el.set_attribute("style", &style);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Cyber Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let config = PongConfig::load();
        style_hud(&document, &config.hud);
        let seed = js_sys::Date::now() as u64;
        let session = Rc::new(RefCell::new(PongSession::new(config, seed)));
        let audio = Rc::new(RefCell::new(AudioManager::new()));

        let mut listeners = attach_keyboard(&window, session.clone())?;
        listeners.extend(attach_touch(&window, session.clone())?);

        // Browsers only allow audio after a user gesture
        for name in ["pointerdown", "keydown"] {
            let audio = audio.clone();
            listeners.push(ListenerHandle::new(
                &window,
                name,
                move |_event: web_sys::Event| audio.borrow().unlock(),
            )?);
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let session = session.clone();
            listeners.push(ListenerHandle::new(
                &btn,
                "click",
                move |_event: web_sys::MouseEvent| {
                    session.borrow_mut().restart();
                },
            )?);
        }

        let game = Rc::new(RefCell::new(Game {
            session,
            audio,
            last_time: 0.0,
            _listeners: listeners,
        }));

        request_animation_frame(game);
        log::info!("Cyber Pong running!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cyber_pong::present::SoundSink;
    use cyber_pong::sim::{GamePhase, PongEvent, SoundName};
    use cyber_pong::{PongConfig, PongSession};

    /// Simulation rate of the demo
    const FPS: f32 = 60.0;
    /// Give up after this many simulated seconds
    const MAX_SECONDS: f32 = 600.0;
    /// Dead zone of the scripted player
    const TRACK_TOLERANCE: f32 = 0.05;

    struct LogSink;

    impl SoundSink for LogSink {
        fn play(&mut self, name: SoundName) {
            let tone = name.tone();
            log::debug!("beep {:?} {} Hz", name, tone.frequency_hz);
        }
    }

    /// Hold the key that moves the player paddle toward the ball
    fn steer(session: &mut PongSession) {
        let state = session.state();
        let delta = state.ball.position.y - state.paddles.right_y;
        let desktop = session.desktop_mut();
        if delta > TRACK_TOLERANCE {
            desktop.key_up("ArrowDown");
            desktop.key_down("ArrowUp");
        } else if delta < -TRACK_TOLERANCE {
            desktop.key_up("ArrowUp");
            desktop.key_down("ArrowDown");
        } else {
            desktop.release_all();
        }
    }

    /// Play one scripted match against the AI at a fixed rate
    pub fn run(seed: u64) {
        let config = PongConfig::load();
        let mut session = PongSession::new(config, seed);
        let mut sink = LogSink;
        let dt = 1.0 / FPS;
        let mut elapsed = 0.0;

        while elapsed < MAX_SECONDS {
            steer(&mut session);
            let report = session.frame(dt, None, &mut sink);
            elapsed += dt;

            for event in &report.events {
                if let PongEvent::Message { text, .. } = event {
                    log::info!("[{:7.2}s] {}", elapsed, text);
                }
            }
            if session.state().phase() == GamePhase::GameOver {
                break;
            }
        }

        log::info!("Final: {}", session.hud().score_line());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cyber Pong (native) starting...");
    log::info!("Running headless demo match - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
