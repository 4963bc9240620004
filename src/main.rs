//! Catstaurant entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use catstaurant::audio::AudioManager;
    use catstaurant::renderer::CanvasRenderer;
    use catstaurant::sim::{Autopilot, GamePhase, GameState, HeldKeys, InputLatch, tick};
    use catstaurant::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        keys: HeldKeys,
        latch: InputLatch,
        autopilot: Option<Autopilot>,
    }

    impl Game {
        /// Run one simulation tick
        fn update(&mut self) {
            let held = match &mut self.autopilot {
                Some(pilot) => pilot.drive(&self.state),
                None => self.keys,
            };
            let input = self.latch.sample(held);
            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                self.audio.handle(&event);
            }
        }

        /// Render the current frame
        fn render(&self) {
            self.renderer.render(&self.state);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-carried .hud-value").ok().flatten() {
                let carried = self.state.carried.map(|k| k.as_str()).unwrap_or("-");
                el.set_text_content(Some(carried));
            }

            if let Some(el) = document.get_element_by_id("hud-muted") {
                let class = if self.settings.muted { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("hud-autopilot") {
                let class = if self.autopilot.is_some() { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Update held keys; returns true if the key belongs to the game
        fn set_key(&mut self, key: &str, down: bool) -> bool {
            match key {
                "ArrowLeft" => self.keys.left = down,
                "ArrowRight" => self.keys.right = down,
                "ArrowUp" => self.keys.up = down,
                "ArrowDown" => self.keys.down = down,
                " " => self.keys.interact = down,
                _ => return false,
            }
            true
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.settings.save();
            self.audio.apply_settings(&self.settings);
            log::info!("Muted: {}", muted);
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = match self.autopilot {
                Some(_) => None,
                None => Some(Autopilot::default()),
            };
            self.latch.reset();
            log::info!("Autopilot: {}", self.autopilot.is_some());
        }

        /// Window lost focus, keyup events will not arrive
        fn release_all(&mut self) {
            self.keys = HeldKeys::default();
            self.latch.reset();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Catstaurant starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };
        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let settings = Settings::load();
        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning),
            renderer,
            audio: AudioManager::new(&settings),
            settings,
            keys: HeldKeys::default(),
            latch: InputLatch::default(),
            autopilot: None,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let key = event.key();
                if g.set_key(&key, true) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    return;
                }
                if event.repeat() {
                    return;
                }
                match key.as_str() {
                    "m" | "M" => g.toggle_mute(),
                    "i" | "I" => g.toggle_autopilot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().set_key(&event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus lost
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().release_all();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One tick per display frame, no catch-up
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless demo: the autopilot plays until game over or the time runs out
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use catstaurant::audio::AudioManager;
    use catstaurant::consts::TICK_RATE;
    use catstaurant::sim::{Autopilot, GamePhase, GameState, InputLatch, tick};
    use catstaurant::{Settings, Tuning};

    const DEFAULT_DEMO_SECS: u32 = 120;

    env_logger::init();
    log::info!("Catstaurant (native) starting...");
    log::info!(
        "Native mode runs a headless autopilot demo - run with `trunk serve` for the web version"
    );

    let args: Vec<String> = std::env::args().collect();
    let tuning_path = args.get(1).map(PathBuf::from);
    let demo_secs = match args.get(2).map(|s| s.parse::<u32>()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            log::warn!("Bad demo length {:?}: {}", args[2], e);
            DEFAULT_DEMO_SECS
        }
        None => DEFAULT_DEMO_SECS,
    };

    let tuning = Tuning::load_from_path(tuning_path.as_deref());
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let mut state = GameState::with_tuning(seed, tuning);
    let audio = AudioManager::new(&Settings::load());
    let mut pilot = Autopilot::default();
    let mut latch = InputLatch::default();

    log::info!("Demo for {}s with seed {}", demo_secs, seed);

    for frame in 0..demo_ticks(demo_secs) {
        let input = latch.sample(pilot.drive(&state));
        tick(&mut state, &input);
        for event in state.drain_events() {
            audio.handle(&event);
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
        if frame > 0 && frame % (10 * TICK_RATE) == 0 {
            log::info!(
                "{:.0}s: {} served, {} cats in the cafe",
                state.elapsed_secs(),
                state.score,
                state.customers.len()
            );
        }
    }

    println!(
        "Demo finished after {:.1}s: {} cats served{}",
        state.elapsed_secs(),
        state.score,
        if state.phase == GamePhase::GameOver {
            " (game over)"
        } else {
            ""
        }
    );
}

/// Demo length in ticks, saturating for absurdly long demos
#[cfg(not(target_arch = "wasm32"))]
fn demo_ticks(secs: u32) -> u32 {
    secs.saturating_mul(catstaurant::consts::TICK_RATE)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ticks() {
        assert_eq!(demo_ticks(0), 0);
        assert_eq!(demo_ticks(120), 7200);
        assert_eq!(demo_ticks(100_000_000), u32::MAX);
    }
}
