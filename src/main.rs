//! Forest Ray entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use forest_ray::audio::AudioManager;
    use forest_ray::consts::MAX_FRAME_DT;
    use forest_ray::renderer::Renderer;
    use forest_ray::sim::{GameEvent, GameState, TickInput, WorldBounds, tick};
    use forest_ray::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        audio: AudioManager,
        settings: Settings,
        high_score: HighScore,
        input: TickInput,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement) -> Self {
            let settings = Settings::load();
            let high_score = HighScore::load();

            let bounds = WorldBounds::new(
                canvas.width() as f32,
                canvas.height() as f32,
            );
            let mut state = GameState::new(seed, bounds);
            state.high_score = high_score.best;

            let mut audio = AudioManager::new();
            audio.set_volumes(
                settings.effective_sfx_volume(),
                settings.effective_ambient_volume(),
            );

            Self {
                state,
                renderer: Renderer::new(&canvas),
                audio,
                settings,
                high_score,
                input: TickInput::default(),
                canvas,
                last_time: 0.0,
            }
        }

        /// Match the canvas to the window and push the new bounds into the
        /// sim; entities clamp themselves on the next tick
        fn sync_bounds(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.width() as f64) as u32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.canvas.height() as f64) as u32;

            if self.canvas.width() != width || self.canvas.height() != height {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
            self.state.bounds.resize(width as f32, height as f32);
        }

        /// One display-refresh step: tick the sim, drain events, draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                MAX_FRAME_DT
            };
            self.last_time = time;

            self.sync_bounds();
            let input = self.input;
            tick(&mut self.state, &input, dt);

            // One-shot inputs are consumed by the tick they were seen in
            self.input.jump = false;
            self.input.cycle_weapon = false;
            self.input.restart = false;

            for event in self.state.drain_events() {
                if let GameEvent::HighScore(best) = event {
                    if self.high_score.record(best) {
                        self.high_score.save();
                    }
                }
                self.audio.handle(&event);
            }

            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Forest Ray starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone())));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_pointer(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Forest Ray running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: held directions/fire plus one-shot jump/cycle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if matches!(
                    code.as_str(),
                    "Space" | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Tab"
                ) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                match code.as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "Space" => g.input.fire = true,
                    "ArrowUp" => {
                        if !event.repeat() {
                            g.input.jump = true;
                        }
                    }
                    "Tab" => {
                        if !event.repeat() {
                            g.input.cycle_weapon = true;
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup: release held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "Space" => g.input.fire = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Tap: restart when dead, otherwise jump. Also the user gesture
        // browsers require before audio may start.
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            let mut g = game.borrow_mut();
            if g.state.game_over {
                g.input.restart = true;
            } else {
                g.input.jump = true;
            }
            g.audio.resume();
            g.audio.start_ambient();
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use forest_ray::consts::MAX_FRAME_DT;
    use forest_ray::sim::{GameState, TickInput, WorldBounds, tick};

    env_logger::init();
    log::info!("Forest Ray (native) starting...");
    log::info!("Native mode runs a headless demo session - serve the wasm build for the game");

    let mut state = GameState::new(42, WorldBounds::new(1280.0, 720.0));
    let input = TickInput {
        right: true,
        fire: true,
        ..Default::default()
    };

    // Thirty seconds of walking right with the trigger held
    for _ in 0..900 {
        tick(&mut state, &input, MAX_FRAME_DT);
        if state.game_over {
            break;
        }
    }

    println!(
        "Headless session: level {} | kills {} | score {} | game over: {}",
        state.level, state.kills, state.score, state.game_over
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
