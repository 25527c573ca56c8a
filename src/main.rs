//! Dino Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use dino_runner::Settings;
    use dino_runner::platform::{Clock, FrameRegistration, PlatformError, SystemClock};
    use dino_runner::renderer::{Palette, RenderState};
    use dino_runner::sim::{ActionOutcome, GameState, TickInput, on_action, tick};

    const CANVAS_ID: &str = "canvas";

    struct Game {
        state: GameState,
        rng: Pcg32,
        settings: Settings,
        clock: SystemClock,
        render_state: Option<RenderState>,
        /// Live only while a run is in progress
        frame_loop: Option<FrameRegistration>,
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, clock: SystemClock) -> Self {
            let seed = settings.seed_or(js_sys::Date::now() as u64);
            log::info!("Game initialized with seed: {}", seed);
            Self {
                state: GameState::new(),
                rng: Pcg32::seed_from_u64(seed),
                settings,
                clock,
                render_state: None,
                frame_loop: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn frame_loop_live(&self) -> bool {
            self.frame_loop.as_ref().is_some_and(|f| f.is_live())
        }

        /// One animation frame. Returns whether the loop should continue.
        fn frame(&mut self) -> bool {
            let now = self.clock.now_ms();
            let input = TickInput {
                now,
                surface_ready: self.render_state.is_some(),
                cadence: self.settings.spawn_cadence,
            };
            let report = tick(&mut self.state, &input, &mut self.rng);
            if report.collided {
                log::info!("Final score: {}", self.state.score());
            }

            self.record_frame_time(now);
            self.render();
            self.update_hud();
            self.state.is_active()
        }

        fn record_frame_time(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score())));
            }

            set_visible(&document, "start-screen", !self.state.started());
            set_visible(&document, "game-over", self.state.over());

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Dino Runner starting...");

        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| PlatformError::MissingElement { id: CANVAS_ID.into() })?
            .dyn_into()
            .map_err(|_| PlatformError::NotACanvas { id: CANVAS_ID.into() })?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let palette = Palette::for_settings(settings.high_contrast);
        let game = Rc::new(RefCell::new(Game::new(settings, SystemClock::new()?)));

        // Input works before the renderer is up; collisions wait for it
        setup_input_handler(game.clone())?;
        game.borrow().update_hud();

        match init_renderer(canvas, width, height, palette).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                g.render();
            }
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        log::info!("Dino Runner running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        palette: Palette,
    ) -> Result<RenderState, PlatformError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| PlatformError::Graphics(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| PlatformError::Graphics(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, palette).await
    }

    fn setup_input_handler(game: Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.code() != "Space" {
                return;
            }
            event.prevent_default();

            let needs_loop = {
                let mut g = game.borrow_mut();
                let now = g.clock.now_ms();
                let outcome = on_action(&mut g.state, now);
                g.update_hud();
                matches!(outcome, ActionOutcome::Started | ActionOutcome::Restarted)
                    && !g.frame_loop_live()
            };

            if needs_loop {
                if let Err(e) = start_frame_loop(&game) {
                    log::error!("Could not start frame loop: {}", e);
                }
            }
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|_| PlatformError::Callback("keydown listener rejected".into()))?;
        closure.forget();
        Ok(())
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Register the per-frame callback; the registration lives in `Game::frame_loop`
    fn start_frame_loop(game: &Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let pending = Rc::new(Cell::new(0));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        {
            let game = game.clone();
            let callback_ref = callback.clone();
            let pending = pending.clone();
            let window = window.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let keep_going = game.borrow_mut().frame();
                if !keep_going {
                    // Run over: deregister. Taken out before dropping so the
                    // registration is not released while borrowed.
                    let registration = game.borrow_mut().frame_loop.take();
                    drop(registration);
                    return;
                }
                if let Some(cb) = callback_ref.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(id),
                        Err(_) => log::error!("requestAnimationFrame failed"),
                    }
                }
            }));
        }

        let first_id = match callback.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|_| PlatformError::Callback("requestAnimationFrame failed".into()))?,
            None => return Ok(()),
        };
        pending.set(first_id);

        let registration = FrameRegistration::new(move || {
            let _ = window.cancel_animation_frame(pending.get());
            // The closure may be the one running right now; free it after
            // the current task instead of from inside itself.
            let closure = callback.borrow_mut().take();
            wasm_bindgen_futures::spawn_local(async move {
                drop(closure);
            });
            log::info!("Frame loop stopped");
        });
        game.borrow_mut().frame_loop = Some(registration);
        log::info!("Frame loop started");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Dino Runner failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Runner (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let settings = dino_runner::Settings::load();
    let summary = headless::run_demo(&settings, 60 * 120);
    println!(
        "\nDemo finished after {} frames: score {}, {} obstacle batches, {}",
        summary.frames,
        summary.score,
        summary.batches,
        if summary.crashed { "crashed" } else { "survived" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use dino_runner::Settings;
    use dino_runner::consts::{DINO_X, DINO_WIDTH, REFERENCE_FRAME_MS};
    use dino_runner::platform::{Clock, ManualClock};
    use dino_runner::sim::{GameState, TickInput, on_action, tick};

    pub struct DemoSummary {
        pub frames: u32,
        pub score: u64,
        pub batches: u32,
        pub crashed: bool,
    }

    /// Play at 60 Hz with a naive autopilot that hops when a cactus is close
    pub fn run_demo(settings: &Settings, max_frames: u32) -> DemoSummary {
        let clock = ManualClock::starting_at(0.0);
        let mut rng = Pcg32::seed_from_u64(settings.seed_or(0x5EED));
        let mut state = GameState::new();
        on_action(&mut state, clock.now_ms());

        let mut summary = DemoSummary {
            frames: 0,
            score: 0,
            batches: 0,
            crashed: false,
        };

        while summary.frames < max_frames && state.is_active() {
            clock.advance(REFERENCE_FRAME_MS);
            let danger = state
                .obstacles()
                .iter()
                .any(|o| o.x > DINO_X + DINO_WIDTH && o.x < DINO_X + DINO_WIDTH + 30.0);
            if danger && !state.is_jumping() {
                on_action(&mut state, clock.now_ms());
            }

            let input = TickInput {
                now: clock.now_ms(),
                surface_ready: true,
                cadence: settings.spawn_cadence,
            };
            let report = tick(&mut state, &input, &mut rng);
            if report.spawned > 0 {
                summary.batches += 1;
            }
            summary.frames += 1;
        }

        summary.score = state.score();
        summary.crashed = state.over();
        log::info!(
            "Demo: {} frames, score {}, crashed: {}",
            summary.frames,
            summary.score,
            summary.crashed
        );
        summary
    }
}
