//! Koala Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use koala_dash::assets::{AssetCatalog, AssetError, AssetManifest};
    use koala_dash::consts::FRAME_RATE;
    use koala_dash::persistence::submit_final_score;
    use koala_dash::platform::InputState;
    use koala_dash::renderer::{CanvasRenderer, FrameView, Renderer, build_scene};
    use koala_dash::sim::{GameEvent, GamePhase, GameState, tick};
    use koala_dash::ui::{self, UiAction, UiState};
    use koala_dash::{GameError, HighScores, Settings, Tuning, Viewport};

    /// Milliseconds per simulation frame
    const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;
    /// Max ticks per animation frame before dropping the backlog
    const MAX_SUBSTEPS: u32 = 4;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        input: InputState,
        settings: Settings,
        scores: HighScores,
        background_layers: usize,
        accumulator: f64,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(100.0)
            } else {
                FRAME_MS
            };
            self.last_time = time;
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                let input = self.input.take_tick_input();
                tick(&mut self.state, &input);
                self.handle_events();
                self.accumulator -= FRAME_MS;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        if self.scores.qualifies(score) {
                            ask_player_name(&mut self.settings);
                        }
                        submit_final_score(
                            &mut self.scores,
                            &self.state,
                            self.settings.submission_name(),
                        );
                    }
                    GameEvent::Restarted { .. } => self.input.clear(),
                    GameEvent::LevelUp { level } => log::info!("Level {level}"),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let mut view = FrameView::new(&self.state, self.background_layers);
            if self.settings.show_fps {
                view = view.with_fps(self.fps);
            }
            let commands = build_scene(&view);
            self.renderer.draw(&commands);
        }

        fn ui_state(&self) -> UiState {
            UiState::from(self.state.phase)
        }

        /// Apply a button press, handling page-level actions here
        fn press(&mut self, action: UiAction) {
            let state = self.ui_state();
            if let Some(page_action) = self.input.apply_ui(action, state) {
                page_navigate(page_action);
            }
        }
    }

    /// Prompt for the name to put on the leaderboard, remembering it
    fn ask_player_name(settings: &mut Settings) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.prompt_with_message_and_default("New high score! Your name:", &settings.player_name) {
            Ok(Some(name)) if !name.trim().is_empty() => {
                settings.player_name = name.trim().to_string();
                if let Err(e) = settings.save() {
                    log::warn!("Could not save player name: {e}");
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Name prompt failed: {e:?}"),
        }
    }

    fn page_navigate(action: UiAction) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match action {
            UiAction::GoHome => {
                if let Err(e) = window.location().set_href("/") {
                    log::warn!("Navigation failed: {e:?}");
                }
            }
            UiAction::Exit => {
                log::info!("Exiting game");
                let _ = window.close();
            }
            _ => {}
        }
    }

    /// Start every image download, then wait for all of them to decode
    async fn load_images(manifest: &AssetManifest) -> Result<AssetCatalog<HtmlImageElement>, AssetError> {
        let catalog = AssetCatalog::load_with(manifest, |path| {
            let img = HtmlImageElement::new().map_err(|e| AssetError::Load {
                path: path.to_string(),
                reason: format!("{e:?}"),
            })?;
            img.set_src(path);
            Ok(img)
        })?;

        for (path, img) in manifest.all_paths().zip(catalog.iter()) {
            JsFuture::from(img.decode())
                .await
                .map_err(|e| AssetError::Load {
                    path: path.to_string(),
                    reason: format!("{e:?}"),
                })?;
        }
        log::info!("Loaded {} images", manifest.all_paths().count());
        Ok(catalog)
    }

    /// Balance overrides from an inline `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning overrides from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Koala Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let viewport = Viewport::new(width as f32, height as f32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let manifest = AssetManifest::default();
        let images = match load_images(&manifest).await {
            Ok(images) => images,
            Err(e) => {
                log::error!("{e}");
                return Err(JsValue::from_str(&e.to_string()));
            }
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, tuning, viewport, images.obstacle_variants())
            .map_err(|e: GameError| {
                log::error!("{e}");
                JsValue::from_str(&e.to_string())
            })?;

        let game = Rc::new(RefCell::new(Game {
            state,
            background_layers: images.backgrounds.len(),
            renderer: CanvasRenderer::new(ctx, images),
            input: InputState::new(&settings),
            settings,
            scores: HighScores::load(),
            accumulator: 0.0,
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Koala Dash running!");
        Ok(())
    }

    /// Touch point relative to the canvas
    fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            (touch.client_x() as f64 - rect.left()) as f32,
            (touch.client_y() as f64 - rect.top()) as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click on menu buttons
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                if let Some(action) = ui::hit_test(g.ui_state(), g.state.viewport, point) {
                    g.press(action);
                }
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (swipe origin, buttons, double tap on menu)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(point) = touch_point(&canvas_clone, &event) else {
                    return;
                };
                let mut g = game.borrow_mut();
                let state = g.ui_state();
                let viewport = g.state.viewport;
                if let Some(page_action) = g.input.touch_start(point, js_sys::Date::now(), state, viewport) {
                    page_navigate(page_action);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (swipes)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    game.borrow_mut().input.touch_move(point);
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.touch_end();
            });
            let _ = canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
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
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        g.press(UiAction::TogglePause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.clear();
                if g.state.phase == GamePhase::Running {
                    g.press(UiAction::TogglePause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use koala_dash::assets::AssetManifest;
    use koala_dash::autopilot;
    use koala_dash::persistence::submit_final_score;
    use koala_dash::sim::{GameEvent, GameState, tick};
    use koala_dash::{GameError, HighScores, Settings, Tuning, Viewport};

    /// Viewport of the reference layout
    const VIEWPORT: Viewport = Viewport {
        width: 834.0,
        height: 750.0,
    };

    /// Headless autopilot run
    #[derive(Parser, Debug)]
    #[command(name = "koala-dash")]
    #[command(about = "Play a seeded Koala Dash session with the autopilot", long_about = None)]
    pub struct Args {
        /// Session RNG seed
        #[arg(long, default_value_t = 42)]
        pub seed: u64,

        /// Stop after this many frames if the run is still going
        #[arg(long = "frames", default_value_t = 60 * 60 * 5)]
        pub max_frames: u64,

        /// JSON file with balance overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    /// Play one seeded session with the autopilot and report the result
    pub fn run(args: Args) -> Result<(), GameError> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::from_file(path)?,
            None => Tuning::default(),
        };
        let manifest = AssetManifest::default();
        manifest.validate()?;

        let settings = Settings::load();
        let mut scores = HighScores::load();
        let mut state = GameState::new(args.seed, tuning, VIEWPORT, manifest.obstacles.len())?;

        while state.frame < args.max_frames && !state.is_over() {
            let input = autopilot::steer(&state);
            tick(&mut state, &input);
            for event in state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => {
                        log::info!("Level {level} at frame {}", state.frame);
                    }
                    GameEvent::GameOver { .. } => {
                        submit_final_score(&mut scores, &state, settings.submission_name());
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Seed {}: {} after {} frames, score {}, distance {:.0}m, level {}",
            state.seed,
            if state.is_over() { "crashed" } else { "survived" },
            state.frame,
            state.score,
            state.distance,
            state.level
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Koala Dash (native) starting headless run...");

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
