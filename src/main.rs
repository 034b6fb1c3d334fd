//! Sky Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_flap::assets::{AssetManifest, load_sprites, load_tuning_json};
    use sky_flap::audio::{AudioManager, HtmlAudioSink};
    use sky_flap::platform::{FpsCounter, HostAction, InputSource, map_key};
    use sky_flap::renderer::{SpriteRenderState, TextOverlay, build_scene};
    use sky_flap::sim::autopilot::should_flap;
    use sky_flap::sim::{GameEvent, GameSession, InputOutcome, Playfield, SpawnTicket};
    use sky_flap::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: SpriteRenderState,
        overlay: TextOverlay,
        audio: AudioManager<HtmlAudioSink>,
        settings: Settings,
        fps: FpsCounter,
        /// Demo pilot flies instead of the player
        autopilot: bool,
        /// Current `setInterval` handle and its callback
        spawn_timer: Option<(i32, Closure<dyn FnMut()>)>,
    }

    impl Game {
        /// Advance, play cues and draw one frame
        fn frame(&mut self, time: f64) {
            if self.autopilot && should_flap(self.session.state(), self.session.playfield()) {
                self.session.on_input(time);
            }
            self.session.tick(time);

            let events = self.session.drain_events();
            self.audio.dispatch(&events);
            if self.autopilot && events.iter().any(|e| matches!(e, GameEvent::Hit { .. })) {
                log::info!("Autopilot crashed at score {}", self.session.score());
            }

            let fps = self.fps.record(time);
            let scene = build_scene(
                self.session.state(),
                self.session.tuning(),
                self.session.playfield(),
                self.settings.show_fps.then_some(fps),
            );

            match self.render_state.render(&scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
            self.overlay.draw(&scene.texts);
        }

        fn toggle(&mut self, action: HostAction) {
            match action {
                HostAction::ToggleAutopilot => {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
                HostAction::ToggleMute => {
                    let muted = self.settings.toggle_mute();
                    self.audio.set_muted(muted);
                    self.settings.save();
                    log::info!("Muted: {}", muted);
                }
                HostAction::ToggleFps => {
                    self.settings.toggle_fps();
                    self.settings.save();
                }
                HostAction::Flap => {}
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn viewport_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w.max(1.0) as u32, h.max(1.0) as u32)
    }

    /// Create the transparent HUD canvas on top of the game canvas
    fn create_overlay_canvas(document: &web_sys::Document) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id("overlay");
        canvas.set_attribute(
            "style",
            "position:absolute;left:0;top:0;pointer-events:none",
        )?;
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&canvas)?;
        Ok(canvas)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Sky Flap starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no #canvas element"))?
            .dyn_into()?;
        let overlay_canvas = match document.get_element_by_id("overlay") {
            Some(el) => el.dyn_into()?,
            None => create_overlay_canvas(&document)?,
        };

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        // Assets must be ready before the first round
        let manifest = AssetManifest::default();
        let (sprites, tuning_json) =
            futures::join!(load_sprites(&manifest), load_tuning_json(&manifest));
        let sprites = sprites.map_err(|e| JsValue::from_str(&e.to_string()))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SpriteRenderState::new(surface, &adapter, width, height, &sprites)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let overlay = TextOverlay::new(overlay_canvas)?;
        overlay.resize(width, height);

        let settings = Settings::load();
        let mut audio = AudioManager::new(HtmlAudioSink::new(|cue| manifest.sound_url(cue)));
        audio.apply_settings(&settings);

        // Scale is decided once, from the viewport at startup
        let tuning =
            Tuning::from_json_or_default(tuning_json.as_deref()).for_viewport(width as f32);
        if let Err(e) = tuning.check_playfield(height as f32) {
            log::warn!("{}", e);
        }

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(
            tuning,
            Playfield::new(width as f32, height as f32),
            seed,
            now_ms(),
        );
        let ticket = session.spawn_ticket();

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state,
            overlay,
            audio,
            settings,
            fps: FpsCounter::new(),
            autopilot: false,
            spawn_timer: None,
        }));

        schedule_spawner(&game, ticket);
        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Flap running!");
        Ok(())
    }

    /// Replace the spawn interval with one bound to `ticket`
    fn schedule_spawner(game: &Rc<RefCell<Game>>, ticket: SpawnTicket) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let interval_ms = game.borrow().session.tuning().spawn_interval_ms;

        if let Some((handle, _closure)) = game.borrow_mut().spawn_timer.take() {
            window.clear_interval_with_handle(handle);
        }

        let game_for_timer = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game_for_timer.borrow_mut().session.on_spawn_timer(ticket);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(handle) => game.borrow_mut().spawn_timer = Some((handle, closure)),
            Err(e) => log::error!("Failed to start spawn timer: {:?}", e),
        }
    }

    /// Shared path for every flap/restart input
    fn handle_input(game: &Rc<RefCell<Game>>, source: InputSource) {
        let outcome = game.borrow_mut().session.on_input(now_ms());
        if let InputOutcome::Restarted(ticket) = outcome {
            log::info!("Restart from {:?}", source);
            schedule_spawner(game, ticket);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                handle_input(&game, InputSource::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start, without the page scrolling underneath
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                handle_input(&game, InputSource::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match map_key(&event.code()) {
                    Some(HostAction::Flap) => {
                        event.prevent_default();
                        if !event.repeat() {
                            handle_input(&game, InputSource::Key);
                        }
                    }
                    Some(action) => game.borrow_mut().toggle(action),
                    None => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.render_state.resize(width, height);
            g.overlay.resize(width, height);
            g.session.resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Sky Flap failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Flap (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    // sky-flap [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning_json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Cannot read tuning file {}: {}", path, e);
            None
        }
    });
    let tuning = sky_flap::Tuning::from_json_or_default(tuning_json.as_deref());
    headless::run(seed, 120.0, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fixed-rate demo rounds flown by the autopilot, with no window or GPU
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sky_flap::audio::{AudioManager, LogSink};
    use sky_flap::sim::autopilot::should_flap;
    use sky_flap::sim::{GameEvent, GamePhase, GameSession, Playfield};
    use sky_flap::{Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(seed: u64, seconds: f64, tuning: Tuning) {
        let playfield = Playfield::new(800.0, 600.0);
        let tuning = tuning.for_viewport(playfield.width);
        if let Err(e) = tuning.check_playfield(playfield.height) {
            log::warn!("{}", e);
        }
        let mut session = GameSession::new(tuning, playfield, seed, 0.0);
        let mut audio = AudioManager::new(LogSink);
        audio.apply_settings(&Settings::load());

        let mut rounds = 1u32;
        let mut best = 0u32;
        let mut now = 0.0;
        while now < seconds * 1000.0 {
            now += FRAME_MS;

            match session.phase() {
                GamePhase::Running if should_flap(session.state(), playfield) => {
                    session.on_input(now);
                }
                GamePhase::GameOver => {
                    session.on_input(now);
                    rounds += 1;
                }
                _ => {}
            }
            session.tick(now);
            session.poll_spawner(now);

            let events = session.drain_events();
            audio.dispatch(&events);
            for event in &events {
                match event {
                    GameEvent::Passed { score } => {
                        best = best.max(*score);
                        log::debug!("t={:.2}s passed, score {}", now / 1000.0, score)
                    }
                    GameEvent::Hit { cause } => {
                        log::info!("t={:.2}s round {} ended by {:?}", now / 1000.0, rounds, cause)
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Headless run finished: {:.0}s simulated, {} round(s), best score {}",
            seconds,
            rounds,
            best
        );
    }
}
