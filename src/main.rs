//! Nitro Lane entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlSelectElement, KeyboardEvent, Window};

    use nitro_lane::consts::*;
    use nitro_lane::renderer::{RenderState, SceneStyle, build_scene, colors};
    use nitro_lane::{
        DisplaySnapshot, FrameLoop, FrameScheduler, InputTracker, QualityPreset, Session, Settings,
    };
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Event dispatched on `window` once the game view has shut down
    const EXIT_EVENT: &str = "nitro-lane-exit";

    /// `requestAnimationFrame` wrapped as a frame scheduler
    struct AnimationFrames {
        window: Window,
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl FrameScheduler for AnimationFrames {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let callback = self.callback.as_ref()?;
            self.window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputTracker,
        render_state: Option<RenderState>,
        style: SceneStyle,
        scene_rng: Pcg32,
        frames: FrameLoop<AnimationFrames>,
    }

    impl Game {
        /// Begin (or restart) a run and make sure exactly one loop drives it
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.input.release_all();
            let snapshot = self.session.start(seed);
            update_hud(&snapshot);
            self.frames.schedule();
        }

        /// Stop the loop, then hand control back to the host page
        fn exit(&mut self) {
            self.frames.cancel();
            let snapshot = self.session.exit();
            self.input.release_all();
            update_hud(&snapshot);
            notify_exit();
        }

        fn frame(&mut self) {
            self.frames.begin_frame();

            if let Some(snapshot) = self.session.frame(&self.input.tick_input()) {
                update_hud(&snapshot);
            }
            self.render();

            if self.session.is_playing() {
                self.frames.schedule();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(self.session.sim(), &self.style, &mut self.scene_rng);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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
    }

    /// Push a snapshot into the HUD elements
    fn update_hud(snapshot: &DisplaySnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(el) = document.query_selector("#hud-distance .hud-value").ok().flatten() {
            el.set_text_content(Some(&format!("{}m", snapshot.distance)));
        }
        if let Some(el) = document.query_selector("#hud-speed .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.speed.to_string()));
            let _ = el.class_list().toggle_with_force("boosting", snapshot.is_boosting);
        }
        if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("boost-fill") {
            let _ = el.set_attribute("style", &format!("height: {:.0}%", snapshot.boost_level));
        }

        // Overlays: start card before the first run, crash card after a crash
        if let Some(el) = document.get_element_by_id("start-overlay") {
            let hidden = snapshot.is_playing || snapshot.is_game_over;
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.class_list().toggle_with_force("hidden", !snapshot.is_game_over);
            if snapshot.is_game_over {
                if let Some(score_el) = document.get_element_by_id("final-score") {
                    score_el.set_text_content(Some(&snapshot.score.to_string()));
                }
            }
        }

        // Raw snapshot for host scripts that prefer JSON
        if let Some(el) = document.get_element_by_id("hud") {
            if let Ok(json) = snapshot.to_json() {
                let _ = el.set_attribute("data-snapshot", &json);
            }
        }
    }

    /// Tell the surrounding page the player left the game view
    fn notify_exit() {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::Event::new(EXIT_EVENT) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => log::warn!("Could not create exit event: {:?}", e),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Nitro Lane starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed-size track surface
        canvas.set_width(SURFACE_WIDTH);
        canvas.set_height(SURFACE_HEIGHT);

        let player_paint = canvas
            .get_attribute("data-car-color")
            .and_then(|hex| colors::parse_hex(&hex))
            .unwrap_or(colors::DEFAULT_PLAYER);

        let settings = Settings::load();
        let mut tuning = nitro_lane::Tuning::default();
        settings.apply_to(&mut tuning);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(tuning, settings.hud_refresh_ticks),
            input: InputTracker::new(),
            render_state: None,
            style: SceneStyle {
                player_paint,
                screen_shake: settings.effective_screen_shake(),
            },
            scene_rng: Pcg32::seed_from_u64(js_sys::Date::now() as u64),
            frames: FrameLoop::new(AnimationFrames {
                window: window.clone(),
                callback: None,
            }),
        }));

        // Frame callback; lives as long as the scheduler that fires it
        {
            let game_for_frame = game.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                game_for_frame.borrow_mut().frame();
            });
            game.borrow_mut().frames.scheduler_mut().callback = Some(callback);
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

        let render_state = RenderState::new(
            surface,
            &adapter,
            SURFACE_WIDTH,
            SURFACE_HEIGHT,
            (TRACK_WIDTH, TRACK_HEIGHT),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            // Draw the parked car behind the start overlay
            g.render();
            update_hud(&g.session.snapshot());
        }

        setup_input_handlers(&window, game.clone());
        setup_buttons(&document, game.clone());
        setup_focus_loss(&window, &document, game.clone());
        setup_quality_select(&document, game, settings);

        log::info!("Nitro Lane ready");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        for id in ["exit-btn", "garage-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().exit();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Quality preset picker
    fn setup_quality_select(
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
        settings: Settings,
    ) {
        let Some(select) = document
            .get_element_by_id("quality-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        select.set_value(settings.quality.as_str());

        let settings = Rc::new(RefCell::new(settings));
        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let preset = match select_clone.value().parse::<QualityPreset>() {
                Ok(preset) => preset,
                Err(e) => {
                    log::warn!("{}", e);
                    return;
                }
            };
            let mut settings = settings.borrow_mut();
            settings.apply_preset(preset);
            settings.save();
            let mut g = game.borrow_mut();
            g.session.apply_settings(&settings);
            g.style.screen_shake = settings.effective_screen_shake();
            log::info!("Quality set to {}", preset);
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keys released while the page is out of focus never send keyup
    fn setup_focus_loss(window: &Window, document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.release_all();
                    log::info!("Tab hidden, released held keys");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
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
fn main() {
    env_logger::init();
    log::info!("Nitro Lane (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let snapshot = headless::autopilot_run(seed, 20_000);

    match snapshot.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use nitro_lane::consts::*;
    use nitro_lane::sim::{SimState, TickInput};
    use nitro_lane::{DisplaySnapshot, Phase, Session, Settings, Tuning};

    /// Play one seeded run with a simple lane-dodging driver
    pub fn autopilot_run(seed: u64, max_frames: u32) -> DisplaySnapshot {
        let settings = Settings::default();
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);

        let mut session = Session::new(tuning, settings.hud_refresh_ticks);
        session.start(seed);

        for frame in 0..max_frames {
            let input = steer(session.sim());
            if let Some(snapshot) = session.frame(&input) {
                log::debug!("frame {}: {:?}", frame, snapshot);
            }
            if session.phase() != Phase::Playing {
                break;
            }
        }

        let snapshot = session.snapshot();
        log::info!(
            "Headless run finished: score {}, distance {}m, crashed: {}",
            snapshot.score,
            snapshot.distance,
            snapshot.is_game_over
        );
        snapshot
    }

    /// Move toward the lane whose nearest oncoming car is furthest away
    fn steer(sim: &SimState) -> TickInput {
        let lane_clearance = |lane: u32| -> f32 {
            let left = lane as f32 * LANE_WIDTH;
            sim.obstacles
                .iter()
                .filter(|o| o.pos.x + CAR_WIDTH > left && o.pos.x < left + LANE_WIDTH)
                .filter(|o| o.pos.y < PLAYER_Y + CAR_HEIGHT)
                .map(|o| PLAYER_Y - (o.pos.y + CAR_HEIGHT))
                .fold(f32::INFINITY, f32::min)
        };

        let best_lane = (0..LANE_COUNT)
            .max_by(|&a, &b| lane_clearance(a).total_cmp(&lane_clearance(b)))
            .unwrap_or(0);
        let target_x = nitro_lane::lane_x(best_lane);

        let dx = target_x - sim.player_x;
        let step = 4.0;
        let current = ((sim.player_x + CAR_WIDTH / 2.0) / LANE_WIDTH) as u32;
        TickInput {
            left: dx < -step,
            right: dx > step,
            boost: lane_clearance(current.min(LANE_COUNT - 1)) > 400.0 && sim.boost_level > 50.0,
        }
    }
}
