//! Breakout entry point
//!
//! Web: WebGPU canvas, keyboard input, DOM text overlay.
//! Native: headless demo where the autopilot plays one game and reports.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement};

    use breakout::Settings;
    use breakout::platform::{InputSource, Keyboard};
    use breakout::renderer::pipeline::field_to_screen;
    use breakout::renderer::{Align, FrameBatch, RenderState, TextLabel, draw_frame};
    use breakout::sim::{Session, tick};

    /// Cap on ticks per animation frame so a stalled tab does not spiral
    const MAX_SUBSTEPS: u32 = 5;

    struct Game {
        session: Session,
        keyboard: Keyboard,
        render_state: Option<RenderState>,
        batch: FrameBatch,
        overlay: Option<HtmlElement>,
        /// Labels currently in the DOM
        shown: Vec<TextLabel>,
        /// CSS size of the canvas
        css_size: (u32, u32),
        accumulator: f32,
        last_time: f64,
        running: bool,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let (w, h) = (settings.field.width, settings.field.height);
            Self {
                session: Session::new(settings, seed),
                keyboard: Keyboard::new(),
                render_state: None,
                batch: FrameBatch::new(w, h),
                overlay: None,
                shown: Vec::new(),
                css_size: (w as u32, h as u32),
                accumulator: 0.0,
                last_time: 0.0,
                running: true,
            }
        }

        /// Run fixed-rate ticks for the elapsed time
        fn update(&mut self, dt: f32) {
            let step = self.session.settings.tick_seconds();
            self.accumulator += dt.min(0.25);

            let mut substeps = 0;
            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                let input = self.keyboard.poll(&self.session);
                if input.quit {
                    log::info!("Quit requested");
                    self.running = false;
                    return;
                }
                for event in tick(&mut self.session, &input) {
                    log::debug!("{event:?}");
                }
                self.accumulator -= step;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        fn render(&mut self, document: &Document) {
            draw_frame(&self.session, &mut self.batch);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
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

            if self.batch.labels != self.shown {
                self.update_overlay(document);
                self.shown = self.batch.labels.clone();
            }
        }

        /// Rebuild the DOM text layer from this frame's labels
        fn update_overlay(&self, document: &Document) {
            let Some(overlay) = &self.overlay else {
                return;
            };
            overlay.set_text_content(None);

            let field = (
                self.session.settings.field.width,
                self.session.settings.field.height,
            );
            let origin = field_to_screen(glam::Vec2::ZERO, self.css_size, field);
            let scale = field_to_screen(glam::Vec2::ONE, self.css_size, field) - origin;

            for label in &self.batch.labels {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                el.set_text_content(Some(&label.text));

                let pos = field_to_screen(label.anchor, self.css_size, field);
                let [r, g, b, a] = label.style.color;
                let shift = match label.style.align {
                    Align::Left => "0",
                    Align::Center => "-50%",
                    Align::Right => "-100%",
                };
                let css = format!(
                    "position:absolute;left:{:.1}px;top:{:.1}px;font-size:{:.1}px;\
                     line-height:1;white-space:nowrap;transform:translateX({});\
                     color:rgba({},{},{},{});",
                    pos.x,
                    pos.y,
                    label.style.size.px() * scale.y,
                    shift,
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                    a,
                );
                let _ = el.set_attribute("style", &css);
                let _ = overlay.append_child(&el);
            }
        }
    }

    /// Absolutely positioned layer over the canvas for text
    fn create_overlay(document: &Document, canvas: &HtmlCanvasElement) -> Option<HtmlElement> {
        let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let style = el.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", &format!("{}px", canvas.offset_left()));
        let _ = style.set_property("top", &format!("{}px", canvas.offset_top()));
        let _ = style.set_property("width", &format!("{}px", canvas.client_width()));
        let _ = style.set_property("height", &format!("{}px", canvas.client_height()));
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("font-family", "sans-serif");
        document.body()?.append_child(&el).ok()?;
        Some(el)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::default();

        // Backing store in device pixels, layout in CSS pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1) as u32;
        let client_h = canvas.client_height().max(1) as u32;
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let field = (settings.field.width, settings.field.height);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

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

        let render_state = RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.css_size = (client_w, client_h);
            g.overlay = create_overlay(&document, &canvas);
        }

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                // Arrows and space would otherwise scroll the page
                if game.borrow_mut().keyboard.key_down(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keyboard.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss swallows keyup events; drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.blur();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                g.session.settings.tick_seconds()
            };
            g.last_time = time;

            g.update(dt);
            if !g.running {
                log::info!("Stopped with score {}", g.session.score);
                return;
            }
            g.render(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use breakout::platform::{Autopilot, InputSource};
    use breakout::renderer::{FrameBatch, draw_frame};
    use breakout::sim::{GameEvent, Session, tick};
    use breakout::{Settings, SettingsError};

    const DEFAULT_SEED: u64 = 0x0b5e_55ed;
    /// Demo length in seconds of game time
    const DEMO_SECONDS: u64 = 300;

    /// `breakout [settings.json] [seed]`
    pub fn run() -> Result<(), SettingsError> {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };
        settings.validate()?;

        let seed = match args.next() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid seed {raw:?}, using {DEFAULT_SEED}");
                DEFAULT_SEED
            }),
            None => DEFAULT_SEED,
        };

        let budget = settings.target_fps as u64 * DEMO_SECONDS;
        let mut batch = FrameBatch::new(settings.field.width, settings.field.height);
        let mut session = Session::new(settings, seed);
        let mut pilot = Autopilot::default();

        log::info!("Autopilot demo, seed {seed}, up to {budget} frames");

        for _ in 0..budget {
            let input = pilot.poll(&session);
            if input.quit {
                break;
            }

            for event in tick(&mut session, &input) {
                match event {
                    GameEvent::BricksDestroyed { count, points } => {
                        log::debug!("{count} brick(s) for {points} points");
                    }
                    other => log::info!("{other:?}"),
                }
            }

            draw_frame(&session, &mut batch);

            if session.phase.is_over() || session.phase.is_victory() {
                break;
            }
        }

        println!(
            "{}: score {}, lives {}, {} bricks left after {} ticks",
            session.current_phase(),
            session.score,
            session.lives,
            session.bricks.len(),
            session.time_ticks
        );
        for label in &batch.labels {
            log::debug!("screen: {}", label.text);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Breakout (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
