//! Diya Burst entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, MouseEvent, PointerEvent, TouchEvent};

    use diya_burst::renderer::CanvasRenderer;
    use diya_burst::score::{BestScore, share_text};
    use diya_burst::sim::{GameState, Phase, frame, pointer_down};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        best: BestScore,
    }

    impl Game {
        /// Mirror score/time/best and the call-to-action overlay into the DOM
        fn update_hud(&mut self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&self.state.display_time().to_string()));
            }

            if self.best.record(self.state.score)
                && let Some(el) = document.get_element_by_id("best")
            {
                el.set_text_content(Some(&self.best.value().to_string()));
            }

            let summary = self
                .state
                .finale
                .as_ref()
                .is_some_and(|finale| finale.summary);
            let cta_hidden = match self.state.phase {
                Phase::Idle => false,
                Phase::Running => true,
                Phase::Finale => !summary,
            };
            if let Some(cta) = document.get_element_by_id("cta") {
                let _ = cta.set_attribute("class", if cta_hidden { "hidden" } else { "" });
                if summary
                    && let Some(heading) = document.query_selector("#cta h2").ok().flatten()
                {
                    heading.set_text_content(Some(&format!(
                        "Time's up! \u{1F389} Score: {}",
                        self.state.score
                    )));
                }
            }
        }
    }

    /// Wall-clock instant on the same timebase as the frame callback
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Diya Burst starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("stage")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = CanvasRenderer::new(canvas.clone()).expect("canvas 2d init failed");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, renderer.view());
        log::info!("Game initialized with seed: {seed}");

        let best = BestScore::load();
        if let Some(el) = document.get_element_by_id("best") {
            el.set_text_content(Some(&best.value().to_string()));
        }

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            best,
        }));

        setup_resize_handler(game.clone());
        setup_pointer_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Diya Burst running!");
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            match g.renderer.resize() {
                Ok(view) => g.state.set_view(view),
                Err(e) => log::warn!("resize failed: {e:?}"),
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Translate a client-space coordinate to surface-local space
    fn surface_pos(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer down
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = surface_pos(
                    &canvas_clone,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
                pointer_down(&mut game.borrow_mut().state, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let pos = surface_pos(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                    pointer_down(&mut game.borrow_mut().state, pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["btnStart", "btnPlay"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().state.start(now_ms());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("btnReset") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnShare") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                share_score(game.borrow().state.score);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Native share sheet when available, clipboard fallback otherwise.
    /// A cancelled share sheet is not an error worth surfacing.
    fn share_score(score: u32) {
        let window = web_sys::window().unwrap();
        let navigator = window.navigator();
        let url = window.location().href().unwrap_or_default();
        let text = share_text(score, &url);

        let has_share =
            js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("share")).unwrap_or(false);

        if has_share {
            let data = web_sys::ShareData::new();
            data.set_title("Diwali Fireworks");
            data.set_text(&text);
            data.set_url(&url);
            let promise = navigator.share_with_data(&data);
            wasm_bindgen_futures::spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        } else {
            let promise = navigator.clipboard().write_text(&text);
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => flash_copied_label(),
                    Err(e) => log::warn!("clipboard write failed: {e:?}"),
                }
            });
        }
    }

    /// Swap the share button label to "Copied!" and restore it after ~1.2 s
    fn flash_copied_label() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("btnShare") {
            btn.set_text_content(Some("Copied!"));
        }

        let revert = Closure::once_into_js(move || {
            if let Some(btn) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("btnShare"))
            {
                btn.set_text_content(Some("Share"));
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                revert.unchecked_ref(),
                1200,
            );
        }
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
        {
            let mut g = game.borrow_mut();
            frame(&mut g.state, time);
            if let Err(e) = g.renderer.render(&g.state) {
                log::warn!("render error: {e:?}");
            }
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use diya_burst::sim::{GameState, frame, pointer_down};

    env_logger::init();
    log::info!("Diya Burst (native) starting...");

    // Headless demo: play one scripted session and report the outcome
    let mut state = GameState::new(0xD1BA, Vec2::new(960.0, 540.0));
    state.start(0.0);

    let mut now = 0.0;
    while now < 24_000.0 {
        now += 16.0;
        // Pop whatever spawned most recently every ~800 ms
        if (now as u64).is_multiple_of(800)
            && let Some(c) = state.collectibles.last()
        {
            let pos = c.pos;
            pointer_down(&mut state, pos);
        }
        frame(&mut state, now);
    }

    println!(
        "session over: score {}, fireworks {}, sparks {}",
        state.score,
        state.fireworks.len(),
        state.sparks.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
