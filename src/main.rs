//! Snake Canvas entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use snake_canvas::platform::web::{CanvasSurface, ScoreText};
    use snake_canvas::{Direction, Game, Schedule, Settings};

    /// Everything the timer and the event listeners share
    struct App {
        game: Game,
        surface: CanvasSurface,
        score: ScoreText,
    }

    impl App {
        fn start(&mut self) -> Schedule {
            self.game.start(&mut self.surface, &mut self.score)
        }

        fn reset(&mut self) -> Schedule {
            self.game.reset(&mut self.surface, &mut self.score)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snake Canvas starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(canvas) = document
            .get_element_by_id("gameBoard")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"gameBoard\"> found");
            return;
        };
        let Some(score_el) = document.get_element_by_id("scoreText") else {
            log::error!("No #scoreText element found");
            return;
        };
        let Some(surface) = CanvasSurface::new(&canvas) else {
            log::error!("Canvas has no 2D context");
            return;
        };

        let settings = Settings::with_board(canvas.width() as i32, canvas.height() as i32);
        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(settings, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid board: {}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            score: ScoreText::new(score_el),
        }));

        setup_keyboard(app.clone());
        setup_reset_button(app.clone());

        let schedule = app.borrow_mut().start();
        schedule_tick(app, schedule);

        log::info!("Snake Canvas running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let direction = Direction::from_key(&event.key())
                .or_else(|| Direction::from_key_code(event.key_code()));
            if let Some(direction) = direction {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
                app.borrow_mut().game.change_direction(direction);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let Some(btn) = document.get_element_by_id("resetBtn") else {
            log::warn!("No #resetBtn element found, reset disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let schedule = app.borrow_mut().reset();
            schedule_tick(app.clone(), schedule);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Arm one `setTimeout` for the next pass, if the loop wants one
    fn schedule_tick(app: Rc<RefCell<App>>, schedule: Schedule) {
        let Schedule::After { ticket, delay } = schedule else {
            return;
        };

        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            let next = {
                let mut guard = app.borrow_mut();
                let App {
                    game,
                    surface,
                    score,
                } = &mut *guard;
                game.tick(ticket, surface, score)
            };
            schedule_tick(app, next);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(delay.as_millis()).unwrap_or(i32::MAX),
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use snake_canvas::Settings;

    env_logger::init();
    log::info!("Snake Canvas (terminal) starting...");

    let settings = Settings::load()?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed {}", seed);

    snake_canvas::platform::terminal::run(settings, seed)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
