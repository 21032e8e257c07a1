//! Number Pop entry point
//!
//! Handles platform-specific initialization and drives the game loop: a DOM
//! shell on wasm32, a headless smoke run on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use number_pop::audio::{AudioManager, SoundEffect};
    use number_pop::settings::Settings;
    use number_pop::sim::{Difficulty, GameEvent, GameState, Operation, handle_click, tick};
    use number_pop::ui::{App, Screen};

    /// Everything the shell owns
    struct Shell {
        app: App,
        session: Option<GameState>,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        /// Round whose bubbles are materialized in the DOM
        rendered_round: u32,
    }

    const OPERATION_BUTTONS: [(&str, Operation); 7] = [
        ("op-addition", Operation::Addition),
        ("op-subtraction", Operation::Subtraction),
        ("op-multiplication", Operation::Multiplication),
        ("op-square-root", Operation::SquareRoot),
        ("op-cube-root", Operation::CubeRoot),
        ("op-halves", Operation::Halves),
        ("op-random", Operation::Random),
    ];

    const DIFFICULTY_BUTTONS: [(&str, Difficulty); 3] = [
        ("diff-easy", Difficulty::Easy),
        ("diff-medium", Difficulty::Medium),
        ("diff-hard", Difficulty::Hard),
    ];

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Number Pop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let mut app = App::new();
        app.sound_enabled = settings.sound_enabled;

        let mut audio = AudioManager::new();
        audio.set_enabled(settings.sound_enabled);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        let shell = Rc::new(RefCell::new(Shell {
            app,
            session: None,
            audio,
            settings,
            last_time: 0.0,
            rendered_round: 0,
        }));

        wire_menu(&document, &shell);
        wire_selection_screens(&document, &shell);
        wire_game_controls(&document, &shell);
        wire_game_over(&document, &shell);
        wire_modals(&document, &shell);

        request_frame(shell);
        log::info!("Number Pop running!");
    }

    /// Attach a click handler to an element by id
    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn wire_menu(document: &Document, shell: &Rc<RefCell<Shell>>) {
        {
            let shell = shell.clone();
            on_click(document, "play-btn", move |_| {
                shell.borrow_mut().app.play();
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "instructions-btn", move |_| {
                shell.borrow_mut().app.show_instructions = true;
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "help-btn", move |_| {
                shell.borrow_mut().app.show_help = true;
            });
        }
        // Global sound toggle, visible outside the game screen
        {
            let shell = shell.clone();
            on_click(document, "sound-toggle", move |_| {
                toggle_sound(&mut shell.borrow_mut());
            });
        }
    }

    fn wire_selection_screens(document: &Document, shell: &Rc<RefCell<Shell>>) {
        for (id, operation) in OPERATION_BUTTONS {
            let shell = shell.clone();
            on_click(document, id, move |_| {
                shell.borrow_mut().app.select_operation(operation);
            });
        }
        for (id, difficulty) in DIFFICULTY_BUTTONS {
            let shell = shell.clone();
            on_click(document, id, move |_| {
                shell.borrow_mut().app.select_difficulty(difficulty);
            });
        }
        for id in ["op-back", "diff-back"] {
            let shell = shell.clone();
            on_click(document, id, move |_| {
                shell.borrow_mut().app.back();
            });
        }
    }

    fn wire_game_controls(document: &Document, shell: &Rc<RefCell<Shell>>) {
        // One delegated handler covers every bubble button
        {
            let shell = shell.clone();
            on_click(document, "play-area", move |event: MouseEvent| {
                let Some(target) = event.target() else { return };
                let Ok(el) = target.dyn_into::<Element>() else { return };
                let (Some(value), Some(id)) =
                    (el.get_attribute("data-value"), el.get_attribute("data-id"))
                else {
                    return;
                };
                let (Ok(value), Ok(id)) = (value.parse::<f64>(), id.parse::<u32>()) else {
                    return;
                };

                let mut s = shell.borrow_mut();
                s.audio.resume();
                if let Some(state) = &mut s.session {
                    handle_click(state, value, id);
                }
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "home-btn", move |_| {
                shell.borrow_mut().app.request_exit();
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "exit-yes", move |_| {
                shell.borrow_mut().app.confirm_exit();
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "exit-no", move |_| {
                shell.borrow_mut().app.cancel_exit();
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "sound-btn", move |_| {
                toggle_sound(&mut shell.borrow_mut());
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "game-help-btn", move |_| {
                shell.borrow_mut().app.show_help = true;
            });
        }
    }

    fn wire_game_over(document: &Document, shell: &Rc<RefCell<Shell>>) {
        {
            let shell = shell.clone();
            on_click(document, "play-again-btn", move |_| {
                shell.borrow_mut().app.play_again();
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "gameover-home-btn", move |_| {
                shell.borrow_mut().app.go_home();
            });
        }
    }

    fn wire_modals(document: &Document, shell: &Rc<RefCell<Shell>>) {
        {
            let shell = shell.clone();
            on_click(document, "instructions-close", move |_| {
                shell.borrow_mut().app.show_instructions = false;
            });
        }
        {
            let shell = shell.clone();
            on_click(document, "help-close", move |_| {
                shell.borrow_mut().app.show_help = false;
            });
        }
    }

    fn toggle_sound(s: &mut Shell) {
        s.app.toggle_sound();
        let enabled = s.app.sound_enabled;
        s.audio.set_enabled(enabled);
        s.settings.sound_enabled = enabled;
        s.settings.save();
    }

    /// Start a fresh session sized to the play area
    fn start_session(s: &mut Shell, document: &Document) {
        let (Some(operation), Some(difficulty)) = (s.app.operation, s.app.difficulty) else {
            s.app.go_home();
            return;
        };

        let surface = document
            .get_element_by_id("play-area")
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                (rect.width() as f32, rect.height() as f32)
            })
            .filter(|&(w, h)| w > 0.0 && h > 0.0)
            .unwrap_or((800.0, 600.0));

        let seed = js_sys::Date::now() as u64;
        s.session = Some(GameState::new(seed, operation, difficulty, surface.0, surface.1));
        s.rendered_round = 0;
        log::info!("Session started with seed {seed}");
    }

    fn request_frame(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| frame(shell, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let mut s = shell.borrow_mut();

            let dt_ms = if s.last_time > 0.0 {
                (time - s.last_time).clamp(0.0, 100.0) as u32
            } else {
                0
            };
            s.last_time = time;

            if s.app.screen == Screen::Game {
                if s.session.is_none() {
                    start_session(&mut s, &document);
                }
                if let Some(state) = &mut s.session {
                    tick(state, dt_ms);
                }
                let events = s
                    .session
                    .as_mut()
                    .map(|state| state.take_events())
                    .unwrap_or_default();
                for event in events {
                    match event {
                        GameEvent::Correct => s.audio.play(SoundEffect::Correct),
                        GameEvent::Wrong { .. } => s.audio.play(SoundEffect::Wrong),
                        GameEvent::SessionEnded { final_score } => {
                            s.audio.play(SoundEffect::GameOver);
                            s.app.game_over(final_score);
                            s.session = None;
                            log::info!("Session ended with score {final_score}");
                        }
                    }
                }
            } else if s.session.is_some() {
                // Left the game screen mid-session (confirmed exit)
                s.session = None;
            }

            sync_dom(&mut s, &document);
        }

        request_frame(shell);
    }

    /// Push the current state into the DOM
    fn sync_dom(s: &mut Shell, document: &Document) {
        let app = &s.app;
        set_visible(document, "screen-menu", app.screen == Screen::Menu);
        set_visible(document, "screen-operation", app.screen == Screen::OperationSelect);
        set_visible(document, "screen-difficulty", app.screen == Screen::DifficultySelect);
        set_visible(document, "screen-game", app.screen == Screen::Game);
        set_visible(document, "screen-gameover", app.screen == Screen::GameOver);
        set_visible(document, "exit-confirm", app.show_exit_confirm);
        set_visible(document, "instructions-modal", app.show_instructions);
        set_visible(document, "help-modal", app.show_help);

        for id in ["sound-toggle", "sound-btn"] {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute(
                    "data-on",
                    if app.sound_enabled { "true" } else { "false" },
                );
            }
        }

        if app.screen == Screen::DifficultySelect
            && let Some(operation) = app.operation
        {
            set_text(
                document,
                "difficulty-title",
                &format!("Choose difficulty for {}", operation.label()),
            );
        }

        if app.screen == Screen::GameOver {
            set_text(document, "final-score", &app.last_score.to_string());
        }

        if s.session.is_some() {
            render_bubbles(s, document);
        }
        if let Some(state) = &s.session {
            if let Some(question) = &state.question {
                set_text(document, "question-text", &question.text);
            }
            set_text(document, "score-value", &state.score.to_string());
            set_text(document, "time-value", &format!("{}s", state.time_left));

            match state.wrong_overlay() {
                Some(correct) => {
                    set_visible(document, "wrong-overlay", true);
                    set_text(document, "wrong-answer-value", &correct.to_string());
                }
                None => set_visible(document, "wrong-overlay", false),
            }

            if let Some(area) = document.get_element_by_id("play-area") {
                let _ = area.set_attribute(
                    "class",
                    if state.shake { "play-area shake" } else { "play-area" },
                );
            }
        }
    }

    /// Materialize bubble buttons for the round, then sync their visibility
    fn render_bubbles(s: &mut Shell, document: &Document) {
        let Some(state) = &s.session else { return };
        let Some(area) = document.get_element_by_id("play-area") else {
            return;
        };

        if s.rendered_round != state.round {
            area.set_inner_html("");
            for bubble in &state.bubbles {
                let Ok(el) = document.create_element("button") else {
                    continue;
                };
                let _ = el.set_attribute("id", &format!("bubble-{}", bubble.id));
                let _ = el.set_attribute("data-id", &bubble.id.to_string());
                let _ = el.set_attribute("data-value", &bubble.value.to_string());
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{}px;top:{}px;background-color:{};",
                        bubble.x, bubble.y, bubble.color
                    ),
                );
                el.set_text_content(Some(&bubble.value.to_string()));
                let _ = area.append_child(&el);
            }
            s.rendered_round = state.round;
        }

        for (index, bubble) in state.bubbles.iter().enumerate() {
            let Some(el) = document.get_element_by_id(&format!("bubble-{}", bubble.id)) else {
                continue;
            };
            let mut class = String::from("bubble");
            if index >= state.revealed {
                class.push_str(" hidden");
            }
            if matches!(state.clicked, Some((id, _)) if id == bubble.id) {
                class.push_str(" clicked");
            }
            let _ = el.set_attribute("class", &class);
            if state.is_processing() {
                let _ = el.set_attribute("disabled", "disabled");
            } else {
                let _ = el.remove_attribute("disabled");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Number Pop (native) starting...");
    smoke_session();
}

/// Headless smoke run: answer every question until the countdown expires
#[cfg(not(target_arch = "wasm32"))]
fn smoke_session() {
    use number_pop::sim::{
        Difficulty, GameEvent, GamePhase, GameState, Operation, handle_click, tick,
    };

    let mut state = GameState::new(0xB0BB1E5, Operation::Random, Difficulty::Easy, 800.0, 600.0);
    while state.phase != GamePhase::Ended {
        let answer = state.question.as_ref().and_then(|question| {
            if state.is_processing() {
                None
            } else {
                println!("{}", question.text);
                Some(question.answer)
            }
        });
        if let Some(answer) = answer {
            handle_click(&mut state, answer, 0);
        }
        tick(&mut state, 1000);

        for event in state.take_events() {
            if let GameEvent::SessionEnded { final_score } = event {
                println!("Game over - final score: {final_score}");
            }
        }
    }
}
