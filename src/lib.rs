//! Number Pop - a timed arithmetic bubble-popping game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (question generation, bubble layout, session state)
//! - `ui`: Screen navigation (menu, selection screens, game, game over)
//! - `audio`: Procedural sound feedback (Web Audio on wasm, inert on native)
//! - `settings`: Player preferences persisted to LocalStorage

pub mod audio;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;
pub use ui::{App, Screen};

/// Game configuration constants
pub mod consts {
    /// Bubble diameter in surface units (CSS pixels)
    pub const BUBBLE_DIAMETER: f32 = 70.0;
    /// Minimum clearance between a bubble and any surface edge
    pub const PLAY_PADDING: f32 = 25.0;
    /// Required clearance between bubbles beyond the diameter
    pub const BUBBLE_GAP: f32 = 15.0;

    /// Option values generated per question
    pub const MAX_OPTIONS: usize = 10;
    /// Bubbles revealed at the start of each round
    pub const FIRST_WAVE: usize = 4;

    /// Milliseconds between staggered bubble reveals
    pub const REVEAL_INTERVAL_MS: u32 = 600;
    /// Milliseconds per countdown decrement
    pub const COUNTDOWN_STEP_MS: u32 = 1000;
    /// Delay before the next round after a correct answer
    pub const CORRECT_ADVANCE_MS: u32 = 150;
    /// Delay before the next round after a wrong answer
    pub const WRONG_ADVANCE_MS: u32 = 800;
    /// How long a clicked bubble stays visually marked
    pub const CLICK_MARK_MS: u32 = 400;

    /// Attempt budget for distractor synthesis
    pub const DISTRACTOR_ATTEMPTS: u32 = 100;
    /// Attempt budget for placing one bubble
    pub const PLACEMENT_ATTEMPTS: u32 = 50;
}
