//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, injected at every entry point
//! - Time advances only through explicit tick deltas
//! - No rendering or platform dependencies

pub mod layout;
pub mod question;
pub mod state;
pub mod tick;

pub use layout::{BUBBLE_COLORS, Bubble, layout_bubbles};
pub use question::{CORE_OPERATIONS, Difficulty, Operation, Question, generate_question};
pub use state::{Feedback, GameEvent, GamePhase, GameState, Resolution};
pub use tick::{handle_click, tick};
