//! Session state
//!
//! Everything one play session owns: the current question and bubble set,
//! score, the session-wide countdown, and the feedback lock. Mutation goes
//! through `sim::tick`; the shell only reads and drains events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::layout::{Bubble, layout_bubbles};
use super::question::{Difficulty, Operation, Question, generate_question};
use crate::consts::FIRST_WAVE;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Accepting bubble clicks
    Playing,
    /// A resolution animation is in flight; input is locked
    Feedback,
    /// Countdown expired
    Ended,
}

/// How the current round resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Correct,
    Wrong { correct_answer: f64 },
}

/// Pending resolution animation; doubles as the input lock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub resolution: Resolution,
    pub remaining_ms: u32,
}

/// Categorical events forwarded to presentation/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Correct,
    Wrong { correct_answer: f64 },
    SessionEnded { final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub operation: Operation,
    pub difficulty: Difficulty,
    /// Play surface size in surface units
    pub surface: (f32, f32),
    pub phase: GamePhase,
    /// Round counter, bumped on every question change
    pub round: u32,
    pub question: Option<Question>,
    /// Full precomputed layout for the round
    pub bubbles: Vec<Bubble>,
    /// How many of `bubbles` are shown; grows one per reveal tick
    pub revealed: usize,
    pub score: u32,
    /// Whole seconds left on the session-wide countdown
    pub time_left: u32,
    /// Pending resolution, `None` while input is open
    pub feedback: Option<Feedback>,
    /// Bubble id marked by the last click, with ms left on the mark
    pub clicked: Option<(u32, u32)>,
    /// Shake effect flag raised during wrong-answer feedback
    pub shake: bool,
    pub(crate) reveal_elapsed_ms: u32,
    pub(crate) countdown_elapsed_ms: u32,
    /// Events not yet drained by the shell
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session: seeds the RNG, arms the countdown for the tier, and
    /// generates the first round.
    pub fn new(
        seed: u64,
        operation: Operation,
        difficulty: Difficulty,
        surface_width: f32,
        surface_height: f32,
    ) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            operation,
            difficulty,
            surface: (surface_width, surface_height),
            phase: GamePhase::Playing,
            round: 0,
            question: None,
            bubbles: Vec::new(),
            revealed: 0,
            score: 0,
            time_left: difficulty.time_limit_secs(),
            feedback: None,
            clicked: None,
            shake: false,
            reveal_elapsed_ms: 0,
            countdown_elapsed_ms: 0,
            events: Vec::new(),
        };
        state.start_round();
        state
    }

    /// Generate the next question and rebuild the bubble layout. The
    /// countdown is deliberately left untouched.
    pub(crate) fn start_round(&mut self) {
        let question = generate_question(
            &mut self.rng,
            self.operation,
            self.difficulty.max_number(),
            self.difficulty,
        );
        self.bubbles = layout_bubbles(&mut self.rng, &question.options, self.surface.0, self.surface.1);
        self.revealed = FIRST_WAVE.min(self.bubbles.len());
        self.reveal_elapsed_ms = 0;
        self.round += 1;
        self.question = Some(question);
    }

    /// Input lock: true while a resolution animation is in flight
    pub fn is_processing(&self) -> bool {
        self.feedback.is_some()
    }

    /// Bubbles currently visible to the player
    pub fn visible_bubbles(&self) -> &[Bubble] {
        &self.bubbles[..self.revealed]
    }

    /// Correct answer shown by the wrong-answer overlay, when active
    pub fn wrong_overlay(&self) -> Option<f64> {
        match self.feedback {
            Some(Feedback {
                resolution: Resolution::Wrong { correct_answer },
                ..
            }) => Some(correct_answer),
            _ => None,
        }
    }

    /// Drain queued events for the shell
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
