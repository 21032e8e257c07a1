//! Screen navigation
//!
//! Top-level flow around the game session: menu → operation select →
//! difficulty select → game → game over, plus the modal chrome (help,
//! instructions, exit confirmation). The shell re-reads this state after
//! every transition and shows/hides screens accordingly.

use crate::sim::question::{Difficulty, Operation};

/// Which top-level screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    OperationSelect,
    DifficultySelect,
    Game,
    GameOver,
}

/// Application state outside the simulation
#[derive(Debug, Clone)]
pub struct App {
    pub screen: Screen,
    pub operation: Option<Operation>,
    pub difficulty: Option<Difficulty>,
    /// Final score carried from the last finished session
    pub last_score: u32,
    pub sound_enabled: bool,
    pub show_instructions: bool,
    pub show_help: bool,
    pub show_exit_confirm: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Menu,
            operation: None,
            difficulty: None,
            last_score: 0,
            sound_enabled: true,
            show_instructions: false,
            show_help: false,
            show_exit_confirm: false,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.screen = Screen::OperationSelect;
    }

    pub fn select_operation(&mut self, operation: Operation) {
        self.operation = Some(operation);
        self.screen = Screen::DifficultySelect;
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
        self.screen = Screen::Game;
    }

    /// One step back through the selection screens
    pub fn back(&mut self) {
        self.screen = match self.screen {
            Screen::OperationSelect => Screen::Menu,
            Screen::DifficultySelect => Screen::OperationSelect,
            other => other,
        };
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    /// Leaving a live game needs confirmation first
    pub fn request_exit(&mut self) {
        if self.screen == Screen::Game {
            self.show_exit_confirm = true;
        }
    }

    pub fn cancel_exit(&mut self) {
        self.show_exit_confirm = false;
    }

    /// Confirmed exit: back to the menu, selection cleared
    pub fn confirm_exit(&mut self) {
        self.show_exit_confirm = false;
        self.go_home();
    }

    pub fn game_over(&mut self, final_score: u32) {
        self.last_score = final_score;
        self.screen = Screen::GameOver;
    }

    /// Replay with the same operation/difficulty selection
    pub fn play_again(&mut self) {
        self.screen = Screen::Game;
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Menu;
        self.operation = None;
        self.difficulty = None;
    }
}
