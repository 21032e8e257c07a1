//! Session tick and click handling
//!
//! Advances the three timers that drive a session (staggered bubble reveal,
//! session countdown, feedback-then-advance delay) and resolves bubble
//! selections. All time flows through explicit millisecond deltas, so the
//! suite can step a session without wall-clock timers.

use super::state::{Feedback, GameEvent, GamePhase, GameState, Resolution};
use crate::consts::{
    CLICK_MARK_MS, CORRECT_ADVANCE_MS, COUNTDOWN_STEP_MS, MAX_OPTIONS, REVEAL_INTERVAL_MS,
    WRONG_ADVANCE_MS,
};

/// Advance the session by `dt_ms` milliseconds.
pub fn tick(state: &mut GameState, dt_ms: u32) {
    if state.phase == GamePhase::Ended {
        return;
    }

    // Clicked-bubble mark decays independent of phase
    if let Some((id, ms)) = state.clicked {
        let left = ms.saturating_sub(dt_ms);
        state.clicked = (left > 0).then_some((id, left));
    }

    if let Some(feedback) = &mut state.feedback {
        // Resolution in flight: reveal pauses, the delay runs to completion
        feedback.remaining_ms = feedback.remaining_ms.saturating_sub(dt_ms);
        if feedback.remaining_ms == 0 {
            state.feedback = None;
            state.shake = false;
            state.phase = GamePhase::Playing;
            state.start_round();
        }
    } else if state.question.is_some() && state.revealed < state.bubbles.len().min(MAX_OPTIONS) {
        // Staggered reveal: one more bubble per interval
        state.reveal_elapsed_ms += dt_ms;
        while state.reveal_elapsed_ms >= REVEAL_INTERVAL_MS
            && state.revealed < state.bubbles.len().min(MAX_OPTIONS)
        {
            state.reveal_elapsed_ms -= REVEAL_INTERVAL_MS;
            state.revealed += 1;
        }
    }

    // Session-wide countdown: one decrement per elapsed second, never reset
    // by round advance
    state.countdown_elapsed_ms += dt_ms;
    while state.countdown_elapsed_ms >= COUNTDOWN_STEP_MS {
        state.countdown_elapsed_ms -= COUNTDOWN_STEP_MS;
        state.time_left = state.time_left.saturating_sub(1);
        if state.time_left == 0 {
            state.phase = GamePhase::Ended;
            state.feedback = None;
            state.events.push(GameEvent::SessionEnded {
                final_score: state.score,
            });
            return;
        }
    }
}

/// Resolve a bubble selection carrying `(value, bubble_id)`.
///
/// Ignored while a prior resolution is still animating or after the session
/// has ended, so a round can score at most once.
pub fn handle_click(state: &mut GameState, value: f64, bubble_id: u32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(question) = &state.question else {
        return;
    };

    state.clicked = Some((bubble_id, CLICK_MARK_MS));

    if value == question.answer {
        state.score += 1;
        state.events.push(GameEvent::Correct);
        state.feedback = Some(Feedback {
            resolution: Resolution::Correct,
            remaining_ms: CORRECT_ADVANCE_MS,
        });
    } else {
        let correct_answer = question.answer;
        state.shake = true;
        state.events.push(GameEvent::Wrong { correct_answer });
        state.feedback = Some(Feedback {
            resolution: Resolution::Wrong { correct_answer },
            remaining_ms: WRONG_ADVANCE_MS,
        });
    }
    state.phase = GamePhase::Feedback;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIRST_WAVE;
    use crate::sim::question::{Difficulty, Operation};

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Operation::Addition, Difficulty::Hard, 1200.0, 900.0)
    }

    fn answer(state: &GameState) -> f64 {
        state.question.as_ref().unwrap().answer
    }

    fn distractor(state: &GameState) -> f64 {
        let correct = answer(state);
        state
            .question
            .as_ref()
            .unwrap()
            .options
            .iter()
            .copied()
            .find(|&v| v != correct)
            .unwrap()
    }

    #[test]
    fn correct_click_scores_exactly_once() {
        let mut state = new_state(7);
        let before = state.time_left;

        let a = answer(&state);
        handle_click(&mut state, a, 0);
        assert_eq!(state.score, 1);
        assert!(state.is_processing());
        assert_eq!(state.take_events(), vec![GameEvent::Correct]);

        // Locked: a second click cannot double-score the round
        let a = answer(&state);
        handle_click(&mut state, a, 1);
        assert_eq!(state.score, 1);
        assert!(state.take_events().is_empty());
        assert_eq!(state.time_left, before);
    }

    #[test]
    fn correct_resolution_advances_after_its_delay() {
        let mut state = new_state(9);
        let first_round = state.round;
        let a = answer(&state);
        handle_click(&mut state, a, 0);

        tick(&mut state, CORRECT_ADVANCE_MS - 1);
        assert!(state.is_processing());
        assert_eq!(state.round, first_round);

        tick(&mut state, 1);
        assert!(!state.is_processing());
        assert_eq!(state.round, first_round + 1);
        assert_eq!(state.revealed, FIRST_WAVE);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn wrong_click_shows_the_answer_then_advances() {
        let mut state = new_state(11);
        let correct = answer(&state);
        let d = distractor(&state);
        handle_click(&mut state, d, 2);

        assert_eq!(state.score, 0);
        assert!(state.shake);
        assert_eq!(state.wrong_overlay(), Some(correct));
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Wrong { correct_answer: correct }]
        );

        tick(&mut state, WRONG_ADVANCE_MS);
        assert!(!state.shake);
        assert_eq!(state.wrong_overlay(), None);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn reveal_staggers_one_bubble_per_interval() {
        let mut state = new_state(13);
        let cap = state.bubbles.len().min(MAX_OPTIONS);
        assert_eq!(state.revealed, FIRST_WAVE);

        tick(&mut state, REVEAL_INTERVAL_MS - 1);
        assert_eq!(state.revealed, FIRST_WAVE);
        tick(&mut state, 1);
        assert_eq!(state.revealed, FIRST_WAVE + 1);

        for _ in 0..(cap - FIRST_WAVE) {
            tick(&mut state, REVEAL_INTERVAL_MS);
        }
        assert_eq!(state.revealed, cap);

        // Fully revealed: further intervals change nothing
        tick(&mut state, REVEAL_INTERVAL_MS);
        assert_eq!(state.revealed, cap);
    }

    #[test]
    fn reveal_pauses_while_feedback_is_in_flight() {
        let mut state = new_state(17);
        tick(&mut state, REVEAL_INTERVAL_MS);
        assert_eq!(state.revealed, FIRST_WAVE + 1);

        let d = distractor(&state);
        handle_click(&mut state, d, 0);
        tick(&mut state, REVEAL_INTERVAL_MS);
        assert_eq!(state.revealed, FIRST_WAVE + 1, "no reveal mid-feedback");

        // Remaining delay expires and the next round starts fresh
        tick(&mut state, WRONG_ADVANCE_MS - REVEAL_INTERVAL_MS);
        assert_eq!(state.revealed, FIRST_WAVE);
    }

    #[test]
    fn countdown_ends_the_session_after_the_tier_duration() {
        // Hard tier: 10 seconds, no correct answers, final score zero
        let mut state = new_state(19);
        for second in 1..10u32 {
            tick(&mut state, COUNTDOWN_STEP_MS);
            assert_eq!(state.time_left, 10 - second);
            assert_eq!(state.phase, GamePhase::Playing, "ended early at {second}s");
        }

        tick(&mut state, COUNTDOWN_STEP_MS);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::SessionEnded { final_score: 0 }]
        );

        // Terminal: ticking and clicking are inert
        let round = state.round;
        tick(&mut state, COUNTDOWN_STEP_MS);
        let a = answer(&state);
        handle_click(&mut state, a, 0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 0);
        assert_eq!(state.round, round);
    }

    #[test]
    fn round_advance_leaves_the_countdown_alone() {
        let mut state = new_state(23);
        tick(&mut state, 400);
        let a = answer(&state);
        handle_click(&mut state, a, 0);
        tick(&mut state, CORRECT_ADVANCE_MS);
        assert_eq!(state.round, 2);
        assert_eq!(state.time_left, 10, "not a full second yet");

        // 400 + 150 + 450 = 1000 ms across the round boundary
        tick(&mut state, 450);
        assert_eq!(state.time_left, 9);
    }

    #[test]
    fn clicked_mark_decays_after_its_window() {
        let mut state = new_state(29);
        let d = distractor(&state);
        handle_click(&mut state, d, 3);
        assert_eq!(state.clicked, Some((3, CLICK_MARK_MS)));

        tick(&mut state, CLICK_MARK_MS - 1);
        assert!(matches!(state.clicked, Some((3, 1))));
        tick(&mut state, 1);
        assert_eq!(state.clicked, None);
    }

    #[test]
    fn identical_sessions_stay_in_lockstep() {
        let mut a = new_state(99);
        let mut b = new_state(99);

        for step in 0..20u32 {
            if step % 5 == 0 && !a.is_processing() {
                let value = answer(&a);
                handle_click(&mut a, value, 0);
                handle_click(&mut b, value, 0);
            }
            tick(&mut a, 250);
            tick(&mut b, 250);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.round, b.round);
        assert_eq!(a.question, b.question);
        assert_eq!(a.bubbles, b.bubbles);
        assert_eq!(a.time_left, b.time_left);
    }
}
