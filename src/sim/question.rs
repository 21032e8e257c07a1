//! Question generation
//!
//! Synthesizes one arithmetic problem per round: display text, the correct
//! answer, and a pool of distractor options ordered so the answer always
//! lands in the first reveal wave.
//!
//! Every value produced here is a multiple of 1/8, so `f64` equality is
//! exact and used directly for answer matching and option dedup.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::{DISTRACTOR_ATTEMPTS, FIRST_WAVE, MAX_OPTIONS};

/// Math operation families selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    /// Squares and square roots, split evenly per question
    SquareRoot,
    /// Cubes and cube roots, split evenly per question
    CubeRoot,
    Halves,
    /// Resolves to one of the six concrete operations per question
    Random,
}

/// The concrete operations `Operation::Random` draws from
pub const CORE_OPERATIONS: [Operation; 6] = [
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
    Operation::SquareRoot,
    Operation::CubeRoot,
    Operation::Halves,
];

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::SquareRoot => "Square & Square Root",
            Operation::CubeRoot => "Cube & Cube Root",
            Operation::Halves => "Halves (½)",
            Operation::Random => "Random Mix",
        }
    }

    /// Resolve the `Random` sentinel to a concrete operation
    fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Operation {
        match self {
            Operation::Random => CORE_OPERATIONS[rng.random_range(0..CORE_OPERATIONS.len())],
            op => op,
        }
    }
}

/// Difficulty tier, mapping to an operand ceiling and a session duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Largest operand drawn at this tier
    pub fn max_number(&self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 30,
            Difficulty::Hard => 50,
        }
    }

    /// Session countdown duration in whole seconds
    pub fn time_limit_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 12,
            Difficulty::Hard => 10,
        }
    }
}

/// A single generated question
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Text shown in the question bar
    pub text: String,
    /// The one correct option value
    pub answer: f64,
    /// Option values in presentation order; the answer is always among the
    /// first four
    pub options: Vec<f64>,
}

/// Generate a question for the given operation and ceiling.
///
/// Total over `max_number >= 1`; there are no failure modes. Distractor
/// search may come up short of ten options, which is accepted as-is.
pub fn generate_question<R: Rng + ?Sized>(
    rng: &mut R,
    operation: Operation,
    max_number: u32,
    difficulty: Difficulty,
) -> Question {
    let (text, answer) = match operation.resolve(rng) {
        Operation::Addition => {
            let a = rng.random_range(1..=max_number);
            let b = rng.random_range(1..=max_number);
            (format!("{a} + {b} = ?"), f64::from(a + b))
        }
        Operation::Subtraction => {
            let a = rng.random_range(1..=max_number);
            let b = rng.random_range(1..=a);
            (format!("{a} - {b} = ?"), f64::from(a - b))
        }
        Operation::Multiplication => {
            let a = rng.random_range(1..=max_number.min(50));
            let b = rng.random_range(1..=10u32);
            (format!("{a} × {b} = ?"), f64::from(a * b))
        }
        Operation::SquareRoot => {
            let base = rng.random_range(1..=max_number.min(50));
            if rng.random_bool(0.5) {
                (format!("{base}² = ?"), f64::from(base * base))
            } else {
                (format!("√{} = ?", base * base), f64::from(base))
            }
        }
        Operation::CubeRoot => {
            let base = rng.random_range(1..=max_number.min(30));
            if rng.random_bool(0.5) {
                (format!("{base}³ = ?"), f64::from(base * base * base))
            } else {
                (format!("∛{} = ?", base * base * base), f64::from(base))
            }
        }
        Operation::Halves => {
            let operand = half_operand(rng, max_number.min(50), difficulty);
            (format!("½ of {operand} = ?"), operand / 2.0)
        }
        Operation::Random => unreachable!("resolved before dispatch"),
    };

    let filled = fill_options(rng, answer);
    let options = order_options(rng, filled, answer);
    Question { text, answer, options }
}

/// Draw the halves operand with tier-dependent decimal richness
fn half_operand<R: Rng + ?Sized>(rng: &mut R, max: u32, difficulty: Difficulty) -> f64 {
    let whole = f64::from(rng.random_range(1..=max));
    match difficulty {
        Difficulty::Easy => whole,
        Difficulty::Medium => {
            if rng.random_bool(0.6) {
                whole
            } else {
                whole + 0.5
            }
        }
        Difficulty::Hard => {
            let roll: f64 = rng.random();
            if roll < 0.4 {
                whole
            } else if roll < 0.7 {
                whole + 0.5
            } else if rng.random_bool(0.5) {
                whole + 0.25
            } else {
                whole + 0.75
            }
        }
    }
}

/// Build the option pool: the answer plus up to nine distinct distractors.
///
/// Perturbation is magnitude- and decimal-aware. The attempt budget bounds
/// the search; a short pool is accepted rather than retried.
fn fill_options<R: Rng + ?Sized>(rng: &mut R, answer: f64) -> Vec<f64> {
    let mut options = vec![answer];
    let mut attempts = 0;

    if answer.fract() != 0.0 {
        const DECIMALS: [f64; 4] = [0.0, 0.25, 0.5, 0.75];
        let whole = answer.floor();
        while options.len() < MAX_OPTIONS && attempts < DISTRACTOR_ATTEMPTS {
            attempts += 1;
            let offset = f64::from(rng.random_range(-4..4i32));
            let decimal = DECIMALS[rng.random_range(0..DECIMALS.len())];
            let candidate = (whole + offset + decimal).max(0.25);
            if candidate != answer && !options.contains(&candidate) {
                options.push(candidate);
            }
        }
    } else {
        let span = if answer > 100.0 {
            (answer * 0.2).floor().max(10.0)
        } else {
            ((answer * 0.3).floor() + 3.0).max(5.0)
        } as i64;
        while options.len() < MAX_OPTIONS && attempts < DISTRACTOR_ATTEMPTS {
            attempts += 1;
            let offset = rng.random_range(-span..span) as f64;
            let candidate = (answer + offset).max(0.0);
            if candidate != answer && !options.contains(&candidate) {
                options.push(candidate);
            }
        }
    }

    options
}

/// Order the pool for presentation: the answer is kept inside the first
/// reveal wave, then the first four and the remainder shuffle independently.
fn order_options<R: Rng + ?Sized>(rng: &mut R, mut options: Vec<f64>, answer: f64) -> Vec<f64> {
    if let Some(pos) = options.iter().position(|&v| v == answer)
        && pos >= FIRST_WAVE
    {
        let swap = rng.random_range(0..FIRST_WAVE);
        options.swap(swap, pos);
    }

    let split = FIRST_WAVE.min(options.len());
    let (first_wave, later) = options.split_at_mut(split);
    first_wave.shuffle(rng);
    later.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ALL_OPERATIONS: [Operation; 7] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::SquareRoot,
        Operation::CubeRoot,
        Operation::Halves,
        Operation::Random,
    ];
    const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    /// Pull the operands back out of "a <symbol> b = ?"
    fn parse_binary(text: &str, symbol: &str) -> (f64, f64) {
        let mut parts = text.split_whitespace();
        let a = parts.next().unwrap().parse().unwrap();
        assert_eq!(parts.next(), Some(symbol), "unexpected text: {text}");
        let b = parts.next().unwrap().parse().unwrap();
        (a, b)
    }

    #[test]
    fn addition_stays_within_easy_ceiling() {
        let mut rng = rng(42);
        for _ in 0..1000 {
            let q = generate_question(&mut rng, Operation::Addition, 20, Difficulty::Easy);
            let (a, b) = parse_binary(&q.text, "+");
            assert!((1.0..=20.0).contains(&a), "a out of range: {a}");
            assert!((1.0..=20.0).contains(&b), "b out of range: {b}");
            assert_eq!(q.answer, a + b);
            assert!(q.answer <= 40.0);
        }
    }

    #[test]
    fn subtraction_is_never_negative() {
        let mut rng = rng(7);
        for _ in 0..1000 {
            let q = generate_question(&mut rng, Operation::Subtraction, 50, Difficulty::Hard);
            let (a, b) = parse_binary(&q.text, "-");
            assert!(b <= a);
            assert_eq!(q.answer, a - b);
            assert!(q.answer >= 0.0);
        }
    }

    #[test]
    fn multiplication_caps_both_operands() {
        let mut rng = rng(3);
        for _ in 0..500 {
            let q = generate_question(&mut rng, Operation::Multiplication, 500, Difficulty::Hard);
            let (a, b) = parse_binary(&q.text, "×");
            assert!((1.0..=50.0).contains(&a));
            assert!((1.0..=10.0).contains(&b));
            assert_eq!(q.answer, a * b);
        }
    }

    #[test]
    fn square_forms_are_consistent() {
        let mut rng = rng(11);
        let mut saw_square = false;
        let mut saw_root = false;
        for _ in 0..200 {
            let q = generate_question(&mut rng, Operation::SquareRoot, 50, Difficulty::Medium);
            if let Some(rest) = q.text.strip_prefix('√') {
                let radicand: f64 = rest.split_whitespace().next().unwrap().parse().unwrap();
                assert_eq!(q.answer * q.answer, radicand);
                assert!((1.0..=50.0).contains(&q.answer));
                saw_root = true;
            } else {
                let base: f64 = q.text.split('²').next().unwrap().parse().unwrap();
                assert_eq!(base * base, q.answer);
                saw_square = true;
            }
        }
        assert!(saw_square && saw_root);
    }

    #[test]
    fn cube_forms_are_consistent() {
        let mut rng = rng(13);
        for _ in 0..200 {
            let q = generate_question(&mut rng, Operation::CubeRoot, 50, Difficulty::Hard);
            if let Some(rest) = q.text.strip_prefix('∛') {
                let cube: f64 = rest.split_whitespace().next().unwrap().parse().unwrap();
                assert_eq!(q.answer * q.answer * q.answer, cube);
                assert!((1.0..=30.0).contains(&q.answer));
            } else {
                let base: f64 = q.text.split('³').next().unwrap().parse().unwrap();
                assert!((1.0..=30.0).contains(&base));
                assert_eq!(base * base * base, q.answer);
            }
        }
    }

    fn halves_operand(q: &Question) -> f64 {
        let rest = q.text.strip_prefix("½ of ").unwrap();
        rest.split_whitespace().next().unwrap().parse().unwrap()
    }

    #[test]
    fn halves_easy_operands_are_whole() {
        let mut rng = rng(17);
        for _ in 0..500 {
            let q = generate_question(&mut rng, Operation::Halves, 50, Difficulty::Easy);
            let operand = halves_operand(&q);
            assert_eq!(operand.fract(), 0.0, "easy operand not whole: {operand}");
            assert_eq!(q.answer, operand / 2.0);
        }
    }

    #[test]
    fn halves_hard_operands_stay_on_quarters() {
        let mut rng = rng(19);
        for _ in 0..500 {
            let q = generate_question(&mut rng, Operation::Halves, 50, Difficulty::Hard);
            let operand = halves_operand(&q);
            assert_eq!((operand * 4.0).fract(), 0.0, "operand off grid: {operand}");
            assert_eq!(q.answer, operand / 2.0);
        }
    }

    #[test]
    fn options_contain_answer_once_in_first_wave() {
        let mut rng = rng(23);
        for operation in ALL_OPERATIONS {
            for tier in TIERS {
                for _ in 0..50 {
                    let q = generate_question(&mut rng, operation, tier.max_number(), tier);
                    let hits = q.options.iter().filter(|&&v| v == q.answer).count();
                    assert_eq!(hits, 1, "{:?}: {:?}", operation, q.options);
                    let pos = q.options.iter().position(|&v| v == q.answer).unwrap();
                    assert!(pos < FIRST_WAVE, "answer at index {pos}");
                    assert!(q.options.len() <= MAX_OPTIONS);
                }
            }
        }
    }

    #[test]
    fn decimal_answers_get_decimal_aware_distractors() {
        let mut rng = rng(29);
        let mut checked = 0;
        while checked < 100 {
            let q = generate_question(&mut rng, Operation::Halves, 50, Difficulty::Hard);
            if q.answer.fract() == 0.0 {
                continue;
            }
            checked += 1;
            for &option in &q.options {
                assert!(option >= 0.25, "decimal option below floor: {option}");
                if option != q.answer {
                    assert_eq!((option * 4.0).fract(), 0.0, "distractor off grid: {option}");
                }
            }
        }
    }

    #[test]
    fn integer_distractors_never_go_negative() {
        let mut rng = rng(31);
        for _ in 0..500 {
            let q = generate_question(&mut rng, Operation::Subtraction, 20, Difficulty::Easy);
            for &option in &q.options {
                assert!(option >= 0.0);
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_question(&mut rng(99), Operation::Random, 30, Difficulty::Medium);
        let b = generate_question(&mut rng(99), Operation::Random, 30, Difficulty::Medium);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn generated_questions_hold_invariants(
            seed in any::<u64>(),
            op_index in 0usize..ALL_OPERATIONS.len(),
            tier_index in 0usize..TIERS.len(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tier = TIERS[tier_index];
            let q = generate_question(&mut rng, ALL_OPERATIONS[op_index], tier.max_number(), tier);

            prop_assert!(!q.text.is_empty());
            prop_assert_eq!(q.options.iter().filter(|&&v| v == q.answer).count(), 1);
            prop_assert!(q.options.iter().position(|&v| v == q.answer).unwrap() < FIRST_WAVE);
            prop_assert!(q.options.len() <= MAX_OPTIONS);
            for (i, a) in q.options.iter().enumerate() {
                for b in &q.options[i + 1..] {
                    prop_assert!(a != b, "duplicate option {}", a);
                }
            }
        }
    }
}
