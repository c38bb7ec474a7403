//! `quad.solve.formula`: roots via the quadratic formula, two decimals.
//!
//! Params are `[a, b, c]`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{Distractor, Draft};
use crate::algebra::{discriminant, real_roots, roots_with};
use crate::model::Difficulty;
use crate::notation::{format_quadratic, format_real_roots, NO_REAL_SOLUTIONS};

pub(super) fn draft_from_params([a, b, c]: [i64; 3]) -> Draft {
    let (af, bf, cf) = (a as f64, b as f64, c as f64);
    let disc = discriminant(af, bf, cf);
    let correct = real_roots(af, bf, cf);

    let mut distractors = vec![
        // Using +b instead of -b.
        Distractor::new(format_real_roots(&real_roots(af, -bf, cf)), "sign_error"),
        // Dividing by a instead of 2a.
        Distractor::new(
            format_real_roots(&roots_with(bf, disc, af)),
            "missing_two_a",
        ),
        // b^2 + 4ac.
        Distractor::new(
            format_real_roots(&roots_with(bf, bf * bf + 4.0 * af * cf, 2.0 * af)),
            "discriminant_sign_error",
        ),
    ];
    if disc >= 0.0 {
        distractors.push(Distractor::new(NO_REAL_SOLUTIONS, "discriminant_misread"));
    } else {
        distractors.push(Distractor::new(
            format_real_roots(&roots_with(bf, -disc, 2.0 * af)),
            "discriminant_misread",
        ));
    }
    for delta in [1.0, -1.0, 2.0, -2.0] {
        let source = if correct.is_empty() {
            roots_with(bf, -disc, 2.0 * af)
        } else {
            correct.clone()
        };
        let shifted: Vec<f64> = source.iter().map(|r| r + delta).collect();
        distractors.push(Distractor::new(format_real_roots(&shifted), "off_by_one"));
    }

    Draft {
        stem: format!(
            "Solve using the quadratic formula: {} = 0",
            format_quadratic(a, b, c)
        ),
        solution: format_real_roots(&correct),
        distractors,
    }
}

pub(super) fn draft_sampled(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
    let params = match difficulty {
        // a > 0 and c < 0 keep the discriminant positive.
        Difficulty::Easy => [1, rng.random_range(-9..=9), rng.random_range(-9..=-1)],
        Difficulty::Medium => [
            rng.random_range(1..=5),
            rng.random_range(-9..=9),
            rng.random_range(-9..=-1),
        ],
        Difficulty::Hard => {
            let mut a: i64 = rng.random_range(-5..=4);
            if a >= 0 {
                a += 1;
            }
            [a, rng.random_range(-9..=9), rng.random_range(-9..=9)]
        }
    };
    draft_from_params(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_real_roots() {
        let draft = draft_from_params([1, 2, -4]);
        // x = -1 ± sqrt(5)
        assert_eq!(draft.solution, "x = -3.24 or x = 1.24");
        assert_eq!(
            draft.stem,
            "Solve using the quadratic formula: x^2 + 2x - 4 = 0"
        );
        assert_eq!(draft.distractors[0].text, "x = -1.24 or x = 3.24");
        assert_eq!(draft.distractors[3].text, "no real solutions");
    }

    #[test]
    fn no_real_roots() {
        let draft = draft_from_params([1, 0, 4]);
        assert_eq!(draft.solution, "no real solutions");
        assert_eq!(draft.distractors[3].tag, "discriminant_misread");
        assert_eq!(draft.distractors[3].text, "x = -2.00 or x = 2.00");
    }

    #[test]
    fn double_root() {
        let draft = draft_from_params([1, -4, 4]);
        assert_eq!(draft.solution, "x = 2.00");
    }
}
