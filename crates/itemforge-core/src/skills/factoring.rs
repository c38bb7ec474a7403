//! `quad.solve.factoring`: integer roots of a factorable quadratic.
//!
//! Params are `[scale, r1, r2]` for `scale * (x - r1)(x - r2) = 0`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{push_shifts, Distractor, Draft};
use crate::model::Difficulty;
use crate::notation::{format_integer_roots, format_quadratic};

pub(super) fn draft_from_params([scale, r1, r2]: [i64; 3]) -> Draft {
    let b = -scale * (r1 + r2);
    let c = scale * r1 * r2;
    let roots = |x: i64, y: i64| format_integer_roots(x, y);

    let mut distractors = vec![
        // Reading the roots straight off (x + p)(x + q).
        Distractor::new(roots(-r1, -r2), "sign_error"),
        Distractor::new(roots(r1, -r2), "partial_sign_error"),
        Distractor::new(roots(-r1, r2), "partial_sign_error"),
    ];
    if scale != 1 {
        distractors.push(Distractor::new(
            roots(scale * r1, scale * r2),
            "forgot_division",
        ));
    }
    push_shifts(&mut distractors, 3, |d| roots(r1 + d, r2 + d));
    push_shifts(&mut distractors, 2, |d| roots(r1, r2 + d));

    Draft {
        stem: format!("Solve: {} = 0", format_quadratic(scale, b, c)),
        solution: roots(r1, r2),
        distractors,
    }
}

pub(super) fn draft_sampled(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
    let (scale, reach) = match difficulty {
        Difficulty::Easy => (1, 6),
        Difficulty::Medium => (1, 12),
        Difficulty::Hard => {
            let scale: i64 = rng.random_range(2..=3);
            (scale, 9)
        }
    };
    let r1: i64 = rng.random_range(-reach..=reach);
    let r2: i64 = rng.random_range(-reach..=reach);
    draft_from_params([scale, r1, r2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monic_draft() {
        let draft = draft_from_params([1, -2, 3]);
        assert_eq!(draft.stem, "Solve: x^2 - x - 6 = 0");
        assert_eq!(draft.solution, "x = -2 or x = 3");
        assert_eq!(draft.distractors[0].text, "x = -3 or x = 2");
    }

    #[test]
    fn scaled_draft_offers_forgot_division() {
        let draft = draft_from_params([2, -2, 3]);
        assert_eq!(draft.stem, "Solve: 2x^2 - 2x - 12 = 0");
        assert!(draft
            .distractors
            .iter()
            .any(|d| d.tag == "forgot_division" && d.text == "x = -4 or x = 6"));
    }

    #[test]
    fn double_root() {
        let draft = draft_from_params([1, 3, 3]);
        assert_eq!(draft.stem, "Solve: x^2 - 6x + 9 = 0");
        assert_eq!(draft.solution, "x = 3");
    }
}
