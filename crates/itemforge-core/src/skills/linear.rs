//! `arith.linear.solve`: one-step and two-step linear equations.
//!
//! Params are `[a, b, c]` for `ax + b = c`, with `a` dividing `c - b`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{push_shifts, CuratedEntry, Distractor, Draft};
use crate::model::Difficulty;
use crate::notation::format_linear;

pub(super) const EASY_POOL: &[CuratedEntry] = &[
    CuratedEntry {
        stem: "Solve for x: x + 4 = 9",
        params: [1, 4, 9],
    },
    CuratedEntry {
        stem: "Solve for x: 2x + 3 = 11",
        params: [2, 3, 11],
    },
    CuratedEntry {
        stem: "Solve for x: 3x - 6 = 9",
        params: [3, -6, 9],
    },
    CuratedEntry {
        stem: "Solve for x: x - 7 = 2",
        params: [1, -7, 2],
    },
    CuratedEntry {
        stem: "Solve for x: 5x + 10 = 0",
        params: [5, 10, 0],
    },
    CuratedEntry {
        stem: "Solve for x: 4x - 1 = 11",
        params: [4, -1, 11],
    },
];

fn assignment(x: i64) -> String {
    format!("x = {x}")
}

pub(super) fn draft_from_params([a, b, c]: [i64; 3]) -> Draft {
    let x = (c - b) / a;
    let mut distractors = vec![
        Distractor::new(assignment(-x), "sign_error"),
        Distractor::new(assignment(c - b), "forgot_division"),
    ];
    // Moving b across without flipping its sign.
    let wrong_move = c + b;
    if wrong_move % a == 0 {
        distractors.push(Distractor::new(
            assignment(wrong_move / a),
            "miscalculated_step",
        ));
    } else {
        distractors.push(Distractor::new(assignment(wrong_move), "miscalculated_step"));
    }
    push_shifts(&mut distractors, 4, |d| assignment(x + d));

    Draft {
        stem: format!("Solve for x: {} = {c}", format_linear(a, b)),
        solution: assignment(x),
        distractors,
    }
}

pub(super) fn draft_sampled(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
    let (a, x_reach, b_reach) = match difficulty {
        // Easy is served from the curated pool.
        Difficulty::Easy | Difficulty::Medium => (rng.random_range(2..=9), 10, 20),
        Difficulty::Hard => {
            // Anything in [-12, 12] except 0 and 1.
            let mut a: i64 = rng.random_range(-12..=10);
            if a >= 0 {
                a += 2;
            }
            (a, 25, 50)
        }
    };
    let x: i64 = rng.random_range(-x_reach..=x_reach);
    let b: i64 = rng.random_range(-b_reach..=b_reach);
    draft_from_params([a, b, a * x + b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_step_draft() {
        let draft = draft_from_params([3, 5, 20]);
        assert_eq!(draft.stem, "Solve for x: 3x + 5 = 20");
        assert_eq!(draft.solution, "x = 5");
        assert_eq!(draft.distractors[0].text, "x = -5");
        assert_eq!(draft.distractors[1].text, "x = 15");
        assert_eq!(draft.distractors[2].text, "x = 25");
    }

    #[test]
    fn negative_leading_coefficient() {
        let draft = draft_from_params([-4, 2, -10]);
        assert_eq!(draft.stem, "Solve for x: -4x + 2 = -10");
        assert_eq!(draft.solution, "x = 3");
    }
}
