//! `quad.discriminant`: the value of `b^2 - 4ac`.
//!
//! Params are `[a, b, c]`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{push_shifts, Distractor, Draft};
use crate::model::Difficulty;
use crate::notation::format_quadratic;

pub(super) fn draft_from_params([a, b, c]: [i64; 3]) -> Draft {
    let disc = b * b - 4 * a * c;
    let mut distractors = vec![
        Distractor::new((b * b + 4 * a * c).to_string(), "sign_error"),
        Distractor::new((b - 4 * a * c).to_string(), "forgot_square"),
        Distractor::new((a * a - 4 * b * c).to_string(), "swapped_coefficients"),
        Distractor::new((b * b - 2 * a * c).to_string(), "miscalculated_step"),
    ];
    push_shifts(&mut distractors, 4, |d| (disc + d).to_string());

    Draft {
        stem: format!(
            "What is the discriminant of {} = 0?",
            format_quadratic(a, b, c)
        ),
        solution: disc.to_string(),
        distractors,
    }
}

pub(super) fn draft_sampled(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
    let (a, reach) = match difficulty {
        Difficulty::Easy => (1, 9),
        Difficulty::Medium => (rng.random_range(1..=4), 12),
        Difficulty::Hard => {
            let mut a: i64 = rng.random_range(-6..=5);
            if a >= 0 {
                a += 1;
            }
            (a, 15)
        }
    };
    let b: i64 = rng.random_range(-reach..=reach);
    let c: i64 = rng.random_range(-reach..=reach);
    draft_from_params([a, b, c])
}
