//! `quad.graph.vertex`: the vertex of a parabola.
//!
//! Params are `[a, h, k]` for `y = a(x - h)^2 + k`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{push_shifts, CuratedEntry, Distractor, Draft};
use crate::model::Difficulty;
use crate::notation::{format_point, format_quadratic, format_vertex_form};

pub(super) const EASY_POOL: &[CuratedEntry] = &[
    CuratedEntry {
        stem: "For y = (x - 1)^2 + 4, what is the vertex?",
        params: [1, 1, 4],
    },
    CuratedEntry {
        stem: "For y = (x + 2)^2 - 3, what is the vertex?",
        params: [1, -2, -3],
    },
    CuratedEntry {
        stem: "For y = (x - 3)^2 + 2, what is the vertex?",
        params: [1, 3, 2],
    },
    CuratedEntry {
        stem: "For y = (x - 5)^2 - 1, what is the vertex?",
        params: [1, 5, -1],
    },
    CuratedEntry {
        stem: "For y = (x + 4)^2 + 6, what is the vertex?",
        params: [1, -4, 6],
    },
    CuratedEntry {
        stem: "For y = (x - 2)^2 - 7, what is the vertex?",
        params: [1, 2, -7],
    },
    CuratedEntry {
        stem: "For y = (x + 1)^2 + 5, what is the vertex?",
        params: [1, -1, 5],
    },
    CuratedEntry {
        stem: "For y = (x - 6)^2 + 3, what is the vertex?",
        params: [1, 6, 3],
    },
];

fn stem_for(expr: &str) -> String {
    format!("For y = {expr}, what is the vertex?")
}

fn point(h: i64, k: i64) -> String {
    format_point(h as f64, k as f64)
}

/// Candidates shared by both stem forms.
fn common_distractors(h: i64, k: i64, out: &mut Vec<Distractor>) {
    out.push(Distractor::new(point(-h, k), "sign_error"));
    out.push(Distractor::new(point(k, h), "swapped_coordinates"));
    out.push(Distractor::new(point(h, -k), "partial_sign_error"));
    out.push(Distractor::new(point(-h, -k), "sign_error"));
    push_shifts(out, 3, |d| point(h + d, k + d));
}

/// Vertex-form stem `y = a(x - h)^2 + k`.
pub(super) fn draft_from_params([a, h, k]: [i64; 3]) -> Draft {
    let mut distractors = Vec::new();
    common_distractors(h, k, &mut distractors);
    Draft {
        stem: stem_for(&format_vertex_form(a, h, k)),
        solution: point(h, k),
        distractors,
    }
}

/// Standard-form stem `y = ax^2 + bx + c` with an integer vertex.
fn draft_standard([a, h, k]: [i64; 3]) -> Draft {
    let b = -2 * a * h;
    let c = a * h * h + k;
    let mut distractors = Vec::new();
    // Dropping the 2 in -b/2a gives x = -b/a = 2h, evaluated on the same curve.
    distractors.push(Distractor::new(
        point(2 * h, a * h * h + k),
        "miscalculated_step",
    ));
    // Reading c as the y-coordinate.
    distractors.push(Distractor::new(point(h, c), "miscalculated_step"));
    common_distractors(h, k, &mut distractors);
    Draft {
        stem: stem_for(&format_quadratic(a, b, c)),
        solution: point(h, k),
        distractors,
    }
}

pub(super) fn draft_sampled(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
    match difficulty {
        // Easy is served from the curated pool.
        Difficulty::Easy | Difficulty::Medium => {
            const LEADING: [i64; 4] = [-3, -2, 2, 3];
            let a = LEADING[rng.random_range(0..LEADING.len())];
            let h: i64 = rng.random_range(-9..=9);
            let k: i64 = rng.random_range(-9..=9);
            draft_from_params([a, h, k])
        }
        Difficulty::Hard => {
            const LEADING: [i64; 6] = [-3, -2, -1, 1, 2, 3];
            let a = LEADING[rng.random_range(0..LEADING.len())];
            let h: i64 = rng.random_range(-6..=6);
            let k: i64 = rng.random_range(-9..=9);
            draft_standard([a, h, k])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_form_draft() {
        let draft = draft_from_params([1, 3, 2]);
        assert_eq!(draft.stem, "For y = (x - 3)^2 + 2, what is the vertex?");
        assert_eq!(draft.solution, "(3, 2)");
        assert_eq!(draft.distractors[0].text, "(-3, 2)");
        assert_eq!(draft.distractors[1].text, "(2, 3)");
    }

    #[test]
    fn standard_form_draft() {
        // y = 2(x + 1)^2 - 5 = 2x^2 + 4x - 3
        let draft = draft_standard([2, -1, -5]);
        assert_eq!(draft.stem, "For y = 2x^2 + 4x - 3, what is the vertex?");
        assert_eq!(draft.solution, "(-1, -5)");
        assert_eq!(draft.distractors[0].tag, "miscalculated_step");
        assert_eq!(draft.distractors[0].text, "(-2, -3)");
    }
}
