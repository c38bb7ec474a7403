//! Skill catalog.
//!
//! Each skill knows how to sample its parameters for a difficulty, compute the
//! correct answer in closed form, and list candidate distractors in priority
//! order. The generator decides which candidates survive.

mod discriminant;
mod factoring;
mod formula;
mod linear;
mod vertex;

use std::fmt;

use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::model::Difficulty;

/// How items for a (skill, difficulty) pair are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Indexed selection from a hand-authored pool.
    Curated,
    /// Seeded sampling of coefficients.
    Parameterized,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Curated => write!(f, "curated"),
            GenerationMode::Parameterized => write!(f, "parameterized"),
        }
    }
}

/// A hand-authored pool entry: the literal stem and the parameters it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedEntry {
    pub stem: &'static str,
    /// Skill-specific parameters; see each skill module for their meaning.
    pub params: [i64; 3],
}

/// A candidate wrong answer and the mistake it models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distractor {
    pub text: String,
    pub tag: &'static str,
}

impl Distractor {
    pub(crate) fn new(text: impl Into<String>, tag: &'static str) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}

/// Everything a skill produces before choices are selected and shuffled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub stem: String,
    pub solution: String,
    /// Candidates in priority order; the generator keeps the first three
    /// that are unique after normalization.
    pub distractors: Vec<Distractor>,
}

/// Append `off_by_one` candidates produced by `shift(delta)` for deltas
/// `+1, -1, +2, -2, ...` up to `reach`.
pub(crate) fn push_shifts(
    out: &mut Vec<Distractor>,
    reach: i64,
    mut shift: impl FnMut(i64) -> String,
) {
    for magnitude in 1..=reach {
        for delta in [magnitude, -magnitude] {
            out.push(Distractor::new(shift(delta), "off_by_one"));
        }
    }
}

/// The closed set of supported skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Skill {
    Vertex,
    Factoring,
    Formula,
    Discriminant,
    Linear,
}

impl Skill {
    pub const ALL: [Skill; 5] = [
        Skill::Vertex,
        Skill::Factoring,
        Skill::Formula,
        Skill::Discriminant,
        Skill::Linear,
    ];

    /// Look up a skill by its catalog id.
    pub fn from_id(id: &str) -> Option<Skill> {
        Skill::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Skill::Vertex => "quad.graph.vertex",
            Skill::Factoring => "quad.solve.factoring",
            Skill::Formula => "quad.solve.formula",
            Skill::Discriminant => "quad.discriminant",
            Skill::Linear => "arith.linear.solve",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Skill::Vertex => "Vertex of a parabola",
            Skill::Factoring => "Solve a quadratic by factoring",
            Skill::Formula => "Solve a quadratic with the quadratic formula",
            Skill::Discriminant => "Discriminant of a quadratic",
            Skill::Linear => "Solve a linear equation",
        }
    }

    /// Family tag attached to every item of this skill.
    pub fn family(&self) -> &'static str {
        match self {
            Skill::Linear => "linear",
            _ => "quadratics",
        }
    }

    /// Difficulties this skill can generate.
    pub fn difficulties(&self) -> &'static [Difficulty] {
        &Difficulty::ALL
    }

    pub fn mode(&self, difficulty: Difficulty) -> GenerationMode {
        match (self, difficulty) {
            (Skill::Vertex, Difficulty::Easy) | (Skill::Linear, Difficulty::Easy) => {
                GenerationMode::Curated
            }
            _ => GenerationMode::Parameterized,
        }
    }

    /// The curated pool for this difficulty, if the pair is curated.
    pub fn curated_pool(&self, difficulty: Difficulty) -> Option<&'static [CuratedEntry]> {
        match (self, difficulty) {
            (Skill::Vertex, Difficulty::Easy) => Some(vertex::EASY_POOL),
            (Skill::Linear, Difficulty::Easy) => Some(linear::EASY_POOL),
            _ => None,
        }
    }

    /// Build a draft from a curated entry. The entry's literal stem is kept.
    /// `None` for skills that have no curated pool.
    pub fn draft_curated(&self, entry: &CuratedEntry) -> Option<Draft> {
        let mut draft = self.draft_for_params(entry.params)?;
        draft.stem = entry.stem.to_string();
        Some(draft)
    }

    /// Rebuild a curated skill's draft from its parameters.
    fn draft_for_params(&self, params: [i64; 3]) -> Option<Draft> {
        match self {
            Skill::Vertex => Some(vertex::draft_from_params(params)),
            Skill::Linear => Some(linear::draft_from_params(params)),
            Skill::Factoring | Skill::Formula | Skill::Discriminant => None,
        }
    }

    /// Sample parameters with the call-local generator and build a draft.
    pub fn draft_sampled(&self, difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Draft {
        match self {
            Skill::Vertex => vertex::draft_sampled(difficulty, rng),
            Skill::Factoring => factoring::draft_sampled(difficulty, rng),
            Skill::Formula => formula::draft_sampled(difficulty, rng),
            Skill::Discriminant => discriminant::draft_sampled(difficulty, rng),
            Skill::Linear => linear::draft_sampled(difficulty, rng),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
