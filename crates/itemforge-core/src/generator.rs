//! Deterministic item generator.
//!
//! `generate(skill, difficulty, seed)` is a pure function of its inputs. The
//! only randomness is a ChaCha8 generator created per call and seeded from
//! SHA-256 of the request plus the attempt number, so concurrent callers never
//! share state and separate processes agree byte for byte.

use std::collections::{BTreeMap, BTreeSet};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::hashing::{item_id, stable_u64};
use crate::model::{Choice, ChoiceId, Difficulty, EvalCase, Item};
use crate::normalize::normalize_text;
use crate::skills::{CuratedEntry, Draft, GenerationMode, Skill};
use crate::validator::validate;

/// Regeneration attempts (each with a perturbed seed) before giving up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 20;

/// Distractor candidates examined per attempt before giving up.
pub const MAX_DISTRACTOR_ATTEMPTS: usize = 20;

/// Generate an item for a (skill, difficulty, seed) request.
pub fn generate(skill_id: &str, difficulty: Difficulty, seed: u64) -> Result<Item, GenerationError> {
    let skill =
        Skill::from_id(skill_id).ok_or_else(|| GenerationError::UnknownSkill(skill_id.to_string()))?;
    if !skill.difficulties().contains(&difficulty) {
        return Err(GenerationError::UnsupportedDifficulty {
            skill_id: skill_id.to_string(),
            difficulty: difficulty.to_string(),
        });
    }

    let curated = match skill.mode(difficulty) {
        GenerationMode::Curated => {
            let pool = skill.curated_pool(difficulty).unwrap_or_default();
            if pool.is_empty() {
                return Err(GenerationError::UnsupportedDifficulty {
                    skill_id: skill_id.to_string(),
                    difficulty: difficulty.to_string(),
                });
            }
            Some(&pool[pool_index(seed, pool.len())])
        }
        GenerationMode::Parameterized => None,
    };

    let mut last_error = None;
    for attempt in 0..MAX_GENERATION_ATTEMPTS {
        let mut rng = attempt_rng(skill, difficulty, seed, attempt);
        let draft = match curated {
            Some(entry) => skill
                .draft_curated(entry)
                .ok_or_else(|| GenerationError::NotCurated {
                    skill_id: skill_id.to_string(),
                    difficulty: difficulty.to_string(),
                })?,
            None => skill.draft_sampled(difficulty, &mut rng),
        };

        let item = match assemble(skill, difficulty, seed, draft, curated.is_some(), &mut rng) {
            Ok(item) => item,
            Err(e) => {
                // A curated entry yields the same draft on every attempt.
                if curated.is_some() {
                    return Err(e);
                }
                tracing::debug!(skill = skill_id, seed, attempt, "retrying: {e}");
                last_error = Some(e);
                continue;
            }
        };

        match validate(&item) {
            Ok(()) => return Ok(item),
            Err(e) => {
                tracing::debug!(skill = skill_id, seed, attempt, "item failed validation: {e}");
                last_error = Some(GenerationError::RetryCapExhausted {
                    skill_id: skill_id.to_string(),
                    attempts: MAX_GENERATION_ATTEMPTS,
                    last_error: e,
                });
            }
        }
    }

    Err(last_error.unwrap_or_else(|| GenerationError::DistractorsExhausted {
        skill_id: skill_id.to_string(),
        attempts: MAX_GENERATION_ATTEMPTS,
    }))
}

/// Generate the item an eval case asks for. The difficulty is parsed here so
/// an unknown level surfaces as a `GenerationError`.
pub fn generate_for_case(case: &EvalCase) -> Result<Item, GenerationError> {
    let difficulty: Difficulty = case
        .difficulty
        .parse()
        .map_err(|_| GenerationError::UnknownDifficulty(case.difficulty.clone()))?;
    generate(&case.skill_id, difficulty, case.seed)
}

fn pool_index(seed: u64, len: usize) -> usize {
    (seed % len as u64) as usize
}

/// A fresh generator for one attempt. Attempt 0 is the unperturbed request.
fn attempt_rng(skill: Skill, difficulty: Difficulty, seed: u64, attempt: u32) -> ChaCha8Rng {
    let seed_text = seed.to_string();
    let attempt_text = attempt.to_string();
    let derived = stable_u64(&[
        "itemforge.generate",
        skill.id(),
        difficulty.as_str(),
        &seed_text,
        &attempt_text,
    ]);
    ChaCha8Rng::seed_from_u64(derived)
}

/// Keep the first three distractors that are unique after normalization,
/// shuffle the four choices, and assign ids.
fn assemble(
    skill: Skill,
    difficulty: Difficulty,
    seed: u64,
    draft: Draft,
    curated: bool,
    rng: &mut ChaCha8Rng,
) -> Result<Item, GenerationError> {
    let mut seen = BTreeSet::new();
    seen.insert(normalize_text(&draft.solution));

    let mut picked: Vec<(String, Option<String>)> = vec![(draft.solution.clone(), None)];
    for candidate in draft.distractors.iter().take(MAX_DISTRACTOR_ATTEMPTS) {
        if picked.len() == 4 {
            break;
        }
        if seen.insert(normalize_text(&candidate.text)) {
            picked.push((candidate.text.clone(), Some(candidate.tag.to_string())));
        }
    }
    if picked.len() < 4 {
        return Err(GenerationError::DistractorsExhausted {
            skill_id: skill.id().to_string(),
            attempts: MAX_DISTRACTOR_ATTEMPTS as u32,
        });
    }

    // Fisher-Yates with the call-local generator.
    for i in (1..picked.len()).rev() {
        let j = rng.random_range(0..=i);
        picked.swap(i, j);
    }

    let mut solution_choice_id = ChoiceId::A;
    let choices: Vec<Choice> = picked
        .into_iter()
        .zip(ChoiceId::ALL)
        .map(|((text, error_tag), id)| {
            if error_tag.is_none() {
                solution_choice_id = id;
            }
            Choice { id, text, error_tag }
        })
        .collect();

    let mode = if curated {
        GenerationMode::Curated
    } else {
        GenerationMode::Parameterized
    };
    let tags: BTreeSet<String> = [
        skill.id().to_string(),
        skill.family().to_string(),
        difficulty.to_string(),
        format!("mode:{mode}"),
    ]
    .into_iter()
    .collect();

    Ok(Item {
        item_id: item_id(skill.id(), difficulty.as_str(), seed),
        skill_id: skill.id().to_string(),
        difficulty,
        stem: draft.stem,
        choices,
        solution_choice_id,
        solution_text: draft.solution,
        tags,
    })
}

// ---------------------------------------------------------------------------
// Cycle sessions
// ---------------------------------------------------------------------------

/// The result of a cycle-mode draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDraw {
    pub item: Item,
    /// Index of the served entry in its curated pool.
    pub pool_index: usize,
    /// Set when every entry had already been served this cycle. The draw
    /// still returns an item and the session starts a new cycle.
    pub pool_exhausted: bool,
}

/// Tracks which curated entries a session has already seen so repeats are
/// avoided until the pool runs out.
#[derive(Debug, Clone, Default)]
pub struct CycleSession {
    seen: BTreeMap<(Skill, Difficulty), BTreeSet<usize>>,
}

impl CycleSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the seed's pool entry, or the next unseen one after it.
    pub fn draw(
        &mut self,
        skill_id: &str,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<CycleDraw, GenerationError> {
        let skill = Skill::from_id(skill_id)
            .ok_or_else(|| GenerationError::UnknownSkill(skill_id.to_string()))?;
        let pool = curated_pool_for(skill, difficulty)?;
        let len = pool.len();
        let start = pool_index(seed, len);

        let seen = self.seen.entry((skill, difficulty)).or_default();
        let unseen = (0..len).find(|offset| !seen.contains(&((start + offset) % len)));

        let (offset, pool_exhausted) = match unseen {
            Some(offset) => (offset, false),
            None => {
                tracing::debug!(skill = skill_id, %difficulty, "curated pool exhausted, starting new cycle");
                seen.clear();
                (0, true)
            }
        };
        let index = (start + offset) % len;
        seen.insert(index);

        // Any seed congruent to `index` selects that entry.
        let effective_seed = seed.checked_add(offset as u64).unwrap_or(index as u64);
        let item = generate(skill_id, difficulty, effective_seed)?;

        Ok(CycleDraw {
            item,
            pool_index: index,
            pool_exhausted,
        })
    }

    /// Number of entries served in the current cycle for a pair.
    pub fn seen_count(&self, skill_id: &str, difficulty: Difficulty) -> usize {
        Skill::from_id(skill_id)
            .and_then(|skill| self.seen.get(&(skill, difficulty)))
            .map(BTreeSet::len)
            .unwrap_or(0)
    }

    /// Forget everything served so far.
    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

fn curated_pool_for(
    skill: Skill,
    difficulty: Difficulty,
) -> Result<&'static [CuratedEntry], GenerationError> {
    skill
        .curated_pool(difficulty)
        .filter(|pool| !pool.is_empty())
        .ok_or_else(|| GenerationError::NotCurated {
            skill_id: skill.id().to_string(),
            difficulty: difficulty.to_string(),
        })
}
