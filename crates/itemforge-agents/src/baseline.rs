//! Baseline agents: oracle, fixed choice, and seeded random.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use itemforge_core::hashing::stable_u64;
use itemforge_core::normalize::normalize_text;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::error::SolveError;

/// Always answers correctly. Useful for checking the harness itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle;

impl Agent for Oracle {
    fn name(&self) -> &str {
        "oracle"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(item.solution_choice_id)
    }
}

/// Always answers the same id.
#[derive(Debug, Clone)]
pub struct FixedChoice {
    choice: ChoiceId,
    name: String,
}

impl FixedChoice {
    pub fn new(choice: ChoiceId) -> Self {
        let name = if choice == ChoiceId::A {
            "fixed".to_string()
        } else {
            format!("fixed:{choice}")
        };
        Self { choice, name }
    }

    pub fn choice(&self) -> ChoiceId {
        self.choice
    }
}

impl Default for FixedChoice {
    fn default() -> Self {
        Self::new(ChoiceId::A)
    }
}

impl Agent for FixedChoice {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&self, _item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(self.choice)
    }
}

/// Uniform pick seeded from the item id, so the same item gets the same
/// answer in every process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededRandom;

impl Agent for SeededRandom {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(seeded_choice(&item.item_id))
    }
}

/// The seeded-random pick for an item id.
pub fn seeded_choice(item_id: &str) -> ChoiceId {
    let seed = stable_u64(&["itemforge.agent.random", item_id]);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ChoiceId::ALL[rng.random_range(0..ChoiceId::ALL.len())]
}

/// The id of the choice whose normalized text equals `answer`, if any.
pub fn pick_by_text(item: &Item, answer: &str) -> Option<ChoiceId> {
    let wanted = normalize_text(answer);
    item.choices
        .iter()
        .find(|c| normalize_text(&c.text) == wanted)
        .map(|c| c.id)
}

/// Resolve a solver's computed answer to a choice, falling back to the
/// seeded-random pick when solving failed or no choice matches.
pub(crate) fn answer_or_fallback(
    solver: &str,
    item: &Item,
    answer: Result<String, SolveError>,
) -> ChoiceId {
    let answer = match answer {
        Ok(answer) => answer,
        Err(e) => {
            tracing::debug!(solver, item = %item.item_id, "{e}, falling back to random");
            return seeded_choice(&item.item_id);
        }
    };
    match pick_by_text(item, &answer) {
        Some(id) => id,
        None => {
            tracing::debug!(
                solver,
                item = %item.item_id,
                answer = %answer,
                "answer matches no choice, falling back to random"
            );
            seeded_choice(&item.item_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemforge_core::{generate, Difficulty};

    fn item(seed: u64) -> Item {
        generate("quad.discriminant", Difficulty::Medium, seed).unwrap()
    }

    #[test]
    fn oracle_always_correct() {
        for seed in 0..50 {
            let item = item(seed);
            assert_eq!(Oracle.choose(&item).unwrap(), item.solution_choice_id);
        }
    }

    #[test]
    fn fixed_choice_names() {
        assert_eq!(FixedChoice::default().name(), "fixed");
        assert_eq!(FixedChoice::new(ChoiceId::C).name(), "fixed:C");
        assert_eq!(FixedChoice::new(ChoiceId::C).choose(&item(1)).unwrap(), ChoiceId::C);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let item = item(3);
        let first = SeededRandom.choose(&item).unwrap();
        for _ in 0..10 {
            assert_eq!(SeededRandom.choose(&item).unwrap(), first);
        }
        assert_eq!(seeded_choice(&item.item_id), first);
    }

    #[test]
    fn seeded_random_spreads_over_ids() {
        let mut counts = [0usize; 4];
        for seed in 0..400 {
            counts[seeded_choice(&format!("itm-{seed:012x}")).index()] += 1;
        }
        for count in counts {
            assert!((50..=150).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn pick_by_text_normalizes() {
        let item = item(5);
        let solution = item.solution_text.clone();
        assert_eq!(
            pick_by_text(&item, &format!("  {solution} ")),
            Some(item.solution_choice_id)
        );
        assert_eq!(pick_by_text(&item, "not an answer"), None);
    }
}
