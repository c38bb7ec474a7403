//! Structural validation of items.
//!
//! Used after generation and by external callers who received an item from
//! elsewhere. Pure: it only borrows the item.

use crate::error::StructuralError;
use crate::model::{ChoiceId, Item};
use crate::normalize::normalize_text;

/// Check every structural invariant of an item, returning the first violation.
pub fn validate(item: &Item) -> Result<(), StructuralError> {
    if item.stem.trim().is_empty() {
        return Err(StructuralError::EmptyStem);
    }
    if item.choices.len() != ChoiceId::ALL.len() {
        return Err(StructuralError::WrongChoiceCount(item.choices.len()));
    }

    let mut present = [false; 4];
    for choice in &item.choices {
        let slot = &mut present[choice.id.index()];
        if *slot {
            return Err(StructuralError::DuplicateChoiceId(choice.id.to_string()));
        }
        *slot = true;
    }
    if let Some(missing) = ChoiceId::ALL.iter().find(|id| !present[id.index()]) {
        return Err(StructuralError::MissingChoiceId(missing.to_string()));
    }

    let normalized: Vec<String> = item.choices.iter().map(|c| normalize_text(&c.text)).collect();
    for i in 0..normalized.len() {
        for j in (i + 1)..normalized.len() {
            if normalized[i] == normalized[j] {
                return Err(StructuralError::DuplicateChoiceText {
                    first: item.choices[i].id.to_string(),
                    second: item.choices[j].id.to_string(),
                });
            }
        }
    }

    let solution = item
        .solution_choice()
        .ok_or_else(|| StructuralError::SolutionNotAmongChoices(item.solution_choice_id.to_string()))?;
    if normalize_text(&solution.text) != normalize_text(&item.solution_text) {
        return Err(StructuralError::SolutionTextMismatch(
            item.solution_choice_id.to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, Difficulty};
    use std::collections::BTreeSet;

    fn sample_item() -> Item {
        let texts = ["(3, 2)", "(-3, 2)", "(2, 3)", "(3, -2)"];
        Item {
            item_id: "itm-test".into(),
            skill_id: "quad.graph.vertex".into(),
            difficulty: Difficulty::Easy,
            stem: "For y = (x - 3)^2 + 2, what is the vertex?".into(),
            choices: ChoiceId::ALL
                .iter()
                .zip(texts)
                .map(|(id, text)| Choice {
                    id: *id,
                    text: text.into(),
                    error_tag: None,
                })
                .collect(),
            solution_choice_id: ChoiceId::A,
            solution_text: "(3, 2)".into(),
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn valid_item_passes() {
        assert_eq!(validate(&sample_item()), Ok(()));
    }

    #[test]
    fn empty_stem() {
        let mut item = sample_item();
        item.stem = "   ".into();
        assert_eq!(validate(&item), Err(StructuralError::EmptyStem));
    }

    #[test]
    fn wrong_choice_count() {
        let mut item = sample_item();
        item.choices.pop();
        assert_eq!(validate(&item), Err(StructuralError::WrongChoiceCount(3)));
    }

    #[test]
    fn duplicate_and_missing_ids() {
        let mut item = sample_item();
        item.choices[3].id = ChoiceId::C;
        assert_eq!(
            validate(&item),
            Err(StructuralError::DuplicateChoiceId("C".into()))
        );
    }

    #[test]
    fn duplicate_text_after_normalization() {
        let mut item = sample_item();
        item.choices[2].text = "  (-3, 2) ".into();
        assert_eq!(
            validate(&item),
            Err(StructuralError::DuplicateChoiceText {
                first: "B".into(),
                second: "C".into()
            })
        );
    }

    #[test]
    fn solution_text_mismatch() {
        let mut item = sample_item();
        item.solution_text = "(2, 3)".into();
        assert_eq!(
            validate(&item),
            Err(StructuralError::SolutionTextMismatch("A".into()))
        );
    }

    #[test]
    fn solution_text_compared_after_normalization() {
        let mut item = sample_item();
        item.solution_text = " （3, 2） ".into();
        assert_eq!(validate(&item), Ok(()));
    }
}
