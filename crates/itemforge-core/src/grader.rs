//! Grading of submitted answers.
//!
//! `grade` is pure and idempotent: it validates the item, compares ids, and
//! builds feedback text from the picked distractor's error tag.

use serde::{Deserialize, Serialize};

use crate::error::GradeError;
use crate::model::{ChoiceId, Item};
use crate::validator::validate;

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub correct: bool,
    pub solution_choice_id: ChoiceId,
    pub explanation: String,
    /// Tag of the picked distractor, when the answer was wrong and tagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_tag: Option<String>,
}

/// Grade a raw choice id against an item. Ids are exact-case `A`..`D`.
pub fn grade(item: &Item, choice_id: &str) -> Result<GradeResult, GradeError> {
    let picked: ChoiceId = choice_id
        .parse()
        .map_err(|_| GradeError::InvalidChoice(choice_id.to_string()))?;
    grade_choice(item, picked)
}

/// Grade an already-typed choice id.
pub fn grade_choice(item: &Item, picked: ChoiceId) -> Result<GradeResult, GradeError> {
    validate(item)?;

    let solution_text = &item.solution_text;
    if picked == item.solution_choice_id {
        return Ok(GradeResult {
            correct: true,
            solution_choice_id: item.solution_choice_id,
            explanation: format!("Correct! The answer is {solution_text}."),
            error_tag: None,
        });
    }

    // validate() guarantees all four ids are present.
    let choice = item
        .choice(picked)
        .ok_or_else(|| GradeError::InvalidChoice(picked.to_string()))?;
    let error_tag = choice.error_tag.clone();
    let explanation = match error_tag.as_deref() {
        Some(tag) => format!(
            "Not quite. {} The correct answer is {solution_text}.",
            feedback_for(tag)
        ),
        None => format!("Incorrect. The correct answer is {solution_text}."),
    };

    Ok(GradeResult {
        correct: false,
        solution_choice_id: item.solution_choice_id,
        explanation,
        error_tag,
    })
}

/// Diagnostic hint for a distractor's error tag.
pub fn feedback_for(tag: &str) -> String {
    let hint = match tag {
        "sign_error" => "Check your signs: this answer has a sign flipped.",
        "partial_sign_error" => "One of the values has the wrong sign.",
        "off_by_one" => "Close, but this is off by a small amount; recheck your arithmetic.",
        "swapped_coordinates" => "The coordinates are swapped: write the vertex as (h, k).",
        "swapped_coefficients" => "Two coefficients were swapped; match a, b and c carefully.",
        "miscalculated_step" => "An intermediate step was miscalculated.",
        "missing_two_a" => "Remember the denominator of the quadratic formula is 2a, not a.",
        "discriminant_sign_error" => "The discriminant is b^2 - 4ac, not b^2 + 4ac.",
        "discriminant_misread" => {
            "Check the sign of the discriminant to decide whether real solutions exist."
        }
        "forgot_square" => "Square b before subtracting 4ac.",
        "forgot_division" => "Don't forget to divide by the leading coefficient.",
        other => return format!("This answer reflects a common mistake ({other})."),
    };
    hint.to_string()
}
