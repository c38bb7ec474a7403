//! Error taxonomy for generation, validation, grading, and agents.
//!
//! Every variant here is case-local: the harness records it on the result row
//! for that case and moves on, so none of these ever abort a batch.

use thiserror::Error;

/// Errors raised while synthesizing an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The skill id is not in the catalog.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// The difficulty string does not name a known level.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// The skill exists but has no generator for this difficulty.
    #[error("skill '{skill_id}' has no generator for difficulty '{difficulty}'")]
    UnsupportedDifficulty { skill_id: String, difficulty: String },

    /// Distractor synthesis could not produce three unique wrong answers.
    #[error("could not synthesize unique distractors for '{skill_id}' after {attempts} attempts")]
    DistractorsExhausted { skill_id: String, attempts: u32 },

    /// Every regeneration attempt failed structural validation.
    #[error("item for '{skill_id}' failed validation after {attempts} attempts: {last_error}")]
    RetryCapExhausted {
        skill_id: String,
        attempts: u32,
        last_error: StructuralError,
    },

    /// Cycle mode was requested for a skill that is not curated.
    #[error("skill '{skill_id}' at '{difficulty}' has no curated pool")]
    NotCurated { skill_id: String, difficulty: String },
}

/// Structural invariant violations detected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("stem is empty")]
    EmptyStem,

    #[error("expected 4 choices, found {0}")]
    WrongChoiceCount(usize),

    #[error("choice id {0} appears more than once")]
    DuplicateChoiceId(String),

    #[error("choice id {0} is missing")]
    MissingChoiceId(String),

    #[error("choices {first} and {second} have the same normalized text")]
    DuplicateChoiceText { first: String, second: String },

    #[error("solution choice {0} is not among the choices")]
    SolutionNotAmongChoices(String),

    #[error("solution text does not match the text of choice {0}")]
    SolutionTextMismatch(String),
}

/// Errors raised by the grader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// The submitted id is not one of `A`, `B`, `C`, `D` (exact case).
    #[error("invalid choice id: {0:?}")]
    InvalidChoice(String),

    /// The item failed validation at grading time.
    #[error("item is structurally invalid: {0}")]
    Structural(#[from] StructuralError),
}

/// Errors raised while an agent selects an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The agent returned an id the item does not offer.
    #[error("agent '{agent}' returned illegal choice {choice}")]
    IllegalChoice { agent: String, choice: String },

    /// The agent's own logic failed.
    #[error("agent '{agent}' failed: {message}")]
    Internal { agent: String, message: String },

    /// No agent is registered under this name.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),
}

impl GenerationError {
    /// Returns `true` if retrying with a different seed cannot help.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            GenerationError::UnknownSkill(_)
                | GenerationError::UnknownDifficulty(_)
                | GenerationError::UnsupportedDifficulty { .. }
                | GenerationError::NotCurated { .. }
        )
    }
}
