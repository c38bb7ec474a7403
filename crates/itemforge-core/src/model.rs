//! Core data model types for itemforge.
//!
//! These are the fundamental types shared by the generator, grader, agents,
//! and harness: choice ids, difficulty levels, items, and eval cases.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four fixed choice symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChoiceId {
    A,
    B,
    C,
    D,
}

impl ChoiceId {
    /// All ids in display order.
    pub const ALL: [ChoiceId; 4] = [ChoiceId::A, ChoiceId::B, ChoiceId::C, ChoiceId::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceId::A => "A",
            ChoiceId::B => "B",
            ChoiceId::C => "C",
            ChoiceId::D => "D",
        }
    }

    /// Position of this id in [`ChoiceId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            ChoiceId::A => 0,
            ChoiceId::B => 1,
            ChoiceId::C => 2,
            ChoiceId::D => 3,
        }
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-case parse: `"a"` is not a valid id.
impl FromStr for ChoiceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoiceId::A),
            "B" => Ok(ChoiceId::B),
            "C" => Ok(ChoiceId::C),
            "D" => Ok(ChoiceId::D),
            other => Err(format!("invalid choice id: {other:?}")),
        }
    }
}

/// Difficulty levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    /// Display text, original case preserved.
    pub text: String,
    /// Mistake this distractor models; `None` on the solution choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_tag: Option<String>,
}

/// A generated four-choice question.
///
/// Items are immutable once generated; the grader and agents only borrow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier derived from (skill, difficulty, seed).
    pub item_id: String,
    pub skill_id: String,
    pub difficulty: Difficulty,
    pub stem: String,
    pub choices: Vec<Choice>,
    pub solution_choice_id: ChoiceId,
    pub solution_text: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Item {
    /// Look up a choice by id.
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// The choice marked as the solution, if present.
    pub fn solution_choice(&self) -> Option<&Choice> {
        self.choice(self.solution_choice_id)
    }
}

/// One line of the case source: which item to generate and grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCase {
    /// Unique identifier for this eval case.
    pub id: String,
    pub skill_id: String,
    /// Kept as text so an unknown level is a per-case failure, not a load failure.
    pub difficulty: String,
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_id_parse_is_exact_case() {
        assert_eq!("A".parse::<ChoiceId>().unwrap(), ChoiceId::A);
        assert_eq!("D".parse::<ChoiceId>().unwrap(), ChoiceId::D);
        assert!("a".parse::<ChoiceId>().is_err());
        assert!("E".parse::<ChoiceId>().is_err());
        assert!(" A".parse::<ChoiceId>().is_err());
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn eval_case_from_json_line() {
        let line = r#"{"id":"c1","skill_id":"quad.graph.vertex","difficulty":"easy","seed":42}"#;
        let case: EvalCase = serde_json::from_str(line).unwrap();
        assert_eq!(case.seed, 42);
        assert_eq!(case.difficulty, "easy");
    }

    #[test]
    fn choice_serializes_without_empty_tag() {
        let choice = Choice {
            id: ChoiceId::B,
            text: "(3, 2)".into(),
            error_tag: None,
        };
        let json = serde_json::to_string(&choice).unwrap();
        assert_eq!(json, r#"{"id":"B","text":"(3, 2)"}"#);
    }
}
