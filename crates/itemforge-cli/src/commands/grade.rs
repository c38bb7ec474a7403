//! The `itemforge grade` command.

use anyhow::Result;

use itemforge_core::{generate, grade, Difficulty};

use super::EXIT_OK;

/// Regenerate the item from its coordinates and grade `choice` against it.
pub fn execute(skill: &str, difficulty: &str, seed: u64, choice: &str) -> Result<i32> {
    let difficulty: Difficulty = difficulty.parse().map_err(anyhow::Error::msg)?;
    let item = generate(skill, difficulty, seed)?;
    let result = grade(&item, choice)?;

    tracing::debug!(item = %item.item_id, correct = result.correct, "graded");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(EXIT_OK)
}
