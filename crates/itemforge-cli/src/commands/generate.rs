//! The `itemforge generate` command.

use anyhow::Result;

use itemforge_core::generator::CycleSession;
use itemforge_core::{generate, Difficulty, Item};

use super::EXIT_OK;

pub fn execute(skill: &str, difficulty: &str, seed: u64, count: usize, cycle: bool) -> Result<i32> {
    anyhow::ensure!(count >= 1, "count must be at least 1");
    let difficulty: Difficulty = difficulty.parse().map_err(anyhow::Error::msg)?;

    let mut session = CycleSession::new();
    let mut items = Vec::with_capacity(count);
    for offset in 0..count as u64 {
        let seed = seed.wrapping_add(offset);
        let item = if cycle {
            let draw = session.draw(skill, difficulty, seed)?;
            if draw.pool_exhausted {
                tracing::info!(skill, %difficulty, "curated pool exhausted, starting a new cycle");
            }
            draw.item
        } else {
            generate(skill, difficulty, seed)?
        };
        items.push(item);
    }

    print_items(&items)?;
    Ok(EXIT_OK)
}

/// One item prints as pretty JSON, several as JSONL.
fn print_items(items: &[Item]) -> Result<()> {
    if let [item] = items {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        for item in items {
            println!("{}", serde_json::to_string(item)?);
        }
    }
    Ok(())
}
