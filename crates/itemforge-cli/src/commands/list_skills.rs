//! The `itemforge list-skills` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use itemforge_core::skills::Skill;

use super::EXIT_OK;

pub fn execute() -> Result<i32> {
    let mut table = Table::new();
    table.set_header(vec!["Skill", "Family", "Title", "Difficulties"]);

    for skill in Skill::ALL {
        let difficulties: Vec<String> = skill
            .difficulties()
            .iter()
            .map(|d| format!("{d} ({})", skill.mode(*d)))
            .collect();
        table.add_row(vec![
            Cell::new(skill.id()),
            Cell::new(skill.family()),
            Cell::new(skill.title()),
            Cell::new(difficulties.join(", ")),
        ]);
    }

    println!("{table}");
    Ok(EXIT_OK)
}
