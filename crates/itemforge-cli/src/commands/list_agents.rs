//! The `itemforge list-agents` command.

use anyhow::Result;

use itemforge_agents::available_agents;

use super::EXIT_OK;

pub fn execute() -> Result<i32> {
    println!("Available agents:");
    for agent in available_agents() {
        println!("  {:<14} {}", agent.name, agent.description);
    }
    println!("\n`fixed:<A-D>` always answers the given id.");
    Ok(EXIT_OK)
}
