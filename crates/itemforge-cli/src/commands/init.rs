//! The `itemforge init` command.

use std::path::Path;

use anyhow::Result;

use super::EXIT_OK;

pub fn execute() -> Result<i32> {
    if Path::new("itemforge.toml").exists() {
        println!("itemforge.toml already exists, skipping.");
    } else {
        std::fs::write("itemforge.toml", SAMPLE_CONFIG)?;
        println!("Created itemforge.toml");
    }

    std::fs::create_dir_all("cases")?;
    let example_path = Path::new("cases/example.jsonl");
    if example_path.exists() {
        println!("cases/example.jsonl already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CASES)?;
        println!("Created cases/example.jsonl");
    }

    println!("\nNext steps:");
    println!("  1. Run: itemforge validate --cases cases/example.jsonl");
    println!("  2. Run: itemforge run --cases cases/example.jsonl --out results.jsonl");
    println!("  3. Try another agent: itemforge list-agents");

    Ok(EXIT_OK)
}

const SAMPLE_CONFIG: &str = r#"# itemforge configuration

default_agent = "oracle"
min_accuracy = 1.0
parallelism = 4
output_dir = "./itemforge-results"
"#;

const EXAMPLE_CASES: &str = r#"# one case per line: which item to generate and grade
{"id": "vertex-easy-1", "skill_id": "quad.graph.vertex", "difficulty": "easy", "seed": 1}
{"id": "vertex-hard-1", "skill_id": "quad.graph.vertex", "difficulty": "hard", "seed": 1}
{"id": "factoring-medium-2", "skill_id": "quad.solve.factoring", "difficulty": "medium", "seed": 2}
{"id": "formula-medium-3", "skill_id": "quad.solve.formula", "difficulty": "medium", "seed": 3}
{"id": "discriminant-easy-4", "skill_id": "quad.discriminant", "difficulty": "easy", "seed": 4}
{"id": "linear-easy-5", "skill_id": "arith.linear.solve", "difficulty": "easy", "seed": 5}
"#;
