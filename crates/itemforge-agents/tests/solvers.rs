//! Solver accuracy over generated items.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use itemforge_agents::{create_agent, seeded_choice, FactoringSolver, Router, SeededRandom};
use itemforge_core::grader::grade_choice;
use itemforge_core::model::{Choice, ChoiceId, Difficulty, EvalCase, Item};
use itemforge_core::{generate, run_eval, Agent};

const QUADRATIC_SKILLS: [&str; 4] = [
    "quad.graph.vertex",
    "quad.solve.factoring",
    "quad.solve.formula",
    "quad.discriminant",
];

fn factoring_item() -> Item {
    let texts = [
        ("x = -3 or x = 2", Some("sign_error")),
        ("x = -2 or x = 3", None),
        ("x = 2 or x = 3", Some("partial_sign_error")),
        ("x = -2 or x = 4", Some("off_by_one")),
    ];
    Item {
        item_id: "itm-scenario-b".into(),
        skill_id: "quad.solve.factoring".into(),
        difficulty: Difficulty::Easy,
        stem: "Solve: x^2 - x - 6 = 0".into(),
        choices: ChoiceId::ALL
            .iter()
            .zip(texts)
            .map(|(id, (text, tag))| Choice {
                id: *id,
                text: text.into(),
                error_tag: tag.map(String::from),
            })
            .collect(),
        solution_choice_id: ChoiceId::B,
        solution_text: "x = -2 or x = 3".into(),
        tags: BTreeSet::new(),
    }
}

#[test]
fn factoring_solver_picks_matching_roots() {
    let item = factoring_item();
    let picked = FactoringSolver.choose(&item).unwrap();
    assert_eq!(picked, ChoiceId::B);
    assert!(grade_choice(&item, picked).unwrap().correct);
}

#[test]
fn each_solver_is_perfect_on_its_skill() {
    for (name, skill) in [
        ("vertex", "quad.graph.vertex"),
        ("factoring", "quad.solve.factoring"),
        ("formula", "quad.solve.formula"),
        ("discriminant", "quad.discriminant"),
    ] {
        let agent = create_agent(name).unwrap();
        for difficulty in Difficulty::ALL {
            for seed in 0..100 {
                let item = generate(skill, difficulty, seed).unwrap();
                let picked = agent.choose(&item).unwrap();
                assert_eq!(
                    picked, item.solution_choice_id,
                    "{name} missed {skill}/{difficulty}/{seed}: {}",
                    item.stem
                );
            }
        }
    }
}

#[test]
fn router_is_perfect_on_quadratic_skills() {
    let cases: Vec<EvalCase> = QUADRATIC_SKILLS
        .iter()
        .flat_map(|skill| {
            Difficulty::ALL.into_iter().flat_map(move |difficulty| {
                (0..25).map(move |seed| EvalCase {
                    id: format!("{skill}-{difficulty}-{seed}"),
                    skill_id: skill.to_string(),
                    difficulty: difficulty.to_string(),
                    seed,
                })
            })
        })
        .collect();

    let outcome = run_eval(&cases, &Router, 1.0);
    assert!(outcome.passed);
    assert_eq!(outcome.report.summary.ok, cases.len());
}

#[test]
fn unsolvable_stem_falls_back_to_seeded_random() {
    let mut item = factoring_item();
    item.stem = "Solve: x^2 + x + 1 = 0".into();
    let picked = FactoringSolver.choose(&item).unwrap();
    assert_eq!(picked, SeededRandom.choose(&item).unwrap());

    item.stem = "Pick the best answer.".into();
    let picked = FactoringSolver.choose(&item).unwrap();
    assert_eq!(picked, SeededRandom.choose(&item).unwrap());
}

#[test]
fn solvers_never_fail_on_other_skills() {
    for name in ["vertex", "factoring", "formula", "discriminant"] {
        let agent = create_agent(name).unwrap();
        for seed in 0..20 {
            let item = generate("arith.linear.solve", Difficulty::Medium, seed).unwrap();
            assert!(agent.choose(&item).is_ok());
        }
    }
}

/// An item whose choices match nothing a solver can compute.
fn opaque_item(skill_id: &str, stem: &str) -> Item {
    let mut item = factoring_item();
    item.item_id = format!("itm-{}", stem.len());
    item.skill_id = skill_id.into();
    item.stem = stem.into();
    for (choice, text) in item.choices.iter_mut().zip(["red", "green", "blue", "grey"]) {
        choice.text = text.into();
    }
    item.solution_text = "green".into();
    item
}

#[test]
fn extreme_stems_fall_back_quickly() {
    let stems = [
        ("quad.discriminant", "What is the discriminant of x^2 + 10000000000x + 1 = 0?"),
        ("quad.discriminant", "What is the discriminant of 999999999999999x^2 + 999999999999999x - 999999999999999 = 0?"),
        ("quad.solve.factoring", "Solve: x^2 + x + 1000000007 = 0"),
        ("quad.solve.factoring", "Solve: x^2 + x + 10000000019 = 0"),
        ("quad.solve.factoring", "Solve: 0.5x^2 + 1.25x - 0.3 = 0"),
        ("quad.solve.factoring", "Solve: x^2 + 99999999999999999999999999x + 1 = 0"),
        ("quad.solve.formula", "Solve: x^3 - 2x + 1 = 0"),
        ("quad.solve.formula", "Solve: 1e300x^2 + 1 = 0"),
        ("quad.graph.vertex", "For y = 100000000000000x^2 + 999999999999999x + 1, what is the vertex?"),
        ("quad.graph.vertex", "For y = x^3 + x, what is the vertex?"),
    ];

    for (skill_id, stem) in stems {
        let item = opaque_item(skill_id, stem);
        let expected = seeded_choice(&item.item_id);
        for name in ["vertex", "factoring", "formula", "discriminant", "router"] {
            let agent = create_agent(name).unwrap();
            let start = Instant::now();
            let picked = panic::catch_unwind(AssertUnwindSafe(|| agent.choose(&item)));
            let elapsed = start.elapsed();

            let picked = picked.unwrap_or_else(|_| panic!("{name} panicked on {stem:?}"));
            assert_eq!(picked.unwrap(), expected, "{name} on {stem:?}");
            assert!(elapsed < Duration::from_secs(1), "{name} took {elapsed:?} on {stem:?}");
        }
    }
}
