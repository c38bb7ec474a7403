//! Name-keyed agent registry.

use std::fmt;
use std::str::FromStr;

use itemforge_core::harness::{run_eval, EvalOutcome};
use itemforge_core::{Agent, AgentError, ChoiceId, EvalCase};

use crate::baseline::{FixedChoice, Oracle, SeededRandom};
use crate::discriminant::DiscriminantSolver;
use crate::factoring::FactoringSolver;
use crate::formula::FormulaSolver;
use crate::router::Router;
use crate::vertex::VertexSolver;

/// Every agent the registry can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Oracle,
    Fixed(ChoiceId),
    Random,
    Vertex,
    Factoring,
    Formula,
    Discriminant,
    Router,
}

impl AgentKind {
    /// One entry per listed name; `fixed:B`..`fixed:D` are accepted too.
    pub const LISTED: [AgentKind; 8] = [
        AgentKind::Oracle,
        AgentKind::Fixed(ChoiceId::A),
        AgentKind::Random,
        AgentKind::Vertex,
        AgentKind::Factoring,
        AgentKind::Formula,
        AgentKind::Discriminant,
        AgentKind::Router,
    ];

    pub fn name(&self) -> String {
        match self {
            AgentKind::Oracle => "oracle".into(),
            AgentKind::Fixed(ChoiceId::A) => "fixed".into(),
            AgentKind::Fixed(id) => format!("fixed:{id}"),
            AgentKind::Random => "random".into(),
            AgentKind::Vertex => "vertex".into(),
            AgentKind::Factoring => "factoring".into(),
            AgentKind::Formula => "formula".into(),
            AgentKind::Discriminant => "discriminant".into(),
            AgentKind::Router => "router".into(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AgentKind::Oracle => "Always picks the correct choice",
            AgentKind::Fixed(_) => "Always picks the same id (fixed = A, fixed:B, ...)",
            AgentKind::Random => "Uniform pick seeded by the item id",
            AgentKind::Vertex => "Parses y = f(x) and computes the vertex",
            AgentKind::Factoring => "Integer factor-pair search",
            AgentKind::Formula => "Quadratic formula with discriminant branch",
            AgentKind::Discriminant => "Computes b^2 - 4ac",
            AgentKind::Router => "Dispatches to the rule solver for the item's skill",
        }
    }

    pub fn build(&self) -> Box<dyn Agent> {
        match self {
            AgentKind::Oracle => Box::new(Oracle),
            AgentKind::Fixed(id) => Box::new(FixedChoice::new(*id)),
            AgentKind::Random => Box::new(SeededRandom),
            AgentKind::Vertex => Box::new(VertexSolver),
            AgentKind::Factoring => Box::new(FactoringSolver),
            AgentKind::Formula => Box::new(FormulaSolver),
            AgentKind::Discriminant => Box::new(DiscriminantSolver),
            AgentKind::Router => Box::new(Router),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for AgentKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || AgentError::UnknownAgent(s.to_string());
        match s.trim() {
            "oracle" => Ok(AgentKind::Oracle),
            "fixed" => Ok(AgentKind::Fixed(ChoiceId::A)),
            "random" => Ok(AgentKind::Random),
            "vertex" => Ok(AgentKind::Vertex),
            "factoring" => Ok(AgentKind::Factoring),
            "formula" => Ok(AgentKind::Formula),
            "discriminant" => Ok(AgentKind::Discriminant),
            "router" => Ok(AgentKind::Router),
            other => match other.strip_prefix("fixed:") {
                Some(id) => id.parse().map(AgentKind::Fixed).map_err(|_| unknown()),
                None => Err(unknown()),
            },
        }
    }
}

/// A registry entry for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
    pub description: &'static str,
}

/// Build an agent from its registry name.
pub fn create_agent(name: &str) -> Result<Box<dyn Agent>, AgentError> {
    let kind: AgentKind = name.parse()?;
    Ok(kind.build())
}

/// All registered agents.
pub fn available_agents() -> Vec<AgentInfo> {
    AgentKind::LISTED
        .iter()
        .map(|kind| AgentInfo {
            name: kind.name(),
            description: kind.description(),
        })
        .collect()
}

/// Resolve `agent_name` and run the cases sequentially.
pub fn run_named_eval(
    cases: &[EvalCase],
    agent_name: &str,
    min_accuracy: f64,
) -> Result<EvalOutcome, AgentError> {
    let agent = create_agent(agent_name)?;
    Ok(run_eval(cases, agent.as_ref(), min_accuracy))
}
