//! Routing agent: dispatch on the item's skill.

use itemforge_core::skills::Skill;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::baseline::SeededRandom;
use crate::discriminant::DiscriminantSolver;
use crate::factoring::FactoringSolver;
use crate::formula::FormulaSolver;
use crate::vertex::VertexSolver;

/// Sends each item to the rule solver for its skill; skills without a
/// solver get the seeded-random pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    /// The agent that handles `skill_id`.
    pub fn route(&self, skill_id: &str) -> &'static dyn Agent {
        match Skill::from_id(skill_id) {
            Some(Skill::Vertex) => &VertexSolver,
            Some(Skill::Factoring) => &FactoringSolver,
            Some(Skill::Formula) => &FormulaSolver,
            Some(Skill::Discriminant) => &DiscriminantSolver,
            Some(Skill::Linear) | None => &SeededRandom,
        }
    }
}

impl Agent for Router {
    fn name(&self) -> &str {
        "router"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        let target = self.route(&item.skill_id);
        tracing::debug!(item = %item.item_id, skill = %item.skill_id, to = target.name(), "routing");
        target.choose(item)
    }
}
