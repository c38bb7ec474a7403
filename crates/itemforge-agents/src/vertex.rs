//! Vertex solver: `h = -b / 2a`, `k = f(h)`.

use itemforge_core::notation::format_point;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::baseline::answer_or_fallback;
use crate::error::SolveError;
use crate::parse::function_from_stem;

#[derive(Debug, Clone, Copy, Default)]
pub struct VertexSolver;

/// The vertex of the parabola defined in the stem, as `(h, k)`.
pub fn solve(stem: &str) -> Result<String, SolveError> {
    let q = function_from_stem(stem)?;
    let h = -q.b / (2.0 * q.a);
    Ok(format_point(h, q.eval(h)))
}

impl Agent for VertexSolver {
    fn name(&self) -> &str {
        "vertex"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(answer_or_fallback(self.name(), item, solve(&item.stem)))
    }
}
