//! Quadratic-formula solver, branching on the sign of the discriminant.

use itemforge_core::algebra::real_roots;
use itemforge_core::notation::format_real_roots;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::baseline::answer_or_fallback;
use crate::error::SolveError;
use crate::parse::equation_from_stem;

#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaSolver;

/// Real roots at two decimals, or `no real solutions`.
pub fn solve(stem: &str) -> Result<String, SolveError> {
    let q = equation_from_stem(stem)?;
    Ok(format_real_roots(&real_roots(q.a, q.b, q.c)))
}

impl Agent for FormulaSolver {
    fn name(&self) -> &str {
        "formula"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(answer_or_fallback(self.name(), item, solve(&item.stem)))
    }
}
