//! Discriminant solver: `b^2 - 4ac`.

use itemforge_core::algebra::discriminant;
use itemforge_core::notation::format_number;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::baseline::answer_or_fallback;
use crate::error::SolveError;
use crate::parse::equation_from_stem;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscriminantSolver;

pub fn solve(stem: &str) -> Result<String, SolveError> {
    let q = equation_from_stem(stem)?;
    // Moving every term to one side may flip all signs; b^2 - 4ac is unchanged.
    Ok(match q.integer_coefficients() {
        Some((a, b, c)) => integer_discriminant(a, b, c).to_string(),
        None => format_number(discriminant(q.a, q.b, q.c)),
    })
}

/// `b^2 - 4ac` in `i128`; coefficients below `1e15` cannot overflow it.
pub fn integer_discriminant(a: i64, b: i64, c: i64) -> i128 {
    let (a, b, c) = (i128::from(a), i128::from(b), i128::from(c));
    b * b - 4 * a * c
}

impl Agent for DiscriminantSolver {
    fn name(&self) -> &str {
        "discriminant"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(answer_or_fallback(self.name(), item, solve(&item.stem)))
    }
}
