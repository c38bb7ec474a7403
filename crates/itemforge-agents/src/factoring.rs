//! Factoring solver: integer factor pairs.
//!
//! The equation is reduced by the gcd of its coefficients (with a positive
//! leading term). A monic result `x^2 + bx + c` is factored by finding
//! `p * q = c`, `p + q = b`; the roots are `-p` and `-q`. The pair comes
//! from the integer square root of `b^2 - 4c`, so the cost does not depend
//! on the size of `c`. Coefficients must be whole numbers below `1e15`
//! (see `Quadratic::integer_coefficients`); anything else is not factorable.

use itemforge_core::notation::format_integer_roots;
use itemforge_core::{Agent, AgentError, ChoiceId, Item};

use crate::baseline::answer_or_fallback;
use crate::error::SolveError;
use crate::parse::equation_from_stem;

#[derive(Debug, Clone, Copy, Default)]
pub struct FactoringSolver;

/// The integer roots of the equation in the stem.
pub fn solve(stem: &str) -> Result<String, SolveError> {
    let q = equation_from_stem(stem)?;
    let not_factorable =
        || SolveError::NoIntegerFactors(format!("{}x^2 + {}x + {}", q.a, q.b, q.c));
    let (a, b, c) = q.integer_coefficients().ok_or_else(not_factorable)?;

    let sign = if a < 0 { -1 } else { 1 };
    let g = gcd(a, gcd(b, c)) * sign;
    let (a, b, c) = (a / g, b / g, c / g);
    if a != 1 {
        return Err(not_factorable());
    }

    let (p, r) = factor_pair(b, c).ok_or_else(not_factorable)?;
    Ok(format_integer_roots(-p, -r))
}

/// Find `p <= q` with `p * q = product` and `p + q = sum`.
pub fn factor_pair(sum: i64, product: i64) -> Option<(i64, i64)> {
    let (sum, product) = (i128::from(sum), i128::from(product));
    let root = exact_sqrt(sum * sum - 4 * product)?;
    // sum^2 - 4 * product has the parity of sum, so both halves are whole.
    let p = i64::try_from((sum - root) / 2).ok()?;
    let q = i64::try_from((sum + root) / 2).ok()?;
    Some((p, q))
}

/// The square root of `n` when `n` is a perfect square.
fn exact_sqrt(n: i128) -> Option<i128> {
    if n < 0 {
        return None;
    }
    let mut r = (n as f64).sqrt() as i128;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    (r * r == n).then_some(r)
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Agent for FactoringSolver {
    fn name(&self) -> &str {
        "factoring"
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        Ok(answer_or_fallback(self.name(), item, solve(&item.stem)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monic() {
        assert_eq!(solve("Solve: x^2 - x - 6 = 0").unwrap(), "x = -2 or x = 3");
        assert_eq!(solve("Solve: x^2 - 6x + 9 = 0").unwrap(), "x = 3");
        assert_eq!(solve("Solve: x^2 + 5x = 0").unwrap(), "x = -5 or x = 0");
    }

    #[test]
    fn common_leading_factor() {
        assert_eq!(solve("Solve: 2x^2 - 2x - 12 = 0").unwrap(), "x = -2 or x = 3");
        assert_eq!(solve("Solve: -3x^2 + 3x + 18 = 0").unwrap(), "x = -2 or x = 3");
    }

    #[test]
    fn rearranged_equation() {
        assert_eq!(solve("Solve: x^2 = x + 6").unwrap(), "x = -2 or x = 3");
    }

    #[test]
    fn not_factorable() {
        assert!(matches!(
            solve("Solve: x^2 + x + 1 = 0"),
            Err(SolveError::NoIntegerFactors(_))
        ));
        assert!(matches!(
            solve("Solve: 2x^2 + 3x + 1 = 0"),
            Err(SolveError::NoIntegerFactors(_))
        ));
    }

    #[test]
    fn pairs() {
        assert_eq!(factor_pair(-1, -6), Some((-3, 2)));
        assert_eq!(factor_pair(0, 0), Some((0, 0)));
        assert_eq!(factor_pair(5, 0), Some((0, 5)));
        assert_eq!(factor_pair(-6, 9), Some((-3, -3)));
        assert_eq!(factor_pair(1, 1), None);
        assert_eq!(factor_pair(1, -3), None);
    }

    #[test]
    fn large_constant_is_fast() {
        // Neither has integer factors; both used to need a scan up to |c|.
        for stem in ["Solve: x^2 + x + 1000000007 = 0", "Solve: x^2 + x + 10000000019 = 0"] {
            assert!(matches!(solve(stem), Err(SolveError::NoIntegerFactors(_))));
        }
        assert_eq!(
            solve("Solve: x^2 - 20000000x + 99999999999999 = 0").unwrap(),
            "x = 9999999 or x = 10000001"
        );
    }

    #[test]
    fn exact_square_roots() {
        assert_eq!(exact_sqrt(0), Some(0));
        assert_eq!(exact_sqrt(49), Some(7));
        assert_eq!(exact_sqrt(50), None);
        assert_eq!(exact_sqrt(-4), None);
        let big = 999_999_999_999_999_i128;
        assert_eq!(exact_sqrt(big * big), Some(big));
        assert_eq!(exact_sqrt(big * big + 1), None);
    }
}
