//! Closed-form quadratic helpers shared by generation and solving.
//!
//! Both sides must perform the identical float operations so that rounded
//! answers agree to the last printed digit.

/// `b^2 - 4ac`.
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

/// Real roots of `ax^2 + bx + c = 0` via the quadratic formula.
///
/// Returns zero, one (double root), or two roots. `a` must be non-zero.
pub fn real_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    roots_with(b, discriminant(a, b, c), 2.0 * a)
}

/// Quadratic-formula roots for an explicit discriminant and denominator.
///
/// Exposed separately so miscalculation transforms (wrong discriminant,
/// wrong denominator) reuse the same arithmetic as the correct path.
pub fn roots_with(b: f64, disc: f64, denominator: f64) -> Vec<f64> {
    if disc < 0.0 || denominator == 0.0 {
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-b / denominator];
    }
    let root = disc.sqrt();
    vec![(-b - root) / denominator, (-b + root) / denominator]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminant_branches() {
        assert_eq!(discriminant(1.0, -1.0, -6.0), 25.0);
        assert_eq!(real_roots(1.0, -1.0, -6.0), vec![-2.0, 3.0]);
        assert_eq!(real_roots(1.0, -6.0, 9.0), vec![3.0]);
        assert!(real_roots(1.0, 0.0, 1.0).is_empty());
    }
}
