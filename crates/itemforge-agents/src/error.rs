//! Error types for the rule-based solvers.

use thiserror::Error;

/// Why a solver could not produce an answer for a stem.
///
/// Solvers never surface these to the harness; any failure means the
/// solver falls back to the seeded-random pick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No math expression could be located in the text.
    #[error("no expression found in {0:?}")]
    NoExpression(String),

    /// A character or token the grammar does not accept.
    #[error("unexpected token {token:?} at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// Input ended in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A variable other than `x`.
    #[error("unsupported variable {0:?}")]
    UnsupportedVariable(char),

    /// The expression is of degree three or more, or divides by `x`.
    #[error("expression is not a polynomial of degree at most two")]
    DegreeTooHigh,

    /// Exponents must be small non-negative integers.
    #[error("unsupported exponent {0}")]
    BadExponent(String),

    /// More than one `=` sign.
    #[error("expected at most one '=' but found {0}")]
    TooManyEquals(usize),

    /// An equation where neither side is `y` or `f(x)`.
    #[error("expected a function definition like `y = ...`")]
    NotAFunction,

    /// The leading coefficient vanished.
    #[error("not a quadratic (leading coefficient is zero)")]
    NotQuadratic,

    /// Division by zero while folding constants.
    #[error("division by zero")]
    DivisionByZero,

    /// No integer factor pair exists for the reduced quadratic.
    #[error("no integer factorization of {0}")]
    NoIntegerFactors(String),
}
