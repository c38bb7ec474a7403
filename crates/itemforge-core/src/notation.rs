//! Textual conventions for stems and answers.
//!
//! The generator renders every stem and choice through these functions, and
//! the rule-based solvers format their computed answers with the same ones so
//! that a correct solve matches the solution choice by normalized text.

/// Tolerance for treating a float as an integer.
const INTEGER_EPSILON: f64 = 1e-9;

/// Format a number: integers without a decimal point, otherwise up to two
/// decimals with trailing zeros trimmed.
pub fn format_number(x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() < INTEGER_EPSILON {
        // `-0` prints as "-0"; fold it.
        return format!("{}", rounded as i64);
    }
    let fixed = format_decimal(x);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Fixed two-decimal rendering with negative zero folded to `0.00`.
pub fn format_decimal(x: f64) -> String {
    let s = format!("{x:.2}");
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

/// Render `sum(coef * var)` with conventional signs: unit coefficients are
/// implicit, zero terms are dropped.
fn format_terms(terms: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for &(coef, var) in terms {
        if coef == 0 {
            continue;
        }
        let magnitude = coef.unsigned_abs();
        let body = if var.is_empty() {
            magnitude.to_string()
        } else if magnitude == 1 {
            var.to_string()
        } else {
            format!("{magnitude}{var}")
        };
        if out.is_empty() {
            if coef < 0 {
                out.push('-');
            }
        } else if coef < 0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        out.push_str(&body);
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// `ax^2 + bx + c`, e.g. `2x^2 - 3x + 1`.
pub fn format_quadratic(a: i64, b: i64, c: i64) -> String {
    format_terms(&[(a, "x^2"), (b, "x"), (c, "")])
}

/// `ax + b`, e.g. `3x - 5`.
pub fn format_linear(a: i64, b: i64) -> String {
    format_terms(&[(a, "x"), (b, "")])
}

/// Vertex form `a(x - h)^2 + k`, e.g. `(x - 3)^2 + 2` or `-2(x + 1)^2 - 5`.
pub fn format_vertex_form(a: i64, h: i64, k: i64) -> String {
    let prefix = match a {
        1 => String::new(),
        -1 => "-".to_string(),
        _ => a.to_string(),
    };
    let square = match h {
        0 => "x^2".to_string(),
        h if h > 0 => format!("(x - {h})^2"),
        h => format!("(x + {})^2", h.unsigned_abs()),
    };
    let mut out = format!("{prefix}{square}");
    if k > 0 {
        out.push_str(&format!(" + {k}"));
    } else if k < 0 {
        out.push_str(&format!(" - {}", k.unsigned_abs()));
    }
    out
}

/// A coordinate pair, e.g. `(3, -2)`.
pub fn format_point(x: f64, y: f64) -> String {
    format!("({}, {})", format_number(x), format_number(y))
}

/// Integer roots in ascending order; a double root is stated once.
pub fn format_integer_roots(r1: i64, r2: i64) -> String {
    let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
    if lo == hi {
        format!("x = {lo}")
    } else {
        format!("x = {lo} or x = {hi}")
    }
}

/// Real roots at two decimals in ascending order, or `no real solutions`.
pub fn format_real_roots(roots: &[f64]) -> String {
    if roots.is_empty() {
        return NO_REAL_SOLUTIONS.to_string();
    }
    let mut sorted = roots.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut rendered: Vec<String> = Vec::with_capacity(sorted.len());
    for root in sorted {
        let text = format_decimal(root);
        if !rendered.contains(&text) {
            rendered.push(text);
        }
    }
    rendered
        .iter()
        .map(|r| format!("x = {r}"))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Answer text used when the discriminant is negative.
pub const NO_REAL_SOLUTIONS: &str = "no real solutions";

/// `x = v` for a single value.
pub fn format_assignment(value: f64) -> String {
    format!("x = {}", format_number(value))
}
