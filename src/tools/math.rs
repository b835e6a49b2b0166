//! Math expression evaluation.

use anyhow::Context;

pub fn solve_math(expression: &str) -> anyhow::Result<String> {
    let expression = expression.trim();
    let result = meval::eval_str(expression)
        .with_context(|| format!("couldn't evaluate '{expression}'"))?;
    Ok(format!("Result: {result}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(solve_math("2 + 2 * 3").expect("should evaluate"), "Result: 8");
    }

    #[test]
    fn evaluates_functions() {
        assert_eq!(solve_math("sqrt(16)").expect("should evaluate"), "Result: 4");
    }

    #[test]
    fn rejects_garbage() {
        assert!(solve_math("2 +* )").is_err());
    }
}
