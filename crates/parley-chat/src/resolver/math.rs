use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use parley_core::{Evaluator, Query, ResolverResult};

use super::Resolver;
use crate::arith::format_number;
use crate::error::ResolveError;

pub const MATH_FAILED: &str = "Sorry, I could not calculate that expression.";

static EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\d.()\s+\-*/]*\d[\d.()\s+\-*/]*").expect("Invalid expression regex")
});

/// Same operand-operator-operand shape the classifier routes on.
static OPERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*\)*\s*[+\-*/]\s*\(*\s*\d+").expect("Invalid operation regex")
});

/// First run of arithmetic characters that holds an actual operation, trimmed.
///
/// Lone numbers ahead of the expression ("Room 12: 3 * 5") are skipped.
pub fn extract_expression(text: &str) -> Option<&str> {
    EXPRESSION_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|expr| OPERATION_RE.is_match(expr))
}

/// Evaluates the arithmetic embedded in a message.
pub struct MathResolver {
    evaluator: Arc<dyn Evaluator>,
}

impl MathResolver {
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        Self { evaluator }
    }
}

#[async_trait]
impl Resolver for MathResolver {
    fn name(&self) -> &'static str {
        "math"
    }

    async fn resolve(&self, query: &Query) -> Result<ResolverResult, ResolveError> {
        let Some(expression) = extract_expression(&query.text) else {
            return Ok(ResolverResult::declined(MATH_FAILED));
        };

        match self.evaluator.evaluate(expression) {
            Ok(value) => Ok(ResolverResult::answered(format!(
                "The result of {} is {}.",
                expression,
                format_number(value)
            ))),
            Err(e) => {
                tracing::debug!(expression = %expression, error = %e, "Evaluation failed");
                Ok(ResolverResult::declined(MATH_FAILED))
            }
        }
    }
}
