use std::fmt;

use crate::token::Op;
use crate::types::Var;

/// Error type for parsing expressions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// Parentheses are not balanced.
    MismatchedParentheses,
    /// A character or residual token sequence that is neither an operator,
    /// a parenthesis, nor a single-letter variable.
    UnknownToken(String),
    /// The expression does not mention any variable.
    NoVariablesDetected,
    /// A binary operator with an empty side, or `NOT` with nothing after it.
    MissingOperand(Op),
    /// Groups are nested deeper than the configured limit.
    TooDeep(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MismatchedParentheses => write!(f, "Mismatched parentheses in expression"),
            ParseError::UnknownToken(text) => write!(f, "Unknown token: {}", text),
            ParseError::NoVariablesDetected => write!(f, "No variables detected in expression"),
            ParseError::MissingOperand(op) => write!(f, "Missing operand for {}", op),
            ParseError::TooDeep(limit) => write!(f, "Expression nested deeper than {} levels", limit),
        }
    }
}

impl std::error::Error for ParseError {}

/// Error type for evaluating expressions.
///
/// Evaluation only fails when the assignment does not cover the expression,
/// which means the caller built the assignment from the wrong variable set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EvalError {
    UndefinedVariable(Var),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable(var) => write!(f, "Undefined variable: {}", var),
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ParseError::MismatchedParentheses.to_string(),
            "Mismatched parentheses in expression"
        );
        assert_eq!(ParseError::UnknownToken("B2".to_string()).to_string(), "Unknown token: B2");
        assert_eq!(ParseError::MissingOperand(Op::Nand).to_string(), "Missing operand for NAND");
        assert_eq!(ParseError::TooDeep(4).to_string(), "Expression nested deeper than 4 levels");
        let x = Var::new('X').unwrap();
        assert_eq!(EvalError::UndefinedVariable(x).to_string(), "Undefined variable: X");
    }
}
