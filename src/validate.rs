use crate::error::ParseError;

/// Check that parentheses in `input` are balanced.
///
/// Fails if a `)` closes more than was opened at any point, or if anything is
/// left open at the end.
pub fn check_parentheses(input: &str) -> Result<(), ParseError> {
    let mut depth: usize = 0;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or(ParseError::MismatchedParentheses)?,
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(ParseError::MismatchedParentheses)
    }
}
