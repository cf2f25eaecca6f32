use std::collections::BTreeMap;
use std::fmt;

use crate::ast::Expr;
use crate::error::EvalError;
use crate::types::{Var, VarSet};

/// Values of variables.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Assignment {
    values: BTreeMap<Var, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignment number `index` over `vars`, in binary counting order.
    ///
    /// The first (smallest) variable is the most significant bit: variable `i`
    /// of `n` gets bit `(index >> (n - 1 - i)) & 1`.
    pub fn from_index(vars: &VarSet, index: u64) -> Self {
        let n = vars.len();
        vars.iter()
            .enumerate()
            .map(|(i, var)| (var, (index >> (n - 1 - i)) & 1 == 1))
            .collect()
    }

    /// Set the value of `var`, returning the previous one.
    pub fn set(&mut self, var: Var, value: bool) -> Option<bool> {
        self.values.insert(var, value)
    }

    pub fn get(&self, var: Var) -> Option<bool> {
        self.values.get(&var).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(variable, value)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        self.values.iter().map(|(&var, &value)| (var, value))
    }
}

impl FromIterator<(Var, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Var, bool)>>(iter: I) -> Self {
        Assignment {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (var, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", var, value as u8)?;
        }
        Ok(())
    }
}

pub trait Eval {
    fn eval(&self, assignment: &Assignment) -> Result<bool, EvalError>;
}

impl Eval for Var {
    fn eval(&self, assignment: &Assignment) -> Result<bool, EvalError> {
        assignment.get(*self).ok_or(EvalError::UndefinedVariable(*self))
    }
}

impl Eval for Expr {
    // Post-order walk with an explicit stack, left operand first. Both sides
    // are always evaluated, so an incomplete assignment is reported
    // regardless of the values involved.
    fn eval(&self, assignment: &Assignment) -> Result<bool, EvalError> {
        enum Step<'a> {
            Visit(&'a Expr),
            Negate,
            Combine(fn(bool, bool) -> bool),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<bool> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expr::Var(var)) => values.push(var.eval(assignment)?),
                Step::Visit(Expr::Not(inner)) => {
                    steps.push(Step::Negate);
                    steps.push(Step::Visit(inner));
                }
                Step::Visit(Expr::And(lhs, rhs)) => {
                    steps.extend([Step::Combine(|l, r| l && r), Step::Visit(rhs), Step::Visit(lhs)]);
                }
                Step::Visit(Expr::Or(lhs, rhs)) => {
                    steps.extend([Step::Combine(|l, r| l || r), Step::Visit(rhs), Step::Visit(lhs)]);
                }
                Step::Visit(Expr::Xor(lhs, rhs)) => {
                    steps.extend([Step::Combine(|l, r| l != r), Step::Visit(rhs), Step::Visit(lhs)]);
                }
                Step::Negate => {
                    if let Some(value) = values.last_mut() {
                        *value = !*value;
                    }
                }
                Step::Combine(combine) => {
                    if let (Some(rhs), Some(lhs)) = (values.pop(), values.last_mut()) {
                        *lhs = combine(*lhs, rhs);
                    }
                }
            }
        }
        // Exactly the root's value is left.
        Ok(values.pop() == Some(true))
    }
}

/// Evaluate `expr` under `assignment`.
pub fn evaluate(expr: &Expr, assignment: &Assignment) -> Result<bool, EvalError> {
    expr.eval(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parser::parse;

    fn v(name: char) -> Var {
        Var::new(name).unwrap()
    }

    fn assign(pairs: &[(char, bool)]) -> Assignment {
        pairs.iter().map(|&(name, value)| (v(name), value)).collect()
    }

    #[test]
    fn test_eval_var() {
        let a = assign(&[('A', true), ('B', false)]);
        assert_eq!(v('A').eval(&a), Ok(true));
        assert_eq!(v('B').eval(&a), Ok(false));
    }

    #[test]
    fn test_eval_gates() {
        let cases = [
            ("A AND B", [false, false, false, true]),
            ("A OR B", [false, true, true, true]),
            ("A XOR B", [false, true, true, false]),
            ("A NAND B", [true, true, true, false]),
            ("A NOR B", [true, false, false, false]),
        ];
        for (input, expected) in cases {
            let expr = parse(input).unwrap();
            for (k, &want) in expected.iter().enumerate() {
                let a = assign(&[('A', k & 2 != 0), ('B', k & 1 != 0)]);
                assert_eq!(evaluate(&expr, &a), Ok(want), "{} with {}", input, a);
            }
        }
    }

    #[test]
    fn test_eval_not() {
        let expr = parse("NOT A").unwrap();
        assert_eq!(evaluate(&expr, &assign(&[('A', true)])), Ok(false));
        assert_eq!(evaluate(&expr, &assign(&[('A', false)])), Ok(true));
    }

    #[test]
    fn test_eval_undefined_variable() {
        let expr = parse("A OR B").unwrap();
        // `A` alone decides OR, but the missing `B` is still reported.
        let a = assign(&[('A', true)]);
        assert_eq!(evaluate(&expr, &a), Err(EvalError::UndefinedVariable(v('B'))));
    }

    #[test]
    fn test_eval_left_operand_reported_first() {
        let expr = parse("(A AND NOT B) XOR (C OR D)").unwrap();
        let a = assign(&[('A', true), ('D', true)]);
        assert_eq!(evaluate(&expr, &a), Err(EvalError::UndefinedVariable(v('B'))));
    }

    #[test]
    fn test_eval_deep_chain() {
        let expr = parse(&vec!["A"; 50_000].join(" NAND ")).unwrap();
        // `((A NAND A) NAND A) ...` alternates with A = 1 and stays 1 with A = 0.
        let t = assign(&[('A', true)]);
        let f = assign(&[('A', false)]);
        assert_eq!(evaluate(&expr, &t), Ok(false));
        assert_eq!(evaluate(&expr, &f), Ok(true));
        let expr = parse(&vec!["A"; 50_001].join(" NAND ")).unwrap();
        assert_eq!(evaluate(&expr, &t), Ok(true));
        assert_eq!(evaluate(&expr, &f), Ok(true));
    }

    #[test]
    fn test_assignment_from_index() {
        let vars: VarSet = [v('A'), v('B'), v('C')].into_iter().collect();
        let a = Assignment::from_index(&vars, 0b110);
        assert_eq!(a.get(v('A')), Some(true));
        assert_eq!(a.get(v('B')), Some(true));
        assert_eq!(a.get(v('C')), Some(false));
        assert_eq!(a.to_string(), "A=1, B=1, C=0");
    }

    #[test]
    fn test_assignment_from_index_empty() {
        let a = Assignment::from_index(&VarSet::new(), 0);
        assert!(a.is_empty());
    }
}
