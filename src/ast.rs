//! Expression trees.
//!
//! The parser reduces the six gate operators to four node kinds:
//! `NAND` becomes `Not(And(..))` and `NOR` becomes `Not(Or(..))`.
//! Every node owns its children, so trees are acyclic and immutable
//! once built.
//!
//! A chain of `n` operators is a tree of depth `n`, so traversals here use
//! an explicit stack instead of recursion. That includes dropping a tree.

use std::fmt;
use std::mem;

use crate::types::{Var, VarSet};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr {
    Var(Var),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
}

// Constructors
impl Expr {
    pub fn var(var: Var) -> Self {
        Expr::Var(var)
    }

    pub fn not(inner: Self) -> Self {
        Expr::Not(Box::new(inner))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::Xor(Box::new(lhs), Box::new(rhs))
    }

    pub fn nand(lhs: Self, rhs: Self) -> Self {
        Expr::not(Expr::and(lhs, rhs))
    }

    pub fn nor(lhs: Self, rhs: Self) -> Self {
        Expr::not(Expr::or(lhs, rhs))
    }
}

// Queries
impl Expr {
    /// Collect all variables mentioned in the tree.
    pub fn variables(&self) -> VarSet {
        let mut vars = VarSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Var(var) => {
                    vars.insert(*var);
                }
                Expr::Not(inner) => stack.push(inner),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) | Expr::Xor(lhs, rhs) => {
                    stack.push(lhs);
                    stack.push(rhs);
                }
            }
        }
        vars
    }
}

/// Sorted set of variables mentioned in `expr`.
pub fn variables_of(expr: &Expr) -> VarSet {
    expr.variables()
}

/// Fully parenthesized infix form, re-parsable into the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Expr(&'a Expr),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Expr(self)];
        while let Some(piece) = stack.pop() {
            let (lhs, op, rhs) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Expr(Expr::Var(var)) => {
                    write!(f, "{}", var)?;
                    continue;
                }
                Piece::Expr(Expr::Not(inner)) => {
                    f.write_str("NOT ")?;
                    stack.push(Piece::Expr(inner));
                    continue;
                }
                Piece::Expr(Expr::And(lhs, rhs)) => (lhs, " AND ", rhs),
                Piece::Expr(Expr::Or(lhs, rhs)) => (lhs, " OR ", rhs),
                Piece::Expr(Expr::Xor(lhs, rhs)) => (lhs, " XOR ", rhs),
            };
            f.write_str("(")?;
            stack.push(Piece::Text(")"));
            stack.push(Piece::Expr(rhs));
            stack.push(Piece::Text(op));
            stack.push(Piece::Expr(lhs));
        }
        Ok(())
    }
}

impl Expr {
    /// Move the non-leaf children out into `stack`, leaving leaves behind.
    fn detach_children(&mut self, stack: &mut Vec<Expr>) {
        let mut detach = |child: &mut Box<Expr>| {
            if !matches!(**child, Expr::Var(_)) {
                stack.push(mem::replace(&mut **child, Expr::Var(Var::FIRST)));
            }
        };
        match self {
            Expr::Var(_) => {}
            Expr::Not(inner) => detach(inner),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) | Expr::Xor(lhs, rhs) => {
                detach(lhs);
                detach(rhs);
            }
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut expr) = stack.pop() {
            expr.detach_children(&mut stack);
        }
    }
}
