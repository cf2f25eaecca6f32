//! # logic-sim: Boolean expressions and truth tables
//!
//! **`logic-sim`** parses Boolean expressions written with single-letter
//! variables and the gate operators `AND`, `OR`, `NOT`, `NAND`, `NOR`, `XOR`,
//! evaluates them under variable assignments, and enumerates their truth tables.
//!
//! ## Grammar
//!
//! - **Variables** are single letters (`A`..`Z`, `a` is `A`). `AB` or `B2` are errors.
//! - **Operators** are matched case-insensitively on word boundaries.
//! - **Precedence**, loosest first: `OR`/`NOR`/`XOR`, then `AND`/`NAND`, then `NOT`.
//! - **Associativity**: left; `A OR B OR C` is `(A OR B) OR C`.
//! - **Nesting** of parenthesized groups is bounded by [`parser::ParserConfig::max_depth`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_sim::eval::{evaluate, Assignment};
//! use logic_sim::parser::parse;
//! use logic_sim::table::TruthTable;
//! use logic_sim::types::Var;
//!
//! let expr = parse("(A AND B) OR (NOT C)").unwrap();
//! assert_eq!(expr.variables().to_string(), "A, B, C");
//!
//! let a = Var::new('A').unwrap();
//! let b = Var::new('B').unwrap();
//! let c = Var::new('C').unwrap();
//! let assignment: Assignment = [(a, true), (b, true), (c, false)].into_iter().collect();
//! assert_eq!(evaluate(&expr, &assignment), Ok(true));
//!
//! let table = TruthTable::from_expr(&expr);
//! assert_eq!(table.len(), 8);
//! ```
//!
//! ## Core Components
//!
//! - **[`token`]** and **[`validate`]**: tokenizer and parenthesis check.
//! - **[`parser`]**: precedence-aware parser producing [`ast::Expr`] trees.
//! - **[`eval`]**: assignments and the evaluator.
//! - **[`table`]**: lazy and eager truth table generation.
//! - **[`export`]** and **[`store`]**: CSV output and last-expression storage for front ends.

pub mod ast;
pub mod error;
pub mod eval;
pub mod export;
pub mod parser;
pub mod store;
pub mod table;
pub mod token;
pub mod types;
pub mod validate;

pub use crate::ast::{variables_of, Expr};
pub use crate::error::{EvalError, ParseError};
pub use crate::eval::{evaluate, Assignment};
pub use crate::parser::parse;
pub use crate::table::{enumerate_truth_table, TruthTable};
