//! Precedence-aware parser for gate expressions.
//!
//! The input is tokenized once, then split over the token slice.
//! Operators bind, from loosest to tightest:
//!
//! | Tier  | Operators           | Tree                                       |
//! |-------|---------------------|--------------------------------------------|
//! | loose | `OR`, `NOR`, `XOR`  | `Or(l, r)`, `Not(Or(l, r))`, `Xor(l, r)`   |
//! | tight | `AND`, `NAND`       | `And(l, r)`, `Not(And(l, r))`              |
//! | unary | `NOT`               | `Not(x)`                                   |
//!
//! A slice is cut at every operator of the loosest tier present outside of
//! any parentheses, and the pieces are folded from the left, so chains group
//! to the left: `A OR B OR C` is `Or(Or(A, B), C)`. This is the same tree as
//! repeatedly splitting at the *rightmost* such operator, but chains of any
//! length are handled in a loop.
//!
//! Which operators take part in a cut when several operators of one tier
//! are mixed is controlled by [`TieBreak`]. Only nested groups recurse, and
//! [`ParserConfig::max_depth`] bounds how deep.

use log::debug;

use crate::ast::Expr;
use crate::error::ParseError;
use crate::token::{render, tokenize, Op, Token};
use crate::validate::check_parentheses;

type Combine = fn(Expr, Expr) -> Expr;

const LOOSE: [(Op, Combine); 3] = [(Op::Or, Expr::or), (Op::Nor, Expr::nor), (Op::Xor, Expr::xor)];
const TIGHT: [(Op, Combine); 2] = [(Op::And, Expr::and), (Op::Nand, Expr::nand)];

/// Default bound on the nesting of groups, see [`ParserConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How to choose the split points among operators of the same tier.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TieBreak {
    /// Cut at every top-level operator of the tier, whichever it is.
    /// Equivalently, split at the rightmost one.
    ///
    /// `A OR B XOR C` is `Xor(Or(A, B), C)`.
    #[default]
    Rightmost,
    /// Look for the tier's operators one at a time, in the fixed order
    /// `OR`, `NOR`, `XOR` (and `AND`, `NAND`), and cut only at the
    /// occurrences of the first one found.
    ///
    /// `A OR B XOR C` is `Or(A, Xor(B, C))`.
    OperatorOrder,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParserConfig {
    pub tie_break: TieBreak,
    /// How many levels of nested groups (parentheses, operands of `NOT`
    /// and of mixed-tier operators) the parser descends before giving up
    /// with [`ParseError::TooDeep`]. Flat chains do not count.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl Parser {
    /// Parse an expression into a tree.
    ///
    /// Keywords and variables are case-insensitive, so `a and b` and `A AND B`
    /// produce the same tree. Unknown tokens are reported as written.
    pub fn parse(&self, expression: &str) -> Result<Expr, ParseError> {
        let expression = expression.trim();
        debug!("parse(expression = {:?})", expression);

        check_parentheses(expression)?;

        let tokens = tokenize(expression);
        if let Some(text) = tokens.iter().find_map(|t| match t {
            Token::Unknown(text) => Some(text),
            _ => None,
        }) {
            return Err(ParseError::UnknownToken(text.clone()));
        }
        if !tokens.iter().any(|t| matches!(t, Token::Variable(_))) {
            return Err(ParseError::NoVariablesDetected);
        }

        self.parse_tokens(&tokens, 0)
    }

    fn parse_tokens(&self, tokens: &[Token], depth: usize) -> Result<Expr, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::TooDeep(self.config.max_depth));
        }
        let tokens = strip_enclosing(tokens);
        if tokens.is_empty() {
            return Err(ParseError::NoVariablesDetected);
        }

        for tier in [&LOOSE[..], &TIGHT[..]] {
            let cuts = self.find_cuts(tokens, tier);
            if !cuts.is_empty() {
                return self.fold_chain(tokens, &cuts, depth);
            }
        }

        let mut negations = 0;
        let mut operand = tokens;
        while let [Token::Operator(Op::Not), rest @ ..] = operand {
            negations += 1;
            operand = rest;
        }
        if negations > 0 {
            if strip_enclosing(operand).is_empty() {
                return Err(ParseError::MissingOperand(Op::Not));
            }
            let inner = self.parse_tokens(operand, depth + 1)?;
            return Ok((0..negations).fold(inner, |expr, _| Expr::not(expr)));
        }

        match tokens {
            [Token::Variable(var)] => Ok(Expr::var(*var)),
            _ => Err(ParseError::UnknownToken(render(tokens))),
        }
    }

    /// Parse the pieces between `cuts` and fold them from the left.
    fn fold_chain(&self, tokens: &[Token], cuts: &[(usize, Op, Combine)], depth: usize) -> Result<Expr, ParseError> {
        debug!("split `{}` into {} operands", render(tokens), cuts.len() + 1);

        let (first, op, _) = cuts[0];
        let mut acc = self.parse_operand(op, &tokens[..first], depth)?;
        for (k, &(index, op, combine)) in cuts.iter().enumerate() {
            let end = cuts.get(k + 1).map_or(tokens.len(), |&(next, _, _)| next);
            let rhs = self.parse_operand(op, &tokens[index + 1..end], depth)?;
            acc = combine(acc, rhs);
        }
        Ok(acc)
    }

    fn parse_operand(&self, op: Op, tokens: &[Token], depth: usize) -> Result<Expr, ParseError> {
        if strip_enclosing(tokens).is_empty() {
            return Err(ParseError::MissingOperand(op));
        }
        self.parse_tokens(tokens, depth + 1)
    }

    fn find_cuts(&self, tokens: &[Token], tier: &[(Op, Combine)]) -> Vec<(usize, Op, Combine)> {
        match self.config.tie_break {
            TieBreak::Rightmost => top_level(tokens, |op| tier.iter().find(|(o, _)| *o == op)),
            TieBreak::OperatorOrder => tier
                .iter()
                .map(|entry| top_level(tokens, |op| (op == entry.0).then_some(entry)))
                .find(|cuts| !cuts.is_empty())
                .unwrap_or_default(),
        }
    }
}

/// Positions of the operators outside of parentheses accepted by `select`, left to right.
///
/// `tokens` must have balanced parentheses.
fn top_level<'a>(tokens: &[Token], select: impl Fn(Op) -> Option<&'a (Op, Combine)>) -> Vec<(usize, Op, Combine)> {
    let mut depth: usize = 0;
    let mut cuts = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => depth = depth.saturating_sub(1),
            Token::Operator(op) if depth == 0 => {
                if let Some(&(op, combine)) = select(*op) {
                    cuts.push((i, op, combine));
                }
            }
            _ => {}
        }
    }
    cuts
}

/// Remove parentheses wrapping the whole slice, as many layers as there are.
///
/// `(A) AND (B)` is left alone: its first `(` closes before the end.
fn strip_enclosing(mut tokens: &[Token]) -> &[Token] {
    while let [Token::LeftParen, inner @ .., Token::RightParen] = tokens {
        let mut depth: usize = 0;
        let encloses = inner.iter().all(|token| {
            match token {
                Token::LeftParen => depth += 1,
                Token::RightParen => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            true
        });
        if !encloses {
            break;
        }
        tokens = inner;
    }
    tokens
}

/// Parse `expression` with the default configuration.
pub fn parse(expression: &str) -> Result<Expr, ParseError> {
    Parser::default().parse(expression)
}
