//! Tokenizer for infix gate expressions.
//!
//! Keywords are matched case-insensitively and longest-first, and only on word
//! boundaries, so `NOR` is never read as `NOT` followed by `R`, and `ANDY` is
//! not an `AND`. A variable is a single ASCII letter, in either case, that is
//! not followed by another alphanumeric character.

use std::fmt;

use crate::types::Var;

/// Gate operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Op {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
}

impl Op {
    /// All operators in keyword matching order (longest keywords first).
    pub const KEYWORDS: [Op; 6] = [Op::Nand, Op::Nor, Op::And, Op::Or, Op::Not, Op::Xor];

    /// Canonical (uppercase) keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Op::And => "AND",
            Op::Or => "OR",
            Op::Not => "NOT",
            Op::Nand => "NAND",
            Op::Nor => "NOR",
            Op::Xor => "XOR",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Token {
    Operator(Op),
    LeftParen,
    RightParen,
    Variable(Var),
    /// Offending input: a whole alphanumeric run (`B2`, `AB`) or a single other character.
    Unknown(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Variable(var) => write!(f, "{}", var),
            Token::Unknown(text) => write!(f, "{}", text),
        }
    }
}

fn is_boundary(chars: &[char], index: usize) -> bool {
    chars.get(index).map_or(true, |c| !c.is_alphanumeric())
}

/// Try to match an operator keyword at position `i`.
fn match_keyword(chars: &[char], i: usize) -> Option<Op> {
    Op::KEYWORDS.into_iter().find(|op| {
        let keyword = op.keyword();
        let end = i + keyword.len();
        end <= chars.len()
            && chars[i..end]
                .iter()
                .zip(keyword.chars())
                .all(|(c, k)| c.to_ascii_uppercase() == k)
            && (i == 0 || is_boundary(chars, i - 1))
            && is_boundary(chars, end)
    })
}

/// Split `input` into tokens.
///
/// Tokenization itself never fails: anything unrecognized becomes
/// [`Token::Unknown`], which the parser rejects.
pub fn tokenize(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(op) = match_keyword(&chars, i) {
            tokens.push(Token::Operator(op));
            i += op.keyword().len();
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::LeftParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RightParen);
                i += 1;
            }
            _ if c.is_ascii_alphabetic() && is_boundary(&chars, i + 1) => {
                // ASCII letters always make a valid variable.
                if let Some(var) = Var::new(c) {
                    tokens.push(Token::Variable(var));
                }
                i += 1;
            }
            _ if c.is_alphanumeric() => {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                tokens.push(Token::Unknown(chars[start..i].iter().collect()));
            }
            _ => {
                tokens.push(Token::Unknown(c.to_string()));
                i += 1;
            }
        }
    }

    tokens
}

/// Render a token sequence back into readable text.
///
/// Tokens are separated by single spaces, except right after `(` and right before `)`.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && tokens[i - 1] != Token::LeftParen && *token != Token::RightParen {
            out.push(' ');
        }
        out.push_str(&token.to_string());
    }
    out
}
