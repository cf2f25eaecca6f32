//! Variable names and ordered variable sets.
//!
//! Variables are single uppercase ASCII letters. A [`VarSet`] keeps them sorted
//! lexicographically, which fixes the column order of truth tables and the
//! enumeration order of assignments.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// A propositional variable, named by a single letter.
///
/// # Invariants
///
/// - The name is always an uppercase ASCII letter (`'A'..='Z'`)
/// - Ordering follows the alphabet
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u8);

impl Var {
    pub(crate) const FIRST: Var = Var(b'A');

    /// Creates a variable from its letter.
    ///
    /// Lowercase letters are accepted and stored uppercased.
    /// Returns `None` if `name` is not an ASCII letter.
    pub fn new(name: char) -> Option<Self> {
        if name.is_ascii_alphabetic() {
            Some(Var(name.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    /// Returns the letter naming this variable.
    pub fn name(self) -> char {
        self.0 as char
    }

    /// Returns the position of the letter in the alphabet (`A` is 0).
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.name()
    }
}

/// A sorted set of variables without duplicates.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct VarSet(BTreeSet<Var>);

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, returning `true` if it was not present yet.
    pub fn insert(&mut self, var: Var) -> bool {
        self.0.insert(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the variables in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = Var> + '_ {
        self.0.iter().copied()
    }

    /// Returns the column of `var` in a truth table over this set.
    pub fn position(&self, var: Var) -> Option<usize> {
        self.iter().position(|v| v == var)
    }

    /// Returns the first variable of `self` missing from `other`, if any.
    pub fn first_missing_from(&self, other: &VarSet) -> Option<Var> {
        self.0.difference(&other.0).next().copied()
    }

    pub fn to_vec(&self) -> Vec<Var> {
        self.iter().collect()
    }
}

impl FromIterator<Var> for VarSet {
    fn from_iter<I: IntoIterator<Item = Var>>(iter: I) -> Self {
        VarSet(iter.into_iter().collect())
    }
}

impl Extend<Var> for VarSet {
    fn extend<I: IntoIterator<Item = Var>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = &'a Var;
    type IntoIter = btree_set::Iter<'a, Var>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, var) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}
