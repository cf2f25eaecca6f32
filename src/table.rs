//! Truth tables.
//!
//! For `n` variables sorted lexicographically, row `k` assigns variable `i`
//! the bit `(k >> (n - 1 - i)) & 1`: plain binary counting with the first
//! variable as the most significant column.
//!
//! ```text
//!  A | B | Output
//! ---+---+-------
//!  0 | 0 |   .
//!  0 | 1 |   .
//!  1 | 0 |   .
//!  1 | 1 |   .
//! ```

use std::fmt;

use log::{debug, warn};

use crate::ast::Expr;
use crate::error::EvalError;
use crate::eval::{Assignment, Eval};
use crate::types::VarSet;

/// Tables above this many variables are still generated, but a warning is logged.
pub const LARGE_TABLE_VARS: usize = 20;

/// Lazy iterator over all assignments and the corresponding outputs.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    expr: &'a Expr,
    vars: VarSet,
    next: u64,
    end: u64,
}

impl<'a> Rows<'a> {
    /// `vars` must contain every variable of `expr`.
    fn new(expr: &'a Expr, vars: VarSet) -> Self {
        let end = if vars.is_empty() { 0 } else { 1u64 << vars.len() };
        if vars.len() > LARGE_TABLE_VARS {
            warn!("Truth table over {} variables has {} rows", vars.len(), end);
        }
        Rows {
            expr,
            vars,
            next: 0,
            end,
        }
    }

    pub fn variables(&self) -> &VarSet {
        &self.vars
    }
}

impl Iterator for Rows<'_> {
    type Item = (Assignment, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let assignment = Assignment::from_index(&self.vars, self.next);
        self.next += 1;
        // Totality was checked when the iterator was created.
        let output = self.expr.eval(&assignment).ok()?;
        Some((assignment, output))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

/// Enumerate all assignments of `variables` together with the value of `expr`.
///
/// Fails if `expr` mentions a variable outside of `variables`. With no
/// variables at all the iterator is empty.
pub fn enumerate_truth_table<'a>(expr: &'a Expr, variables: &VarSet) -> Result<Rows<'a>, EvalError> {
    if let Some(var) = expr.variables().first_missing_from(variables) {
        return Err(EvalError::UndefinedVariable(var));
    }
    Ok(Rows::new(expr, variables.clone()))
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Row {
    /// Input values, in the table's variable order.
    pub inputs: Vec<bool>,
    pub output: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TableStatus {
    Complete,
    /// There was nothing to enumerate; the table has no rows.
    NoVariables,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TruthTable {
    variables: VarSet,
    rows: Vec<Row>,
    label: String,
}

impl TruthTable {
    /// Evaluate `expr` over all assignments of `variables`.
    pub fn generate(expr: &Expr, variables: &VarSet) -> Result<Self, EvalError> {
        let rows = enumerate_truth_table(expr, variables)?;
        Ok(Self::collect(rows))
    }

    /// Evaluate `expr` over all assignments of its own variables.
    pub fn from_expr(expr: &Expr) -> Self {
        Self::collect(Rows::new(expr, expr.variables()))
    }

    fn collect(rows: Rows<'_>) -> Self {
        let variables = rows.variables().clone();
        let rows: Vec<Row> = rows
            .map(|(assignment, output)| Row {
                inputs: assignment.iter().map(|(_, value)| value).collect(),
                output,
            })
            .collect();
        debug!("Generated truth table over [{}] with {} rows", variables, rows.len());
        TruthTable {
            variables,
            rows,
            label: "Output".to_string(),
        }
    }

    /// Replace the header of the output column.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl TruthTable {
    pub fn variables(&self) -> &VarSet {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn status(&self) -> TableStatus {
        if self.variables.is_empty() {
            TableStatus::NoVariables
        } else {
            TableStatus::Complete
        }
    }

    /// Number of rows where the output is true.
    pub fn count_ones(&self) -> usize {
        self.rows.iter().filter(|row| row.output).count()
    }

    /// Output column, top to bottom.
    pub fn outputs(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.output).collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_width = 8;
        let out_width = (self.label.chars().count() + 2).max(10);

        let mut header: Vec<String> = self.variables.iter().map(|v| format!("{:^col_width$}", v.name())).collect();
        header.push(format!("{:^out_width$}", self.label));
        let header = header.join(" | ");
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.chars().count()))?;

        for row in &self.rows {
            let mut cells: Vec<String> = row
                .inputs
                .iter()
                .map(|&value| format!("{:^col_width$}", value as u8))
                .collect();
            cells.push(format!("{:^out_width$}", row.output as u8));
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parser::parse;
    use crate::types::Var;

    fn vars(names: &str) -> VarSet {
        names.chars().filter_map(Var::new).collect()
    }

    #[test]
    fn test_rows_count_and_order() {
        let expr = parse("A AND B AND C").unwrap();
        let rows: Vec<_> = enumerate_truth_table(&expr, &vars("ABC")).unwrap().collect();
        assert_eq!(rows.len(), 8);
        for (k, (assignment, output)) in rows.iter().enumerate() {
            let bits: Vec<bool> = assignment.iter().map(|(_, value)| value).collect();
            let expected: Vec<bool> = (0..3).map(|i| (k >> (2 - i)) & 1 == 1).collect();
            assert_eq!(bits, expected);
            assert_eq!(*output, k == 7);
        }
    }

    #[test]
    fn test_rows_exact_size() {
        let expr = parse("A XOR D").unwrap();
        let mut rows = enumerate_truth_table(&expr, &vars("AD")).unwrap();
        assert_eq!(rows.len(), 4);
        rows.next();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_rows_extra_variables() {
        let expr = parse("B").unwrap();
        let table = TruthTable::generate(&expr, &vars("AB")).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.outputs(), vec![false, true, false, true]);
    }

    #[test]
    fn test_rows_missing_variable() {
        let expr = parse("A OR C").unwrap();
        let result = enumerate_truth_table(&expr, &vars("AB"));
        assert!(matches!(result, Err(EvalError::UndefinedVariable(v)) if v.name() == 'C'));
    }

    #[test]
    fn test_no_variables() {
        let expr = parse("A").unwrap();
        let result = enumerate_truth_table(&expr, &VarSet::new());
        assert!(result.is_err());

        let table = TruthTable::collect(Rows::new(&expr, VarSet::new()));
        assert!(table.is_empty());
        assert_eq!(table.status(), TableStatus::NoVariables);
    }

    #[test]
    fn test_nand_table() {
        let table = TruthTable::from_expr(&parse("A NAND B").unwrap());
        assert_eq!(table.status(), TableStatus::Complete);
        assert_eq!(table.outputs(), vec![true, true, true, false]);
        assert_eq!(table.count_ones(), 3);
        assert_eq!(table.rows()[2].inputs, vec![true, false]);
    }

    #[test]
    fn test_display() {
        let table = TruthTable::from_expr(&parse("A XOR B").unwrap()).with_label("A XOR B");
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   A     |    B     |  A XOR B  ");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[1].len(), lines[0].len());
        assert_eq!(lines[3], "   0     |    1     |     1     ");
    }
}
