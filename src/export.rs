//! Delimited-text export of truth tables.
//!
//! # Format
//!
//! ```text
//! A,B,Output
//! 0,0,1
//! 0,1,1
//! 1,0,1
//! 1,1,0
//! ```
//!
//! One header row with the variable names and `Output`, then one row per
//! assignment. Values are `0` and `1`, and every line ends with `\n`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::table::TruthTable;

pub const DELIMITER: char = ',';

/// Header line followed by one line per row, without line terminators.
fn lines(table: &TruthTable) -> impl Iterator<Item = String> + '_ {
    let mut header: Vec<String> = table.variables().iter().map(|var| var.to_string()).collect();
    header.push("Output".to_string());
    let header = header.join(&DELIMITER.to_string());

    let rows = table.rows().iter().map(|row| {
        let mut line = String::with_capacity(2 * (row.inputs.len() + 1));
        for &value in &row.inputs {
            line.push(if value { '1' } else { '0' });
            line.push(DELIMITER);
        }
        line.push(if row.output { '1' } else { '0' });
        line
    });

    std::iter::once(header).chain(rows)
}

/// Write `table` as CSV into `writer`.
pub fn write_csv<W: Write>(table: &TruthTable, mut writer: W) -> io::Result<()> {
    for line in lines(table) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Render `table` as a CSV string.
pub fn to_csv_string(table: &TruthTable) -> String {
    lines(table).map(|line| line + "\n").collect()
}

/// Save `table` as CSV into the file at `path`, replacing it.
pub fn save_csv<P: AsRef<Path>>(table: &TruthTable, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::parse;

    #[test]
    fn test_csv_nand() {
        let table = TruthTable::from_expr(&parse("A NAND B").unwrap());
        assert_eq!(to_csv_string(&table), "A,B,Output\n0,0,1\n0,1,1\n1,0,1\n1,1,0\n");
    }

    #[test]
    fn test_csv_ignores_label() {
        let table = TruthTable::from_expr(&parse("NOT Q").unwrap()).with_label("NOT Q");
        assert_eq!(to_csv_string(&table), "Q,Output\n0,1\n1,0\n");
    }

    #[test]
    fn test_write_csv_matches_string() {
        let table = TruthTable::from_expr(&parse("(A AND B) OR NOT C").unwrap());
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_csv_string(&table));
    }

    #[test]
    fn test_save_csv() {
        let path = std::env::temp_dir().join(format!("logic-sim-export-{}.csv", std::process::id()));
        let table = TruthTable::from_expr(&parse("A XOR B").unwrap());
        save_csv(&table, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(content, "A,B,Output\n0,0,0\n0,1,1\n1,0,1\n1,1,0\n");
    }
}
