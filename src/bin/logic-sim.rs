use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use log::{debug, info, warn};

use logic_sim::ast::Expr;
use logic_sim::eval::{evaluate, Assignment};
use logic_sim::export::save_csv;
use logic_sim::parser::{Parser as ExprParser, ParserConfig, TieBreak, DEFAULT_MAX_DEPTH};
use logic_sim::store::{ExpressionStore, FileStore, DEFAULT_STORE_FILE};
use logic_sim::table::TruthTable;
use logic_sim::types::Var;

#[derive(Parser)]
#[command(name = "logic-sim")]
#[command(author, version, about = "Boolean expression evaluator and truth table generator")]
struct Cli {
    /// File remembering the last used expression
    #[arg(long, value_name = "FILE", default_value = DEFAULT_STORE_FILE, global = true)]
    store: PathBuf,

    /// Split mixed same-precedence operators in the fixed OR, NOR, XOR (AND, NAND) order
    #[arg(long, global = true)]
    legacy_precedence: bool,

    /// Maximum nesting of parenthesized groups and NOT operands
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the truth table of an expression
    Table {
        /// Expression, e.g. "(A AND B) OR (NOT C)"; defaults to the last used one
        expression: Option<String>,
    },

    /// Evaluate an expression for one assignment
    Eval {
        expression: String,
        /// Variable values as comma-separated pairs.
        /// Example: "A=1,B=0,C=1"
        assignment: String,
    },

    /// List the variables of an expression
    Vars { expression: Option<String> },

    /// Write the truth table of an expression as CSV
    Export {
        expression: Option<String>,
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Read expressions interactively and print their truth tables
    Repl,
}

struct App {
    parser: ExprParser,
    store: FileStore,
}

impl App {
    fn parse(&self, expression: &str) -> Result<Expr> {
        let expr = self.parser.parse(expression)?;
        debug!("Parsed {:?} as {}", expression, expr);
        Ok(expr)
    }

    /// The given expression, or the stored one.
    fn expression(&self, expression: Option<String>) -> String {
        expression.unwrap_or_else(|| {
            let expression = self.store.load_or_default();
            info!("Using last expression from {}: {}", self.store.path().display(), expression);
            expression
        })
    }

    fn remember(&self, expression: &str) {
        if let Err(e) = self.store.save(expression.trim()) {
            warn!("Could not save last expression to {}: {}", self.store.path().display(), e);
        }
    }

    fn table(&self, expression: &str) -> Result<TruthTable> {
        let expr = self.parse(expression)?;
        let table = TruthTable::from_expr(&expr).with_label(expression.trim());
        self.remember(expression);
        Ok(table)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let tie_break = if cli.legacy_precedence {
        TieBreak::OperatorOrder
    } else {
        TieBreak::Rightmost
    };
    let app = App {
        parser: ExprParser::with_config(
            ParserConfig::default()
                .with_tie_break(tie_break)
                .with_max_depth(cli.max_depth),
        ),
        store: FileStore::new(cli.store),
    };
    debug!("Parser configuration: {:?}", app.parser.config());

    match cli.command {
        Commands::Table { expression } => {
            let expression = app.expression(expression);
            let table = app.table(&expression)?;
            print!("{}", table);
        }

        Commands::Eval { expression, assignment } => {
            let expr = app.parse(&expression)?;
            let assignment = parse_assignment(&assignment)?;
            let output = evaluate(&expr, &assignment)?;
            app.remember(&expression);
            println!("{}", assignment);
            println!("Output = {}", output as u8);
        }

        Commands::Vars { expression } => {
            let expression = app.expression(expression);
            let vars = app.parse(&expression)?.variables();
            println!("Detected {} variable(s): {}", vars.len(), vars);
            app.remember(&expression);
        }

        Commands::Export { expression, output } => {
            let expression = app.expression(expression);
            let table = app.table(&expression)?;
            save_csv(&table, &output)?;
            println!("Exported {} rows to {}", table.len(), output.display());
        }

        Commands::Repl => repl(&app)?,
    }

    Ok(())
}

fn repl(app: &App) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("Digital Logic Simulator");
    println!("{}", "=".repeat(60));
    println!();
    println!("Enter a Boolean expression using:");
    println!("  - Variables: Single uppercase letters (A, B, C, ...)");
    println!("  - Gates: AND, OR, NOT, NAND, NOR, XOR");
    println!("  - Example: {}", app.store.load_or_default());
    println!();
    println!("Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter expression: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let expression = line?;
        let expression = expression.trim();

        if expression.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }
        if expression.is_empty() {
            println!("Please enter a valid expression.");
            continue;
        }

        match app.table(expression) {
            Ok(table) => {
                println!();
                println!("Truth Table:");
                println!("{}", "-".repeat(60));
                println!("{}", table);
            }
            Err(e) => println!("Error: {}\n", e),
        }
    }

    Ok(())
}

fn parse_assignment(text: &str) -> Result<Assignment> {
    let mut assignment = Assignment::new();

    for part in text.split(',').filter(|part| !part.trim().is_empty()) {
        let Some((name, value)) = part.split_once('=') else {
            return Err(eyre!("Invalid assignment format: {}", part));
        };

        let mut chars = name.trim().chars();
        let var = match (chars.next(), chars.next()) {
            (Some(c), None) => Var::new(c).ok_or_else(|| eyre!("Invalid variable name: {}", name.trim()))?,
            _ => bail!("Invalid variable name: {}", name.trim()),
        };

        let value = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => true,
            "0" | "false" => false,
            other => bail!("Invalid value for {}: {}", var, other),
        };

        if assignment.set(var, value).is_some() {
            bail!("Variable {} assigned twice", var);
        }
    }

    Ok(assignment)
}
