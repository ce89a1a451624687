//! bindql-check CLI
//!
//! Command-line tool for checking annotated SQL statements.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser as _;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use bindql_core::{
    Descriptor, DescriptorError, DescriptorTable, Expression, Field, Parser, Statement,
};

/// Parse annotated SQL and check it against declared types.
#[derive(clap::Parser)]
#[command(name = "bindql-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Statement file (reads stdin when absent or `-`).
    file: Option<PathBuf>,

    /// Declared type, as `NAME` or `NAME:column,column`.
    ///
    /// When no type is declared only the syntax is checked.
    #[arg(
        short = 't',
        long = "type",
        value_name = "NAME[:COLUMNS]",
        value_parser = parse_type_decl
    )]
    types: Vec<Descriptor>,

    /// Declared types as one whitespace-separated list.
    #[arg(long = "types", value_name = "LIST", env = "BINDQL_TYPES")]
    type_list: Option<String>,

    /// Print the parsed statement as an indented tree.
    #[arg(long)]
    dump: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Parses `NAME` or `NAME:column,column` into a descriptor.
fn parse_type_decl(decl: &str) -> Result<Descriptor, DescriptorError> {
    let (name, columns) = decl.split_once(':').unwrap_or((decl, ""));
    let fields = columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(Field::new);
    Descriptor::new(name.trim(), fields)
}

/// Parses a whitespace-separated list of type declarations.
fn parse_type_list(list: &str) -> Result<Vec<Descriptor>, DescriptorError> {
    list.split_whitespace().map(parse_type_decl).collect()
}

impl Cli {
    /// Every declared type: `--type` values first, then the `--types` list.
    fn declared_types(&self) -> Result<Vec<Descriptor>, DescriptorError> {
        let mut types = self.types.clone();
        if let Some(list) = &self.type_list {
            types.extend(parse_type_list(list)?);
        }
        Ok(types)
    }
}

fn read_statement(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        _ => io::read_to_string(io::stdin()).context("cannot read standard input"),
    }
}

/// Writes `expr` and its descendants, one node per line.
fn dump(out: &mut impl Write, expr: &Expression, depth: usize) -> io::Result<()> {
    let indent = depth * 2;
    writeln!(
        out,
        "{:indent$}{} {:?} ({})",
        "",
        expr.kind().as_str(),
        expr.render(),
        expr.begin()
    )?;
    for child in expr.children() {
        dump(out, child, depth + 1)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let text = read_statement(cli.file.as_ref())?;
    debug!(bytes = text.len(), "read statement");

    let (root, errors) = Parser::new(&text).run();

    let mut stdout = io::stdout().lock();
    if cli.dump {
        dump(&mut stdout, &root, 0)?;
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("error: {error}");
        }
        bail!("statement has {} syntax error(s)", errors.len());
    }

    let types = cli.declared_types()?;
    if types.is_empty() {
        info!(
            annotations = root.type_mappings().len(),
            "syntax ok, no types declared"
        );
        writeln!(stdout, "{root}")?;
        return Ok(());
    }

    let table = DescriptorTable::from_descriptors(types)?;
    let stmt = Statement::bind(root, table)?;

    for mapping in stmt.outputs() {
        info!("output {mapping}");
    }
    for mapping in stmt.inputs() {
        info!("input {mapping}");
    }
    info!(
        types = %stmt.type_names().collect::<Vec<_>>().join(", "),
        "statement ok"
    );
    writeln!(stdout, "{}", stmt.sql())?;

    Ok(())
}
