use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nova_highlight::{LexerState, LineState, TokenCategory};
use nova_highlight_cli::config::{init_tracing, HighlightConfig};
use nova_highlight_cli::report::{check_path, tokenize_file, CheckReport, FileReport};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nova-highlight",
    version,
    about = "Line-oriented Java tokenizer for syntax highlighting"
)]
struct Cli {
    /// TOML config file (defaults to `$NOVA_HIGHLIGHT_CONFIG` when set)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tokens of every line of a file
    Tokenize(TokenizeArgs),
    /// Tokenize a file or every matching file under a directory and report failures
    Check(CheckArgs),
    /// Print the token category table (number and display name)
    Categories(CategoriesArgs),
}

#[derive(Args)]
struct TokenizeArgs {
    /// File to tokenize
    file: PathBuf,
    /// Lexer state to start the first line in
    #[arg(long, default_value = "top_level")]
    state: LexerState,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// File or directory of fixtures
    path: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CategoriesArgs {
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = HighlightConfig::discover(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Command::Tokenize(args) => {
            let report = tokenize_file(
                &args.file,
                LineState::new(args.state),
                config.tokenize.on_error,
            )?;
            let exit = if report.errors.is_empty() { 0 } else { 1 };
            if args.json {
                print_json(&report)?;
            } else {
                print_file_report(&report);
            }
            Ok(exit)
        }
        Command::Check(args) => {
            let report = check_path(&args.path, &config.tokenize)?;
            let exit = if report.summary.failed > 0 { 1 } else { 0 };
            if args.json {
                print_json(&report)?;
            } else {
                print_check_report(&report);
            }
            Ok(exit)
        }
        Command::Categories(args) => {
            let table: Vec<CategoryRow> = TokenCategory::ALL
                .into_iter()
                .map(|category| CategoryRow {
                    id: category.to_raw(),
                    name: category.display_name(),
                })
                .collect();
            if args.json {
                print_json(&table)?;
            } else {
                for row in &table {
                    println!("{:>2} {}", row.id, row.name);
                }
            }
            Ok(0)
        }
    }
}

#[derive(Serialize)]
struct CategoryRow {
    id: u8,
    name: &'static str,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn print_file_report(report: &FileReport) {
    for line in &report.lines {
        for token in &line.tokens {
            println!("{}:{} {} {:?}", line.line, token.column, token.name, token.text);
        }
    }
    for e in &report.errors {
        println!("error:{}:{}: {}", e.line, e.column, e.message);
    }
    println!("state: {}", report.state);
}

fn print_check_report(report: &CheckReport) {
    for file in &report.files {
        if file.errors.is_empty() {
            println!("ok: {} ({} lines, {} tokens)", file.path.display(), file.lines, file.tokens);
        } else {
            for e in &file.errors {
                println!(
                    "{}:{}:{}: error: {}",
                    file.path.display(),
                    e.line,
                    e.column,
                    e.message
                );
            }
        }
    }
    println!(
        "summary: {} files, {} failed",
        report.summary.files, report.summary.failed
    );
}
