//! esfront: parse an ECMAScript file and print its ESTree JSON.
//!
//! Usage:
//!   esfront [--resolve] [--compact] [--log-json] [--tokens] <FILE|->

mod logging;
mod report;

use clap::Parser as ClapParser;
use esfront_estree::{parse_to_json, tokens_to_json, ParseOptions};
use serde_json::Value;
use std::io::Read;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "esfront", about = "esfront - ECMAScript parser and scope resolver", version)]
struct Cli {
    /// Script to parse, or `-` to read standard input.
    #[arg(value_name = "FILE")]
    file: String,

    /// Resolve scopes and emit `scopeContext` fields.
    #[arg(long)]
    resolve: bool,

    /// Print JSON on one line.
    #[arg(long)]
    compact: bool,

    /// Write logs as JSON lines.
    #[arg(long = "log-json")]
    log_json: bool,

    /// Print the token stream instead of the tree.
    #[arg(long)]
    tokens: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json);
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let source = match read_input(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", cli.file, err);
            return 1;
        }
    };
    let name = if cli.file == "-" { "<stdin>" } else { cli.file.as_str() };
    tracing::debug!(file = name, bytes = source.len(), "read input");

    if cli.tokens {
        let (tokens, errors) = tokens_to_json(&source);
        print_json(&tokens, cli.compact);
        if errors.is_empty() {
            return 0;
        }
        report::print_errors(name, &source, &errors);
        return 1;
    }

    match parse_to_json(&source, &ParseOptions { resolve: cli.resolve }) {
        Ok(program) => {
            print_json(&program, cli.compact);
            0
        }
        Err(errors) => {
            report::print_errors(name, &source, &errors);
            1
        }
    }
}

fn read_input(file: &str) -> std::io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(file)
    }
}

fn print_json(value: &Value, compact: bool) {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match text {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["esfront", "--resolve", "--compact", "app.js"]).expect("valid args");
        assert!(cli.resolve);
        assert!(cli.compact);
        assert!(!cli.tokens);
        assert_eq!(cli.file, "app.js");
    }

    #[test]
    fn test_stdin_dash() {
        let cli = Cli::try_parse_from(["esfront", "--tokens", "--log-json", "-"]).expect("valid args");
        assert_eq!(cli.file, "-");
        assert!(cli.tokens);
        assert!(cli.log_json);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["esfront", "--resolve"]).is_err());
    }
}
