//! Assay CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use assay_engine::LintConfig;
use assay_foundation::Error;
use assay_runtime::{
    EXIT_CLEAN, EXIT_ERROR, Repl, Report, Session, Summary, render_text, sources_for,
};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    paths: Vec<PathBuf>,
    no_redundant_message: bool,
    json: bool,
    catalog: bool,
    repl: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("\x1b[31mError: {message}\x1b[0m");
            eprintln!("Try 'assay --help' for more information.");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match run(&config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("\x1b[31mError: {}\x1b[0m", describe(&e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--no-redundant-message" => config.no_redundant_message = true,
            "--json" => config.json = true,
            "--catalog" => config.catalog = true,
            "--repl" => config.repl = true,
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("unknown option: {arg}"));
            }
            path => config.paths.push(PathBuf::from(path)),
        }
    }

    if !config.show_help
        && !config.show_version
        && !config.catalog
        && !config.repl
        && config.paths.is_empty()
    {
        return Err("no input paths given".to_string());
    }

    Ok(config)
}

fn run(config: &CliConfig) -> Result<u8, Error> {
    if config.show_help {
        print_help();
        return Ok(EXIT_CLEAN);
    }

    if config.show_version {
        println!("assay {}", env!("CARGO_PKG_VERSION"));
        return Ok(EXIT_CLEAN);
    }

    let lint = LintConfig::new().with_redundant_messages(!config.no_redundant_message);
    let session = Session::new(lint)?;

    if config.catalog {
        print!("{}", session.catalog());
        return Ok(EXIT_CLEAN);
    }

    let summary = analyze_paths(&session, config)?;

    if config.repl {
        let mut repl = Repl::new(session)?;
        if !config.paths.is_empty() {
            repl = repl.without_banner();
        }
        repl.run()?;
    }

    Ok(summary.exit_code())
}

/// Analyzes every source under the configured paths and prints the reports.
///
/// Missing paths and unreadable files are reported and counted, and the
/// remaining paths are still analyzed.
fn analyze_paths(session: &Session, config: &CliConfig) -> Result<Summary, Error> {
    let mut summary = Summary::new();
    for root in &config.paths {
        let sources = match sources_for(root) {
            Ok(sources) => sources,
            Err(e) => {
                eprintln!("\x1b[31mError: {}\x1b[0m", describe(&e));
                summary.record_error();
                continue;
            }
        };

        for path in sources {
            let outcomes = match session.analyze_file(&path) {
                Ok(outcomes) => outcomes,
                Err(e) => {
                    eprintln!("\x1b[31mError: {}\x1b[0m", describe(&e));
                    summary.record_error();
                    continue;
                }
            };

            for (i, outcome) in outcomes.iter().enumerate() {
                summary.record(outcome);
                if config.json {
                    println!("{}", Report::new(Some(&path), i + 1, outcome).to_json()?);
                } else if let Some(text) = render_text(Some(&path), i + 1, outcome) {
                    println!("{text}");
                }
            }
        }
    }
    Ok(summary)
}

/// Formats an error with its file location, if known.
fn describe(error: &Error) -> String {
    match &error.context {
        Some(context) => format!("{context}: {error}"),
        None => error.to_string(),
    }
}

fn print_help() {
    println!(
        "\x1b[1mAssay\x1b[0m - Normalizes minitest assertions into canonical idioms

\x1b[1mUSAGE:\x1b[0m
    assay [OPTIONS] [PATHS...]

\x1b[1mARGUMENTS:\x1b[0m
    [PATHS...]    Tree notation files, or directories walked for *.sexp files

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                Print help information
    -V, --version             Print version information
    --no-redundant-message    Do not flag redundant trailing message arguments
    --json                    Print one JSON report per expression
    --catalog                 Print the documented rewrites and exit
    --repl                    Start an interactive session after analyzing PATHS

\x1b[1mEXIT STATUS:\x1b[0m
    0    Nothing to suggest
    1    At least one expression has a suggestion
    2    Usage, read, parse, or analysis error

\x1b[1mEXAMPLES:\x1b[0m
    assay test/                      Analyze every .sexp file under test/
    assay --json trees.sexp          Machine-readable reports
    assay --catalog                  List every rewrite
    assay --repl                     Explore rules interactively"
    );
}
