use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use smell_prep_core::{PrepError, RunLog, label_categories, resolve_class, sanitize_java_source};
use tracing_subscriber::EnvFilter;

mod args;
mod json;
mod path;
mod text;

use args::{Command, Invocation, ParsedArgs, parse_args, print_help};
use json::{JsonResolution, JsonSanitized, map_labels, map_sample, write_json};
use text::{format_label_stats, format_labels, format_resolution, format_sample, format_sample_stats};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(Invocation::Run(parsed)) => parsed,
        Ok(Invocation::Help) => {
            print_help();
            return;
        }
        Ok(Invocation::Version) => {
            println!("smell-prep {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            std::process::exit(2);
        }
    };

    init_tracing();

    match run(&parsed) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn open_run_log(parsed: &ParsedArgs) -> Result<RunLog, PrepError> {
    if !parsed.command.writes_run_log() {
        return Ok(RunLog::in_memory());
    }
    RunLog::create(&parsed.log).map_err(|source| PrepError::FileWriteFailure {
        path: parsed.log.clone(),
        source,
    })
}

fn strict_exit(parsed: &ParsedArgs, failures: u64) -> i32 {
    if parsed.strict && failures > 0 { 1 } else { 0 }
}

fn run(parsed: &ParsedArgs) -> Result<i32, PrepError> {
    let mut log = open_run_log(parsed)?;

    match &parsed.command {
        Command::Resolve {
            project,
            package,
            qualified_name,
        } => {
            let options = parsed.resolve_options()?;
            let resolution = resolve_class(
                &parsed.base_dir,
                project,
                package,
                qualified_name,
                &options,
                &mut log,
            );
            let report = JsonResolution::from(&resolution);
            if parsed.json {
                write_json(&report)?;
            } else {
                print!("{}", format_resolution(&report));
            }
            let failures = u64::from(resolution.path().is_none());
            Ok(strict_exit(parsed, failures))
        }
        Command::Sample { sheets } => {
            let options = parsed.sample_options()?;
            let outcome = smell_prep_core::sample_and_copy(
                sheets,
                &parsed.base_dir,
                &parsed.dest,
                &options,
                &mut log,
            )?;
            let report = map_sample(&parsed.dest, &outcome.result, &outcome.stats);
            if parsed.json {
                write_json(&report)?;
            } else {
                print!("{}", format_sample(&report));
                eprint!("{}", format_sample_stats(&outcome.stats));
            }
            Ok(strict_exit(parsed, outcome.stats.failures()))
        }
        Command::Sanitize { file } => {
            let source = fs::read_to_string(file).map_err(|source| PrepError::FileReadFailure {
                path: file.clone(),
                source,
            })?;
            let sanitized = sanitize_java_source(&source);
            if parsed.json {
                write_json(&JsonSanitized {
                    file: file.to_string_lossy().into_owned(),
                    source: sanitized,
                })?;
            } else {
                println!("{sanitized}");
            }
            Ok(0)
        }
        Command::Label { category_dirs } => {
            let dirs = category_dirs
                .iter()
                .map(|p| path::category_dir(p))
                .collect::<io::Result<Vec<PathBuf>>>()?;
            let outcome = label_categories(&dirs, &parsed.out, &parsed.label_options(), &mut log)?;
            let report = map_labels(&outcome.result, &outcome.stats);
            if parsed.json {
                write_json(&report)?;
            } else {
                print!("{}", format_labels(&report));
                eprint!("{}", format_label_stats(&outcome.stats));
            }
            Ok(strict_exit(parsed, outcome.stats.failures()))
        }
    }
}
