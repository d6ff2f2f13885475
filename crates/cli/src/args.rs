use std::path::PathBuf;

use smell_prep_core::{
    DEFAULT_LOG_FILE, DEFAULT_MAX_FILES_PER_SMELL, DEFAULT_REFACTORED_SUFFIX, LabelOptions,
    ManualOverrides, ResolveOptions, SampleOptions,
};

const HELP_TEXT: &str = concat!(
    "smell-prep (code-smell dataset preparation)\n",
    "\n",
    "Usage:\n",
    "  smell-prep resolve  [options] <project> <package> <qualified-class>\n",
    "  smell-prep sample   [options] <sheets.json>\n",
    "  smell-prep sanitize <file.java>\n",
    "  smell-prep label    [options] <category-dir> [...]\n",
    "\n",
    "Options:\n",
    "  --base-dir <dir>        Root of the project corpus (default: Systems)\n",
    "  --dest <dir>            sample: copy target (default: selected_files)\n",
    "  --out <dir>             label: output root (default: sanitized_java)\n",
    "  --max-files <n>         sample: files per smell type (default: 20)\n",
    "  --seed <n>              Seed sampling / A-B labeling for reproducible runs\n",
    "  --overrides <file>      Extra class -> file overrides (JSON object)\n",
    "  --log <file>            Run log, truncated per run (default: log_errors.txt)\n",
    "  --suffix <s>            label: refactored sibling suffix (default: -r)\n",
    "  --json                  Output JSON\n",
    "  --strict                Exit non-zero if any item failed\n",
    "  -V, --version           Show version\n",
    "  -h, --help              Show help\n",
    "\n",
    "Notes:\n",
    "  - Diagnostics go to stderr; set RUST_LOG (e.g. RUST_LOG=debug) to tune them\n",
    "  - `label data/god-class` pairs data/god-class with data/god-class-r\n",
    "\n",
    "Examples:\n",
    "  smell-prep resolve --base-dir Systems antlr-2.7.2 org.antlr 'org.antlr.Tool$Sub'\n",
    "  smell-prep sample --base-dir Systems --dest selected_files sheets.json\n",
    "  smell-prep label --seed 7 data/god-class data/long-method\n",
    "\n"
);

pub(crate) const DEFAULT_BASE_DIR: &str = "Systems";
pub(crate) const DEFAULT_DEST_DIR: &str = "selected_files";
pub(crate) const DEFAULT_OUT_DIR: &str = "sanitized_java";

pub(crate) fn print_help() {
    print!("{HELP_TEXT}");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Resolve {
        project: String,
        package: String,
        qualified_name: String,
    },
    Sample {
        sheets: PathBuf,
    },
    Sanitize {
        file: PathBuf,
    },
    Label {
        category_dirs: Vec<PathBuf>,
    },
}

impl Command {
    /// Only commands that touch many items keep a run log.
    pub(crate) fn writes_run_log(&self) -> bool {
        !matches!(self, Self::Sanitize { .. })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedArgs {
    pub(crate) command: Command,
    pub(crate) json: bool,
    pub(crate) strict: bool,
    pub(crate) base_dir: PathBuf,
    pub(crate) dest: PathBuf,
    pub(crate) out: PathBuf,
    pub(crate) log: PathBuf,
    pub(crate) overrides: Option<PathBuf>,
    pub(crate) max_files: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) suffix: String,
}

/// What the process should do after looking at argv.
#[derive(Debug, Clone)]
pub(crate) enum Invocation {
    Run(Box<ParsedArgs>),
    Help,
    Version,
}

impl ParsedArgs {
    pub(crate) fn resolve_options(&self) -> smell_prep_core::Result<ResolveOptions> {
        let mut overrides = ManualOverrides::default();
        if let Some(path) = &self.overrides {
            overrides.merge_json_file(path)?;
        }
        Ok(ResolveOptions { overrides })
    }

    pub(crate) fn sample_options(&self) -> smell_prep_core::Result<SampleOptions> {
        Ok(SampleOptions {
            resolve: self.resolve_options()?,
            max_files: self.max_files,
            seed: self.seed,
        })
    }

    pub(crate) fn label_options(&self) -> LabelOptions {
        LabelOptions {
            refactored_suffix: self.suffix.clone(),
            seed: self.seed,
        }
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("{name} must be a non-negative integer"))
}

fn take_value<'a>(argv: &'a [String], i: usize, name: &str) -> Result<&'a str, String> {
    argv.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

pub(crate) fn parse_args(argv: &[String]) -> Result<Invocation, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut json = false;
    let mut strict = false;
    let mut base_dir: Option<PathBuf> = None;
    let mut dest: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;
    let mut log: Option<PathBuf> = None;
    let mut overrides: Option<PathBuf> = None;
    let mut max_files: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut suffix: Option<String> = None;

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        if arg == "--" {
            positional.extend(argv[(i + 1)..].iter().cloned());
            break;
        }
        if arg == "-h" || arg == "--help" {
            return Ok(Invocation::Help);
        }
        if arg == "-V" || arg == "--version" {
            return Ok(Invocation::Version);
        }
        if arg == "--json" {
            json = true;
            i += 1;
            continue;
        }
        if arg == "--strict" {
            strict = true;
            i += 1;
            continue;
        }
        if arg == "--base-dir" {
            base_dir = Some(PathBuf::from(take_value(argv, i, "--base-dir")?));
            i += 2;
            continue;
        }
        if arg == "--dest" {
            dest = Some(PathBuf::from(take_value(argv, i, "--dest")?));
            i += 2;
            continue;
        }
        if arg == "--out" {
            out = Some(PathBuf::from(take_value(argv, i, "--out")?));
            i += 2;
            continue;
        }
        if arg == "--log" {
            log = Some(PathBuf::from(take_value(argv, i, "--log")?));
            i += 2;
            continue;
        }
        if arg == "--overrides" {
            overrides = Some(PathBuf::from(take_value(argv, i, "--overrides")?));
            i += 2;
            continue;
        }
        if arg == "--max-files" {
            let raw = take_value(argv, i, "--max-files")?;
            let value = parse_u64("--max-files", raw)?;
            let value = usize::try_from(value)
                .map_err(|_| format!("--max-files must be <= {}", usize::MAX))?;
            max_files = Some(value);
            i += 2;
            continue;
        }
        if arg == "--seed" {
            let raw = take_value(argv, i, "--seed")?;
            seed = Some(parse_u64("--seed", raw)?);
            i += 2;
            continue;
        }
        if arg == "--suffix" {
            let raw = take_value(argv, i, "--suffix")?;
            if raw.is_empty() || raw.contains(['/', '\\']) {
                return Err("--suffix must be non-empty and contain no path separators".to_string());
            }
            suffix = Some(raw.to_string());
            i += 2;
            continue;
        }
        if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("Unknown option: {arg}"));
        }
        positional.push(arg.clone());
        i += 1;
    }

    let Some((name, rest)) = positional.split_first() else {
        return Err("missing command (resolve, sample, sanitize, label)".to_string());
    };

    let command = match name.as_str() {
        "resolve" => match rest {
            [project, package, qualified_name] => Command::Resolve {
                project: project.clone(),
                package: package.clone(),
                qualified_name: qualified_name.clone(),
            },
            _ => {
                return Err(
                    "resolve expects <project> <package> <qualified-class>".to_string()
                );
            }
        },
        "sample" => match rest {
            [sheets] => Command::Sample {
                sheets: PathBuf::from(sheets),
            },
            _ => return Err("sample expects exactly one <sheets.json>".to_string()),
        },
        "sanitize" => match rest {
            [file] => Command::Sanitize {
                file: PathBuf::from(file),
            },
            _ => return Err("sanitize expects exactly one <file.java>".to_string()),
        },
        "label" => {
            if rest.is_empty() {
                return Err("label expects at least one <category-dir>".to_string());
            }
            Command::Label {
                category_dirs: rest.iter().map(PathBuf::from).collect(),
            }
        }
        other => return Err(format!("Unknown command: {other}")),
    };

    Ok(Invocation::Run(Box::new(ParsedArgs {
        command,
        json,
        strict,
        base_dir: base_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR)),
        dest: dest.unwrap_or_else(|| PathBuf::from(DEFAULT_DEST_DIR)),
        out: out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
        log: log.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        overrides,
        max_files: max_files.unwrap_or(DEFAULT_MAX_FILES_PER_SMELL),
        seed,
        suffix: suffix.unwrap_or_else(|| DEFAULT_REFACTORED_SUFFIX.to_string()),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn run(args: &[&str]) -> ParsedArgs {
        match parse_args(&argv(args)) {
            Ok(Invocation::Run(parsed)) => *parsed,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn resolve_takes_three_positionals_and_defaults() {
        let parsed = run(&["resolve", "antlr-2.7.2", "org.antlr", "org.antlr.Tool$Sub"]);
        assert_eq!(
            parsed.command,
            Command::Resolve {
                project: "antlr-2.7.2".to_string(),
                package: "org.antlr".to_string(),
                qualified_name: "org.antlr.Tool$Sub".to_string(),
            }
        );
        assert_eq!(parsed.base_dir, PathBuf::from("Systems"));
        assert_eq!(parsed.log, PathBuf::from("log_errors.txt"));
        assert_eq!(parsed.max_files, 20);
        assert_eq!(parsed.suffix, "-r");
        assert!(parsed.seed.is_none());
        assert!(!parsed.strict);
    }

    #[test]
    fn options_may_follow_the_command() {
        let parsed = run(&[
            "sample",
            "sheets.json",
            "--max-files",
            "5",
            "--seed",
            "42",
            "--dest",
            "picked",
            "--json",
            "--strict",
        ]);
        assert_eq!(
            parsed.command,
            Command::Sample {
                sheets: PathBuf::from("sheets.json")
            }
        );
        assert_eq!(parsed.max_files, 5);
        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.dest, PathBuf::from("picked"));
        assert!(parsed.json);
        assert!(parsed.strict);
    }

    #[test]
    fn label_collects_every_directory() {
        let parsed = run(&["label", "--suffix", "_refactored", "a", "b"]);
        assert_eq!(
            parsed.command,
            Command::Label {
                category_dirs: vec![PathBuf::from("a"), PathBuf::from("b")]
            }
        );
        assert_eq!(parsed.label_options().refactored_suffix, "_refactored");
    }

    #[test]
    fn usage_errors_are_reported() {
        for (args, needle) in [
            (vec![], "missing command"),
            (vec!["frobnicate"], "Unknown command"),
            (vec!["resolve", "a", "b"], "resolve expects"),
            (vec!["label"], "at least one"),
            (vec!["sample", "s.json", "--seed", "-1"], "--seed"),
            (vec!["sample", "s.json", "--max-files"], "requires a value"),
            (vec!["label", "a", "--suffix", "x/y"], "--suffix"),
            (vec!["sample", "--bogus", "s.json"], "Unknown option: --bogus"),
        ] {
            let err = parse_args(&argv(&args)).unwrap_err();
            assert!(err.contains(needle), "{args:?}: {err}");
        }
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert!(matches!(
            parse_args(&argv(&["label", "-h"])),
            Ok(Invocation::Help)
        ));
        assert!(matches!(
            parse_args(&argv(&["-V", "bogus"])),
            Ok(Invocation::Version)
        ));
    }

    #[test]
    fn sanitize_does_not_keep_a_run_log() {
        let parsed = run(&["sanitize", "Tool.java"]);
        assert!(!parsed.command.writes_run_log());
        assert!(run(&["label", "x"]).command.writes_run_log());
    }
}
