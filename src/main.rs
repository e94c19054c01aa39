mod debug_report;

use redacta::{
    ConflictPolicy, DetectedSpan, OperatorConfig, OperatorConfigs, Options, anonymize_verbose_with, default_registry,
};
use serde::Deserialize;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "REDACTA_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    if config.list_operators {
        debug_report::print_operators(default_registry(), config.color);
        return;
    }

    let request = match load_request(&config) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let opts = Options { conflict_policy: config.policy };
    let res = match anonymize_verbose_with(&request.text, &request.analyzer_results, Some(&request.anonymizers), &opts)
    {
        Ok(res) => res,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&res.result) {
            Ok(out) => println!("{out}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
    } else {
        debug_report::print_run(request.text.len(), request.analyzer_results.len(), &res, config.color);
    }
}

/// JSON request read from `--input` or stdin.
#[derive(Debug, Deserialize)]
struct Request {
    text: String,
    #[serde(default)]
    analyzer_results: Vec<DetectedSpan>,
    #[serde(default)]
    anonymizers: OperatorConfigs,
}

struct CliConfig {
    input: Option<String>,
    operators: Vec<(String, OperatorConfig)>,
    policy: ConflictPolicy,
    json: bool,
    list_operators: bool,
    color: bool,
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "redacta=debug" } else { "redacta=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        input: None,
        operators: Vec::new(),
        policy: ConflictPolicy::default(),
        json: false,
        list_operators: false,
        color: io::stdout().is_terminal(),
        verbose: false,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("redacta {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => config.color = true,
            "--no-color" => config.color = false,
            "--json" => config.json = true,
            "--verbose" | "-v" => config.verbose = true,
            "--list-operators" => config.list_operators = true,
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut config, value)?;
            }
            "--operator" | "-o" => {
                let value = args.next().ok_or_else(|| "error: --operator expects a value".to_string())?;
                config.operators.push(parse_operator(&value)?);
            }
            "--policy" => {
                let value = args.next().ok_or_else(|| "error: --policy expects a value".to_string())?;
                config.policy = value.parse().map_err(|err| format!("error: {err}"))?;
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut config, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with("--operator=") => {
                config.operators.push(parse_operator(arg.trim_start_matches("--operator="))?);
            }
            _ if arg.starts_with("--policy=") => {
                config.policy = arg.trim_start_matches("--policy=").parse().map_err(|err| format!("error: {err}"))?;
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'\n\n{}", help_text()));
            }
        }
    }

    Ok(config)
}

fn set_input(config: &mut CliConfig, value: String) -> Result<(), String> {
    if config.input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    config.input = Some(value);
    Ok(())
}

fn parse_operator(value: &str) -> Result<(String, OperatorConfig), String> {
    OperatorConfig::parse_assignment(value).map_err(|err| format!("error: --operator: {err}"))
}

/// Read the request and apply `--operator` overrides on top of its
/// `anonymizers` map.
fn load_request(config: &CliConfig) -> Result<Request, String> {
    let raw = match config.input.as_deref() {
        None | Some("-") => read_stdin_input()?,
        Some(path) => std::fs::read_to_string(path).map_err(|err| format!("error: failed to read {path}: {err}"))?,
    };
    if raw.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let mut request: Request = serde_json::from_str(&raw).map_err(|err| format!("error: invalid request: {err}"))?;
    for (entity, operator) in &config.operators {
        request.anonymizers.insert(entity.clone(), operator.clone());
    }
    Ok(request)
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        r#"redacta {version}

Anonymize detected entities in a text.

Usage:
  redacta [OPTIONS] [--input <file>]
  redacta --list-operators

The request is a JSON object read from --input or stdin:

  {{ "text": "John lives in NY",
    "analyzer_results": [{{ "entity_type": "PERSON", "start": 0, "end": 4, "score": 0.9 }}],
    "anonymizers": {{ "DEFAULT": {{ "type": "replace" }} }} }}

Options:
  -i, --input <file>          Read the request from <file> ("-" for stdin).
  -o, --operator <assignment> Operator for an entity type, e.g.
                              PHONE=mask:masking_char=*,chars_to_mask=4,from_end=true
                              or DEFAULT=redact. Repeatable; overrides the request.
  --policy <policy>           Conflict policy: highest-score (default) or first-seen.
  --json                      Print the result as JSON.
  --list-operators            List available operators and exit.
  --color                     Force ANSI color output.
  --no-color                  Disable ANSI color output.
  -v, --verbose               Log pipeline steps to stderr ({log_env} overrides).
  -h, --help                  Show this help message.
  -V, --version               Print version information.

Exit codes:
  0  Success.
  1  Anonymization failed (invalid span, operator or parameters).
  2  Invalid arguments or request.
"#,
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
