//! Purpose: `exchange-desk` CLI entry point.
//! Role: Binary crate root; parses args, resolves the endpoint, runs workflow actions.
//! Invariants: stdout carries tables or JSON; notifications and errors go to stderr.
//! Invariants: Non-interactive errors and notices are emitted as JSON lines on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;
mod terminal;

use color_json::colorize_json;
use exchange_desk::api::{Error, ErrorKind, to_exit_code};
use exchange_desk::config::{self, EndpointConfig};
use exchange_desk::core::record::FormInput;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let settings = Settings {
        endpoint: cli.endpoint,
        config_path: cli.config.clone().unwrap_or_else(config::default_config_path),
        explicit_config: cli.config.is_some(),
        timeout: cli.timeout,
        color_mode,
    };

    command_dispatch::dispatch_command(cli.command, &settings)
        .map_err(add_transport_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "exchange-desk",
    version,
    about = "Manage student exchange-program records kept in a spreadsheet endpoint",
    help_template = r#"{about-with-newline}
USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    after_help = r#"EXAMPLES
  $ exchange-desk --endpoint https://script.google.com/macros/s/.../exec list
  $ exchange-desk view 2
  $ exchange-desk delete @1f2e3d4c5b6a7980
  $ exchange-desk validate --form student.json

TARGETS
  A record is addressed by its row index from `list` (e.g. 3), or by the
  key column prefixed with @. Keys follow the record if rows shift.

CONFIG
  ~/.exchange-desk/config.json: {"endpoint": "https://...", "timeout_ms": 30000}"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "EXCHANGE_DESK_ENDPOINT",
        help = "Record endpoint URL (overrides the config file)"
    )]
    endpoint: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.exchange-desk/config.json)",
        value_hint = ValueHint::FilePath
    )]
    config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Request timeout, e.g. 500ms, 30s, 2m (default: 30s)"
    )]
    timeout: Option<String>,
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List every record as a table")]
    List {
        #[arg(long, help = "Emit rows as JSON instead of a table")]
        json: bool,
    },
    #[command(about = "Show one record's details")]
    View {
        #[arg(help = "Row index or @key")]
        target: String,
        #[arg(long, help = "Emit the detail view as JSON")]
        json: bool,
    },
    #[command(about = "Delete one record after confirmation")]
    Delete {
        #[arg(help = "Row index or @key")]
        target: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Edit a record interactively (not available; see `update`)")]
    Edit {
        #[arg(help = "Row index or @key")]
        target: String,
    },
    #[command(about = "Validate a form and add it as a new record")]
    Add {
        #[arg(long, help = "Form JSON file, or - for stdin", value_hint = ValueHint::FilePath)]
        form: String,
    },
    #[command(about = "Validate a form and replace an existing record with it")]
    Update {
        #[arg(help = "Row index or @key")]
        target: String,
        #[arg(long, help = "Form JSON file, or - for stdin", value_hint = ValueHint::FilePath)]
        form: String,
    },
    #[command(about = "Validate a form without contacting the endpoint")]
    Validate {
        #[arg(long, help = "Form JSON file, or - for stdin", value_hint = ValueHint::FilePath)]
        form: String,
    },
    #[command(about = "Inspect configuration")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    #[command(about = "Print the config file path in use")]
    Path,
    #[command(about = "Print the resolved endpoint configuration")]
    Show,
}

struct Settings {
    endpoint: Option<String>,
    config_path: PathBuf,
    explicit_config: bool,
    timeout: Option<String>,
    color_mode: ColorMode,
}

impl Settings {
    fn load_config_file(&self) -> Result<config::ConfigFile, Error> {
        config::load_config_file(&self.config_path, !self.explicit_config)
    }

    fn endpoint_config(&self) -> Result<EndpointConfig, Error> {
        let file = self.load_config_file()?;
        let timeout = self
            .timeout
            .as_deref()
            .map(config::parse_duration)
            .transpose()?;
        EndpointConfig::resolve(self.endpoint.as_deref(), timeout, &file)
    }
}

fn read_form_input(path: &str) -> Result<FormInput, Error> {
    let contents = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read form from stdin")
                .with_source(err)
        })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message(format!("failed to read form file '{path}'"))
                .with_source(err)
        })?
    };
    parse_form_input(&contents)
}

fn parse_form_input(contents: &str) -> Result<FormInput, Error> {
    let invalid = || {
        Error::new(ErrorKind::Usage)
            .with_message("invalid form json")
            .with_hint("Provide one JSON object using record field names (name, studentId, email, ...).")
    };
    let value =
        serde_json::from_str::<Value>(contents).map_err(|err| invalid().with_source(err))?;
    if !value.is_object() {
        return Err(invalid());
    }
    serde_json::from_value(value).map_err(|err| invalid().with_source(err))
}

fn add_transport_hint(err: Error) -> Error {
    if err.hint().is_some() || !err.kind().is_transport_level() {
        return err;
    }
    err.with_hint("Check the endpoint URL and network, or raise --timeout.")
}

fn emit_json(value: Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let pretty = is_tty || use_color;
    let json = if pretty {
        if use_color {
            colorize_json(&value, true)
        } else {
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
        }
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let column_count = headers.len();
    let mut sanitized_rows = Vec::with_capacity(rows.len());
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();

    for row in rows {
        let mut sanitized = Vec::with_capacity(column_count);
        for (idx, width) in widths.iter_mut().enumerate() {
            let value = row.get(idx).map(String::as_str).unwrap_or("");
            let cleaned = sanitize_table_cell(value);
            *width = (*width).max(cleaned.chars().count());
            sanitized.push(cleaned);
        }
        sanitized_rows.push(sanitized);
    }

    let mut lines = Vec::with_capacity(sanitized_rows.len() + 1);
    lines.push(format_table_line(
        &headers
            .iter()
            .map(|header| header.to_string())
            .collect::<Vec<_>>(),
        &widths,
    ));
    for row in sanitized_rows {
        lines.push(format_table_line(&row, &widths));
    }
    lines.join("\n")
}

fn sanitize_table_cell(value: &str) -> String {
    value.replace('\n', "\\n").replace('\r', "\\r")
}

fn format_table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        let cell_len = cell.chars().count();
        if *width > cell_len && idx + 1 < widths.len() {
            line.push_str(&" ".repeat(*width - cell_len));
        }
    }
    line
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
    Green,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Transport => "endpoint unreachable".to_string(),
        ErrorKind::Status => "endpoint returned an error status".to_string(),
        ErrorKind::Protocol => "unexpected endpoint response".to_string(),
        ErrorKind::Rejected => "endpoint reported failure".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(err.kind().as_str()));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(endpoint) = err.endpoint() {
        inner.insert("endpoint".to_string(), json!(endpoint));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(endpoint) = err.endpoint() {
        lines.push(format!(
            "{} {endpoint}",
            colorize_label("endpoint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(status) = err.status() {
        lines.push(format!(
            "{} {status}",
            colorize_label("status:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `exchange-desk --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "exchange-desk") else {
        return "Try `exchange-desk --help`.".to_string();
    };

    let mut parts = Vec::new();
    for token in tokens.iter().skip(pos + 1) {
        if token.starts_with('-') || token.starts_with('<') || token.starts_with('[') {
            break;
        }
        parts.push(*token);
    }

    if parts.is_empty() {
        return "Try `exchange-desk --help`.".to_string();
    }
    format!("Try `exchange-desk {} --help`.", parts.join(" "))
}
