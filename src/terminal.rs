//! Purpose: Terminal implementation of the workflow's presentation collaborator.
//! Exports: `TerminalPresenter`.
//! Role: Tables and detail views on stdout; notifications, loading, and prompts on stderr.
//! Invariants: stdout only ever carries the table or detail payload (text or JSON).
//! Invariants: When stderr is not a terminal, notifications are JSON notice lines and no spinner is drawn.

use super::*;
use exchange_desk::api::view::{RecordDetail, RecordRow};
use exchange_desk::api::{Confirmation, NotificationKind, Presenter};
use exchange_desk::notice::{Notice, notice_json};
use std::io::{BufRead, Write};

const TABLE_HEADERS: [&str; 7] = ["INDEX", "KEY", "NAME", "STUDENT ID", "EMAIL", "MAJOR", "TYPE"];

pub(super) struct TerminalPresenter {
    cmd: &'static str,
    color_mode: ColorMode,
    json: bool,
    assume_yes: bool,
    loading_drawn: bool,
}

impl TerminalPresenter {
    pub(super) fn new(cmd: &'static str, color_mode: ColorMode) -> Self {
        Self {
            cmd,
            color_mode,
            json: false,
            assume_yes: false,
            loading_drawn: false,
        }
    }

    pub(super) fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub(super) fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

impl Presenter for TerminalPresenter {
    fn show_notification(&mut self, message: &str, kind: NotificationKind) {
        let is_tty = io::stderr().is_terminal();
        if is_tty {
            let use_color = self.color_mode.use_color(is_tty);
            let label = match kind {
                NotificationKind::Success => colorize_label("success:", use_color, AnsiColor::Green),
                NotificationKind::Error => colorize_label("error:", use_color, AnsiColor::Red),
                NotificationKind::Info => colorize_label("notice:", use_color, AnsiColor::Yellow),
            };
            eprintln!("{label} {message}");
            return;
        }

        let notice = Notice::new(kind.as_str(), self.cmd, message);
        let json = serde_json::to_string(&notice_json(&notice)).unwrap_or_else(|_| {
            "{\"notice\":{\"kind\":\"error\",\"message\":\"json encode failed\"}}".to_string()
        });
        eprintln!("{json}");
    }

    fn show_loading(&mut self, visible: bool) {
        let mut stderr = io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        if visible && !self.loading_drawn {
            let _ = write!(stderr, "Loading...");
            let _ = stderr.flush();
            self.loading_drawn = true;
        } else if !visible && self.loading_drawn {
            let _ = write!(stderr, "\r\u{1b}[2K");
            let _ = stderr.flush();
            self.loading_drawn = false;
        }
    }

    fn confirm(&mut self, message: &str) -> Confirmation {
        if self.assume_yes {
            return Confirmation::Confirmed;
        }
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Confirmation::Cancelled;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return Confirmation::Cancelled;
        }
        parse_confirmation(&answer)
    }

    fn open_detail_view(&mut self, detail: &RecordDetail) {
        if self.json {
            let value = serde_json::to_value(detail).unwrap_or(Value::Null);
            emit_json(json!({ "record": value }), self.color_mode);
            return;
        }
        println!("{}", render_detail(detail));
    }

    fn render_table(&mut self, rows: &[RecordRow]) {
        if self.json {
            let value = serde_json::to_value(rows).unwrap_or(Value::Array(Vec::new()));
            emit_json(json!({ "records": value }), self.color_mode);
            return;
        }
        if rows.is_empty() {
            if io::stderr().is_terminal() {
                eprintln!("No records.");
            }
            return;
        }
        println!("{}", render_table(&TABLE_HEADERS, &table_cells(rows)));
    }
}

fn parse_confirmation(answer: &str) -> Confirmation {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Cancelled,
    }
}

fn table_cells(rows: &[RecordRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.index.to_string(),
                format!("@{}", row.key),
                row.name.clone(),
                row.student_id.clone(),
                row.email.clone(),
                row.major.clone(),
                row.form_type.clone(),
            ]
        })
        .collect()
}

fn render_detail(detail: &RecordDetail) -> String {
    let mut lines = vec![
        detail.title.clone(),
        format!("index {}  key @{}", detail.index, detail.key),
    ];
    for section in &detail.sections {
        lines.push(String::new());
        lines.push(section.heading.clone());
        let width = section
            .fields
            .iter()
            .map(|(label, _)| label.chars().count() + 1)
            .max()
            .unwrap_or(0);
        for (label, value) in &section.fields {
            let label = format!("{label}:");
            let pad = width.saturating_sub(label.chars().count());
            let line = format!("  {label}{}  {}", " ".repeat(pad), sanitize_table_cell(value));
            lines.push(line.trim_end().to_string());
        }
    }
    if let Some(details) = &detail.details {
        lines.push(String::new());
        lines.push("Additional Details".to_string());
        for line in details.lines() {
            lines.push(format!("  {line}"));
        }
    }
    lines.join("\n")
}
