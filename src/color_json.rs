//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: `colorize_json`.
//! Role: Pure formatter used by `emit_json` when stdout is a terminal.
//! Invariants: With color disabled, output equals `serde_json::to_string_pretty`.
//! Invariants: Blank string cells are dimmed so sparse records stay readable.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_BLANK: &str = "90";
const COLOR_NUMBER: &str = "33";
const COLOR_BOOL: &str = "35";
const COLOR_PLAIN: &str = "39";

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut painter = Painter {
        use_color,
        out: String::new(),
    };
    painter.value(value, 0);
    painter.out
}

struct Painter {
    use_color: bool,
    out: String,
}

impl Painter {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.paint("null", COLOR_PLAIN),
            Value::Bool(flag) => self.paint(if *flag { "true" } else { "false" }, COLOR_BOOL),
            Value::Number(number) => self.paint(&number.to_string(), COLOR_NUMBER),
            Value::String(text) => {
                let color = if text.is_empty() { COLOR_BLANK } else { COLOR_STRING };
                self.paint(&encode_str(text), color);
            }
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.paint("[]", COLOR_PLAIN);
            return;
        }
        self.paint("[", COLOR_PLAIN);
        for (idx, item) in items.iter().enumerate() {
            self.newline(depth + 1);
            self.value(item, depth + 1);
            if idx + 1 < items.len() {
                self.paint(",", COLOR_PLAIN);
            }
        }
        self.newline(depth);
        self.paint("]", COLOR_PLAIN);
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.paint("{}", COLOR_PLAIN);
            return;
        }
        self.paint("{", COLOR_PLAIN);
        let len = map.len();
        for (idx, (key, value)) in map.iter().enumerate() {
            self.newline(depth + 1);
            self.paint(&encode_str(key), COLOR_KEY);
            self.paint(":", COLOR_PLAIN);
            self.out.push(' ');
            self.value(value, depth + 1);
            if idx + 1 < len {
                self.paint(",", COLOR_PLAIN);
            }
        }
        self.newline(depth);
        self.paint("}", COLOR_PLAIN);
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        self.out.push_str(&INDENT.repeat(depth));
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.use_color {
            self.out.push_str("\u{1b}[");
            self.out.push_str(color);
            self.out.push('m');
            self.out.push_str(text);
            self.out.push_str("\u{1b}[0m");
        } else {
            self.out.push_str(text);
        }
    }
}

fn encode_str(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
