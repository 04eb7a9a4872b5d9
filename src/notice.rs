//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `notice_time_now`.
//! Role: Carries workflow notifications when stderr is not a terminal.
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub message: String,
    pub details: Map<String, Value>,
}

impl Notice {
    pub fn new(kind: impl Into<String>, cmd: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            time: notice_time_now().unwrap_or_default(),
            cmd: cmd.into(),
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

pub fn notice_time_now() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::{Notice, notice_json};
    use serde_json::{Map, Value};

    #[test]
    fn notice_json_has_required_fields() {
        let mut details = Map::new();
        details.insert("index".to_string(), Value::from(1));

        let notice = Notice {
            kind: "success".to_string(),
            time: "2026-02-01T00:00:00Z".to_string(),
            cmd: "delete".to_string(),
            message: "Record for Grace has been deleted.".to_string(),
            details,
        };

        let value = notice_json(&notice);
        let obj = value
            .get("notice")
            .and_then(|v| v.as_object())
            .expect("notice object");

        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("success"));
        assert_eq!(
            obj.get("time").and_then(|v| v.as_str()),
            Some("2026-02-01T00:00:00Z")
        );
        assert_eq!(obj.get("cmd").and_then(|v| v.as_str()), Some("delete"));
        assert_eq!(
            obj.get("message").and_then(|v| v.as_str()),
            Some("Record for Grace has been deleted.")
        );
        assert_eq!(
            obj.get("details")
                .and_then(|v| v.get("index"))
                .and_then(|v| v.as_u64()),
            Some(1)
        );
    }

    #[test]
    fn new_stamps_current_time() {
        let notice = Notice::new("info", "list", "hello").with_detail("rows", Value::from(0));
        assert!(notice.time.ends_with('Z'));
        assert_eq!(notice.details.len(), 1);
    }
}
