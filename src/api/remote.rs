//! Purpose: Blocking HTTP client for the spreadsheet-backed record endpoint.
//! Exports: `RemoteRecordStore`.
//! Role: Owns request construction, envelope parsing, and error normalization for the four verbs.
//! Invariants: One URL; the verb travels in `action` (query for loadData/deleteRecord, form body otherwise).
//! Invariants: `try_*` return typed errors; the `RecordStore` impl absorbs them into `false`/empty.
//! Invariants: A missing `success` flag is a failure; `success: true` without `data` is an empty list.
//! Invariants: Loaded rows keep their sheet index; a row that is not a record object loads as an empty record.
#![allow(clippy::result_large_err)]

use crate::api::diagnostics::{DiagnosticLog, Operation};
use crate::api::store::RecordStore;
use crate::config::EndpointConfig;
use crate::core::error::{Error, ErrorKind};
use crate::core::record::ExchangeRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

type ApiResult<T> = Result<T, Error>;

const LOAD_FAILED: &str = "Error loading data from server";

#[derive(Clone)]
pub struct RemoteRecordStore {
    config: EndpointConfig,
    agent: ureq::Agent,
    diagnostics: DiagnosticLog,
}

#[derive(Deserialize)]
struct LoadEnvelope {
    success: Option<bool>,
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct MutationEnvelope {
    success: Option<bool>,
    #[serde(default)]
    error: Option<Value>,
}

impl RemoteRecordStore {
    pub fn new(config: EndpointConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Self {
            config,
            agent,
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// Share an existing diagnostic log, e.g. one the caller already watches.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticLog) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn try_load_all(&self) -> ApiResult<Vec<ExchangeRecord>> {
        let url = self.action_url(Operation::LoadAll, None);
        tracing::debug!(action = %Operation::LoadAll, "GET {}", self.config.endpoint());
        let response = self
            .agent
            .get(url.as_str())
            .set("Accept", "application/json")
            .call();
        let body = self.read_body(response)?;
        parse_load_body(&body).map_err(|err| self.tag(err))
    }

    pub fn try_add(&self, record: &ExchangeRecord) -> ApiResult<()> {
        let data = encode_record(record)?;
        tracing::debug!(action = %Operation::Add, "POST {}", self.config.endpoint());
        let response = self
            .agent
            .post(self.config.endpoint().as_str())
            .set("Accept", "application/json")
            .send_form(&[("action", Operation::Add.as_str()), ("data", &data)]);
        let body = self.read_body(response)?;
        parse_mutation_body(&body).map_err(|err| self.tag(err))
    }

    pub fn try_update(&self, index: usize, record: &ExchangeRecord) -> ApiResult<()> {
        let data = encode_record(record)?;
        let index_text = index.to_string();
        tracing::debug!(action = %Operation::Update, index, "POST {}", self.config.endpoint());
        let response = self
            .agent
            .post(self.config.endpoint().as_str())
            .set("Accept", "application/json")
            .send_form(&[
                ("action", Operation::Update.as_str()),
                ("index", &index_text),
                ("data", &data),
            ]);
        let body = self.read_body(response)?;
        parse_mutation_body(&body).map_err(|err| self.tag(err))
    }

    pub fn try_delete(&self, index: usize) -> ApiResult<()> {
        let url = self.action_url(Operation::Delete, Some(index));
        tracing::debug!(action = %Operation::Delete, index, "POST {}", self.config.endpoint());
        let response = self
            .agent
            .post(url.as_str())
            .set("Accept", "application/json")
            .call();
        let body = self.read_body(response)?;
        parse_mutation_body(&body).map_err(|err| self.tag(err))
    }

    fn action_url(&self, operation: Operation, index: Option<usize>) -> Url {
        let mut url = self.config.endpoint().clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", operation.as_str());
            if let Some(index) = index {
                pairs.append_pair("index", &index.to_string());
            }
        }
        url
    }

    fn read_body(&self, response: Result<ureq::Response, ureq::Error>) -> ApiResult<String> {
        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                return Err(self.tag(
                    Error::new(ErrorKind::Status)
                        .with_message(format!("endpoint answered status {code}"))
                        .with_status(code),
                ));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(self.tag(
                    Error::new(ErrorKind::Transport)
                        .with_message("request failed")
                        .with_source(err),
                ));
            }
        };
        response.into_string().map_err(|err| {
            self.tag(
                Error::new(ErrorKind::Transport)
                    .with_message("failed to read response body")
                    .with_source(err),
            )
        })
    }

    fn tag(&self, err: Error) -> Error {
        err.with_endpoint(self.config.endpoint().as_str())
    }

    fn absorb<T>(
        &self,
        operation: Operation,
        index: Option<usize>,
        result: ApiResult<T>,
        fallback: T,
    ) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    action = %operation,
                    kind = %err.kind(),
                    error = %err,
                    "remote call failed"
                );
                self.diagnostics.record(operation, index, &err);
                fallback
            }
        }
    }
}

impl RecordStore for RemoteRecordStore {
    fn load_all(&self) -> Vec<ExchangeRecord> {
        let result = self.try_load_all();
        self.absorb(Operation::LoadAll, None, result, Vec::new())
    }

    fn add(&self, record: &ExchangeRecord) -> bool {
        let result = self.try_add(record).map(|()| true);
        self.absorb(Operation::Add, None, result, false)
    }

    fn update(&self, index: usize, record: &ExchangeRecord) -> bool {
        let result = self.try_update(index, record).map(|()| true);
        self.absorb(Operation::Update, Some(index), result, false)
    }

    fn delete(&self, index: usize) -> bool {
        let result = self.try_delete(index).map(|()| true);
        self.absorb(Operation::Delete, Some(index), result, false)
    }

    fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }
}

fn encode_record(record: &ExchangeRecord) -> ApiResult<String> {
    serde_json::to_string(record).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode record json")
            .with_source(err)
    })
}

fn decode_envelope<R>(body: &str) -> ApiResult<R>
where
    R: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| {
        Error::new(ErrorKind::Protocol)
            .with_message("invalid response json")
            .with_source(err)
    })
}

fn parse_load_body(body: &str) -> ApiResult<Vec<ExchangeRecord>> {
    let envelope: LoadEnvelope = decode_envelope(body)?;
    match envelope.success {
        Some(true) => Ok(decode_rows(envelope.data.unwrap_or_default())),
        Some(false) => Err(rejection(envelope.error, LOAD_FAILED)),
        None => Err(missing_success()),
    }
}

/// Rows keep their sheet position; an undecodable row becomes an empty record.
fn decode_rows(rows: Vec<Value>) -> Vec<ExchangeRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            if !row.is_object() {
                tracing::warn!(index, "non-object row read as empty record");
                return ExchangeRecord::default();
            }
            serde_json::from_value(row).unwrap_or_else(|err| {
                tracing::warn!(index, error = %err, "undecodable row read as empty record");
                ExchangeRecord::default()
            })
        })
        .collect()
}

fn parse_mutation_body(body: &str) -> ApiResult<()> {
    let envelope: MutationEnvelope = decode_envelope(body)?;
    match envelope.success {
        Some(true) => Ok(()),
        Some(false) => Err(rejection(envelope.error, "endpoint reported failure")),
        None => Err(missing_success()),
    }
}

fn rejection(server_error: Option<Value>, fallback: &str) -> Error {
    let message = match server_error {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        Some(Value::Null) | None => fallback.to_string(),
        Some(Value::String(_)) => fallback.to_string(),
        Some(other) => other.to_string(),
    };
    Error::new(ErrorKind::Rejected).with_message(message)
}

fn missing_success() -> Error {
    Error::new(ErrorKind::Protocol).with_message("response missing success flag")
}
