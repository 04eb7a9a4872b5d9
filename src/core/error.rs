//! Purpose: Structured error type shared by the store, config loader, and CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: One error shape for every fallible path; the binary renders it as text or JSON.
//! Invariants: Exit-code mapping is stable once published.
//! Invariants: Remote failures keep their kind so diagnostics can tell them apart.
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    NotFound,
    Io,
    /// The endpoint could not be reached or the connection broke mid-request.
    Transport,
    /// The endpoint answered with a non-2xx status.
    Status,
    /// The endpoint answered 2xx but the body was not the expected JSON envelope.
    Protocol,
    /// The endpoint answered `success: false`.
    Rejected,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Internal => "Internal",
            ErrorKind::Usage => "Usage",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Io => "Io",
            ErrorKind::Transport => "Transport",
            ErrorKind::Status => "Status",
            ErrorKind::Protocol => "Protocol",
            ErrorKind::Rejected => "Rejected",
        }
    }

    /// True for failures that happened before a well-formed answer came back.
    pub fn is_transport_level(self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Status | ErrorKind::Protocol
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    endpoint: Option<String>,
    status: Option<u16>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            endpoint: None,
            status: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {status})")?;
        }
        if let Some(endpoint) = &self.endpoint {
            write!(f, " (endpoint: {endpoint})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Io => 4,
        ErrorKind::Transport => 5,
        ErrorKind::Status => 6,
        ErrorKind::Protocol => 7,
        ErrorKind::Rejected => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::NotFound, 3),
            (ErrorKind::Io, 4),
            (ErrorKind::Transport, 5),
            (ErrorKind::Status, 6),
            (ErrorKind::Protocol, 7),
            (ErrorKind::Rejected, 8),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_message_and_status() {
        let err = Error::new(ErrorKind::Status)
            .with_message("remote error")
            .with_status(502);
        assert_eq!(err.to_string(), "Status: remote error (status: 502)");
    }

    #[test]
    fn transport_level_kinds_exclude_rejection() {
        assert!(ErrorKind::Transport.is_transport_level());
        assert!(ErrorKind::Protocol.is_transport_level());
        assert!(!ErrorKind::Rejected.is_transport_level());
    }
}
