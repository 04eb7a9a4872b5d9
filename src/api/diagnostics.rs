//! Purpose: Side channel for remote failures the store absorbs into benign defaults.
//! Exports: `Operation`, `Diagnostic`, `DiagnosticLog`.
//! Role: Keeps the boolean/empty-list contract simple while preserving failure detail.
//! Invariants: Sequence numbers are strictly increasing for the life of a log.
//! Invariants: The log is bounded; the oldest entries are evicted first.

use crate::core::error::{Error, ErrorKind};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    LoadAll,
    Add,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::LoadAll => "loadData",
            Operation::Add => "addRecord",
            Operation::Update => "updateRecord",
            Operation::Delete => "deleteRecord",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub seq: u64,
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub index: Option<usize>,
}

impl Diagnostic {
    /// True when the endpoint answered and said no, as opposed to never answering properly.
    pub fn is_rejection(&self) -> bool {
        self.kind == ErrorKind::Rejected
    }
}

#[derive(Clone, Debug)]
pub struct DiagnosticLog {
    inner: Arc<Mutex<LogState>>,
}

#[derive(Debug)]
struct LogState {
    next_seq: u64,
    capacity: usize,
    entries: VecDeque<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogState {
                next_seq: 1,
                capacity: capacity.max(1),
                entries: VecDeque::new(),
            })),
        }
    }

    /// Sequence number the next recorded diagnostic will carry.
    pub fn next_seq(&self) -> u64 {
        self.state().next_seq
    }

    pub fn record(&self, operation: Operation, index: Option<usize>, err: &Error) -> Diagnostic {
        let mut state = self.state();
        let diagnostic = Diagnostic {
            seq: state.next_seq,
            operation,
            kind: err.kind(),
            message: err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| err.kind().to_string()),
            status: err.status(),
            index,
        };
        state.next_seq += 1;
        if state.entries.len() == state.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(diagnostic.clone());
        diagnostic
    }

    /// Diagnostics recorded at or after `seq`, oldest first.
    pub fn since(&self, seq: u64) -> Vec<Diagnostic> {
        self.state()
            .entries
            .iter()
            .filter(|diagnostic| diagnostic.seq >= seq)
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.state().entries.iter().cloned().collect()
    }

    fn state(&self) -> MutexGuard<'_, LogState> {
        self.inner
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticLog, Operation};
    use crate::core::error::{Error, ErrorKind};

    #[test]
    fn since_returns_only_newer_entries() {
        let log = DiagnosticLog::new();
        log.record(Operation::LoadAll, None, &Error::new(ErrorKind::Transport));
        let mark = log.next_seq();
        assert!(log.since(mark).is_empty());

        let recorded = log.record(
            Operation::Delete,
            Some(4),
            &Error::new(ErrorKind::Rejected).with_message("row missing"),
        );
        let newer = log.since(mark);
        assert_eq!(newer, vec![recorded]);
        assert_eq!(newer[0].message, "row missing");
        assert_eq!(newer[0].index, Some(4));
        assert!(newer[0].is_rejection());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let log = DiagnosticLog::with_capacity(2);
        for _ in 0..3 {
            log.record(Operation::Add, None, &Error::new(ErrorKind::Protocol));
        }
        let seqs = log.entries().iter().map(|d| d.seq).collect::<Vec<_>>();
        assert_eq!(seqs, vec![2, 3]);
        assert_eq!(log.next_seq(), 4);
    }

    #[test]
    fn clones_share_one_log() {
        let log = DiagnosticLog::new();
        let handle = log.clone();
        handle.record(Operation::Update, Some(0), &Error::new(ErrorKind::Status));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].message, "Status");
    }
}
