//! Purpose: Uniform record-store contract the workflow is written against.
//! Exports: `RecordStore`.
//! Role: Seam between `RecordWorkflow` and the remote endpoint (or a test double).
//! Invariants: Implementations never panic or return errors; failures become `false`/empty plus a diagnostic.

use crate::api::diagnostics::DiagnosticLog;
use crate::core::record::ExchangeRecord;

pub trait RecordStore {
    /// Every record, in endpoint order. Empty on any failure.
    fn load_all(&self) -> Vec<ExchangeRecord>;

    fn add(&self, record: &ExchangeRecord) -> bool;

    /// Replace the record at a positional index from the latest listing.
    fn update(&self, index: usize, record: &ExchangeRecord) -> bool;

    fn delete(&self, index: usize) -> bool;

    fn diagnostics(&self) -> &DiagnosticLog;
}
