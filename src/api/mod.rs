//! Purpose: Public client surface for the exchange-program record system.
//! Exports: Remote store, store trait, diagnostics, presenter seam, view shaping, workflow.
//! Role: Everything a front end needs; `core` stays pure data and validation.
//! Invariants: Remote failures never cross this boundary as errors from the uniform store calls.

pub mod diagnostics;
pub mod presenter;
mod remote;
pub mod store;
pub mod view;
pub mod workflow;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use diagnostics::{Diagnostic, DiagnosticLog, Operation};
pub use presenter::{Confirmation, NotificationKind, Presenter};
pub use remote::RemoteRecordStore;
pub use store::RecordStore;
pub use view::{DetailSection, RecordDetail, RecordRow};
pub use workflow::{
    DeleteOutcome, EditOutcome, RecordTarget, RecordWorkflow, RenderOutcome, SubmitOutcome,
    ViewOutcome, request_edit,
};
