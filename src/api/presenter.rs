//! Purpose: Presentation collaborator the workflow drives.
//! Exports: `Presenter`, `NotificationKind`, `Confirmation`.
//! Role: Keeps the workflow free of any concrete UI; the CLI and tests implement it.

use crate::api::view::{RecordDetail, RecordRow};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

pub trait Presenter {
    fn show_notification(&mut self, message: &str, kind: NotificationKind);

    fn show_loading(&mut self, visible: bool);

    /// Blocks until the user answers.
    fn confirm(&mut self, message: &str) -> Confirmation;

    fn open_detail_view(&mut self, detail: &RecordDetail);

    fn render_table(&mut self, rows: &[RecordRow]);
}
