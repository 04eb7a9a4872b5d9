//! Purpose: Drive list/view/edit/delete and form submission against a store and a presenter.
//! Exports: `RecordWorkflow`, `RecordTarget`, `request_edit`, and one outcome enum per action.
//! Role: The only place interactive sequencing lives; store and presenter stay dumb.
//! Invariants: Every action that targets a record re-fetches and resolves the target first.
//! Invariants: A target that resolves to nothing never reaches a mutating remote call.
//! Invariants: After a successful mutation the table is rebuilt from a fresh `load_all`.
//! Invariants: Invalid form input never reaches the store.

use crate::api::diagnostics::{Diagnostic, Operation};
use crate::api::presenter::{Confirmation, NotificationKind, Presenter};
use crate::api::store::RecordStore;
use crate::api::view::{RecordDetail, record_detail, table_rows};
use crate::core::error::{Error, ErrorKind};
use crate::core::key::{RecordKey, locate_by_key};
use crate::core::record::{ExchangeRecord, FormInput};
use crate::core::validate::{FormError, validate_form};
use std::fmt;
use std::str::FromStr;

pub const LOAD_FAILED_MESSAGE: &str = "Error loading data from server";
pub const NOT_FOUND_MESSAGE: &str = "Record not found";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting record.";
pub const ADD_FAILED_MESSAGE: &str = "Error adding record.";
pub const UPDATE_FAILED_MESSAGE: &str = "Error updating record.";

/// Which record an action is aimed at: a position in the latest listing, or a content key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordTarget {
    Index(usize),
    Key(RecordKey),
}

impl RecordTarget {
    pub fn resolve(&self, records: &[ExchangeRecord]) -> Option<usize> {
        match self {
            RecordTarget::Index(index) => (*index < records.len()).then_some(*index),
            RecordTarget::Key(key) => locate_by_key(records, key),
        }
    }
}

impl fmt::Display for RecordTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordTarget::Index(index) => write!(f, "{index}"),
            RecordTarget::Key(key) => write!(f, "@{key}"),
        }
    }
}

impl FromStr for RecordTarget {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(key) = trimmed.strip_prefix('@') {
            return key.parse::<RecordKey>().map(RecordTarget::Key).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("invalid record key '{key}'"))
                    .with_hint("Copy the key column from `list` and prefix it with @.")
                    .with_source(err)
            });
        }
        trimmed
            .parse::<usize>()
            .map(RecordTarget::Index)
            .map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("invalid record target '{trimmed}'"))
                    .with_hint("Use a row index (e.g. 3) or a record key (e.g. @1f2e3d4c5b6a7980).")
                    .with_source(err)
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Rendered { rows: usize },
    LoadFailed(Diagnostic),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewOutcome {
    Opened(RecordDetail),
    NotFound,
    LoadFailed(Diagnostic),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted { index: usize },
    Cancelled,
    NotFound,
    Failed,
    LoadFailed(Diagnostic),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditOutcome {
    Unsupported,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Saved { index: Option<usize> },
    Invalid(Vec<FormError>),
    NotFound,
    Failed,
    LoadFailed(Diagnostic),
}

struct Fetched {
    records: Vec<ExchangeRecord>,
    failure: Option<Diagnostic>,
}

pub struct RecordWorkflow<S, P> {
    store: S,
    presenter: P,
}

impl<S, P> RecordWorkflow<S, P>
where
    S: RecordStore,
    P: Presenter,
{
    pub fn new(store: S, presenter: P) -> Self {
        Self { store, presenter }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_parts(self) -> (S, P) {
        (self.store, self.presenter)
    }

    pub fn render_table(&mut self) -> RenderOutcome {
        let fetched = self.fetch();
        if let Some(failure) = fetched.failure {
            self.presenter.render_table(&[]);
            self.report_load_failure(&failure);
            return RenderOutcome::LoadFailed(failure);
        }
        let rows = table_rows(&fetched.records);
        self.presenter.render_table(&rows);
        RenderOutcome::Rendered { rows: rows.len() }
    }

    pub fn view(&mut self, target: &RecordTarget) -> ViewOutcome {
        let fetched = self.fetch();
        if let Some(failure) = fetched.failure {
            self.report_load_failure(&failure);
            return ViewOutcome::LoadFailed(failure);
        }
        let Some(index) = target.resolve(&fetched.records) else {
            self.report_not_found(target);
            return ViewOutcome::NotFound;
        };
        let detail = record_detail(index, &fetched.records[index]);
        self.presenter.open_detail_view(&detail);
        ViewOutcome::Opened(detail)
    }

    /// No edit interaction exists; the intent is logged and nothing else happens.
    pub fn edit(&mut self, target: &RecordTarget) -> EditOutcome {
        request_edit(target)
    }

    pub fn delete(&mut self, target: &RecordTarget) -> DeleteOutcome {
        let fetched = self.fetch();
        if let Some(failure) = fetched.failure {
            self.report_load_failure(&failure);
            return DeleteOutcome::LoadFailed(failure);
        }
        let Some(index) = target.resolve(&fetched.records) else {
            self.report_not_found(target);
            return DeleteOutcome::NotFound;
        };
        let name = fetched.records[index].display_name().to_string();

        let prompt = format!(
            "Are you sure you want to delete the record for {name}? This action cannot be undone."
        );
        if self.presenter.confirm(&prompt) == Confirmation::Cancelled {
            return DeleteOutcome::Cancelled;
        }

        self.presenter.show_loading(true);
        let deleted = self.store.delete(index);
        self.presenter.show_loading(false);

        if !deleted {
            self.presenter
                .show_notification(DELETE_FAILED_MESSAGE, NotificationKind::Error);
            return DeleteOutcome::Failed;
        }
        self.presenter.show_notification(
            &format!("Record for {name} has been deleted."),
            NotificationKind::Success,
        );
        self.render_table();
        DeleteOutcome::Deleted { index }
    }

    pub fn submit_new(&mut self, form: &FormInput) -> SubmitOutcome {
        if let Some(errors) = self.reject_invalid(form) {
            return SubmitOutcome::Invalid(errors);
        }
        let record = form.to_record();

        self.presenter.show_loading(true);
        let added = self.store.add(&record);
        self.presenter.show_loading(false);

        if !added {
            self.presenter
                .show_notification(ADD_FAILED_MESSAGE, NotificationKind::Error);
            return SubmitOutcome::Failed;
        }
        self.presenter.show_notification(
            &format!("Record for {} has been added.", record.display_name()),
            NotificationKind::Success,
        );
        self.render_table();
        SubmitOutcome::Saved { index: None }
    }

    pub fn submit_update(&mut self, target: &RecordTarget, form: &FormInput) -> SubmitOutcome {
        if let Some(errors) = self.reject_invalid(form) {
            return SubmitOutcome::Invalid(errors);
        }
        let fetched = self.fetch();
        if let Some(failure) = fetched.failure {
            self.report_load_failure(&failure);
            return SubmitOutcome::LoadFailed(failure);
        }
        let Some(index) = target.resolve(&fetched.records) else {
            self.report_not_found(target);
            return SubmitOutcome::NotFound;
        };
        let record = form.to_record();

        self.presenter.show_loading(true);
        let updated = self.store.update(index, &record);
        self.presenter.show_loading(false);

        if !updated {
            self.presenter
                .show_notification(UPDATE_FAILED_MESSAGE, NotificationKind::Error);
            return SubmitOutcome::Failed;
        }
        self.presenter.show_notification(
            &format!("Record for {} has been updated.", record.display_name()),
            NotificationKind::Success,
        );
        self.render_table();
        SubmitOutcome::Saved { index: Some(index) }
    }

    fn fetch(&mut self) -> Fetched {
        let mark = self.store.diagnostics().next_seq();
        self.presenter.show_loading(true);
        let records = self.store.load_all();
        self.presenter.show_loading(false);
        let failure = self
            .store
            .diagnostics()
            .since(mark)
            .into_iter()
            .find(|diagnostic| diagnostic.operation == Operation::LoadAll);
        Fetched { records, failure }
    }

    fn reject_invalid(&mut self, form: &FormInput) -> Option<Vec<FormError>> {
        let errors = validate_form(form);
        if errors.is_empty() {
            return None;
        }
        for error in &errors {
            self.presenter
                .show_notification(error.message(), NotificationKind::Error);
        }
        Some(errors)
    }

    fn report_load_failure(&mut self, failure: &Diagnostic) {
        let message = if failure.is_rejection() {
            failure.message.as_str()
        } else {
            LOAD_FAILED_MESSAGE
        };
        self.presenter
            .show_notification(message, NotificationKind::Error);
    }

    fn report_not_found(&mut self, target: &RecordTarget) {
        tracing::debug!(target_record = %target, "target did not resolve");
        self.presenter
            .show_notification(NOT_FOUND_MESSAGE, NotificationKind::Error);
    }
}

/// Edit handling that needs neither a store nor a presenter.
pub fn request_edit(target: &RecordTarget) -> EditOutcome {
    tracing::info!(target_record = %target, "edit requested");
    EditOutcome::Unsupported
}

#[cfg(test)]
mod tests {
    use super::{
        DeleteOutcome, EditOutcome, RecordTarget, RecordWorkflow, RenderOutcome, SubmitOutcome,
        ViewOutcome, request_edit,
    };
    use crate::api::diagnostics::{DiagnosticLog, Operation};
    use crate::api::presenter::{Confirmation, NotificationKind, Presenter};
    use crate::api::store::RecordStore;
    use crate::api::view::{RecordDetail, RecordRow};
    use crate::core::error::{Error, ErrorKind};
    use crate::core::key::RecordKey;
    use crate::core::record::{ExchangeRecord, FormInput};
    use crate::core::validate::FormError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        LoadAll,
        Add(ExchangeRecord),
        Update(usize),
        Delete(usize),
    }

    enum Load {
        Records(Vec<ExchangeRecord>),
        Fail(ErrorKind, &'static str),
    }

    struct FakeStore {
        loads: RefCell<VecDeque<Load>>,
        mutation_ok: bool,
        calls: RefCell<Vec<Call>>,
        diagnostics: DiagnosticLog,
    }

    impl FakeStore {
        fn new(loads: Vec<Load>) -> Self {
            Self {
                loads: RefCell::new(loads.into()),
                mutation_ok: true,
                calls: RefCell::new(Vec::new()),
                diagnostics: DiagnosticLog::new(),
            }
        }

        fn failing_mutations(mut self) -> Self {
            self.mutation_ok = false;
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl RecordStore for FakeStore {
        fn load_all(&self) -> Vec<ExchangeRecord> {
            self.calls.borrow_mut().push(Call::LoadAll);
            match self.loads.borrow_mut().pop_front() {
                Some(Load::Records(records)) => records,
                Some(Load::Fail(kind, message)) => {
                    self.diagnostics.record(
                        Operation::LoadAll,
                        None,
                        &Error::new(kind).with_message(message),
                    );
                    Vec::new()
                }
                None => Vec::new(),
            }
        }

        fn add(&self, record: &ExchangeRecord) -> bool {
            self.calls.borrow_mut().push(Call::Add(record.clone()));
            self.mutation_ok
        }

        fn update(&self, index: usize, _record: &ExchangeRecord) -> bool {
            self.calls.borrow_mut().push(Call::Update(index));
            self.mutation_ok
        }

        fn delete(&self, index: usize) -> bool {
            self.calls.borrow_mut().push(Call::Delete(index));
            self.mutation_ok
        }

        fn diagnostics(&self) -> &DiagnosticLog {
            &self.diagnostics
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Notify(String, NotificationKind),
        Loading(bool),
        Confirm(String),
        Detail(String),
        Table(Vec<String>),
    }

    struct RecordingPresenter {
        answer: Confirmation,
        events: Vec<Event>,
    }

    impl RecordingPresenter {
        fn answering(answer: Confirmation) -> Self {
            Self {
                answer,
                events: Vec::new(),
            }
        }

        fn notifications(&self) -> Vec<(String, NotificationKind)> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    Event::Notify(message, kind) => Some((message.clone(), *kind)),
                    _ => None,
                })
                .collect()
        }

        fn tables(&self) -> Vec<Vec<String>> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    Event::Table(names) => Some(names.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn show_notification(&mut self, message: &str, kind: NotificationKind) {
            self.events.push(Event::Notify(message.to_string(), kind));
        }

        fn show_loading(&mut self, visible: bool) {
            self.events.push(Event::Loading(visible));
        }

        fn confirm(&mut self, message: &str) -> Confirmation {
            self.events.push(Event::Confirm(message.to_string()));
            self.answer
        }

        fn open_detail_view(&mut self, detail: &RecordDetail) {
            self.events.push(Event::Detail(detail.title.clone()));
        }

        fn render_table(&mut self, rows: &[RecordRow]) {
            self.events
                .push(Event::Table(rows.iter().map(|row| row.name.clone()).collect()));
        }
    }

    fn record(name: &str) -> ExchangeRecord {
        ExchangeRecord {
            name: Some(name.to_string()),
            ..ExchangeRecord::default()
        }
    }

    fn three() -> Vec<ExchangeRecord> {
        vec![record("Ada"), record("Grace"), record("Linus")]
    }

    fn workflow(
        loads: Vec<Load>,
        answer: Confirmation,
    ) -> RecordWorkflow<FakeStore, RecordingPresenter> {
        RecordWorkflow::new(FakeStore::new(loads), RecordingPresenter::answering(answer))
    }

    fn valid_form(name: &str) -> FormInput {
        FormInput {
            name: name.to_string(),
            student_id: "64010123".to_string(),
            email: "someone@example.ac.th".to_string(),
            budget: "1000".to_string(),
            from_date: "2024-06-01".to_string(),
            to_date: "2024-08-31".to_string(),
            ..FormInput::default()
        }
    }

    #[test]
    fn render_shows_loading_around_fetch() {
        let mut flow = workflow(vec![Load::Records(three())], Confirmation::Confirmed);
        assert_eq!(flow.render_table(), RenderOutcome::Rendered { rows: 3 });
        assert_eq!(
            flow.presenter().events,
            vec![
                Event::Loading(true),
                Event::Loading(false),
                Event::Table(vec!["Ada".into(), "Grace".into(), "Linus".into()]),
            ]
        );
    }

    #[test]
    fn render_load_failure_shows_empty_table_and_error() {
        let mut flow = workflow(
            vec![Load::Fail(ErrorKind::Transport, "request failed")],
            Confirmation::Confirmed,
        );
        let outcome = flow.render_table();
        assert!(matches!(outcome, RenderOutcome::LoadFailed(ref d) if d.kind == ErrorKind::Transport));
        assert_eq!(flow.presenter().tables(), vec![Vec::<String>::new()]);
        assert_eq!(
            flow.presenter().notifications(),
            vec![(
                "Error loading data from server".to_string(),
                NotificationKind::Error
            )]
        );
    }

    #[test]
    fn render_rejection_reports_server_text() {
        let mut flow = workflow(
            vec![Load::Fail(ErrorKind::Rejected, "Sheet not found")],
            Confirmation::Confirmed,
        );
        flow.render_table();
        assert_eq!(
            flow.presenter().notifications(),
            vec![("Sheet not found".to_string(), NotificationKind::Error)]
        );
    }

    #[test]
    fn delete_end_to_end_refetches_fresh_list() {
        let after = vec![record("Ada"), record("Linus")];
        let mut flow = workflow(
            vec![Load::Records(three()), Load::Records(after)],
            Confirmation::Confirmed,
        );
        let outcome = flow.delete(&RecordTarget::Index(1));
        assert_eq!(outcome, DeleteOutcome::Deleted { index: 1 });
        assert_eq!(
            flow.store().calls(),
            vec![Call::LoadAll, Call::Delete(1), Call::LoadAll]
        );
        let presenter = flow.presenter();
        assert!(presenter.events.contains(&Event::Confirm(
            "Are you sure you want to delete the record for Grace? This action cannot be undone."
                .to_string()
        )));
        assert_eq!(
            presenter.notifications(),
            vec![(
                "Record for Grace has been deleted.".to_string(),
                NotificationKind::Success
            )]
        );
        assert_eq!(
            presenter.tables(),
            vec![vec!["Ada".to_string(), "Linus".to_string()]]
        );
    }

    #[test]
    fn delete_beyond_length_makes_no_remote_call() {
        let mut flow = workflow(vec![Load::Records(three())], Confirmation::Confirmed);
        assert_eq!(flow.delete(&RecordTarget::Index(3)), DeleteOutcome::NotFound);
        assert_eq!(flow.store().calls(), vec![Call::LoadAll]);
        assert_eq!(
            flow.presenter().notifications(),
            vec![("Record not found".to_string(), NotificationKind::Error)]
        );
    }

    #[test]
    fn delete_cancelled_stops_before_remote_call() {
        let mut flow = workflow(vec![Load::Records(three())], Confirmation::Cancelled);
        assert_eq!(flow.delete(&RecordTarget::Index(0)), DeleteOutcome::Cancelled);
        assert_eq!(flow.store().calls(), vec![Call::LoadAll]);
        assert!(flow.presenter().notifications().is_empty());
    }

    #[test]
    fn delete_failure_notifies_without_refresh() {
        let store = FakeStore::new(vec![Load::Records(three())]).failing_mutations();
        let mut flow =
            RecordWorkflow::new(store, RecordingPresenter::answering(Confirmation::Confirmed));
        assert_eq!(flow.delete(&RecordTarget::Index(2)), DeleteOutcome::Failed);
        assert_eq!(flow.store().calls(), vec![Call::LoadAll, Call::Delete(2)]);
        assert_eq!(
            flow.presenter().notifications(),
            vec![("Error deleting record.".to_string(), NotificationKind::Error)]
        );
        assert!(flow.presenter().tables().is_empty());
    }

    #[test]
    fn key_target_resolves_against_fresh_listing() {
        let key = RecordKey::of(&record("Linus"));
        let shifted = vec![record("Linus"), record("Ada")];
        let mut flow = workflow(
            vec![Load::Records(shifted), Load::Records(vec![record("Ada")])],
            Confirmation::Confirmed,
        );
        assert_eq!(
            flow.delete(&RecordTarget::Key(key)),
            DeleteOutcome::Deleted { index: 0 }
        );
        assert_eq!(flow.store().calls()[1], Call::Delete(0));
    }

    #[test]
    fn stale_key_reports_not_found_without_remote_call() {
        let key = RecordKey::of(&record("Margaret"));
        let mut flow = workflow(vec![Load::Records(three())], Confirmation::Confirmed);
        assert_eq!(flow.delete(&RecordTarget::Key(key)), DeleteOutcome::NotFound);
        assert_eq!(flow.store().calls(), vec![Call::LoadAll]);
    }

    #[test]
    fn view_opens_detail_or_reports_missing() {
        let mut flow = workflow(
            vec![Load::Records(three()), Load::Records(three())],
            Confirmation::Confirmed,
        );
        let outcome = flow.view(&RecordTarget::Index(0));
        assert!(matches!(outcome, ViewOutcome::Opened(ref d) if d.title == "Student Details - Ada"));
        assert_eq!(flow.view(&RecordTarget::Index(9)), ViewOutcome::NotFound);
        assert!(
            flow.presenter()
                .events
                .contains(&Event::Detail("Student Details - Ada".to_string()))
        );
        assert_eq!(
            flow.presenter().notifications(),
            vec![("Record not found".to_string(), NotificationKind::Error)]
        );
    }

    #[test]
    fn view_load_failure_is_reported() {
        let mut flow = workflow(
            vec![Load::Fail(ErrorKind::Protocol, "invalid response json")],
            Confirmation::Confirmed,
        );
        assert!(matches!(
            flow.view(&RecordTarget::Index(0)),
            ViewOutcome::LoadFailed(_)
        ));
    }

    #[test]
    fn edit_is_unsupported_and_touches_nothing() {
        let mut flow = workflow(vec![Load::Records(three())], Confirmation::Confirmed);
        assert_eq!(flow.edit(&RecordTarget::Index(0)), EditOutcome::Unsupported);
        assert_eq!(request_edit(&RecordTarget::Index(9)), EditOutcome::Unsupported);
        assert!(flow.store().calls().is_empty());
        assert!(flow.presenter().events.is_empty());
    }

    #[test]
    fn invalid_submission_never_reaches_store() {
        let mut flow = workflow(Vec::new(), Confirmation::Confirmed);
        let form = FormInput {
            name: String::new(),
            email: "nope".to_string(),
            ..valid_form("x")
        };
        assert_eq!(
            flow.submit_new(&form),
            SubmitOutcome::Invalid(vec![FormError::NameRequired, FormError::InvalidEmail])
        );
        assert!(flow.store().calls().is_empty());
        assert_eq!(
            flow.presenter().notifications(),
            vec![
                ("Full name is required".to_string(), NotificationKind::Error),
                (
                    "Valid email address is required".to_string(),
                    NotificationKind::Error
                ),
            ]
        );
    }

    #[test]
    fn submit_new_adds_then_refreshes() {
        let mut flow = workflow(vec![Load::Records(vec![record("Ada")])], Confirmation::Confirmed);
        assert_eq!(
            flow.submit_new(&valid_form("Ada")),
            SubmitOutcome::Saved { index: None }
        );
        let calls = flow.store().calls();
        assert!(matches!(&calls[0], Call::Add(added) if added.display_name() == "Ada"));
        assert_eq!(calls[1], Call::LoadAll);
        assert_eq!(
            flow.presenter().notifications(),
            vec![(
                "Record for Ada has been added.".to_string(),
                NotificationKind::Success
            )]
        );
    }

    #[test]
    fn submit_update_resolves_target_first() {
        let mut flow = workflow(
            vec![Load::Records(three()), Load::Records(three())],
            Confirmation::Confirmed,
        );
        assert_eq!(
            flow.submit_update(&RecordTarget::Index(2), &valid_form("Linus T.")),
            SubmitOutcome::Saved { index: Some(2) }
        );
        assert_eq!(
            flow.store().calls(),
            vec![Call::LoadAll, Call::Update(2), Call::LoadAll]
        );

        let mut stale = workflow(vec![Load::Records(three())], Confirmation::Confirmed);
        assert_eq!(
            stale.submit_update(&RecordTarget::Index(5), &valid_form("Nobody")),
            SubmitOutcome::NotFound
        );
        assert_eq!(stale.store().calls(), vec![Call::LoadAll]);
    }

    #[test]
    fn submit_failure_notifies() {
        let store = FakeStore::new(Vec::new()).failing_mutations();
        let mut flow =
            RecordWorkflow::new(store, RecordingPresenter::answering(Confirmation::Confirmed));
        assert_eq!(flow.submit_new(&valid_form("Ada")), SubmitOutcome::Failed);
        assert_eq!(
            flow.presenter().notifications(),
            vec![("Error adding record.".to_string(), NotificationKind::Error)]
        );
    }

    #[test]
    fn targets_parse_from_text() {
        assert_eq!("3".parse::<RecordTarget>().expect("index"), RecordTarget::Index(3));
        let key = RecordKey::of(&record("Ada"));
        let parsed = format!("@{key}").parse::<RecordTarget>().expect("key");
        assert_eq!(parsed, RecordTarget::Key(key.clone()));
        assert_eq!(parsed.to_string(), format!("@{key}"));
        assert_eq!(
            "@nothex".parse::<RecordTarget>().expect_err("err").kind(),
            ErrorKind::Usage
        );
        assert_eq!(
            "-1".parse::<RecordTarget>().expect_err("err").kind(),
            ErrorKind::Usage
        );
    }
}
