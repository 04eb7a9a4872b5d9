//! Purpose: Hold top-level CLI command dispatch for `exchange-desk`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and map subcommands onto workflow actions.
//! Invariants: Workflow outcomes that already notified the user return an exit code, not an error.
//! Invariants: `validate` and `config` never contact the endpoint.

use super::*;
use crate::terminal::TerminalPresenter;
use exchange_desk::api::{
    DeleteOutcome, EditOutcome, RecordStore, RecordTarget, RecordWorkflow, RemoteRecordStore,
    RenderOutcome, SubmitOutcome, ViewOutcome, request_edit,
};
use exchange_desk::core::validate::validate_form;

type TerminalWorkflow = RecordWorkflow<RemoteRecordStore, TerminalPresenter>;

pub(super) fn dispatch_command(command: Command, settings: &Settings) -> Result<RunOutcome, Error> {
    let color_mode = settings.color_mode;
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "exchange-desk", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Config { command } => match command {
            ConfigCommand::Path => {
                println!("{}", settings.config_path.display());
                Ok(RunOutcome::ok())
            }
            ConfigCommand::Show => {
                let file = settings.load_config_file()?;
                let resolved = match settings.endpoint_config() {
                    Ok(config) => Some(config),
                    Err(_) if settings.endpoint.is_none() && file.endpoint.is_none() => None,
                    Err(err) => return Err(err),
                };
                emit_json(
                    json!({
                        "config": {
                            "path": settings.config_path.display().to_string(),
                            "exists": settings.config_path.exists(),
                            "endpoint": resolved.as_ref().map(|c| c.endpoint().to_string()),
                            "timeout_ms": resolved
                                .as_ref()
                                .map(|c| c.timeout().as_millis() as u64),
                        }
                    }),
                    color_mode,
                );
                Ok(RunOutcome::ok())
            }
        },
        Command::Validate { form } => {
            let input = read_form_input(&form)?;
            let errors = validate_form(&input);
            let listed = errors
                .iter()
                .map(|error| json!({ "field": error.field(), "message": error.message() }))
                .collect::<Vec<_>>();
            emit_json(
                json!({ "valid": errors.is_empty(), "errors": listed }),
                color_mode,
            );
            if errors.is_empty() {
                Ok(RunOutcome::ok())
            } else {
                Ok(RunOutcome::with_code(to_exit_code(ErrorKind::Usage)))
            }
        }
        Command::List { json } => {
            let presenter = TerminalPresenter::new("list", color_mode).json(json);
            let mut workflow = open_workflow(settings, presenter)?;
            match workflow.render_table() {
                RenderOutcome::Rendered { .. } => Ok(RunOutcome::ok()),
                RenderOutcome::LoadFailed(failure) => {
                    Ok(RunOutcome::with_code(to_exit_code(failure.kind)))
                }
            }
        }
        Command::View { target, json } => {
            let target = target.parse::<RecordTarget>()?;
            let presenter = TerminalPresenter::new("view", color_mode).json(json);
            let mut workflow = open_workflow(settings, presenter)?;
            match workflow.view(&target) {
                ViewOutcome::Opened(_) => Ok(RunOutcome::ok()),
                ViewOutcome::NotFound => Ok(RunOutcome::with_code(to_exit_code(
                    ErrorKind::NotFound,
                ))),
                ViewOutcome::LoadFailed(failure) => {
                    Ok(RunOutcome::with_code(to_exit_code(failure.kind)))
                }
            }
        }
        Command::Delete { target, yes } => {
            let target = target.parse::<RecordTarget>()?;
            if !yes && !io::stdin().is_terminal() {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("delete needs confirmation")
                    .with_hint("Re-run with --yes to delete without a prompt."));
            }
            let presenter = TerminalPresenter::new("delete", color_mode).assume_yes(yes);
            let mut workflow = open_workflow(settings, presenter)?;
            match workflow.delete(&target) {
                DeleteOutcome::Deleted { .. } | DeleteOutcome::Cancelled => Ok(RunOutcome::ok()),
                DeleteOutcome::NotFound => Ok(RunOutcome::with_code(to_exit_code(
                    ErrorKind::NotFound,
                ))),
                DeleteOutcome::Failed => Ok(RunOutcome::with_code(failure_code(&workflow))),
                DeleteOutcome::LoadFailed(failure) => {
                    Ok(RunOutcome::with_code(to_exit_code(failure.kind)))
                }
            }
        }
        Command::Edit { target } => {
            let target = target.parse::<RecordTarget>()?;
            match request_edit(&target) {
                EditOutcome::Unsupported => Err(Error::new(ErrorKind::Usage)
                    .with_message("interactive editing is not supported")
                    .with_hint(format!(
                        "Use `exchange-desk update {target} --form <PATH>` to replace the record."
                    ))),
            }
        }
        Command::Add { form } => {
            let input = read_form_input(&form)?;
            let presenter = TerminalPresenter::new("add", color_mode);
            let mut workflow = open_workflow(settings, presenter)?;
            let outcome = workflow.submit_new(&input);
            Ok(submit_exit(outcome, &workflow))
        }
        Command::Update { target, form } => {
            let target = target.parse::<RecordTarget>()?;
            let input = read_form_input(&form)?;
            let presenter = TerminalPresenter::new("update", color_mode);
            let mut workflow = open_workflow(settings, presenter)?;
            let outcome = workflow.submit_update(&target, &input);
            Ok(submit_exit(outcome, &workflow))
        }
    }
}

fn open_workflow(
    settings: &Settings,
    presenter: TerminalPresenter,
) -> Result<TerminalWorkflow, Error> {
    let config = settings.endpoint_config()?;
    tracing::debug!(
        endpoint = %config.endpoint(),
        timeout_ms = config.timeout().as_millis() as u64,
        "resolved endpoint"
    );
    Ok(RecordWorkflow::new(RemoteRecordStore::new(config), presenter))
}

fn submit_exit(outcome: SubmitOutcome, workflow: &TerminalWorkflow) -> RunOutcome {
    match outcome {
        SubmitOutcome::Saved { .. } => RunOutcome::ok(),
        SubmitOutcome::Invalid(_) => RunOutcome::with_code(to_exit_code(ErrorKind::Usage)),
        SubmitOutcome::NotFound => RunOutcome::with_code(to_exit_code(ErrorKind::NotFound)),
        SubmitOutcome::Failed => RunOutcome::with_code(failure_code(workflow)),
        SubmitOutcome::LoadFailed(failure) => RunOutcome::with_code(to_exit_code(failure.kind)),
    }
}

/// Exit code for the most recent absorbed remote failure.
fn failure_code(workflow: &TerminalWorkflow) -> i32 {
    workflow
        .store()
        .diagnostics()
        .entries()
        .last()
        .map(|diagnostic| to_exit_code(diagnostic.kind))
        .unwrap_or_else(|| to_exit_code(ErrorKind::Rejected))
}
