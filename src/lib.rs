//! Purpose: Library behind the `exchange-desk` CLI and its tests.
//! Exports: `core` (records, validation, formatting, errors), `api` (store, workflow), `config`.
//! Role: Typed client for the spreadsheet-backed exchange-program endpoint.
//! Invariants: The endpoint is always injected through `config::EndpointConfig`.
pub mod api;
pub mod config;
pub mod core;
pub mod notice;
