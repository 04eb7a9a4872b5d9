// Core modules: record model, validation, formatting, keys, and errors.
pub mod error;
pub mod format;
pub mod key;
pub mod record;
pub mod validate;
