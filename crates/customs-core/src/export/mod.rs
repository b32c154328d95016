//! Exports of the result record to external services.

mod form;

pub use form::FormPrefill;
