//! Identity-harmonization hook.
//!
//! A single-shot command-line hook: it recognizes one verb,
//! `OpenIdConnect <issuer> <subject>`, resolves the pair through an
//! [`idh_identity_core::IdentityProvider`], and writes exactly one
//! newline-terminated JSON object to stdout. Every failure on the recognized
//! path is converted into a structured error report; nothing escapes as a
//! crash, and the process exits 0 for all report shapes because callers
//! parse stdout and ignore the exit status.

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod report;

pub use cli::Args;
pub use error::HookError;
pub use report::{ErrorReport, HookReport};
