use idh_identity_core::IdentityError;
use thiserror::Error;

/// Errors raised on the recognized command path. All of them are caught at
/// the dispatch boundary and reported as structured JSON, never propagated
/// as a process failure.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Missing {0} argument for OpenIdConnect")]
    MissingArgument(&'static str),

    #[error("Identity lookup failed: {0}")]
    Lookup(#[from] IdentityError),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    ReportWrite(#[from] std::io::Error),
}
