//! The hook's output surface: one JSON object per invocation.

use std::io::Write;

use idh_identity_core::HarmonizedIdentity;
use serde::Serialize;

use crate::error::HookError;

/// The single JSON object a hook invocation writes to stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HookReport {
    Identity(HarmonizedIdentity),
    Error(ErrorReport),
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl HookReport {
    /// Report for an absent or unrecognized command word.
    pub fn unknown_command() -> Self {
        Self::Error(ErrorReport {
            error: "unknown command".to_string(),
            details: None,
            trace: None,
        })
    }

    /// Report for a failure on the recognized command path. `details`
    /// carries the error message, `trace` the formatted error chain.
    pub fn exception(err: &anyhow::Error) -> Self {
        Self::Error(ErrorReport {
            error: "exception".to_string(),
            details: Some(err.to_string()),
            trace: Some(format!("{err:?}")),
        })
    }
}

/// Writes the report as one newline-terminated JSON object.
///
/// `serde_json::to_string` never emits raw newlines, so the report is never
/// split across lines regardless of what the caller put in issuer/subject.
pub fn write_report<W: Write>(writer: &mut W, report: &HookReport) -> Result<(), HookError> {
    let line = serde_json::to_string(report)?;
    writeln!(writer, "{line}")?;
    Ok(())
}
