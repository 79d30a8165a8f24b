//! The command dispatcher: one recognized verb, one catch-all boundary.

use idh_identity_core::{HarmonizedIdentity, IdentityProvider};

use crate::error::HookError;
use crate::report::HookReport;

/// The one verb this hook recognizes. Matched case-sensitively and exactly;
/// `openidconnect` is an unknown command.
pub const OPENID_CONNECT: &str = "OpenIdConnect";

/// Dispatches a raw argv against the provider and always produces a report.
///
/// Failures under the recognized verb (missing issuer/subject, lookup
/// errors) are converted to an exception report here; they never propagate.
pub async fn dispatch(provider: &dyn IdentityProvider, argv: &[String]) -> HookReport {
    tracing::debug!(command = ?argv.first(), "dispatching hook invocation");

    match argv.first().map(String::as_str) {
        Some(OPENID_CONNECT) => match open_id_connect(provider, &argv[1..]).await {
            Ok(identity) => HookReport::Identity(identity),
            Err(e) => HookReport::exception(&anyhow::Error::from(e)),
        },
        _ => HookReport::unknown_command(),
    }
}

async fn open_id_connect(
    provider: &dyn IdentityProvider,
    rest: &[String],
) -> Result<HarmonizedIdentity, HookError> {
    let issuer = rest.first().ok_or(HookError::MissingArgument("issuer"))?;
    let subject = rest.get(1).ok_or(HookError::MissingArgument("subject"))?;

    // `create` is passed through as the hook protocol specifies; providers
    // without provisioning ignore it.
    Ok(provider.lookup(issuer, subject, true).await?)
}
