use clap::Parser;
use idh_identity_core::IdentityProvider;

use crate::dispatch::dispatch;
use crate::report::HookReport;

/// Resolve a federated OpenID Connect identity to a local OS account.
///
/// Help and version flags are disabled: the hook protocol owns the entire
/// argv surface, so a caller-supplied `--help` must dispatch as an unknown
/// command instead of printing usage.
#[derive(Parser, Debug, Clone)]
#[command(name = "idh-hook")]
#[command(about = "Identity harmonization hook: maps issuer/subject pairs to local accounts")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Raw hook invocation, e.g. `OpenIdConnect <issuer> <subject>`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub argv: Vec<String>,
}

impl Args {
    pub async fn run(&self, provider: &dyn IdentityProvider) -> HookReport {
        dispatch(provider, &self.argv).await
    }
}
