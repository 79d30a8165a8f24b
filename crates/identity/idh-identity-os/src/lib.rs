//! Identity provider that resolves every federated pair to the invoking
//! process's own OS account.
//!
//! This is the single-user harmonization backend: whatever issuer/subject the
//! caller presents, the answer is the passwd entry of the real uid the
//! process runs as. Useful for debugging and single-user deployments; a real
//! multi-user backend would key the lookup on the pair instead.

use async_trait::async_trait;
use idh_identity_core::{
    FederatedUserId, HarmonizedIdentity, IdentityError, IdentityProvider, IdentityResult,
};
use nix::unistd::{User, getuid};

#[derive(Debug, Clone, Default)]
pub struct OsUserProvider;

impl OsUserProvider {
    pub fn new() -> Self {
        Self
    }

    /// Reads the passwd entry for the process's real uid.
    fn current_user(&self) -> IdentityResult<User> {
        let uid = getuid();

        User::from_uid(uid)
            .map_err(|e| IdentityError::UserDatabase(e.to_string()))?
            .ok_or_else(|| IdentityError::UnknownUid(uid.as_raw()))
    }
}

#[async_trait]
impl IdentityProvider for OsUserProvider {
    fn provider_id(&self) -> &str {
        "os-user"
    }

    async fn lookup(
        &self,
        issuer: &str,
        subject: &str,
        create: bool,
    ) -> IdentityResult<HarmonizedIdentity> {
        if create {
            tracing::debug!(issuer, subject, "provisioning not supported, resolving to the current user");
        }

        let user = self.current_user()?;

        Ok(HarmonizedIdentity {
            uid: user.name,
            uid_number: user.uid.as_raw(),
            gid_number: user.gid.as_raw(),
            home_directory: user.dir.to_string_lossy().into_owned(),
            user_ids: vec![FederatedUserId::new(issuer, subject)],
        })
    }
}
