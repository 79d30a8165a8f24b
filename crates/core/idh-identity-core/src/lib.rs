//! Core identity-harmonization traits and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("User database error: {0}")]
    UserDatabase(String),

    #[error("No user database entry for uid {0}")]
    UnknownUid(u32),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// One federated identity pair as it appears on the wire: `[issuer, subject]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedUserId(pub String, pub String);

impl FederatedUserId {
    pub fn new(issuer: impl Into<String>, subject: impl Into<String>) -> Self {
        Self(issuer.into(), subject.into())
    }

    pub fn issuer(&self) -> &str {
        &self.0
    }

    pub fn subject(&self) -> &str {
        &self.1
    }
}

/// A local account resolved from a federated identity.
///
/// Serializes to the hook wire format: `uid`, `uidNumber`, `gidNumber`,
/// `homeDirectory`, `userIds`. `user_ids` echoes the caller-supplied
/// issuer/subject pairs verbatim; nothing in this record is derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonizedIdentity {
    /// OS login name of the resolved account.
    pub uid: String,
    pub uid_number: u32,
    pub gid_number: u32,
    pub home_directory: String,
    /// The federated identities mapped to this account. Exactly one pair per
    /// lookup in the current providers.
    pub user_ids: Vec<FederatedUserId>,
}

/// A backend that maps federated issuer/subject pairs to local accounts.
///
/// Injected wherever an identity is resolved so tests can substitute a fixed
/// identity instead of switching OS users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    /// Resolve an issuer/subject pair to a local account.
    ///
    /// `create` asks the provider to provision the account if it does not
    /// exist yet. Providers without provisioning accept the flag and ignore
    /// it; it stays in the signature because the hook protocol reserves it.
    async fn lookup(
        &self,
        issuer: &str,
        subject: &str,
        create: bool,
    ) -> IdentityResult<HarmonizedIdentity>;
}

/// A provider that resolves every pair to the same fixed account.
pub struct StaticIdentityProvider {
    uid: String,
    uid_number: u32,
    gid_number: u32,
    home_directory: String,
}

impl StaticIdentityProvider {
    pub fn new(
        uid: impl Into<String>,
        uid_number: u32,
        gid_number: u32,
        home_directory: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            uid_number,
            gid_number,
            home_directory: home_directory.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn provider_id(&self) -> &str {
        "static"
    }

    async fn lookup(
        &self,
        issuer: &str,
        subject: &str,
        _create: bool,
    ) -> IdentityResult<HarmonizedIdentity> {
        Ok(HarmonizedIdentity {
            uid: self.uid.clone(),
            uid_number: self.uid_number,
            gid_number: self.gid_number,
            home_directory: self.home_directory.clone(),
            user_ids: vec![FederatedUserId::new(issuer, subject)],
        })
    }
}
