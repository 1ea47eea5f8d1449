use crate::domain::AccountId;
use serde::{Deserialize, Serialize};

/// An SSH key pair registered to an account
///
/// `private_key` is only populated on creation and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyPair {
    pub name: String,
    pub account_id: AccountId,
    pub fingerprint: String,
    pub public_key: String,
    #[serde(default, skip_serializing)]
    pub private_key: Option<String>,
}

impl SshKeyPair {
    /// Copy without private key material
    pub fn without_private_key(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }
}
