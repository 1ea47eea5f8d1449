use serde::{Deserialize, Serialize};

/// Features advertised by the management server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub version: String,
    pub security_groups_enabled: bool,
    pub user_public_template_enabled: bool,
    pub project_invite_required: bool,
    pub allow_user_create_projects: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            security_groups_enabled: false,
            user_public_template_enabled: true,
            project_invite_required: false,
            allow_user_create_projects: true,
        }
    }
}
