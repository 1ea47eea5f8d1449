//! updateTemplatePermissions / updateIsoPermissions
//!
//! Both commands share one parameter schema and one execution path. A
//! `PermissionTarget` carries the per-command differences.

use crate::domain::commands::{ApiCommand, BoundCommand, CommandFactory};
use crate::domain::ports::ManagementService;
use crate::domain::responses::{ResponsePayload, SuccessResponse};
use crate::domain::{
    ApiError, ApiResponse, BoundParams, CallContext, EntityKind, EntityRef, OwnerRule,
    ParamSpec, ParamType, PermissionOperation, PermissionUpdate, Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const PARAMETERS: &[ParamSpec] = &[
    ParamSpec::required("id", ParamType::Long, "The template or ISO ID"),
    ParamSpec::optional(
        "accounts",
        ParamType::List,
        "Accounts to grant or revoke launch permission for",
    ),
    ParamSpec::optional(
        "projectids",
        ParamType::List,
        "Projects to grant or revoke launch permission for",
    ),
    ParamSpec::optional(
        "isextractable",
        ParamType::Boolean,
        "True if the image is extractable",
    ),
    ParamSpec::optional(
        "isfeatured",
        ParamType::Boolean,
        "True for featured images",
    ),
    ParamSpec::optional(
        "ispublic",
        ParamType::Boolean,
        "True for public images",
    ),
    ParamSpec::optional(
        "op",
        ParamType::String,
        "Permission operator: add, remove or reset",
    ),
];

/// Per-command hooks for the shared permission update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionTarget {
    pub api_name: &'static str,
    pub response_name: &'static str,
    pub entity_kind: EntityKind,
    /// Noun used in log lines and failure messages
    pub log_target: &'static str,
}

impl PermissionTarget {
    pub const TEMPLATE: PermissionTarget = PermissionTarget {
        api_name: "updateTemplatePermissions",
        response_name: "updatetemplatepermissionsresponse",
        entity_kind: EntityKind::Template,
        log_target: "template",
    };

    pub const ISO: PermissionTarget = PermissionTarget {
        api_name: "updateIsoPermissions",
        response_name: "updateisopermissionsresponse",
        entity_kind: EntityKind::Iso,
        log_target: "iso",
    };
}

pub struct UpdatePermissionsFactory {
    target: PermissionTarget,
    management: Arc<dyn ManagementService>,
}

impl UpdatePermissionsFactory {
    pub fn new(target: PermissionTarget, management: Arc<dyn ManagementService>) -> Self {
        Self { target, management }
    }

    pub fn templates(management: Arc<dyn ManagementService>) -> Self {
        Self::new(PermissionTarget::TEMPLATE, management)
    }

    pub fn isos(management: Arc<dyn ManagementService>) -> Self {
        Self::new(PermissionTarget::ISO, management)
    }

    fn permission_update(&self, params: &BoundParams) -> Result<PermissionUpdate> {
        let mut update = PermissionUpdate::new(params.require_long("id")?, self.target.entity_kind);
        update.accounts = params.list("accounts").map(<[String]>::to_vec).unwrap_or_default();
        update.project_ids = params.list("projectids").map(<[String]>::to_vec).unwrap_or_default();
        update.is_extractable = params.boolean("isextractable");
        update.is_featured = params.boolean("isfeatured");
        update.is_public = params.boolean("ispublic");
        update.operation = params
            .string("op")
            .map(str::parse::<PermissionOperation>)
            .transpose()?;

        if !update.accounts.is_empty() && !update.project_ids.is_empty() {
            return Err(ApiError::Validation(
                "Accounts and project ids can't be specified together".to_string(),
            ));
        }
        let has_lists = !update.accounts.is_empty() || !update.project_ids.is_empty();
        if has_lists && update.operation.is_none() {
            return Err(ApiError::Validation(
                "Operation must be specified when accounts or project ids are given".to_string(),
            ));
        }

        Ok(update)
    }
}

#[async_trait]
impl CommandFactory for UpdatePermissionsFactory {
    fn api_name(&self) -> &'static str {
        self.target.api_name
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMETERS
    }

    async fn build(&self, params: &BoundParams, _ctx: &CallContext) -> Result<BoundCommand> {
        Ok(BoundCommand::Sync(Box::new(UpdatePermissionsCommand {
            target: self.target,
            management: self.management.clone(),
            update: self.permission_update(params)?,
        })))
    }
}

struct UpdatePermissionsCommand {
    target: PermissionTarget,
    management: Arc<dyn ManagementService>,
    update: PermissionUpdate,
}

#[async_trait]
impl ApiCommand for UpdatePermissionsCommand {
    fn command_name(&self) -> &'static str {
        self.target.response_name
    }

    fn owner_rule(&self) -> OwnerRule {
        OwnerRule::Entity(EntityRef::new(self.target.entity_kind, self.update.id))
    }

    async fn execute(&self) -> Result<ApiResponse> {
        if !self
            .management
            .update_template_permissions(self.update.clone())
            .await?
        {
            return Err(ApiError::OperationFailed(format!(
                "Failed to update {} permissions",
                self.target.log_target
            )));
        }

        info!(
            image = self.target.log_target,
            id = self.update.id,
            operation = ?self.update.operation,
            "Permissions updated"
        );
        Ok(ApiResponse::new(
            self.target.response_name,
            ResponsePayload::Success(SuccessResponse::ok()),
        ))
    }
}
