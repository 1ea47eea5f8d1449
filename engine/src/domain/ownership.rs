//! Entity-owner attribution
//!
//! Every command resolves to exactly one owning account. The rule is declared by the
//! command and evaluated by `OwnerResolver` before `execute()` runs.

use crate::domain::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-request caller information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Option<AccountId>,
}

impl CallContext {
    /// Context for a request with no authenticated user
    pub fn system() -> Self {
        Self { caller: None }
    }

    pub fn for_caller(caller: AccountId) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    /// The caller, or the system account when nobody is calling
    pub fn caller_or_system(&self) -> AccountId {
        self.caller.unwrap_or(AccountId::SYSTEM)
    }
}

/// Kind of entity whose owning account can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Template,
    Iso,
    VirtualMachine,
    SystemVm,
    IpAddress,
    StoragePool,
    Cluster,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Template => "template",
            EntityKind::Iso => "iso",
            EntityKind::VirtualMachine => "virtual machine",
            EntityKind::SystemVm => "system vm",
            EntityKind::IpAddress => "ip address",
            EntityKind::StoragePool => "storage pool",
            EntityKind::Cluster => "cluster",
        };
        write!(f, "{}", s)
    }
}

/// Reference to an entity by kind and id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

/// How a command's owning account is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRule {
    /// Always the system account
    System,
    /// The caller, falling back to system
    Caller,
    /// The referenced entity's owner, falling back to system
    Entity(EntityRef),
    /// The caller, then the referenced entity's owner, then system
    CallerOrEntity(EntityRef),
}

impl OwnerRule {
    /// Entity that must be looked up, if the rule can need one for this context
    pub fn entity_lookup(&self, ctx: &CallContext) -> Option<EntityRef> {
        match self {
            OwnerRule::Entity(entity) => Some(*entity),
            OwnerRule::CallerOrEntity(entity) if ctx.caller.is_none() => Some(*entity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_or_system() {
        assert_eq!(CallContext::system().caller_or_system(), AccountId::SYSTEM);
        assert_eq!(
            CallContext::for_caller(AccountId::new(7)).caller_or_system(),
            AccountId::new(7)
        );
    }

    #[test]
    fn test_entity_lookup_only_when_needed() {
        let template = EntityRef::new(EntityKind::Template, 3);
        let caller = CallContext::for_caller(AccountId::new(9));

        assert_eq!(OwnerRule::System.entity_lookup(&caller), None);
        assert_eq!(OwnerRule::Caller.entity_lookup(&caller), None);
        assert_eq!(
            OwnerRule::Entity(template).entity_lookup(&caller),
            Some(template)
        );
        assert_eq!(OwnerRule::CallerOrEntity(template).entity_lookup(&caller), None);
        assert_eq!(
            OwnerRule::CallerOrEntity(template).entity_lookup(&CallContext::system()),
            Some(template)
        );
    }
}
