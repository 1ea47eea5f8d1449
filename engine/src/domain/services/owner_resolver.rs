//! Owner resolution service
//! Evaluates a command's `OwnerRule` against the call context

use crate::domain::ports::EntityLookup;
use crate::domain::{AccountId, CallContext, OwnerRule, Result};
use std::sync::Arc;
use tracing::debug;

pub struct OwnerResolver {
    lookup: Arc<dyn EntityLookup>,
}

impl OwnerResolver {
    pub fn new(lookup: Arc<dyn EntityLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve the owning account for `rule`
    ///
    /// Priority is caller, then the referenced entity's owner, then the system account,
    /// restricted to the sources the rule allows. Only reads.
    pub async fn resolve(&self, ctx: &CallContext, rule: OwnerRule) -> Result<AccountId> {
        let caller = match rule {
            OwnerRule::Caller | OwnerRule::CallerOrEntity(_) => ctx.caller,
            OwnerRule::System | OwnerRule::Entity(_) => None,
        };
        if let Some(caller) = caller {
            return Ok(caller);
        }

        if let Some(entity) = rule.entity_lookup(ctx) {
            if let Some(owner) = self.lookup.find_owner(entity).await? {
                return Ok(owner);
            }
            debug!(
                entity_kind = %entity.kind,
                entity_id = entity.id,
                "Entity not found, attributing to system account"
            );
        }

        Ok(AccountId::SYSTEM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockEntityLookup;
    use crate::domain::{EntityKind, EntityRef};
    use mockall::predicate::eq;

    const TEMPLATE: EntityRef = EntityRef {
        kind: EntityKind::Template,
        id: 3,
    };

    fn resolver(lookup: MockEntityLookup) -> OwnerResolver {
        OwnerResolver::new(Arc::new(lookup))
    }

    #[tokio::test]
    async fn test_system_rule_ignores_caller() {
        let mut lookup = MockEntityLookup::new();
        lookup.expect_find_owner().times(0);

        let owner = resolver(lookup)
            .resolve(&CallContext::for_caller(AccountId::new(9)), OwnerRule::System)
            .await
            .unwrap();
        assert_eq!(owner, AccountId::SYSTEM);
    }

    #[tokio::test]
    async fn test_caller_rule() {
        let resolver = resolver(MockEntityLookup::new());

        let owner = resolver
            .resolve(&CallContext::for_caller(AccountId::new(9)), OwnerRule::Caller)
            .await
            .unwrap();
        assert_eq!(owner, AccountId::new(9));

        let owner = resolver
            .resolve(&CallContext::system(), OwnerRule::Caller)
            .await
            .unwrap();
        assert_eq!(owner, AccountId::SYSTEM);
    }

    #[tokio::test]
    async fn test_entity_rule_uses_entity_owner() {
        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_find_owner()
            .with(eq(TEMPLATE))
            .times(1)
            .returning(|_| Ok(Some(AccountId::new(5))));

        let owner = resolver(lookup)
            .resolve(
                &CallContext::for_caller(AccountId::new(9)),
                OwnerRule::Entity(TEMPLATE),
            )
            .await
            .unwrap();
        assert_eq!(owner, AccountId::new(5));
    }

    #[tokio::test]
    async fn test_entity_rule_falls_back_to_system() {
        let mut lookup = MockEntityLookup::new();
        lookup.expect_find_owner().returning(|_| Ok(None));

        let owner = resolver(lookup)
            .resolve(&CallContext::system(), OwnerRule::Entity(TEMPLATE))
            .await
            .unwrap();
        assert_eq!(owner, AccountId::SYSTEM);
    }

    #[tokio::test]
    async fn test_caller_or_entity_priority() {
        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_find_owner()
            .times(1)
            .returning(|_| Ok(Some(AccountId::new(5))));
        let resolver = resolver(lookup);
        let rule = OwnerRule::CallerOrEntity(TEMPLATE);

        let owner = resolver
            .resolve(&CallContext::for_caller(AccountId::new(9)), rule)
            .await
            .unwrap();
        assert_eq!(owner, AccountId::new(9));

        let owner = resolver.resolve(&CallContext::system(), rule).await.unwrap();
        assert_eq!(owner, AccountId::new(5));
    }

    #[tokio::test]
    async fn test_resolution_is_deterministic() {
        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_find_owner()
            .times(2)
            .returning(|_| Ok(Some(AccountId::new(5))));
        let resolver = resolver(lookup);
        let ctx = CallContext::system();

        let first = resolver.resolve(&ctx, OwnerRule::Entity(TEMPLATE)).await;
        let second = resolver.resolve(&ctx, OwnerRule::Entity(TEMPLATE)).await;
        assert_eq!(first, second);
    }
}
