//! API dispatcher
//! Entry point for one inbound API request: look up, bind, build, attribute, execute

use crate::application::{AsyncJobManager, CommandRegistry};
use crate::domain::commands::BoundCommand;
use crate::domain::ports::EntityLookup;
use crate::domain::responses::{JobCreatedResponse, ResponsePayload};
use crate::domain::services::OwnerResolver;
use crate::domain::{ApiError, ApiResponse, CallContext, RequestBinder, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct ApiDispatcher {
    registry: Arc<CommandRegistry>,
    owners: OwnerResolver,
    jobs: Arc<AsyncJobManager>,
}

impl ApiDispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        entities: Arc<dyn EntityLookup>,
        jobs: Arc<AsyncJobManager>,
    ) -> Self {
        Self {
            registry,
            owners: OwnerResolver::new(entities),
            jobs,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn jobs(&self) -> &Arc<AsyncJobManager> {
        &self.jobs
    }

    /// Execute one API request
    ///
    /// Synchronous commands return their own response. Async commands return a job-created
    /// response under the command's response name once the job record is saved.
    pub async fn dispatch(
        &self,
        api_name: &str,
        raw_params: &HashMap<String, String>,
        ctx: CallContext,
    ) -> Result<ApiResponse> {
        let factory = self.registry.get(api_name).ok_or_else(|| {
            warn!(api = api_name, "Unsupported command");
            ApiError::UnsupportedCommand(api_name.to_string())
        })?;

        let params = RequestBinder::bind(factory.parameters(), raw_params).map_err(|e| {
            warn!(api = api_name, error = %e, "Rejected request parameters");
            e
        })?;

        let command = factory.build(&params, &ctx).await.map_err(|e| {
            warn!(api = api_name, error = %e, "Failed to build command");
            e
        })?;

        let owner = self.owners.resolve(&ctx, command.owner_rule()).await?;
        debug!(
            api = api_name,
            command = command.command_name(),
            owner = %owner,
            "Command bound"
        );

        match command {
            BoundCommand::Sync(command) => {
                let response = command.execute().await.map_err(|e| {
                    error!(
                        api = api_name,
                        command = command.command_name(),
                        owner = %owner,
                        error = %e,
                        "Command failed"
                    );
                    e
                })?;

                info!(
                    api = api_name,
                    command = command.command_name(),
                    owner = %owner,
                    "Command completed"
                );
                Ok(response)
            }
            BoundCommand::Async(command) => {
                let response_name = command.command_name();
                let instance_id = command.instance_id();
                let job = self.jobs.submit(api_name, owner, command).await?;

                info!(
                    api = api_name,
                    command = response_name,
                    owner = %owner,
                    job_id = %job.id(),
                    "Command submitted as async job"
                );
                Ok(ApiResponse::new(
                    response_name,
                    ResponsePayload::JobCreated(JobCreatedResponse {
                        job_id: job.id(),
                        id: instance_id,
                    }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Collaborators;
    use crate::domain::commands::test_support::raw;
    use crate::domain::ports::{
        AsyncJobRepository, MockEntityLookup, MockManagementService, MockNetworkService,
        MockResourceService, MockStorageService,
    };
    use crate::domain::{AccountId, JobStatus};
    use crate::infrastructure::{InMemoryAsyncJobRepository, RecordingEventSink};
    use std::time::Duration;

    struct Fixture {
        dispatcher: ApiDispatcher,
        jobs: Arc<InMemoryAsyncJobRepository>,
        events: Arc<RecordingEventSink>,
    }

    fn fixture(
        resources: MockResourceService,
        network: MockNetworkService,
        entities: MockEntityLookup,
    ) -> Fixture {
        let jobs = Arc::new(InMemoryAsyncJobRepository::new());
        let events = Arc::new(RecordingEventSink::new());
        let entities: Arc<dyn EntityLookup> = Arc::new(entities);
        let collaborators = Collaborators {
            management: Arc::new(MockManagementService::new()),
            resources: Arc::new(resources),
            storage: Arc::new(MockStorageService::new()),
            network: Arc::new(network),
            entities: entities.clone(),
            jobs: jobs.clone(),
        };
        let manager = Arc::new(AsyncJobManager::with_defaults(jobs.clone(), events.clone()));
        let dispatcher = ApiDispatcher::new(
            Arc::new(CommandRegistry::new(&collaborators)),
            entities,
            manager,
        );

        Fixture {
            dispatcher,
            jobs,
            events,
        }
    }

    fn empty_fixture() -> Fixture {
        fixture(
            MockResourceService::new(),
            MockNetworkService::new(),
            MockEntityLookup::new(),
        )
    }

    #[tokio::test]
    async fn test_unsupported_command() {
        let fixture = empty_fixture();
        let result = fixture
            .dispatcher
            .dispatch("rebootEverything", &raw(&[]), CallContext::system())
            .await;

        let err = result.unwrap_err();
        assert_eq!(err, ApiError::UnsupportedCommand("rebootEverything".to_string()));
        assert_eq!(err.error_code().code(), 432);
    }

    #[tokio::test]
    async fn test_validation_failure_never_executes() {
        let mut resources = MockResourceService::new();
        resources.expect_delete_cluster().times(0);
        let fixture = fixture(resources, MockNetworkService::new(), MockEntityLookup::new());

        let result = fixture
            .dispatcher
            .dispatch("deleteCluster", &raw(&[("id", "x")]), CallContext::system())
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_sync_command_failure_propagates() {
        let mut resources = MockResourceService::new();
        resources.expect_delete_cluster().returning(|_| Ok(false));
        let fixture = fixture(resources, MockNetworkService::new(), MockEntityLookup::new());

        let result = fixture
            .dispatcher
            .dispatch("deleteCluster", &raw(&[("id", "42")]), CallContext::system())
            .await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::OperationFailed("Failed to delete cluster".to_string())
        );
    }

    #[tokio::test]
    async fn test_async_command_returns_job() {
        let mut network = MockNetworkService::new();
        network.expect_disassociate_ip_address().returning(|_| Ok(true));
        let mut entities = MockEntityLookup::new();
        entities
            .expect_find_owner()
            .times(1)
            .returning(|_| Ok(Some(AccountId::new(8))));
        let fixture = fixture(MockResourceService::new(), network, entities);

        let response = fixture
            .dispatcher
            .dispatch(
                "disassociateIpAddress",
                &raw(&[("id", "31")]),
                CallContext::system(),
            )
            .await
            .unwrap();
        assert_eq!(response.response_name(), "disassociateipaddressresponse");

        let ResponsePayload::JobCreated(created) = response.payload() else {
            panic!("expected a job-created payload");
        };
        assert_eq!(created.id, Some(31));

        let job = fixture.jobs.find_by_id(created.job_id).await.unwrap().unwrap();
        assert_eq!(job.account_id(), AccountId::new(8));

        let job = fixture
            .dispatcher
            .jobs()
            .wait_for_completion(created.job_id, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(job.status(), JobStatus::Succeeded);

        fixture.dispatcher.jobs().shutdown().await;
        assert_eq!(fixture.events.events().len(), 3);
    }
}
