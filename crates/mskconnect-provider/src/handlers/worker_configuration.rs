//! `AWS::KafkaConnect::WorkerConfiguration`.
//!
//! Creation is synchronous on the service side, so Create reads the model
//! straight back without polling. Only tags are updatable.

use mskconnect_core::error::translate;
use mskconnect_core::models::ResourceKind;
use mskconnect_core::state::WorkerConfigurationState;
use mskconnect_core::{
    Classification, HandlerError, HandlerRequest, ProgressEvent, WorkerConfiguration,
    WorkerConfigurationDescription, tables,
};

use super::{
    HandlerResult, ResourceHandler, delete_resource, desired, ensure_create_only_unchanged,
    ensure_matches_current, identifier, listed, reconcile_tags, reject_identifier, with_tags,
};
use crate::client::{BoxFuture, KafkaConnectApi};
use crate::config::ProviderConfig;

const KIND: ResourceKind = ResourceKind::WorkerConfiguration;

fn classify_pre_delete(d: &WorkerConfigurationDescription) -> Classification {
    tables::worker_configuration::pre_delete(&d.state)
}

fn classify_delete(d: &WorkerConfigurationDescription) -> Classification {
    tables::worker_configuration::delete(&d.state)
}

pub struct WorkerConfigurationHandler<'a, C: ?Sized> {
    client: &'a C,
    config: &'a ProviderConfig,
}

impl<'a, C: KafkaConnectApi + ?Sized> WorkerConfigurationHandler<'a, C> {
    pub fn new(client: &'a C, config: &'a ProviderConfig) -> Self {
        Self { client, config }
    }

    async fn describe(&self, arn: &str) -> Result<WorkerConfigurationDescription, HandlerError> {
        self.client
            .describe_worker_configuration(arn)
            .await
            .map_err(|e| translate(&e, KIND, arn, "DescribeWorkerConfiguration"))
    }

    async fn read_model(&self, arn: &str) -> Result<WorkerConfiguration, HandlerError> {
        let description = self.describe(arn).await?;
        with_tags(self.client, description.model, arn).await
    }
}

impl<'h, C: KafkaConnectApi + ?Sized> ResourceHandler for WorkerConfigurationHandler<'h, C> {
    type Model = WorkerConfiguration;

    fn create<'a>(
        &'a self,
        request: &'a HandlerRequest<WorkerConfiguration>,
    ) -> BoxFuture<'a, HandlerResult<WorkerConfiguration>> {
        Box::pin(async move {
            let model = desired(request)?;
            reject_identifier(model)?;
            let name = model.name.clone().unwrap_or_default();
            let arn = self
                .client
                .create_worker_configuration(model, &request.desired_tags())
                .await
                .map_err(|e| translate(&e, KIND, &name, "CreateWorkerConfiguration"))?;
            tracing::info!(
                worker_configuration_arn = %arn,
                name = %name,
                "worker configuration created"
            );

            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn read<'a>(
        &'a self,
        request: &'a HandlerRequest<WorkerConfiguration>,
    ) -> BoxFuture<'a, HandlerResult<WorkerConfiguration>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn update<'a>(
        &'a self,
        request: &'a HandlerRequest<WorkerConfiguration>,
    ) -> BoxFuture<'a, HandlerResult<WorkerConfiguration>> {
        Box::pin(async move {
            let desired_model = desired(request)?;
            let arn = identifier(request)?;

            if let Some(previous) = request.previous_resource_state.as_ref() {
                ensure_create_only_unchanged(&arn, desired_model, previous)?;
            }
            let current = self.describe(&arn).await?;
            if current.state != WorkerConfigurationState::Active {
                tracing::warn!(
                    worker_configuration_arn = %arn,
                    state = %current.state,
                    "worker configuration is not ACTIVE"
                );
                return Err(HandlerError::not_updatable(KIND, &arn));
            }
            ensure_matches_current(&arn, desired_model, &current.model)?;

            reconcile_tags(
                self.client,
                KIND,
                &arn,
                &request.previous_tags(),
                &request.desired_tags(),
            )
            .await?;

            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn delete<'a>(
        &'a self,
        request: &'a HandlerRequest<WorkerConfiguration>,
    ) -> BoxFuture<'a, HandlerResult<WorkerConfiguration>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            let client = self.client;
            let arn_ref = arn.as_str();
            delete_resource(
                self.config,
                request,
                arn_ref,
                (classify_pre_delete, classify_delete),
                move || client.describe_worker_configuration(arn_ref),
                move |_: Option<WorkerConfigurationDescription>| {
                    client.delete_worker_configuration(arn_ref)
                },
            )
            .await
        })
    }

    fn list<'a>(
        &'a self,
        request: &'a HandlerRequest<WorkerConfiguration>,
    ) -> BoxFuture<'a, HandlerResult<WorkerConfiguration>> {
        Box::pin(async move {
            let page = self
                .client
                .list_worker_configurations(request.next_token.as_deref())
                .await
                .map_err(|e| translate(&e, KIND, "*", "ListWorkerConfigurations"))?;
            Ok(listed(page))
        })
    }
}
