//! `AWS::KafkaConnect::Connector`.
//!
//! Capacity is the only property changed in place; tags are reconciled
//! separately. Everything else is fixed at create time.

use mskconnect_core::error::translate;
use mskconnect_core::models::ResourceKind;
use mskconnect_core::state::ConnectorState;
use mskconnect_core::{
    Classification, Connector, ConnectorDescription, HandlerError, HandlerRequest, ProgressEvent,
    ResourceModel, Stabilizer, Stage, tables,
};

use super::{
    HandlerResult, ResourceHandler, Settled, delete_resource, desired,
    ensure_create_only_unchanged, ensure_matches_current, identifier, listed, reconcile_tags,
    reject_identifier, settle, with_tags,
};
use crate::client::{BoxFuture, KafkaConnectApi};
use crate::config::ProviderConfig;

const KIND: ResourceKind = ResourceKind::Connector;

fn classify_create(d: &ConnectorDescription) -> Classification {
    tables::connector::create(&d.state)
}

fn classify_update(d: &ConnectorDescription) -> Classification {
    tables::connector::update(&d.state)
}

fn classify_pre_delete(d: &ConnectorDescription) -> Classification {
    tables::connector::pre_delete(&d.state)
}

fn classify_delete(d: &ConnectorDescription) -> Classification {
    tables::connector::delete(&d.state)
}

pub struct ConnectorHandler<'a, C: ?Sized> {
    client: &'a C,
    config: &'a ProviderConfig,
}

impl<'a, C: KafkaConnectApi + ?Sized> ConnectorHandler<'a, C> {
    pub fn new(client: &'a C, config: &'a ProviderConfig) -> Self {
        Self { client, config }
    }

    async fn describe(&self, arn: &str) -> Result<ConnectorDescription, HandlerError> {
        self.client
            .describe_connector(arn)
            .await
            .map_err(|e| translate(&e, KIND, arn, "DescribeConnector"))
    }

    async fn read_model(&self, arn: &str) -> Result<Connector, HandlerError> {
        let description = self.describe(arn).await?;
        with_tags(self.client, description.model, arn).await
    }

    /// Issue the capacity change if the connector does not already carry it.
    /// Returns whether an update was issued.
    async fn apply_capacity(
        &self,
        arn: &str,
        desired: &Connector,
        current: &ConnectorDescription,
    ) -> Result<bool, HandlerError> {
        let Some(capacity) = desired.capacity.as_ref() else {
            return Ok(false);
        };
        if capacity.satisfied_by(current.model.capacity.as_ref()) {
            return Ok(false);
        }
        let Some(version) = current.current_version.as_deref() else {
            return Err(HandlerError::general(
                KIND,
                arn,
                "UpdateConnector",
                "connector reported no current version",
            ));
        };
        self.client
            .update_connector(arn, version, capacity)
            .await
            .map_err(|e| translate(&e, KIND, arn, "UpdateConnector"))?;
        tracing::info!(
            connector_arn = %arn,
            current_version = %version,
            "connector capacity update accepted"
        );
        Ok(true)
    }
}

impl<'h, C: KafkaConnectApi + ?Sized> ResourceHandler for ConnectorHandler<'h, C> {
    type Model = Connector;

    fn create<'a>(
        &'a self,
        request: &'a HandlerRequest<Connector>,
    ) -> BoxFuture<'a, HandlerResult<Connector>> {
        Box::pin(async move {
            let mut model = desired(request)?.clone();

            if request.stage().is_none() {
                reject_identifier(&model)?;
                let name = model.connector_name.clone().unwrap_or_default();
                let arn = self
                    .client
                    .create_connector(&model, &request.desired_tags())
                    .await
                    .map_err(|e| translate(&e, KIND, &name, "CreateConnector"))?;
                tracing::info!(
                    connector_arn = %arn,
                    connector_name = %name,
                    "connector create accepted"
                );
                model.set_identifier(arn);
            }

            let arn = model.identifier().map(str::to_string).ok_or_else(|| {
                HandlerError::invalid_request(KIND, "ConnectorArn is required to resume create")
            })?;
            let client = self.client;
            let arn_ref = arn.as_str();
            let stabilizer = Stabilizer::new(KIND, Stage::Create, arn_ref, classify_create)
                .with_policy(self.config.poll);
            let describe = move || client.describe_connector(arn_ref);
            if let Settled::Pending(event) =
                settle(self.config, &stabilizer, request.progress(), &model, describe).await?
            {
                return Ok(event);
            }

            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn read<'a>(
        &'a self,
        request: &'a HandlerRequest<Connector>,
    ) -> BoxFuture<'a, HandlerResult<Connector>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn update<'a>(
        &'a self,
        request: &'a HandlerRequest<Connector>,
    ) -> BoxFuture<'a, HandlerResult<Connector>> {
        Box::pin(async move {
            let desired_model = desired(request)?;
            let arn = identifier(request)?;
            let mut stabilize = request.stage() == Some(Stage::Update);

            if request.stage().is_none() {
                if let Some(previous) = request.previous_resource_state.as_ref() {
                    ensure_create_only_unchanged(&arn, desired_model, previous)?;
                }
                let current = self.describe(&arn).await?;
                if current.state != ConnectorState::Running {
                    tracing::warn!(
                        connector_arn = %arn,
                        state = %current.state,
                        "connector is not RUNNING"
                    );
                    return Err(HandlerError::not_updatable(KIND, &arn));
                }
                ensure_matches_current(&arn, desired_model, &current.model)?;
                stabilize = self.apply_capacity(&arn, desired_model, &current).await?;
            }

            if stabilize {
                let target = desired_model.capacity.clone();
                let client = self.client;
                let arn_ref = arn.as_str();
                let stabilizer = Stabilizer::new(KIND, Stage::Update, arn_ref, classify_update)
                    .with_policy(self.config.poll)
                    .with_verifier(move |d: &ConnectorDescription| {
                        target
                            .as_ref()
                            .is_none_or(|c| c.satisfied_by(d.model.capacity.as_ref()))
                    });
                let mut model = desired_model.clone();
                model.set_identifier(arn.clone());
                let describe = move || client.describe_connector(arn_ref);
                if let Settled::Pending(event) =
                    settle(self.config, &stabilizer, request.progress(), &model, describe).await?
                {
                    return Ok(event);
                }
            }

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
        request: &'a HandlerRequest<Connector>,
    ) -> BoxFuture<'a, HandlerResult<Connector>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            let client = self.client;
            let arn_ref = arn.as_str();
            delete_resource(
                self.config,
                request,
                arn_ref,
                (classify_pre_delete, classify_delete),
                move || client.describe_connector(arn_ref),
                move |current: Option<ConnectorDescription>| async move {
                    let version = current.and_then(|d| d.current_version);
                    client.delete_connector(arn_ref, version.as_deref()).await
                },
            )
            .await
        })
    }

    fn list<'a>(
        &'a self,
        request: &'a HandlerRequest<Connector>,
    ) -> BoxFuture<'a, HandlerResult<Connector>> {
        Box::pin(async move {
            let page = self
                .client
                .list_connectors(request.next_token.as_deref())
                .await
                .map_err(|e| translate(&e, KIND, "*", "ListConnectors"))?;
            Ok(listed(page))
        })
    }
}
