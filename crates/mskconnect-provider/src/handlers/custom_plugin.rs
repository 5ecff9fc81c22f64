//! `AWS::KafkaConnect::CustomPlugin`. Only tags are updatable.

use mskconnect_core::error::translate;
use mskconnect_core::models::ResourceKind;
use mskconnect_core::state::CustomPluginState;
use mskconnect_core::{
    Classification, CustomPlugin, CustomPluginDescription, HandlerError, HandlerRequest,
    ProgressEvent, ResourceModel, Stabilizer, Stage, tables,
};

use super::{
    HandlerResult, ResourceHandler, Settled, delete_resource, desired,
    ensure_create_only_unchanged, ensure_matches_current, identifier, listed, reconcile_tags,
    reject_identifier, settle, with_tags,
};
use crate::client::{BoxFuture, KafkaConnectApi};
use crate::config::ProviderConfig;

const KIND: ResourceKind = ResourceKind::CustomPlugin;

fn classify_create(d: &CustomPluginDescription) -> Classification {
    tables::custom_plugin::create(&d.state)
}

fn classify_pre_delete(d: &CustomPluginDescription) -> Classification {
    tables::custom_plugin::pre_delete(&d.state)
}

fn classify_delete(d: &CustomPluginDescription) -> Classification {
    tables::custom_plugin::delete(&d.state)
}

pub struct CustomPluginHandler<'a, C: ?Sized> {
    client: &'a C,
    config: &'a ProviderConfig,
}

impl<'a, C: KafkaConnectApi + ?Sized> CustomPluginHandler<'a, C> {
    pub fn new(client: &'a C, config: &'a ProviderConfig) -> Self {
        Self { client, config }
    }

    async fn describe(&self, arn: &str) -> Result<CustomPluginDescription, HandlerError> {
        self.client
            .describe_custom_plugin(arn)
            .await
            .map_err(|e| translate(&e, KIND, arn, "DescribeCustomPlugin"))
    }

    async fn read_model(&self, arn: &str) -> Result<CustomPlugin, HandlerError> {
        let description = self.describe(arn).await?;
        with_tags(self.client, description.model, arn).await
    }
}

impl<'h, C: KafkaConnectApi + ?Sized> ResourceHandler for CustomPluginHandler<'h, C> {
    type Model = CustomPlugin;

    fn create<'a>(
        &'a self,
        request: &'a HandlerRequest<CustomPlugin>,
    ) -> BoxFuture<'a, HandlerResult<CustomPlugin>> {
        Box::pin(async move {
            let mut model = desired(request)?.clone();

            if request.stage().is_none() {
                reject_identifier(&model)?;
                let name = model.name.clone().unwrap_or_default();
                let arn = self
                    .client
                    .create_custom_plugin(&model, &request.desired_tags())
                    .await
                    .map_err(|e| translate(&e, KIND, &name, "CreateCustomPlugin"))?;
                tracing::info!(
                    custom_plugin_arn = %arn,
                    name = %name,
                    "custom plugin create accepted"
                );
                model.set_identifier(arn);
            }

            let arn = model.identifier().map(str::to_string).ok_or_else(|| {
                HandlerError::invalid_request(KIND, "CustomPluginArn is required to resume create")
            })?;
            let client = self.client;
            let arn_ref = arn.as_str();
            let stabilizer = Stabilizer::new(KIND, Stage::Create, arn_ref, classify_create)
                .with_policy(self.config.poll);
            let describe = move || client.describe_custom_plugin(arn_ref);
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
        request: &'a HandlerRequest<CustomPlugin>,
    ) -> BoxFuture<'a, HandlerResult<CustomPlugin>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            Ok(ProgressEvent::success(self.read_model(&arn).await?))
        })
    }

    fn update<'a>(
        &'a self,
        request: &'a HandlerRequest<CustomPlugin>,
    ) -> BoxFuture<'a, HandlerResult<CustomPlugin>> {
        Box::pin(async move {
            let desired_model = desired(request)?;
            let arn = identifier(request)?;

            if let Some(previous) = request.previous_resource_state.as_ref() {
                ensure_create_only_unchanged(&arn, desired_model, previous)?;
            }
            let current = self.describe(&arn).await?;
            if current.state != CustomPluginState::Active {
                tracing::warn!(
                    custom_plugin_arn = %arn,
                    state = %current.state,
                    "custom plugin is not ACTIVE"
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
        request: &'a HandlerRequest<CustomPlugin>,
    ) -> BoxFuture<'a, HandlerResult<CustomPlugin>> {
        Box::pin(async move {
            let arn = identifier(request)?;
            let client = self.client;
            let arn_ref = arn.as_str();
            delete_resource(
                self.config,
                request,
                arn_ref,
                (classify_pre_delete, classify_delete),
                move || client.describe_custom_plugin(arn_ref),
                move |_: Option<CustomPluginDescription>| client.delete_custom_plugin(arn_ref),
            )
            .await
        })
    }

    fn list<'a>(
        &'a self,
        request: &'a HandlerRequest<CustomPlugin>,
    ) -> BoxFuture<'a, HandlerResult<CustomPlugin>> {
        Box::pin(async move {
            let page = self
                .client
                .list_custom_plugins(request.next_token.as_deref())
                .await
                .map_err(|e| translate(&e, KIND, "*", "ListCustomPlugins"))?;
            Ok(listed(page))
        })
    }
}
