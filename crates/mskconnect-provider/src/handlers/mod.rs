//! Resource handlers.
//!
//! Each handler is a short fixed sequence: validate, issue one mutating
//! call, hand the wait to a [`Stabilizer`], then read back the final model.
//! A handler that is re-invoked with a callback context skips straight to
//! the stage recorded there.

pub mod connector;
pub mod custom_plugin;
pub mod worker_configuration;

use std::future::Future;

use serde_json::Value;

pub use connector::ConnectorHandler;
pub use custom_plugin::CustomPluginHandler;
pub use worker_configuration::WorkerConfigurationHandler;

use mskconnect_core::error::translate;
use mskconnect_core::tags::{self, TagChanges, TagMap};
use mskconnect_core::{
    Action, CallbackContext, Classification, Driven, HandlerError, HandlerRequest, PollProgress,
    ProgressEvent, ResourceKind, ResourceModel, ServiceError, Stabilizer, Stage,
};

use crate::client::{BoxFuture, KafkaConnectApi, Page};
use crate::config::ProviderConfig;

pub type HandlerResult<M> = Result<ProgressEvent<M>, HandlerError>;

/// Create/Read/Update/Delete/List for one resource kind.
pub trait ResourceHandler: Send + Sync {
    type Model: ResourceModel;

    fn create<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, HandlerResult<Self::Model>>;

    fn read<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, HandlerResult<Self::Model>>;

    fn update<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, HandlerResult<Self::Model>>;

    fn delete<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, HandlerResult<Self::Model>>;

    fn list<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, HandlerResult<Self::Model>>;

    /// Run the operation named by `request.action`. Errors become a FAILED
    /// event carrying the handler error code.
    fn handle<'a>(
        &'a self,
        request: &'a HandlerRequest<Self::Model>,
    ) -> BoxFuture<'a, ProgressEvent<Self::Model>> {
        Box::pin(async move {
            let kind = <Self::Model as ResourceModel>::KIND;
            tracing::info!(
                resource_type = %kind,
                action = %request.action,
                stage = ?request.stage(),
                "handling request"
            );

            let result = match request.action {
                Action::Create => self.create(request).await,
                Action::Read => self.read(request).await,
                Action::Update => self.update(request).await,
                Action::Delete => self.delete(request).await,
                Action::List => self.list(request).await,
            };

            match result {
                Ok(event) => {
                    tracing::info!(
                        resource_type = %kind,
                        action = %request.action,
                        status = ?event.status,
                        "request handled"
                    );
                    event
                }
                Err(err) => {
                    tracing::warn!(
                        resource_type = %kind,
                        action = %request.action,
                        error_code = ?err.code(),
                        error = %err,
                        "request failed"
                    );
                    ProgressEvent::failed(&err)
                }
            }
        })
    }
}

pub(crate) fn desired<M: ResourceModel>(request: &HandlerRequest<M>) -> Result<&M, HandlerError> {
    request
        .desired_resource_state
        .as_ref()
        .ok_or_else(|| HandlerError::invalid_request(M::KIND, "desiredResourceState is required"))
}

/// ARN of the resource an existing-resource operation addresses.
pub(crate) fn identifier<M: ResourceModel>(
    request: &HandlerRequest<M>,
) -> Result<String, HandlerError> {
    request
        .desired_resource_state
        .as_ref()
        .and_then(ResourceModel::identifier)
        .or_else(|| {
            request
                .previous_resource_state
                .as_ref()
                .and_then(ResourceModel::identifier)
        })
        .map(str::to_string)
        .ok_or_else(|| HandlerError::not_found(M::KIND, "<no identifier>"))
}

/// The primary identifier is read-only; a Create that supplies one is
/// malformed.
pub(crate) fn reject_identifier<M: ResourceModel>(model: &M) -> Result<(), HandlerError> {
    match model.identifier() {
        Some(arn) => Err(HandlerError::invalid_request(
            M::KIND,
            format!("read-only identifier must not be set on create: {arn}"),
        )),
        None => Ok(()),
    }
}

/// Create-only properties may not change between the previous and the
/// desired model.
pub(crate) fn ensure_create_only_unchanged<M: ResourceModel>(
    arn: &str,
    desired: &M,
    previous: &M,
) -> Result<(), HandlerError> {
    if desired.create_only() == previous.create_only() {
        return Ok(());
    }
    tracing::warn!(resource_type = %M::KIND, identifier = %arn, "create-only property changed");
    Err(HandlerError::not_updatable(M::KIND, arn))
}

/// Every create-only property the desired model sets must match what the
/// service reports. Properties the desired model leaves unset, at any depth,
/// are whatever the service defaulted them to, and are not compared.
pub(crate) fn ensure_matches_current<M: ResourceModel>(
    arn: &str,
    desired: &M,
    current: &M,
) -> Result<(), HandlerError> {
    let matches = match (
        serde_json::to_value(desired.create_only()),
        serde_json::to_value(current.create_only()),
    ) {
        (Ok(want), Ok(have)) => specified_properties_match(&want, &have),
        _ => false,
    };
    if matches {
        return Ok(());
    }
    tracing::warn!(
        resource_type = %M::KIND,
        identifier = %arn,
        "create-only property differs from the deployed resource"
    );
    Err(HandlerError::not_updatable(M::KIND, arn))
}

/// Objects match when every key of `want` matches in `have`; arrays and
/// scalars must be equal.
fn specified_properties_match(want: &Value, have: &Value) -> bool {
    match (want, have) {
        (Value::Object(want), Value::Object(have)) => want.iter().all(|(key, value)| {
            have.get(key)
                .is_some_and(|current| specified_properties_match(value, current))
        }),
        _ => want == have,
    }
}

/// Converge the resource's tags from `previous` to `desired`, issuing only
/// the calls that have something to do.
pub(crate) async fn reconcile_tags<C>(
    client: &C,
    kind: ResourceKind,
    arn: &str,
    previous: &TagMap,
    desired: &TagMap,
) -> Result<(), HandlerError>
where
    C: KafkaConnectApi + ?Sized,
{
    let changes = TagChanges::between(previous, desired);
    if changes.is_empty() {
        return Ok(());
    }
    if !changes.remove.is_empty() {
        client
            .untag_resource(arn, &changes.remove)
            .await
            .map_err(|e| translate(&e, kind, arn, "UntagResource"))?;
    }
    if !changes.add.is_empty() {
        client
            .tag_resource(arn, &changes.add)
            .await
            .map_err(|e| translate(&e, kind, arn, "TagResource"))?;
    }
    tracing::info!(
        resource_type = %kind,
        identifier = %arn,
        added = changes.add.len(),
        removed = changes.remove.len(),
        "tags reconciled"
    );
    Ok(())
}

/// Attach the resource's user tags to a described model. System tags are
/// never reported back.
pub(crate) async fn with_tags<C, M>(client: &C, mut model: M, arn: &str) -> Result<M, HandlerError>
where
    C: KafkaConnectApi + ?Sized,
    M: ResourceModel,
{
    let mut current = client
        .list_tags(arn)
        .await
        .map_err(|e| translate(&e, M::KIND, arn, "ListTagsForResource"))?;
    current.retain(|key, _| !tags::is_system_tag(key));
    if !current.is_empty() {
        model.set_tags(tags::to_tags(&current));
    }
    Ok(model)
}

pub(crate) fn listed<M: ResourceModel>(page: Page<String>) -> ProgressEvent<M> {
    let models = page.items.into_iter().map(M::from_identifier).collect();
    ProgressEvent::listed(models, page.next_token)
}

/// Where a driven stabilization left the handler.
pub(crate) enum Settled<M, D> {
    /// Terminal success, with the last observation if there was one.
    Done(Option<D>),
    /// Still waiting; return this event and expect to be re-invoked.
    Pending(ProgressEvent<M>),
}

/// Drive `stabilizer` under the configured wait mode and package a
/// suspension as an IN_PROGRESS event carrying `model`.
pub(crate) async fn settle<M, D, F, Fut>(
    config: &ProviderConfig,
    stabilizer: &Stabilizer<'_, D>,
    progress: PollProgress,
    model: &M,
    describe: F,
) -> Result<Settled<M, D>, HandlerError>
where
    M: ResourceModel,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<D, ServiceError>>,
{
    match stabilizer.drive(config.wait_mode, progress, describe).await? {
        Driven::Complete(last) => Ok(Settled::Done(last)),
        Driven::Suspend { delay, progress } => Ok(Settled::Pending(ProgressEvent::in_progress(
            model.clone(),
            CallbackContext::resume(stabilizer.stage(), progress),
            delay,
        ))),
    }
}

/// Resume point of a Delete: before or after the delete call was issued.
pub(crate) fn delete_stage<M>(request: &HandlerRequest<M>) -> Stage {
    match request.stage() {
        Some(Stage::Delete) => Stage::Delete,
        _ => Stage::PreDelete,
    }
}

/// The shared Delete sequence: wait until the resource is deletable, issue
/// `delete` with the last observation, then wait for it to disappear.
pub(crate) async fn delete_resource<M, D, F, Fut, Del, DelFut>(
    config: &ProviderConfig,
    request: &HandlerRequest<M>,
    arn: &str,
    tables: (fn(&D) -> Classification, fn(&D) -> Classification),
    describe: F,
    delete: Del,
) -> HandlerResult<M>
where
    M: ResourceModel,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<D, ServiceError>>,
    Del: FnOnce(Option<D>) -> DelFut,
    DelFut: Future<Output = Result<(), ServiceError>>,
{
    let (pre_delete, post_delete) = tables;
    let model = request
        .desired_resource_state
        .clone()
        .unwrap_or_else(|| M::from_identifier(arn.to_string()));
    let mut progress = request.progress();

    if delete_stage(request) == Stage::PreDelete {
        let precheck =
            Stabilizer::new(M::KIND, Stage::PreDelete, arn, pre_delete).with_policy(config.poll);
        let current = match settle(config, &precheck, progress, &model, &describe).await? {
            Settled::Pending(event) => return Ok(event),
            Settled::Done(current) => current,
        };

        let operation = format!("Delete{}", M::KIND.api_name());
        delete(current)
            .await
            .map_err(|e| translate(&e, M::KIND, arn, &operation))?;
        tracing::info!(resource_type = %M::KIND, identifier = %arn, "delete accepted");
        progress = PollProgress::default();
    }

    let stabilizer =
        Stabilizer::new(M::KIND, Stage::Delete, arn, post_delete).with_policy(config.poll);
    if let Settled::Pending(event) = settle(config, &stabilizer, progress, &model, &describe).await?
    {
        return Ok(event);
    }

    tracing::info!(resource_type = %M::KIND, identifier = %arn, "resource deleted");
    Ok(ProgressEvent::done())
}
