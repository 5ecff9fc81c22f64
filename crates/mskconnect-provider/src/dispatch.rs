//! Route a raw request to the handler for its resource type.

use serde_json::Value;

use mskconnect_core::{HandlerErrorCode, HandlerRequest, ProgressEvent, ResourceKind, ResourceModel};

use crate::client::KafkaConnectApi;
use crate::config::ProviderConfig;
use crate::handlers::{
    ConnectorHandler, CustomPluginHandler, ResourceHandler, WorkerConfigurationHandler,
};

/// Handle one request whose models are still untyped JSON.
///
/// Never fails: unroutable or undecodable requests come back as a FAILED
/// event with `InvalidRequest`.
pub async fn dispatch<C>(
    client: &C,
    config: &ProviderConfig,
    request: HandlerRequest<Value>,
) -> ProgressEvent<Value>
where
    C: KafkaConnectApi + ?Sized,
{
    let Some(kind) = ResourceKind::from_type_name(&request.resource_type) else {
        tracing::warn!(resource_type = %request.resource_type, "unsupported resource type");
        return ProgressEvent::rejected(
            HandlerErrorCode::InvalidRequest,
            format!("unsupported resource type: {}", request.resource_type),
        );
    };

    match kind {
        ResourceKind::Connector => run(&ConnectorHandler::new(client, config), request).await,
        ResourceKind::CustomPlugin => {
            run(&CustomPluginHandler::new(client, config), request).await
        }
        ResourceKind::WorkerConfiguration => {
            run(&WorkerConfigurationHandler::new(client, config), request).await
        }
    }
}

async fn run<H: ResourceHandler>(
    handler: &H,
    request: HandlerRequest<Value>,
) -> ProgressEvent<Value> {
    let kind = <H::Model as ResourceModel>::KIND;
    let typed = match request.try_map_models(serde_json::from_value::<H::Model>) {
        Ok(typed) => typed,
        Err(err) => {
            tracing::warn!(resource_type = %kind, error = %err, "malformed resource model");
            return ProgressEvent::rejected(
                HandlerErrorCode::InvalidRequest,
                format!("malformed {kind} model: {err}"),
            );
        }
    };

    let event = handler.handle(&typed).await;
    event.try_map_models(serde_json::to_value).unwrap_or_else(|err| {
        tracing::error!(resource_type = %kind, error = %err, "could not encode resource model");
        ProgressEvent::rejected(
            HandlerErrorCode::InternalFailure,
            format!("could not encode {kind} model: {err}"),
        )
    })
}
