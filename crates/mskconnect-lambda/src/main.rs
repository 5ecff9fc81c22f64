use aws_config::SdkConfig;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use mskconnect_core::{HandlerRequest, ProgressEvent};
use mskconnect_provider::{KafkaConnectClient, ProviderConfig, dispatch};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ProviderConfig::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    tracing::info!(
        poll_delay_secs = config.poll.delay.as_secs(),
        timeout_secs = config.poll.timeout.as_secs(),
        wait_mode = ?config.wait_mode,
        "resource provider starting"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<HandlerRequest<Value>>| {
        let sdk_config = sdk_config.clone();
        async move { handle(event, &sdk_config, &config).await }
    }))
    .await
    .map_err(|e| eyre::eyre!(e))
}

/// Service calls go out with the caller's credentials and region, so every
/// invocation gets its own client.
async fn handle(
    event: LambdaEvent<HandlerRequest<Value>>,
    sdk_config: &SdkConfig,
    config: &ProviderConfig,
) -> Result<ProgressEvent<Value>, lambda_runtime::Error> {
    let request = event.payload;
    tracing::info!(
        request_id = %event.context.request_id,
        resource_type = %request.resource_type,
        action = %request.action,
        logical_resource_id = ?request.logical_resource_identifier,
        "invocation"
    );

    let client = KafkaConnectClient::for_caller(
        sdk_config,
        request.credentials.as_ref(),
        request.region.as_deref(),
    );
    Ok(dispatch(&client, config, request).await)
}
