//! `KafkaConnectApi` over the AWS SDK.

mod translate;

use aws_config::SdkConfig;
use aws_sdk_kafkaconnect::Client;
use aws_sdk_kafkaconnect::config::{Credentials as SdkCredentials, Region};
use aws_sdk_kafkaconnect::error::{BuildError, ProvideErrorMetadata, SdkError};

use mskconnect_core::models::connector::Capacity;
use mskconnect_core::tags::TagMap;
use mskconnect_core::{
    Connector, ConnectorDescription, Credentials, CustomPlugin, CustomPluginDescription,
    ServiceError, ServiceErrorKind, WorkerConfiguration, WorkerConfigurationDescription,
};

use crate::client::{ApiResult, BoxFuture, KafkaConnectApi, Page};
use crate::error::format_err_chain;

/// Provider name attached to credentials forwarded with a request.
const CALLER_CREDENTIALS: &str = "cloudformation-caller";

#[derive(Debug, Clone)]
pub struct KafkaConnectClient {
    client: Client,
}

impl KafkaConnectClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// A client acting with the caller's credentials and region, falling
    /// back to `base` for whichever the request does not carry.
    pub fn for_caller(
        base: &SdkConfig,
        credentials: Option<&Credentials>,
        region: Option<&str>,
    ) -> Self {
        let mut builder = aws_sdk_kafkaconnect::config::Builder::from(base);
        if let Some(creds) = credentials {
            builder = builder.credentials_provider(SdkCredentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None,
                CALLER_CREDENTIALS,
            ));
        }
        if let Some(region) = region {
            builder = builder.region(Region::new(region.to_string()));
        }
        Self::new(Client::from_conf(builder.build()))
    }
}

/// Strip the SDK error down to its service error code and message.
fn service_error<E, R>(err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let kind = err
        .code()
        .map(ServiceErrorKind::from_code)
        .unwrap_or(ServiceErrorKind::Other);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format_err_chain(&err));
    tracing::debug!(kind = ?kind, error = %format_err_chain(&err), "MSK Connect call failed");
    ServiceError::new(kind, message)
}

/// A request shape the SDK refused to build: a model missing a required
/// property.
fn invalid_shape(err: BuildError) -> ServiceError {
    ServiceError::new(ServiceErrorKind::BadRequest, err.to_string())
}

fn missing_arn(operation: &str) -> ServiceError {
    ServiceError::new(
        ServiceErrorKind::Other,
        format!("{operation} returned no ARN"),
    )
}

fn tag_map(tags: &TagMap) -> Option<std::collections::HashMap<String, String>> {
    (!tags.is_empty()).then(|| translate::string_map(tags))
}

impl KafkaConnectApi for KafkaConnectClient {
    fn create_connector<'a>(
        &'a self,
        model: &'a Connector,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            let capacity = model
                .capacity
                .as_ref()
                .map(translate::capacity)
                .transpose()
                .map_err(invalid_shape)?;
            let kafka_cluster = model
                .kafka_cluster
                .as_ref()
                .map(translate::kafka_cluster)
                .transpose()
                .map_err(invalid_shape)?;
            let client_authentication = model
                .kafka_cluster_client_authentication
                .as_ref()
                .map(translate::client_authentication)
                .transpose()
                .map_err(invalid_shape)?;
            let encryption_in_transit = model
                .kafka_cluster_encryption_in_transit
                .as_ref()
                .map(translate::encryption_in_transit)
                .transpose()
                .map_err(invalid_shape)?;
            let log_delivery = model
                .log_delivery
                .as_ref()
                .map(translate::log_delivery)
                .transpose()
                .map_err(invalid_shape)?;
            let plugins = model
                .plugins
                .iter()
                .flatten()
                .map(translate::plugin)
                .collect::<Result<Vec<_>, _>>()
                .map_err(invalid_shape)?;
            let worker_configuration = model
                .worker_configuration
                .as_ref()
                .map(translate::worker_configuration_reference)
                .transpose()
                .map_err(invalid_shape)?;

            let resp = self
                .client
                .create_connector()
                .set_capacity(capacity)
                .set_connector_configuration(
                    model.connector_configuration.as_ref().map(translate::string_map),
                )
                .set_connector_description(model.connector_description.clone())
                .set_connector_name(model.connector_name.clone())
                .set_kafka_cluster(kafka_cluster)
                .set_kafka_cluster_client_authentication(client_authentication)
                .set_kafka_cluster_encryption_in_transit(encryption_in_transit)
                .set_kafka_connect_version(model.kafka_connect_version.clone())
                .set_log_delivery(log_delivery)
                .set_plugins(Some(plugins))
                .set_service_execution_role_arn(model.service_execution_role_arn.clone())
                .set_worker_configuration(worker_configuration)
                .set_tags(tag_map(tags))
                .send()
                .await
                .map_err(service_error)?;

            resp.connector_arn()
                .map(str::to_string)
                .ok_or_else(|| missing_arn("CreateConnector"))
        })
    }

    fn describe_connector<'a>(
        &'a self,
        arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<ConnectorDescription>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_connector()
                .connector_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(translate::connector_description(&resp))
        })
    }

    fn update_connector<'a>(
        &'a self,
        arn: &'a str,
        current_version: &'a str,
        capacity: &'a Capacity,
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            let capacity = translate::capacity_update(capacity).map_err(invalid_shape)?;
            self.client
                .update_connector()
                .connector_arn(arn)
                .current_version(current_version)
                .capacity(capacity)
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn delete_connector<'a>(
        &'a self,
        arn: &'a str,
        current_version: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.client
                .delete_connector()
                .connector_arn(arn)
                .set_current_version(current_version.map(str::to_string))
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn list_connectors<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            let resp = self
                .client
                .list_connectors()
                .set_next_token(next_token.map(str::to_string))
                .send()
                .await
                .map_err(service_error)?;
            Ok(Page {
                items: resp
                    .connectors()
                    .iter()
                    .filter_map(|c| c.connector_arn())
                    .map(str::to_string)
                    .collect(),
                next_token: resp.next_token().map(str::to_string),
            })
        })
    }

    fn create_custom_plugin<'a>(
        &'a self,
        model: &'a CustomPlugin,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            let location = model
                .location
                .as_ref()
                .map(translate::custom_plugin_location)
                .transpose()
                .map_err(invalid_shape)?;
            let resp = self
                .client
                .create_custom_plugin()
                .set_name(model.name.clone())
                .set_description(model.description.clone())
                .set_content_type(model.content_type.as_deref().map(translate::content_type))
                .set_location(location)
                .set_tags(tag_map(tags))
                .send()
                .await
                .map_err(service_error)?;

            resp.custom_plugin_arn()
                .map(str::to_string)
                .ok_or_else(|| missing_arn("CreateCustomPlugin"))
        })
    }

    fn describe_custom_plugin<'a>(
        &'a self,
        arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<CustomPluginDescription>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_custom_plugin()
                .custom_plugin_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(translate::custom_plugin_description(&resp))
        })
    }

    fn delete_custom_plugin<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.client
                .delete_custom_plugin()
                .custom_plugin_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn list_custom_plugins<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            let resp = self
                .client
                .list_custom_plugins()
                .set_next_token(next_token.map(str::to_string))
                .send()
                .await
                .map_err(service_error)?;
            Ok(Page {
                items: resp
                    .custom_plugins()
                    .iter()
                    .filter_map(|p| p.custom_plugin_arn())
                    .map(str::to_string)
                    .collect(),
                next_token: resp.next_token().map(str::to_string),
            })
        })
    }

    fn create_worker_configuration<'a>(
        &'a self,
        model: &'a WorkerConfiguration,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            let resp = self
                .client
                .create_worker_configuration()
                .set_name(model.name.clone())
                .set_description(model.description.clone())
                .set_properties_file_content(model.properties_file_content.clone())
                .set_tags(tag_map(tags))
                .send()
                .await
                .map_err(service_error)?;

            resp.worker_configuration_arn()
                .map(str::to_string)
                .ok_or_else(|| missing_arn("CreateWorkerConfiguration"))
        })
    }

    fn describe_worker_configuration<'a>(
        &'a self,
        arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<WorkerConfigurationDescription>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_worker_configuration()
                .worker_configuration_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(translate::worker_configuration_description(&resp))
        })
    }

    fn delete_worker_configuration<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.client
                .delete_worker_configuration()
                .worker_configuration_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn list_worker_configurations<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            let resp = self
                .client
                .list_worker_configurations()
                .set_next_token(next_token.map(str::to_string))
                .send()
                .await
                .map_err(service_error)?;
            Ok(Page {
                items: resp
                    .worker_configurations()
                    .iter()
                    .filter_map(|w| w.worker_configuration_arn())
                    .map(str::to_string)
                    .collect(),
                next_token: resp.next_token().map(str::to_string),
            })
        })
    }

    fn tag_resource<'a>(&'a self, arn: &'a str, tags: &'a TagMap) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.client
                .tag_resource()
                .resource_arn(arn)
                .set_tags(Some(translate::string_map(tags)))
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn untag_resource<'a>(
        &'a self,
        arn: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.client
                .untag_resource()
                .resource_arn(arn)
                .set_tag_keys(Some(keys.to_vec()))
                .send()
                .await
                .map_err(service_error)?;
            Ok(())
        })
    }

    fn list_tags<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<TagMap>> {
        Box::pin(async move {
            let resp = self
                .client
                .list_tags_for_resource()
                .resource_arn(arn)
                .send()
                .await
                .map_err(service_error)?;
            Ok(resp
                .tags()
                .map(|tags| {
                    tags.iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                })
                .unwrap_or_default())
        })
    }
}
