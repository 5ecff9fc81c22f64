//! The service operations the handlers need, behind a trait so handlers
//! can run against the real SDK client or an in-memory fake.

use std::future::Future;
use std::pin::Pin;

use mskconnect_core::models::connector::Capacity;
use mskconnect_core::tags::TagMap;
use mskconnect_core::{
    Connector, ConnectorDescription, CustomPlugin, CustomPluginDescription, ServiceError,
    WorkerConfiguration, WorkerConfigurationDescription,
};

/// Boxed `Send` future, so the trait stays dyn-compatible.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type ApiResult<T> = Result<T, ServiceError>;

/// One page of a List call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

/// MSK Connect, as seen by the handlers.
///
/// Create calls return the new resource's ARN. Describe calls return the
/// resource's state plus everything readable about it, with the ARN set.
/// List calls return ARNs.
pub trait KafkaConnectApi: Send + Sync {
    fn create_connector<'a>(
        &'a self,
        model: &'a Connector,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>>;

    fn describe_connector<'a>(&'a self, arn: &'a str)
    -> BoxFuture<'a, ApiResult<ConnectorDescription>>;

    /// Change capacity; `current_version` guards against concurrent updates.
    fn update_connector<'a>(
        &'a self,
        arn: &'a str,
        current_version: &'a str,
        capacity: &'a Capacity,
    ) -> BoxFuture<'a, ApiResult<()>>;

    fn delete_connector<'a>(
        &'a self,
        arn: &'a str,
        current_version: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<()>>;

    fn list_connectors<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>>;

    fn create_custom_plugin<'a>(
        &'a self,
        model: &'a CustomPlugin,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>>;

    fn describe_custom_plugin<'a>(
        &'a self,
        arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<CustomPluginDescription>>;

    fn delete_custom_plugin<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<()>>;

    fn list_custom_plugins<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>>;

    fn create_worker_configuration<'a>(
        &'a self,
        model: &'a WorkerConfiguration,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>>;

    fn describe_worker_configuration<'a>(
        &'a self,
        arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<WorkerConfigurationDescription>>;

    fn delete_worker_configuration<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<()>>;

    fn list_worker_configurations<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>>;

    fn tag_resource<'a>(&'a self, arn: &'a str, tags: &'a TagMap) -> BoxFuture<'a, ApiResult<()>>;

    fn untag_resource<'a>(
        &'a self,
        arn: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, ApiResult<()>>;

    fn list_tags<'a>(&'a self, arn: &'a str) -> BoxFuture<'a, ApiResult<TagMap>>;
}
