//! In-memory `KafkaConnectApi` replaying scripted describe results and
//! recording every call made against it.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use mskconnect_core::models::connector::{Capacity, ProvisionedCapacity};
use mskconnect_core::state::{ConnectorState, CustomPluginState, WorkerConfigurationState};
use mskconnect_core::tags::TagMap;
use mskconnect_core::{
    Connector, ConnectorDescription, CustomPlugin, CustomPluginDescription, PollPolicy,
    ResourceKind, ServiceError, ServiceErrorKind, WaitMode, WorkerConfiguration,
    WorkerConfigurationDescription,
};
use mskconnect_provider::client::ApiResult;
use mskconnect_provider::{BoxFuture, KafkaConnectApi, Page, ProviderConfig};

pub const CONNECTOR_ARN: &str = "arn:aws:kafkaconnect:us-east-1:123456789012:connector/c1/abc";
pub const PLUGIN_ARN: &str = "arn:aws:kafkaconnect:us-east-1:123456789012:custom-plugin/p1/def";
pub const WORKER_ARN: &str =
    "arn:aws:kafkaconnect:us-east-1:123456789012:worker-configuration/w1/ghi";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { kind: ResourceKind, tags: TagMap },
    Describe(ResourceKind),
    UpdateConnector { current_version: String, capacity: Capacity },
    Delete { kind: ResourceKind, current_version: Option<String> },
    List { kind: ResourceKind, next_token: Option<String> },
    Tag(TagMap),
    Untag(Vec<String>),
    ListTags,
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::Create { .. }
                | Call::UpdateConnector { .. }
                | Call::Delete { .. }
                | Call::Tag(_)
                | Call::Untag(_)
        )
    }
}

/// Describe results are consumed in order; the last one repeats forever.
struct Script<D>(Mutex<VecDeque<ApiResult<D>>>);

impl<D: Clone> Script<D> {
    fn new() -> Self {
        Self(Mutex::new(VecDeque::new()))
    }

    fn set(&self, results: Vec<ApiResult<D>>) {
        *self.0.lock().unwrap() = results.into();
    }

    fn next(&self) -> ApiResult<D> {
        let mut queue = self.0.lock().unwrap();
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        next.unwrap_or_else(|| Err(not_found()))
    }
}

pub struct FakeKafkaConnect {
    connectors: Script<ConnectorDescription>,
    custom_plugins: Script<CustomPluginDescription>,
    worker_configurations: Script<WorkerConfigurationDescription>,
    failures: Mutex<HashMap<&'static str, ServiceError>>,
    pages: Mutex<VecDeque<Page<String>>>,
    tags: Mutex<TagMap>,
    calls: Mutex<Vec<Call>>,
}

impl FakeKafkaConnect {
    pub fn new() -> Self {
        Self {
            connectors: Script::new(),
            custom_plugins: Script::new(),
            worker_configurations: Script::new(),
            failures: Mutex::new(HashMap::new()),
            pages: Mutex::new(VecDeque::new()),
            tags: Mutex::new(TagMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_connectors(self, results: Vec<ApiResult<ConnectorDescription>>) -> Self {
        self.connectors.set(results);
        self
    }

    pub fn with_custom_plugins(self, results: Vec<ApiResult<CustomPluginDescription>>) -> Self {
        self.custom_plugins.set(results);
        self
    }

    pub fn with_worker_configurations(
        self,
        results: Vec<ApiResult<WorkerConfigurationDescription>>,
    ) -> Self {
        self.worker_configurations.set(results);
        self
    }

    /// Make the named mutating operation (e.g. `"CreateConnector"`) fail.
    pub fn failing(self, operation: &'static str, err: ServiceError) -> Self {
        self.failures.lock().unwrap().insert(operation, err);
        self
    }

    pub fn with_pages(self, pages: Vec<Page<String>>) -> Self {
        *self.pages.lock().unwrap() = pages.into();
        self
    }

    pub fn with_tags(self, tags: &[(&str, &str)]) -> Self {
        *self.tags.lock().unwrap() = tag_map(tags);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutating).collect()
    }

    pub fn describe_count(&self, kind: ResourceKind) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::Describe(kind))
            .count()
    }

    pub fn current_tags(&self) -> TagMap {
        self.tags.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self, operation: &str) -> ApiResult<()> {
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn next_page(&self) -> Page<String> {
        self.pages.lock().unwrap().pop_front().unwrap_or_default()
    }
}

impl KafkaConnectApi for FakeKafkaConnect {
    fn create_connector<'a>(
        &'a self,
        _model: &'a Connector,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            self.record(Call::Create {
                kind: ResourceKind::Connector,
                tags: tags.clone(),
            });
            self.outcome("CreateConnector")?;
            *self.tags.lock().unwrap() = tags.clone();
            Ok(CONNECTOR_ARN.to_string())
        })
    }

    fn describe_connector<'a>(
        &'a self,
        _arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<ConnectorDescription>> {
        Box::pin(async move {
            self.record(Call::Describe(ResourceKind::Connector));
            self.connectors.next()
        })
    }

    fn update_connector<'a>(
        &'a self,
        _arn: &'a str,
        current_version: &'a str,
        capacity: &'a Capacity,
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::UpdateConnector {
                current_version: current_version.to_string(),
                capacity: capacity.clone(),
            });
            self.outcome("UpdateConnector")
        })
    }

    fn delete_connector<'a>(
        &'a self,
        _arn: &'a str,
        current_version: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::Delete {
                kind: ResourceKind::Connector,
                current_version: current_version.map(str::to_string),
            });
            self.outcome("DeleteConnector")
        })
    }

    fn list_connectors<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            self.record(Call::List {
                kind: ResourceKind::Connector,
                next_token: next_token.map(str::to_string),
            });
            self.outcome("ListConnectors")?;
            Ok(self.next_page())
        })
    }

    fn create_custom_plugin<'a>(
        &'a self,
        _model: &'a CustomPlugin,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            self.record(Call::Create {
                kind: ResourceKind::CustomPlugin,
                tags: tags.clone(),
            });
            self.outcome("CreateCustomPlugin")?;
            *self.tags.lock().unwrap() = tags.clone();
            Ok(PLUGIN_ARN.to_string())
        })
    }

    fn describe_custom_plugin<'a>(
        &'a self,
        _arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<CustomPluginDescription>> {
        Box::pin(async move {
            self.record(Call::Describe(ResourceKind::CustomPlugin));
            self.custom_plugins.next()
        })
    }

    fn delete_custom_plugin<'a>(&'a self, _arn: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::Delete {
                kind: ResourceKind::CustomPlugin,
                current_version: None,
            });
            self.outcome("DeleteCustomPlugin")
        })
    }

    fn list_custom_plugins<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            self.record(Call::List {
                kind: ResourceKind::CustomPlugin,
                next_token: next_token.map(str::to_string),
            });
            self.outcome("ListCustomPlugins")?;
            Ok(self.next_page())
        })
    }

    fn create_worker_configuration<'a>(
        &'a self,
        _model: &'a WorkerConfiguration,
        tags: &'a TagMap,
    ) -> BoxFuture<'a, ApiResult<String>> {
        Box::pin(async move {
            self.record(Call::Create {
                kind: ResourceKind::WorkerConfiguration,
                tags: tags.clone(),
            });
            self.outcome("CreateWorkerConfiguration")?;
            *self.tags.lock().unwrap() = tags.clone();
            Ok(WORKER_ARN.to_string())
        })
    }

    fn describe_worker_configuration<'a>(
        &'a self,
        _arn: &'a str,
    ) -> BoxFuture<'a, ApiResult<WorkerConfigurationDescription>> {
        Box::pin(async move {
            self.record(Call::Describe(ResourceKind::WorkerConfiguration));
            self.worker_configurations.next()
        })
    }

    fn delete_worker_configuration<'a>(&'a self, _arn: &'a str) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::Delete {
                kind: ResourceKind::WorkerConfiguration,
                current_version: None,
            });
            self.outcome("DeleteWorkerConfiguration")
        })
    }

    fn list_worker_configurations<'a>(
        &'a self,
        next_token: Option<&'a str>,
    ) -> BoxFuture<'a, ApiResult<Page<String>>> {
        Box::pin(async move {
            self.record(Call::List {
                kind: ResourceKind::WorkerConfiguration,
                next_token: next_token.map(str::to_string),
            });
            self.outcome("ListWorkerConfigurations")?;
            Ok(self.next_page())
        })
    }

    fn tag_resource<'a>(&'a self, _arn: &'a str, tags: &'a TagMap) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::Tag(tags.clone()));
            self.outcome("TagResource")?;
            self.tags.lock().unwrap().extend(tags.clone());
            Ok(())
        })
    }

    fn untag_resource<'a>(
        &'a self,
        _arn: &'a str,
        keys: &'a [String],
    ) -> BoxFuture<'a, ApiResult<()>> {
        Box::pin(async move {
            self.record(Call::Untag(keys.to_vec()));
            self.outcome("UntagResource")?;
            let mut current = self.tags.lock().unwrap();
            for key in keys {
                current.remove(key);
            }
            Ok(())
        })
    }

    fn list_tags<'a>(&'a self, _arn: &'a str) -> BoxFuture<'a, ApiResult<TagMap>> {
        Box::pin(async move {
            self.record(Call::ListTags);
            Ok(self.current_tags())
        })
    }
}

pub fn tag_map(pairs: &[(&str, &str)]) -> TagMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn not_found() -> ServiceError {
    ServiceError::new(ServiceErrorKind::NotFound, "resource does not exist")
}

pub fn provisioned(workers: i32) -> Capacity {
    Capacity {
        auto_scaling: None,
        provisioned_capacity: Some(ProvisionedCapacity {
            mcu_count: Some(1),
            worker_count: workers,
        }),
    }
}

/// The connector model the service reports for `c1`.
pub fn connector_model(capacity: Capacity) -> Connector {
    Connector {
        connector_arn: Some(CONNECTOR_ARN.to_string()),
        connector_name: Some("c1".to_string()),
        kafka_connect_version: Some("2.7.1".to_string()),
        capacity: Some(capacity),
        ..Connector::default()
    }
}

pub fn connector(state: &str, capacity: Capacity) -> ApiResult<ConnectorDescription> {
    Ok(ConnectorDescription {
        state: ConnectorState::from(state),
        current_version: Some("KTVPDKIKX0DER".to_string()),
        model: connector_model(capacity),
    })
}

pub fn plugin_model() -> CustomPlugin {
    CustomPlugin {
        custom_plugin_arn: Some(PLUGIN_ARN.to_string()),
        name: Some("p1".to_string()),
        content_type: Some("ZIP".to_string()),
        revision: Some(1),
        ..CustomPlugin::default()
    }
}

pub fn plugin(state: &str) -> ApiResult<CustomPluginDescription> {
    Ok(CustomPluginDescription {
        state: CustomPluginState::from(state),
        model: plugin_model(),
    })
}

pub fn worker_model() -> WorkerConfiguration {
    WorkerConfiguration {
        worker_configuration_arn: Some(WORKER_ARN.to_string()),
        name: Some("w1".to_string()),
        properties_file_content: Some("a2V5LmNvbnZlcnRlcj1qc29u".to_string()),
        revision: Some(1),
        ..WorkerConfiguration::default()
    }
}

pub fn worker(state: &str) -> ApiResult<WorkerConfigurationDescription> {
    Ok(WorkerConfigurationDescription {
        state: WorkerConfigurationState::from(state),
        model: worker_model(),
    })
}

pub fn blocking() -> ProviderConfig {
    ProviderConfig {
        poll: PollPolicy::default(),
        wait_mode: WaitMode::Blocking,
    }
}

pub fn reinvoke() -> ProviderConfig {
    ProviderConfig {
        poll: PollPolicy {
            delay: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        },
        wait_mode: WaitMode::Reinvoke,
    }
}
