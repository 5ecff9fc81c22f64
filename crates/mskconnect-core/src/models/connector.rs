use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ResourceKind, ResourceModel, Tag};
use crate::state::ConnectorState;

/// Worker MCU count the service assumes when a provisioned capacity omits it.
pub const DEFAULT_MCU_COUNT: i32 = 1;

/// `AWS::KafkaConnect::Connector`.
///
/// Only `Capacity` and `Tags` are updatable; everything else is create-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_configuration: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_cluster: Option<KafkaCluster>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_cluster_client_authentication: Option<KafkaClusterClientAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_cluster_encryption_in_transit: Option<KafkaClusterEncryptionInTransit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_connect_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_delivery: Option<LogDelivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Plugin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_execution_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_configuration: Option<WorkerConfigurationReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capacity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AutoScaling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_capacity: Option<ProvisionedCapacity>,
}

impl Capacity {
    /// Whether `observed` carries every value this capacity asks for.
    ///
    /// Properties left unset here (e.g. a provisioned MCU count) accept
    /// whatever the service chose.
    pub fn satisfied_by(&self, observed: Option<&Capacity>) -> bool {
        let Some(observed) = observed else {
            return false;
        };

        let auto_scaling_ok = match (&self.auto_scaling, &observed.auto_scaling) {
            (None, _) => true,
            (Some(want), Some(have)) => want == have,
            (Some(_), None) => false,
        };

        let provisioned_ok = match (&self.provisioned_capacity, &observed.provisioned_capacity) {
            (None, _) => true,
            (Some(want), Some(have)) => {
                want.worker_count == have.worker_count
                    && want.mcu_count.is_none_or(|mcu| Some(mcu) == have.mcu_count)
            }
            (Some(_), None) => false,
        };

        auto_scaling_ok && provisioned_ok
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoScaling {
    pub max_worker_count: i32,
    pub mcu_count: i32,
    pub min_worker_count: i32,
    pub scale_in_policy: ScalingPolicy,
    pub scale_out_policy: ScalingPolicy,
}

/// Shared shape of `ScaleInPolicy` and `ScaleOutPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScalingPolicy {
    pub cpu_utilization_percentage: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedCapacity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcu_count: Option<i32>,
    pub worker_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KafkaCluster {
    pub apache_kafka_cluster: ApacheKafkaCluster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApacheKafkaCluster {
    pub bootstrap_servers: String,
    pub vpc: Vpc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
    pub subnets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KafkaClusterClientAuthentication {
    /// `NONE` or `IAM`.
    pub authentication_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KafkaClusterEncryptionInTransit {
    /// `PLAINTEXT` or `TLS`.
    pub encryption_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogDelivery {
    pub worker_log_delivery: WorkerLogDelivery,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerLogDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_watch_logs: Option<CloudWatchLogsLogDelivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firehose: Option<FirehoseLogDelivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3LogDelivery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudWatchLogsLogDelivery {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirehoseLogDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_stream: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3LogDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Plugin {
    pub custom_plugin: CustomPluginReference,
}

/// A pinned revision of a custom plugin, as referenced by a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomPluginReference {
    pub custom_plugin_arn: String,
    pub revision: i64,
}

/// A pinned revision of a worker configuration, as referenced by a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerConfigurationReference {
    pub revision: i64,
    pub worker_configuration_arn: String,
}

/// What `DescribeConnector` reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorDescription {
    pub state: ConnectorState,
    /// Required by the service to update or delete the connector.
    pub current_version: Option<String>,
    pub model: Connector,
}

impl ResourceModel for Connector {
    const KIND: ResourceKind = ResourceKind::Connector;

    fn identifier(&self) -> Option<&str> {
        self.connector_arn.as_deref()
    }

    fn set_identifier(&mut self, arn: String) {
        self.connector_arn = Some(arn);
    }

    fn from_identifier(arn: String) -> Self {
        Self {
            connector_arn: Some(arn),
            ..Self::default()
        }
    }

    fn tags(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or_default()
    }

    fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = Some(tags);
    }

    fn create_only(&self) -> Self {
        Self {
            capacity: None,
            connector_arn: None,
            tags: None,
            ..self.clone()
        }
    }
}
