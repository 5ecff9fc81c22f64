//! Field mapping between resource models and `aws-sdk-kafkaconnect` shapes.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_kafkaconnect::error::BuildError;
use aws_sdk_kafkaconnect::operation::describe_connector::DescribeConnectorOutput;
use aws_sdk_kafkaconnect::operation::describe_custom_plugin::DescribeCustomPluginOutput;
use aws_sdk_kafkaconnect::operation::describe_worker_configuration::DescribeWorkerConfigurationOutput;
use aws_sdk_kafkaconnect::types;

use mskconnect_core::models::connector::{
    ApacheKafkaCluster, AutoScaling, Capacity, CloudWatchLogsLogDelivery, CustomPluginReference,
    DEFAULT_MCU_COUNT, FirehoseLogDelivery, KafkaCluster, KafkaClusterClientAuthentication,
    KafkaClusterEncryptionInTransit, LogDelivery, Plugin, ProvisionedCapacity, S3LogDelivery,
    ScalingPolicy, Vpc, WorkerConfigurationReference, WorkerLogDelivery,
};
use mskconnect_core::models::custom_plugin::{
    CustomPluginFileDescription, CustomPluginLocation, S3Location,
};
use mskconnect_core::state::{ConnectorState, CustomPluginState, WorkerConfigurationState};
use mskconnect_core::{
    Connector, ConnectorDescription, CustomPlugin, CustomPluginDescription, WorkerConfiguration,
    WorkerConfigurationDescription,
};

/// Shape builders return `Result` only when the shape has required members.
/// `built()` gives both kinds the same signature.
pub(crate) trait Built {
    type Output;

    fn built(self) -> Result<Self::Output, BuildError>;
}

impl<T> Built for Result<T, BuildError> {
    type Output = T;

    fn built(self) -> Result<T, BuildError> {
        self
    }
}

macro_rules! infallible_shapes {
    ($($shape:ty),* $(,)?) => {
        $(
            impl Built for $shape {
                type Output = $shape;

                fn built(self) -> Result<$shape, BuildError> {
                    Ok(self)
                }
            }
        )*
    };
}

infallible_shapes!(
    types::Capacity,
    types::CapacityUpdate,
    types::AutoScaling,
    types::AutoScalingUpdate,
    types::ScaleInPolicy,
    types::ScaleInPolicyUpdate,
    types::ScaleOutPolicy,
    types::ScaleOutPolicyUpdate,
    types::ProvisionedCapacity,
    types::ProvisionedCapacityUpdate,
    types::KafkaCluster,
    types::ApacheKafkaCluster,
    types::Vpc,
    types::KafkaClusterClientAuthentication,
    types::KafkaClusterEncryptionInTransit,
    types::LogDelivery,
    types::WorkerLogDelivery,
    types::CloudWatchLogsLogDelivery,
    types::FirehoseLogDelivery,
    types::S3LogDelivery,
    types::Plugin,
    types::CustomPlugin,
    types::WorkerConfiguration,
    types::CustomPluginLocation,
    types::S3Location,
);

/// Description getters return scalars either bare or wrapped, depending on
/// whether the member is required. Normalize to `Option`.
fn opt<T>(value: impl Into<Option<T>>) -> Option<T> {
    value.into()
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

pub(crate) fn string_map(map: &BTreeMap<String, String>) -> HashMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

// Model → request shapes

pub(crate) fn capacity(model: &Capacity) -> Result<types::Capacity, BuildError> {
    let auto_scaling = match &model.auto_scaling {
        Some(a) => Some(
            types::AutoScaling::builder()
                .max_worker_count(a.max_worker_count)
                .mcu_count(a.mcu_count)
                .min_worker_count(a.min_worker_count)
                .scale_in_policy(
                    types::ScaleInPolicy::builder()
                        .cpu_utilization_percentage(a.scale_in_policy.cpu_utilization_percentage)
                        .build()
                        .built()?,
                )
                .scale_out_policy(
                    types::ScaleOutPolicy::builder()
                        .cpu_utilization_percentage(a.scale_out_policy.cpu_utilization_percentage)
                        .build()
                        .built()?,
                )
                .build()
                .built()?,
        ),
        None => None,
    };
    let provisioned = match &model.provisioned_capacity {
        Some(p) => Some(
            types::ProvisionedCapacity::builder()
                .set_mcu_count(p.mcu_count)
                .worker_count(p.worker_count)
                .build()
                .built()?,
        ),
        None => None,
    };
    types::Capacity::builder()
        .set_auto_scaling(auto_scaling)
        .set_provisioned_capacity(provisioned)
        .build()
        .built()
}

/// `UpdateConnector` takes its own update shapes, structurally the same as
/// the create ones.
pub(crate) fn capacity_update(model: &Capacity) -> Result<types::CapacityUpdate, BuildError> {
    let auto_scaling = match &model.auto_scaling {
        Some(a) => Some(
            types::AutoScalingUpdate::builder()
                .max_worker_count(a.max_worker_count)
                .mcu_count(a.mcu_count)
                .min_worker_count(a.min_worker_count)
                .scale_in_policy(
                    types::ScaleInPolicyUpdate::builder()
                        .cpu_utilization_percentage(a.scale_in_policy.cpu_utilization_percentage)
                        .build()
                        .built()?,
                )
                .scale_out_policy(
                    types::ScaleOutPolicyUpdate::builder()
                        .cpu_utilization_percentage(a.scale_out_policy.cpu_utilization_percentage)
                        .build()
                        .built()?,
                )
                .build()
                .built()?,
        ),
        None => None,
    };
    let provisioned = match &model.provisioned_capacity {
        Some(p) => Some(
            types::ProvisionedCapacityUpdate::builder()
                .mcu_count(p.mcu_count.unwrap_or(DEFAULT_MCU_COUNT))
                .worker_count(p.worker_count)
                .build()
                .built()?,
        ),
        None => None,
    };
    types::CapacityUpdate::builder()
        .set_auto_scaling(auto_scaling)
        .set_provisioned_capacity(provisioned)
        .build()
        .built()
}

pub(crate) fn kafka_cluster(model: &KafkaCluster) -> Result<types::KafkaCluster, BuildError> {
    let cluster = &model.apache_kafka_cluster;
    let vpc = types::Vpc::builder()
        .set_security_groups(Some(cluster.vpc.security_groups.clone()))
        .set_subnets(Some(cluster.vpc.subnets.clone()))
        .build()
        .built()?;
    types::KafkaCluster::builder()
        .apache_kafka_cluster(
            types::ApacheKafkaCluster::builder()
                .bootstrap_servers(&cluster.bootstrap_servers)
                .vpc(vpc)
                .build()
                .built()?,
        )
        .build()
        .built()
}

pub(crate) fn client_authentication(
    model: &KafkaClusterClientAuthentication,
) -> Result<types::KafkaClusterClientAuthentication, BuildError> {
    types::KafkaClusterClientAuthentication::builder()
        .authentication_type(types::KafkaClusterClientAuthenticationType::from(
            model.authentication_type.as_str(),
        ))
        .build()
        .built()
}

pub(crate) fn encryption_in_transit(
    model: &KafkaClusterEncryptionInTransit,
) -> Result<types::KafkaClusterEncryptionInTransit, BuildError> {
    types::KafkaClusterEncryptionInTransit::builder()
        .encryption_type(types::KafkaClusterEncryptionInTransitType::from(
            model.encryption_type.as_str(),
        ))
        .build()
        .built()
}

pub(crate) fn log_delivery(model: &LogDelivery) -> Result<types::LogDelivery, BuildError> {
    let worker = &model.worker_log_delivery;
    let cloud_watch_logs = match &worker.cloud_watch_logs {
        Some(c) => Some(
            types::CloudWatchLogsLogDelivery::builder()
                .enabled(c.enabled)
                .set_log_group(c.log_group.clone())
                .build()
                .built()?,
        ),
        None => None,
    };
    let firehose = match &worker.firehose {
        Some(f) => Some(
            types::FirehoseLogDelivery::builder()
                .enabled(f.enabled)
                .set_delivery_stream(f.delivery_stream.clone())
                .build()
                .built()?,
        ),
        None => None,
    };
    let s3 = match &worker.s3 {
        Some(s) => Some(
            types::S3LogDelivery::builder()
                .enabled(s.enabled)
                .set_bucket(s.bucket.clone())
                .set_prefix(s.prefix.clone())
                .build()
                .built()?,
        ),
        None => None,
    };
    types::LogDelivery::builder()
        .worker_log_delivery(
            types::WorkerLogDelivery::builder()
                .set_cloud_watch_logs(cloud_watch_logs)
                .set_firehose(firehose)
                .set_s3(s3)
                .build()
                .built()?,
        )
        .build()
        .built()
}

pub(crate) fn plugin(model: &Plugin) -> Result<types::Plugin, BuildError> {
    types::Plugin::builder()
        .custom_plugin(
            types::CustomPlugin::builder()
                .custom_plugin_arn(&model.custom_plugin.custom_plugin_arn)
                .revision(model.custom_plugin.revision)
                .build()
                .built()?,
        )
        .build()
        .built()
}

pub(crate) fn worker_configuration_reference(
    model: &WorkerConfigurationReference,
) -> Result<types::WorkerConfiguration, BuildError> {
    types::WorkerConfiguration::builder()
        .revision(model.revision)
        .worker_configuration_arn(&model.worker_configuration_arn)
        .build()
        .built()
}

pub(crate) fn custom_plugin_location(
    model: &CustomPluginLocation,
) -> Result<types::CustomPluginLocation, BuildError> {
    let s3 = &model.s3_location;
    types::CustomPluginLocation::builder()
        .s3_location(
            types::S3Location::builder()
                .bucket_arn(&s3.bucket_arn)
                .file_key(&s3.file_key)
                .set_object_version(s3.object_version.clone())
                .build()
                .built()?,
        )
        .build()
        .built()
}

pub(crate) fn content_type(raw: &str) -> types::CustomPluginContentType {
    types::CustomPluginContentType::from(raw)
}

// Describe outputs → models

pub(crate) fn connector_description(output: &DescribeConnectorOutput) -> ConnectorDescription {
    let state = opt::<&types::ConnectorState>(output.connector_state())
        .map(|s| ConnectorState::from(s.as_str()))
        .unwrap_or_else(|| ConnectorState::Unknown(String::new()));

    let plugins: Vec<Plugin> = output
        .plugins()
        .iter()
        .filter_map(|p| opt::<&types::CustomPluginDescription>(p.custom_plugin()))
        .map(|c| Plugin {
            custom_plugin: CustomPluginReference {
                custom_plugin_arn: opt::<&str>(c.custom_plugin_arn())
                    .unwrap_or_default()
                    .to_string(),
                revision: opt::<i64>(c.revision()).unwrap_or_default(),
            },
        })
        .collect();

    let model = Connector {
        capacity: opt::<&types::CapacityDescription>(output.capacity()).map(capacity_from),
        connector_arn: owned(opt(output.connector_arn())),
        connector_configuration: opt::<&HashMap<String, String>>(output.connector_configuration())
            .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        connector_description: owned(opt(output.connector_description())),
        connector_name: owned(opt(output.connector_name())),
        kafka_cluster: opt::<&types::KafkaClusterDescription>(output.kafka_cluster())
            .and_then(|c| opt::<&types::ApacheKafkaClusterDescription>(c.apache_kafka_cluster()))
            .map(kafka_cluster_from),
        kafka_cluster_client_authentication: opt::<
            &types::KafkaClusterClientAuthenticationDescription,
        >(output.kafka_cluster_client_authentication())
        .and_then(|a| {
            opt::<&types::KafkaClusterClientAuthenticationType>(a.authentication_type())
        })
        .map(|t| KafkaClusterClientAuthentication {
            authentication_type: t.as_str().to_string(),
        }),
        kafka_cluster_encryption_in_transit: opt::<
            &types::KafkaClusterEncryptionInTransitDescription,
        >(output.kafka_cluster_encryption_in_transit())
        .and_then(|e| opt::<&types::KafkaClusterEncryptionInTransitType>(e.encryption_type()))
        .map(|t| KafkaClusterEncryptionInTransit {
            encryption_type: t.as_str().to_string(),
        }),
        kafka_connect_version: owned(opt(output.kafka_connect_version())),
        log_delivery: opt::<&types::LogDeliveryDescription>(output.log_delivery())
            .and_then(|l| opt::<&types::WorkerLogDeliveryDescription>(l.worker_log_delivery()))
            .map(log_delivery_from),
        plugins: (!plugins.is_empty()).then_some(plugins),
        service_execution_role_arn: owned(opt(output.service_execution_role_arn())),
        worker_configuration: opt::<&types::WorkerConfigurationDescription>(
            output.worker_configuration(),
        )
        .map(|w| WorkerConfigurationReference {
            revision: opt::<i64>(w.revision()).unwrap_or_default(),
            worker_configuration_arn: opt::<&str>(w.worker_configuration_arn())
                .unwrap_or_default()
                .to_string(),
        }),
        tags: None,
    };

    ConnectorDescription {
        state,
        current_version: owned(opt(output.current_version())),
        model,
    }
}

fn capacity_from(description: &types::CapacityDescription) -> Capacity {
    Capacity {
        auto_scaling: opt::<&types::AutoScalingDescription>(description.auto_scaling()).map(|a| {
            AutoScaling {
                max_worker_count: opt::<i32>(a.max_worker_count()).unwrap_or_default(),
                mcu_count: opt::<i32>(a.mcu_count()).unwrap_or_default(),
                min_worker_count: opt::<i32>(a.min_worker_count()).unwrap_or_default(),
                scale_in_policy: ScalingPolicy {
                    cpu_utilization_percentage: opt::<&types::ScaleInPolicyDescription>(
                        a.scale_in_policy(),
                    )
                    .and_then(|p| opt::<i32>(p.cpu_utilization_percentage()))
                    .unwrap_or_default(),
                },
                scale_out_policy: ScalingPolicy {
                    cpu_utilization_percentage: opt::<&types::ScaleOutPolicyDescription>(
                        a.scale_out_policy(),
                    )
                    .and_then(|p| opt::<i32>(p.cpu_utilization_percentage()))
                    .unwrap_or_default(),
                },
            }
        }),
        provisioned_capacity: opt::<&types::ProvisionedCapacityDescription>(
            description.provisioned_capacity(),
        )
        .map(|p| ProvisionedCapacity {
            mcu_count: opt::<i32>(p.mcu_count()),
            worker_count: opt::<i32>(p.worker_count()).unwrap_or_default(),
        }),
    }
}

fn kafka_cluster_from(cluster: &types::ApacheKafkaClusterDescription) -> KafkaCluster {
    let vpc = opt::<&types::VpcDescription>(cluster.vpc())
        .map(|v| Vpc {
            security_groups: v.security_groups().to_vec(),
            subnets: v.subnets().to_vec(),
        })
        .unwrap_or_default();
    KafkaCluster {
        apache_kafka_cluster: ApacheKafkaCluster {
            bootstrap_servers: opt::<&str>(cluster.bootstrap_servers())
                .unwrap_or_default()
                .to_string(),
            vpc,
        },
    }
}

fn log_delivery_from(worker: &types::WorkerLogDeliveryDescription) -> LogDelivery {
    LogDelivery {
        worker_log_delivery: WorkerLogDelivery {
            cloud_watch_logs: opt::<&types::CloudWatchLogsLogDeliveryDescription>(
                worker.cloud_watch_logs(),
            )
            .map(|c| CloudWatchLogsLogDelivery {
                enabled: opt::<bool>(c.enabled()).unwrap_or_default(),
                log_group: owned(opt(c.log_group())),
            }),
            firehose: opt::<&types::FirehoseLogDeliveryDescription>(worker.firehose()).map(|f| {
                FirehoseLogDelivery {
                    delivery_stream: owned(opt(f.delivery_stream())),
                    enabled: opt::<bool>(f.enabled()).unwrap_or_default(),
                }
            }),
            s3: opt::<&types::S3LogDeliveryDescription>(worker.s3()).map(|s| S3LogDelivery {
                bucket: owned(opt(s.bucket())),
                enabled: opt::<bool>(s.enabled()).unwrap_or_default(),
                prefix: owned(opt(s.prefix())),
            }),
        },
    }
}

pub(crate) fn custom_plugin_description(
    output: &DescribeCustomPluginOutput,
) -> CustomPluginDescription {
    let state = opt::<&types::CustomPluginState>(output.custom_plugin_state())
        .map(|s| CustomPluginState::from(s.as_str()))
        .unwrap_or_else(|| CustomPluginState::Unknown(String::new()));
    let revision = opt::<&types::CustomPluginRevisionSummary>(output.latest_revision());

    let model = CustomPlugin {
        content_type: revision
            .and_then(|r| opt::<&types::CustomPluginContentType>(r.content_type()))
            .map(|t| t.as_str().to_string()),
        custom_plugin_arn: owned(opt(output.custom_plugin_arn())),
        description: owned(opt(output.description())),
        file_description: revision
            .and_then(|r| opt::<&types::CustomPluginFileDescription>(r.file_description()))
            .map(|f| CustomPluginFileDescription {
                file_md5: owned(opt(f.file_md5())),
                file_size: opt::<i64>(f.file_size()),
            }),
        location: revision
            .and_then(|r| opt::<&types::CustomPluginLocationDescription>(r.location()))
            .and_then(|l| opt::<&types::S3LocationDescription>(l.s3_location()))
            .map(|s| CustomPluginLocation {
                s3_location: S3Location {
                    bucket_arn: opt::<&str>(s.bucket_arn()).unwrap_or_default().to_string(),
                    file_key: opt::<&str>(s.file_key()).unwrap_or_default().to_string(),
                    object_version: owned(opt(s.object_version())),
                },
            }),
        name: owned(opt(output.name())),
        revision: revision.and_then(|r| opt::<i64>(r.revision())),
        tags: None,
    };

    CustomPluginDescription { state, model }
}

pub(crate) fn worker_configuration_description(
    output: &DescribeWorkerConfigurationOutput,
) -> WorkerConfigurationDescription {
    let state = opt::<&types::WorkerConfigurationState>(output.worker_configuration_state())
        .map(|s| WorkerConfigurationState::from(s.as_str()))
        .unwrap_or_else(|| WorkerConfigurationState::Unknown(String::new()));
    let revision =
        opt::<&types::WorkerConfigurationRevisionDescription>(output.latest_revision());

    let model = WorkerConfiguration {
        description: owned(opt(output.description())),
        name: owned(opt(output.name())),
        properties_file_content: revision
            .and_then(|r| opt::<&str>(r.properties_file_content()))
            .map(str::to_string),
        revision: revision.and_then(|r| opt::<i64>(r.revision())),
        tags: None,
        worker_configuration_arn: owned(opt(output.worker_configuration_arn())),
    };

    WorkerConfigurationDescription { state, model }
}
