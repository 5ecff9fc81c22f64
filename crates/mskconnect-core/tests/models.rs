use mskconnect_core::models::connector::{
    AutoScaling, Capacity, ProvisionedCapacity, ScalingPolicy, Vpc,
};
use mskconnect_core::state::{ConnectorState, CustomPluginState, WorkerConfigurationState};
use mskconnect_core::{
    Connector, CustomPlugin, ResourceKind, ResourceModel, Tag, WorkerConfiguration,
};
use serde_json::json;

fn provisioned(workers: i32, mcu: Option<i32>) -> Capacity {
    Capacity {
        auto_scaling: None,
        provisioned_capacity: Some(ProvisionedCapacity {
            mcu_count: mcu,
            worker_count: workers,
        }),
    }
}

#[test]
fn connector_deserializes_from_pascal_case() {
    let model: Connector = serde_json::from_value(json!({
        "ConnectorName": "orders-sink",
        "KafkaConnectVersion": "2.7.1",
        "Capacity": {
            "AutoScaling": {
                "MaxWorkerCount": 4,
                "McuCount": 2,
                "MinWorkerCount": 1,
                "ScaleInPolicy": { "CpuUtilizationPercentage": 20 },
                "ScaleOutPolicy": { "CpuUtilizationPercentage": 80 }
            }
        },
        "KafkaCluster": {
            "ApacheKafkaCluster": {
                "BootstrapServers": "b-1.example:9098",
                "Vpc": { "Subnets": ["subnet-1"] }
            }
        },
        "Tags": [{ "Key": "team", "Value": "data" }]
    }))
    .unwrap();

    assert_eq!(model.connector_name.as_deref(), Some("orders-sink"));
    let auto = model.capacity.unwrap().auto_scaling.unwrap();
    assert_eq!(auto.max_worker_count, 4);
    assert_eq!(auto.scale_out_policy.cpu_utilization_percentage, 80);
    let cluster = model.kafka_cluster.unwrap().apache_kafka_cluster;
    assert!(cluster.vpc.security_groups.is_empty());
    assert_eq!(model.tags.unwrap(), vec![Tag::new("team", "data")]);
}

#[test]
fn unset_properties_are_not_serialized() {
    let model = Connector::from_identifier("arn:connector".to_string());
    assert_eq!(
        serde_json::to_value(&model).unwrap(),
        json!({ "ConnectorArn": "arn:connector" })
    );
}

#[test]
fn omitted_security_groups_stay_omitted() {
    let vpc: Vpc = serde_json::from_value(json!({ "Subnets": ["subnet-1"] })).unwrap();
    assert_eq!(
        serde_json::to_value(&vpc).unwrap(),
        json!({ "Subnets": ["subnet-1"] })
    );
}

#[test]
fn connector_create_only_drops_updatable_and_read_only_properties() {
    let mut a = Connector {
        connector_name: Some("orders-sink".to_string()),
        capacity: Some(provisioned(2, None)),
        tags: Some(vec![Tag::new("team", "data")]),
        ..Connector::default()
    };
    a.set_identifier("arn:a".to_string());
    let b = Connector {
        connector_name: Some("orders-sink".to_string()),
        capacity: Some(provisioned(8, Some(4))),
        ..Connector::default()
    };
    assert_eq!(a.create_only(), b.create_only());

    let renamed = Connector {
        connector_name: Some("orders-sink-v2".to_string()),
        ..b.clone()
    };
    assert_ne!(renamed.create_only(), b.create_only());
}

#[test]
fn custom_plugin_and_worker_configuration_projections() {
    let plugin = CustomPlugin {
        name: Some("debezium".to_string()),
        revision: Some(3),
        custom_plugin_arn: Some("arn:plugin".to_string()),
        ..CustomPlugin::default()
    };
    assert_eq!(
        plugin.create_only(),
        CustomPlugin {
            name: Some("debezium".to_string()),
            ..CustomPlugin::default()
        }
    );

    let worker = WorkerConfiguration {
        name: Some("defaults".to_string()),
        properties_file_content: Some("a2V5LmNvbnZlcnRlcj0=".to_string()),
        revision: Some(1),
        tags: Some(vec![Tag::new("env", "prod")]),
        ..WorkerConfiguration::default()
    };
    let projected = worker.create_only();
    assert_eq!(projected.revision, None);
    assert_eq!(projected.tags, None);
    assert_eq!(projected.properties_file_content, worker.properties_file_content);
}

#[test]
fn provisioned_capacity_without_mcu_accepts_service_default() {
    let desired = provisioned(2, None);
    assert!(desired.satisfied_by(Some(&provisioned(2, Some(1)))));
    assert!(!desired.satisfied_by(Some(&provisioned(3, Some(1)))));
    assert!(!provisioned(2, Some(2)).satisfied_by(Some(&provisioned(2, Some(1)))));
    assert!(!desired.satisfied_by(None));
}

#[test]
fn auto_scaling_must_match_exactly() {
    let auto = |max| Capacity {
        auto_scaling: Some(AutoScaling {
            max_worker_count: max,
            mcu_count: 1,
            min_worker_count: 1,
            scale_in_policy: ScalingPolicy {
                cpu_utilization_percentage: 20,
            },
            scale_out_policy: ScalingPolicy {
                cpu_utilization_percentage: 80,
            },
        }),
        provisioned_capacity: None,
    };
    assert!(auto(4).satisfied_by(Some(&auto(4))));
    assert!(!auto(4).satisfied_by(Some(&auto(2))));
    assert!(!auto(4).satisfied_by(Some(&provisioned(4, None))));
}

#[test]
fn resource_kinds_round_trip_through_type_names() {
    for kind in ResourceKind::ALL {
        assert_eq!(ResourceKind::from_type_name(kind.type_name()), Some(kind));
    }
    assert_eq!(ResourceKind::from_type_name("AWS::MSK::Cluster"), None);
    assert_eq!(ResourceKind::CustomPlugin.to_string(), "AWS::KafkaConnect::CustomPlugin");
}

#[test]
fn state_parsing_is_total() {
    assert_eq!(ConnectorState::from("RUNNING"), ConnectorState::Running);
    assert_eq!(
        ConnectorState::from("PAUSED"),
        ConnectorState::Unknown("PAUSED".to_string())
    );
    assert_eq!(ConnectorState::from("PAUSED").to_string(), "PAUSED");
    assert_eq!(
        CustomPluginState::from("CREATE_FAILED"),
        CustomPluginState::CreateFailed
    );
    assert_eq!(CustomPluginState::UpdateFailed.as_str(), "UPDATE_FAILED");
    assert_eq!(
        WorkerConfigurationState::from("DELETING"),
        WorkerConfigurationState::Deleting
    );
}
