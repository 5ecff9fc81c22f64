use mskconnect_core::state::{ConnectorState, CustomPluginState, WorkerConfigurationState};
use mskconnect_core::{Classification, tables};

fn connector_states() -> Vec<ConnectorState> {
    ["CREATING", "RUNNING", "UPDATING", "DELETING", "FAILED", "SOMETHING_NEW"]
        .into_iter()
        .map(ConnectorState::from)
        .collect()
}

fn custom_plugin_states() -> Vec<CustomPluginState> {
    [
        "CREATING",
        "CREATE_FAILED",
        "ACTIVE",
        "UPDATING",
        "UPDATE_FAILED",
        "DELETING",
        "SOMETHING_NEW",
    ]
    .into_iter()
    .map(CustomPluginState::from)
    .collect()
}

#[test]
fn connector_create_table() {
    use ConnectorState::*;
    assert_eq!(tables::connector::create(&Running), Classification::Success);
    assert_eq!(tables::connector::create(&Creating), Classification::Continue);
    assert!(matches!(tables::connector::create(&Failed), Classification::Failure(_)));
    assert!(matches!(tables::connector::create(&Updating), Classification::Conflict(_)));
    assert!(matches!(tables::connector::create(&Deleting), Classification::Conflict(_)));
}

#[test]
fn connector_update_table() {
    use ConnectorState::*;
    assert_eq!(tables::connector::update(&Running), Classification::Success);
    assert_eq!(tables::connector::update(&Updating), Classification::Continue);
    assert!(matches!(tables::connector::update(&Failed), Classification::Failure(_)));
    assert!(matches!(tables::connector::update(&Creating), Classification::Conflict(_)));
    assert!(matches!(tables::connector::update(&Deleting), Classification::Conflict(_)));
}

#[test]
fn connector_pre_delete_waits_out_in_flight_operations() {
    use ConnectorState::*;
    assert_eq!(tables::connector::pre_delete(&Running), Classification::Success);
    assert_eq!(tables::connector::pre_delete(&Failed), Classification::Success);
    assert_eq!(tables::connector::pre_delete(&Creating), Classification::Continue);
    assert_eq!(tables::connector::pre_delete(&Updating), Classification::Continue);
    assert!(matches!(tables::connector::pre_delete(&Deleting), Classification::Conflict(_)));
}

#[test]
fn custom_plugin_create_table() {
    use CustomPluginState::*;
    assert_eq!(tables::custom_plugin::create(&Active), Classification::Success);
    assert_eq!(tables::custom_plugin::create(&Creating), Classification::Continue);
    assert!(matches!(
        tables::custom_plugin::create(&CreateFailed),
        Classification::Failure(_)
    ));
    assert!(matches!(
        tables::custom_plugin::create(&Deleting),
        Classification::Conflict(_)
    ));
    assert_eq!(
        tables::custom_plugin::create(&Updating),
        Classification::Unknown("UPDATING".to_string())
    );
}

#[test]
fn custom_plugin_delete_only_continues_while_deleting() {
    for state in custom_plugin_states() {
        let classification = tables::custom_plugin::delete(&state);
        match state {
            CustomPluginState::Deleting => assert_eq!(classification, Classification::Continue),
            CustomPluginState::Unknown(_) => {
                assert!(matches!(classification, Classification::Unknown(_)))
            }
            _ => assert!(matches!(classification, Classification::Failure(_)), "{state}"),
        }
    }
}

#[test]
fn worker_configuration_tables() {
    use WorkerConfigurationState::*;
    assert_eq!(tables::worker_configuration::pre_delete(&Active), Classification::Success);
    assert!(matches!(
        tables::worker_configuration::pre_delete(&Deleting),
        Classification::Conflict(_)
    ));
    assert_eq!(tables::worker_configuration::delete(&Deleting), Classification::Continue);
    assert!(matches!(
        tables::worker_configuration::delete(&Active),
        Classification::Failure(_)
    ));
}

#[test]
fn delete_tables_never_report_success_from_a_state() {
    for state in connector_states() {
        assert_ne!(tables::connector::delete(&state), Classification::Success, "{state}");
    }
    for state in custom_plugin_states() {
        assert_ne!(tables::custom_plugin::delete(&state), Classification::Success, "{state}");
    }
    for state in ["ACTIVE", "DELETING", "SOMETHING_NEW"].map(WorkerConfigurationState::from) {
        assert_ne!(
            tables::worker_configuration::delete(&state),
            Classification::Success,
            "{state}"
        );
    }
}

#[test]
fn unrecognized_states_are_unknown_in_every_table() {
    let connector = ConnectorState::from("SOMETHING_NEW");
    for classify in [
        tables::connector::create,
        tables::connector::update,
        tables::connector::pre_delete,
        tables::connector::delete,
    ] {
        assert_eq!(
            classify(&connector),
            Classification::Unknown("SOMETHING_NEW".to_string())
        );
    }
}
