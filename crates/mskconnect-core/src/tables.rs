//! Terminal-state tables, one function per resource kind and stage.
//!
//! Each table is an exhaustive `match` over the kind's state enum, so a new
//! state cannot be added without deciding what every stage does with it.

const CREATING_CONFLICT: &str = "another process is creating this resource";
const UPDATING_CONFLICT: &str = "another process is updating this resource";
const DELETING_CONFLICT: &str = "another process is deleting this resource";

pub mod connector {
    use super::{CREATING_CONFLICT, DELETING_CONFLICT, UPDATING_CONFLICT};
    use crate::stabilize::Classification;
    use crate::state::ConnectorState;

    pub fn create(state: &ConnectorState) -> Classification {
        match state {
            ConnectorState::Running => Classification::Success,
            ConnectorState::Creating => Classification::Continue,
            ConnectorState::Failed => Classification::Failure("connector is FAILED".into()),
            ConnectorState::Updating => Classification::Conflict(UPDATING_CONFLICT.into()),
            ConnectorState::Deleting => Classification::Conflict(DELETING_CONFLICT.into()),
            ConnectorState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    pub fn update(state: &ConnectorState) -> Classification {
        match state {
            ConnectorState::Running => Classification::Success,
            ConnectorState::Updating => Classification::Continue,
            ConnectorState::Failed => Classification::Failure("connector is FAILED".into()),
            ConnectorState::Creating => Classification::Conflict(CREATING_CONFLICT.into()),
            ConnectorState::Deleting => Classification::Conflict(DELETING_CONFLICT.into()),
            ConnectorState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    /// Whether delete may be issued now.
    pub fn pre_delete(state: &ConnectorState) -> Classification {
        match state {
            ConnectorState::Running | ConnectorState::Failed => Classification::Success,
            ConnectorState::Creating | ConnectorState::Updating => Classification::Continue,
            ConnectorState::Deleting => Classification::Conflict(DELETING_CONFLICT.into()),
            ConnectorState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    /// After delete is issued. Success is signalled by NotFound on describe,
    /// never by a state, so no arm here returns `Success`.
    pub fn delete(state: &ConnectorState) -> Classification {
        match state {
            ConnectorState::Deleting
            | ConnectorState::Running
            | ConnectorState::Creating
            | ConnectorState::Updating => Classification::Continue,
            ConnectorState::Failed => {
                Classification::Failure("connector is FAILED after delete was issued".into())
            }
            ConnectorState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }
}

pub mod custom_plugin {
    use super::DELETING_CONFLICT;
    use crate::stabilize::Classification;
    use crate::state::CustomPluginState;

    pub fn create(state: &CustomPluginState) -> Classification {
        match state {
            CustomPluginState::Active => Classification::Success,
            CustomPluginState::Creating => Classification::Continue,
            CustomPluginState::CreateFailed => {
                Classification::Failure("custom plugin is CREATE_FAILED".into())
            }
            CustomPluginState::Deleting => Classification::Conflict(DELETING_CONFLICT.into()),
            CustomPluginState::Updating | CustomPluginState::UpdateFailed => {
                Classification::Unknown(state.as_str().to_string())
            }
            CustomPluginState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    pub fn pre_delete(state: &CustomPluginState) -> Classification {
        match state {
            CustomPluginState::Active
            | CustomPluginState::CreateFailed
            | CustomPluginState::UpdateFailed => Classification::Success,
            CustomPluginState::Creating | CustomPluginState::Updating => Classification::Continue,
            CustomPluginState::Deleting => Classification::Conflict(DELETING_CONFLICT.into()),
            CustomPluginState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    pub fn delete(state: &CustomPluginState) -> Classification {
        match state {
            CustomPluginState::Deleting => Classification::Continue,
            CustomPluginState::Creating
            | CustomPluginState::CreateFailed
            | CustomPluginState::Active
            | CustomPluginState::Updating
            | CustomPluginState::UpdateFailed => Classification::Failure(format!(
                "unexpected state {state} after delete was issued"
            )),
            CustomPluginState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }
}

pub mod worker_configuration {
    use super::DELETING_CONFLICT;
    use crate::stabilize::Classification;
    use crate::state::WorkerConfigurationState;

    pub fn pre_delete(state: &WorkerConfigurationState) -> Classification {
        match state {
            WorkerConfigurationState::Active => Classification::Success,
            WorkerConfigurationState::Deleting => {
                Classification::Conflict(DELETING_CONFLICT.into())
            }
            WorkerConfigurationState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }

    pub fn delete(state: &WorkerConfigurationState) -> Classification {
        match state {
            WorkerConfigurationState::Deleting => Classification::Continue,
            WorkerConfigurationState::Active => Classification::Failure(
                "unexpected state ACTIVE after delete was issued".into(),
            ),
            WorkerConfigurationState::Unknown(raw) => Classification::Unknown(raw.clone()),
        }
    }
}
