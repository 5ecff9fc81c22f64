//! Service-side lifecycle states.
//!
//! These are observed, never owned: every value comes from a describe call.
//! Parsing is total, so a state the service introduces later lands in
//! `Unknown` with its raw text instead of failing deserialization.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectorState {
    Creating,
    Running,
    Updating,
    Deleting,
    Failed,
    Unknown(String),
}

impl ConnectorState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "CREATING",
            Self::Running => "RUNNING",
            Self::Updating => "UPDATING",
            Self::Deleting => "DELETING",
            Self::Failed => "FAILED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for ConnectorState {
    fn from(raw: &str) -> Self {
        match raw {
            "CREATING" => Self::Creating,
            "RUNNING" => Self::Running,
            "UPDATING" => Self::Updating,
            "DELETING" => Self::Deleting,
            "FAILED" => Self::Failed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomPluginState {
    Creating,
    CreateFailed,
    Active,
    Updating,
    UpdateFailed,
    Deleting,
    Unknown(String),
}

impl CustomPluginState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "CREATING",
            Self::CreateFailed => "CREATE_FAILED",
            Self::Active => "ACTIVE",
            Self::Updating => "UPDATING",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::Deleting => "DELETING",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for CustomPluginState {
    fn from(raw: &str) -> Self {
        match raw {
            "CREATING" => Self::Creating,
            "CREATE_FAILED" => Self::CreateFailed,
            "ACTIVE" => Self::Active,
            "UPDATING" => Self::Updating,
            "UPDATE_FAILED" => Self::UpdateFailed,
            "DELETING" => Self::Deleting,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for CustomPluginState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkerConfigurationState {
    Active,
    Deleting,
    Unknown(String),
}

impl WorkerConfigurationState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleting => "DELETING",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for WorkerConfigurationState {
    fn from(raw: &str) -> Self {
        match raw {
            "ACTIVE" => Self::Active,
            "DELETING" => Self::Deleting,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for WorkerConfigurationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
