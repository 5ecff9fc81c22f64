//! Resource models as CloudFormation sees them (PascalCase properties).

pub mod connector;
pub mod custom_plugin;
pub mod worker_configuration;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use connector::{Connector, ConnectorDescription};
pub use custom_plugin::{CustomPlugin, CustomPluginDescription};
pub use worker_configuration::{WorkerConfiguration, WorkerConfigurationDescription};

/// The three MSK Connect resource types handled by this provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Connector,
    CustomPlugin,
    WorkerConfiguration,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Connector,
        ResourceKind::CustomPlugin,
        ResourceKind::WorkerConfiguration,
    ];

    /// CloudFormation type name, e.g. `AWS::KafkaConnect::Connector`.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Connector => "AWS::KafkaConnect::Connector",
            Self::CustomPlugin => "AWS::KafkaConnect::CustomPlugin",
            Self::WorkerConfiguration => "AWS::KafkaConnect::WorkerConfiguration",
        }
    }

    /// Name used in API operation names, e.g. `DescribeConnector`.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Connector => "Connector",
            Self::CustomPlugin => "CustomPlugin",
            Self::WorkerConfiguration => "WorkerConfiguration",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single resource tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Behaviour shared by every resource model.
///
/// The primary identifier is the ARN; it is absent until Create learns it
/// from the service and never changes afterwards.
pub trait ResourceModel:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ResourceKind;

    fn identifier(&self) -> Option<&str>;

    fn set_identifier(&mut self, arn: String);

    /// A model carrying nothing but its identifier, as List reports it.
    fn from_identifier(arn: String) -> Self;

    fn tags(&self) -> &[Tag];

    fn set_tags(&mut self, tags: Vec<Tag>);

    /// The model with every updatable and read-only property cleared.
    /// Two models with different projections cannot be reconciled by Update.
    fn create_only(&self) -> Self;
}
