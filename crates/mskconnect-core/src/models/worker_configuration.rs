use serde::{Deserialize, Serialize};

use super::{ResourceKind, ResourceModel, Tag};
use crate::state::WorkerConfigurationState;

/// `AWS::KafkaConnect::WorkerConfiguration`. Tags are the only updatable
/// property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkerConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base64-encoded `connect-distributed.properties` content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties_file_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_configuration_arn: Option<String>,
}

/// What `DescribeWorkerConfiguration` reports.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfigurationDescription {
    pub state: WorkerConfigurationState,
    pub model: WorkerConfiguration,
}

impl ResourceModel for WorkerConfiguration {
    const KIND: ResourceKind = ResourceKind::WorkerConfiguration;

    fn identifier(&self) -> Option<&str> {
        self.worker_configuration_arn.as_deref()
    }

    fn set_identifier(&mut self, arn: String) {
        self.worker_configuration_arn = Some(arn);
    }

    fn from_identifier(arn: String) -> Self {
        Self {
            worker_configuration_arn: Some(arn),
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
            description: self.description.clone(),
            name: self.name.clone(),
            properties_file_content: self.properties_file_content.clone(),
            ..Self::default()
        }
    }
}
