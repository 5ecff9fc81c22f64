use serde::{Deserialize, Serialize};

use super::{ResourceKind, ResourceModel, Tag};
use crate::state::CustomPluginState;

/// `AWS::KafkaConnect::CustomPlugin`. Tags are the only updatable property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomPlugin {
    /// `JAR` or `ZIP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_plugin_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_description: Option<CustomPluginFileDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<CustomPluginLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomPluginLocation {
    pub s3_location: S3Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3Location {
    pub bucket_arn: String,
    pub file_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_version: Option<String>,
}

/// Read-only details of the uploaded plugin file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomPluginFileDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_md5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

/// What `DescribeCustomPlugin` reports.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPluginDescription {
    pub state: CustomPluginState,
    pub model: CustomPlugin,
}

impl ResourceModel for CustomPlugin {
    const KIND: ResourceKind = ResourceKind::CustomPlugin;

    fn identifier(&self) -> Option<&str> {
        self.custom_plugin_arn.as_deref()
    }

    fn set_identifier(&mut self, arn: String) {
        self.custom_plugin_arn = Some(arn);
    }

    fn from_identifier(arn: String) -> Self {
        Self {
            custom_plugin_arn: Some(arn),
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
            content_type: self.content_type.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            name: self.name.clone(),
            ..Self::default()
        }
    }
}
