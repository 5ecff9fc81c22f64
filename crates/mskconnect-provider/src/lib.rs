//! mskconnect-provider
//!
//! CloudFormation resource handlers for MSK Connect connectors, custom
//! plugins and worker configurations.
//!
//! Public API:
//! - `ResourceHandler`: Create/Read/Update/Delete/List per resource kind
//! - `KafkaConnectApi`: the service client the handlers call
//! - `KafkaConnectClient`: `KafkaConnectApi` over `aws-sdk-kafkaconnect`
//! - `dispatch()`: route a raw request to the right handler
//! - `ProviderConfig`: poll timing and wait mode, read from the environment

pub mod aws;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;

pub use crate::aws::KafkaConnectClient;
pub use crate::client::{BoxFuture, KafkaConnectApi, Page};
pub use crate::config::ProviderConfig;
pub use crate::dispatch::dispatch;
pub use crate::error::ProviderError;
pub use crate::handlers::{
    ConnectorHandler, CustomPluginHandler, ResourceHandler, WorkerConfigurationHandler,
};
