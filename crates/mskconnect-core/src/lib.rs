//! mskconnect-core
//!
//! Domain types and the stabilization engine shared by the MSK Connect
//! CloudFormation resource providers. No AWS SDK dependency: everything here
//! is pure data plus the polling state machine that drives each mutating
//! operation to a terminal state.
//!
//! Public API:
//! - `models`: resource models for Connector, CustomPlugin and WorkerConfiguration
//! - `state`: service-side lifecycle states
//! - `stabilize`: the generic poll → classify → wait engine
//! - `tables`: per-kind terminal-state tables the engine is parameterized by
//! - `tags`: tag set reconciliation
//! - `progress`: handler request/response envelope and callback context
//! - `error`: handler error taxonomy and the exception translator

pub mod error;
pub mod models;
pub mod progress;
pub mod stabilize;
pub mod state;
pub mod tables;
pub mod tags;

pub use crate::error::{HandlerError, HandlerErrorCode, ServiceError, ServiceErrorKind};
pub use crate::models::{
    Connector, ConnectorDescription, CustomPlugin, CustomPluginDescription, ResourceKind,
    ResourceModel, Tag, WorkerConfiguration, WorkerConfigurationDescription,
};
pub use crate::progress::{
    Action, CallbackContext, Credentials, HandlerRequest, OperationStatus, ProgressEvent,
};
pub use crate::stabilize::{
    Classification, Driven, PollDecision, PollPolicy, PollProgress, Stabilizer,
    StabilizationError, Stage, WaitMode,
};
pub use crate::tags::{TagChanges, TagMap};
