//! The request/response envelope exchanged with the hosting layer.
//!
//! A handler receives a [`HandlerRequest`] and answers with a
//! [`ProgressEvent`]. An `IN_PROGRESS` answer carries a [`CallbackContext`]
//! and the delay after which the host re-invokes the same handler with that
//! context, so a long stabilization can span many invocations.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, HandlerErrorCode};
use crate::models::ResourceModel;
use crate::stabilize::{PollProgress, Stage};
use crate::tags::{self, TagMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failed,
    InProgress,
}

/// Caller credentials forwarded by the host, used for every service call
/// made on the caller's behalf.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// State threaded between re-invocations of one logical operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    /// The stage to resume. `None` means the operation has not started.
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub elapsed_seconds: u64,
}

impl CallbackContext {
    pub fn resume(stage: Stage, progress: PollProgress) -> Self {
        Self {
            stage: Some(stage),
            attempts: progress.attempts,
            elapsed_seconds: progress.elapsed.as_secs(),
        }
    }

    pub fn progress(&self) -> PollProgress {
        PollProgress {
            attempts: self.attempts,
            elapsed: Duration::from_secs(self.elapsed_seconds),
        }
    }
}

/// One handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest<M> {
    pub action: Action,
    pub resource_type: String,
    #[serde(default)]
    pub desired_resource_state: Option<M>,
    #[serde(default)]
    pub previous_resource_state: Option<M>,
    /// Stack-level tags CloudFormation propagates to every resource.
    #[serde(default)]
    pub desired_resource_tags: TagMap,
    #[serde(default)]
    pub previous_resource_tags: TagMap,
    #[serde(default)]
    pub system_tags: TagMap,
    #[serde(default)]
    pub previous_system_tags: TagMap,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub callback_context: Option<CallbackContext>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub logical_resource_identifier: Option<String>,
    #[serde(default)]
    pub client_request_token: Option<String>,
}

impl<M> HandlerRequest<M> {
    /// Convert the carried models, e.g. from raw JSON to a typed model.
    pub fn try_map_models<N, E>(
        self,
        mut convert: impl FnMut(M) -> Result<N, E>,
    ) -> Result<HandlerRequest<N>, E> {
        Ok(HandlerRequest {
            action: self.action,
            resource_type: self.resource_type,
            desired_resource_state: self.desired_resource_state.map(&mut convert).transpose()?,
            previous_resource_state: self.previous_resource_state.map(&mut convert).transpose()?,
            desired_resource_tags: self.desired_resource_tags,
            previous_resource_tags: self.previous_resource_tags,
            system_tags: self.system_tags,
            previous_system_tags: self.previous_system_tags,
            next_token: self.next_token,
            callback_context: self.callback_context,
            credentials: self.credentials,
            region: self.region,
            logical_resource_identifier: self.logical_resource_identifier,
            client_request_token: self.client_request_token,
        })
    }

    pub fn stage(&self) -> Option<Stage> {
        self.callback_context.as_ref().and_then(|c| c.stage)
    }

    pub fn progress(&self) -> PollProgress {
        self.callback_context
            .as_ref()
            .map(CallbackContext::progress)
            .unwrap_or_default()
    }
}

impl<M: ResourceModel> HandlerRequest<M> {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            resource_type: M::KIND.type_name().to_string(),
            desired_resource_state: None,
            previous_resource_state: None,
            desired_resource_tags: TagMap::new(),
            previous_resource_tags: TagMap::new(),
            system_tags: TagMap::new(),
            previous_system_tags: TagMap::new(),
            next_token: None,
            callback_context: None,
            credentials: None,
            region: None,
            logical_resource_identifier: None,
            client_request_token: None,
        }
    }

    pub fn with_desired(mut self, model: M) -> Self {
        self.desired_resource_state = Some(model);
        self
    }

    pub fn with_previous(mut self, model: M) -> Self {
        self.previous_resource_state = Some(model);
        self
    }

    pub fn with_callback_context(mut self, context: CallbackContext) -> Self {
        self.callback_context = Some(context);
        self
    }

    /// Every tag the resource should carry: model tags, stack tags and
    /// system tags.
    pub fn desired_tags(&self) -> TagMap {
        let model_tags = self
            .desired_resource_state
            .as_ref()
            .map(|m| tags::from_tags(m.tags()))
            .unwrap_or_default();
        tags::merge([&self.desired_resource_tags, &model_tags, &self.system_tags])
    }

    /// The tag set the previous deployment asked for.
    pub fn previous_tags(&self) -> TagMap {
        let model_tags = self
            .previous_resource_state
            .as_ref()
            .map(|m| tags::from_tags(m.tags()))
            .unwrap_or_default();
        tags::merge([
            &self.previous_resource_tags,
            &model_tags,
            &self.previous_system_tags,
        ])
    }
}

/// A handler's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
    #[serde(default)]
    pub callback_delay_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<M> ProgressEvent<M> {
    fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: None,
            callback_context: None,
            callback_delay_seconds: 0,
            error_code: None,
            message: None,
            next_token: None,
        }
    }

    pub fn success(model: M) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::empty(OperationStatus::Success)
        }
    }

    /// Success with no model, as Delete reports it.
    pub fn done() -> Self {
        Self::empty(OperationStatus::Success)
    }

    pub fn listed(models: Vec<M>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::empty(OperationStatus::Success)
        }
    }

    pub fn in_progress(model: M, context: CallbackContext, delay: Duration) -> Self {
        Self {
            resource_model: Some(model),
            callback_context: Some(context),
            callback_delay_seconds: delay.as_secs(),
            ..Self::empty(OperationStatus::InProgress)
        }
    }

    pub fn failed(err: &HandlerError) -> Self {
        Self {
            error_code: Some(err.code()),
            message: Some(err.to_string()),
            ..Self::empty(OperationStatus::Failed)
        }
    }

    /// Failure outside any resource kind, e.g. an unroutable request.
    pub fn rejected(code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(code),
            message: Some(message.into()),
            ..Self::empty(OperationStatus::Failed)
        }
    }

    pub fn try_map_models<N, E>(
        self,
        mut convert: impl FnMut(M) -> Result<N, E>,
    ) -> Result<ProgressEvent<N>, E> {
        Ok(ProgressEvent {
            status: self.status,
            resource_model: self.resource_model.map(&mut convert).transpose()?,
            resource_models: self
                .resource_models
                .map(|models| {
                    models
                        .into_iter()
                        .map(&mut convert)
                        .collect::<Result<Vec<N>, E>>()
                })
                .transpose()?,
            callback_context: self.callback_context,
            callback_delay_seconds: self.callback_delay_seconds,
            error_code: self.error_code,
            message: self.message,
            next_token: self.next_token,
        })
    }
}
