//! The stabilization engine.
//!
//! Every Create, Update and Delete handler issues one mutating call and then
//! re-describes the resource until it reaches a terminal state. This module
//! is that loop, written once and parameterized by:
//!
//! - a classification function mapping the observed description to a
//!   [`Classification`] (see [`crate::tables`]),
//! - an optional verifier run on success (Connector update uses it to catch
//!   a capacity change that silently reverted),
//! - a [`PollPolicy`] giving the delay between polls and the overall budget.
//!
//! The engine never sleeps on its own terms. [`Stabilizer::evaluate`] is a
//! single pure step that either completes or asks to be called again after
//! a delay with a new [`PollProgress`]. [`Stabilizer::drive`] wraps it for
//! the two execution substrates:
//!
//! - [`WaitMode::Blocking`]: sleep in-process and poll again.
//! - [`WaitMode::Reinvoke`]: hand the delay and progress back to the caller,
//!   which returns `IN_PROGRESS` and is re-invoked later with the progress
//!   stored in its callback context.
//!
//! Elapsed time is the sum of scheduled delays rather than wall-clock time,
//! so both substrates reach the same terminal outcome for the same sequence
//! of observed states.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{HandlerError, ServiceError, translate};
use crate::models::ResourceKind;

/// Delay between polls.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(30);

/// Give up waiting after this long.
pub const DEFAULT_STABILIZATION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Outcome of classifying one observed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Terminal, and the state the operation was aiming for.
    Success,
    /// Transient; poll again.
    Continue,
    /// Terminal failure reported by the service.
    Failure(String),
    /// Another lifecycle operation owns the resource right now.
    Conflict(String),
    /// Not a state this operation expects to observe.
    Unknown(String),
}

/// Which part of a lifecycle operation is being stabilized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Create,
    Update,
    /// Waiting for the resource to become deletable before issuing delete.
    PreDelete,
    Delete,
}

impl Stage {
    /// Name of the lifecycle operation this stage belongs to.
    pub fn operation(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::PreDelete | Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PreDelete => f.write_str("pre-delete check"),
            other => f.write_str(other.operation()),
        }
    }
}

/// Timing budget for one stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_POLL_DELAY,
            timeout: DEFAULT_STABILIZATION_TIMEOUT,
        }
    }
}

/// How a pending poll is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Sleep in-process, then poll again.
    Blocking,
    /// Return to the caller after each pending poll.
    Reinvoke,
}

impl WaitMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "blocking" => Some(Self::Blocking),
            "reinvoke" => Some(Self::Reinvoke),
            _ => None,
        }
    }
}

/// How far a stabilization has got. Carried across re-invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollProgress {
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Result of one poll step.
#[derive(Debug)]
pub enum PollDecision<D> {
    /// Terminal success. Carries the final observation unless the resource
    /// is gone (delete).
    Complete(Option<D>),
    /// Poll again after `delay`, resuming from `progress`.
    Retry {
        delay: Duration,
        progress: PollProgress,
    },
}

/// Result of [`Stabilizer::drive`].
#[derive(Debug)]
pub enum Driven<D> {
    Complete(Option<D>),
    /// Only produced under [`WaitMode::Reinvoke`].
    Suspend {
        delay: Duration,
        progress: PollProgress,
    },
}

#[derive(Debug, Error)]
pub enum StabilizationError {
    #[error("{kind} [{identifier}] entered a failed state during {stage}: {reason}")]
    Failed {
        kind: ResourceKind,
        identifier: String,
        stage: Stage,
        reason: String,
    },

    #[error("{kind} [{identifier}] conflicts with another operation during {stage}: {reason}")]
    Conflict {
        kind: ResourceKind,
        identifier: String,
        stage: Stage,
        reason: String,
    },

    #[error(
        "{stage} request for {kind} [{identifier}] was accepted but current state is unknown: {state}"
    )]
    UnknownState {
        kind: ResourceKind,
        identifier: String,
        stage: Stage,
        state: String,
    },

    #[error("{kind} [{identifier}] reverted to previous state after update")]
    Reverted {
        kind: ResourceKind,
        identifier: String,
    },

    #[error("{kind} [{identifier}] did not reach a terminal state within {timeout:?} during {stage}")]
    TimedOut {
        kind: ResourceKind,
        identifier: String,
        stage: Stage,
        timeout: Duration,
    },

    #[error("could not verify {kind} [{identifier}] before delete: {source}")]
    Precheck {
        kind: ResourceKind,
        identifier: String,
        source: ServiceError,
    },

    #[error("could not describe {kind} [{identifier}] while stabilizing {stage}: {source}")]
    Describe {
        kind: ResourceKind,
        identifier: String,
        stage: Stage,
        source: ServiceError,
    },
}

impl From<StabilizationError> for HandlerError {
    fn from(err: StabilizationError) -> Self {
        let message = err.to_string();
        match err {
            StabilizationError::Failed {
                kind, identifier, ..
            }
            | StabilizationError::TimedOut {
                kind, identifier, ..
            } => HandlerError::NotStabilized {
                type_name: kind.type_name(),
                identifier,
                reason: message,
            },
            StabilizationError::Conflict {
                kind,
                identifier,
                reason,
                ..
            } => HandlerError::ResourceConflict {
                type_name: kind.type_name(),
                identifier,
                reason,
            },
            StabilizationError::UnknownState {
                kind,
                identifier,
                stage,
                ..
            } => HandlerError::general(kind, identifier, stage.operation(), message),
            StabilizationError::Reverted { kind, identifier } => {
                HandlerError::general(kind, identifier, Stage::Update.operation(), message)
            }
            StabilizationError::Precheck {
                kind,
                identifier,
                source,
            } => translate(&source, kind, &identifier, "pre-delete check"),
            StabilizationError::Describe {
                kind,
                identifier,
                stage,
                source,
            } => translate(&source, kind, &identifier, &format!("{stage} stabilization")),
        }
    }
}

type Verifier<'a, D> = Box<dyn Fn(&D) -> bool + Send + Sync + 'a>;

/// One stabilization: a resource, a stage, and the table to judge it by.
pub struct Stabilizer<'a, D> {
    kind: ResourceKind,
    stage: Stage,
    identifier: &'a str,
    policy: PollPolicy,
    classify: fn(&D) -> Classification,
    verify: Option<Verifier<'a, D>>,
}

impl<'a, D> Stabilizer<'a, D> {
    pub fn new(
        kind: ResourceKind,
        stage: Stage,
        identifier: &'a str,
        classify: fn(&D) -> Classification,
    ) -> Self {
        Self {
            kind,
            stage,
            identifier,
            policy: PollPolicy::default(),
            classify,
            verify: None,
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extra check applied when the table reports success. A `false` result
    /// means the requested change did not stick.
    pub fn with_verifier(mut self, verify: impl Fn(&D) -> bool + Send + Sync + 'a) -> Self {
        self.verify = Some(Box::new(verify));
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Judge a single describe result.
    pub fn evaluate(
        &self,
        observed: Result<D, ServiceError>,
        progress: PollProgress,
    ) -> Result<PollDecision<D>, StabilizationError> {
        let observed = match observed {
            Ok(observed) => observed,
            Err(err) if err.is_not_found() && self.stage == Stage::Delete => {
                tracing::debug!(
                    resource_type = %self.kind,
                    identifier = %self.identifier,
                    attempts = progress.attempts,
                    "resource no longer exists"
                );
                return Ok(PollDecision::Complete(None));
            }
            Err(source) if self.stage == Stage::PreDelete => {
                return Err(StabilizationError::Precheck {
                    kind: self.kind,
                    identifier: self.identifier.to_string(),
                    source,
                });
            }
            Err(source) => {
                return Err(StabilizationError::Describe {
                    kind: self.kind,
                    identifier: self.identifier.to_string(),
                    stage: self.stage,
                    source,
                });
            }
        };

        match (self.classify)(&observed) {
            Classification::Success => {
                if let Some(verify) = &self.verify {
                    if !verify(&observed) {
                        return Err(StabilizationError::Reverted {
                            kind: self.kind,
                            identifier: self.identifier.to_string(),
                        });
                    }
                }
                tracing::debug!(
                    resource_type = %self.kind,
                    identifier = %self.identifier,
                    stage = %self.stage,
                    attempts = progress.attempts,
                    "stabilized"
                );
                Ok(PollDecision::Complete(Some(observed)))
            }
            Classification::Continue => {
                let elapsed = progress.elapsed + self.policy.delay;
                if elapsed > self.policy.timeout {
                    return Err(StabilizationError::TimedOut {
                        kind: self.kind,
                        identifier: self.identifier.to_string(),
                        stage: self.stage,
                        timeout: self.policy.timeout,
                    });
                }
                tracing::debug!(
                    resource_type = %self.kind,
                    identifier = %self.identifier,
                    stage = %self.stage,
                    attempts = progress.attempts,
                    "not stabilized yet"
                );
                Ok(PollDecision::Retry {
                    delay: self.policy.delay,
                    progress: PollProgress {
                        attempts: progress.attempts + 1,
                        elapsed,
                    },
                })
            }
            Classification::Failure(reason) => Err(StabilizationError::Failed {
                kind: self.kind,
                identifier: self.identifier.to_string(),
                stage: self.stage,
                reason,
            }),
            Classification::Conflict(reason) => Err(StabilizationError::Conflict {
                kind: self.kind,
                identifier: self.identifier.to_string(),
                stage: self.stage,
                reason,
            }),
            Classification::Unknown(state) => Err(StabilizationError::UnknownState {
                kind: self.kind,
                identifier: self.identifier.to_string(),
                stage: self.stage,
                state,
            }),
        }
    }

    /// Poll until terminal (blocking) or until the first pending poll
    /// (reinvoke). `progress` is where a resumed operation left off.
    pub async fn drive<F, Fut>(
        &self,
        mode: WaitMode,
        mut progress: PollProgress,
        mut describe: F,
    ) -> Result<Driven<D>, StabilizationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<D, ServiceError>>,
    {
        loop {
            let observed = describe().await;
            match self.evaluate(observed, progress)? {
                PollDecision::Complete(last) => return Ok(Driven::Complete(last)),
                PollDecision::Retry {
                    delay,
                    progress: next,
                } => match mode {
                    WaitMode::Blocking => {
                        tokio::time::sleep(delay).await;
                        progress = next;
                    }
                    WaitMode::Reinvoke => {
                        return Ok(Driven::Suspend {
                            delay,
                            progress: next,
                        });
                    }
                },
            }
        }
    }
}
