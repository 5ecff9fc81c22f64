use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ResourceKind;

/// Error categories the MSK Connect API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    NotFound,
    BadRequest,
    Conflict,
    InternalServerError,
    Unauthorized,
    Forbidden,
    TooManyRequests,
    ServiceUnavailable,
    Other,
}

impl ServiceErrorKind {
    /// Map an API error code (e.g. `NotFoundException`) to its kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "NotFoundException" => Self::NotFound,
            "BadRequestException" => Self::BadRequest,
            "ConflictException" => Self::Conflict,
            "InternalServerErrorException" => Self::InternalServerError,
            "UnauthorizedException" => Self::Unauthorized,
            "ForbiddenException" => Self::Forbidden,
            "TooManyRequestsException" => Self::TooManyRequests,
            "ServiceUnavailableException" => Self::ServiceUnavailable,
            _ => Self::Other,
        }
    }
}

/// A failed call to the service, already stripped of SDK types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ServiceErrorKind::NotFound
    }
}

/// Error codes understood by the hosting orchestration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    NotFound,
    InvalidRequest,
    AlreadyExists,
    InternalFailure,
    AccessDenied,
    ServiceLimitExceeded,
    NotUpdatable,
    ResourceConflict,
    NotStabilized,
    GeneralServiceException,
}

/// A classified handler failure. Once built it is reported as-is; nothing
/// upstream retries or reclassifies it.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Resource of type '{type_name}' with identifier '{identifier}' was not found.")]
    NotFound {
        type_name: &'static str,
        identifier: String,
    },

    #[error("Invalid request provided for {type_name}: {message}")]
    InvalidRequest {
        type_name: &'static str,
        message: String,
    },

    #[error("Resource of type '{type_name}' with identifier '{identifier}' already exists.")]
    AlreadyExists {
        type_name: &'static str,
        identifier: String,
    },

    #[error(
        "Internal error reported from downstream service during operation '{operation}' on {type_name} [{identifier}]: {message}"
    )]
    InternalFailure {
        type_name: &'static str,
        identifier: String,
        operation: String,
        message: String,
    },

    #[error("Access denied for operation '{operation}' on {type_name} [{identifier}]: {message}")]
    AccessDenied {
        type_name: &'static str,
        identifier: String,
        operation: String,
        message: String,
    },

    #[error("Limit exceeded for resource of type '{type_name}' [{identifier}]. Reason: {reason}")]
    ServiceLimitExceeded {
        type_name: &'static str,
        identifier: String,
        reason: String,
    },

    #[error(
        "Resource of type '{type_name}' with identifier '{identifier}' is not updatable with parameters provided."
    )]
    NotUpdatable {
        type_name: &'static str,
        identifier: String,
    },

    #[error(
        "Resource of type '{type_name}' with identifier '{identifier}' has a conflict. Reason: {reason}."
    )]
    ResourceConflict {
        type_name: &'static str,
        identifier: String,
        reason: String,
    },

    #[error(
        "Resource of type '{type_name}' with identifier '{identifier}' did not stabilize. Reason: {reason}"
    )]
    NotStabilized {
        type_name: &'static str,
        identifier: String,
        reason: String,
    },

    #[error("Error occurred during operation '{operation}' on {type_name} [{identifier}]: {message}")]
    GeneralService {
        type_name: &'static str,
        identifier: String,
        operation: String,
        message: String,
    },
}

impl HandlerError {
    pub fn code(&self) -> HandlerErrorCode {
        match self {
            Self::NotFound { .. } => HandlerErrorCode::NotFound,
            Self::InvalidRequest { .. } => HandlerErrorCode::InvalidRequest,
            Self::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
            Self::InternalFailure { .. } => HandlerErrorCode::InternalFailure,
            Self::AccessDenied { .. } => HandlerErrorCode::AccessDenied,
            Self::ServiceLimitExceeded { .. } => HandlerErrorCode::ServiceLimitExceeded,
            Self::NotUpdatable { .. } => HandlerErrorCode::NotUpdatable,
            Self::ResourceConflict { .. } => HandlerErrorCode::ResourceConflict,
            Self::NotStabilized { .. } => HandlerErrorCode::NotStabilized,
            Self::GeneralService { .. } => HandlerErrorCode::GeneralServiceException,
        }
    }

    pub fn not_found(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: kind.type_name(),
            identifier: identifier.into(),
        }
    }

    pub fn invalid_request(kind: ResourceKind, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            type_name: kind.type_name(),
            message: message.into(),
        }
    }

    pub fn not_updatable(kind: ResourceKind, identifier: impl Into<String>) -> Self {
        Self::NotUpdatable {
            type_name: kind.type_name(),
            identifier: identifier.into(),
        }
    }

    pub fn general(
        kind: ResourceKind,
        identifier: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::GeneralService {
            type_name: kind.type_name(),
            identifier: identifier.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Classify a service error at the handler boundary.
///
/// Total: anything without a dedicated mapping becomes `GeneralService`.
pub fn translate(
    err: &ServiceError,
    kind: ResourceKind,
    identifier: &str,
    operation: &str,
) -> HandlerError {
    let type_name = kind.type_name();
    let identifier = identifier.to_string();
    let message = err.message.clone();

    match err.kind {
        ServiceErrorKind::NotFound => HandlerError::NotFound {
            type_name,
            identifier,
        },
        ServiceErrorKind::BadRequest => HandlerError::InvalidRequest {
            type_name,
            message: format!("{operation} [{identifier}]: {message}"),
        },
        ServiceErrorKind::Conflict => HandlerError::AlreadyExists {
            type_name,
            identifier,
        },
        ServiceErrorKind::InternalServerError => HandlerError::InternalFailure {
            type_name,
            identifier,
            operation: operation.to_string(),
            message,
        },
        ServiceErrorKind::Unauthorized | ServiceErrorKind::Forbidden => HandlerError::AccessDenied {
            type_name,
            identifier,
            operation: operation.to_string(),
            message,
        },
        ServiceErrorKind::TooManyRequests => HandlerError::ServiceLimitExceeded {
            type_name,
            identifier,
            reason: message,
        },
        ServiceErrorKind::ServiceUnavailable | ServiceErrorKind::Other => {
            HandlerError::GeneralService {
                type_name,
                identifier,
                operation: operation.to_string(),
                message,
            }
        }
    }
}
