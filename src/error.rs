// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// How the API server answered a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotFound,
    MethodNotSupported,
    Invalid,
    Conflict,
    Other,
}

/// A classified failure of a single List/Delete/Patch/discovery call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }

    pub fn is_method_not_supported(&self) -> bool {
        self.kind == ApiErrorKind::MethodNotSupported
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == ApiErrorKind::Invalid
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ApiErrorKind::Conflict
    }
}

impl From<kube::Error> for ApiError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => {
                let kind = match (resp.code, resp.reason.as_str()) {
                    (404, _) | (_, "NotFound") => ApiErrorKind::NotFound,
                    (405, _) | (_, "MethodNotAllowed") => ApiErrorKind::MethodNotSupported,
                    (422, _) | (_, "Invalid") => ApiErrorKind::Invalid,
                    (409, _) | (_, "Conflict") => ApiErrorKind::Conflict,
                    _ => ApiErrorKind::Other,
                };
                ApiError::new(kind, resp.message)
            }
            other => ApiError::new(ApiErrorKind::Other, other.to_string()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ReaperError {
    #[error("Failed to create Kubernetes client: {0}")]
    KubeconfigError(String),

    #[error("Failed to discover namespaced API resources")]
    DiscoveryError(#[source] ApiError),

    #[error("Failed to list {resource}")]
    ListError {
        resource: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to delete {target}")]
    DeleteError {
        target: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to remove finalizers from {target}")]
    PatchError {
        target: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to parse status of APIService {name}")]
    StatusError {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to clean namespace {namespace}")]
    NamespaceCleanupError {
        namespace: String,
        #[source]
        source: Box<ReaperError>,
    },
}

pub type Result<T> = std::result::Result<T, ReaperError>;
