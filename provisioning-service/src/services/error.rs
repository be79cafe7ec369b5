use crate::services::context_store::StoreError;
use crate::services::mist::MistError;
use service_core::error::AppError;
use thiserror::Error;

pub const MISSING_CONTEXT_MESSAGE: &str =
    "Missing api_host or org_id in session context. Call POST /org/self first.";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mist(#[from] MistError),

    #[error("{}", MISSING_CONTEXT_MESSAGE)]
    MissingContext,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreUnavailable(anyhow::Error::new(err))
    }
}

impl From<MistError> for AppError {
    fn from(err: MistError) -> Self {
        match err {
            MistError::InvalidHost(host) => {
                AppError::BadRequest(anyhow::anyhow!("Invalid api_host: {}", host))
            }
            MistError::Status { status, body } => AppError::Upstream {
                status: Some(status),
                message: body,
            },
            other => AppError::Upstream {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => e.into(),
            ServiceError::Mist(e) => e.into(),
            ServiceError::MissingContext => {
                AppError::Precondition(MISSING_CONTEXT_MESSAGE.to_string())
            }
        }
    }
}
