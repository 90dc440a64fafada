use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(code) = err.find::<ApiErrorCode>() {
        (*code, code.to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (ApiErrorCode::InvalidInput, e.to_string())
    } else if err.find::<reject::UnsupportedMediaType>().is_some() {
        (ApiErrorCode::InvalidInput, "Expected a JSON body".to_string())
    } else if err.is_not_found() {
        (ApiErrorCode::NotFound, ApiErrorCode::NotFound.to_string())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (
            ApiErrorCode::MethodNotAllowed,
            ApiErrorCode::MethodNotAllowed.to_string(),
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (
            ApiErrorCode::InternalError,
            ApiErrorCode::InternalError.to_string(),
        )
    };

    let status = code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

/// Externally visible failure codes. Several internal failure kinds map to
/// one code so callers cannot tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Invalid request")]
    InvalidInput,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Not authorized")]
    NotAuthorized,
    #[error("Translation service unavailable")]
    TranslatorUnavailable,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidInput | ApiErrorCode::UsernameTaken => StatusCode::BAD_REQUEST,
            ApiErrorCode::InvalidCredentials | ApiErrorCode::NotAuthorized => {
                StatusCode::UNAUTHORIZED
            }
            ApiErrorCode::TranslatorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::DuplicateUsername => ApiErrorCode::UsernameTaken,
            e if e.is_credential_failure() => ApiErrorCode::InvalidCredentials,
            e if e.is_authorization_failure() => ApiErrorCode::NotAuthorized,
            AuthError::PolicyViolation(_) => ApiErrorCode::InvalidInput,
            e => ApiErrorCode::internal(e),
        }
    }
}

impl From<TranslateError> for ApiErrorCode {
    fn from(error: TranslateError) -> Self {
        match error {
            TranslateError::InvalidLanguage(_) => ApiErrorCode::InvalidInput,
            TranslateError::MissingApiKey => ApiErrorCode::internal(TranslateError::MissingApiKey),
            TranslateError::ProviderUnavailable(e) => {
                warn!("Translation provider unavailable: {}", e);
                ApiErrorCode::TranslatorUnavailable
            }
        }
    }
}
