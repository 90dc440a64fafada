use super::error::*;
use crate::application_port::*;
use crate::domain_model::{UserId, UserIdentity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&ApiResponse::ok(HealthResponse {
        status: "ok",
    })))
}

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserIdentity> for RegisterResponse {
    fn from(user: UserIdentity) -> Self {
        RegisterResponse {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

pub async fn register(
    body: CredentialsRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let register_input = RegisterInput {
        username: body.username,
        password: body.password,
    };
    let user = auth_service
        .register(register_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(RegisterResponse::from(
        user,
    ))))
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: AccessToken,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

pub async fn login(
    body: CredentialsRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let login_input = LoginInput {
        username: body.username,
        password: body.password,
    };
    let token = auth_service
        .login(login_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let login_response = LoginResponse {
        access_token: token.access_token,
        token_type: "bearer",
        expires_at: token.expires_at,
    };

    Ok(warp::reply::json(&ApiResponse::ok(login_response)))
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

pub async fn translate(
    actor: UserIdentity,
    body: TranslateRequest,
    translate_service: Arc<dyn TranslateService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let translate_input = TranslateInput {
        text: body.text,
        source_language: body.source_language,
        target_language: body.target_language,
    };
    let result = translate_service
        .translate(&actor, translate_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(result)))
}
