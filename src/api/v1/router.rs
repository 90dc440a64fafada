use super::error::*;
use super::handler;
use crate::application_port::AuthService;
use crate::domain_model::UserIdentity;
use crate::server::Server;
use anyhow::anyhow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // path before method, so an unknown path stays a 404
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handler::health);

    let register = warp::path("register")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::register);

    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let translate = warp::path("translate")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_verification(server.auth_service.clone()))
        .and(warp::body::json())
        .and(with(server.translate_service.clone()))
        .and_then(handler::translate);

    health.or(register).or(login).or(translate)
}

/// CORS policy for the given origins. Each origin must be `scheme://host[:port]`.
pub fn cors(origins: &[String]) -> anyhow::Result<warp::cors::Cors> {
    for origin in origins {
        let url = reqwest::Url::parse(origin).map_err(|e| anyhow!("bad CORS origin {origin:?}: {e}"))?;
        if url.host_str().is_none() || url.path() != "/" || url.query().is_some() {
            return Err(anyhow!("bad CORS origin {origin:?}: expected scheme://host[:port]"));
        }
    }

    Ok(warp::cors()
        .allow_origins(origins.iter().map(String::as_str))
        .allow_methods(vec!["GET", "POST"])
        .allow_headers(vec!["authorization", "content-type"])
        .allow_credentials(true)
        .build())
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Token from an `Authorization` value. The scheme name is matched
/// case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolve the caller from `Authorization: Bearer <token>` or, failing that,
/// a `token` query parameter. Every failure is reported as `NotAuthorized`.
fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (UserIdentity,), Error = warp::Rejection> + Clone {
    // an unparsable query string counts as no query token
    let query = warp::query::<HashMap<String, String>>()
        .or(warp::any().map(HashMap::<String, String>::new))
        .unify();

    warp::header::optional::<String>(http::header::AUTHORIZATION.as_ref())
        .and(query)
        .and_then(move |header: Option<String>, mut query: HashMap<String, String>| {
            let auth_service = auth_service.clone();
            async move {
                let token = header
                    .as_deref()
                    .and_then(bearer_token)
                    .map(str::to_owned)
                    .or_else(|| query.remove("token"));

                let Some(token) = token else {
                    return Err(reject::custom(ApiErrorCode::NotAuthorized));
                };

                let user = auth_service
                    .authorize(&token)
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)?;
                Ok(user)
            }
        })
}
