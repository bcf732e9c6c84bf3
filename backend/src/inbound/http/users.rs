//! Login handler.
//!
//! ```text
//! POST /api/v1/login {"username":"instructor","password":"password"}
//! ```

use actix_web::{post, web};
use tracing::info;

use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{LoginRequest, LoginResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Authenticate and establish a cookie session holding the caller identity.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(map_login_validation_error)?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_identity(&identity)?;
    info!(user_id = %identity.user_id(), role = %identity.role(), "user logged in");
    Ok(web::Json(LoginResponse::from(identity)))
}

#[cfg(test)]
mod tests;
