use crate::AppState;
use actix_web::web::{self, Data, Json};
use tracing::instrument;
use validator::Validate;
use wallman_common::jwt::encode_jwt;
use wallman_error::{catalog::CatalogError, web::WebError, WebResult};
use wallman_models::{
    domain::prelude::{AccountInfo, Claims, LoginRequest, LoginResponse, NewAccount},
    web::WebResponse,
};

pub(super) const ROUTER_PREFIX: &str = "/accounts";

/// # Routes
/// - POST `/login/`: Exchange credentials for a bearer token
/// - POST `/register/`: Create a regular account
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login/", web::post().to(login))
        .route("/register/", web::post().to(register));
}

#[instrument(name = "login", skip_all, fields(username = %req.username))]
async fn login(
    state: Data<AppState>,
    req: Json<LoginRequest>,
) -> WebResult<WebResponse<LoginResponse>> {
    let req = req.into_inner();
    req.validate().map_err(CatalogError::from)?;

    let actor = state.desk.authenticate(&req.username, &req.password).await?;
    let principal = actor.principal().ok_or(WebError::Unauthorized)?;

    let jwt = &state.settings.web.jwt;
    let claims = Claims::new(
        jwt.issuer.clone(),
        principal.id,
        principal.username.clone(),
        jwt.expire,
    );
    let token = encode_jwt(&claims, jwt.secret.as_bytes(), None)
        .map_err(|e| WebError::InternalError(format!("Failed to encode JWT: {e}")))?;

    Ok(WebResponse::ok(LoginResponse {
        token,
        user_id: principal.id,
        username: principal.username.clone(),
        is_staff: principal.is_staff,
        exp: claims.exp,
    }))
}

async fn register(
    state: Data<AppState>,
    account: Json<NewAccount>,
) -> WebResult<WebResponse<AccountInfo>> {
    Ok(WebResponse::ok(
        state.desk.register_account(account.into_inner()).await?,
    ))
}
