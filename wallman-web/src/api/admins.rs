use crate::{middleware::RequestContext, AppState};
use actix_web::{
    web::{self, Data, Json},
    Error,
};
use wallman_error::WebResult;
use wallman_models::{
    domain::prelude::{AccountInfo, AddAdmin, AdminMessage},
    web::WebResponse,
};

pub(super) const ROUTER_PREFIX: &str = "/admins";

/// # Routes
/// - POST `/message/`: Write to every staff member (logged in)
/// - POST `/add/`: Promote an account by email (staff)
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/message/", web::post().to(message))
        .route("/add/", web::post().to(add));
}

async fn message(
    state: Data<AppState>,
    ctx: RequestContext,
    message: Result<Json<AdminMessage>, Error>,
) -> WebResult<WebResponse<usize>> {
    let message = ctx.form(message)?;
    let notified = state
        .desk
        .message_admins(&ctx.actor, message)
        .await;
    ctx.resolve(notified).map(WebResponse::ok)
}

async fn add(
    state: Data<AppState>,
    ctx: RequestContext,
    admin: Result<Json<AddAdmin>, Error>,
) -> WebResult<WebResponse<AccountInfo>> {
    let admin = ctx.form(admin)?;
    let promoted = state.desk.add_admin(&ctx.actor, admin).await;
    ctx.resolve(promoted).map(WebResponse::ok)
}
