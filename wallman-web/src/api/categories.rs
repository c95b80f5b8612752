use crate::{middleware::RequestContext, AppState};
use actix_web::{
    web::{self, Data, Json, Path},
    Error,
};
use wallman_error::WebResult;
use wallman_models::{
    domain::prelude::{CategoryInfo, NewCategory, RenameCategory},
    web::WebResponse,
};

pub(super) const ROUTER_PREFIX: &str = "/categories";

/// # Routes
/// - GET `/`: All categories with their application counts
/// - GET `/{id}/`: One category
/// - POST `/add/`: Create (staff)
/// - POST `/{id}/edit/`: Rename (staff)
/// - POST `/{id}/remove/`: Delete, moving applications to the default category (staff)
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list))
        .route("/add/", web::post().to(create))
        .route("/{id}/", web::get().to(get_by_id))
        .route("/{id}/edit/", web::post().to(rename))
        .route("/{id}/remove/", web::post().to(delete));
}

async fn list(state: Data<AppState>) -> WebResult<WebResponse<Vec<CategoryInfo>>> {
    Ok(WebResponse::ok(state.catalog.list_categories().await?))
}

async fn get_by_id(state: Data<AppState>, id: Path<i32>) -> WebResult<WebResponse<CategoryInfo>> {
    Ok(WebResponse::ok(
        state.catalog.find_category(id.into_inner()).await?,
    ))
}

async fn create(
    state: Data<AppState>,
    ctx: RequestContext,
    category: Result<Json<NewCategory>, Error>,
) -> WebResult<WebResponse<CategoryInfo>> {
    let category = ctx.form(category)?;
    let created = state
        .catalog
        .create_category(&ctx.actor, category)
        .await;
    ctx.resolve(created).map(WebResponse::ok)
}

async fn rename(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
    category: Result<Json<RenameCategory>, Error>,
) -> WebResult<WebResponse<CategoryInfo>> {
    let category = ctx.form(category)?;
    let renamed = state
        .catalog
        .rename_category(&ctx.actor, id.into_inner(), category)
        .await;
    ctx.resolve(renamed).map(WebResponse::ok)
}

/// Responds with the number of applications moved to the default category
async fn delete(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
) -> WebResult<WebResponse<u64>> {
    let moved = state
        .catalog
        .delete_category(&ctx.actor, id.into_inner())
        .await;
    ctx.resolve(moved).map(WebResponse::ok)
}
