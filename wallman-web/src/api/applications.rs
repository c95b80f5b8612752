use crate::{middleware::RequestContext, AppState};
use actix_web::{
    web::{self, Bytes, Data, Json, Path, Query},
    Error,
};
use wallman_error::WebResult;
use wallman_models::{
    domain::prelude::{
        AbuseReport, ApplicationInfo, ApplicationLogInfo, ApplicationPageParams, NewApplication,
        NewApplicationLog, PageResult, UpdateApplication, VoteRequest,
    },
    enums::catalog::AssetKind,
    web::WebResponse,
};

pub(super) const ROUTER_PREFIX: &str = "/applications";

/// # Routes
/// - GET `/`: Paged listing, filterable by name and category
/// - GET `/screensavers/`: Applications eligible as screensaver
/// - POST `/add/`: Submit an application (logged in)
/// - GET `/{id}/`: Details with rating
/// - POST `/{id}/edit/`: Owner or staff
/// - POST `/{id}/delete/`: Owner takes it down
/// - POST `/{id}/remove/`: Staff takes it down, owner is notified
/// - PUT `/{id}/icon/`, PUT `/{id}/archive/`: Raw upload bodies (owner or staff)
/// - POST `/{id}/vote/`: Like or dislike
/// - GET `/{id}/logs/`: Error logs (owner or staff)
/// - POST `/{id}/logs/`: Report a launch error
/// - POST `/{id}/report/`: Report abuse to staff (logged in)
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(page))
        .route("/screensavers/", web::get().to(screensavers))
        .route("/add/", web::post().to(create))
        .route("/{id}/", web::get().to(get_by_id))
        .route("/{id}/edit/", web::post().to(update))
        .route("/{id}/delete/", web::post().to(delete))
        .route("/{id}/remove/", web::post().to(remove))
        .route("/{id}/icon/", web::put().to(upload_icon))
        .route("/{id}/archive/", web::put().to(upload_archive))
        .route("/{id}/vote/", web::post().to(vote))
        .route("/{id}/logs/", web::get().to(logs))
        .route("/{id}/logs/", web::post().to(record_log))
        .route("/{id}/report/", web::post().to(report));
}

async fn page(
    state: Data<AppState>,
    params: Query<ApplicationPageParams>,
) -> WebResult<WebResponse<PageResult<ApplicationInfo>>> {
    Ok(WebResponse::ok(
        state.catalog.page_applications(params.into_inner()).await?,
    ))
}

async fn screensavers(state: Data<AppState>) -> WebResult<WebResponse<Vec<ApplicationInfo>>> {
    Ok(WebResponse::ok(
        state.catalog.list_screensaver_choices().await?,
    ))
}

async fn get_by_id(
    state: Data<AppState>,
    id: Path<i32>,
) -> WebResult<WebResponse<ApplicationInfo>> {
    Ok(WebResponse::ok(
        state.catalog.find_application(id.into_inner()).await?,
    ))
}

async fn create(
    state: Data<AppState>,
    ctx: RequestContext,
    application: Result<Json<NewApplication>, Error>,
) -> WebResult<WebResponse<ApplicationInfo>> {
    let application = ctx.form(application)?;
    let created = state
        .catalog
        .create_application(&ctx.actor, application)
        .await;
    ctx.resolve(created).map(WebResponse::ok)
}

async fn update(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
    application: Result<Json<UpdateApplication>, Error>,
) -> WebResult<WebResponse<ApplicationInfo>> {
    let application = ctx.form(application)?;
    let updated = state
        .catalog
        .update_application(&ctx.actor, id.into_inner(), application)
        .await;
    ctx.resolve(updated).map(WebResponse::ok)
}

async fn delete(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
) -> WebResult<WebResponse<bool>> {
    let deleted = state
        .catalog
        .delete_application(&ctx.actor, id.into_inner())
        .await;
    ctx.resolve(deleted).map(|_| WebResponse::ok(true))
}

async fn remove(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
) -> WebResult<WebResponse<bool>> {
    let removed = state
        .catalog
        .remove_application(&ctx.actor, id.into_inner())
        .await;
    ctx.resolve(removed).map(|_| WebResponse::ok(true))
}

async fn upload_icon(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
    body: Bytes,
) -> WebResult<WebResponse<ApplicationInfo>> {
    attach(&state, &ctx, id.into_inner(), AssetKind::Icon, &body).await
}

async fn upload_archive(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
    body: Bytes,
) -> WebResult<WebResponse<ApplicationInfo>> {
    attach(&state, &ctx, id.into_inner(), AssetKind::Archive, &body).await
}

async fn attach(
    state: &AppState,
    ctx: &RequestContext,
    id: i32,
    kind: AssetKind,
    bytes: &[u8],
) -> WebResult<WebResponse<ApplicationInfo>> {
    let attached = state.catalog.attach_asset(&ctx.actor, id, kind, bytes).await;
    ctx.resolve(attached).map(WebResponse::ok)
}

async fn vote(
    state: Data<AppState>,
    id: Path<i32>,
    req: Json<VoteRequest>,
) -> WebResult<WebResponse<ApplicationInfo>> {
    Ok(WebResponse::ok(
        state.catalog.vote(id.into_inner(), req.vote).await?,
    ))
}

async fn logs(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
) -> WebResult<WebResponse<Vec<ApplicationLogInfo>>> {
    let logs = state.catalog.list_logs(&ctx.actor, id.into_inner()).await;
    ctx.resolve(logs).map(WebResponse::ok)
}

async fn record_log(
    state: Data<AppState>,
    id: Path<i32>,
    log: Json<NewApplicationLog>,
) -> WebResult<WebResponse<ApplicationLogInfo>> {
    Ok(WebResponse::ok(
        state
            .catalog
            .record_log(id.into_inner(), log.into_inner())
            .await?,
    ))
}

/// Responds with how many staff members were notified
async fn report(
    state: Data<AppState>,
    ctx: RequestContext,
    id: Path<i32>,
    report: Result<Json<AbuseReport>, Error>,
) -> WebResult<WebResponse<usize>> {
    let report = ctx.form(report)?;
    let notified = state
        .desk
        .report_abuse(&ctx.actor, id.into_inner(), report)
        .await;
    ctx.resolve(notified).map(WebResponse::ok)
}
