use crate::{middleware::RequestContext, AppState};
use actix_web::{
    web::{self, Data, Json},
    Error,
};
use wallman_error::WebResult;
use wallman_models::{
    domain::prelude::{ProjectorSchedule, ScreensaverSchedule},
    entities::prelude::{ProjectorControlModel, ScreensaverControlModel},
    web::WebResponse,
};

pub(super) const ROUTER_PREFIX: &str = "/control";

/// # Routes
/// - GET `/projector/`: Current projector schedule, if any
/// - POST `/projector/`: Create the schedule unless one exists (staff)
/// - PUT `/projector/`: Overwrite the schedule (staff)
/// - GET `/screensaver/`: Current screensaver selection, if any
/// - POST `/screensaver/`: Choose the screensaver (staff)
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/projector/", web::get().to(projector))
        .route("/projector/", web::post().to(create_projector))
        .route("/projector/", web::put().to(update_projector))
        .route("/screensaver/", web::get().to(screensaver))
        .route("/screensaver/", web::post().to(save_screensaver));
}

async fn projector(state: Data<AppState>) -> WebResult<WebResponse<Option<ProjectorControlModel>>> {
    Ok(WebResponse::ok(
        state.scheduling.get_projector_control().await?,
    ))
}

/// Responds with whether a row was created
async fn create_projector(
    state: Data<AppState>,
    ctx: RequestContext,
    schedule: Result<Json<ProjectorSchedule>, Error>,
) -> WebResult<WebResponse<bool>> {
    let schedule = ctx.form(schedule)?;
    let created = state
        .scheduling
        .create_projector_control(&ctx.actor, schedule)
        .await;
    ctx.resolve(created).map(WebResponse::ok)
}

async fn update_projector(
    state: Data<AppState>,
    ctx: RequestContext,
    schedule: Result<Json<ProjectorSchedule>, Error>,
) -> WebResult<WebResponse<ProjectorControlModel>> {
    let schedule = ctx.form(schedule)?;
    let saved = state
        .scheduling
        .update_projector_control(&ctx.actor, schedule)
        .await;
    ctx.resolve(saved).map(WebResponse::ok)
}

async fn screensaver(
    state: Data<AppState>,
) -> WebResult<WebResponse<Option<ScreensaverControlModel>>> {
    Ok(WebResponse::ok(
        state.scheduling.get_screensaver_control().await?,
    ))
}

async fn save_screensaver(
    state: Data<AppState>,
    ctx: RequestContext,
    schedule: Result<Json<ScreensaverSchedule>, Error>,
) -> WebResult<WebResponse<ScreensaverControlModel>> {
    let schedule = ctx.form(schedule)?;
    let saved = state
        .scheduling
        .save_screensaver_control(&ctx.actor, schedule)
        .await;
    ctx.resolve(saved).map(WebResponse::ok)
}
