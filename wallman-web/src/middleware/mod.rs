pub(crate) mod auth;

use crate::AppState;
use actix_web::{
    dev::Payload,
    web::{Data, Json},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};
use wallman_core::AccessPolicy;
use wallman_error::{
    catalog::{CatalogError, Denial},
    web::WebError,
    CatalogResult, WebResult,
};
use wallman_models::domain::prelude::Actor;

/// Who is calling, and where to send them if they have to log in first
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub actor: Actor,
    pub login_redirect: String,
}

impl RequestContext {
    /// Lift a domain result into a web result. A missing login turns into a
    /// redirect back to the current path.
    pub fn resolve<T>(&self, result: CatalogResult<T>) -> WebResult<T> {
        result.map_err(|e| self.login_or(e))
    }

    /// Unwrap a submitted JSON body. Anonymous callers are sent to log in
    /// before the body is looked at.
    pub fn form<T>(&self, body: Result<Json<T>, Error>) -> WebResult<T> {
        AccessPolicy::require_login(&self.actor).map_err(|e| self.login_or(e))?;
        body.map(Json::into_inner).map_err(|e| match e.as_error::<WebError>() {
            Some(WebError::BadRequest(message)) => WebError::BadRequest(message.clone()),
            _ => WebError::BadRequest(e.to_string()),
        })
    }

    fn login_or(&self, e: CatalogError) -> WebError {
        match e {
            CatalogError::PermissionDenied(Denial::LoginRequired) => {
                WebError::Redirect(self.login_redirect.clone())
            }
            other => other.into(),
        }
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let actor = req.extensions().get::<Actor>().cloned().unwrap_or_default();
        let login_redirect = req
            .app_data::<Data<AppState>>()
            .map(|state| AccessPolicy::login_redirect(&state.settings.web.login_url, req.path()))
            .unwrap_or_default();
        ready(Ok(RequestContext {
            actor,
            login_redirect,
        }))
    }
}
