//! Bearer token authentication.
//!
//! Resolves the `Authorization: Bearer <jwt>` header to an [`Actor`] and
//! stores it in the request extensions. Requests without a usable token go
//! through as anonymous; the access policy decides what they may do.

use crate::AppState;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::AUTHORIZATION, Method},
    web::Data,
    Error, HttpMessage,
};
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use std::{
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;
use wallman_common::jwt::{decode_jwt, issuer_validation};
use wallman_models::{
    constants::BEARER_TOKEN,
    domain::prelude::{Actor, Claims},
};

/// Authentication middleware factory
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<B>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        async move {
            if Method::OPTIONS != req.method() {
                let actor = resolve_actor(&req).await;
                req.extensions_mut().insert(actor);
            }
            srv.call(req).await
        }
        .boxed_local()
    }
}

/// Anonymous unless the token verifies and its account still exists
async fn resolve_actor(req: &ServiceRequest) -> Actor {
    let (Some(token), Some(state)) = (extract_bearer_token(req), req.app_data::<Data<AppState>>())
    else {
        return Actor::Anonymous;
    };

    let jwt = &state.settings.web.jwt;
    let claims = match decode_jwt::<Claims>(
        token,
        jwt.secret.as_bytes(),
        Some(issuer_validation(&jwt.issuer)),
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!("rejected bearer token: {e}");
            return Actor::Anonymous;
        }
    };

    match state.desk.actor_for(claims.user_id).await {
        Ok(actor) => actor,
        Err(e) => {
            debug!(user_id = claims.user_id, "account lookup failed: {e}");
            Actor::Anonymous
        }
    }
}

#[inline]
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
