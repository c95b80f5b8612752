use actix_web::{http::header::LOCATION, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::{
    catalog::{CatalogError, Denial},
    storage::StorageError,
};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Redirect: `{0}`")]
    Redirect(String),
    #[error("BadRequest: `{0}`")]
    BadRequest(String),
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    #[error("Conflict: `{0}`")]
    Conflict(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("Forbidden: `{0}`")]
    Forbidden(String),
    #[error("InternalError: `{0}`")]
    InternalError(String),
    #[error("DBError: `{0}`")]
    StorageError(#[from] StorageError),
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<CatalogError> for WebError {
    /// `LoginRequired` becomes a plain 401 here; handlers that know the
    /// request path turn it into a login redirect instead.
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Validation { field, message } => WebError::Validation { field, message },
            CatalogError::DuplicateName(name) => WebError::Conflict(name),
            CatalogError::ProtectedEntity(name) => {
                WebError::BadRequest(format!("{name} is protected"))
            }
            CatalogError::PermissionDenied(Denial::LoginRequired) => WebError::Unauthorized,
            CatalogError::PermissionDenied(Denial::Forbidden) => {
                WebError::Forbidden("insufficient privileges".to_string())
            }
            CatalogError::NotFound(what) => WebError::NotFound(what),
            CatalogError::Storage(e) => WebError::StorageError(e),
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "message": self.to_string()
        });
        match self {
            WebError::Unauthorized => {
                body["error"] = json!("Unauthorized");
                HttpResponse::Unauthorized().json(body)
            }
            WebError::Redirect(location) => {
                body["error"] = json!("Login Required");
                body["location"] = json!(location);
                HttpResponse::Found()
                    .insert_header((LOCATION, location.as_str()))
                    .json(body)
            }
            WebError::BadRequest(_) => {
                body["error"] = json!("Bad Request");
                HttpResponse::BadRequest().json(body)
            }
            WebError::Validation { field, message } => {
                body["error"] = json!("Validation Error");
                body["field"] = json!(field);
                body["message"] = json!(message);
                HttpResponse::BadRequest().json(body)
            }
            WebError::Conflict(_) => {
                body["error"] = json!("Conflict");
                HttpResponse::Conflict().json(body)
            }
            WebError::NotFound(_) => {
                body["error"] = json!("Not Found");
                HttpResponse::NotFound().json(body)
            }
            WebError::Forbidden(_) => {
                body["error"] = json!("Forbidden");
                HttpResponse::Forbidden().json(body)
            }
            WebError::InternalError(_) => {
                body["error"] = json!("Internal Server Error");
                HttpResponse::InternalServerError().json(body)
            }
            WebError::StorageError(_) => {
                body["error"] = json!("Storage Error");
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}
