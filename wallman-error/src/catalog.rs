use crate::storage::StorageError;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidationErrors;

/// Why an actor was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Nobody is logged in; the caller should be sent to the login page
    LoginRequired,
    /// Logged in, but the role does not allow the operation
    Forbidden,
}

impl Display for Denial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::LoginRequired => f.write_str("login required"),
            Denial::Forbidden => f.write_str("forbidden"),
        }
    }
}

/// Errors produced by catalog, moderation and scheduling operations.
///
/// Every variant is recoverable at the operation boundary.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("duplicate name: {0}")]
    DuplicateName(String),

    #[error("protected entity: {0}")]
    ProtectedEntity(String),

    #[error("permission denied: {0}")]
    PermissionDenied(Denial),

    #[error("{0} not found")]
    NotFound(String),

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("asset store failed: {0}")]
    Asset(String),

    #[error("credential handling failed: {0}")]
    Credential(String),

    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl CatalogError {
    #[inline]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn login_required() -> Self {
        CatalogError::PermissionDenied(Denial::LoginRequired)
    }

    #[inline]
    pub fn forbidden() -> Self {
        CatalogError::PermissionDenied(Denial::Forbidden)
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    #[inline]
    fn from(e: sea_orm::DbErr) -> Self {
        CatalogError::Storage(StorageError::DBError(e))
    }
}

impl From<sea_orm::TransactionError<CatalogError>> for CatalogError {
    #[inline]
    fn from(e: sea_orm::TransactionError<CatalogError>) -> Self {
        match e {
            sea_orm::TransactionError::Connection(db) => db.into(),
            sea_orm::TransactionError::Transaction(inner) => inner,
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    /// Reports the first failing field, ordered by field name.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect::<Vec<_>>();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.into_iter().next() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_else(|| "invalid value".to_string());
                CatalogError::Validation { field, message }
            }
            None => CatalogError::validation("__all__", "invalid input"),
        }
    }
}
