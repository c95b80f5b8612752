pub mod catalog;
pub mod init;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use catalog::CatalogError;
use config::ConfigError;
use init::InitContextError;
use sea_orm::{DbErr, TransactionError};
use serde_json::Error as SerdeJsonError;
use std::{error::Error as StdError, io::Error as IoError};
use storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;
use web::WebError;

pub type WMResult<T, E = WMError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;
pub type CatalogResult<T, E = CatalogError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum WMError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    JoinError(#[from] JoinError),
    #[error("{0}")]
    StdError(#[from] Box<dyn StdError + Send + Sync>),
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    CatalogError(#[from] CatalogError),
    #[error("{0}")]
    InitContextError(#[from] InitContextError),
    #[error("{0}")]
    WebError(#[from] WebError),
}

impl From<String> for WMError {
    #[inline]
    fn from(e: String) -> Self {
        WMError::Msg(e)
    }
}

impl From<&str> for WMError {
    #[inline]
    fn from(e: &str) -> Self {
        WMError::Msg(e.to_string())
    }
}

impl From<DbErr> for WMError {
    #[inline]
    fn from(e: DbErr) -> Self {
        WMError::StorageError(StorageError::DBError(e))
    }
}

impl From<TransactionError<WMError>> for WMError {
    #[inline]
    fn from(e: TransactionError<WMError>) -> Self {
        match e {
            TransactionError::Connection(db) => db.into(),
            TransactionError::Transaction(inner) => inner,
        }
    }
}
