use crate::entities::account::Model as AccountModel;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub jti: String,
    pub sub: String,
    pub iss: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub user_id: i32,
    pub username: String,
}

impl Claims {
    pub fn new(iss: String, user_id: i32, username: String, expire_secs: i64) -> Self {
        let jti = Uuid::new_v4().into();
        let now = Utc::now();
        Self {
            jti,
            sub: user_id.to_string(),
            iss,
            exp: now.timestamp() + expire_secs,
            nbf: now.timestamp(),
            iat: now.timestamp(),
            user_id,
            username,
        }
    }
}

/// Authenticated account as seen by the access policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<AccountModel> for Principal {
    fn from(account: AccountModel) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        }
    }
}

/// Identity performing an operation. Passed explicitly to every mutating call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Actor {
    #[default]
    Anonymous,
    Account(Principal),
}

impl Actor {
    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Account(_))
    }

    #[inline]
    pub fn is_staff(&self) -> bool {
        matches!(self, Actor::Account(p) if p.is_staff)
    }

    #[inline]
    pub fn id(&self) -> Option<i32> {
        match self {
            Actor::Account(p) => Some(p.id),
            Actor::Anonymous => None,
        }
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Actor::Account(p) => Some(p),
            Actor::Anonymous => None,
        }
    }
}

impl From<AccountModel> for Actor {
    #[inline]
    fn from(account: AccountModel) -> Self {
        Actor::Account(account.into())
    }
}
