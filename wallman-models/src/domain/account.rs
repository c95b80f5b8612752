use crate::entities::account::Model as AccountModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sign-up form, checked field by field by the moderation rules
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AccountModel> for AccountInfo {
    fn from(account: AccountModel) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            created_at: account.created_at,
        }
    }
}
