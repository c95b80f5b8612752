use crate::entities::category::Model as CategoryModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RenameCategory {
    pub name: String,
}

/// Category listing row with the number of applications filed under it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: i32,
    pub name: String,
    pub applications: u64,
    pub created_at: DateTime<Utc>,
}

impl CategoryInfo {
    #[inline]
    pub fn from_model(model: CategoryModel, applications: u64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            applications,
            created_at: model.created_at,
        }
    }
}
