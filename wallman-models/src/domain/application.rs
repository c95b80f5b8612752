use crate::{
    entities::{application::Model as ApplicationModel, application_log::Model as LogModel},
    enums::catalog::Vote,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    #[validate(length(min = 1, max = 128, message = "name length must be 1..=128"))]
    pub name: String,
    pub category_id: i32,
    #[serde(default)]
    #[validate(length(max = 4096, message = "description is too long"))]
    pub description: String,
    /// Terms of service acceptance; checked by the moderation rules so the
    /// rejection carries its own message.
    #[serde(default)]
    pub tos: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplication {
    #[validate(length(min = 1, max = 128, message = "name length must be 1..=128"))]
    pub name: String,
    pub category_id: i32,
    #[serde(default)]
    #[validate(length(max = 4096, message = "description is too long"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPageParams {
    pub name: Option<String>,
    pub category_id: Option<i32>,
    #[validate(range(min = 1, message = "page must be positive"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 200, message = "pageSize must be 1..=200"))]
    pub page_size: Option<u32>,
}

impl ApplicationPageParams {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    #[inline]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE).max(1)
    }
}

/// Application as shown to visitors, with its rating
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub category_id: i32,
    pub category_name: String,
    pub description: String,
    pub icon: Option<String>,
    pub archive: Option<String>,
    pub likes: i32,
    pub dislikes: i32,
    pub value: f64,
    pub stars: u8,
    pub created_at: DateTime<Utc>,
}

impl ApplicationInfo {
    pub fn from_model(model: ApplicationModel, category_name: String) -> Self {
        let value = model.value();
        let stars = model.stars();
        Self {
            id: model.id,
            name: model.name,
            owner_id: model.owner_id,
            category_id: model.category_id,
            category_name,
            description: model.description,
            icon: model.icon,
            archive: model.archive,
            likes: model.likes,
            dislikes: model.dislikes,
            value,
            stars,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteRequest {
    pub vote: Vote,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicationLog {
    #[validate(length(min = 1, message = "error description is required"))]
    pub error_description: String,
}

/// Error log entry joined with the name of its application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLogInfo {
    pub id: i32,
    pub application_id: i32,
    pub application_name: String,
    pub error_description: String,
    pub datetime: DateTime<Utc>,
}

impl ApplicationLogInfo {
    #[inline]
    pub fn from_model(model: LogModel, application_name: String) -> Self {
        Self {
            id: model.id,
            application_id: model.application_id,
            application_name,
            error_description: model.error_description,
            datetime: model.datetime,
        }
    }
}

impl Display for ApplicationLogInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} log at {}",
            self.application_name,
            self.datetime.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn log_display_uses_app_name_and_timestamp() {
        let log = ApplicationLogInfo {
            id: 1,
            application_id: 1,
            application_name: "Gps Application".into(),
            error_description: "Error importing library X.".into(),
            datetime: Utc.with_ymd_and_hms(2010, 1, 1, 15, 0, 1).unwrap(),
        };
        assert_eq!(log.to_string(), "Gps Application log at 2010-01-01 15:00:01");
    }

    #[test]
    fn page_params_fall_back_to_defaults() {
        let params = ApplicationPageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), ApplicationPageParams::DEFAULT_PAGE_SIZE);
    }
}
