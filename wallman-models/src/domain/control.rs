use crate::{
    constants::{PROJECTOR_CONTROL_ID, SCREENSAVER_CONTROL_ID},
    entities::{
        projector_control::ActiveModel as ProjectorActiveModel,
        screensaver_control::ActiveModel as ScreensaverActiveModel,
    },
};
use chrono::NaiveTime;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorSchedule {
    #[validate(range(min = 1, message = "inactivity_time must be at least one minute"))]
    pub inactivity_time: i32,
    pub startup_week_time: NaiveTime,
    pub shutdown_week_time: NaiveTime,
    pub startup_weekend_time: NaiveTime,
    pub shutdown_weekend_time: NaiveTime,
}

impl ProjectorSchedule {
    /// Active model pinned to the singleton row
    pub fn into_active_model(self) -> ProjectorActiveModel {
        ProjectorActiveModel {
            id: Set(PROJECTOR_CONTROL_ID),
            inactivity_time: Set(self.inactivity_time),
            startup_week_time: Set(self.startup_week_time),
            shutdown_week_time: Set(self.shutdown_week_time),
            startup_weekend_time: Set(self.startup_weekend_time),
            shutdown_weekend_time: Set(self.shutdown_weekend_time),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreensaverSchedule {
    /// `HH:MM:SS`
    pub inactivity_time: NaiveTime,
    pub application_id: i32,
}

impl ScreensaverSchedule {
    /// Active model pinned to the singleton row
    pub fn into_active_model(self) -> ScreensaverActiveModel {
        ScreensaverActiveModel {
            id: Set(SCREENSAVER_CONTROL_ID),
            inactivity_time: Set(self.inactivity_time),
            application_id: Set(self.application_id),
        }
    }
}
