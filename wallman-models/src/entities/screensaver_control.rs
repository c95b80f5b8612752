//! `SeaORM` Entity for the screensaver settings.
//!
//! This table stores a **single row** with a fixed primary key.

use chrono::{NaiveTime, Timelike};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "screensaver_control")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Idle time before the screensaver starts, written as `HH:MM:SS`
    pub inactivity_time: NaiveTime,
    /// FK: application.id, restricted to the Screensaver category
    pub application_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id"
    )]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[inline]
    pub fn inactivity(&self) -> Duration {
        Duration::from_secs(self.inactivity_time.num_seconds_from_midnight() as u64)
    }
}
