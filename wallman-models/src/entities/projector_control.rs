//! `SeaORM` Entity for the projector schedule.
//!
//! This table stores a **single row** with a fixed primary key.

use chrono::NaiveTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projector_control")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Minutes without interaction before the projector is turned off
    pub inactivity_time: i32,
    pub startup_week_time: NaiveTime,
    pub shutdown_week_time: NaiveTime,
    pub startup_weekend_time: NaiveTime,
    pub shutdown_weekend_time: NaiveTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
