//! `SeaORM` Entity for launchable wall applications.

use crate::constants::STAR_SCALE;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// FK: account.id
    pub owner_id: i32,
    /// FK: category.id, never null
    pub category_id: i32,
    pub description: String,
    /// Asset store reference of the icon image
    pub icon: Option<String>,
    /// Asset store reference of the zip archive
    pub archive: Option<String>,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::OwnerId",
        to = "super::account::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::application_log::Entity")]
    ApplicationLog,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::application_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Share of positive votes, `0.0` when nobody voted.
    pub fn value(&self) -> f64 {
        let total = i64::from(self.likes) + i64::from(self.dislikes);
        if total <= 0 {
            return 0.0;
        }
        self.likes as f64 / total as f64
    }

    /// `value()` on the `0..=STAR_SCALE` scale, rounded down.
    pub fn stars(&self) -> u8 {
        let stars = (self.value() * STAR_SCALE as f64).floor();
        stars.clamp(0.0, STAR_SCALE as f64) as u8
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn app(likes: i32, dislikes: i32) -> Model {
        Model {
            id: 1,
            name: "Gps Application".into(),
            owner_id: 1,
            category_id: 1,
            description: String::new(),
            icon: None,
            archive: None,
            likes,
            dislikes,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn value_and_stars_follow_votes() {
        let gps = app(5, 3);
        assert_eq!(gps.value(), 0.625);
        assert_eq!(gps.stars(), 3);
    }

    #[test]
    fn no_votes_is_zero() {
        let gps = app(0, 0);
        assert_eq!(gps.value(), 0.0);
        assert_eq!(gps.stars(), 0);
    }

    #[test]
    fn all_likes_is_full_scale() {
        assert_eq!(app(7, 0).stars(), STAR_SCALE);
        assert_eq!(app(0, 4).stars(), 0);
    }

    #[test]
    fn counters_at_the_limit_do_not_overflow() {
        let busy = app(i32::MAX, 1);
        assert!(busy.value() > 0.99);
        assert_eq!(busy.stars(), STAR_SCALE - 1);
        assert_eq!(app(i32::MAX, 0).stars(), STAR_SCALE);
    }

    #[test]
    fn displays_name() {
        assert_eq!(app(0, 0).to_string(), "Gps Application");
    }
}
