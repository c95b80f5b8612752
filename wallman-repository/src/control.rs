//! Repositories for the projector and screensaver control records.
//!
//! Both tables hold a single row under a fixed primary key. Creation goes
//! through a conflict-ignoring insert so two racing writers can never
//! produce a second row.

use sea_orm::{
    sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};
use wallman_error::StorageResult;
use wallman_models::{
    constants::{PROJECTOR_CONTROL_ID, SCREENSAVER_CONTROL_ID},
    entities::prelude::{
        ProjectorControl, ProjectorControlActiveModel, ProjectorControlColumn,
        ProjectorControlModel, ScreensaverControl, ScreensaverControlActiveModel,
        ScreensaverControlColumn, ScreensaverControlModel,
    },
};

pub struct ProjectorControlRepository;

impl ProjectorControlRepository {
    pub async fn get<C>(db: &C) -> StorageResult<Option<ProjectorControlModel>>
    where
        C: ConnectionTrait,
    {
        Ok(ProjectorControl::find_by_id(PROJECTOR_CONTROL_ID)
            .one(db)
            .await?)
    }

    /// Insert the row unless it already exists. Returns whether it was inserted.
    pub async fn insert_if_absent<C>(
        control: ProjectorControlActiveModel,
        db: &C,
    ) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        let inserted = ProjectorControl::insert(control)
            .on_conflict(
                OnConflict::column(ProjectorControlColumn::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(inserted > 0)
    }

    /// Insert or overwrite the row
    pub async fn upsert<C>(control: ProjectorControlActiveModel, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        ProjectorControl::insert(control)
            .on_conflict(
                OnConflict::column(ProjectorControlColumn::Id)
                    .update_columns([
                        ProjectorControlColumn::InactivityTime,
                        ProjectorControlColumn::StartupWeekTime,
                        ProjectorControlColumn::ShutdownWeekTime,
                        ProjectorControlColumn::StartupWeekendTime,
                        ProjectorControlColumn::ShutdownWeekendTime,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn count<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(ProjectorControl::find().count(db).await?)
    }
}

pub struct ScreensaverControlRepository;

impl ScreensaverControlRepository {
    pub async fn get<C>(db: &C) -> StorageResult<Option<ScreensaverControlModel>>
    where
        C: ConnectionTrait,
    {
        Ok(ScreensaverControl::find_by_id(SCREENSAVER_CONTROL_ID)
            .one(db)
            .await?)
    }

    pub async fn upsert<C>(control: ScreensaverControlActiveModel, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        ScreensaverControl::insert(control)
            .on_conflict(
                OnConflict::column(ScreensaverControlColumn::Id)
                    .update_columns([
                        ScreensaverControlColumn::InactivityTime,
                        ScreensaverControlColumn::ApplicationId,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    /// Drop the row if it points at the given application
    pub async fn delete_by_application_id<C>(application_id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(ScreensaverControl::delete_many()
            .filter(ScreensaverControlColumn::ApplicationId.eq(application_id))
            .exec(db)
            .await?
            .rows_affected)
    }

    pub async fn count<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(ScreensaverControl::find().count(db).await?)
    }
}
