use wallman_error::StorageResult;
use wallman_models::entities::prelude::{
    ApplicationLog, ApplicationLogActiveModel, ApplicationLogColumn, ApplicationLogModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Repository for application error logs
pub struct ApplicationLogRepository;

impl ApplicationLogRepository {
    pub async fn create<C>(
        log: ApplicationLogActiveModel,
        db: &C,
    ) -> StorageResult<ApplicationLogModel>
    where
        C: ConnectionTrait,
    {
        Ok(log.insert(db).await?)
    }

    /// Newest first
    pub async fn find_by_application_id<C>(
        application_id: i32,
        db: &C,
    ) -> StorageResult<Vec<ApplicationLogModel>>
    where
        C: ConnectionTrait,
    {
        Ok(ApplicationLog::find()
            .filter(ApplicationLogColumn::ApplicationId.eq(application_id))
            .order_by_desc(ApplicationLogColumn::Datetime)
            .all(db)
            .await?)
    }

    pub async fn delete_by_application_id<C>(application_id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(ApplicationLog::delete_many()
            .filter(ApplicationLogColumn::ApplicationId.eq(application_id))
            .exec(db)
            .await?
            .rows_affected)
    }

    pub async fn count_by_application_id<C>(application_id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(ApplicationLog::find()
            .filter(ApplicationLogColumn::ApplicationId.eq(application_id))
            .count(db)
            .await?)
    }
}
