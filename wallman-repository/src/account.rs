use wallman_error::StorageResult;
use wallman_models::entities::prelude::{Account, AccountActiveModel, AccountColumn, AccountModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub struct AccountRepository;

impl AccountRepository {
    pub async fn create<C>(account: AccountActiveModel, db: &C) -> StorageResult<AccountModel>
    where
        C: ConnectionTrait,
    {
        Ok(account.insert(db).await?)
    }

    pub async fn update<C>(account: AccountActiveModel, db: &C) -> StorageResult<AccountModel>
    where
        C: ConnectionTrait,
    {
        Ok(account.update(db).await?)
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<AccountModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Account::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_username<C>(username: &str, db: &C) -> StorageResult<Option<AccountModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Account::find()
            .filter(AccountColumn::Username.eq(username))
            .one(db)
            .await?)
    }

    pub async fn find_by_email<C>(email: &str, db: &C) -> StorageResult<Option<AccountModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Account::find()
            .filter(AccountColumn::Email.eq(email))
            .order_by_asc(AccountColumn::Id)
            .one(db)
            .await?)
    }

    /// Every account holding the staff flag, oldest first
    pub async fn find_staff<C>(db: &C) -> StorageResult<Vec<AccountModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Account::find()
            .filter(AccountColumn::IsStaff.eq(true))
            .order_by_asc(AccountColumn::Id)
            .all(db)
            .await?)
    }

    pub async fn exists_by_username<C>(username: &str, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Account::find()
            .filter(AccountColumn::Username.eq(username))
            .count(db)
            .await?
            > 0)
    }
}
