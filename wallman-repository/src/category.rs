use wallman_error::StorageResult;
use wallman_models::entities::prelude::{
    Application, ApplicationColumn, Category, CategoryActiveModel, CategoryColumn, CategoryModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Repository for category operations
pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn create<C>(category: CategoryActiveModel, db: &C) -> StorageResult<CategoryModel>
    where
        C: ConnectionTrait,
    {
        Ok(category.insert(db).await?)
    }

    pub async fn update<C>(category: CategoryActiveModel, db: &C) -> StorageResult<CategoryModel>
    where
        C: ConnectionTrait,
    {
        Ok(category.update(db).await?)
    }

    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Category::delete_by_id(id).exec(db).await?.rows_affected)
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<CategoryModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_name<C>(name: &str, db: &C) -> StorageResult<Option<CategoryModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .filter(CategoryColumn::Name.eq(name))
            .one(db)
            .await?)
    }

    /// All categories ordered by name
    pub async fn find_all<C>(db: &C) -> StorageResult<Vec<CategoryModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .order_by_asc(CategoryColumn::Name)
            .all(db)
            .await?)
    }

    /// Categories paired with how many applications each one holds
    pub async fn find_all_with_counts<C>(db: &C) -> StorageResult<Vec<(CategoryModel, u64)>>
    where
        C: ConnectionTrait,
    {
        let categories = Self::find_all(db).await?;
        let mut rows = Vec::with_capacity(categories.len());
        for category in categories {
            let count = Application::find()
                .filter(ApplicationColumn::CategoryId.eq(category.id))
                .count(db)
                .await?;
            rows.push((category, count));
        }
        Ok(rows)
    }

    pub async fn count<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find().count(db).await?)
    }

    pub async fn exists_by_name<C>(name: &str, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .filter(CategoryColumn::Name.eq(name))
            .count(db)
            .await?
            > 0)
    }

    pub async fn exists_by_name_exclude_id<C>(id: i32, name: &str, db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Category::find()
            .filter(CategoryColumn::Id.ne(id))
            .filter(CategoryColumn::Name.eq(name))
            .count(db)
            .await?
            > 0)
    }
}
