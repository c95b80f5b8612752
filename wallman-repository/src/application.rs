use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait,
};
use wallman_error::StorageResult;
use wallman_models::{
    domain::prelude::{ApplicationInfo, ApplicationPageParams, PageResult},
    entities::{
        application::Relation as ApplicationRelation,
        prelude::{
            Application, ApplicationActiveModel, ApplicationColumn, ApplicationModel, Category,
            CategoryColumn, CategoryModel,
        },
    },
    enums::catalog::Vote,
};

/// Repository for application operations
pub struct ApplicationRepository;

impl ApplicationRepository {
    pub async fn create<C>(
        application: ApplicationActiveModel,
        db: &C,
    ) -> StorageResult<ApplicationModel>
    where
        C: ConnectionTrait,
    {
        Ok(application.insert(db).await?)
    }

    pub async fn update<C>(
        application: ApplicationActiveModel,
        db: &C,
    ) -> StorageResult<ApplicationModel>
    where
        C: ConnectionTrait,
    {
        Ok(application.update(db).await?)
    }

    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Application::delete_by_id(id).exec(db).await?.rows_affected)
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<ApplicationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Application::find_by_id(id).one(db).await?)
    }

    pub async fn find_with_category<C>(
        id: i32,
        db: &C,
    ) -> StorageResult<Option<(ApplicationModel, Option<CategoryModel>)>>
    where
        C: ConnectionTrait,
    {
        Ok(Application::find_by_id(id)
            .find_also_related(Category)
            .one(db)
            .await?)
    }

    pub async fn count<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Application::find().count(db).await?)
    }

    pub async fn count_by_category_id<C>(category_id: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Application::find()
            .filter(ApplicationColumn::CategoryId.eq(category_id))
            .count(db)
            .await?)
    }

    /// Applications filed under the category with the given name
    pub async fn find_by_category_name<C>(
        category_name: &str,
        db: &C,
    ) -> StorageResult<Vec<ApplicationModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Application::find()
            .join(JoinType::InnerJoin, ApplicationRelation::Category.def())
            .filter(CategoryColumn::Name.eq(category_name))
            .order_by_asc(ApplicationColumn::Name)
            .all(db)
            .await?)
    }

    /// Move every application of `from` into `to`; returns how many moved
    pub async fn reassign_category<C>(from: i32, to: i32, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(Application::update_many()
            .col_expr(ApplicationColumn::CategoryId, Expr::value(to))
            .filter(ApplicationColumn::CategoryId.eq(from))
            .exec(db)
            .await?
            .rows_affected)
    }

    /// Counter bump done in SQL so concurrent votes are not lost.
    ///
    /// A counter already at `i32::MAX` stays there and the row is not touched.
    pub async fn increment_vote<C>(id: i32, vote: Vote, db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        let column = match vote {
            Vote::Like => ApplicationColumn::Likes,
            Vote::Dislike => ApplicationColumn::Dislikes,
        };
        Ok(Application::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(ApplicationColumn::Id.eq(id))
            .filter(column.lt(i32::MAX))
            .exec(db)
            .await?
            .rows_affected)
    }

    pub async fn page<C>(
        params: &ApplicationPageParams,
        db: &C,
    ) -> StorageResult<PageResult<ApplicationInfo>>
    where
        C: ConnectionTrait,
    {
        let query = Application::find()
            .apply_if(params.name.as_ref(), |q, name| {
                q.filter(ApplicationColumn::Name.like(format!("%{name}%")))
            })
            .apply_if(params.category_id, |q, category_id| {
                q.filter(ApplicationColumn::CategoryId.eq(category_id))
            })
            .order_by(ApplicationColumn::CreatedAt, Order::Desc)
            .order_by(ApplicationColumn::Id, Order::Desc);
        let (page, page_size) = (params.page(), params.page_size());
        let total = query.clone().count(db).await?;
        let records = query
            .find_also_related(Category)
            .paginate(db, page_size as u64)
            .fetch_page((page - 1) as u64)
            .await?
            .into_iter()
            .map(|(app, category)| {
                let category_name = category.map(|c| c.name).unwrap_or_default();
                ApplicationInfo::from_model(app, category_name)
            })
            .collect();

        Ok(PageResult {
            records,
            total,
            pages: ((total as f64) / (page_size as f64)).ceil() as u32,
            page,
            page_size,
        })
    }
}
