use chrono::Utc;
use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::pk_auto;
use sea_orm_migration::sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use tracing::{info, instrument};
use wallman_models::{
    constants::{DEFAULT_CATEGORY, DEFAULT_CATEGORY_ID, SCREENSAVER_CATEGORY},
    entities::prelude::{Category as CategoryEntity, CategoryActiveModel},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_tables(manager).await?;
        create_indexes(manager).await?;
        seeding_data(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScreensaverControl::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectorControl::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ApplicationLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Username,
    Email,
    Password,
    IsStaff,
    IsSuperuser,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Application {
    Table,
    Id,
    Name,
    OwnerId,
    CategoryId,
    Description,
    Icon,
    Archive,
    Likes,
    Dislikes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ApplicationLog {
    Table,
    Id,
    ApplicationId,
    ErrorDescription,
    Datetime,
}

#[derive(DeriveIden)]
enum ProjectorControl {
    Table,
    Id,
    InactivityTime,
    StartupWeekTime,
    ShutdownWeekTime,
    StartupWeekendTime,
    ShutdownWeekendTime,
}

#[derive(DeriveIden)]
enum ScreensaverControl {
    Table,
    Id,
    InactivityTime,
    ApplicationId,
}

async fn create_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Category::Table)
                .if_not_exists()
                .col(pk_auto(Category::Id))
                .col(
                    ColumnDef::new(Category::Name)
                        .string_len(64)
                        .not_null()
                        .comment("Category name"),
                )
                .col(
                    ColumnDef::new(Category::CreatedAt)
                        .timestamp()
                        .not_null()
                        .comment("Created at"),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Account::Table)
                .if_not_exists()
                .col(pk_auto(Account::Id))
                .col(ColumnDef::new(Account::Username).string_len(30).not_null())
                .col(ColumnDef::new(Account::Email).string().not_null())
                .col(
                    ColumnDef::new(Account::Password)
                        .string()
                        .not_null()
                        .comment("bcrypt hash"),
                )
                .col(
                    ColumnDef::new(Account::IsStaff)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(Account::IsSuperuser)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(ColumnDef::new(Account::CreatedAt).timestamp().not_null())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Application::Table)
                .if_not_exists()
                .col(pk_auto(Application::Id))
                .col(ColumnDef::new(Application::Name).string_len(128).not_null())
                .col(ColumnDef::new(Application::OwnerId).integer().not_null())
                .col(ColumnDef::new(Application::CategoryId).integer().not_null())
                .col(
                    ColumnDef::new(Application::Description)
                        .text()
                        .not_null()
                        .default(""),
                )
                .col(
                    ColumnDef::new(Application::Icon)
                        .string()
                        .null()
                        .comment("Icon asset path"),
                )
                .col(
                    ColumnDef::new(Application::Archive)
                        .string()
                        .null()
                        .comment("Archive asset path"),
                )
                .col(
                    ColumnDef::new(Application::Likes)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .col(
                    ColumnDef::new(Application::Dislikes)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .col(
                    ColumnDef::new(Application::CreatedAt)
                        .timestamp()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(ApplicationLog::Table)
                .if_not_exists()
                .col(pk_auto(ApplicationLog::Id))
                .col(
                    ColumnDef::new(ApplicationLog::ApplicationId)
                        .integer()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ApplicationLog::ErrorDescription)
                        .text()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ApplicationLog::Datetime)
                        .timestamp()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(ProjectorControl::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ProjectorControl::Id)
                        .integer()
                        .not_null()
                        .primary_key()
                        .comment("Always 1"),
                )
                .col(
                    ColumnDef::new(ProjectorControl::InactivityTime)
                        .integer()
                        .not_null()
                        .comment("Minutes"),
                )
                .col(
                    ColumnDef::new(ProjectorControl::StartupWeekTime)
                        .time()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ProjectorControl::ShutdownWeekTime)
                        .time()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ProjectorControl::StartupWeekendTime)
                        .time()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ProjectorControl::ShutdownWeekendTime)
                        .time()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(ScreensaverControl::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ScreensaverControl::Id)
                        .integer()
                        .not_null()
                        .primary_key()
                        .comment("Always 1"),
                )
                .col(
                    ColumnDef::new(ScreensaverControl::InactivityTime)
                        .time()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(ScreensaverControl::ApplicationId)
                        .integer()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    Ok(())
}

async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let indexes = [
        Index::create()
            .name("ux_category_name")
            .table(Category::Table)
            .col(Category::Name)
            .unique()
            .to_owned(),
        Index::create()
            .name("ux_account_username")
            .table(Account::Table)
            .col(Account::Username)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_application_category_id")
            .table(Application::Table)
            .col(Application::CategoryId)
            .to_owned(),
        Index::create()
            .name("idx_application_owner_id")
            .table(Application::Table)
            .col(Application::OwnerId)
            .to_owned(),
        Index::create()
            .name("idx_application_log_application_id")
            .table(ApplicationLog::Table)
            .col(ApplicationLog::ApplicationId)
            .to_owned(),
    ];
    for mut stmt in indexes {
        manager.create_index(stmt.if_not_exists().to_owned()).await?;
    }
    Ok(())
}

/// Seeds the fallback category with its fixed id, plus the screensaver category.
#[instrument(name = "seeding-data", skip_all)]
async fn seeding_data(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let transaction = db.begin().await?;
    let seeds = [
        (Some(DEFAULT_CATEGORY_ID), DEFAULT_CATEGORY),
        (None, SCREENSAVER_CATEGORY),
    ];
    for (id, name) in seeds {
        let mut active = CategoryActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(id) = id {
            if CategoryEntity::find_by_id(id)
                .one(&transaction)
                .await?
                .is_some()
            {
                continue;
            }
            active.id = Set(id);
        }
        active.insert(&transaction).await?;
        info!(category = name, "seeded category");
    }
    transaction.commit().await?;
    Ok(())
}
