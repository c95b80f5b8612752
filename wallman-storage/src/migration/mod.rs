mod m20240101_000001_create_table;

pub use sea_orm_migration::MigratorTrait;
use sea_orm_migration::MigrationTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_table::Migration)]
    }
}
