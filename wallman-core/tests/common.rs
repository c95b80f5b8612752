#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tracing::Level;
use wallman_common::{hash::bcrypt_hash, FsAssetStore, MemoryNotifier};
use wallman_core::{CatalogStore, ModerationDesk, ModerationRules, SchedulingConfig};
use wallman_models::{
    domain::prelude::{Actor, ApplicationInfo, NewAccount, NewApplication, NewCategory},
    entities::prelude::AccountActiveModel,
};
use wallman_repository::AccountRepository;
use wallman_storage::WMDbManager;

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .without_time()
            .try_init();
    });
}

/// Freshly migrated in-memory wall with one staff member and two regular
/// accounts.
pub struct Wall {
    pub manager: Arc<WMDbManager>,
    pub db: DatabaseConnection,
    pub notifier: MemoryNotifier,
    pub assets: TempDir,
    pub catalog: CatalogStore,
    pub desk: ModerationDesk,
    pub scheduling: SchedulingConfig,
    pub staff: Actor,
    pub owner: Actor,
    pub stranger: Actor,
}

impl Wall {
    pub async fn new() -> Self {
        init_tracing();
        let manager = WMDbManager::memory().await.unwrap();
        let db = manager.get_connection().unwrap();
        let notifier = MemoryNotifier::new();
        let assets = tempfile::tempdir().unwrap();
        let rules = ModerationRules::default();

        let catalog = CatalogStore::new(
            db.clone(),
            Arc::new(notifier.clone()),
            Arc::new(FsAssetStore::new(assets.path())),
            rules.clone(),
        );
        let desk = ModerationDesk::new(db.clone(), Arc::new(notifier.clone()), rules.clone())
            .with_site_url("http://wall.test/");
        let scheduling = SchedulingConfig::new(db.clone(), rules);

        let staff = AccountRepository::create(
            AccountActiveModel {
                username: Set("admin".into()),
                email: Set("admin@uc.pt".into()),
                password: Set(bcrypt_hash("secret").unwrap()),
                is_staff: Set(true),
                is_superuser: Set(true),
                created_at: Set(Utc::now()),
                ..Default::default()
            },
            &db,
        )
        .await
        .unwrap();
        let owner = desk.register_account(account("owner")).await.unwrap();
        let stranger = desk.register_account(account("stranger")).await.unwrap();

        let staff = Actor::from(staff);
        let owner = desk.actor_for(owner.id).await.unwrap();
        let stranger = desk.actor_for(stranger.id).await.unwrap();

        Self {
            manager,
            db,
            notifier,
            assets,
            catalog,
            desk,
            scheduling,
            staff,
            owner,
            stranger,
        }
    }

    pub async fn category(&self, name: &str) -> i32 {
        self.catalog
            .create_category(&self.staff, NewCategory { name: name.into() })
            .await
            .unwrap()
            .id
    }

    pub async fn application(&self, name: &str, category_id: i32) -> ApplicationInfo {
        self.catalog
            .create_application(&self.owner, new_application(name, category_id))
            .await
            .unwrap()
    }
}

pub fn account(username: &str) -> NewAccount {
    NewAccount {
        username: username.into(),
        email: format!("{username}@uc.pt"),
        password1: "secret".into(),
        password2: "secret".into(),
    }
}

pub fn new_application(name: &str, category_id: i32) -> NewApplication {
    NewApplication {
        name: name.into(),
        category_id,
        description: "Shows the campus map".into(),
        tos: true,
    }
}
