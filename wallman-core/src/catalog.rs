use crate::{
    access::{AccessPolicy, Action},
    moderation::ModerationRules,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set, SqlErr, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;
use wallman_common::{AssetStore, Notification, Notifier};
use wallman_error::{catalog::CatalogError, storage::StorageError, CatalogResult};
use wallman_models::{
    constants::{DEFAULT_CATEGORY, DEFAULT_CATEGORY_ID, REMOVAL_SUBJECT, SCREENSAVER_CATEGORY},
    domain::prelude::{
        Actor, ApplicationInfo, ApplicationLogInfo, ApplicationPageParams, CategoryInfo,
        NewApplication, NewApplicationLog, NewCategory, PageResult, RenameCategory,
        UpdateApplication,
    },
    entities::prelude::{
        ApplicationActiveModel, ApplicationLogActiveModel, ApplicationModel, CategoryActiveModel,
        CategoryModel,
    },
    enums::catalog::{AssetKind, RemovalKind, Vote},
};
use wallman_repository::{
    AccountRepository, ApplicationLogRepository, ApplicationRepository, CategoryRepository,
    ScreensaverControlRepository,
};

const INVALID_CATEGORY: &str = "Select a valid choice. That choice is not one of the available choices.";

/// Observer of committed catalog mutations.
///
/// Hooks run after the transaction commits; a failing hook is logged and
/// never undoes the mutation.
#[async_trait]
pub trait CatalogHook: Send + Sync {
    async fn on_category_deleted(&self, _category: &CategoryModel, _reassigned: u64) -> CatalogResult<()> {
        Ok(())
    }

    async fn on_application_removed(
        &self,
        _application: &ApplicationModel,
        _kind: RemovalKind,
    ) -> CatalogResult<()> {
        Ok(())
    }
}

/// Categories, applications and their error logs
pub struct CatalogStore {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
    assets: Arc<dyn AssetStore>,
    hooks: Vec<Arc<dyn CatalogHook>>,
    rules: ModerationRules,
}

impl CatalogStore {
    pub fn new(
        db: DatabaseConnection,
        notifier: Arc<dyn Notifier>,
        assets: Arc<dyn AssetStore>,
        rules: ModerationRules,
    ) -> Self {
        Self {
            db,
            notifier,
            assets,
            hooks: Vec::new(),
            rules,
        }
    }

    pub fn with_hooks(mut self, hooks: Vec<Arc<dyn CatalogHook>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn CatalogHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    // ----- categories -----

    #[instrument(name = "create-category", skip(self, actor), fields(name = %category.name))]
    pub async fn create_category(
        &self,
        actor: &Actor,
        category: NewCategory,
    ) -> CatalogResult<CategoryInfo> {
        AccessPolicy::check(actor, Action::ManageCategories)?;
        self.rules.check_new_category(&category)?;

        let name = category.name.trim().to_string();
        if CategoryRepository::exists_by_name(&name, &self.db).await? {
            return Err(CatalogError::DuplicateName(name));
        }
        let created = CategoryRepository::create(
            CategoryActiveModel {
                name: Set(name.clone()),
                created_at: Set(Utc::now()),
                ..Default::default()
            },
            &self.db,
        )
        .await
        .map_err(|e| duplicate_or(e, &name))?;

        info!(category_id = created.id, "category created");
        Ok(CategoryInfo::from_model(created, 0))
    }

    #[instrument(name = "rename-category", skip(self, actor), fields(name = %category.name))]
    pub async fn rename_category(
        &self,
        actor: &Actor,
        id: i32,
        category: RenameCategory,
    ) -> CatalogResult<CategoryInfo> {
        AccessPolicy::check(actor, Action::ManageCategories)?;
        if id == DEFAULT_CATEGORY_ID {
            return Err(CatalogError::ProtectedEntity(DEFAULT_CATEGORY.to_string()));
        }
        self.rules.check_rename_category(&category)?;

        let existing = self.category(id).await?;
        protect(&existing)?;
        let name = category.name.trim().to_string();
        if CategoryRepository::exists_by_name_exclude_id(id, &name, &self.db).await? {
            return Err(CatalogError::DuplicateName(name));
        }

        let mut active = existing.into_active_model();
        active.name = Set(name.clone());
        let updated = CategoryRepository::update(active, &self.db)
            .await
            .map_err(|e| duplicate_or(e, &name))?;
        let applications = ApplicationRepository::count_by_category_id(id, &self.db).await?;

        info!(category_id = id, "category renamed");
        Ok(CategoryInfo::from_model(updated, applications))
    }

    /// Delete a category, moving its applications to the default one.
    ///
    /// Returns how many applications were moved.
    #[instrument(name = "delete-category", skip(self, actor))]
    pub async fn delete_category(&self, actor: &Actor, id: i32) -> CatalogResult<u64> {
        AccessPolicy::check(actor, Action::ManageCategories)?;
        if id == DEFAULT_CATEGORY_ID {
            return Err(CatalogError::ProtectedEntity(DEFAULT_CATEGORY.to_string()));
        }
        let category = self.category(id).await?;
        protect(&category)?;

        let reassigned = self
            .db
            .transaction::<_, _, CatalogError>(|txn| {
                Box::pin(async move {
                    let moved =
                        ApplicationRepository::reassign_category(id, DEFAULT_CATEGORY_ID, txn)
                            .await?;
                    CategoryRepository::delete(id, txn).await?;
                    Ok(moved)
                })
            })
            .await?;

        info!(category_id = id, reassigned, "category deleted");
        for hook in &self.hooks {
            if let Err(e) = hook.on_category_deleted(&category, reassigned).await {
                warn!(category_id = id, "category hook failed: {e}");
            }
        }
        Ok(reassigned)
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryInfo>> {
        Ok(CategoryRepository::find_all_with_counts(&self.db)
            .await?
            .into_iter()
            .map(|(category, count)| CategoryInfo::from_model(category, count))
            .collect())
    }

    pub async fn find_category(&self, id: i32) -> CatalogResult<CategoryInfo> {
        let category = self.category(id).await?;
        let applications = ApplicationRepository::count_by_category_id(id, &self.db).await?;
        Ok(CategoryInfo::from_model(category, applications))
    }

    // ----- applications -----

    #[instrument(name = "create-application", skip(self, actor, application), fields(name = %application.name))]
    pub async fn create_application(
        &self,
        actor: &Actor,
        application: NewApplication,
    ) -> CatalogResult<ApplicationInfo> {
        AccessPolicy::check(actor, Action::CreateApplication)?;
        let owner_id = actor.id().ok_or_else(CatalogError::login_required)?;
        self.rules.check_new_application(&application)?;
        let category = self.category_choice(application.category_id).await?;

        let created = ApplicationRepository::create(
            ApplicationActiveModel {
                name: Set(application.name.trim().to_string()),
                owner_id: Set(owner_id),
                category_id: Set(category.id),
                description: Set(application.description),
                icon: Set(None),
                archive: Set(None),
                likes: Set(0),
                dislikes: Set(0),
                created_at: Set(Utc::now()),
                ..Default::default()
            },
            &self.db,
        )
        .await?;

        info!(application_id = created.id, owner_id, "application created");
        Ok(ApplicationInfo::from_model(created, category.name))
    }

    #[instrument(name = "update-application", skip(self, actor, application))]
    pub async fn update_application(
        &self,
        actor: &Actor,
        id: i32,
        application: UpdateApplication,
    ) -> CatalogResult<ApplicationInfo> {
        AccessPolicy::require_login(actor)?;
        let existing = self.application(id).await?;
        AccessPolicy::check(
            actor,
            Action::ModifyApplication {
                owner_id: existing.owner_id,
            },
        )?;
        self.rules.check_update_application(&application)?;
        let category = self.category_choice(application.category_id).await?;

        let mut active = existing.into_active_model();
        active.name = Set(application.name.trim().to_string());
        active.category_id = Set(category.id);
        active.description = Set(application.description);
        let updated = ApplicationRepository::update(active, &self.db).await?;

        info!(application_id = id, "application updated");
        Ok(ApplicationInfo::from_model(updated, category.name))
    }

    /// Owner takes their own application down. Nobody is notified.
    #[instrument(name = "delete-application", skip(self, actor))]
    pub async fn delete_application(&self, actor: &Actor, id: i32) -> CatalogResult<()> {
        AccessPolicy::require_login(actor)?;
        let application = self.application(id).await?;
        AccessPolicy::check(
            actor,
            Action::ModifyApplication {
                owner_id: application.owner_id,
            },
        )?;
        self.drop_application(&application).await?;
        self.after_removal(&application, RemovalKind::SelfRemoval).await;
        Ok(())
    }

    /// Staff takes an application down; the owner gets one notification.
    #[instrument(name = "remove-application", skip(self, actor))]
    pub async fn remove_application(&self, actor: &Actor, id: i32) -> CatalogResult<()> {
        AccessPolicy::check(actor, Action::RemoveApplication)?;
        let application = self.application(id).await?;
        self.drop_application(&application).await?;

        match AccountRepository::find_by_id(application.owner_id, &self.db).await? {
            Some(owner) => {
                let body = format!(
                    "Hello {},\n\nyour application \"{}\" was removed from the wall by the administrators.",
                    owner.username, application.name
                );
                let notification = Notification::new(owner.email, REMOVAL_SUBJECT, body);
                if let Err(e) = self.notifier.send(notification).await {
                    warn!(application_id = id, "removal notification failed: {e}");
                }
            }
            None => warn!(
                application_id = id,
                owner_id = application.owner_id,
                "owner not found, removal notification skipped"
            ),
        }

        self.after_removal(&application, RemovalKind::Moderated).await;
        Ok(())
    }

    /// Store an icon or archive and point the application at it
    #[instrument(name = "attach-asset", skip(self, actor, bytes), fields(len = bytes.len()))]
    pub async fn attach_asset(
        &self,
        actor: &Actor,
        id: i32,
        kind: AssetKind,
        bytes: &[u8],
    ) -> CatalogResult<ApplicationInfo> {
        AccessPolicy::require_login(actor)?;
        let application = self.application(id).await?;
        AccessPolicy::check(
            actor,
            Action::ModifyApplication {
                owner_id: application.owner_id,
            },
        )?;
        if bytes.is_empty() {
            return Err(CatalogError::validation(kind.as_str(), "The submitted file is empty."));
        }

        let reference = self.assets.persist(id, kind, bytes).await?;
        let mut active = application.into_active_model();
        match kind {
            AssetKind::Icon => active.icon = Set(Some(reference)),
            AssetKind::Archive => active.archive = Set(Some(reference)),
        }
        ApplicationRepository::update(active, &self.db).await?;

        info!(application_id = id, %kind, "asset attached");
        self.find_application(id).await
    }

    /// Counts one vote; a counter already at its limit stays there
    #[instrument(name = "vote", skip(self))]
    pub async fn vote(&self, id: i32, vote: Vote) -> CatalogResult<ApplicationInfo> {
        ApplicationRepository::increment_vote(id, vote, &self.db).await?;
        self.find_application(id).await
    }

    pub async fn find_application(&self, id: i32) -> CatalogResult<ApplicationInfo> {
        let (application, category) = ApplicationRepository::find_with_category(id, &self.db)
            .await?
            .ok_or_else(|| not_found_application(id))?;
        let category_name = category.map(|c| c.name).unwrap_or_default();
        Ok(ApplicationInfo::from_model(application, category_name))
    }

    pub async fn page_applications(
        &self,
        params: ApplicationPageParams,
    ) -> CatalogResult<PageResult<ApplicationInfo>> {
        params.validate()?;
        Ok(ApplicationRepository::page(&params, &self.db).await?)
    }

    /// Applications that may be picked as the wall screensaver
    pub async fn list_screensaver_choices(&self) -> CatalogResult<Vec<ApplicationInfo>> {
        Ok(
            ApplicationRepository::find_by_category_name(SCREENSAVER_CATEGORY, &self.db)
                .await?
                .into_iter()
                .map(|app| ApplicationInfo::from_model(app, SCREENSAVER_CATEGORY.to_string()))
                .collect(),
        )
    }

    // ----- logs -----

    #[instrument(name = "record-log", skip(self, log))]
    pub async fn record_log(
        &self,
        application_id: i32,
        log: NewApplicationLog,
    ) -> CatalogResult<ApplicationLogInfo> {
        log.validate()?;
        let application = self.application(application_id).await?;
        let created = ApplicationLogRepository::create(
            ApplicationLogActiveModel {
                application_id: Set(application.id),
                error_description: Set(log.error_description),
                datetime: Set(Utc::now()),
                ..Default::default()
            },
            &self.db,
        )
        .await?;
        Ok(ApplicationLogInfo::from_model(created, application.name))
    }

    pub async fn list_logs(
        &self,
        actor: &Actor,
        application_id: i32,
    ) -> CatalogResult<Vec<ApplicationLogInfo>> {
        AccessPolicy::require_login(actor)?;
        let application = self.application(application_id).await?;
        AccessPolicy::check(
            actor,
            Action::ModifyApplication {
                owner_id: application.owner_id,
            },
        )?;
        Ok(
            ApplicationLogRepository::find_by_application_id(application_id, &self.db)
                .await?
                .into_iter()
                .map(|log| ApplicationLogInfo::from_model(log, application.name.clone()))
                .collect(),
        )
    }

    async fn category(&self, id: i32) -> CatalogResult<CategoryModel> {
        CategoryRepository::find_by_id(id, &self.db)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("category {id}")))
    }

    /// A category referenced from an application form
    async fn category_choice(&self, id: i32) -> CatalogResult<CategoryModel> {
        CategoryRepository::find_by_id(id, &self.db)
            .await?
            .ok_or_else(|| CatalogError::validation("category_id", INVALID_CATEGORY))
    }

    async fn application(&self, id: i32) -> CatalogResult<ApplicationModel> {
        ApplicationRepository::find_by_id(id, &self.db)
            .await?
            .ok_or_else(|| not_found_application(id))
    }

    /// Row, logs and screensaver selection go in one transaction
    async fn drop_application(&self, application: &ApplicationModel) -> CatalogResult<()> {
        let id = application.id;
        let logs = self
            .db
            .transaction::<_, _, CatalogError>(|txn| {
                Box::pin(async move {
                    let logs = ApplicationLogRepository::delete_by_application_id(id, txn).await?;
                    ScreensaverControlRepository::delete_by_application_id(id, txn).await?;
                    ApplicationRepository::delete(id, txn).await?;
                    Ok(logs)
                })
            })
            .await?;
        info!(application_id = id, logs, "application deleted");

        if let Err(e) = self.assets.purge(id).await {
            warn!(application_id = id, "asset purge failed: {e}");
        }
        Ok(())
    }

    async fn after_removal(&self, application: &ApplicationModel, kind: RemovalKind) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_application_removed(application, kind).await {
                warn!(application_id = application.id, "removal hook failed: {e}");
            }
        }
    }
}

/// The screensaver picker looks its category up by name
fn protect(category: &CategoryModel) -> CatalogResult<()> {
    if category.name == SCREENSAVER_CATEGORY {
        return Err(CatalogError::ProtectedEntity(category.name.clone()));
    }
    Ok(())
}

#[inline]
fn not_found_application(id: i32) -> CatalogError {
    CatalogError::NotFound(format!("application {id}"))
}

/// A unique index hit raced past the existence check
pub(crate) fn duplicate_or(e: StorageError, name: &str) -> CatalogError {
    match &e {
        StorageError::DBError(db)
            if matches!(db.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
        {
            CatalogError::DuplicateName(name.to_string())
        }
        _ => e.into(),
    }
}
