//! Projector power schedule and screensaver selection.
//!
//! Each is a single row; creation never produces a second one.

use crate::{
    access::{AccessPolicy, Action},
    moderation::ModerationRules,
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use wallman_error::{catalog::CatalogError, CatalogResult};
use wallman_models::{
    constants::SCREENSAVER_CATEGORY,
    domain::prelude::{Actor, ProjectorSchedule, ScreensaverSchedule},
    entities::prelude::{ProjectorControlModel, ScreensaverControlModel},
};
use wallman_repository::{
    ApplicationRepository, ProjectorControlRepository, ScreensaverControlRepository,
};

const INVALID_SCREENSAVER: &str =
    "Select a valid choice. That choice is not one of the available choices.";

pub struct SchedulingConfig {
    db: DatabaseConnection,
    rules: ModerationRules,
}

impl SchedulingConfig {
    pub fn new(db: DatabaseConnection, rules: ModerationRules) -> Self {
        Self { db, rules }
    }

    /// First write wins. Returns whether the row was created.
    #[instrument(name = "create-projector-control", skip_all)]
    pub async fn create_projector_control(
        &self,
        actor: &Actor,
        schedule: ProjectorSchedule,
    ) -> CatalogResult<bool> {
        AccessPolicy::check(actor, Action::ManageControls)?;
        self.rules.check_projector_schedule(&schedule)?;

        let created =
            ProjectorControlRepository::insert_if_absent(schedule.into_active_model(), &self.db)
                .await?;
        if created {
            info!("projector control created");
        } else {
            info!("projector control already present, left unchanged");
        }
        Ok(created)
    }

    #[instrument(name = "update-projector-control", skip_all)]
    pub async fn update_projector_control(
        &self,
        actor: &Actor,
        schedule: ProjectorSchedule,
    ) -> CatalogResult<ProjectorControlModel> {
        AccessPolicy::check(actor, Action::ManageControls)?;
        self.rules.check_projector_schedule(&schedule)?;

        ProjectorControlRepository::upsert(schedule.into_active_model(), &self.db).await?;
        info!("projector control saved");
        self.get_projector_control()
            .await?
            .ok_or_else(|| CatalogError::NotFound("projector control".to_string()))
    }

    pub async fn get_projector_control(&self) -> CatalogResult<Option<ProjectorControlModel>> {
        Ok(ProjectorControlRepository::get(&self.db).await?)
    }

    /// Only applications filed under the screensaver category qualify
    #[instrument(name = "save-screensaver-control", skip(self, actor))]
    pub async fn save_screensaver_control(
        &self,
        actor: &Actor,
        schedule: ScreensaverSchedule,
    ) -> CatalogResult<ScreensaverControlModel> {
        AccessPolicy::check(actor, Action::ManageControls)?;
        self.rules.check_screensaver_schedule(&schedule)?;

        let eligible = ApplicationRepository::find_by_category_name(SCREENSAVER_CATEGORY, &self.db)
            .await?
            .iter()
            .any(|app| app.id == schedule.application_id);
        if !eligible {
            return Err(CatalogError::validation("application_id", INVALID_SCREENSAVER));
        }

        ScreensaverControlRepository::upsert(schedule.into_active_model(), &self.db).await?;
        info!("screensaver control saved");
        self.get_screensaver_control()
            .await?
            .ok_or_else(|| CatalogError::NotFound("screensaver control".to_string()))
    }

    pub async fn get_screensaver_control(&self) -> CatalogResult<Option<ScreensaverControlModel>> {
        Ok(ScreensaverControlRepository::get(&self.db).await?)
    }
}
