use crate::{
    access::{AccessPolicy, Action},
    catalog::duplicate_or,
    moderation::rules::ModerationRules,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, IntoActiveModel, Set};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use wallman_common::{
    hash::{bcrypt_check, bcrypt_hash},
    Notification, Notifier,
};
use wallman_error::{catalog::CatalogError, CatalogResult};
use wallman_models::{
    domain::prelude::{AbuseReport, AccountInfo, Actor, AddAdmin, AdminMessage, NewAccount},
    entities::prelude::{AccountActiveModel, AccountModel},
};
use wallman_repository::{AccountRepository, ApplicationRepository};

pub const ABUSE_SUBJECT: &str = "Abuse report";
pub const ADMIN_MESSAGE_SUBJECT: &str = "Message to the administrators";
pub const BAD_CREDENTIALS: &str = "Please enter a correct username and password.";
pub const USERNAME_TAKEN: &str = "Username already taken.";

/// Account lifecycle plus the user-to-staff channels: abuse reports,
/// admin messages and promotions.
pub struct ModerationDesk {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
    rules: ModerationRules,
    site_url: String,
}

impl ModerationDesk {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>, rules: ModerationRules) -> Self {
        Self {
            db,
            notifier,
            rules,
            site_url: String::new(),
        }
    }

    /// Base url prefixed to links in notification bodies
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn rules(&self) -> &ModerationRules {
        &self.rules
    }

    /// Creates a regular account. Usernames are unique.
    #[instrument(name = "register-account", skip_all, fields(username = %account.username))]
    pub async fn register_account(&self, account: NewAccount) -> CatalogResult<AccountInfo> {
        self.rules.check_new_account(&account)?;

        let username = account.username.trim().to_string();
        if AccountRepository::exists_by_username(&username, &self.db).await? {
            return Err(CatalogError::DuplicateName(USERNAME_TAKEN.to_string()));
        }

        let password = bcrypt_hash(&account.password1)
            .map_err(|e| CatalogError::Credential(e.to_string()))?;
        let created = AccountRepository::create(
            AccountActiveModel {
                username: Set(username),
                email: Set(account.email.trim().to_string()),
                password: Set(password),
                is_staff: Set(false),
                is_superuser: Set(false),
                created_at: Set(Utc::now()),
                ..Default::default()
            },
            &self.db,
        )
        .await
        .map_err(|e| duplicate_or(e, USERNAME_TAKEN))?;
        info!(account_id = created.id, "account registered");
        Ok(created.into())
    }

    /// Resolve login credentials to an actor
    #[instrument(name = "authenticate", skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> CatalogResult<Actor> {
        let account = AccountRepository::find_by_username(username.trim(), &self.db)
            .await?
            .filter(|account| bcrypt_check(password, &account.password))
            .ok_or_else(|| CatalogError::validation("__all__", BAD_CREDENTIALS))?;
        Ok(account.into())
    }

    /// Look an account up again, e.g. to turn a token subject into an actor
    pub async fn actor_for(&self, account_id: i32) -> CatalogResult<Actor> {
        Ok(AccountRepository::find_by_id(account_id, &self.db)
            .await?
            .map(Actor::from)
            .unwrap_or_default())
    }

    /// Tell every staff member about a problematic application.
    ///
    /// Returns how many staff members were notified.
    #[instrument(name = "report-abuse", skip(self, actor, report))]
    pub async fn report_abuse(
        &self,
        actor: &Actor,
        application_id: i32,
        report: AbuseReport,
    ) -> CatalogResult<usize> {
        AccessPolicy::check(actor, Action::ReportAbuse)?;
        self.rules.check_abuse_report(&report)?;

        let application = ApplicationRepository::find_by_id(application_id, &self.db)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("application {application_id}")))?;

        let reporter = reporter_name(actor);
        let subject = format!("{ABUSE_SUBJECT}: {}", application.name);
        let body = format!(
            "{reporter} reported {} ({}/applications/{}/):\n\n{}",
            application.name,
            self.site_url,
            application.id,
            report.abuse_description.trim()
        );
        self.notify_staff(&subject, &body).await
    }

    #[instrument(name = "message-admins", skip_all)]
    pub async fn message_admins(&self, actor: &Actor, message: AdminMessage) -> CatalogResult<usize> {
        AccessPolicy::check(actor, Action::MessageAdmins)?;
        self.rules.check_admin_message(&message)?;

        let body = format!("{} wrote:\n\n{}", reporter_name(actor), message.message.trim());
        self.notify_staff(ADMIN_MESSAGE_SUBJECT, &body).await
    }

    /// Promote the account registered under the given email
    #[instrument(name = "add-admin", skip(self, actor), fields(email = %admin.email, role = %admin.role))]
    pub async fn add_admin(&self, actor: &Actor, admin: AddAdmin) -> CatalogResult<AccountInfo> {
        AccessPolicy::check(actor, Action::ManageAdmins)?;
        self.rules.check_add_admin(&admin)?;

        let account: AccountModel = AccountRepository::find_by_email(admin.email.trim(), &self.db)
            .await?
            .ok_or_else(|| {
                CatalogError::validation("email", "No account is registered with this email.")
            })?;

        let mut active = account.into_active_model();
        active.is_staff = Set(true);
        if admin.role.is_superuser() {
            active.is_superuser = Set(true);
        }
        let updated = AccountRepository::update(active, &self.db).await?;
        info!(account_id = updated.id, "account promoted");
        Ok(updated.into())
    }

    async fn notify_staff(&self, subject: &str, body: &str) -> CatalogResult<usize> {
        let staff = AccountRepository::find_staff(&self.db).await?;
        let mut delivered = 0;
        for member in staff {
            let notification = Notification::new(member.email.as_str(), subject, body);
            match self.notifier.send(notification).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(recipient = %member.email, "notification failed: {e}"),
            }
        }
        Ok(delivered)
    }
}

fn reporter_name(actor: &Actor) -> String {
    actor
        .principal()
        .map(|p| format!("{} <{}>", p.username, p.email))
        .unwrap_or_else(|| "anonymous".to_string())
}
