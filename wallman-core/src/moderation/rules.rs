//! Form-level validation for everything users submit.
//!
//! Application and schedule forms carry `validator` derives for their
//! shape; everything else is checked here field by field.

use chrono::Timelike;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidateEmail};
use wallman_error::{catalog::CatalogError, CatalogResult};
use wallman_models::domain::prelude::{
    AbuseReport, AddAdmin, AdminMessage, NewAccount, NewApplication, NewCategory,
    ProjectorSchedule, RenameCategory, ScreensaverSchedule, UpdateApplication,
};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+$").expect("username pattern compiles"));

pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const CATEGORY_NAME_MAX_LEN: usize = 64;

pub const TOS_NOT_ACCEPTED: &str = "tos not accepted";
pub const REQUIRED: &str = "This field is required.";
pub const INVALID_USERNAME: &str =
    "This value may contain only letters, numbers and underscore characters.";
pub const SHORT_PASSWORD: &str = "Password should have at least 6 characters.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const WEEK_ORDER: &str = "The startup week time must be lower than the shutdown week time.";
pub const WEEKEND_ORDER: &str =
    "The startup weekend time must be lower than the shutdown weekend time.";
pub const INACTIVITY_TOO_SMALL: &str = "inactivity_time too small";

/// Field errors in the order they were found
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Violations(Vec<(String, String)>);

impl Violations {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|(f, _)| f.as_str()).collect()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    /// `Ok` when empty, otherwise the first violation
    pub fn into_result(self) -> CatalogResult<()> {
        match self.0.into_iter().next() {
            None => Ok(()),
            Some((field, message)) => Err(CatalogError::Validation { field, message }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModerationRules {
    org_email_domain: String,
}

impl Default for ModerationRules {
    fn default() -> Self {
        Self::new("uc.pt")
    }
}

impl ModerationRules {
    pub fn new(org_email_domain: impl Into<String>) -> Self {
        Self {
            org_email_domain: org_email_domain.into(),
        }
    }

    pub fn check_category_name(&self, name: &str) -> CatalogResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("name", REQUIRED));
        }
        if name.chars().count() > CATEGORY_NAME_MAX_LEN {
            return Err(CatalogError::validation(
                "name",
                format!("Ensure this value has at most {CATEGORY_NAME_MAX_LEN} characters."),
            ));
        }
        Ok(())
    }

    pub fn check_new_category(&self, category: &NewCategory) -> CatalogResult<()> {
        self.check_category_name(&category.name)
    }

    pub fn check_rename_category(&self, category: &RenameCategory) -> CatalogResult<()> {
        self.check_category_name(&category.name)
    }

    pub fn check_new_application(&self, application: &NewApplication) -> CatalogResult<()> {
        application.validate()?;
        if application.name.trim().is_empty() {
            return Err(CatalogError::validation("name", REQUIRED));
        }
        if !application.tos {
            return Err(CatalogError::validation("tos", TOS_NOT_ACCEPTED));
        }
        Ok(())
    }

    pub fn check_update_application(&self, application: &UpdateApplication) -> CatalogResult<()> {
        application.validate()?;
        if application.name.trim().is_empty() {
            return Err(CatalogError::validation("name", REQUIRED));
        }
        Ok(())
    }

    pub fn check_abuse_report(&self, report: &AbuseReport) -> CatalogResult<()> {
        if report.abuse_description.trim().is_empty() {
            return Err(CatalogError::validation("abuse_description", REQUIRED));
        }
        Ok(())
    }

    pub fn check_admin_message(&self, message: &AdminMessage) -> CatalogResult<()> {
        if message.message.trim().is_empty() {
            return Err(CatalogError::validation("message", REQUIRED));
        }
        Ok(())
    }

    pub fn check_add_admin(&self, admin: &AddAdmin) -> CatalogResult<()> {
        if !admin.email.trim().validate_email() {
            return Err(CatalogError::validation("email", INVALID_EMAIL));
        }
        Ok(())
    }

    /// Every problem with a sign-up form, in field order
    pub fn account_violations(&self, account: &NewAccount) -> Violations {
        let mut violations = Violations::default();

        let username = account.username.trim();
        if username.is_empty() {
            violations.push("username", REQUIRED);
        } else if username.chars().count() > USERNAME_MAX_LEN {
            violations.push(
                "username",
                format!("Ensure this value has at most {USERNAME_MAX_LEN} characters."),
            );
        } else if !USERNAME_RE.is_match(username) {
            violations.push("username", INVALID_USERNAME);
        }

        let email = account.email.trim();
        if email.is_empty() {
            violations.push("email", REQUIRED);
        } else if !email.validate_email() {
            violations.push("email", INVALID_EMAIL);
        } else if !email.ends_with(self.org_email_domain.as_str()) {
            violations.push(
                "email",
                format!("Email must be on {} domain.", self.org_email_domain),
            );
        }

        let password = account.password1.trim();
        if password.chars().count() < PASSWORD_MIN_LEN {
            violations.push("password1", SHORT_PASSWORD);
        }

        if account.password1 != account.password2 {
            violations.push("__all__", PASSWORD_MISMATCH);
        }

        violations
    }

    pub fn check_new_account(&self, account: &NewAccount) -> CatalogResult<()> {
        self.account_violations(account).into_result()
    }

    pub fn check_projector_schedule(&self, schedule: &ProjectorSchedule) -> CatalogResult<()> {
        schedule.validate()?;
        if schedule.startup_week_time >= schedule.shutdown_week_time {
            return Err(CatalogError::validation("__all__", WEEK_ORDER));
        }
        if schedule.startup_weekend_time >= schedule.shutdown_weekend_time {
            return Err(CatalogError::validation("__all__", WEEKEND_ORDER));
        }
        Ok(())
    }

    pub fn check_screensaver_schedule(&self, schedule: &ScreensaverSchedule) -> CatalogResult<()> {
        if schedule.inactivity_time.num_seconds_from_midnight() == 0 {
            return Err(CatalogError::validation(
                "inactivity_time",
                INACTIVITY_TOO_SMALL,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use wallman_models::enums::catalog::AdminRole;

    fn form(username: &str, email: &str, password1: &str, password2: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            email: email.into(),
            password1: password1.into(),
            password2: password2.into(),
        }
    }

    fn assert_field(result: CatalogResult<()>, expected: &str) {
        match result {
            Err(CatalogError::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation on {expected}, got {other:?}"),
        }
    }

    #[test]
    fn valid_account_passes() {
        let rules = ModerationRules::default();
        assert!(rules
            .check_new_account(&form("zacarias_stu", "zacarias@student.dei.uc.pt", "secret1", "secret1"))
            .is_ok());
    }

    #[test]
    fn each_account_rule_fails_on_its_own() {
        let rules = ModerationRules::default();

        let foreign = rules.account_violations(&form("bob", "bob@gmail.com", "secret1", "secret1"));
        assert_eq!(foreign.fields(), vec!["email"]);
        assert_eq!(foreign.message("email"), Some("Email must be on uc.pt domain."));

        let short = rules.account_violations(&form("bob", "bob@uc.pt", "abc", "abc"));
        assert_eq!(short.fields(), vec!["password1"]);
        assert_eq!(short.message("password1"), Some(SHORT_PASSWORD));

        let mismatch = rules.account_violations(&form("bob", "bob@uc.pt", "secret1", "secret2"));
        assert_eq!(mismatch.fields(), vec!["__all__"]);

        let bad_name = rules.account_violations(&form("bob smith", "bob@uc.pt", "secret1", "secret1"));
        assert_eq!(bad_name.fields(), vec!["username"]);
    }

    #[test]
    fn account_violations_are_collected_together() {
        let rules = ModerationRules::default();
        let all = rules.account_violations(&form("bob", "bob@gmail.com", "abc", "abd"));
        assert_eq!(all.fields(), vec!["email", "password1", "__all__"]);
        assert_field(all.into_result(), "email");
    }

    #[test]
    fn org_domain_is_configurable() {
        let rules = ModerationRules::new("example.org");
        assert!(rules
            .check_new_account(&form("bob", "bob@example.org", "secret1", "secret1"))
            .is_ok());
        assert_field(
            rules.check_new_account(&form("bob", "bob@uc.pt", "secret1", "secret1")),
            "email",
        );
    }

    #[test]
    fn terms_of_service_must_be_accepted() {
        let rules = ModerationRules::default();
        let mut app = NewApplication {
            name: "Example App".into(),
            category_id: 1,
            description: String::new(),
            tos: false,
        };
        match rules.check_new_application(&app) {
            Err(CatalogError::Validation { field, message }) => {
                assert_eq!(field, "tos");
                assert_eq!(message, TOS_NOT_ACCEPTED);
            }
            other => panic!("unexpected {other:?}"),
        }
        app.tos = true;
        assert!(rules.check_new_application(&app).is_ok());
    }

    #[test]
    fn blank_reports_and_messages_are_rejected() {
        let rules = ModerationRules::default();
        assert_field(
            rules.check_abuse_report(&AbuseReport {
                abuse_description: "   ".into(),
            }),
            "abuse_description",
        );
        assert_field(
            rules.check_admin_message(&AdminMessage {
                message: String::new(),
            }),
            "message",
        );
        assert!(rules
            .check_admin_message(&AdminMessage {
                message: "hello".into()
            })
            .is_ok());
    }

    #[test]
    fn add_admin_needs_a_valid_email() {
        let rules = ModerationRules::default();
        assert_field(
            rules.check_add_admin(&AddAdmin {
                email: "not-an-email".into(),
                role: AdminRole::Normal,
            }),
            "email",
        );
        assert!(rules
            .check_add_admin(&AddAdmin {
                email: "plum@dei.uc.pt".into(),
                role: AdminRole::Power,
            })
            .is_ok());
    }

    #[test]
    fn projector_startup_must_precede_shutdown() {
        let rules = ModerationRules::default();
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let mut schedule = ProjectorSchedule {
            inactivity_time: 5,
            startup_week_time: t(8),
            shutdown_week_time: t(20),
            startup_weekend_time: t(10),
            shutdown_weekend_time: t(18),
        };
        assert!(rules.check_projector_schedule(&schedule).is_ok());

        schedule.shutdown_week_time = t(8);
        match rules.check_projector_schedule(&schedule) {
            Err(CatalogError::Validation { message, .. }) => assert_eq!(message, WEEK_ORDER),
            other => panic!("unexpected {other:?}"),
        }

        schedule.shutdown_week_time = t(20);
        schedule.startup_weekend_time = t(19);
        match rules.check_projector_schedule(&schedule) {
            Err(CatalogError::Validation { message, .. }) => assert_eq!(message, WEEKEND_ORDER),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn screensaver_needs_a_nonzero_delay() {
        let rules = ModerationRules::default();
        let zero = ScreensaverSchedule {
            inactivity_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            application_id: 1,
        };
        match rules.check_screensaver_schedule(&zero) {
            Err(CatalogError::Validation { field, message }) => {
                assert_eq!(field, "inactivity_time");
                assert_eq!(message, INACTIVITY_TOO_SMALL);
            }
            other => panic!("unexpected {other:?}"),
        }

        for (h, m, s) in [(0, 0, 1), (0, 1, 0), (2, 30, 0)] {
            let ok = ScreensaverSchedule {
                inactivity_time: NaiveTime::from_hms_opt(h, m, s).unwrap(),
                application_id: 1,
            };
            assert!(rules.check_screensaver_schedule(&ok).is_ok());
        }
    }
}
