//! Who may do what.
//!
//! Three tiers: anonymous visitors, authenticated account holders and
//! staff. Anonymous callers are told to log in; authenticated callers
//! without the needed tier are refused outright.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wallman_error::{catalog::CatalogError, CatalogResult};
use wallman_models::domain::prelude::Actor;

/// Characters kept verbatim in the `next` query parameter
const NEXT_PARAM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Browse categories and applications
    View,
    /// Like or dislike an application
    Vote,
    CreateApplication,
    /// Edit, self-delete, upload assets or read logs of one application
    ModifyApplication { owner_id: i32 },
    /// Moderated removal
    RemoveApplication,
    ManageCategories,
    ReportAbuse,
    MessageAdmins,
    ManageAdmins,
    ManageControls,
}

impl Action {
    #[inline]
    fn staff_only(&self) -> bool {
        matches!(
            self,
            Action::RemoveApplication
                | Action::ManageCategories
                | Action::ManageAdmins
                | Action::ManageControls
        )
    }
}

pub struct AccessPolicy;

impl AccessPolicy {
    pub fn check(actor: &Actor, action: Action) -> CatalogResult<()> {
        if matches!(action, Action::View | Action::Vote) {
            return Ok(());
        }
        let principal = actor.principal().ok_or_else(CatalogError::login_required)?;
        if principal.is_staff {
            return Ok(());
        }
        match action {
            Action::ModifyApplication { owner_id } if principal.id != owner_id => {
                Err(CatalogError::forbidden())
            }
            a if a.staff_only() => Err(CatalogError::forbidden()),
            _ => Ok(()),
        }
    }

    /// Fails with `LoginRequired` unless someone is logged in
    #[inline]
    pub fn require_login(actor: &Actor) -> CatalogResult<()> {
        if actor.is_authenticated() {
            Ok(())
        } else {
            Err(CatalogError::login_required())
        }
    }

    /// `<login_url>?next=<path>`
    pub fn login_redirect(login_url: &str, next: &str) -> String {
        format!(
            "{}?next={}",
            login_url,
            utf8_percent_encode(next, NEXT_PARAM)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallman_error::catalog::Denial;
    use wallman_models::domain::prelude::Principal;

    fn account(id: i32, is_staff: bool) -> Actor {
        Actor::Account(Principal {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@uc.pt"),
            is_staff,
            is_superuser: false,
        })
    }

    fn denial(result: CatalogResult<()>) -> Option<Denial> {
        match result {
            Err(CatalogError::PermissionDenied(d)) => Some(d),
            _ => None,
        }
    }

    #[test]
    fn anonymous_may_only_view_and_vote() {
        let anon = Actor::Anonymous;
        assert!(AccessPolicy::check(&anon, Action::View).is_ok());
        assert!(AccessPolicy::check(&anon, Action::Vote).is_ok());
        for action in [
            Action::CreateApplication,
            Action::ReportAbuse,
            Action::ManageCategories,
            Action::ModifyApplication { owner_id: 1 },
        ] {
            assert_eq!(
                denial(AccessPolicy::check(&anon, action)),
                Some(Denial::LoginRequired)
            );
        }
    }

    #[test]
    fn owners_modify_only_their_own_applications() {
        let owner = account(1, false);
        assert!(AccessPolicy::check(&owner, Action::ModifyApplication { owner_id: 1 }).is_ok());
        assert_eq!(
            denial(AccessPolicy::check(&owner, Action::ModifyApplication { owner_id: 2 })),
            Some(Denial::Forbidden)
        );
        assert_eq!(
            denial(AccessPolicy::check(&owner, Action::ManageCategories)),
            Some(Denial::Forbidden)
        );
        assert_eq!(
            denial(AccessPolicy::check(&owner, Action::RemoveApplication)),
            Some(Denial::Forbidden)
        );
    }

    #[test]
    fn staff_may_do_everything() {
        let staff = account(9, true);
        for action in [
            Action::ManageCategories,
            Action::ManageAdmins,
            Action::ManageControls,
            Action::RemoveApplication,
            Action::ModifyApplication { owner_id: 1 },
        ] {
            assert!(AccessPolicy::check(&staff, action).is_ok());
        }
    }

    #[test]
    fn redirect_keeps_the_original_path() {
        assert_eq!(
            AccessPolicy::login_redirect("/accounts/login/", "/applications/add/"),
            "/accounts/login/?next=/applications/add/"
        );
        assert_eq!(
            AccessPolicy::login_redirect("/accounts/login/", "/applications/?name=a b"),
            "/accounts/login/?next=/applications/%3Fname%3Da%20b"
        );
    }
}
