mod common;

use common::{account, Wall};
use wallman_core::moderation::BAD_CREDENTIALS;
use wallman_error::catalog::{CatalogError, Denial};
use wallman_models::{
    domain::prelude::{AbuseReport, Actor, AddAdmin, AdminMessage, NewAccount},
    enums::catalog::AdminRole,
};

fn field_of(err: CatalogError) -> String {
    match err {
        CatalogError::Validation { field, .. } => field,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn registration_rejects_each_bad_field() {
    let wall = Wall::new().await;

    let foreign = NewAccount {
        email: "someone@gmail.com".into(),
        ..account("someone")
    };
    let short = NewAccount {
        password1: "abc".into(),
        password2: "abc".into(),
        ..account("someone")
    };
    let mismatch = NewAccount {
        password2: "secreT".into(),
        ..account("someone")
    };
    let bad_name = account("some one");

    assert_eq!(field_of(wall.desk.register_account(foreign).await.unwrap_err()), "email");
    assert_eq!(field_of(wall.desk.register_account(short).await.unwrap_err()), "password1");
    assert_eq!(field_of(wall.desk.register_account(mismatch).await.unwrap_err()), "__all__");
    assert_eq!(field_of(wall.desk.register_account(bad_name).await.unwrap_err()), "username");

    let duplicate = wall.desk.register_account(account("owner")).await;
    assert!(matches!(duplicate, Err(CatalogError::DuplicateName(_))));
}

#[tokio::test]
async fn registration_reports_the_first_of_many_problems() {
    let wall = Wall::new().await;
    let everything_wrong = NewAccount {
        username: "owner".into(),
        email: "owner@gmail.com".into(),
        password1: "abc".into(),
        password2: "abd".into(),
    };

    let violations = wall.desk.rules().account_violations(&everything_wrong);
    assert_eq!(violations.fields(), ["email", "password1", "__all__"]);
    assert_eq!(
        field_of(wall.desk.register_account(everything_wrong).await.unwrap_err()),
        "email"
    );
}

#[tokio::test]
async fn subdomains_of_the_organization_are_accepted() {
    let wall = Wall::new().await;
    let student = NewAccount {
        email: "student@student.dei.uc.pt".into(),
        ..account("student")
    };
    let created = wall.desk.register_account(student).await.unwrap();
    assert!(!created.is_staff);
    assert!(!created.is_superuser);
}

#[tokio::test]
async fn authentication_checks_the_password_hash() {
    let wall = Wall::new().await;

    let actor = wall.desk.authenticate("owner", "secret").await.unwrap();
    assert_eq!(actor.id(), wall.owner.id());

    for (username, password) in [("owner", "wrong"), ("nobody", "secret")] {
        let err = wall.desk.authenticate(username, password).await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Validation { ref field, ref message } if field == "__all__" && message == BAD_CREDENTIALS)
        );
    }
}

#[tokio::test]
async fn abuse_reports_reach_every_staff_member() {
    let wall = Wall::new().await;
    let games = wall.category("Games").await;
    let chess = wall.application("Chess", games).await;

    let delivered = wall
        .desk
        .report_abuse(
            &wall.stranger,
            chess.id,
            AbuseReport {
                abuse_description: "Offensive icon".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(delivered, 1);
    let sent = wall.notifier.sent();
    assert_eq!(sent[0].recipient, "admin@uc.pt");
    assert!(sent[0].subject.contains("Chess"));
    assert!(sent[0].body.contains("Offensive icon"));
    assert!(sent[0].body.contains("http://wall.test/applications/"));

    let blank = wall
        .desk
        .report_abuse(
            &wall.stranger,
            chess.id,
            AbuseReport {
                abuse_description: "   ".into(),
            },
        )
        .await;
    assert_eq!(field_of(blank.unwrap_err()), "abuse_description");

    let anonymous = wall
        .desk
        .report_abuse(
            &Actor::Anonymous,
            chess.id,
            AbuseReport {
                abuse_description: "spam".into(),
            },
        )
        .await;
    assert!(matches!(
        anonymous,
        Err(CatalogError::PermissionDenied(Denial::LoginRequired))
    ));
    assert_eq!(wall.notifier.len(), 1);
}

#[tokio::test]
async fn messages_to_admins_need_text() {
    let wall = Wall::new().await;

    let err = wall
        .desk
        .message_admins(&wall.owner, AdminMessage { message: "".into() })
        .await
        .unwrap_err();
    assert_eq!(field_of(err), "message");

    let delivered = wall
        .desk
        .message_admins(
            &wall.owner,
            AdminMessage {
                message: "The wall is frozen".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(delivered, 1);
    assert!(wall.notifier.sent()[0].body.contains("owner <owner@uc.pt>"));
}

#[tokio::test]
async fn staff_promote_accounts_by_email() {
    let wall = Wall::new().await;

    let err = wall
        .desk
        .add_admin(
            &wall.owner,
            AddAdmin {
                email: "stranger@uc.pt".into(),
                role: AdminRole::Normal,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::PermissionDenied(Denial::Forbidden)));

    let unknown = wall
        .desk
        .add_admin(
            &wall.staff,
            AddAdmin {
                email: "ghost@uc.pt".into(),
                role: AdminRole::Normal,
            },
        )
        .await;
    assert_eq!(field_of(unknown.unwrap_err()), "email");

    let normal = wall
        .desk
        .add_admin(
            &wall.staff,
            AddAdmin {
                email: "stranger@uc.pt".into(),
                role: AdminRole::Normal,
            },
        )
        .await
        .unwrap();
    assert!(normal.is_staff);
    assert!(!normal.is_superuser);

    let power = wall
        .desk
        .add_admin(
            &wall.staff,
            AddAdmin {
                email: "owner@uc.pt".into(),
                role: AdminRole::Power,
            },
        )
        .await
        .unwrap();
    assert!(power.is_staff);
    assert!(power.is_superuser);

    let promoted = wall.desk.actor_for(normal.id).await.unwrap();
    assert!(promoted.is_staff());
}
