use actix_web::{
    http::{header::LOCATION, StatusCode},
    test::{self, TestRequest},
    web::Data,
    App,
};
use chrono::Utc;
use sea_orm::Set;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wallman_common::{hash::bcrypt_hash, jwt::encode_jwt, FsAssetStore, MemoryNotifier};
use wallman_core::{CatalogStore, ModerationDesk, ModerationRules, SchedulingConfig};
use wallman_models::{
    domain::prelude::{Claims, NewAccount}, entities::prelude::AccountActiveModel, settings::Settings,
};
use wallman_repository::{AccountRepository, CategoryRepository};
use wallman_storage::WMDbManager;
use wallman_web::{configure_routes, AppState};

struct Harness {
    state: AppState,
    manager: Arc<WMDbManager>,
    _assets: TempDir,
}

async fn harness() -> Harness {
    let manager = WMDbManager::memory().await.unwrap();
    let db = manager.get_connection().unwrap();
    let assets = tempfile::tempdir().unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let rules = ModerationRules::default();

    let desk = ModerationDesk::new(db.clone(), notifier.clone(), rules.clone());
    desk.register_account(NewAccount {
        username: "owner".into(),
        email: "owner@uc.pt".into(),
        password1: "secret".into(),
        password2: "secret".into(),
    })
    .await
    .unwrap();
    AccountRepository::create(
        AccountActiveModel {
            username: Set("admin".into()),
            email: Set("admin@uc.pt".into()),
            password: Set(bcrypt_hash("secret").unwrap()),
            is_staff: Set(true),
            is_superuser: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        },
        &db,
    )
    .await
    .unwrap();

    let state = AppState {
        catalog: Arc::new(CatalogStore::new(
            db.clone(),
            notifier,
            Arc::new(FsAssetStore::new(assets.path())),
            rules.clone(),
        )),
        desk: Arc::new(desk),
        scheduling: Arc::new(SchedulingConfig::new(db, rules)),
        settings: Settings::default(),
    };
    Harness {
        state,
        manager,
        _assets: assets,
    }
}

/// Bearer token for an existing account, signed the way the login route does
async fn token(state: &AppState, username: &str) -> String {
    let actor = state.desk.authenticate(username, "secret").await.unwrap();
    let principal = actor.principal().unwrap();
    let jwt = &state.settings.web.jwt;
    let claims = Claims::new(
        jwt.issuer.clone(),
        principal.id,
        principal.username.clone(),
        jwt.expire,
    );
    encode_jwt(&claims, jwt.secret.as_bytes(), None).unwrap()
}

#[actix_web::test]
async fn health_is_public() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn anonymous_submission_redirects_to_login() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let req = TestRequest::post()
        .uri("/applications/add/")
        .set_json(json!({ "name": "Chess", "categoryId": 1, "tos": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/accounts/login/?next=/applications/add/"
    );
}

#[actix_web::test]
async fn regular_accounts_cannot_add_categories() {
    let h = harness().await;
    let db = h.manager.get_connection().unwrap();
    let before = CategoryRepository::count(&db).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let token = token(&h.state, "owner").await;
    let req = TestRequest::post()
        .uri("/categories/add/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Games" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(CategoryRepository::count(&db).await.unwrap(), before);
}

#[actix_web::test]
async fn staff_add_categories_with_a_token() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let token = token(&h.state, "admin").await;
    let req = TestRequest::post()
        .uri("/categories/add/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Games" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["name"], "Games");

    let again = TestRequest::post()
        .uri("/categories/add/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Games" }))
        .to_request();
    let resp = test::call_service(&app, again).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn a_bad_token_counts_as_anonymous() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let req = TestRequest::post()
        .uri("/categories/add/")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .set_json(json!({ "name": "Games" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/accounts/login/?next=/categories/add/"
    );
}

#[actix_web::test]
async fn wrong_password_is_a_validation_error() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let req = TestRequest::post()
        .uri("/accounts/login/")
        .set_json(json!({ "username": "owner", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "__all__");
}

#[actix_web::test]
async fn login_issues_a_usable_token() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let req = TestRequest::post()
        .uri("/accounts/login/")
        .set_json(json!({ "username": "owner", "password": "secret" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "owner");
    assert_eq!(body["data"]["is_staff"], false);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let req = TestRequest::post()
        .uri("/applications/add/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Chess", "categoryId": 1, "tos": true }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Chess");
    assert_eq!(body["data"]["categoryName"], "Unknown");
}

#[actix_web::test]
async fn anonymous_forms_redirect_before_the_body_is_read() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let bodyless = TestRequest::post().uri("/applications/add/").to_request();
    let incomplete = TestRequest::post()
        .uri("/applications/add/")
        .set_json(json!({ "name": "Chess" }))
        .to_request();
    for req in [bodyless, incomplete] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(LOCATION).unwrap(),
            "/accounts/login/?next=/applications/add/"
        );
    }

    let req = TestRequest::post()
        .uri("/applications/999/edit/")
        .set_json(json!({ "name": "Chess", "categoryId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(LOCATION).unwrap(),
        "/accounts/login/?next=/applications/999/edit/"
    );
}

#[actix_web::test]
async fn logged_in_forms_still_reject_bad_bodies() {
    let h = harness().await;
    let app = test::init_service(
        App::new()
            .app_data(Data::new(h.state.clone()))
            .configure(configure_routes),
    )
    .await;

    let token = token(&h.state, "owner").await;
    let req = TestRequest::post()
        .uri("/applications/add/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Chess" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
