mod common;

use chrono::NaiveTime;
use common::Wall;
use wallman_error::catalog::{CatalogError, Denial};
use wallman_models::{
    constants::SCREENSAVER_CATEGORY,
    domain::prelude::{ProjectorSchedule, ScreensaverSchedule},
};
use wallman_repository::{
    CategoryRepository, ProjectorControlRepository, ScreensaverControlRepository,
};

fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

fn schedule(inactivity_time: i32) -> ProjectorSchedule {
    ProjectorSchedule {
        inactivity_time,
        startup_week_time: at(8, 0, 0),
        shutdown_week_time: at(20, 0, 0),
        startup_weekend_time: at(10, 0, 0),
        shutdown_weekend_time: at(18, 0, 0),
    }
}

async fn screensaver_category(wall: &Wall) -> i32 {
    CategoryRepository::find_by_name(SCREENSAVER_CATEGORY, &wall.db)
        .await
        .unwrap()
        .unwrap()
        .id
}

#[tokio::test]
async fn projector_control_is_created_once() {
    let wall = Wall::new().await;

    let first = wall
        .scheduling
        .create_projector_control(&wall.staff, schedule(5))
        .await
        .unwrap();
    let second = wall
        .scheduling
        .create_projector_control(&wall.staff, schedule(30))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(ProjectorControlRepository::count(&wall.db).await.unwrap(), 1);
    let row = wall.scheduling.get_projector_control().await.unwrap().unwrap();
    assert_eq!(row.inactivity_time, 5);
}

#[tokio::test]
async fn projector_update_overwrites_the_single_row() {
    let wall = Wall::new().await;
    wall.scheduling
        .create_projector_control(&wall.staff, schedule(5))
        .await
        .unwrap();

    let updated = wall
        .scheduling
        .update_projector_control(&wall.staff, schedule(30))
        .await
        .unwrap();

    assert_eq!(updated.inactivity_time, 30);
    assert_eq!(ProjectorControlRepository::count(&wall.db).await.unwrap(), 1);
}

#[tokio::test]
async fn projector_times_must_be_ordered() {
    let wall = Wall::new().await;

    let week = ProjectorSchedule {
        startup_week_time: at(21, 0, 0),
        ..schedule(5)
    };
    let weekend = ProjectorSchedule {
        shutdown_weekend_time: at(10, 0, 0),
        ..schedule(5)
    };
    for bad in [week, weekend] {
        let err = wall
            .scheduling
            .create_projector_control(&wall.staff, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "__all__"));
    }
    assert_eq!(ProjectorControlRepository::count(&wall.db).await.unwrap(), 0);
}

#[tokio::test]
async fn controls_are_staff_only() {
    let wall = Wall::new().await;

    let err = wall
        .scheduling
        .create_projector_control(&wall.owner, schedule(5))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::PermissionDenied(Denial::Forbidden)));
    assert!(wall.scheduling.get_projector_control().await.unwrap().is_none());
}

#[tokio::test]
async fn screensaver_rejects_zero_inactivity() {
    let wall = Wall::new().await;
    let category = screensaver_category(&wall).await;
    let saver = wall.application("Aquarium", category).await;

    let zero = wall
        .scheduling
        .save_screensaver_control(
            &wall.staff,
            ScreensaverSchedule {
                inactivity_time: at(0, 0, 0),
                application_id: saver.id,
            },
        )
        .await
        .unwrap_err();
    assert!(
        matches!(zero, CatalogError::Validation { ref field, ref message } if field == "inactivity_time" && message == "inactivity_time too small")
    );

    for time in [at(0, 0, 1), at(0, 5, 0), at(2, 0, 0)] {
        let saved = wall
            .scheduling
            .save_screensaver_control(
                &wall.staff,
                ScreensaverSchedule {
                    inactivity_time: time,
                    application_id: saver.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.inactivity_time, time);
    }
    assert_eq!(ScreensaverControlRepository::count(&wall.db).await.unwrap(), 1);
}

#[tokio::test]
async fn screensaver_must_come_from_the_screensaver_category() {
    let wall = Wall::new().await;
    let games = wall.category("Games").await;
    let chess = wall.application("Chess", games).await;

    let err = wall
        .scheduling
        .save_screensaver_control(
            &wall.staff,
            ScreensaverSchedule {
                inactivity_time: at(0, 5, 0),
                application_id: chess.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "application_id"));
    assert!(wall.scheduling.get_screensaver_control().await.unwrap().is_none());
}

#[tokio::test]
async fn removing_the_chosen_screensaver_clears_the_selection() {
    let wall = Wall::new().await;
    let category = screensaver_category(&wall).await;
    let saver = wall.application("Aquarium", category).await;
    wall.scheduling
        .save_screensaver_control(
            &wall.staff,
            ScreensaverSchedule {
                inactivity_time: at(0, 5, 0),
                application_id: saver.id,
            },
        )
        .await
        .unwrap();

    let choices = wall.catalog.list_screensaver_choices().await.unwrap();
    assert_eq!(choices.len(), 1);

    wall.catalog
        .remove_application(&wall.staff, saver.id)
        .await
        .unwrap();
    assert!(wall.scheduling.get_screensaver_control().await.unwrap().is_none());
}
