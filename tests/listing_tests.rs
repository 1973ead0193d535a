// tests/listing_tests.rs

mod common;

use common::spawn_api;
use recruit_admin::{AppError, RecruitingApi, TestListing};

#[tokio::test]
async fn pages_through_backend_list() {
    // Arrange
    let app = spawn_api().await;
    app.fake.seed_tests(23);
    let mut listing = TestListing::new(app.admin_api());

    // Act
    let loaded = listing.load().await.unwrap().len();

    // Assert
    assert_eq!(loaded, 23);
    assert_eq!(listing.total_pages(), 3);
    assert_eq!(listing.page(1).len(), 10);
    assert_eq!(listing.page(3).len(), 3);
    assert!(listing.page(4).is_empty());
    assert!(listing.has_next(2));
    assert!(!listing.has_next(3));

    let first = &listing.page(1)[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.tech_field, "Rust");
    assert!(first.created_at.is_some());
}

#[tokio::test]
async fn delete_goes_to_backend_then_cache() {
    let app = spawn_api().await;
    app.fake.seed_tests(3);
    let mut listing = TestListing::new(app.admin_api());
    listing.load().await.unwrap();

    listing.delete(2).await.unwrap();

    assert_eq!(app.fake.test_count(), 2);
    assert_eq!(listing.total(), 2);
    assert_eq!(listing.message(), Some("Test deleted successfully!"));
    assert_eq!(
        app.fake.routes(),
        vec!["GET /admin/tests", "DELETE /admin/tests/2"]
    );
}

#[tokio::test]
async fn deleting_unknown_id_is_not_found() {
    let app = spawn_api().await;
    app.fake.seed_tests(1);
    let mut listing = TestListing::new(app.admin_api());
    listing.load().await.unwrap();

    let err = listing.delete(99).await.unwrap_err();

    match err {
        AppError::NotFound(message) => assert_eq!(message, "Test not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(listing.total(), 1);
    assert_eq!(listing.message(), Some("Failed to delete test."));
}

#[tokio::test]
async fn failed_load_empties_listing() {
    let app = spawn_api().await;
    app.fake.seed_tests(4);
    let mut listing = TestListing::new(app.admin_api());
    listing.load().await.unwrap();

    app.fake.fail_after("/admin/tests", 0);
    let err = listing.load().await.unwrap_err();

    assert!(matches!(err, AppError::Api { status: 500, ref message } if message == "Injected failure"));
    assert_eq!(listing.total(), 0);
    assert_eq!(listing.total_pages(), 0);
}

#[tokio::test]
async fn created_tests_show_up_in_list() {
    let app = spawn_api().await;
    let api = app.admin_api();

    let created = api
        .create_test(&recruit_admin::models::test::TestMeta {
            title: "Systems design".to_string(),
            tech_field: "Backend".to_string(),
            description: "Queues and caches".to_string(),
        })
        .await
        .unwrap();
    let tests = api.list_tests().await.unwrap();

    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].id, created.id);
    assert_eq!(tests[0].description.as_deref(), Some("Queues and caches"));
}

#[tokio::test]
async fn untitled_rows_do_not_break_loading() {
    let app = spawn_api().await;
    app.fake.seed_tests(2);
    app.fake.seed_untitled_test();
    let mut listing = TestListing::new(app.admin_api());

    let loaded = listing.load().await.unwrap().len();

    assert_eq!(loaded, 3);
    let last = &listing.page(1)[2];
    assert_eq!(last.title, None);
    assert_eq!(last.description.as_deref(), Some("legacy"));
}
