mod helpers;

use std::time::Duration;

use banner_keeper::{BannerKey, BannerPatch, ContentCache, ErrorKind, NewBanner, Role, Visibility};
use helpers::database::{setup_services, teardown_test_db};

const KEY: BannerKey = BannerKey::new(1, 1);

#[tokio::test]
async fn test_cached_content_survives_writes_until_expiry() {
    let services = setup_services(Duration::from_secs(300)).await;
    let created = services
        .admin
        .create_banner(NewBanner::new(1, [1], "original"))
        .await
        .unwrap();

    let first = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, false)
        .await
        .unwrap();
    assert_eq!(first, "original");

    services
        .admin
        .update_banner(created.id, BannerPatch::new().content("edited"))
        .await
        .unwrap();

    // Cached read keeps serving the old content; a latest-revision read does not.
    let cached = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, false)
        .await
        .unwrap();
    assert_eq!(cached, "original");
    let fresh = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, true)
        .await
        .unwrap();
    assert_eq!(fresh, "edited");

    services.admin.delete_banner(created.id).await.unwrap();
    let after_delete = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, false)
        .await
        .unwrap();
    assert_eq!(after_delete, "original");

    let admin_view = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::for_role(Role::Admin), false)
        .await
        .unwrap_err();
    assert_eq!(admin_view.kind(), ErrorKind::NotFound);

    teardown_test_db(services.pool).await;
}

#[tokio::test]
async fn test_expired_entry_is_reloaded_from_store() {
    let services = setup_services(Duration::from_millis(100)).await;
    let created = services
        .admin
        .create_banner(NewBanner::new(1, [1], "before"))
        .await
        .unwrap();

    services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, false)
        .await
        .unwrap();
    services
        .admin
        .update_banner(created.id, BannerPatch::new().content("after"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;

    let content = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, false)
        .await
        .unwrap();
    assert_eq!(content, "after");

    teardown_test_db(services.pool).await;
}

#[tokio::test]
async fn test_inactive_banner_never_enters_cache() {
    let services = setup_services(Duration::from_secs(300)).await;
    services
        .admin
        .create_banner(NewBanner::new(1, [1], "draft").with_active(false))
        .await
        .unwrap();

    let user = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::for_role(Role::User), false)
        .await
        .unwrap_err();
    assert!(user.is_not_found());

    let admin = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::for_role(Role::Admin), false)
        .await
        .unwrap();
    assert_eq!(admin, "draft");
    assert_eq!(services.cache.get(KEY).await.unwrap(), None);

    teardown_test_db(services.pool).await;
}

#[tokio::test]
async fn test_latest_revision_read_leaves_cache_alone() {
    let services = setup_services(Duration::from_secs(300)).await;
    services
        .admin
        .create_banner(NewBanner::new(1, [1], "stored"))
        .await
        .unwrap();

    let content = services
        .retrieval
        .fetch_banner_content(KEY, Visibility::ActiveOnly, true)
        .await
        .unwrap();
    assert_eq!(content, "stored");
    assert_eq!(services.cache.get(KEY).await.unwrap(), None);

    teardown_test_db(services.pool).await;
}
