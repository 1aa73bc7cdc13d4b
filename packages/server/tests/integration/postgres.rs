//! Same reads against PostgreSQL, the production backend.
//!
//! Run with `cargo test -- --ignored` on a machine with Docker.

use storefront::database::ensure_indexes;
use storefront::queries::uploads::{fetch_users_with_uploads, get_users_with_uploads};

use crate::common::{CapturedLogs, postgres_db, seed_upload, seed_user};

#[tokio::test]
#[ignore = "requires Docker"]
async fn users_are_ordered_newest_first() {
    let pg = postgres_db().await;
    seed_user(&pg.db, "t2", 20).await;
    seed_user(&pg.db, "t1", 10).await;
    seed_user(&pg.db, "t3", 30).await;

    let users = get_users_with_uploads(&pg.db).await;

    let ids: Vec<&str> = users.iter().map(|u| u.user.id.as_str()).collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn uploads_are_grouped_and_orphans_dropped() {
    let pg = postgres_db().await;
    seed_user(&pg.db, "u1", 100).await;
    seed_user(&pg.db, "u2", 200).await;
    seed_upload(&pg.db, "f1", Some("u2")).await;
    seed_upload(&pg.db, "f2", Some("u2")).await;
    seed_upload(&pg.db, "orphan", None).await;

    let users = fetch_users_with_uploads(&pg.db).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].user.id, "u2");
    let mut uploads: Vec<&str> = users[0].uploads.iter().map(|f| f.id.as_str()).collect();
    uploads.sort_unstable();
    assert_eq!(uploads, vec!["f1", "f2"]);
    assert_eq!(users[1].user.id, "u1");
    assert!(users[1].uploads.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn ensure_indexes_is_repeatable() {
    let pg = postgres_db().await;
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    ensure_indexes(&pg.db).await.unwrap();

    let output = logs.contents();
    assert!(
        !output.contains("Failed to create index"),
        "Index creation failed: {output}"
    );
    assert!(output.contains("Ensured index idx_upload_user_id exists"));
    assert!(output.contains("Ensured index idx_user_created_at exists"));
}
