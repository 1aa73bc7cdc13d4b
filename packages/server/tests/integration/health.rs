use sea_orm::DatabaseConnection;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn reports_ok_when_database_answers() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn reports_unavailable_without_a_database() {
    let app = TestApp::spawn_with_db(DatabaseConnection::default()).await;

    let res = app.get(routes::HEALTH).await;

    assert_eq!(res.status, 503);
    assert_eq!(res.body["code"], "DATABASE_UNAVAILABLE");
}
