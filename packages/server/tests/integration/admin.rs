use crate::common::{TestApp, failing_db, routes, seed_upload, seed_user};

mod summary {
    use super::*;

    #[tokio::test]
    async fn returns_users_newest_first_with_their_uploads() {
        let app = TestApp::spawn().await;
        seed_user(&app.db, "u1", 100).await;
        seed_user(&app.db, "u2", 200).await;
        seed_upload(&app.db, "f1", Some("u2")).await;
        seed_upload(&app.db, "f2", Some("u2")).await;

        let res = app.get(routes::ADMIN_SUMMARY).await;

        assert_eq!(res.status, 200, "Summary failed: {}", res.text);
        assert_eq!(res.body["total"], 2);

        let users = res.body["users"].as_array().unwrap();
        assert_eq!(users[0]["id"], "u2");
        assert_eq!(users[1]["id"], "u1");

        let mut upload_ids: Vec<&str> = users[0]["uploads"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_str().unwrap())
            .collect();
        upload_ids.sort_unstable();
        assert_eq!(upload_ids, vec!["f1", "f2"]);
    }

    #[tokio::test]
    async fn user_without_uploads_has_an_empty_array() {
        let app = TestApp::spawn().await;
        seed_user(&app.db, "lonely", 10).await;

        let res = app.get(routes::ADMIN_SUMMARY).await;

        assert_eq!(res.status, 200);
        let user = &res.body["users"][0];
        assert_eq!(user["id"], "lonely");
        assert!(user["uploads"].is_array());
        assert_eq!(user["uploads"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn upload_fields_are_exposed() {
        let app = TestApp::spawn().await;
        seed_user(&app.db, "u1", 1).await;
        seed_upload(&app.db, "f1", Some("u1")).await;

        let res = app.get(routes::ADMIN_SUMMARY).await;

        let upload = &res.body["users"][0]["uploads"][0];
        assert_eq!(upload["id"], "f1");
        assert_eq!(upload["user_id"], "u1");
        assert_eq!(upload["type"], "image");
        assert_eq!(upload["key"], "f1.png");
        assert_eq!(upload["url"], "https://cdn.example.com/f1.png");
    }

    #[tokio::test]
    async fn empty_store_returns_no_users() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ADMIN_SUMMARY).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 0);
        assert_eq!(res.body["users"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn database_failure_is_reported_not_hidden() {
        let app = TestApp::spawn_with_db(failing_db()).await;

        let res = app.get(routes::ADMIN_SUMMARY).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "DATABASE_UNAVAILABLE");
        assert!(
            !res.text.contains("connection reset"),
            "Internal detail leaked: {}",
            res.text
        );
    }
}

mod docs {
    use super::*;

    #[tokio::test]
    async fn openapi_document_lists_the_summary_route() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::OPENAPI).await;

        assert_eq!(res.status, 200);
        assert!(res.body["paths"]["/api/v1/admin/summary"]["get"].is_object());
        assert!(res.body["paths"]["/api/v1/health"]["get"].is_object());
    }
}
