use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use kosync::config::Config;
use tower::ServiceExt;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creation_yields_one_account() {
    let path = std::env::temp_dir().join(format!("kosync-concurrent-{}.db", uuid::Uuid::new_v4()));
    let mut config = Config::default();
    config.set_database(path.to_str().unwrap());

    let state = kosync::api::create_app_state_from_config(config, None)
        .await
        .unwrap();
    let store = state.store().clone();
    let app = kosync::api::router(state);

    let mut handles = Vec::new();
    for i in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/create")
                    .body(Body::from(format!(
                        r#"{{"username":"racer","password":"pw{i}"}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
        }));
    }

    let mut created = 0;
    let mut exists = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::PAYMENT_REQUIRED => exists += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(exists, 9);
    assert_eq!(store.count_users_named("racer").await.unwrap(), 1);

    store.close().await.unwrap();
    let _ = std::fs::remove_file(&path);
}
