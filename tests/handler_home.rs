mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::SqlitePool;
use url_minter::routes::app_router;

fn app_server(pool: SqlitePool) -> TestServer {
    TestServer::new(app_router(common::create_test_state(pool))).unwrap()
}

async fn stored_urls(pool: &SqlitePool) -> Vec<(String, String)> {
    sqlx::query_as("SELECT original_url, shortened_url FROM urls ORDER BY rowid")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_home_lists_mappings() {
    let pool = common::memory_pool().await;
    common::create_test_mapping(&pool, "https://example.com/", "abc123XYZ", 1234).await;
    common::create_test_mapping(&pool, "https://rust-lang.org/", "def456UVW", 0).await;

    let server = app_server(pool);

    let response = server
        .get("/")
        .add_header("Host", "short.test")
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("abc123XYZ"));
    assert!(body.contains("def456UVW"));
    assert!(body.contains("1,234"));
    assert!(body.contains("short.test"));
}

#[tokio::test]
async fn test_home_empty() {
    let pool = common::memory_pool().await;
    let server = app_server(pool);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("No links yet."));
}

#[tokio::test]
async fn test_home_shows_error_message() {
    let pool = common::memory_pool().await;
    let server = app_server(pool);

    let response = server.get("/?error=URL+cannot+be+empty").await;

    response.assert_status_ok();
    assert!(response.text().contains("URL cannot be empty"));
}

#[tokio::test]
async fn test_shorten_form_success() {
    let pool = common::memory_pool().await;
    let server = app_server(pool.clone());

    let response = server
        .post("/")
        .form(&[("url", "https://example.com/page")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    let rows = stored_urls(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "https://example.com/page");
    assert_eq!(rows[0].1.len(), 9);
    assert_eq!(common::clicks_for(&pool, &rows[0].1).await, 0);
}

#[tokio::test]
async fn test_shorten_form_same_url_twice_gives_two_codes() {
    let pool = common::memory_pool().await;
    let server = app_server(pool.clone());

    for _ in 0..2 {
        server
            .post("/")
            .form(&[("url", "https://example.com/")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    let rows = stored_urls(&pool).await;
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].1, rows[1].1);
}

#[tokio::test]
async fn test_shorten_form_empty_url() {
    let pool = common::memory_pool().await;
    let server = app_server(pool.clone());

    let response = server.post("/").form(&[("url", "   ")]).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?error=URL+cannot+be+empty");
    assert!(stored_urls(&pool).await.is_empty());
}

#[tokio::test]
async fn test_shorten_form_invalid_url() {
    let pool = common::memory_pool().await;
    let server = app_server(pool.clone());

    for input in ["not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let response = server.post("/").form(&[("url", input)]).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            "/?error=Sorry%21+I+can+only+shorten+valid+URLs."
        );
    }

    assert!(stored_urls(&pool).await.is_empty());
}

#[tokio::test]
async fn test_shorten_then_follow() {
    let pool = common::memory_pool().await;
    let server = app_server(pool.clone());

    server
        .post("/")
        .form(&[("url", "https://example.com/target")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let code = stored_urls(&pool).await.remove(0).1;

    let response = server.get(&format!("/o/{code}")).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(common::clicks_for(&pool, &code).await, 1);

    let page = server.get("/").await.text();
    assert!(page.contains(&code));
}

#[tokio::test]
async fn test_shorten_form_unreachable_url() {
    let pool = common::memory_pool().await;
    let server =
        TestServer::new(app_router(common::create_checking_state(pool.clone()))).unwrap();
    let addr = common::unbound_addr().await;

    let response = server
        .post("/")
        .form(&[("url", format!("http://{addr}/"))])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location"),
        "/?error=Sorry%21+The+URL+was+not+reachable."
    );
    assert!(stored_urls(&pool).await.is_empty());
}

#[tokio::test]
async fn test_shorten_form_reachable_url_with_check() {
    let pool = common::memory_pool().await;
    let server =
        TestServer::new(app_router(common::create_checking_state(pool.clone()))).unwrap();
    let addr = common::spawn_target().await;

    let response = server
        .post("/")
        .form(&[("url", format!("http://{addr}/ok"))])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    let rows = stored_urls(&pool).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, format!("http://{addr}/ok"));
}
