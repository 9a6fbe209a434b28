use crate::state::test_helpers::{spawn_app, test_app_state};

#[tokio::test]
async fn healthz_returns_ok() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn root_serves_dashboard_page() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/html"));

    let body = res.text().await.unwrap();
    assert!(body.contains("Food Waste Dashboard"));
    assert!(body.contains(r#"href="/static/style.css""#));
    assert_eq!(body.matches(r#"data-role="waste-bar""#).count(), 7);
    assert_eq!(body.matches(r#"data-role="photo""#).count(), 4);
}

#[tokio::test]
async fn dashboard_path_matches_root() {
    let addr = spawn_app(test_app_state().await).await;
    let root = reqwest::get(format!("http://{addr}/")).await.unwrap().text().await.unwrap();
    let page = reqwest::get(format!("http://{addr}/dashboard")).await.unwrap().text().await.unwrap();
    assert_eq!(root, page);
}

#[tokio::test]
async fn dashboard_view_tree_is_served_as_json() {
    let addr = spawn_app(test_app_state().await).await;
    let tree: dashboard::Node = reqwest::get(format!("http://{addr}/api/dashboard"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tree, dashboard::dashboard());
    assert_eq!(tree.count_role(dashboard::Role::MetricTile), 3);
}

#[tokio::test]
async fn stylesheet_is_served_from_static_dir() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::get(format!("http://{addr}/static/style.css")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("#webcrumbs"));
}

#[tokio::test]
async fn missing_static_file_is_not_found() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::get(format!("http://{addr}/static/missing.css")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let addr = spawn_app(test_app_state().await).await;
    let res = reqwest::Client::new()
        .get(format!("http://{addr}/food-waste/reasons"))
        .header("Origin", "http://kiosk.local")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}
