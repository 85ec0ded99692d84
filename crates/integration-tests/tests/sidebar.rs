//! Sidebar fragment and page shell tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use wastetrack_core::Role;
use wastetrack_integration_tests::Browser;

#[tokio::test]
async fn test_page_shell_defers_sidebar() {
    let mut browser = Browser::new();
    browser.login(Role::Worker).await;

    let response = browser.get("/map").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Cargando menú..."));
    assert!(response.body.contains("hx-get=\"/sidebar?path=%2Fmap\""));
    assert!(!response.body.contains("class=\"sidebar-nav\""));
}

#[tokio::test]
async fn test_worker_sees_home_entry() {
    let mut browser = Browser::new();
    browser.login(Role::Worker).await;

    let response = browser.get("/sidebar?path=%2F").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("href=\"/metrics\""));
    assert!(response.body.contains("Inicio"));
    assert_eq!(response.body.matches("<li>").count(), 5);
    assert!(response.body.contains("nav-link nav-link-active\" href=\"/metrics\""));
    assert!(response.body.contains("<span class=\"avatar\">W</span>"));
}

#[tokio::test]
async fn test_capitalized_role_is_accepted() {
    let mut browser = Browser::new();
    browser.seed_session(json!({ "role": "\"Worker\"" })).await;

    let response = browser.get("/sidebar?path=%2Fmetrics").await;
    assert!(response.body.contains("href=\"/metrics\""));
}

#[tokio::test]
async fn test_citizen_has_no_home_entry() {
    let mut browser = Browser::new();
    browser.login(Role::Citizen).await;

    let response = browser.get("/sidebar?path=%2Fabout").await;
    assert!(!response.body.contains("href=\"/metrics\""));
    assert_eq!(response.body.matches("<li>").count(), 4);
    assert!(response.body.contains("nav-link nav-link-active\" href=\"/about\""));
}

#[tokio::test]
async fn test_missing_role_renders_public_entries() {
    let mut browser = Browser::new();

    let response = browser.get("/sidebar?path=%2Fmap").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("href=\"/metrics\""));
    for href in ["/map", "/containers", "/settings", "/about"] {
        assert!(response.body.contains(&format!("href=\"{href}\"")), "missing {href}");
    }
    assert!(response.body.contains("<span class=\"avatar\">?</span>"));
}

#[tokio::test]
async fn test_malformed_role_renders_public_entries() {
    let mut browser = Browser::new();
    browser.seed_session(json!({ "role": "worker" })).await;

    let response = browser.get("/sidebar?path=%2F").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("href=\"/metrics\""));
    assert_eq!(response.body.matches("<li>").count(), 4);
}

#[tokio::test]
async fn test_container_detail_highlights_containers() {
    let mut browser = Browser::new();
    browser.login(Role::Citizen).await;

    let shell = browser.get("/containers/77").await;
    assert_eq!(shell.status, StatusCode::OK);
    assert!(shell.body.contains("Contenedor #77"));

    let response = browser.get("/sidebar?path=%2Fcontainers%2F77").await;
    assert_eq!(response.body.matches("aria-current=\"page\"").count(), 1);
    assert!(response.body.contains("nav-link nav-link-active\" href=\"/containers\""));
}

#[tokio::test]
async fn test_map_is_exact_match() {
    let mut browser = Browser::new();
    browser.login(Role::Citizen).await;

    let response = browser.get("/sidebar?path=%2Fmap%2Fzone-3").await;
    assert!(!response.body.contains("aria-current=\"page\""));
}

#[tokio::test]
async fn test_relative_path_is_rejected() {
    let mut browser = Browser::new();

    let response = browser.get("/sidebar?path=map").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_container_is_not_found() {
    let mut browser = Browser::new();

    let response = browser.get("/containers/not-a-number").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sidebar_does_not_write_session() {
    let mut browser = Browser::new();
    browser.login(Role::Worker).await;

    browser.get("/sidebar?path=%2F").await;
    browser.get("/sidebar?path=%2Fsettings").await;

    assert_eq!(browser.session_value("role").await, Some(json!("\"worker\"")));
    assert_eq!(browser.session_value("isLoggedIn").await, Some(json!("true")));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let mut browser = Browser::new();

    let response = browser.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(response.header("x-request-id").is_some());
}
