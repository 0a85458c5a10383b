//! Integration tests for the HTTP surface.
//!
//! The pool points at a closed local port, so every database-backed route
//! exercises its failure path while `/`, `/health` and routing stay fully
//! observable.

use std::time::Duration;

use actix_web::{test, web, App};
use douban_charts::api::routes::configure_routes;
use douban_charts::charts::ChartKind;
use douban_charts::util::db::{Db, DbConfig};
use serde_json::Value;

/// Test helper: lazy pool that can never connect
fn unreachable_db() -> Db {
    let config = DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        database: Some("movies".into()),
        max_connections: 1,
        acquire_timeout: Duration::from_millis(500),
        ..DbConfig::default()
    };
    Db::connect_lazy(&config)
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(unreachable_db()))
                .configure(configure_routes),
        )
        .await
    };
}

fn content_type<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn health_is_up_without_database() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn dashboard_is_html() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), 200);
    assert!(content_type(&resp).starts_with("text/html"));
    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("Douban Top 100 Movies Analysis"));
    for kind in ChartKind::ALL {
        assert!(html.contains(&kind.route()));
    }
}

#[actix_web::test]
async fn movies_failure_is_json_error() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/movies").to_request()).await;
    assert_eq!(resp.status(), 500);
    assert!(content_type(&resp).starts_with("application/json"));
    let body: Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap_or_default();
    assert!(!message.is_empty());
}

#[actix_web::test]
async fn plot_failures_are_plain_text() {
    let app = app!();
    for kind in ChartKind::ALL {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&kind.route()).to_request()).await;
        assert_eq!(resp.status(), 500, "{}", kind.route());
        assert!(content_type(&resp).starts_with("text/plain"));
        let body = test::read_body(resp).await;
        assert!(
            body.starts_with(b"Error generating plot: "),
            "{}: {}",
            kind.route(),
            String::from_utf8_lossy(&body)
        );
    }
}

#[actix_web::test]
async fn cache_busting_query_is_ignored() {
    let app = app!();
    let uri = format!("{}?t=1700000000", ChartKind::AvgRatingByGenre.route());
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    // routed to the chart handler, which fails on the database
    assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn unknown_routes_are_not_found() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/plots/nope.png").to_request()).await;
    assert_eq!(resp.status(), 404);
}
