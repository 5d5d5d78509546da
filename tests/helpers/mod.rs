#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use dietdesk::{AppState, Config};
use dietdesk_booking::{BookingWindow, CreateOwnerInput};
use http_body_util::BodyExt;
use temp_dir::TempDir;
use tower::ServiceExt;

pub async fn setup_test_state(dir: &TempDir) -> anyhow::Result<AppState> {
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());
    let pool = dietdesk::create_pool(&url, 4).await?;
    dietdesk::migrate(&pool).await?;

    let config = Config::load(None)?;

    AppState::new(config, pool.clone(), pool)
}

pub async fn create_owner(state: &AppState, slug: &str) -> anyhow::Result<String> {
    Ok(state
        .booking_command
        .create_owner(CreateOwnerInput {
            full_name: "Dyt. Elif Kaya".to_owned(),
            public_slug: slug.to_owned(),
            window: BookingWindow::default(),
        })
        .await?)
}

pub async fn get(app: &Router, uri: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder().uri(uri).body(Body::empty())?;

    send(app, request).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    send(app, request).await
}

async fn send(
    app: &Router,
    request: Request<Body>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    Ok((status, json))
}
