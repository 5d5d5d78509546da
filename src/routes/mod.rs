use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;

use crate::config::Config;

mod booking;
mod health;
mod plan;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_command: dietdesk_booking::Command,
    pub booking_query: dietdesk_booking::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, read_db: SqlitePool, write_db: SqlitePool) -> anyhow::Result<Self> {
        let offset = config.utc_offset()?;
        let state = dietdesk_shared::State {
            read_db: read_db.clone(),
            write_db,
        };

        Ok(Self {
            config,
            booking_command: dietdesk_booking::Command::new(state, offset),
            booking_query: dietdesk_booking::Query(read_db.clone()),
            pool: read_db,
        })
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/plans/encode", post(plan::encode))
        .route("/api/plans/decode", post(plan::decode))
        .route("/api/plans/share", post(plan::share))
        .route("/api/book/{slug}", post(booking::request))
        .route("/api/book/{slug}/slots", get(booking::slots))
        .with_state(app_state)
}
