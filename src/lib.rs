//! YardTrack API Library
//!
//! Inventory bookkeeping core: record store, lifecycle operations, status and
//! maintenance-alert computation, and the JSON API that exposes them.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod alerts;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod openapi;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub item_service: services::items::ItemService,
    pub summary_service: services::summary::SummaryService,
}

/// Routes mounted under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            "/items/:id",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route("/items/:id/checkout", post(handlers::items::check_out_item))
        .route("/items/:id/checkin", post(handlers::items::check_in_item))
        .route(
            "/items/:id/maintenance",
            post(handlers::items::schedule_maintenance),
        )
        .route(
            "/items/:id/maintenance/complete",
            post(handlers::items::complete_maintenance),
        )
        .route("/items/:id/retire", post(handlers::items::retire_item))
        .route("/summary", get(handlers::summary::get_summary))
        .route("/map/items", get(handlers::summary::get_map_items))
        .route("/categories", get(handlers::summary::list_categories))
        .route("/locations", get(handlers::summary::list_locations))
}
