pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod ports;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use services::announcements::AnnouncementService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub announcements: Arc<AnnouncementService>,
    pub config: Arc<Config>,
}
