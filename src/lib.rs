//! Zimmet Equipment Custody Tracking System
//!
//! A Rust implementation of the zimmet custody tracker: personnel and
//! equipment records, a session-gated HTTP surface and downloadable custody
//! acknowledgment forms.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    key: Key,
}

impl AppState {
    /// Assemble the shared state; the cookie signing key is derived from the
    /// configured session secret.
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        let digest = Sha512::digest(config.auth.session_secret.as_bytes());
        Self {
            key: Key::from(digest.as_slice()),
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}
