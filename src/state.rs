//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::config::{AppConfig, BuildInfo};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The build record is read once at startup; every page render uses the same one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub build: Arc<BuildInfo>,
    pub tera: Arc<Tera>,
}

impl AppState {
    pub fn new(config: AppConfig, build: BuildInfo, tera: Tera) -> Self {
        Self {
            config: Arc::new(config),
            build: Arc::new(build),
            tera: Arc::new(tera),
        }
    }
}
