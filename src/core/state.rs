use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;

/// Shared application state: settings plus the two read pools. The primary
/// pool serves accounts, internships, chapters and student profiles; the
/// delivery pool serves the per-course copies of progress tests.
#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    delivery_db: PgPool,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, delivery_db: PgPool) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, delivery_db }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn delivery_db(&self) -> &PgPool {
        &self.inner.delivery_db
    }
}
