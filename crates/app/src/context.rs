//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::sales::{SalesService, SqliteSalesService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open the sales store")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub sales: Arc<dyn SalesService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            sales: Arc::new(SqliteSalesService::new(db)),
        }
    }

    /// Build application context whose store connection opens on first use.
    ///
    /// A missing database file surfaces later, as a failed operation.
    ///
    /// # Errors
    ///
    /// Returns an error when the database URL is malformed.
    pub fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect_lazy(url).map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool)))
    }
}
