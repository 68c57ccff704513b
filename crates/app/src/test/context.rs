//! Test context for service-level integration tests.

use tempfile::TempDir;
use testresult::TestResult;

use crate::{
    database::{self, Db},
    domain::sales::{SalesService, SqliteSalesService},
};

/// A service over a fresh SQLite file that is removed when the context drops.
pub(crate) struct TestContext {
    _dir: TempDir,
    pub(crate) db: Db,
    pub(crate) sales: SqliteSalesService,
}

impl TestContext {
    /// A store with the schema in place and no records.
    pub(crate) async fn new() -> TestResult<Self> {
        let ctx = Self::without_schema().await?;

        ctx.sales.ensure_schema().await?;

        Ok(ctx)
    }

    /// A store whose database file exists but has no `sales` table.
    pub(crate) async fn without_schema() -> TestResult<Self> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("sales.db").display());

        let db = Db::new(database::connect(&url, true).await?);

        Ok(Self {
            _dir: dir,
            sales: SqliteSalesService::new(db.clone()),
            db,
        })
    }
}
