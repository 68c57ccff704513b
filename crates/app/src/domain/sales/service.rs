//! Sales service.

use async_trait::async_trait;
use mockall::automock;
use tally::prelude::*;
use tracing::debug;

use crate::{
    database::Db,
    domain::sales::{errors::SalesServiceError, repository::SqliteSalesRepository},
};

#[derive(Debug, Clone)]
pub struct SqliteSalesService {
    db: Db,
    repository: SqliteSalesRepository,
}

impl SqliteSalesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteSalesRepository::new(),
        }
    }
}

#[async_trait]
impl SalesService for SqliteSalesService {
    async fn ensure_schema(&self) -> Result<(), SalesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.create_schema(&mut tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn reset(&self) -> Result<(), SalesServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.reset_sales(&mut tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn seed(&self, records: &[NewSalesRecord]) -> Result<u64, SalesServiceError> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;

        for record in records {
            inserted += self.repository.insert_sale(&mut tx, record).await?;
        }

        tx.commit().await?;

        debug!(inserted, "inserted sales records");

        Ok(inserted)
    }

    async fn count(&self) -> Result<u64, SalesServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_sales(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn load(&self, filter: &SalesFilter) -> Result<Vec<SalesRecord>, SalesServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.count_sales(&mut tx).await? == 0 {
            return Err(SalesServiceError::DataUnavailable(
                "the sales table holds no records".to_string(),
            ));
        }

        let records = self.repository.list_sales(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(records)
    }

    async fn sample(&self, limit: u32) -> Result<Vec<SalesRecord>, SalesServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.sample_sales(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(records)
    }

    async fn catalog(&self) -> Result<StoreCatalog, SalesServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;
        let (first_date, last_date) = self.repository.sale_date_bounds(&mut tx).await?;

        tx.commit().await?;

        Ok(StoreCatalog {
            products,
            first_date,
            last_date,
        })
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Creates the `sales` table and its indexes if they do not exist.
    async fn ensure_schema(&self) -> Result<(), SalesServiceError>;

    /// Deletes every record and restarts the id sequence.
    async fn reset(&self) -> Result<(), SalesServiceError>;

    /// Inserts the records in one transaction, returning how many were stored.
    async fn seed(&self, records: &[NewSalesRecord]) -> Result<u64, SalesServiceError>;

    /// Counts every stored record.
    async fn count(&self) -> Result<u64, SalesServiceError>;

    /// Loads the records matching `filter`, ordered by sale date then id.
    ///
    /// An empty store is [`SalesServiceError::DataUnavailable`]; a filter that
    /// matches nothing in a non-empty store is an empty vector.
    async fn load(&self, filter: &SalesFilter) -> Result<Vec<SalesRecord>, SalesServiceError>;

    /// The first `limit` records by id.
    async fn sample(&self, limit: u32) -> Result<Vec<SalesRecord>, SalesServiceError>;

    /// Every distinct product and the range of sale dates in the store.
    async fn catalog(&self) -> Result<StoreCatalog, SalesServiceError>;
}
