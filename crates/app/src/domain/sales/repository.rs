//! Sales Repository

use std::error::Error as StdError;

use jiff::{Timestamp, civil::Date};
use sqlx::{
    Executor, FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, raw_sql, sqlite::SqliteRow,
};
use tally::{
    money::{from_minor_units, to_minor_units},
    prelude::*,
};

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");
const RESET_SALES_SQL: &str = include_str!("sql/reset_sales.sql");
const INSERT_SALE_SQL: &str = include_str!("sql/insert_sale.sql");
const COUNT_SALES_SQL: &str = include_str!("sql/count_sales.sql");
const LIST_SALES_SQL: &str = include_str!("sql/list_sales.sql");
const SAMPLE_SALES_SQL: &str = include_str!("sql/sample_sales.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const SALE_DATE_BOUNDS_SQL: &str = include_str!("sql/sale_date_bounds.sql");

/// A record as decoded from a `sales` row.
#[derive(Debug, Clone)]
pub(crate) struct StoredSale(pub(crate) SalesRecord);

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteSalesRepository;

impl SqliteSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_schema(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), sqlx::Error> {
        (&mut **tx).execute(raw_sql(SCHEMA_SQL)).await?;

        Ok(())
    }

    pub(crate) async fn reset_sales(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), sqlx::Error> {
        (&mut **tx).execute(raw_sql(RESET_SALES_SQL)).await?;

        Ok(())
    }

    pub(crate) async fn insert_sale(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        record: &NewSalesRecord,
    ) -> Result<u64, sqlx::Error> {
        let price = to_minor_units(record.price()).ok_or_else(|| {
            sqlx::Error::Encode(format!("price {} does not fit in minor units", record.price()).into())
        })?;

        let rows_affected = query(INSERT_SALE_SQL)
            .bind(record.product())
            .bind(i64::from(record.quantity()))
            .bind(price)
            .bind(record.sale_date().to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_sales(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Sqlite, i64>(COUNT_SALES_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| decode_error("count", e))
    }

    pub(crate) async fn list_sales(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        filter: &SalesFilter,
    ) -> Result<Vec<SalesRecord>, sqlx::Error> {
        let products = if filter.products().is_empty() {
            None
        } else {
            Some(
                serde_json::to_string(filter.products())
                    .map_err(|e| sqlx::Error::Encode(Box::new(e)))?,
            )
        };

        let rows = query_as::<Sqlite, StoredSale>(LIST_SALES_SQL)
            .bind(filter.from().map(|date| date.to_string()))
            .bind(filter.to().map(|date| date.to_string()))
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|StoredSale(record)| record).collect())
    }

    pub(crate) async fn sample_sales(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        limit: u32,
    ) -> Result<Vec<SalesRecord>, sqlx::Error> {
        let rows = query_as::<Sqlite, StoredSale>(SAMPLE_SALES_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|StoredSale(record)| record).collect())
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Sqlite, String>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn sale_date_bounds(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<(Option<Date>, Option<Date>), sqlx::Error> {
        let (first, last): (Option<String>, Option<String>) =
            query_as(SALE_DATE_BOUNDS_SQL).fetch_one(&mut **tx).await?;

        Ok((
            parse_date("sale_date", first.as_deref())?,
            parse_date("sale_date", last.as_deref())?,
        ))
    }
}

impl<'r> FromRow<'r, SqliteRow> for StoredSale {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let product: String = row.try_get("product")?;
        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?;
        let price = from_minor_units(row.try_get("price")?);
        let sale_date = row
            .try_get::<String, _>("sale_date")?
            .parse::<Date>()
            .map_err(|e| decode_error("sale_date", e))?;
        let created_at = row
            .try_get::<String, _>("created_at")?
            .parse::<Timestamp>()
            .map_err(|e| decode_error("created_at", e))?;

        let record = NewSalesRecord::new(&product, quantity, price, sale_date)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Self(SalesRecord::from_parts(
            RecordId::new(row.try_get("id")?),
            record,
            created_at,
        )))
    }
}

fn parse_date(column: &str, value: Option<&str>) -> Result<Option<Date>, sqlx::Error> {
    value
        .map(str::parse::<Date>)
        .transpose()
        .map_err(|e| decode_error(column, e))
}

fn decode_error(column: &str, source: impl StdError + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
