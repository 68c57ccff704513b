//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use tally::prelude::*;
use tally_app::{context::AppContext, domain::sales::MockSalesService};
use testresult::TestResult;

use crate::{state::State, templates};

/// Two months, two products: $55.00 across three sales.
pub(crate) fn sample_records() -> TestResult<Vec<SalesRecord>> {
    let sales = [
        (1, "A", 2, date(2024, 1, 5)),
        (2, "B", 1, date(2024, 1, 20)),
        (3, "A", 3, date(2024, 2, 1)),
    ];

    let mut records = Vec::with_capacity(sales.len());

    for (id, product, quantity, sale_date) in sales {
        let price = if product == "A" {
            Decimal::new(1_000, 2)
        } else {
            Decimal::new(500, 2)
        };

        records.push(SalesRecord::from_parts(
            RecordId::new(id),
            NewSalesRecord::new(product, quantity, price, sale_date)?,
            Timestamp::UNIX_EPOCH,
        ));
    }

    Ok(records)
}

pub(crate) fn catalog_for(records: &[SalesRecord]) -> StoreCatalog {
    let mut products = records
        .iter()
        .map(|record| record.product().to_string())
        .collect::<Vec<_>>();

    products.sort();
    products.dedup();

    StoreCatalog {
        products,
        first_date: records.iter().map(SalesRecord::sale_date).min(),
        last_date: records.iter().map(SalesRecord::sale_date).max(),
    }
}

pub(crate) fn state_with_sales(sales: MockSalesService) -> Arc<State> {
    State::shared(
        AppContext {
            sales: Arc::new(sales),
        },
        DEFAULT_TOP_N,
        templates::environment().unwrap_or_default(),
    )
}

pub(crate) fn dashboard_service(sales: MockSalesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_sales(sales)))
            .push(route),
    )
}
