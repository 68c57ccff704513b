//! Request handlers
//!
//! Every handler runs one synchronous cycle: parse the filter from the query
//! string, load the matching records, aggregate, respond.

use salvo::prelude::*;
use tally::prelude::*;
use tally_app::domain::sales::SalesService as _;

use crate::{errors, extensions::*, state::State};

pub(crate) mod export;
pub(crate) mod index;
pub(crate) mod metrics;

/// The request's filter and the records it selects.
pub(crate) async fn filtered_records(
    state: &State,
    req: &Request,
) -> Result<(SalesFilter, Vec<SalesRecord>), StatusError> {
    let filter = req
        .dashboard_query()
        .to_filter()
        .map_err(|error| errors::invalid_query(&error))?;

    let records = state
        .app
        .sales
        .load(&filter)
        .await
        .map_err(errors::into_status_error)?;

    Ok((filter, records))
}

/// Metrics for the request's filter.
pub(crate) async fn filtered_metrics(
    state: &State,
    req: &Request,
) -> Result<(SalesFilter, Vec<SalesRecord>, MetricsBundle), StatusError> {
    let (filter, records) = filtered_records(state, req).await?;

    let bundle = MetricsBundle::compute(&records, state.top_n).or_500("failed to compute metrics")?;

    Ok((filter, records, bundle))
}
