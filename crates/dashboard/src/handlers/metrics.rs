//! Metrics API Handler

use salvo::prelude::*;
use tally::prelude::MetricsBundle;

use crate::{extensions::*, handlers::filtered_metrics};

/// Metrics API Handler
///
/// Returns the metrics bundle for the filter as JSON.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Json<MetricsBundle>, StatusError> {
    let state = depot.state_or_500()?;
    let (_, _, bundle) = filtered_metrics(state, req).await?;

    Ok(Json(bundle))
}
