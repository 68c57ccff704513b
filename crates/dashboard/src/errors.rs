//! Dashboard Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use tally::prelude::DashboardError;
use tally_app::domain::sales::SalesServiceError;

pub(crate) fn into_status_error(error: SalesServiceError) -> StatusError {
    match error {
        SalesServiceError::DataUnavailable(_) => {
            warn!("{error}");

            StatusError::service_unavailable().brief(error.to_string())
        }
        SalesServiceError::InvalidData(reason) => {
            error!("stored sales data is invalid: {reason}");

            StatusError::internal_server_error()
        }
        SalesServiceError::Sql(source) => {
            error!("failed to load sales: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn invalid_query(error: &DashboardError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}
