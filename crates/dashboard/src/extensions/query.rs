//! Dashboard filter query parsing.

use salvo::prelude::Request;
use tally::prelude::DashboardQuery;

/// Read the dashboard filter parameters from a request's query string.
///
/// `product` may repeat, once per selected product.
pub(crate) trait DashboardQueryExt {
    fn dashboard_query(&self) -> DashboardQuery;
}

impl DashboardQueryExt for Request {
    fn dashboard_query(&self) -> DashboardQuery {
        DashboardQuery {
            from: self.query::<String>("from"),
            to: self.query::<String>("to"),
            products: self
                .queries()
                .get_vec("product")
                .cloned()
                .unwrap_or_default(),
        }
    }
}
