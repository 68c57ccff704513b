//! App Router

use salvo::Router;

use crate::{handlers, healthcheck};

pub(crate) fn app_router() -> Router {
    Router::new()
        .get(handlers::index::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("api/metrics").get(handlers::metrics::handler))
        .push(
            Router::with_path("export")
                .push(Router::with_path("sales.csv").get(handlers::export::sales))
                .push(Router::with_path("products.csv").get(handlers::export::products))
                .push(Router::with_path("monthly.csv").get(handlers::export::monthly)),
        )
}
