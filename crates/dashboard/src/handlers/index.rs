//! Dashboard Page Handler

use minijinja::context;
use salvo::prelude::*;
use tally::prelude::*;
use tally_app::domain::sales::SalesService as _;

use crate::{errors, extensions::*, handlers::filtered_records, templates};

/// Dashboard Page Handler
///
/// Renders the filter form, KPI cards, charts and tables for the filter in
/// the query string.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Text<String>, StatusError> {
    let state = depot.state_or_500()?;

    let (filter, records) = filtered_records(state, req).await?;

    let catalog = state
        .app
        .sales
        .catalog()
        .await
        .map_err(errors::into_status_error)?;

    let view = DashboardView::build(&records, &filter, catalog, state.top_n, DEFAULT_CURRENCY)
        .or_500("failed to build dashboard view")?;

    let page = state
        .templates
        .get_template(templates::DASHBOARD)
        .or_500("dashboard template missing")?
        .render(context! { view })
        .or_500("failed to render dashboard")?;

    Ok(Text::Html(page))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use tally_app::domain::sales::{MockSalesService, SalesServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{catalog_for, dashboard_service, sample_records};

    use super::*;

    fn make_service(sales: MockSalesService) -> Service {
        dashboard_service(sales, Router::new().get(handler))
    }

    #[tokio::test]
    async fn renders_kpis_charts_and_product_options() -> TestResult {
        let mut sales = MockSalesService::new();
        let records = sample_records()?;
        let catalog = catalog_for(&records);

        sales
            .expect_load()
            .once()
            .withf(SalesFilter::is_unfiltered)
            .return_once(move |_| Ok(records));
        sales.expect_catalog().once().return_once(move || Ok(catalog));

        let mut res = TestClient::get("http://example.com/")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_string().await?;

        assert!(body.contains("$55.00"), "total revenue card missing");
        assert!(body.contains(r#"<option value="A">A</option>"#));
        assert!(body.contains(r#"id="top_products""#));
        assert!(body.contains("<svg"));

        Ok(())
    }

    #[tokio::test]
    async fn forwards_filter_and_marks_selection() -> TestResult {
        let mut sales = MockSalesService::new();
        let records = sample_records()?;
        let catalog = catalog_for(&records);

        sales
            .expect_load()
            .once()
            .withf(|filter| {
                filter.products().len() == 1
                    && filter.products().contains("B")
                    && filter.from().is_some_and(|from| from.to_string() == "2024-01-10")
            })
            .return_once(move |filter| Ok(filter.apply(&records)));
        sales.expect_catalog().once().return_once(move || Ok(catalog));

        let mut res = TestClient::get("http://example.com/?from=2024-01-10&to=&product=B")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_string().await?;

        assert!(body.contains(r#"<option value="B" selected>B</option>"#));
        assert!(body.contains("from=2024-01-10&amp;to=&amp;product=B"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_filter_result_shows_notice() -> TestResult {
        let mut sales = MockSalesService::new();

        sales.expect_load().once().return_once(|_| Ok(vec![]));
        sales
            .expect_catalog()
            .once()
            .return_once(|| Ok(StoreCatalog::default()));

        let mut res = TestClient::get("http://example.com/?product=Nothing")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.take_string().await?.contains("No sales match the current filter."));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_date_returns_400() {
        let mut sales = MockSalesService::new();

        sales.expect_load().never();
        sales.expect_catalog().never();

        let res = TestClient::get("http://example.com/?from=2024-13-40")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn inverted_range_returns_400() {
        let mut sales = MockSalesService::new();

        sales.expect_load().never();
        sales.expect_catalog().never();

        let res = TestClient::get("http://example.com/?from=2024-02-01&to=2024-01-01")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unavailable_data_returns_503() {
        let mut sales = MockSalesService::new();

        sales
            .expect_load()
            .once()
            .return_once(|_| Err(SalesServiceError::DataUnavailable("no such table: sales".to_string())));
        sales.expect_catalog().never();

        let res = TestClient::get("http://example.com/")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn storage_error_returns_500() {
        let mut sales = MockSalesService::new();

        sales
            .expect_load()
            .once()
            .return_once(|_| Err(SalesServiceError::InvalidData("bad row".to_string())));
        sales.expect_catalog().never();

        let res = TestClient::get("http://example.com/")
            .send(&make_service(sales))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
