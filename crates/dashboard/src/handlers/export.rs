//! CSV Export Handlers

use jiff::Zoned;
use salvo::{
    http::header::{self, HeaderValue},
    prelude::*,
};
use tally::export::{export_file_name, write_monthly_report, write_product_report, write_records};

use crate::{
    extensions::*,
    handlers::{filtered_metrics, filtered_records},
};

/// Filtered Sales Export
///
/// The raw records matching the filter, in the store's column layout.
#[handler]
pub(crate) async fn sales(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let (_, records) = filtered_records(state, req).await?;

    let mut body = Vec::new();
    write_records(&mut body, &records).or_500("failed to export sales")?;

    attach_csv(res, "sales_data", body)
}

/// Product Report Export
///
/// The product performance table for the filter, in ranking order.
#[handler]
pub(crate) async fn products(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let (_, _, bundle) = filtered_metrics(state, req).await?;

    let mut body = Vec::new();
    write_product_report(&mut body, &bundle.product_rankings)
        .or_500("failed to export product report")?;

    attach_csv(res, "product_report", body)
}

/// Monthly Report Export
///
/// The monthly breakdown for the filter, in chronological order.
#[handler]
pub(crate) async fn monthly(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;
    let (_, _, bundle) = filtered_metrics(state, req).await?;

    let mut body = Vec::new();
    write_monthly_report(&mut body, &bundle.monthly_trend)
        .or_500("failed to export monthly report")?;

    attach_csv(res, "monthly_report", body)
}

fn attach_csv(res: &mut Response, prefix: &str, body: Vec<u8>) -> Result<(), StatusError> {
    let file_name = export_file_name(prefix, Zoned::now().date());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .or_500("invalid export file name")?;

    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    res.headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    res.body(body);

    Ok(())
}
