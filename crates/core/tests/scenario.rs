//! End-to-end metric scenarios

use jiff::{Timestamp, civil::date};
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rusty_money::iso::USD;
use tally::prelude::*;
use testresult::TestResult;

fn stored(records: Vec<NewSalesRecord>) -> Vec<SalesRecord> {
    records
        .into_iter()
        .zip(1..)
        .map(|(record, id)| SalesRecord::from_parts(RecordId::new(id), record, Timestamp::UNIX_EPOCH))
        .collect()
}

fn three_sales() -> TestResult<Vec<SalesRecord>> {
    Ok(stored(vec![
        NewSalesRecord::new("A", 2, Decimal::new(100, 1), date(2024, 1, 5))?,
        NewSalesRecord::new("B", 1, Decimal::new(50, 1), date(2024, 1, 20))?,
        NewSalesRecord::new("A", 3, Decimal::new(100, 1), date(2024, 2, 1))?,
    ]))
}

#[test]
fn three_sale_scenario() -> TestResult {
    let bundle = MetricsBundle::compute(&three_sales()?, DEFAULT_TOP_N)?;

    assert_eq!(bundle.overall.total_revenue, Decimal::from(55));

    let ranking: Vec<(&str, Decimal)> = bundle
        .top_products
        .iter()
        .map(|p| (p.product.as_str(), p.revenue))
        .collect();

    assert_eq!(ranking, [("A", Decimal::from(50)), ("B", Decimal::from(5))]);

    let trend: Vec<(String, Decimal, u64)> = bundle
        .monthly_trend
        .iter()
        .map(|m| (m.month.to_string(), m.revenue, m.quantity))
        .collect();

    assert_eq!(
        trend,
        [
            ("2024-01".to_string(), Decimal::from(25), 3),
            ("2024-02".to_string(), Decimal::from(30), 3),
        ]
    );

    Ok(())
}

#[test]
fn revenue_sums_match_total_on_generated_data() -> TestResult {
    let config = GeneratorConfig::ending_on(date(2024, 6, 30)).with_count(750);
    let records = stored(generate(&config, &mut StdRng::seed_from_u64(2024))?);

    let bundle = MetricsBundle::compute(&records, DEFAULT_TOP_N)?;

    let per_record: Decimal = records.iter().map(SalesRecord::revenue).sum();
    let per_product: Decimal = bundle.product_rankings.iter().map(|p| p.revenue).sum();
    let per_month: Decimal = bundle.monthly_trend.iter().map(|m| m.revenue).sum();

    assert_eq!(per_record, bundle.overall.total_revenue);
    assert_eq!(per_product, bundle.overall.total_revenue);
    assert_eq!(per_month, bundle.overall.total_revenue);
    assert_eq!(bundle.overall.total_transactions, 750);

    Ok(())
}

#[test]
fn rankings_are_a_total_order() -> TestResult {
    let config = GeneratorConfig::ending_on(date(2024, 6, 30)).with_count(300);
    let records = stored(generate(&config, &mut StdRng::seed_from_u64(9))?);

    let rankings = product_rankings(&records);

    for pair in rankings.windows(2) {
        if let [a, b] = pair {
            assert!(a.ranking_cmp(b).is_lt(), "{} should rank before {}", a.product, b.product);
        }
    }

    Ok(())
}

#[test]
fn monthly_trend_is_chronological_and_unique() -> TestResult {
    let config = GeneratorConfig::ending_on(date(2024, 6, 30)).with_count(400);
    let records = stored(generate(&config, &mut StdRng::seed_from_u64(11))?);

    let trend = monthly_trend(&records);

    for pair in trend.windows(2) {
        if let [a, b] = pair {
            assert!(a.month < b.month, "{} should precede {}", a.month, b.month);
        }
    }

    Ok(())
}

#[test]
fn filter_then_aggregate_matches_subset() -> TestResult {
    let records = three_sales()?;
    let filter = SalesFilter::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)), ["A"])?;

    let bundle = MetricsBundle::compute(&filter.apply(&records), DEFAULT_TOP_N)?;

    assert_eq!(bundle.overall.total_revenue, Decimal::from(20));
    assert_eq!(bundle.overall.total_transactions, 1);

    Ok(())
}

#[test]
fn empty_set_reports_and_skips_charts() -> TestResult {
    let bundle = MetricsBundle::compute(&[], DEFAULT_TOP_N)?;

    assert_eq!(bundle.overall, OverallStats::default());
    assert!(!Report::new(&bundle, USD).lines().is_empty());

    for (kind, result) in tally::charts::render_all(&bundle, USD) {
        assert!(matches!(result, Err(ChartError::RenderSkipped(_))), "{kind} rendered");
    }

    Ok(())
}
