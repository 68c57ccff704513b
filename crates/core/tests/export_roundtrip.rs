//! CSV export round trips

use jiff::civil::date;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use tally::prelude::*;
use testresult::TestResult;

#[test]
fn exported_filtered_records_read_back_unchanged() -> TestResult {
    let config = GeneratorConfig::ending_on(date(2024, 12, 31)).with_count(120);
    let created_at: jiff::Timestamp = "2025-01-01T08:30:00Z".parse()?;

    let records: Vec<SalesRecord> = generate(&config, &mut StdRng::seed_from_u64(5))?
        .into_iter()
        .zip(1..)
        .map(|(record, id)| SalesRecord::from_parts(RecordId::new(id), record, created_at))
        .collect();

    let filter = SalesFilter::new(
        Some(date(2024, 4, 1)),
        Some(date(2024, 9, 30)),
        ["Laptop", "Mouse", "Monitor"],
    )?;
    let filtered = filter.apply(&records);

    let mut csv = Vec::new();
    write_records(&mut csv, &filtered)?;

    let reloaded = read_records(csv.as_slice())?;

    assert_eq!(reloaded, filtered);

    Ok(())
}

#[test]
fn prices_with_trailing_zero_digits_read_back_unchanged() -> TestResult {
    let created_at: jiff::Timestamp = "2025-01-01T08:30:00Z".parse()?;
    let prices = [
        Decimal::new(10_500, 3),
        Decimal::new(1, 2),
        Decimal::new(7, 0),
    ];

    let records = prices
        .into_iter()
        .zip(1..)
        .map(|(price, id)| {
            Ok(SalesRecord::from_parts(
                RecordId::new(id),
                NewSalesRecord::new("Mouse", 1, price, date(2024, 3, 1))?,
                created_at,
            ))
        })
        .collect::<TestResult<Vec<_>>>()?;

    let mut csv = Vec::new();
    write_records(&mut csv, &records)?;

    let reloaded = read_records(csv.as_slice())?;

    assert_eq!(reloaded, records);
    assert_eq!(
        reloaded.iter().map(SalesRecord::price).collect::<Vec<_>>(),
        prices.to_vec()
    );

    Ok(())
}

#[test]
fn sub_cent_prices_never_reach_the_file() {
    let result = NewSalesRecord::new("Mouse", 1, Decimal::new(4, 3), date(2024, 3, 1));

    assert!(matches!(result, Err(RecordError::SubCentPrice(_))));

    let csv = "id,product,quantity,price,sale_date,created_at\n\
               1,Mouse,1,10.005,2024-03-01,2024-01-01T00:00:00Z\n";

    assert!(matches!(
        read_records(csv.as_bytes()),
        Err(ExportError::InvalidRow { line: 2, .. })
    ));
}
