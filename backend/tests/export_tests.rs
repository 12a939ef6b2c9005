//! Tests for CSV export of filtered records
//! Verifies that exported records reload to the same tuples

use nwt_climate_server::services::DatasetLoader;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::pipeline::select;
use shared::{ClimateRecord, ClimateRow, Month, MonthKey, Selection, YearRange};
use std::str::FromStr;

fn month(n: u8) -> Month {
    Month::new(n).unwrap()
}

#[test]
fn export_round_trip_with_average_tag() {
    let records = vec![
        ClimateRecord {
            model: "5ModelAvg".to_string(),
            scenario: "rcp45".to_string(),
            year: 2060,
            month: MonthKey::average([month(12), month(1), month(2)]),
            value: Decimal::new(-18033, 3),
        },
        ClimateRecord {
            model: "NCAR-CCSM4".to_string(),
            scenario: "rcp85".to_string(),
            year: 2070,
            month: MonthKey::Single(month(6)),
            value: Decimal::new(112, 0),
        },
    ];

    let csv = DatasetLoader::records_to_csv(&records).unwrap();
    assert!(csv.contains("avg_1_2_12"));

    let reloaded = DatasetLoader::read_records(csv.as_bytes()).unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn empty_export_has_no_rows() {
    let csv = DatasetLoader::records_to_csv(&[]).unwrap();
    let reloaded = DatasetLoader::read_records(csv.as_bytes()).unwrap();
    assert!(reloaded.is_empty());
}

fn row(year: i32, month_number: u8, tas: Decimal) -> ClimateRow {
    ClimateRow {
        location: "Inuvik".to_string(),
        model: "GFDL-CM3".to_string(),
        scenario: "rcp85".to_string(),
        year,
        month: month(month_number),
        tas: Some(tas),
        pr: None,
    }
}

fn selection(months: impl IntoIterator<Item = u8>) -> Selection {
    Selection {
        location: "Inuvik".to_string(),
        scenarios: vec!["rcp85".to_string()],
        models: vec!["GFDL-CM3".to_string()],
        months: months.into_iter().map(month).collect(),
        years: YearRange::new(2010, 2090),
        ..Selection::default()
    }
}

#[test]
fn winter_mean_survives_export() {
    let rows = vec![
        row(2050, 12, Decimal::from_str("-20.1").unwrap()),
        row(2050, 1, Decimal::from_str("-19.0").unwrap()),
        row(2050, 2, Decimal::from_str("-21.0").unwrap()),
    ];

    let records = select(&rows, &selection([12, 1, 2]));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].month.to_string(), "avg_1_2_12");

    let csv = DatasetLoader::records_to_csv(&records).unwrap();
    let reloaded = DatasetLoader::read_records(csv.as_bytes()).unwrap();

    assert_eq!(reloaded, records);
    assert!(reloaded[0].value.scale() > 10);
}

fn month_key_strategy() -> impl Strategy<Value = MonthKey> {
    prop_oneof![
        (1u8..=12).prop_map(|m| MonthKey::Single(month(m))),
        prop::collection::btree_set(1u8..=12, 2..12)
            .prop_map(|ms| MonthKey::average(ms.into_iter().map(month))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Serialising to CSV and reloading reproduces every tuple
    #[test]
    fn prop_csv_round_trip(
        rows in prop::collection::vec(
            (
                prop::sample::select(vec!["GFDL-CM3", "IPSL-CM5A-LR", "MRI-CGCM3"]),
                prop::sample::select(vec!["rcp45", "rcp60", "rcp85"]),
                (190i32..=230).prop_map(|d| d * 10),
                month_key_strategy(),
                (-400_000i64..400_000, 0u32..4).prop_map(|(v, s)| Decimal::new(v, s)),
            ),
            0..30,
        )
    ) {
        let records: Vec<ClimateRecord> = rows
            .into_iter()
            .map(|(model, scenario, year, month, value)| ClimateRecord {
                model: model.to_string(),
                scenario: scenario.to_string(),
                year,
                month,
                value,
            })
            .collect();

        let csv = DatasetLoader::records_to_csv(&records).unwrap();
        let reloaded = DatasetLoader::read_records(csv.as_bytes()).unwrap();

        prop_assert_eq!(reloaded, records);
    }

    /// Month averages with non-terminating expansions reload unchanged
    #[test]
    fn prop_averaged_selection_round_trip(
        months in prop::collection::btree_set(1u8..=12, 1..=12),
        values in prop::collection::vec(-400i64..400, 12 * 9),
    ) {
        let rows: Vec<ClimateRow> = (0..9)
            .flat_map(|decade| (1u8..=12).map(move |m| (2010 + decade * 10, m)))
            .zip(values)
            .map(|((year, m), tenths)| row(year, m, Decimal::new(tenths, 1)))
            .collect();

        let records = select(&rows, &selection(months.iter().copied()));
        prop_assert_eq!(records.len(), 9);

        let csv = DatasetLoader::records_to_csv(&records).unwrap();
        let reloaded = DatasetLoader::read_records(csv.as_bytes()).unwrap();

        prop_assert_eq!(reloaded, records);
    }
}
