//! Data preparation service
//!
//! Reads wide per-variable model output, reduces it to decadal means and
//! writes the long-form CSV the server loads at startup.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::str::FromStr;

use config::{ConfigError, Environment};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::prep::{decadal_means, melt_wide, merge_variables, Observation, WideRow, WideTable};
use shared::{ClimateRow, Month, Variable};

use crate::error::{AppError, AppResult};
use crate::services::DatasetLoader;

/// One wide input file
#[derive(Debug, Deserialize, Clone)]
pub struct PrepInput {
    pub path: String,
    pub variable: Variable,
    pub model: String,
    pub scenario: String,
}

/// Prep job configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PrepConfig {
    pub inputs: Vec<PrepInput>,

    /// Long-form CSV written by the job
    pub output: String,
}

impl PrepConfig {
    /// Load from an optional config file plus `NWT_PREP_` environment variables
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("inputs", Vec::<String>::new())?
            .set_default("output", "data/tas_pr_nwt_decadal_mean_melted.csv")?;

        builder = match path {
            Some(path) => builder.add_source(config::File::with_name(path)),
            None => builder.add_source(config::File::with_name("config/prep").required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix("NWT_PREP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Summary of a completed prep run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepReport {
    pub inputs: usize,
    pub annual_rows: usize,
    pub decadal_rows: usize,
}

pub struct PrepService {
    config: PrepConfig,
}

impl PrepService {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    /// Run the whole job and write the output file
    pub fn run(&self) -> AppResult<PrepReport> {
        if self.config.inputs.is_empty() {
            return Err(AppError::Configuration("no prep inputs configured".to_string()));
        }

        let mut tables = Vec::with_capacity(self.config.inputs.len());
        for input in &self.config.inputs {
            let file = File::open(&input.path).map_err(|source| AppError::DataFile {
                path: input.path.clone(),
                source,
            })?;
            let table = read_wide_table(file, &input.path)?;
            tracing::info!(
                "Read {} rows x {} locations from {}",
                table.rows.len(),
                table.locations.len(),
                input.path
            );
            tables.push((input.clone(), table));
        }

        let annual = Self::combine(&tables);
        let decadal = decadal_means(&annual);
        tracing::info!(
            "Reduced {} annual rows to {} decadal rows",
            annual.len(),
            decadal.len()
        );

        DatasetLoader::write_rows(&self.config.output, &decadal)?;
        tracing::info!("Wrote {}", self.config.output);

        Ok(PrepReport {
            inputs: tables.len(),
            annual_rows: annual.len(),
            decadal_rows: decadal.len(),
        })
    }

    /// Melt every table and join temperature with precipitation
    pub fn combine(tables: &[(PrepInput, WideTable)]) -> Vec<ClimateRow> {
        let mut by_variable: BTreeMap<Variable, Vec<Observation>> = BTreeMap::new();
        for (input, table) in tables {
            by_variable
                .entry(input.variable)
                .or_default()
                .extend(melt_wide(table, &input.model, &input.scenario));
        }

        let tas = by_variable.remove(&Variable::Tas).unwrap_or_default();
        let pr = by_variable.remove(&Variable::Pr).unwrap_or_default();
        merge_variables(tas, pr)
    }
}

fn format_error(path: &str, message: String) -> AppError {
    AppError::DataRow {
        path: path.to_string(),
        message,
    }
}

/// Parse a wide table: `year`, `month`, then one column per location.
///
/// Any unnamed leading index column is skipped. Blank cells are missing.
pub fn read_wide_table<R: Read>(input: R, path: &str) -> AppResult<WideTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|source| AppError::DataFormat {
            path: path.to_string(),
            source,
        })?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| format_error(path, format!("missing `{}` column", name)))
    };
    let year_idx = column("year")?;
    let month_idx = column("month")?;

    let location_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, name)| *idx != year_idx && *idx != month_idx && !name.is_empty())
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|source| AppError::DataFormat {
            path: path.to_string(),
            source,
        })?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let row_error = |what: &str| format_error(path, format!("row {}: invalid {}", line + 1, what));

        let year: i32 = field(year_idx).parse().map_err(|_| row_error("year"))?;
        let month = field(month_idx)
            .parse::<u8>()
            .ok()
            .and_then(Month::new)
            .ok_or_else(|| row_error("month"))?;

        let values = location_columns
            .iter()
            .map(|(idx, _)| match field(*idx) {
                "" => Ok(None),
                raw => Decimal::from_str(raw).map(Some).map_err(|_| row_error("value")),
            })
            .collect::<AppResult<Vec<_>>>()?;

        rows.push(WideRow {
            year,
            month,
            values,
        });
    }

    Ok(WideTable {
        locations: location_columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::prep::NODATA;

    const WIDE_TAS: &str = "\
,year,month,Inuvik,Fort Good Hope
0,2011,1,-27.5,-9999
1,2011,2,-26.0,
";

    fn input(variable: Variable) -> PrepInput {
        PrepInput {
            path: "memory.csv".to_string(),
            variable,
            model: "IPSL-CM5A-LR".to_string(),
            scenario: "rcp60".to_string(),
        }
    }

    #[test]
    fn test_read_wide_table() {
        let table = read_wide_table(WIDE_TAS.as_bytes(), "memory.csv").unwrap();

        assert_eq!(table.locations, vec!["Inuvik", "Fort Good Hope"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values[1], Some(NODATA));
        assert_eq!(table.rows[1].values[1], None);
        assert_eq!(table.rows[1].month, Month::new(2).unwrap());
    }

    #[test]
    fn test_read_wide_table_requires_month() {
        let err = read_wide_table("year,Inuvik\n2011,1.0\n".as_bytes(), "bad.csv").unwrap_err();
        assert!(err.to_string().contains("month"));
    }

    #[test]
    fn test_read_wide_table_rejects_bad_value() {
        let err =
            read_wide_table("year,month,Inuvik\n2011,1,warm\n".as_bytes(), "bad.csv").unwrap_err();
        assert!(err.to_string().contains("row 1"));
        assert!(matches!(err, AppError::DataRow { ref path, .. } if path == "bad.csv"));
    }

    #[test]
    fn test_combine_merges_variables() {
        let tas = read_wide_table(WIDE_TAS.as_bytes(), "tas.csv").unwrap();
        let pr = read_wide_table(
            "year,month,Inuvik,Fort Good Hope\n2011,1,14,12\n".as_bytes(),
            "pr.csv",
        )
        .unwrap();

        let rows = PrepService::combine(&[(input(Variable::Tas), tas), (input(Variable::Pr), pr)]);

        let inuvik_jan = rows
            .iter()
            .find(|r| r.location == "Inuvik" && r.month.number() == 1)
            .unwrap();
        assert_eq!(inuvik_jan.tas, Some(Decimal::new(-275, 1)));
        assert_eq!(inuvik_jan.pr, Some(Decimal::new(14, 0)));

        let good_hope_jan = rows
            .iter()
            .find(|r| r.location == "Fort Good Hope" && r.month.number() == 1)
            .unwrap();
        assert_eq!(good_hope_jan.tas, None);
        assert_eq!(good_hope_jan.pr, Some(Decimal::new(12, 0)));
    }

    fn wide_csv(years: std::ops::RangeInclusive<i32>, value: &str) -> String {
        let mut csv = String::from("year,month,Inuvik\n");
        for year in years {
            for month in 1..=12 {
                csv.push_str(&format!("{},{},{}\n", year, month, value));
            }
        }
        // a lone January starts a partial decade
        csv.push_str(&format!("2020,1,{}\n", value));
        csv
    }

    #[test]
    fn test_run_writes_loadable_decadal_file() {
        let dir = tempfile::tempdir().unwrap();
        let tas_path = dir.path().join("tas.csv");
        let pr_path = dir.path().join("pr.csv");
        let output = dir.path().join("decadal.csv");
        std::fs::write(&tas_path, wide_csv(2010..=2019, "-12.34")).unwrap();
        std::fs::write(&pr_path, wide_csv(2010..=2019, "20.6")).unwrap();

        let config = PrepConfig {
            inputs: vec![
                PrepInput {
                    path: tas_path.to_string_lossy().into_owned(),
                    ..input(Variable::Tas)
                },
                PrepInput {
                    path: pr_path.to_string_lossy().into_owned(),
                    ..input(Variable::Pr)
                },
            ],
            output: output.to_string_lossy().into_owned(),
        };

        let report = PrepService::new(config).run().unwrap();

        assert_eq!(
            report,
            PrepReport {
                inputs: 2,
                annual_rows: 121,
                decadal_rows: 12,
            }
        );

        let file = File::open(&output).unwrap();
        let rows = DatasetLoader::read_climate_rows(file, "decadal.csv").unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.location == "Inuvik" && r.year == 2010));
        assert!(rows.iter().all(|r| r.model == "IPSL-CM5A-LR" && r.scenario == "rcp60"));
        assert!(rows.iter().all(|r| r.tas == Some(Decimal::new(-123, 1))));
        assert!(rows.iter().all(|r| r.pr == Some(Decimal::new(21, 0))));
    }

    #[test]
    fn test_run_without_inputs_fails() {
        let service = PrepService::new(PrepConfig {
            inputs: Vec::new(),
            output: "unused.csv".to_string(),
        });
        assert!(matches!(service.run(), Err(AppError::Configuration(_))));
    }
}
