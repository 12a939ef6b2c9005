//! Loading and exporting climate data as CSV

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    ClimateDataset, ClimateRecord, ClimateRow, GpsCoordinates, Location, DOMAIN_LOCATION,
};

use crate::config::DataConfig;
use crate::error::{AppError, AppResult};

/// Row of the locations file
#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Latitude", with = "rust_decimal::serde::str")]
    latitude: Decimal,
    #[serde(alias = "Longitude", with = "rust_decimal::serde::str")]
    longitude: Decimal,
}

/// Reads the reference dataset from flat files
pub struct DatasetLoader;

fn open(path: &str) -> AppResult<File> {
    File::open(Path::new(path)).map_err(|source| AppError::DataFile {
        path: path.to_string(),
        source,
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}

impl DatasetLoader {
    /// Load every configured climate file plus the locations file
    pub fn load(config: &DataConfig) -> AppResult<ClimateDataset> {
        let mut rows = Vec::new();
        for path in &config.climate_files {
            let file_rows = Self::read_climate_rows(open(path)?, path)?;
            tracing::info!("Loaded {} rows from {}", file_rows.len(), path);
            rows.extend(file_rows);
        }

        for path in &config.domain_files {
            let file_rows = Self::read_domain_rows(open(path)?, path)?;
            tracing::info!("Loaded {} territory-wide rows from {}", file_rows.len(), path);
            rows.extend(file_rows);
        }

        let locations = Self::read_locations(open(&config.locations_file)?, &config.locations_file)?;
        tracing::info!(
            "Loaded {} locations from {}",
            locations.len(),
            config.locations_file
        );

        Ok(ClimateDataset::new(rows, locations))
    }

    /// Parse long-form climate rows; `path` is only used in errors
    pub fn read_climate_rows<R: Read>(input: R, path: &str) -> AppResult<Vec<ClimateRow>> {
        reader(input)
            .deserialize()
            .collect::<Result<Vec<ClimateRow>, _>>()
            .map_err(|source| AppError::DataFormat {
                path: path.to_string(),
                source,
            })
    }

    /// Parse territory-wide rows; any location column is replaced by
    /// [`DOMAIN_LOCATION`]
    pub fn read_domain_rows<R: Read>(input: R, path: &str) -> AppResult<Vec<ClimateRow>> {
        let mut rows = Self::read_climate_rows(input, path)?;
        for row in &mut rows {
            row.location = DOMAIN_LOCATION.to_string();
        }
        Ok(rows)
    }

    /// Parse the locations table; `path` is only used in errors
    pub fn read_locations<R: Read>(input: R, path: &str) -> AppResult<Vec<Location>> {
        reader(input)
            .deserialize()
            .map(|row| {
                row.map(|row: LocationRow| {
                    Location::new(row.name, GpsCoordinates::new(row.latitude, row.longitude))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| AppError::DataFormat {
                path: path.to_string(),
                source,
            })
    }

    /// Parse records previously written by [`DatasetLoader::records_to_csv`]
    pub fn read_records<R: Read>(input: R) -> AppResult<Vec<ClimateRecord>> {
        let records = reader(input)
            .deserialize()
            .collect::<Result<Vec<ClimateRecord>, _>>()?;
        Ok(records)
    }

    /// Export filtered records as CSV
    pub fn records_to_csv(records: &[ClimateRecord]) -> AppResult<String> {
        let bytes = write_csv(Vec::new(), records)?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    /// Write climate rows as a long-form CSV file
    pub fn write_rows(path: &str, rows: &[ClimateRow]) -> AppResult<()> {
        let file = File::create(Path::new(path)).map_err(|source| AppError::DataFile {
            path: path.to_string(),
            source,
        })?;
        write_csv(file, rows)?;
        Ok(())
    }
}

fn write_csv<W: Write, T: Serialize>(output: W, items: &[T]) -> AppResult<W> {
    let mut wtr = csv::Writer::from_writer(output);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))
}
