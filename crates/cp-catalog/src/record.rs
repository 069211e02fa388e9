//! Catalog records and the immutable in-memory catalog table.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use cp_types::{AppError, AppResult, CatalogField};

/// One row of the reference dataset. All attributes are categorical strings;
/// the numeric columns of the raw dataset (price, mileage, ...) are not part
/// of the catalog because nothing in selection filtering uses them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Car Type")]
    pub car_type: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Number of Owners")]
    pub number_of_owners: String,
    #[serde(rename = "Fuel Type")]
    pub fuel_type: String,
    #[serde(rename = "Transmission Type")]
    pub transmission_type: String,
    #[serde(rename = "Previous Accidents")]
    pub previous_accidents: String,
    #[serde(rename = "Service History")]
    pub service_history: String,
    #[serde(rename = "Insurance Type")]
    pub insurance_type: String,
}

impl CatalogRecord {
    /// The value of one categorical attribute.
    pub fn get(&self, field: CatalogField) -> &str {
        match field {
            CatalogField::Location => &self.location,
            CatalogField::Brand => &self.brand,
            CatalogField::Model => &self.model,
            CatalogField::CarType => &self.car_type,
            CatalogField::Color => &self.color,
            CatalogField::NumberOfOwners => &self.number_of_owners,
            CatalogField::FuelType => &self.fuel_type,
            CatalogField::TransmissionType => &self.transmission_type,
            CatalogField::PreviousAccidents => &self.previous_accidents,
            CatalogField::ServiceHistory => &self.service_history,
            CatalogField::InsuranceType => &self.insurance_type,
        }
    }
}

/// Immutable in-memory table of known car records. Loaded once at startup;
/// no mutation API exists, so sharing it behind an `Arc` needs no locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Load the catalog from the reference CSV file.
    ///
    /// Fails with `DataUnavailable` when the file is missing, a required
    /// column is absent, or no rows survive parsing. All fatal at startup.
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::DataUnavailable(format!(
                "reference dataset not found at {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded reference catalog from {} ({} records)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parse catalog records from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        // Check headers up front so a malformed file reports the missing
        // column instead of a per-row deserialize error.
        let headers = csv_reader
            .headers()
            .map_err(|e| AppError::DataUnavailable(format!("unreadable CSV header: {}", e)))?
            .clone();
        for field in CatalogField::all() {
            if !headers.iter().any(|h| h == field.column()) {
                return Err(AppError::DataUnavailable(format!(
                    "reference dataset is missing required column '{}'",
                    field.column()
                )));
            }
        }

        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            let record: CatalogRecord = row.map_err(|e| {
                AppError::DataUnavailable(format!("malformed reference dataset row: {}", e))
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(AppError::DataUnavailable(
                "reference dataset contains no records".to_string(),
            ));
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every distinct value of an attribute, lexicographically sorted.
    pub fn distinct_values(&self, field: CatalogField) -> BTreeSet<String> {
        self.distinct_values_filtered(field, &[])
    }

    /// Distinct values of an attribute among records matching every filter.
    ///
    /// Narrowing never invents values: the result is always a subset of the
    /// unfiltered domain. An over-constrained filter set simply yields an
    /// empty set, which callers treat as "no valid choice", not an error.
    pub fn distinct_values_filtered(
        &self,
        field: CatalogField,
        filters: &[(CatalogField, &str)],
    ) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|r| filters.iter().all(|(f, v)| r.get(*f) == *v))
            .map(|r| r.get(field).to_string())
            .collect()
    }
}
