//! The user's in-progress form selection and the catalog attribute space.

use serde::{Deserialize, Serialize};

/// Categorical attributes of a catalog record.
///
/// `column()` gives the CSV header the reference dataset uses; the one-hot
/// schema uses the same strings as group names, so the enum is the single
/// bridge between dataset, selection, and feature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogField {
    Location,
    Brand,
    Model,
    CarType,
    Color,
    NumberOfOwners,
    FuelType,
    TransmissionType,
    PreviousAccidents,
    ServiceHistory,
    InsuranceType,
}

impl CatalogField {
    /// CSV column header / one-hot group name for this attribute.
    pub fn column(&self) -> &'static str {
        match self {
            CatalogField::Location => "Location",
            CatalogField::Brand => "Brand",
            CatalogField::Model => "Model",
            CatalogField::CarType => "Car Type",
            CatalogField::Color => "Color",
            CatalogField::NumberOfOwners => "Number of Owners",
            CatalogField::FuelType => "Fuel Type",
            CatalogField::TransmissionType => "Transmission Type",
            CatalogField::PreviousAccidents => "Previous Accidents",
            CatalogField::ServiceHistory => "Service History",
            CatalogField::InsuranceType => "Insurance Type",
        }
    }

    /// Every categorical attribute, in dataset column order.
    pub fn all() -> &'static [CatalogField] {
        &[
            CatalogField::Location,
            CatalogField::Brand,
            CatalogField::Model,
            CatalogField::CarType,
            CatalogField::Color,
            CatalogField::NumberOfOwners,
            CatalogField::FuelType,
            CatalogField::TransmissionType,
            CatalogField::PreviousAccidents,
            CatalogField::ServiceHistory,
            CatalogField::InsuranceType,
        ]
    }
}

/// Dependent dropdowns, earliest stage first. Each stage is filtered by every
/// earlier stage that already has a value. Location is deliberately absent:
/// it narrows nothing and nothing narrows it.
pub const CASCADE_ORDER: [CatalogField; 4] = [
    CatalogField::Brand,
    CatalogField::Model,
    CatalogField::CarType,
    CatalogField::Color,
];

/// A user's in-progress choice. Categorical attributes stay `None` until
/// picked; numeric attributes carry the raw form values (range-checked at the
/// HTTP boundary before a `Selection` is ever built).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub location: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub car_type: Option<String>,
    pub color: Option<String>,
    pub number_of_owners: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission_type: Option<String>,
    pub previous_accidents: Option<String>,
    pub service_history: Option<String>,
    pub insurance_type: Option<String>,

    pub year: u16,
    pub odometer_km: u32,
    pub engine_capacity_l: f32,
}

impl Selection {
    /// The chosen value for a categorical attribute, if any.
    pub fn get(&self, field: CatalogField) -> Option<&str> {
        match field {
            CatalogField::Location => self.location.as_deref(),
            CatalogField::Brand => self.brand.as_deref(),
            CatalogField::Model => self.model.as_deref(),
            CatalogField::CarType => self.car_type.as_deref(),
            CatalogField::Color => self.color.as_deref(),
            CatalogField::NumberOfOwners => self.number_of_owners.as_deref(),
            CatalogField::FuelType => self.fuel_type.as_deref(),
            CatalogField::TransmissionType => self.transmission_type.as_deref(),
            CatalogField::PreviousAccidents => self.previous_accidents.as_deref(),
            CatalogField::ServiceHistory => self.service_history.as_deref(),
            CatalogField::InsuranceType => self.insurance_type.as_deref(),
        }
    }

    /// Set or clear a categorical attribute.
    pub fn set(&mut self, field: CatalogField, value: Option<String>) {
        let slot = match field {
            CatalogField::Location => &mut self.location,
            CatalogField::Brand => &mut self.brand,
            CatalogField::Model => &mut self.model,
            CatalogField::CarType => &mut self.car_type,
            CatalogField::Color => &mut self.color,
            CatalogField::NumberOfOwners => &mut self.number_of_owners,
            CatalogField::FuelType => &mut self.fuel_type,
            CatalogField::TransmissionType => &mut self.transmission_type,
            CatalogField::PreviousAccidents => &mut self.previous_accidents,
            CatalogField::ServiceHistory => &mut self.service_history,
            CatalogField::InsuranceType => &mut self.insurance_type,
        };
        *slot = value;
    }

    /// Column names of every categorical attribute still unset.
    pub fn missing_fields(&self) -> Vec<String> {
        CatalogField::all()
            .iter()
            .filter(|f| self.get(**f).is_none())
            .map(|f| f.column().to_string())
            .collect()
    }
}
