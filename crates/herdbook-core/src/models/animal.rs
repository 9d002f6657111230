use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::pregnancy::PregnancyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum AnimalStatus {
    Existing,
    Sold,
    Dead,
}

impl std::fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalStatus::Existing => write!(f, "existing"),
            AnimalStatus::Sold => write!(f, "sold"),
            AnimalStatus::Dead => write!(f, "dead"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AnimalType {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub animal_number: String,
    pub animal_type: i64,
    pub animal_type_name: String,
    pub birth_date: NaiveDate,
    pub mother: Option<i64>,
    pub weight: Option<f64>,
    pub head_price: Option<f64>,
    pub breeder_notes: String,
    pub color: String,
    pub status: AnimalStatus,
    /// Server-computed display string, e.g. "2 years, 3 months"
    pub age: String,
    pub purchase_id: Option<i64>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub seller_name: Option<String>,
    pub mother_name: Option<String>,
    pub mother_number: Option<String>,
    pub is_pregnant: bool,
    pub has_pending_pregnancy: bool,
    pub has_active_pregnancy: bool,
    pub current_pregnancy_status: Option<PregnancyStatus>,
    pub offspring_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server-side referential check run before deleting an animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DeletionCheck {
    pub has_offspring: bool,
    pub offspring_count: i64,
    pub has_purchase: bool,
    pub has_sale: bool,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewAnimal {
    pub name: String,
    pub gender: Gender,
    pub animal_number: String,
    pub animal_type: i64,
    pub birth_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breeder_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnimalStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AnimalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breeder_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnimalStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewAnimalType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AnimalTypePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
