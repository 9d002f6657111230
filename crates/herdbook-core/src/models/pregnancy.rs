use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum PregnancyStatus {
    Pending,
    Success,
    Cancelled,
    Delivered,
}

impl std::fmt::Display for PregnancyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PregnancyStatus::Pending => write!(f, "pending"),
            PregnancyStatus::Success => write!(f, "success"),
            PregnancyStatus::Cancelled => write!(f, "cancelled"),
            PregnancyStatus::Delivered => write!(f, "delivered"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PregnancyTracking {
    pub id: i64,
    pub animal: i64,
    pub status: PregnancyStatus,
    pub status_display: String,
    pub date_started: NaiveDate,
    pub date_confirmed: Option<NaiveDate>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewPregnancy {
    pub animal: i64,
    pub date_started: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PregnancyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_confirmed: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PregnancyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PregnancyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_started: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_confirmed: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BreederNote {
    pub id: i64,
    pub animal: i64,
    pub note: String,
    pub record_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewNote {
    pub animal: i64,
    pub note: String,
    pub record_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_date: Option<NaiveDate>,
}
