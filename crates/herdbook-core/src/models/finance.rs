use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::animal::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Sale {
    pub id: i64,
    pub animal: i64,
    pub animal_name: Option<String>,
    pub animal_number: Option<String>,
    pub sold_at: NaiveDate,
    pub sold_price: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewSale {
    pub animal: i64,
    pub sold_at: NaiveDate,
    pub sold_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SalePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Purchase {
    pub id: i64,
    pub animal: i64,
    pub animal_type_name: Option<String>,
    pub animal_gender: Option<Gender>,
    pub purchase_date: NaiveDate,
    pub purchase_price: f64,
    pub seller_name: Option<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewPurchase {
    pub animal: i64,
    pub purchase_date: NaiveDate,
    pub purchase_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PurchasePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ExpenseType {
    Medicine,
    Food,
    Other,
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseType::Medicine => write!(f, "medicine"),
            ExpenseType::Food => write!(f, "food"),
            ExpenseType::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Expense {
    pub id: i64,
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct NewExpense {
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub expense_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<ExpenseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sale_omits_missing_notes() {
        let sale = NewSale {
            animal: 4,
            sold_at: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            sold_price: 1200.0,
            notes: None,
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"animal": 4, "sold_at": "2024-07-01", "sold_price": 1200.0})
        );
    }

    #[test]
    fn test_expense_type_wire_format() {
        assert_eq!(
            serde_json::to_value(ExpenseType::Medicine).unwrap(),
            serde_json::json!("medicine")
        );
        let parsed: ExpenseType = serde_json::from_str(r#""food""#).unwrap();
        assert_eq!(parsed, ExpenseType::Food);
    }
}
